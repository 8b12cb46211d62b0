//! Step progress tracking.
//!
//! Every progress event recomputes the whole [`Snapshot`] from the step
//! numbers it mentions; nothing is carried over from the previous snapshot.
//! Given the reported set `R` and its maximum `m`:
//!
//! | Event | Done | Active | Pending |
//! |---|---|---|---|
//! | `step-started` | `n < m`, `n` not in `R` | `n` in `R` | everything else |
//! | `step-completed` | `n < m` or `n` in `R` | never | everything else |
//! | `solution-complete` | every step | never | never |
//!
//! An event for `step-started` or `step-completed` whose details contain no
//! digits changes nothing, and the progress log is left as it was.

use regex::Regex;
use relay_messages::Action;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use crate::progress_log::ProgressLog;
use crate::steps::Step;
use crate::Result;

static STEP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid step number regex"));

/// Every maximal run of digits in `details`, read as a 1-based step number.
///
/// Runs too long to fit a `usize` saturate to `usize::MAX`, so they still
/// move the boundary past every step.
pub fn extract_step_numbers(details: &str) -> BTreeSet<usize> {
    STEP_NUMBER
        .find_iter(details)
        .map(|m| m.as_str().parse().unwrap_or(usize::MAX))
        .collect()
}

/// Displayed status of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

impl StepStatus {
    /// Checkbox marker used in the progress log.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Pending => "[ ]",
            Self::Active => "[*]",
            Self::Done => "[✓]",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// The progress actions, separated from the rest of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    StepStarted,
    StepCompleted,
    SolutionComplete,
}

impl TryFrom<Action> for ProgressKind {
    type Error = relay_messages::Error;

    fn try_from(action: Action) -> std::result::Result<Self, Self::Error> {
        match action {
            Action::StepStarted => Ok(Self::StepStarted),
            Action::StepCompleted => Ok(Self::StepCompleted),
            Action::SolutionComplete => Ok(Self::SolutionComplete),
            other => Err(relay_messages::Error::UnknownAction(other.to_string())),
        }
    }
}

impl From<ProgressKind> for Action {
    fn from(kind: ProgressKind) -> Self {
        match kind {
            ProgressKind::StepStarted => Action::StepStarted,
            ProgressKind::StepCompleted => Action::StepCompleted,
            ProgressKind::SolutionComplete => Action::SolutionComplete,
        }
    }
}

/// Status of every step, in step order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    statuses: Vec<StepStatus>,
}

impl Snapshot {
    /// A snapshot with every step pending.
    pub fn pending(len: usize) -> Self {
        Self {
            statuses: vec![StepStatus::Pending; len],
        }
    }

    /// Compute the snapshot for `len` steps after a `kind` event reporting `reported`.
    ///
    /// Returns `None` when the event is a no-op: a `step-started` or
    /// `step-completed` event that reports no step numbers.
    pub fn compute(kind: ProgressKind, reported: &BTreeSet<usize>, len: usize) -> Option<Self> {
        if kind == ProgressKind::SolutionComplete {
            return Some(Self {
                statuses: vec![StepStatus::Done; len],
            });
        }

        // The boundary is the highest reported step, not the lowest.
        let boundary = *reported.last()?;

        let statuses = (1..=len)
            .map(|number| {
                let is_reported = reported.contains(&number);
                match kind {
                    ProgressKind::StepStarted if is_reported => StepStatus::Active,
                    ProgressKind::StepStarted if number < boundary => StepStatus::Done,
                    ProgressKind::StepCompleted if is_reported || number < boundary => {
                        StepStatus::Done
                    }
                    _ => StepStatus::Pending,
                }
            })
            .collect();

        Some(Self { statuses })
    }

    /// Status of the step with the given 1-based number.
    pub fn status(&self, number: usize) -> Option<StepStatus> {
        number
            .checked_sub(1)
            .and_then(|index| self.statuses.get(index))
            .copied()
    }

    pub fn statuses(&self) -> &[StepStatus] {
        &self.statuses
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.statuses.iter().filter(|s| **s == status).count()
    }
}

/// Result of applying one progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// The event reported no step numbers; snapshot and log are untouched
    Unchanged,
    /// The snapshot was recomputed; `logged` is false if the log rewrite failed
    Updated { logged: bool },
}

/// Owns the step list, the current snapshot and the progress log.
#[derive(Debug)]
pub struct ProgressTracker {
    steps: Vec<Step>,
    snapshot: Snapshot,
    log: ProgressLog,
}

impl ProgressTracker {
    /// Start tracking `steps` with every step pending.
    ///
    /// The log is not touched until the first event that changes the snapshot.
    pub fn new(steps: Vec<Step>, log: ProgressLog) -> Self {
        let snapshot = Snapshot::pending(steps.len());
        Self {
            steps,
            snapshot,
            log,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn log(&self) -> &ProgressLog {
        &self.log
    }

    /// Recompute the snapshot for one event and rewrite the progress log.
    pub fn apply(&mut self, kind: ProgressKind, details: &str) -> ProgressUpdate {
        let reported = extract_step_numbers(details);

        let Some(snapshot) = Snapshot::compute(kind, &reported, self.steps.len()) else {
            tracing::debug!(?kind, details, "No step numbers reported, progress unchanged");
            return ProgressUpdate::Unchanged;
        };

        self.snapshot = snapshot;
        tracing::info!(
            ?kind,
            ?reported,
            done = self.snapshot.count(StepStatus::Done),
            active = self.snapshot.count(StepStatus::Active),
            total = self.steps.len(),
            "Progress updated"
        );

        let logged = self.log.rewrite(&self.render_lines());
        ProgressUpdate::Updated { logged }
    }

    /// Apply a progress event identified by its protocol action.
    ///
    /// # Errors
    ///
    /// Returns an unknown-action error for actions that do not report progress.
    pub fn handle(&mut self, action: Action, details: &str) -> Result<ProgressUpdate> {
        let kind = ProgressKind::try_from(action)?;
        Ok(self.apply(kind, details))
    }

    /// One display line per step, e.g. `[✓] Step 1: Create project`.
    pub fn render_lines(&self) -> Vec<String> {
        self.steps
            .iter()
            .zip(self.snapshot.statuses())
            .map(|(step, status)| {
                format!(
                    "{} Step {}: {}",
                    status.marker(),
                    step.number(),
                    step.description()
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use super::StepStatus::{Active, Done, Pending};

    fn set(numbers: &[usize]) -> BTreeSet<usize> {
        numbers.iter().copied().collect()
    }

    #[rstest]
    #[case("starting steps 2 and 3", &[2, 3])]
    #[case("completed step 4", &[4])]
    #[case("step 10, then 2, then 10 again", &[2, 10])]
    #[case("no numbers here", &[])]
    #[case("v1.2.3", &[1, 2, 3])]
    #[case("007", &[7])]
    fn test_extract_step_numbers(#[case] details: &str, #[case] expected: &[usize]) {
        assert_eq!(extract_step_numbers(details), set(expected));
    }

    #[test]
    fn test_extract_saturates_overflowing_runs() {
        let details = "step 99999999999999999999999999 and 2";
        assert_eq!(extract_step_numbers(details), set(&[2, usize::MAX]));
    }

    #[test]
    fn test_overflowing_step_moves_boundary_past_every_step() {
        let reported = extract_step_numbers("started step 99999999999999999999999");
        let snapshot = Snapshot::compute(ProgressKind::StepStarted, &reported, 3).unwrap();
        assert_eq!(snapshot.statuses(), &[Done, Done, Done]);
    }

    #[test]
    fn test_started_uses_highest_reported_step() {
        let snapshot = Snapshot::compute(ProgressKind::StepStarted, &set(&[2, 3]), 5).unwrap();
        assert_eq!(snapshot.statuses(), &[Done, Active, Active, Pending, Pending]);
    }

    #[test]
    fn test_started_marks_gaps_below_boundary_done() {
        let snapshot = Snapshot::compute(ProgressKind::StepStarted, &set(&[1, 4]), 5).unwrap();
        assert_eq!(snapshot.statuses(), &[Active, Done, Done, Active, Pending]);
    }

    #[test]
    fn test_completed_marks_reported_and_lower_done() {
        let snapshot = Snapshot::compute(ProgressKind::StepCompleted, &set(&[4]), 5).unwrap();
        assert_eq!(snapshot.statuses(), &[Done, Done, Done, Done, Pending]);
        assert_eq!(snapshot.count(Active), 0);
    }

    #[test]
    fn test_out_of_range_numbers() {
        let snapshot = Snapshot::compute(ProgressKind::StepStarted, &set(&[9]), 3).unwrap();
        assert_eq!(snapshot.statuses(), &[Done, Done, Done]);

        let snapshot = Snapshot::compute(ProgressKind::StepStarted, &set(&[0]), 3).unwrap();
        assert_eq!(snapshot.statuses(), &[Pending, Pending, Pending]);
    }

    #[rstest]
    #[case(ProgressKind::StepStarted)]
    #[case(ProgressKind::StepCompleted)]
    fn test_empty_report_is_noop(#[case] kind: ProgressKind) {
        assert_eq!(Snapshot::compute(kind, &BTreeSet::new(), 5), None);
    }

    #[test]
    fn test_solution_complete_ignores_report() {
        let snapshot =
            Snapshot::compute(ProgressKind::SolutionComplete, &BTreeSet::new(), 3).unwrap();
        assert_eq!(snapshot.statuses(), &[Done, Done, Done]);
    }

    #[test]
    fn test_status_lookup_is_one_based() {
        let snapshot = Snapshot::compute(ProgressKind::StepStarted, &set(&[2]), 3).unwrap();
        assert_eq!(snapshot.status(0), None);
        assert_eq!(snapshot.status(1), Some(Done));
        assert_eq!(snapshot.status(2), Some(Active));
        assert_eq!(snapshot.status(4), None);
    }

    #[test]
    fn test_progress_kind_rejects_other_actions() {
        assert_eq!(
            ProgressKind::try_from(Action::Inform),
            Err(relay_messages::Error::UnknownAction("inform".to_string()))
        );
        assert_eq!(
            ProgressKind::try_from(Action::StepCompleted),
            Ok(ProgressKind::StepCompleted)
        );
    }

    #[test]
    fn test_status_markers() {
        assert_eq!(Pending.marker(), "[ ]");
        assert_eq!(Active.marker(), "[*]");
        assert_eq!(Done.marker(), "[✓]");
    }
}
