//! User agent progress scenarios, checked against the progress log on disk.

use pretty_assertions::assert_eq;
use relay_agents::{Error, Settings, StepStatus, UserAgent};
use relay_messages::{Action, parse};
use relay_test_utils::TestRun;
use rstest::rstest;
use relay_agents::StepStatus::{Active, Done, Pending};

const FIVE_STEPS: [&str; 5] = ["Scaffold", "Parser", "Tracker", "Dispatcher", "Docs"];

fn five_step_run() -> (TestRun, UserAgent) {
    let run = TestRun::new("run-1").with_steps(&FIVE_STEPS);
    let agent = UserAgent::for_run(&run.layout(), &Settings::default()).unwrap();
    (run, agent)
}

fn progress(action: &str, details: &str) -> String {
    format!("```\nFROM: CODER\nTO: USER\nACTION: {action}\nDETAILS: {details}\n```")
}

fn statuses(agent: &UserAgent) -> Vec<StepStatus> {
    agent.tracker().snapshot().statuses().to_vec()
}

// =============================================================================
// Transition rule
// =============================================================================

#[test]
fn test_started_boundary_uses_highest_step() {
    let (run, mut agent) = five_step_run();

    agent
        .handle(&progress("step-started", "starting steps 2 and 3"))
        .unwrap();

    assert_eq!(statuses(&agent), vec![Done, Active, Active, Pending, Pending]);
    assert_eq!(
        run.progress_lines(),
        vec![
            "[✓] Step 1: Scaffold",
            "[*] Step 2: Parser",
            "[*] Step 3: Tracker",
            "[ ] Step 4: Dispatcher",
            "[ ] Step 5: Docs",
        ]
    );
}

#[test]
fn test_completed_marks_lower_steps_done() {
    let (_run, mut agent) = five_step_run();

    agent
        .handle(&progress("step-completed", "completed step 4"))
        .unwrap();

    assert_eq!(statuses(&agent), vec![Done, Done, Done, Done, Pending]);
}

#[test]
fn test_snapshot_is_recomputed_not_accumulated() {
    let (_run, mut agent) = five_step_run();

    agent
        .handle(&progress("step-completed", "completed step 4"))
        .unwrap();
    agent
        .handle(&progress("step-started", "back to step 2"))
        .unwrap();

    assert_eq!(statuses(&agent), vec![Done, Active, Pending, Pending, Pending]);
}

#[test]
fn test_solution_complete_is_idempotent() {
    let (run, mut agent) = five_step_run();

    agent
        .handle(&progress("solution-complete", "All done"))
        .unwrap();
    let first = statuses(&agent);
    let first_lines = run.progress_lines();

    agent
        .handle(&progress("solution-complete", "All done"))
        .unwrap();

    assert_eq!(first, vec![Done; 5]);
    assert_eq!(statuses(&agent), first);
    assert_eq!(run.progress_lines(), first_lines);
}

// =============================================================================
// No-op and rejection
// =============================================================================

#[rstest]
#[case("step-started")]
#[case("step-completed")]
fn test_details_without_digits_change_nothing(#[case] action: &str) {
    let (run, mut agent) = five_step_run();
    agent
        .handle(&progress("step-started", "starting step 1"))
        .unwrap();
    let before = statuses(&agent);
    let log_before = run.progress_log();

    let reply = agent
        .handle(&progress(action, "making good progress"))
        .unwrap();

    assert_eq!(parse(&reply).unwrap().action().unwrap(), Action::Acknowledge);
    assert_eq!(statuses(&agent), before);
    assert_eq!(run.progress_log(), log_before);
}

#[test]
fn test_no_log_until_first_progress() {
    let (run, mut agent) = five_step_run();

    agent
        .handle(&progress("step-started", "warming up"))
        .unwrap();

    run.assert_file_not_exists(".relay/run-1/logs/progress.log");
}

#[test]
fn test_unknown_action_leaves_state_untouched() {
    let (run, mut agent) = five_step_run();
    agent
        .handle(&progress("step-started", "starting step 2"))
        .unwrap();
    let before = statuses(&agent);
    let log_before = run.progress_log();

    let err = agent.handle(&progress("frobnicate", "step 5")).unwrap_err();

    assert!(matches!(
        err,
        Error::Message(relay_messages::Error::UnknownAction(ref name)) if name == "frobnicate"
    ));
    assert_eq!(statuses(&agent), before);
    assert_eq!(run.progress_log(), log_before);
}

// =============================================================================
// One agent per process
// =============================================================================

fn report_from(agent: &mut UserAgent, sender: &str, details: &str) -> String {
    agent
        .handle(&format!(
            "```\nFROM: {sender}\nTO: USER\nACTION: step-completed\nDETAILS: {details}\n```"
        ))
        .unwrap()
}

#[test]
fn test_callers_share_one_agent() {
    let (run, mut agent) = five_step_run();

    let coder_ack = report_from(&mut agent, "CODER", "completed step 1");
    let executor_ack = report_from(&mut agent, "EXECUTOR", "completed step 2");

    assert_eq!(parse(&coder_ack).unwrap().recipient(), Some("CODER"));
    assert_eq!(parse(&executor_ack).unwrap().recipient(), Some("EXECUTOR"));
    assert_eq!(statuses(&agent), vec![Done, Done, Pending, Pending, Pending]);
    assert_eq!(run.progress_lines().len(), 5);
}
