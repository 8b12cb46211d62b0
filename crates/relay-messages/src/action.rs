//! The enumerated protocol actions.
//!
//! `Action` is a closed sum type: adding an action means adding a variant,
//! and every `match` over it stops compiling until the new case is handled.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Field};

/// An operation tag carried in the `ACTION` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    GenerateSteps,
    InstallPackage,
    ProblemStatement,
    Answer,
    Feedback,
    StepStarted,
    StepCompleted,
    Inform,
    SolutionComplete,
    TrainUsingSearchTerm,
    TrainUsingUrl,
    Infer,
    Acknowledge,
    TrainingOutput,
    Response,
}

impl Action {
    /// Every action in the protocol, in declaration order.
    pub const ALL: [Action; 15] = [
        Action::GenerateSteps,
        Action::InstallPackage,
        Action::ProblemStatement,
        Action::Answer,
        Action::Feedback,
        Action::StepStarted,
        Action::StepCompleted,
        Action::Inform,
        Action::SolutionComplete,
        Action::TrainUsingSearchTerm,
        Action::TrainUsingUrl,
        Action::Infer,
        Action::Acknowledge,
        Action::TrainingOutput,
        Action::Response,
    ];

    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateSteps => "generate-steps",
            Self::InstallPackage => "install-package",
            Self::ProblemStatement => "problem-statement",
            Self::Answer => "answer",
            Self::Feedback => "feedback",
            Self::StepStarted => "step-started",
            Self::StepCompleted => "step-completed",
            Self::Inform => "inform",
            Self::SolutionComplete => "solution-complete",
            Self::TrainUsingSearchTerm => "train-using-search-term",
            Self::TrainUsingUrl => "train-using-url",
            Self::Infer => "infer",
            Self::Acknowledge => "acknowledge",
            Self::TrainingOutput => "training-output",
            Self::Response => "response",
        }
    }

    /// Fields carried after the `FROM`/`TO`/`ACTION` envelope, in wire order.
    pub fn body_fields(&self) -> &'static [Field] {
        match self {
            Self::InstallPackage => &[Field::Command],
            Self::TrainUsingSearchTerm => &[Field::Term],
            Self::TrainUsingUrl => &[Field::Url],
            Self::Acknowledge => &[],
            Self::GenerateSteps
            | Self::ProblemStatement
            | Self::Answer
            | Self::Feedback
            | Self::StepStarted
            | Self::StepCompleted
            | Self::Inform
            | Self::SolutionComplete
            | Self::Infer
            | Self::TrainingOutput
            | Self::Response => &[Field::Details],
        }
    }

    /// One-line description used when listing actions in prompts.
    pub fn description(&self) -> &'static str {
        match self {
            Self::GenerateSteps => "Generate steps for the problem statement (PS):",
            Self::InstallPackage => "To install a package or library:",
            Self::ProblemStatement => "State the problem to be solved:",
            Self::Answer => "Answer a question asked earlier:",
            Self::Feedback => "Give feedback on the work so far:",
            Self::StepStarted => "Report that one or more steps have started:",
            Self::StepCompleted => "Report that one or more steps are complete:",
            Self::Inform => "Share information that needs no decision:",
            Self::SolutionComplete => "Report that the whole solution is complete:",
            Self::TrainUsingSearchTerm => "Train the researcher on the results of a web search:",
            Self::TrainUsingUrl => "Train the researcher on the contents of a URL:",
            Self::Infer => "Ask the researcher a question against its trained knowledge:",
            Self::Acknowledge => "Acknowledge receipt of a message:",
            Self::TrainingOutput => "Report the outcome of a training request:",
            Self::Response => "Return the answer to an inference request:",
        }
    }

    /// Placeholder value used for `field` when rendering a sample.
    pub fn placeholder(&self, field: Field) -> &'static str {
        match (self, field) {
            (Self::GenerateSteps, _) => "Problem statement (PS) here.",
            (Self::InstallPackage, _) => "Command to install the package or library.",
            (Self::StepStarted, _) => "Starting step 2.",
            (Self::StepCompleted, _) => "Completed step 2.",
            (Self::TrainUsingSearchTerm, _) => "Search term here.",
            (Self::TrainUsingUrl, _) => "https://example.com/docs",
            (Self::Infer, _) => "Question to answer using the trained knowledge.",
            _ => "Details here.",
        }
    }

    /// Whether the action reports step progress to the user agent.
    pub fn is_progress(&self) -> bool {
        matches!(
            self,
            Self::StepStarted | Self::StepCompleted | Self::SolutionComplete
        )
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wire_names_are_unique() {
        let names: HashSet<_> = Action::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(names.len(), Action::ALL.len());
    }

    #[test]
    fn test_parse_known_action() {
        assert_eq!("step-started".parse::<Action>().unwrap(), Action::StepStarted);
        assert_eq!(
            "train-using-url".parse::<Action>().unwrap(),
            Action::TrainUsingUrl
        );
    }

    #[test]
    fn test_parse_unknown_action() {
        let err = "frobnicate".parse::<Action>().unwrap_err();
        assert_eq!(err, Error::UnknownAction("frobnicate".to_string()));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("Step-Started".parse::<Action>().is_err());
        assert!(" infer".parse::<Action>().is_err());
    }

    #[test]
    fn test_progress_actions() {
        let progress: Vec<_> = Action::ALL.iter().filter(|a| a.is_progress()).collect();
        assert_eq!(
            progress,
            vec![
                &Action::StepStarted,
                &Action::StepCompleted,
                &Action::SolutionComplete
            ]
        );
    }

    #[test]
    fn test_serializes_as_wire_name() {
        let json = serde_json::to_string(&Action::TrainUsingSearchTerm).unwrap();
        assert_eq!(json, "\"train-using-search-term\"");
    }
}
