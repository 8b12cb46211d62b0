//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use relay_agents::config::{RUN_ID_ENV, WORKSPACE_ENV};

/// Relay - talk to coding agents as the user
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root holding the .relay directory
    #[arg(long, global = true, env = WORKSPACE_ENV)]
    pub workspace: Option<PathBuf>,

    /// Identifier of the current run
    #[arg(long, global = true, env = RUN_ID_ENV)]
    pub run_id: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Act as the user agent on a stream of messages
    ///
    /// Reads fenced messages from stdin and writes one acknowledgment per
    /// message to stdout. Progress reports update the run's progress log.
    ///
    /// Text between fenced blocks is dropped with a warning. Text after the
    /// last block is handled as one unfenced message, so a single message
    /// may be sent without fences.
    User,

    /// Compose an outbound message from the user
    Compose {
        /// Kind of message
        #[arg(value_enum)]
        kind: ComposeKind,

        /// Recipient agent, e.g. CODER
        #[arg(long)]
        to: String,

        /// Message body
        #[arg(long)]
        details: String,
    },

    /// List protocol actions with their fields
    Actions {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print a sample message for an action
    Sample {
        /// Action name, e.g. step-started
        action: String,

        /// Sender shown in the sample
        #[arg(long, default_value = "SENDER")]
        from: String,

        /// Recipient shown in the sample
        #[arg(long, default_value = "RECIPIENT")]
        to: String,
    },
}

/// Outbound message kinds the user can author
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeKind {
    ProblemStatement,
    Answer,
    Feedback,
}
