//! The `user` command: the user agent over stdio.

use colored::Colorize;
use relay_agents::UserAgent;
use relay_messages::MessageAssembler;
use std::io::{BufRead, Write};

use crate::error::Result;

/// Outcome of one `user` session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserSummary {
    pub handled: usize,
    pub failed: usize,
}

/// Feed every fenced message on `input` to `agent`.
///
/// Replies go to `output`, one per message. A message that cannot be
/// handled is reported on `errors` and the stream continues. Text left after
/// the last fenced block is handled as an unfenced message.
pub fn run_user<R, W, E>(
    agent: &mut UserAgent,
    input: R,
    mut output: W,
    mut errors: E,
) -> Result<UserSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut assembler = MessageAssembler::new();
    let mut summary = UserSummary::default();

    let mut dispatch = |raw: String, summary: &mut UserSummary| -> Result<()> {
        match agent.handle(&raw) {
            Ok(reply) => {
                writeln!(output, "{reply}")?;
                output.flush()?;
                summary.handled += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Message rejected");
                writeln!(errors, "{}: {}", "error".red().bold(), e)?;
                summary.failed += 1;
            }
        }
        Ok(())
    };

    for line in input.lines() {
        if let Some(raw) = assembler.push_line(&line?) {
            dispatch(raw, &mut summary)?;
        }
    }
    if let Some(raw) = assembler.finish() {
        dispatch(raw, &mut summary)?;
    }

    tracing::info!(handled = summary.handled, failed = summary.failed, "Input closed");
    Ok(summary)
}
