//! Line-oriented command scripts.
//!
//! Each non-blank, non-comment line is one [`SessionCommand`]. After each
//! line the runner writes one JSON object: the [`SnapshotView`] if the
//! command applied, `{"error": ...}` otherwise. Processing continues past
//! bad lines.

use crate::command::SessionCommand;
use crate::view::SnapshotView;
use anyhow::{Context, Result};
use hotseat_core::{GameSession, RulesEngine};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Totals for one script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptSummary {
    /// Commands applied.
    pub applied: usize,
    /// Lines rejected.
    pub rejected: usize,
}

/// Replays `input` against `session`, writing JSON lines to `output`.
#[instrument(skip_all)]
pub fn run_script<R, I, O>(
    session: &mut GameSession<R>,
    input: I,
    mut output: O,
) -> Result<ScriptSummary>
where
    R: RulesEngine,
    I: BufRead,
    O: Write,
{
    let mut summary = ScriptSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read script line")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_no = index + 1;
        let applied = trimmed
            .parse::<SessionCommand>()
            .map_err(|e| e.to_string())
            .and_then(|command| command.apply(session).map_err(|e| e.to_string()));

        match applied {
            Ok(()) => {
                debug!(line_no, command = trimmed, "Script command applied");
                summary.applied += 1;
                serde_json::to_writer(&mut output, &SnapshotView::capture(session))
                    .context("Failed to write snapshot")?;
            }
            Err(message) => {
                warn!(line_no, error = %message, "Script line rejected");
                summary.rejected += 1;
                serde_json::to_writer(&mut output, &serde_json::json!({ "error": message }))
                    .context("Failed to write error")?;
            }
        }
        writeln!(output).context("Failed to write newline")?;
    }

    output.flush().context("Failed to flush output")?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "Script finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotseat_core::ChessRules;

    #[test]
    fn test_comments_and_blanks_skipped() {
        let mut session = GameSession::new(ChessRules::new(), 30);
        let script = "# opening\n\n   \nclick e2\n";
        let mut out = Vec::new();

        let summary = run_script(&mut session, script.as_bytes(), &mut out).unwrap();
        assert_eq!(summary, ScriptSummary { applied: 1, rejected: 0 });
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_bad_line_reports_and_continues() {
        let mut session = GameSession::new(ChessRules::new(), 30);
        let mut out = Vec::new();

        let summary = run_script(&mut session, "jump\ntick\n".as_bytes(), &mut out).unwrap();
        assert_eq!(summary, ScriptSummary { applied: 1, rejected: 1 });

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert!(lines[0]["error"].as_str().unwrap().contains("jump"));
        assert_eq!(lines[1]["clock"]["remaining_seconds"], 29);
    }
}
