//! Whole-game scripts through the runner.

use hotseat::{SnapshotView, run_script};
use hotseat_core::{ChessRules, GameSession, OverReason, Side};

fn replay(script: &str, budget: u32) -> Vec<serde_json::Value> {
    let mut session = GameSession::new(ChessRules::new(), budget);
    let mut out = Vec::new();
    run_script(&mut session, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_one_line_per_command() {
    let lines = replay("click e2\nclick e4\n# reply\nclick e7\n", 30);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["selection"]["state"], "piece_selected");
    assert_eq!(lines[1]["active_side"], "Black");
    assert_eq!(lines[1]["board"][4], "....P...");
}

#[test]
fn test_fools_mate_script() {
    let script = "\
click f2
click f3
click e7
click e5
click g2
click g4
click d8
click h4
";
    let lines = replay(script, 30);
    let last: SnapshotView = serde_json::from_value(lines[lines.len() - 1].clone()).unwrap();

    assert_eq!(last.flags.over_reason(), Some(OverReason::Checkmate));
    assert_eq!(last.active_side, Side::Black);
    assert_eq!(last.tally.black_wins(), 1);
    assert!(!last.clock.is_running());
}

#[test]
fn test_timeout_then_restart_keeps_tally() {
    let mut script = String::new();
    for _ in 0..3 {
        script.push_str("tick\n");
    }
    script.push_str("restart\n");

    let lines = replay(&script, 3);
    assert_eq!(lines[2]["flags"]["over_reason"], "Timeout");
    assert_eq!(lines[3]["flags"]["over"], false);
    assert_eq!(lines[3]["tally"]["black_wins"], 1);
    assert_eq!(lines[3]["clock"]["remaining_seconds"], 3);
}

#[test]
fn test_pause_freezes_clock() {
    let lines = replay("tick\npause\ntick\ntick\npause\ntick\n", 30);
    let remaining: Vec<_> = lines
        .iter()
        .map(|l| l["clock"]["remaining_seconds"].as_u64().unwrap())
        .collect();
    assert_eq!(remaining, vec![29, 29, 29, 29, 29, 28]);
    assert_eq!(lines[1]["flags"]["paused"], true);
}

#[test]
fn test_unknown_line_reported_inline() {
    let lines = replay("click e2\nteleport e2 e5\nclick e4\n", 30);
    assert_eq!(lines.len(), 3);
    assert!(lines[1]["error"].is_string());
    assert_eq!(lines[2]["active_side"], "Black");
}
