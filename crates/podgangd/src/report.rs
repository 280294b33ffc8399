//! Human-readable rendering of cycle outcomes.

use std::fmt::Write;

use podgang_scheduler::{CycleOutcome, ExcludedNode};

fn write_excluded(out: &mut String, excluded: &[ExcludedNode]) {
    for e in excluded {
        let _ = writeln!(out, "  excluded {}: {}", e.node, e.reason);
    }
}

pub fn render_text(outcome: &CycleOutcome) -> String {
    let mut out = String::new();
    match outcome {
        CycleOutcome::Rejected { job, reason } => {
            let _ = writeln!(out, "job {job}: rejected ({reason})");
        }
        CycleOutcome::Unplaceable { job, excluded } => {
            let _ = writeln!(out, "job {job}: no schedulable node");
            write_excluded(&mut out, excluded);
        }
        CycleOutcome::Ranked {
            job,
            scores,
            excluded,
        } => {
            let _ = writeln!(out, "job {job}: {} node(s) ranked", scores.len());
            for (rank, s) in scores.iter().enumerate() {
                let _ = writeln!(out, "  {:>2}. {:<24} {:>3}", rank + 1, s.name, s.score);
            }
            write_excluded(&mut out, excluded);
        }
    }
    out
}
