//! Prometheus text exposition format.
//!
//! Renders a metrics snapshot for scraping by a Prometheus server or
//! compatible agent.

use std::fmt::Write;

use crate::collector::MetricsSnapshot;

fn counter(out: &mut String, name: &str, help: &str, samples: &[(Option<&str>, u64)]) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} counter");
    for (reason, value) in samples {
        match reason {
            Some(reason) => {
                let _ = writeln!(out, "{name}{{reason=\"{reason}\"}} {value}");
            }
            None => {
                let _ = writeln!(out, "{name} {value}");
            }
        }
    }
}

/// Render a snapshot into Prometheus text format.
///
/// Rejections and score failures carry a `reason` label.
pub fn render_prometheus(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();

    counter(
        &mut out,
        "podgang_admitted_total",
        "Jobs admitted by the gang check.",
        &[(None, snapshot.admitted)],
    );
    counter(
        &mut out,
        "podgang_rejected_total",
        "Jobs rejected by the gang check.",
        &[
            (
                Some("insufficient_membership"),
                snapshot.rejected_insufficient_membership,
            ),
            (Some("invalid_quorum"), snapshot.rejected_invalid_quorum),
            (
                Some("membership_unavailable"),
                snapshot.rejected_membership_unavailable,
            ),
        ],
    );
    counter(
        &mut out,
        "podgang_nodes_scored_total",
        "Nodes given a raw score.",
        &[(None, snapshot.nodes_scored)],
    );
    counter(
        &mut out,
        "podgang_score_failures_total",
        "Nodes excluded from a scoring round.",
        &[
            (Some("resource_overflow"), snapshot.score_overflows),
            (Some("lookup"), snapshot.score_lookup_failures),
        ],
    );
    counter(
        &mut out,
        "podgang_batches_normalized_total",
        "Score batches normalized.",
        &[(None, snapshot.batches_normalized)],
    );
    counter(
        &mut out,
        "podgang_normalize_failures_total",
        "Score batches that could not be normalized.",
        &[(None, snapshot.normalize_failures)],
    );

    out
}
