//! Output formatting for `sow`.
//!
//! The default output is newline-delimited: one seed node id per line,
//! the whole list repeated once per trial. `--json` swaps in a single
//! machine-readable report instead.

use std::io::Write;

use serde_json::json;
use sower_select::Selection;

/// Write the seed list as newline-delimited node ids, once per trial.
pub fn render_lines(
    w: &mut impl Write,
    selection: &Selection,
    trials: usize,
) -> std::io::Result<()> {
    let seeds = selection.seeds();
    for _ in 0..trials {
        for seed in &seeds {
            writeln!(w, "{seed}")?;
        }
    }
    Ok(())
}

/// Write one JSON report with the flat seed list and per-metric blocks.
pub fn render_json(
    w: &mut impl Write,
    selection: &Selection,
    trials: usize,
) -> anyhow::Result<()> {
    let mut metrics = serde_json::Map::new();
    for (metric, nodes) in selection.blocks() {
        metrics.insert(metric.as_str().to_string(), json!(nodes));
    }

    let report = json!({
        "trials": trials,
        "seeds": selection.seeds(),
        "metrics": metrics,
    });
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}
