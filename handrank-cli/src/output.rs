//! Output formatting: plain ranking list and JSON.
use handrank_core::{RankedItem, SessionResult, SessionSummary};
use serde::Serialize;
use std::io::{self, Write};

use crate::bail;

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: &'a [RankedItem],
    total_items: usize,
    #[serde(flatten)]
    summary: &'a SessionSummary,
}

/// Write the final ranking as numbered lines.
pub fn write_rankings(out: &mut impl Write, rankings: &[RankedItem]) -> io::Result<()> {
    writeln!(out, "\nFinal Rankings:")?;
    if rankings.is_empty() {
        writeln!(out, "No items were ranked.")?;
        return Ok(());
    }
    for r in rankings {
        writeln!(out, "{}. {} (Score: {})", r.rank, r.name, r.score)?;
    }
    Ok(())
}

/// Print the final ranking to stdout.
pub fn print_rankings(rankings: &[RankedItem]) {
    let stdout = io::stdout();
    write_rankings(&mut stdout.lock(), rankings)
        .unwrap_or_else(|e| bail(format!("Failed to write rankings: {e}")));
}

fn to_json(result: &SessionResult, total_items: usize) -> String {
    let output = JsonOutput {
        items: &result.rankings,
        total_items,
        summary: &result.summary,
    };

    serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| bail(format!("Failed to serialize rankings: {e}")))
}

/// Print results as JSON.
pub fn print_json(result: &SessionResult, total_items: usize) {
    println!("{}", to_json(result, total_items));
}
