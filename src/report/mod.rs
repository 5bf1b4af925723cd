use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::probe_config::{OutputFormat, ProbeConfig};
use crate::input::address::StunAddress;
use crate::stun_probe::result::{ProbeStatus, ResultSet};

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

#[derive(Serialize)]
struct JsonRow<'a> {
    server: &'a StunAddress,
    status: ProbeStatus,
    label: &'static str,
    status_class: &'static str,
}

/// Writes the results in the configured format.
pub fn render<W: Write>(out: &mut W, results: &ResultSet, config: &ProbeConfig) -> io::Result<()> {
    match config.output {
        OutputFormat::Table => write_table(out, results, config.max_server_width, Utc::now()),
        OutputFormat::Json => write_json(out, results),
    }
}

pub fn write_table<W: Write>(
    out: &mut W,
    results: &ResultSet,
    server_width: usize,
    run_at: DateTime<Utc>,
) -> io::Result<()> {
    writeln!(out, "STUN check at {}", run_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    for outcome in results {
        writeln!(
            out,
            "{} {}",
            to_fixed_width(outcome.server.as_str(), server_width),
            outcome.label()
        )?;
    }
    let working = results
        .iter()
        .filter(|o| o.status == ProbeStatus::Working)
        .count();
    writeln!(out, "{working}/{} working", results.len())
}

pub fn write_json<W: Write>(out: &mut W, results: &ResultSet) -> io::Result<()> {
    let rows: Vec<JsonRow> = results
        .iter()
        .map(|outcome| JsonRow {
            server: &outcome.server,
            status: outcome.status,
            label: outcome.label(),
            status_class: outcome.status_class(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)
}
