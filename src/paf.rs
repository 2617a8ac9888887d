use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};
use log::info;

/// The columns of one PAF row used by the dot plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotPlotSegment {
    pub query_length: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub ref_length: u64,
    pub ref_start: u64,
    pub ref_end: u64,
}

fn parse_field(fields: &[&str], idx: usize, what: &str) -> anyhow::Result<u64> {
    fields[idx]
        .trim()
        .parse::<u64>()
        .with_context(|| format!("bad {} {:?} in column {}", what, fields[idx], idx + 1))
}

/// Parse one tab separated PAF line.
pub fn parse_paf_line(line: &str) -> anyhow::Result<DotPlotSegment> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 9 {
        bail!("expected at least 9 tab separated columns, found {}", fields.len());
    }
    Ok(DotPlotSegment {
        query_length: parse_field(&fields, 1, "query length")?,
        query_start: parse_field(&fields, 2, "query start")?,
        query_end: parse_field(&fields, 3, "query end")?,
        ref_length: parse_field(&fields, 6, "target length")?,
        ref_start: parse_field(&fields, 7, "target start")?,
        ref_end: parse_field(&fields, 8, "target end")?,
    })
}

/// Load all segments of a PAF file in file order.
///
/// A missing or empty file is not handled here; malformed rows are errors.
pub fn read_paf(path: &Path) -> anyhow::Result<Vec<DotPlotSegment>> {
    let file =
        File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let mut segments = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Error reading {}", path.display()))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let seg = parse_paf_line(line)
            .with_context(|| format!("{}:{}: invalid PAF record", path.display(), i + 1))?;
        segments.push(seg);
    }
    info!("Read {} alignment segments from {}", segments.len(), path.display());
    Ok(segments)
}
