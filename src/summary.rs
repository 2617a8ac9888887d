use std::path::Path;

use log::{debug, info};

use crate::input::{open_input, InputError};
use crate::names::NameNormalizer;

/// One row of the breadth-of-coverage summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    pub label: String,
    pub percentage: f64,
    /// Every percentage in the file was written as an integer.
    pub integral: bool,
}

/// A summary row with the name it is shown under.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayAlignmentRecord {
    pub label: String,
    pub display_name: String,
    pub percentage: f64,
    pub integral: bool,
}

impl DisplayAlignmentRecord {
    pub fn bar_label(&self) -> String {
        format!(
            "{}: {}%",
            self.display_name,
            format_percentage(self.percentage, self.integral)
        )
    }
}

/// Format like pandas prints the column: an all-integer column keeps its
/// integers, otherwise integral values get a trailing `.0`.
pub fn format_percentage(value: f64, integral: bool) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        if integral {
            format!("{}", value as i64)
        } else {
            format!("{:.1}", value)
        }
    } else {
        format!("{}", value)
    }
}

fn csv_line(e: &csv::Error) -> usize {
    e.position().map_or(0, |p| p.line() as usize)
}

/// Read the summary CSV. The `label` and `percentage` columns are located
/// by header name; other columns are ignored.
pub fn read_summary(path: &Path) -> Result<Vec<AlignmentRecord>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(open_input(path)?);

    let header = rdr
        .headers()
        .map_err(|e| InputError::malformed(path, csv_line(&e), e.to_string()))?
        .clone();
    if header.iter().all(str::is_empty) {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| InputError::malformed(path, 1, format!("missing column {:?}", name)))
    };
    let label_col = column("label")?;
    let pct_col = column("percentage")?;

    let mut records = Vec::new();
    let mut integral = true;
    for result in rdr.records() {
        let record =
            result.map_err(|e| InputError::malformed(path, csv_line(&e), e.to_string()))?;
        let n = record.position().map_or(0, |p| p.line() as usize);
        let field = |idx: usize| {
            record.get(idx).ok_or_else(|| {
                InputError::malformed(path, n, format!("expected at least {} columns", idx + 1))
            })
        };
        let label = field(label_col)?.to_string();
        let raw_pct = field(pct_col)?;
        let percentage = raw_pct.parse::<f64>().map_err(|e| {
            InputError::malformed(path, n, format!("bad percentage {:?}: {}", raw_pct, e))
        })?;
        integral &= raw_pct.parse::<i64>().is_ok();
        records.push(AlignmentRecord {
            label,
            percentage,
            integral: false,
        });
    }

    if records.is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }
    for r in records.iter_mut() {
        r.integral = integral;
    }
    info!("Read {} alignment summaries from {}", records.len(), path.display());
    Ok(records)
}

/// Attach display names and order rows by ascending percentage.
pub fn to_display(
    records: &[AlignmentRecord],
    normalizer: &NameNormalizer,
) -> Vec<DisplayAlignmentRecord> {
    let mut out: Vec<DisplayAlignmentRecord> = records
        .iter()
        .map(|r| DisplayAlignmentRecord {
            label: r.label.clone(),
            display_name: normalizer.display_name(&r.label),
            percentage: r.percentage,
            integral: r.integral,
        })
        .collect();
    out.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
    debug!("Sorted {} alignment summaries", out.len());
    out
}

/// Percentage of the first (lowest) row shown under the query display name.
pub fn query_percentage(
    records: &[DisplayAlignmentRecord],
    normalizer: &NameNormalizer,
) -> Option<f64> {
    let name = normalizer.query().display_name();
    records
        .iter()
        .find(|r| r.display_name == name)
        .map(|r| r.percentage)
}
