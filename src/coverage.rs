use std::path::Path;

use log::{debug, info};

use crate::input::{numbered_lines, open_input, InputError};

/// Depth at one reference position (1-based).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageRecord {
    pub position: u64,
    pub depth: f64,
}

impl CoverageRecord {
    pub fn new(position: u64, depth: f64) -> Self {
        CoverageRecord { position, depth }
    }
}

/// Coverage for every position from 1 to the largest observed position.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseCoverage {
    points: Vec<CoverageRecord>,
}

impl DenseCoverage {
    pub fn points(&self) -> &[CoverageRecord] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_position(&self) -> u64 {
        self.points.iter().map(|p| p.position).max().unwrap_or(0)
    }

    pub fn max_depth(&self) -> f64 {
        self.points.iter().map(|p| p.depth).fold(0.0, f64::max)
    }
}

/// Read a `samtools depth` style table: `name<TAB>position<TAB>depth`.
///
/// An empty file yields an empty list; turning that into "no data" is the
/// job of [`densify`].
pub fn read_depth_file(path: &Path) -> Result<Vec<CoverageRecord>, InputError> {
    let reader = open_input(path)?;
    let mut records = Vec::new();

    for line in numbered_lines(reader, path) {
        let (n, line) = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(InputError::malformed(
                path,
                n,
                format!("expected 3 tab separated columns, found {}", fields.len()),
            ));
        }
        let position = fields[1]
            .trim()
            .parse::<u64>()
            .map_err(|e| InputError::malformed(path, n, format!("bad position {:?}: {}", fields[1], e)))?;
        if position == 0 {
            return Err(InputError::malformed(path, n, "positions are 1-based"));
        }
        let depth = fields[2]
            .trim()
            .parse::<f64>()
            .map_err(|e| InputError::malformed(path, n, format!("bad depth {:?}: {}", fields[2], e)))?;
        if !depth.is_finite() || depth < 0.0 {
            return Err(InputError::malformed(
                path,
                n,
                format!("depth must be a finite non-negative number, got {:?}", fields[2]),
            ));
        }
        records.push(CoverageRecord::new(position, depth));
    }

    info!("Read {} coverage records from {}", records.len(), path.display());
    Ok(records)
}

/// Expand sparse coverage into one entry per position in `1..=max(position)`.
///
/// Returns `None` for empty input. Input whose length already equals the
/// largest position is assumed dense and returned as is, without checking
/// that the positions are actually contiguous.
pub fn densify(records: &[CoverageRecord]) -> Option<DenseCoverage> {
    let max_position = records.iter().map(|r| r.position).max()?;

    if records.len() as u64 == max_position {
        debug!("Coverage already dense ({} positions)", max_position);
        return Some(DenseCoverage {
            points: records.to_vec(),
        });
    }

    let mut points: Vec<CoverageRecord> = (1..=max_position)
        .map(|position| CoverageRecord::new(position, 0.0))
        .collect();
    for r in records {
        if let Some(slot) = r
            .position
            .checked_sub(1)
            .and_then(|i| points.get_mut(i as usize))
        {
            slot.depth = r.depth;
        }
    }

    debug!(
        "Filled {} missing positions with zero depth",
        max_position - records.len() as u64
    );
    Some(DenseCoverage { points })
}

/// Top tick of the coverage track: the axis limit (max depth plus a 5%
/// margin) rounded up to a multiple of 100.
pub fn coverage_tick_max(max_depth: f64) -> u64 {
    let upper = if max_depth > 0.0 {
        max_depth * 1.05
    } else {
        0.055
    };
    ((upper / 100.0).ceil() as u64).saturating_mul(100).max(100)
}

/// Tick values for the log-scaled coverage track. The first and last are
/// labelled, the rest are drawn as unlabelled minor ticks.
pub fn log_ticks(tick_max: u64) -> Vec<f64> {
    let top = tick_max as f64;
    let mut ticks = vec![1.0];
    ticks.extend((0..5).map(|i| 1.0 + (top - 1.0) * i as f64 / 4.0));
    ticks.push(top);
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn recs(v: &[(u64, f64)]) -> Vec<CoverageRecord> {
        v.iter().map(|&(p, d)| CoverageRecord::new(p, d)).collect()
    }

    #[test]
    fn empty_input_has_no_data() {
        assert_eq!(densify(&[]), None);
    }

    #[test]
    fn gaps_are_zero_filled() {
        let dense = densify(&recs(&[(1, 5.0), (3, 7.0)])).unwrap();
        assert_eq!(dense.points(), recs(&[(1, 5.0), (2, 0.0), (3, 7.0)]).as_slice());
    }

    #[test]
    fn unsorted_input_lands_in_matching_slots() {
        let dense = densify(&recs(&[(4, 2.0), (2, 9.0)])).unwrap();
        let depths: Vec<f64> = dense.points().iter().map(|p| p.depth).collect();
        assert_eq!(depths, vec![0.0, 9.0, 0.0, 2.0]);
    }

    #[test]
    fn dense_input_is_returned_unchanged() {
        let input = recs(&[(1, 3.0), (2, 4.0), (3, 0.0), (4, 8.0)]);
        let dense = densify(&input).unwrap();
        assert_eq!(dense.points(), input.as_slice());
        assert_eq!(dense.max_position(), 4);
        assert_eq!(dense.max_depth(), 8.0);
    }

    #[test]
    fn full_length_input_is_not_reordered() {
        // Same length as max position, so it passes through untouched.
        let input = recs(&[(2, 1.0), (1, 2.0)]);
        assert_eq!(densify(&input).unwrap().points(), input.as_slice());
    }

    #[test]
    fn tick_max_rounds_past_margin() {
        assert_eq!(coverage_tick_max(250.0), 300);
        assert_eq!(coverage_tick_max(300.0), 400);
        assert_eq!(coverage_tick_max(12.0), 100);
        assert_eq!(coverage_tick_max(0.0), 100);
    }

    #[test]
    fn tick_max_saturates_for_huge_depths() {
        assert_eq!(coverage_tick_max(1e20), u64::MAX);
        assert_eq!(coverage_tick_max(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn log_ticks_span_one_to_max() {
        let t = log_ticks(401);
        assert_eq!(t, vec![1.0, 1.0, 101.0, 201.0, 301.0, 401.0, 401.0]);
    }

    #[test]
    fn reads_depth_table() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "MN908947.3\t1\t4\nMN908947.3\t3\t10").unwrap();
        let records = read_depth_file(f.path()).unwrap();
        assert_eq!(records, recs(&[(1, 4.0), (3, 10.0)]));
    }

    #[test]
    fn short_rows_are_malformed() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "MN908947.3\t1").unwrap();
        let err = read_depth_file(f.path()).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn non_finite_or_negative_depth_is_malformed() {
        for depth in ["inf", "NaN", "-3", "-0.5"] {
            let mut f = tempfile::NamedTempFile::new().unwrap();
            writeln!(f, "MN908947.3\t1\t4\nMN908947.3\t2\t{}", depth).unwrap();
            let err = read_depth_file(f.path()).unwrap_err();
            assert_eq!(err.kind(), "malformed", "depth {}", depth);
            assert!(err.to_string().contains(":2:"), "{}", err);
        }
    }

    #[test]
    fn empty_file_reads_as_no_records() {
        let f = tempfile::NamedTempFile::new().unwrap();
        assert!(read_depth_file(f.path()).unwrap().is_empty());
    }
}
