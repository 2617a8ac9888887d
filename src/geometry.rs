use log::debug;

use crate::paf::DotPlotSegment;

/// A segment together with its running query-length offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLayout {
    pub segment: DotPlotSegment,
    /// Sum of query lengths up to and including this segment.
    pub cum_offset: u64,
    /// Sum of query lengths of all earlier segments.
    pub upto_offset: u64,
}

/// How a segment is turned into plotted coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Reference start/end on both axes. This ignores the query side and
    /// the offsets, and is the historical output of the tool.
    #[default]
    Reference,
    /// Reference span on x, query span shifted by the up-to offset on y.
    Query,
}

/// Running offsets in row order. Rows are never sorted.
pub fn cumulative_offsets(segments: &[DotPlotSegment]) -> Vec<SegmentLayout> {
    let mut total = 0u64;
    segments
        .iter()
        .map(|&segment| {
            let upto_offset = total;
            total += segment.query_length;
            SegmentLayout {
                segment,
                cum_offset: total,
                upto_offset,
            }
        })
        .collect()
}

/// Tick positions for an axis of `length`: about three intervals, the step
/// rounded to one significant digit (ties to even), truncated to integers.
pub fn space_ticks(length: u64) -> Vec<u64> {
    let stop = length as f64 + 1.0;
    let space = stop / 3.0;
    let magnitude = 10f64.powi(space.log10().floor() as i32);
    let step = (space / magnitude).round_ties_even() * magnitude;
    if !(step > 0.0) {
        return vec![0];
    }
    let count = (stop / step).ceil() as usize;
    (0..count).map(|i| (i as f64 * step) as u64).collect()
}

/// Axis extents, ticks and segment offsets for the dot plot.
#[derive(Debug, Clone, PartialEq)]
pub struct DotPlotGeometry {
    pub layouts: Vec<SegmentLayout>,
    pub x_length: u64,
    pub y_length: u64,
    pub x_ticks: Vec<u64>,
    pub y_ticks: Vec<u64>,
}

impl DotPlotGeometry {
    /// `None` when there is nothing to plot. The x extent is the reference
    /// length of the first row; the y extent matches it unless `crop_y`,
    /// in which case it is the summed query length.
    pub fn build(segments: &[DotPlotSegment], crop_y: bool) -> Option<Self> {
        let first = segments.first()?;
        let layouts = cumulative_offsets(segments);
        let x_length = first.ref_length;
        let y_length = if crop_y {
            layouts.last().map(|l| l.cum_offset).unwrap_or(0)
        } else {
            x_length
        };
        debug!(
            "Dot plot extents: x = {}, y = {} (crop_y = {})",
            x_length, y_length, crop_y
        );
        Some(DotPlotGeometry {
            layouts,
            x_length,
            y_length,
            x_ticks: space_ticks(x_length),
            y_ticks: space_ticks(y_length),
        })
    }

    /// One `((x1, y1), (x2, y2))` line per segment, in row order.
    pub fn lines(&self, projection: Projection) -> Vec<((f64, f64), (f64, f64))> {
        self.layouts
            .iter()
            .map(|l| {
                let s = &l.segment;
                let (x1, x2) = (s.ref_start as f64, s.ref_end as f64);
                match projection {
                    Projection::Reference => ((x1, x1), (x2, x2)),
                    Projection::Query => {
                        let off = l.upto_offset as f64;
                        (
                            (x1, s.query_start as f64 + off),
                            (x2, s.query_end as f64 + off),
                        )
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(query_length: u64, q: (u64, u64), ref_length: u64, r: (u64, u64)) -> DotPlotSegment {
        DotPlotSegment {
            query_length,
            query_start: q.0,
            query_end: q.1,
            ref_length,
            ref_start: r.0,
            ref_end: r.1,
        }
    }

    #[test]
    fn ticks_for_genome_length() {
        assert_eq!(space_ticks(29903), vec![0, 10000, 20000]);
    }

    #[test]
    fn ticks_for_short_axis() {
        assert_eq!(space_ticks(30), vec![0, 10, 20, 30]);
    }

    #[test]
    fn ticks_round_half_to_even() {
        // (74 + 1) / 3 = 25 -> 2.5 rounds to 2, step 20
        assert_eq!(space_ticks(74), vec![0, 20, 40, 60]);
    }

    #[test]
    fn ticks_for_zero_length() {
        let ticks = space_ticks(0);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| t == 0));
    }

    #[test]
    fn offsets_follow_row_order() {
        let segs = [
            seg(100, (0, 100), 1000, (0, 100)),
            seg(50, (0, 50), 1000, (900, 950)),
            seg(25, (0, 25), 1000, (400, 425)),
        ];
        let l = cumulative_offsets(&segs);
        let offs: Vec<(u64, u64)> = l.iter().map(|x| (x.upto_offset, x.cum_offset)).collect();
        assert_eq!(offs, vec![(0, 100), (100, 150), (150, 175)]);
    }

    #[test]
    fn extents_default_and_cropped() {
        let segs = [
            seg(300, (0, 300), 1000, (0, 300)),
            seg(200, (0, 200), 5000, (500, 700)),
        ];
        let g = DotPlotGeometry::build(&segs, false).unwrap();
        assert_eq!((g.x_length, g.y_length), (1000, 1000));
        let g = DotPlotGeometry::build(&segs, true).unwrap();
        assert_eq!((g.x_length, g.y_length), (1000, 500));
        assert_eq!(g.y_ticks, space_ticks(500));
    }

    #[test]
    fn no_segments_no_geometry() {
        assert!(DotPlotGeometry::build(&[], false).is_none());
    }

    #[test]
    fn projections() {
        let segs = [
            seg(100, (10, 90), 1000, (200, 280)),
            seg(50, (5, 45), 1000, (600, 640)),
        ];
        let g = DotPlotGeometry::build(&segs, false).unwrap();
        assert_eq!(
            g.lines(Projection::Reference),
            vec![((200.0, 200.0), (280.0, 280.0)), ((600.0, 600.0), (640.0, 640.0))]
        );
        assert_eq!(
            g.lines(Projection::Query),
            vec![((200.0, 10.0), (280.0, 90.0)), ((600.0, 105.0), (640.0, 145.0))]
        );
    }
}
