use log::debug;

use super::axes::{Axes, Rect, Scale, Spines};
use super::svg::SvgCanvas;
use super::Style;
use crate::coverage::{coverage_tick_max, log_ticks, DenseCoverage};

const MINOR_TICK: f64 = 4.0;
const LABEL_OFFSET: f64 = 60.0;

/// Draw the coverage track. Without data only the frame and title are drawn.
/// Returns whether data was plotted.
pub fn draw_coverage(
    canvas: &mut SvgCanvas,
    rect: Rect,
    coverage: Option<&DenseCoverage>,
    log_scale: bool,
    style: &Style,
) -> bool {
    let font = style.font();
    let placeholder = Axes::new(rect, Scale::linear(0.0, 1.0), Scale::linear(0.0, 1.0));
    placeholder.y_label(canvas, &style.coverage_label, LABEL_OFFSET, &font.bold());

    let Some(coverage) = coverage.filter(|c| !c.is_empty()) else {
        placeholder.draw_spines(canvas, Spines::left_bottom(style.spine_width), None);
        return false;
    };

    let tick_max = coverage_tick_max(coverage.max_depth());
    let top = tick_max as f64;
    let x = Scale::linear(0.0, coverage.max_position() as f64);
    let (y, baseline) = if log_scale {
        (Scale::log10(1.0, top), 1.0)
    } else {
        (Scale::linear(0.0, top), 0.0)
    };
    let axes = Axes::new(rect, x, y);
    debug!(
        "Coverage track: {} positions, tick max {}, log = {}",
        coverage.len(),
        tick_max,
        log_scale
    );

    let points = coverage.points();
    let mut outline = Vec::with_capacity(points.len() + 2);
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        outline.push(axes.px((first.position as f64, baseline)));
        outline.extend(points.iter().map(|p| axes.px((p.position as f64, p.depth))));
        outline.push(axes.px((last.position as f64, baseline)));
    }
    axes.clip(canvas);
    canvas.polygon(&outline, style.color);
    canvas.end_group();

    let major = [(baseline, format!("{}", baseline as u64)), (top, tick_max.to_string())];
    if log_scale {
        axes.y_minor_ticks(canvas, &log_ticks(tick_max), MINOR_TICK);
        axes.draw_spines(canvas, Spines::left_bottom(style.spine_width), None);
    } else {
        axes.draw_spines(canvas, Spines::left_bottom(style.spine_width), Some(0.0));
    }
    axes.y_ticks(canvas, &major, &font.bold());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{densify, CoverageRecord};

    fn rect() -> Rect {
        Rect {
            x: 100.0,
            y: 10.0,
            width: 600.0,
            height: 60.0,
        }
    }

    #[test]
    fn placeholder_without_data() {
        let mut c = SvgCanvas::new(800.0, 100.0);
        assert!(!draw_coverage(&mut c, rect(), None, false, &Style::default()));
        let svg = c.finish();
        assert!(svg.contains(">Coverage</text>"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn draws_area_and_ticks() {
        let cov = densify(&[CoverageRecord::new(1, 50.0), CoverageRecord::new(4, 250.0)]).unwrap();
        let mut c = SvgCanvas::new(800.0, 100.0);
        assert!(draw_coverage(&mut c, rect(), Some(&cov), false, &Style::default()));
        let svg = c.finish();
        assert!(svg.contains("<path"));
        assert!(svg.contains(">300</text>"));
        assert!(svg.contains(">0</text>"));
    }

    #[test]
    fn log_scale_labels_start_at_one() {
        let cov = densify(&[CoverageRecord::new(1, 50.0), CoverageRecord::new(2, 950.0)]).unwrap();
        let mut c = SvgCanvas::new(800.0, 100.0);
        assert!(draw_coverage(&mut c, rect(), Some(&cov), true, &Style::default()));
        let svg = c.finish();
        assert!(svg.contains(">1</text>"));
        assert!(svg.contains(">1000</text>"));
    }
}
