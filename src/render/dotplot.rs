use super::axes::{Axes, Rect, Scale, Spines};
use super::svg::SvgCanvas;
use super::Style;
use crate::geometry::{DotPlotGeometry, Projection};

const X_LABEL_OFFSET: f64 = 40.0;
const Y_LABEL_OFFSET: f64 = 80.0;

fn labelled(ticks: &[u64]) -> Vec<(f64, String)> {
    ticks.iter().map(|&t| (t as f64, t.to_string())).collect()
}

/// Draw the dot plot, or an empty frame when there are no segments.
/// Returns whether any segment was plotted.
pub fn draw_dotplot(
    canvas: &mut SvgCanvas,
    rect: Rect,
    geometry: Option<&DotPlotGeometry>,
    projection: Projection,
    style: &Style,
) -> bool {
    let font = style.font();
    let frame = |canvas: &mut SvgCanvas, axes: &Axes| {
        axes.draw_spines(canvas, Spines::all(style.spine_width), None);
        axes.x_label(canvas, &style.x_label, X_LABEL_OFFSET, &font.bold());
        axes.y_label(canvas, &style.y_label, Y_LABEL_OFFSET, &font.bold());
    };

    let Some(geometry) = geometry else {
        let axes = Axes::new(rect, Scale::linear(0.0, 1.0), Scale::linear(0.0, 1.0));
        frame(&mut *canvas, &axes);
        return false;
    };

    let axes = Axes::new(
        rect,
        Scale::linear(0.0, geometry.x_length as f64),
        Scale::linear(0.0, geometry.y_length as f64),
    );
    axes.clip(canvas);
    for (from, to) in geometry.lines(projection) {
        canvas.line(axes.px(from), axes.px(to), style.color, style.line_width, true);
    }
    canvas.end_group();

    frame(&mut *canvas, &axes);
    axes.x_ticks(canvas, &labelled(&geometry.x_ticks), &font.bold());
    axes.y_ticks(canvas, &labelled(&geometry.y_ticks), &font.bold());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paf::DotPlotSegment;

    fn rect() -> Rect {
        Rect {
            x: 100.0,
            y: 100.0,
            width: 600.0,
            height: 600.0,
        }
    }

    #[test]
    fn empty_frame_without_segments() {
        let mut c = SvgCanvas::new(800.0, 800.0);
        assert!(!draw_dotplot(&mut c, rect(), None, Projection::Reference, &Style::default()));
        let svg = c.finish();
        assert!(svg.contains("SARS-CoV-2 RefSeq Assembly"));
        assert!(!svg.contains("clip-path"));
    }

    #[test]
    fn one_line_per_segment() {
        let segs = [
            DotPlotSegment {
                query_length: 29800,
                query_start: 0,
                query_end: 15000,
                ref_length: 29903,
                ref_start: 0,
                ref_end: 15000,
            },
            DotPlotSegment {
                query_length: 29800,
                query_start: 15000,
                query_end: 29800,
                ref_length: 29903,
                ref_start: 15100,
                ref_end: 29903,
            },
        ];
        let g = DotPlotGeometry::build(&segs, false).unwrap();
        let mut c = SvgCanvas::new(800.0, 800.0);
        assert!(draw_dotplot(&mut c, rect(), Some(&g), Projection::Reference, &Style::default()));
        let svg = c.finish();
        assert_eq!(svg.matches(r##"stroke="#5DADE2""##).count(), 2);
        assert!(svg.contains(">20000</text>"));
    }
}
