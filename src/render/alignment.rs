use super::axes::{Axes, Rect, Scale, Spines};
use super::svg::{SvgCanvas, TextStyle};
use super::Style;
use crate::summary::DisplayAlignmentRecord;

const BAR_HEIGHT: f64 = 0.5;
const X_LABEL_OFFSET: f64 = 40.0;
const BREADTH_TICKS: [u32; 5] = [0, 25, 50, 75, 100];

/// Horizontal breadth-of-coverage bars, one per record, bottom to top in
/// the given order. Without records only the frame and title are drawn.
/// Returns whether bars were plotted.
pub fn draw_alignment(
    canvas: &mut SvgCanvas,
    rect: Rect,
    records: Option<&[DisplayAlignmentRecord]>,
    style: &Style,
) -> bool {
    let font = style.font();
    let records = records.filter(|r| !r.is_empty());
    let n = records.map_or(1, |r| r.len());
    let axes = Axes::new(
        rect,
        Scale::linear(0.0, 100.0),
        Scale::linear(-0.5, n as f64 - 0.5),
    );

    let drawn = if let Some(records) = records {
        axes.clip(canvas);
        for (i, r) in records.iter().enumerate() {
            let (x0, y_top) = axes.px((0.0, i as f64 + BAR_HEIGHT / 2.0));
            let (x1, y_bottom) = axes.px((r.percentage, i as f64 - BAR_HEIGHT / 2.0));
            canvas.rect(x0, y_top, x1 - x0, y_bottom - y_top, style.color);
        }
        canvas.end_group();

        let bar_font = TextStyle::new(style.bar_font_size);
        let labels: Vec<(f64, String)> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.bar_label()))
            .collect();
        axes.y_ticks_inside(canvas, &labels, &bar_font);
        let ticks: Vec<(f64, String)> = BREADTH_TICKS
            .iter()
            .map(|&t| (t as f64, t.to_string()))
            .collect();
        axes.x_ticks(canvas, &ticks, &font.bold());
        true
    } else {
        false
    };

    axes.draw_spines(canvas, Spines::all(style.spine_width), None);
    axes.x_label(canvas, &style.breadth_label, X_LABEL_OFFSET, &font.bold());
    drawn
}
