use log::{debug, info};

use super::alignment::draw_alignment;
use super::axes::Rect;
use super::coverage::draw_coverage;
use super::diagnostic::draw_diagnostic;
use super::dotplot::draw_dotplot;
use super::svg::SvgCanvas;
use super::Style;
use crate::coverage::DenseCoverage;
use crate::diagnostic::DiagnosticCall;
use crate::geometry::{DotPlotGeometry, Projection};
use crate::summary::DisplayAlignmentRecord;

/// Page size in points (20.75 x 12 inches).
pub const FIGURE_WIDTH: f64 = 20.75 * 72.0;
pub const FIGURE_HEIGHT: f64 = 12.0 * 72.0;

const HEIGHT_RATIOS: [f64; 2] = [1.0, 11.0];
const WIDTH_RATIOS: [f64; 2] = [11.0, 9.75];
const HSPACE: f64 = 0.11;
const WSPACE: f64 = 0.05;

const MARGIN_LEFT: f64 = 130.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 90.0;

/// Split `extent` into cells proportional to `ratios`, separated by `space`
/// times the mean cell size. Returns `(start, size)` pairs.
fn grid_cells(start: f64, extent: f64, ratios: &[f64], space: f64) -> Vec<(f64, f64)> {
    let n = ratios.len() as f64;
    let total: f64 = ratios.iter().sum();
    let cell = extent / (n + space * (n - 1.0));
    let sep = space * cell;
    let norm = cell * n / total;
    let mut pos = start;
    ratios
        .iter()
        .map(|r| {
            let size = r * norm;
            let c = (pos, size);
            pos += size + sep;
            c
        })
        .collect()
}

/// Placement of the four panels on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    pub width: f64,
    pub height: f64,
    pub coverage: Rect,
    pub diagnostic: Rect,
    pub dotplot: Rect,
    pub alignment: Rect,
}

impl FigureLayout {
    pub fn new(width: f64, height: f64) -> Self {
        let cols = grid_cells(
            MARGIN_LEFT,
            width - MARGIN_LEFT - MARGIN_RIGHT,
            &WIDTH_RATIOS,
            WSPACE,
        );
        let rows = grid_cells(
            MARGIN_TOP,
            height - MARGIN_TOP - MARGIN_BOTTOM,
            &HEIGHT_RATIOS,
            HSPACE,
        );
        let cell = |row: usize, col: usize| Rect {
            x: cols[col].0,
            y: rows[row].0,
            width: cols[col].1,
            height: rows[row].1,
        };
        FigureLayout {
            width,
            height,
            coverage: cell(0, 0),
            diagnostic: cell(0, 1),
            dotplot: cell(1, 0),
            alignment: cell(1, 1),
        }
    }
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self::new(FIGURE_WIDTH, FIGURE_HEIGHT)
    }
}

/// Everything the panels need, already transformed.
#[derive(Debug, Clone, Default)]
pub struct FigureData {
    pub coverage: Option<DenseCoverage>,
    pub dotplot: Option<DotPlotGeometry>,
    pub alignment: Option<Vec<DisplayAlignmentRecord>>,
    pub call: Option<DiagnosticCall>,
    pub query_name: String,
    pub log_scale: bool,
    pub projection: Projection,
}

/// Which panels were drawn with data rather than as placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelStatus {
    pub coverage: bool,
    pub dotplot: bool,
    pub alignment: bool,
    pub diagnostic: bool,
}

/// Lay out and draw all four panels, returning the SVG document.
pub fn render_figure(data: &FigureData, style: &Style) -> (String, PanelStatus) {
    let layout = FigureLayout::default();
    debug!("Figure layout: {:?}", layout);
    let mut canvas = SvgCanvas::new(layout.width, layout.height);

    let status = PanelStatus {
        coverage: draw_coverage(
            &mut canvas,
            layout.coverage,
            data.coverage.as_ref(),
            data.log_scale,
            style,
        ),
        dotplot: draw_dotplot(
            &mut canvas,
            layout.dotplot,
            data.dotplot.as_ref(),
            data.projection,
            style,
        ),
        alignment: draw_alignment(
            &mut canvas,
            layout.alignment,
            data.alignment.as_deref(),
            style,
        ),
        diagnostic: data.call.is_some(),
    };
    draw_diagnostic(
        &mut canvas,
        layout.diagnostic,
        data.call,
        &data.query_name,
        style,
    );

    info!(
        "Rendered panels: coverage = {}, dot plot = {}, alignment = {}, diagnostic = {}",
        status.coverage, status.dotplot, status.alignment, status.diagnostic
    );
    (canvas.finish(), status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_honours_ratios_and_spacing() {
        let cells = grid_cells(0.0, 205.0, &[1.0, 1.0], 0.05);
        assert!((cells[0].1 - 100.0).abs() < 1e-9);
        assert!((cells[1].0 - 105.0).abs() < 1e-9);
        assert!((cells[1].0 + cells[1].1 - 205.0).abs() < 1e-9);
    }

    #[test]
    fn layout_fits_page() {
        let l = FigureLayout::default();
        assert!(l.coverage.height < l.dotplot.height / 10.0);
        assert!(l.coverage.width > l.alignment.width);
        assert_eq!(l.coverage.x, l.dotplot.x);
        assert_eq!(l.diagnostic.x, l.alignment.x);
        assert!(l.alignment.right() <= l.width);
        assert!(l.dotplot.bottom() <= l.height);
        assert!(l.coverage.bottom() < l.dotplot.y);
    }

    #[test]
    fn all_placeholders() {
        let (svg, status) = render_figure(&FigureData::default(), &Style::default());
        assert_eq!(status, PanelStatus::default());
        assert!(svg.contains("Coverage"));
        assert!(!svg.contains("Test Result"));
    }
}
