//! Figure rendering. Every panel draws onto one [`SvgCanvas`]; the
//! document is converted to the requested output format afterwards.

pub mod alignment;
pub mod axes;
pub mod coverage;
pub mod diagnostic;
pub mod dotplot;
pub mod figure;
pub mod svg;

pub use figure::{render_figure, FigureData, FigureLayout, PanelStatus};
pub use svg::{Rgb, SvgCanvas};

pub const DEFAULT_COLOR: Rgb = Rgb(0x5D, 0xAD, 0xE2);

/// Fonts, colors and axis titles shared by all panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: Rgb,
    pub font_size: f64,
    pub bar_font_size: f64,
    pub spine_width: f64,
    pub line_width: f64,
    pub coverage_label: String,
    pub x_label: String,
    pub y_label: String,
    pub breadth_label: String,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            color: DEFAULT_COLOR,
            font_size: 18.0,
            bar_font_size: 16.0,
            spine_width: 2.0,
            line_width: 3.0,
            coverage_label: "Coverage".to_string(),
            x_label: "SARS-CoV-2 RefSeq Assembly".to_string(),
            y_label: "de novo SARS-CoV-2 Assembly".to_string(),
            breadth_label: "SARS-CoV-2 Breadth of Coverage (%)".to_string(),
        }
    }
}

impl Style {
    pub fn font(&self) -> svg::TextStyle {
        svg::TextStyle::new(self.font_size)
    }
}
