use super::svg::{Anchor, Baseline, Rgb, SvgCanvas, TextStyle};

const MAJOR_TICK: f64 = 3.5;
const TICK_WIDTH: f64 = 0.8;
const TICK_PAD: f64 = 3.5;

/// A rectangle in canvas units, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Maps data values onto the unit interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    pub log: bool,
}

impl Scale {
    pub fn linear(min: f64, max: f64) -> Self {
        Scale { min, max, log: false }
    }

    /// Log10 scale; `min` must be positive. Values below `min` are clamped.
    pub fn log10(min: f64, max: f64) -> Self {
        Scale { min, max, log: true }
    }

    pub fn fraction(&self, v: f64) -> f64 {
        let (lo, hi, v) = if self.log {
            (self.min.log10(), self.max.log10(), v.max(self.min).log10())
        } else {
            (self.min, self.max, v)
        };
        if hi - lo == 0.0 {
            0.0
        } else {
            (v - lo) / (hi - lo)
        }
    }
}

/// Which frame lines of an axes are drawn, and how thick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spines {
    pub left: Option<f64>,
    pub bottom: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
}

impl Spines {
    pub fn all(width: f64) -> Self {
        Spines {
            left: Some(width),
            bottom: Some(width),
            right: Some(width),
            top: Some(width),
        }
    }

    pub fn left_bottom(width: f64) -> Self {
        Spines {
            left: Some(width),
            bottom: Some(width),
            right: None,
            top: None,
        }
    }
}

/// One plotting area with its data scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub rect: Rect,
    pub x: Scale,
    pub y: Scale,
}

impl Axes {
    pub fn new(rect: Rect, x: Scale, y: Scale) -> Self {
        Axes { rect, x, y }
    }

    pub fn px_x(&self, v: f64) -> f64 {
        self.rect.x + self.x.fraction(v) * self.rect.width
    }

    pub fn px_y(&self, v: f64) -> f64 {
        self.rect.bottom() - self.y.fraction(v) * self.rect.height
    }

    pub fn px(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (self.px_x(x), self.px_y(y))
    }

    pub fn clip(&self, canvas: &mut SvgCanvas) {
        let r = self.rect;
        canvas.begin_clip(r.x, r.y, r.width, r.height);
    }

    /// Draw frame lines. `bottom_at` moves the bottom spine to a data y value.
    pub fn draw_spines(&self, canvas: &mut SvgCanvas, spines: Spines, bottom_at: Option<f64>) {
        let r = self.rect;
        let bottom_y = bottom_at.map(|v| self.px_y(v)).unwrap_or(r.bottom());
        if let Some(w) = spines.left {
            canvas.line((r.x, r.y), (r.x, r.bottom()), Rgb::BLACK, w, true);
        }
        if let Some(w) = spines.right {
            canvas.line((r.right(), r.y), (r.right(), r.bottom()), Rgb::BLACK, w, true);
        }
        if let Some(w) = spines.top {
            canvas.line((r.x, r.y), (r.right(), r.y), Rgb::BLACK, w, true);
        }
        if let Some(w) = spines.bottom {
            canvas.line((r.x, bottom_y), (r.right(), bottom_y), Rgb::BLACK, w, true);
        }
    }

    /// Ticks below the bottom edge with labels centred under them.
    pub fn x_ticks(&self, canvas: &mut SvgCanvas, ticks: &[(f64, String)], font: &TextStyle) {
        let y0 = self.rect.bottom();
        let label = font.anchor(Anchor::Middle).baseline(Baseline::Hanging);
        for (v, text) in ticks {
            let x = self.px_x(*v);
            canvas.line((x, y0), (x, y0 + MAJOR_TICK), Rgb::BLACK, TICK_WIDTH, false);
            canvas.text(x, y0 + MAJOR_TICK + TICK_PAD, text, &label);
        }
    }

    /// Ticks left of the left edge with right-aligned labels.
    pub fn y_ticks(&self, canvas: &mut SvgCanvas, ticks: &[(f64, String)], font: &TextStyle) {
        let x0 = self.rect.x;
        let label = font.anchor(Anchor::End).baseline(Baseline::Middle);
        for (v, text) in ticks {
            let y = self.px_y(*v);
            canvas.line((x0, y), (x0 - MAJOR_TICK, y), Rgb::BLACK, TICK_WIDTH, false);
            canvas.text(x0 - MAJOR_TICK - TICK_PAD, y, text, &label);
        }
    }

    /// Unlabelled ticks on the left edge.
    pub fn y_minor_ticks(&self, canvas: &mut SvgCanvas, values: &[f64], length: f64) {
        let x0 = self.rect.x;
        for v in values {
            let y = self.px_y(*v);
            canvas.line((x0, y), (x0 - length, y), Rgb::BLACK, TICK_WIDTH * 0.75, false);
        }
    }

    /// Ticks pointing into the axes from the left edge, labels drawn inside
    /// and left-aligned.
    pub fn y_ticks_inside(&self, canvas: &mut SvgCanvas, ticks: &[(f64, String)], font: &TextStyle) {
        let x0 = self.rect.x;
        let label = font.anchor(Anchor::Start).baseline(Baseline::Middle);
        for (v, text) in ticks {
            let y = self.px_y(*v);
            canvas.line((x0, y), (x0 + MAJOR_TICK, y), Rgb::BLACK, TICK_WIDTH, false);
            canvas.text(x0 + MAJOR_TICK + TICK_PAD, y, text, &label);
        }
    }

    pub fn x_label(&self, canvas: &mut SvgCanvas, text: &str, offset: f64, font: &TextStyle) {
        let style = font.anchor(Anchor::Middle).baseline(Baseline::Hanging);
        canvas.text(self.rect.x + self.rect.width / 2.0, self.rect.bottom() + offset, text, &style);
    }

    pub fn y_label(&self, canvas: &mut SvgCanvas, text: &str, offset: f64, font: &TextStyle) {
        let style = font
            .anchor(Anchor::Middle)
            .baseline(Baseline::Alphabetic)
            .rotate(-90.0);
        canvas.text(self.rect.x - offset, self.rect.y + self.rect.height / 2.0, text, &style);
    }
}
