use std::fmt::Write;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse `#RRGGBB` (the `#` is optional).
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Rgb(r, g, b))
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
    Hanging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub anchor: Anchor,
    pub baseline: Baseline,
    /// Rotation in degrees around the text origin.
    pub rotate: f64,
    pub color: Rgb,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        TextStyle {
            size,
            bold: false,
            anchor: Anchor::Start,
            baseline: Baseline::Alphabetic,
            rotate: 0.0,
            color: Rgb::BLACK,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// An SVG document in user units of one point.
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
    clip_count: usize,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        let mut body = String::new();
        let _ = writeln!(
            body,
            r#"<rect x="0" y="0" width="{:.2}" height="{:.2}" fill="white"/>"#,
            width, height
        );
        SvgCanvas {
            width,
            height,
            body,
            clip_count: 0,
        }
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64, square_caps: bool) {
        let cap = if square_caps { "square" } else { "butt" };
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-linecap="{}"/>"#,
            from.0, from.1, to.0, to.1, color.hex(), width, cap
        );
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Rgb) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x,
            y,
            width.max(0.0),
            height.max(0.0),
            fill.hex()
        );
    }

    /// A closed, filled polygon.
    pub fn polygon(&mut self, points: &[(f64, f64)], fill: Rgb) {
        let Some(((x0, y0), rest)) = points.split_first() else {
            return;
        };
        let mut d = format!("M{:.2},{:.2}", x0, y0);
        for (x, y) in rest {
            let _ = write!(d, " L{:.2},{:.2}", x, y);
        }
        d.push_str(" Z");
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="0.001"/>"#,
            d,
            fill.hex(),
            fill.hex()
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let baseline = match style.baseline {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Middle => "central",
            Baseline::Hanging => "hanging",
        };
        let weight = if style.bold { "bold" } else { "normal" };
        let transform = if style.rotate != 0.0 {
            format!(r#" transform="rotate({} {:.2} {:.2})""#, style.rotate, x, y)
        } else {
            String::new()
        };
        let _ = writeln!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" font-weight="{}" text-anchor="{}" dominant-baseline="{}" fill="{}"{}>{}</text>"#,
            x,
            y,
            style.size,
            weight,
            anchor,
            baseline,
            style.color.hex(),
            transform,
            escape_xml(content)
        );
    }

    /// Start a group clipped to the given rectangle. Close it with [`end_group`].
    ///
    /// [`end_group`]: SvgCanvas::end_group
    pub fn begin_clip(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.clip_count += 1;
        let id = format!("clip{}", self.clip_count);
        let _ = writeln!(
            self.body,
            r#"<clipPath id="{}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
            id, x, y, width, height
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#{})">"#, id);
    }

    pub fn end_group(&mut self) {
        self.body.push_str("</g>\n");
    }

    pub fn finish(self) -> String {
        let mut svg = String::with_capacity(self.body.len() + 512);
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}" font-family="DejaVu Sans, Arial, Helvetica, sans-serif">"#,
            w = self.width,
            h = self.height
        );
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(Rgb::from_hex("#5DADE2"), Some(Rgb(0x5D, 0xAD, 0xE2)));
        assert_eq!(Rgb::from_hex("5dade2"), Some(Rgb(0x5D, 0xAD, 0xE2)));
        assert_eq!(Rgb::from_hex("#5DADE"), None);
        assert_eq!(Rgb::from_hex("#GGGGGG"), None);
        assert_eq!(Rgb(93, 173, 226).hex(), "#5DADE2");
    }

    #[test]
    fn text_is_escaped() {
        let mut c = SvgCanvas::new(10.0, 10.0);
        c.text(1.0, 2.0, "MERS <&> \"x\"", &TextStyle::new(12.0).bold());
        let svg = c.finish();
        assert!(svg.contains("MERS &lt;&amp;&gt; &quot;x&quot;"));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn document_is_closed() {
        let mut c = SvgCanvas::new(100.0, 50.0);
        c.begin_clip(0.0, 0.0, 10.0, 10.0);
        c.polygon(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)], Rgb::BLACK);
        c.end_group();
        let svg = c.finish();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("clip-path=\"url(#clip1)\""));
        assert!(svg.contains("M0.00,0.00 L5.00,5.00 L10.00,0.00 Z"));
    }
}
