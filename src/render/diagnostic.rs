use super::axes::{Axes, Rect, Scale};
use super::svg::SvgCanvas;
use super::Style;
use crate::diagnostic::DiagnosticCall;

const SYMBOL_WIDTH: f64 = 20.0;

/// The "+" / "-" symbol with the verdict text. Nothing is drawn without a call.
pub fn draw_diagnostic(
    canvas: &mut SvgCanvas,
    rect: Rect,
    call: Option<DiagnosticCall>,
    query_name: &str,
    style: &Style,
) {
    let Some(call) = call else {
        return;
    };
    let axes = Axes::new(rect, Scale::linear(0.0, 1.0), Scale::linear(0.0, 1.0));
    let font = style.font();

    canvas.line(axes.px((0.27, 0.5)), axes.px((0.33, 0.5)), style.color, SYMBOL_WIDTH, true);
    if call.is_positive() {
        canvas.line(axes.px((0.3, 0.1)), axes.px((0.3, 0.9)), style.color, SYMBOL_WIDTH, true);
    }

    let (x, y) = axes.px((0.4, 0.7));
    canvas.text(x, y, call.verdict(), &font.bold());
    let [first, second] = call.captions(query_name);
    let (x, y) = axes.px((0.4, 0.4));
    canvas.text(x, y, &first, &font);
    let (x, y) = axes.px((0.4, 0.11));
    canvas.text(x, y, &second, &font);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: 600.0,
            height: 60.0,
        }
    }

    #[test]
    fn positive_draws_plus() {
        let mut c = SvgCanvas::new(600.0, 60.0);
        draw_diagnostic(&mut c, rect(), Some(DiagnosticCall::Positive), "SARS-CoV-2", &Style::default());
        let svg = c.finish();
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains("Test Result: Positive"));
        assert!(svg.contains("SARS-CoV-2 was detected"));
    }

    #[test]
    fn negative_draws_minus() {
        let mut c = SvgCanvas::new(600.0, 60.0);
        draw_diagnostic(&mut c, rect(), Some(DiagnosticCall::Negative), "SARS-CoV-2", &Style::default());
        let svg = c.finish();
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("Test Result: Negative"));
    }

    #[test]
    fn nothing_without_call() {
        let mut c = SvgCanvas::new(600.0, 60.0);
        draw_diagnostic(&mut c, rect(), None, "SARS-CoV-2", &Style::default());
        assert!(!c.finish().contains("<text"));
    }
}
