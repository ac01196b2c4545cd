use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use statlab_stats::BoxPlotSummary;

use crate::view::widgets::style;

/// One-line box plot with a value scale underneath.
///
/// ```text
/// |-[==|==]-|    o
/// 0.0         15.0
/// ```
#[derive(Debug)]
pub struct BoxPlotDisplay<'a> {
    summary: &'a BoxPlotSummary,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoxPlotDisplay<'a> {
    pub fn new(summary: &'a BoxPlotSummary) -> Self {
        Self {
            summary,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        2 + super::block_vertical_margin(self.block.as_ref())
    }

    fn bounds(&self) -> (f64, f64) {
        let s = self.summary;
        let low = s.outliers.first().map_or(s.lower_whisker, |o| o.min(s.lower_whisker));
        let high = s.outliers.last().map_or(s.upper_whisker, |o| o.max(s.upper_whisker));
        (low, high)
    }
}

/// Maps `value` in `[low, high]` onto a column of `area`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn column(area: Rect, value: f64, low: f64, high: f64) -> u16 {
    let last = area.width.saturating_sub(1);
    let offset = if high > low {
        let ratio = ((value - low) / (high - low)).clamp(0.0, 1.0);
        (ratio * f64::from(last)).round() as u16
    } else {
        last / 2
    };
    area.x + offset.min(last)
}

impl Widget for BoxPlotDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoxPlotDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        if area.is_empty() {
            return;
        }

        let s = self.summary;
        let (low, high) = self.bounds();
        let col = |value| column(area, value, low, high);
        let y = area.y;
        let mut fill = |from: u16, to: u16, symbol: &str, style: Style| {
            for x in from..=to {
                buf.set_string(x, y, symbol, style);
            }
        };

        let (lower, q1, median, q3, upper) = (
            col(s.lower_whisker),
            col(s.q1),
            col(s.median),
            col(s.q3),
            col(s.upper_whisker),
        );
        fill(lower, upper, "-", Style::new());
        fill(q1, q3, "=", style::BOX);
        fill(q1, q1, "[", style::BOX);
        fill(q3, q3, "]", style::BOX);
        fill(lower, lower, "|", Style::new());
        fill(upper, upper, "|", Style::new());
        fill(median, median, "|", style::MEDIAN);
        for &outlier in &s.outliers {
            let x = col(outlier);
            fill(x, x, "o", style::OUTLIER);
        }

        if area.height < 2 {
            return;
        }
        let y = area.y + 1;
        let low_label = format!("{low:.1}");
        let high_label = format!("{high:.1}");
        let high_width = super::saturating_u16(high_label.len());
        buf.set_stringn(
            area.x,
            y,
            &low_label,
            usize::from(area.width),
            Style::new(),
        );
        if usize::from(area.width) > low_label.len() + high_label.len() {
            buf.set_string(area.right() - high_width, y, &high_label, Style::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view;

    fn summary(outliers: Vec<f64>) -> BoxPlotSummary {
        BoxPlotSummary {
            lower_whisker: 0.0,
            q1: 2.0,
            median: 5.0,
            q3: 8.0,
            upper_whisker: 10.0,
            outliers,
        }
    }

    #[test]
    fn test_draws_box_and_whiskers() {
        let summary = summary(vec![]);
        let text = view::render_to_string(BoxPlotDisplay::new(&summary), 11, 2);
        assert_eq!(text, "|-[==|==]-|\n0.0    10.0\n");
    }

    #[test]
    fn test_outliers_extend_scale() {
        let summary = summary(vec![20.0]);
        let text = view::render_to_string(BoxPlotDisplay::new(&summary), 21, 2);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], format!("|-[==|==]-|{}o", " ".repeat(9)));
        assert_eq!(lines[1], format!("0.0{}20.0", " ".repeat(14)));
    }

    #[test]
    fn test_constant_sample_collapses_to_center() {
        let summary = BoxPlotSummary {
            lower_whisker: 3.0,
            q1: 3.0,
            median: 3.0,
            q3: 3.0,
            upper_whisker: 3.0,
            outliers: vec![],
        };
        let text = view::render_to_string(BoxPlotDisplay::new(&summary), 9, 1);
        assert_eq!(text, "    |\n");
    }
}
