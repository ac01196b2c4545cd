use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    widgets::{Bar, BarChart, Block as BlockWidget, BlockExt as _, Widget},
};
use statlab_stats::Histogram;

use crate::view::widgets::style;

/// Horizontal bar chart with one bar per histogram bin.
#[derive(Debug)]
pub struct HistogramDisplay<'a> {
    histogram: &'a Histogram,
    block: Option<BlockWidget<'a>>,
}

impl<'a> HistogramDisplay<'a> {
    pub fn new(histogram: &'a Histogram) -> Self {
        Self {
            histogram,
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
        super::saturating_u16(self.histogram.bins.len())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }
}

impl Widget for HistogramDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &HistogramDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let bars = self
            .histogram
            .bins
            .iter()
            .map(|bin| {
                Bar::with_label(
                    format!("{:8.2}-{:8.2}", bin.range.start, bin.range.end),
                    bin.count,
                )
                .text_value(format!("{}", bin.count))
                .style(style::BAR)
            })
            .collect::<Vec<_>>();
        BarChart::new(bars)
            .direction(Direction::Horizontal)
            .bar_gap(0)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view;

    #[test]
    fn test_one_row_per_bin() {
        let histogram = statlab_stats::histogram(&[1.0, 2.0, 2.5, 2.9, 4.0], 3).unwrap();
        let display = HistogramDisplay::new(&histogram);
        assert_eq!(display.height(), 3);

        let text = view::render_to_string(display, 50, 3);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("1.00-"), "{text}");
        assert!(lines[2].contains("-    4.00"), "{text}");
    }

    #[test]
    fn test_block_adds_margin() {
        let histogram = statlab_stats::histogram(&[1.0, 2.0, 3.0], 2).unwrap();
        let display =
            HistogramDisplay::new(&histogram).block(BlockWidget::bordered().title("Heights"));
        assert_eq!(display.height(), 4);

        let text = view::render_to_string(display, 40, 4);
        assert!(text.lines().next().unwrap().contains("Heights"));
    }
}
