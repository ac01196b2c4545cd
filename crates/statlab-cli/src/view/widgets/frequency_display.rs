use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block as BlockWidget, BlockExt as _, Widget},
};
use statlab_data::heart::FrequencyRow;

use crate::view::widgets::style;

const BAR_WIDTH: u16 = 7;
const BAR_GAP: u16 = 1;
const GROUP_GAP: u16 = 4;

/// Grouped bar chart of a category × disease cross-tabulation.
///
/// Each category gets a pair of bars: patients without disease, then with.
#[derive(Debug)]
pub struct FrequencyDisplay<'a> {
    rows: &'a [FrequencyRow],
    block: Option<BlockWidget<'a>>,
}

impl<'a> FrequencyDisplay<'a> {
    pub fn new(rows: &'a [FrequencyRow]) -> Self {
        Self { rows, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let groups = super::saturating_u16(self.rows.len());
        let group_width = 2 * BAR_WIDTH + BAR_GAP;
        groups
            .saturating_mul(group_width + GROUP_GAP)
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }
}

impl Widget for FrequencyDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &FrequencyDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut chart = BarChart::default()
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP)
            .group_gap(GROUP_GAP);
        for row in self.rows {
            let bars = [
                Bar::with_label("no", row.without_disease)
                    .text_value(row.without_disease.to_string())
                    .style(style::WITHOUT_DISEASE),
                Bar::with_label("yes", row.with_disease)
                    .text_value(row.with_disease.to_string())
                    .style(style::WITH_DISEASE),
            ];
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(row.category.as_str()).centered())
                    .bars(&bars),
            );
        }
        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view;

    fn rows() -> Vec<FrequencyRow> {
        vec![
            FrequencyRow {
                category: "no".into(),
                without_disease: 5,
                with_disease: 1,
            },
            FrequencyRow {
                category: "yes".into(),
                without_disease: 1,
                with_disease: 3,
            },
        ]
    }

    #[test]
    fn test_width_fits_all_groups() {
        let rows = rows();
        let display = FrequencyDisplay::new(&rows);
        assert_eq!(display.width(), 2 * (2 * BAR_WIDTH + BAR_GAP + GROUP_GAP));
        assert_eq!(
            FrequencyDisplay::new(&rows)
                .block(BlockWidget::bordered())
                .width(),
            display.width() + 2
        );
    }

    #[test]
    fn test_renders_bar_labels() {
        let rows = rows();
        let text = view::render_to_string(FrequencyDisplay::new(&rows), 40, 10);
        assert_eq!(text.lines().count(), 10);
        for label in ["no", "yes"] {
            assert!(text.contains(label), "missing {label} in\n{text}");
        }
    }
}
