use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{box_plot_display::*, frequency_display::*, histogram_display::*};

mod box_plot_display;
mod frequency_display;
mod histogram_display;

pub mod style {
    use ratatui::style::{Color, Style};

    pub const BAR: Style = Style::new().fg(Color::Cyan);
    pub const WITHOUT_DISEASE: Style = Style::new().fg(Color::LightBlue);
    pub const WITH_DISEASE: Style = Style::new().fg(Color::LightRed);
    pub const BOX: Style = Style::new().fg(Color::Cyan);
    pub const MEDIAN: Style = Style::new().fg(Color::Red);
    pub const OUTLIER: Style = Style::new().fg(Color::Yellow);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
