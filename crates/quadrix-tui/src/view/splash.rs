use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

use super::style;

/// Full-screen title card, used for both the start screen and game over.
#[derive(Debug)]
pub struct SplashDisplay<'a> {
    title: &'a str,
}

impl<'a> SplashDisplay<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }
}

impl Widget for SplashDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, hint_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
                .flex(Flex::Center)
                .spacing(1)
                .areas(area);

        Paragraph::new(self.title)
            .centered()
            .style(Style::new().fg(style::WHITE).add_modifier(Modifier::BOLD))
            .render(title_area, buf);
        Paragraph::new("Press any key to play")
            .centered()
            .style(style::HINT)
            .render(hint_area, buf);
    }
}
