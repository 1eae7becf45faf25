use quadrix_engine::Game;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use super::style;

/// Info column beside the board: next-piece preview, score, lines, level,
/// and the transient feedback banner.
#[derive(Debug)]
pub struct SidePanel<'a> {
    game: &'a Game,
    banner: Option<&'a str>,
}

impl<'a> SidePanel<'a> {
    pub fn new(game: &'a Game, banner: Option<&'a str>) -> Self {
        Self { game, banner }
    }

    pub fn width() -> u16 {
        14
    }
}

impl Widget for SidePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [next_area, stats_area, banner_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(area);

        self.render_next(next_area, buf);

        Paragraph::new(vec![
            Line::from("Score"),
            Line::from(format!("{:06}", self.game.score())),
            Line::from("Lines"),
            Line::from(self.game.lines().to_string()),
            Line::from("Level"),
            Line::from(self.game.level().to_string()),
        ])
        .block(Block::bordered().title(Line::from("STATS").centered()))
        .render(stats_area, buf);

        if let Some(text) = self.banner {
            Paragraph::new(text)
                .centered()
                .style(Style::new().fg(style::YELLOW))
                .render(banner_area, buf);
        }
    }
}

impl SidePanel<'_> {
    fn render_next(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(Line::from("NEXT").centered());
        let inner = block.inner(area);
        block.render(area, buf);

        let kind = self.game.next_kind();
        let (w, h) = kind.size();
        let (Ok(w), Ok(h)) = (u16::try_from(w), u16::try_from(h)) else {
            return;
        };
        let x0 = inner.x + inner.width.saturating_sub(w * 2) / 2;
        let y0 = inner.y + inner.height.saturating_sub(h) / 2;

        for y in 0..h {
            for x in 0..w {
                if kind.is_occupied(usize::from(x), usize::from(y)) {
                    buf.set_string(x0 + x * 2, y0 + y, "  ", style::block(kind));
                }
            }
        }
    }
}
