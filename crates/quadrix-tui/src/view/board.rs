use quadrix_engine::Game;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Widget},
};

use super::style;

/// One board cell is two terminal columns wide so it renders square-ish.
const CELL_WIDTH: u16 = 2;

/// The play area: locked blocks with the falling piece overlaid.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    game: &'a Game,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game }
    }

    /// Terminal footprint including the border.
    pub fn width() -> u16 {
        10 * CELL_WIDTH + 2
    }

    pub fn height() -> u16 {
        20 + 2
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(Style::new().fg(style::WHITE));
        let inner = block.inner(area);
        block.render(area, buf);

        for (y, row) in self.game.grid().cell_rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => draw_cell(buf, inner, x, y, "  ", style::block(*kind)),
                    None => draw_cell(buf, inner, x, y, " .", style::EMPTY_DOT),
                }
            }
        }

        let piece = self.game.current();
        let piece_style = style::block(piece.kind());
        for cell in piece.cells() {
            // The spawn overhang stays out of sight above the board.
            let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
                continue;
            };
            draw_cell(buf, inner, x, y, "  ", piece_style);
        }
    }
}

fn draw_cell(buf: &mut Buffer, inner: Rect, x: usize, y: usize, symbol: &str, style: Style) {
    let (Ok(dx), Ok(dy)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    let dx = dx * CELL_WIDTH;
    if dx + CELL_WIDTH > inner.width || dy >= inner.height {
        return;
    }
    buf.set_string(inner.x + dx, inner.y + dy, symbol, style);
}
