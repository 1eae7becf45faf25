use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub use self::{board::BoardDisplay, panel::SidePanel, splash::SplashDisplay};

mod board;
mod panel;
mod splash;

/// Board on the left, info panel on the right, centered in the terminal.
pub fn playing_layout(area: Rect) -> [Rect; 2] {
    let [row] = Layout::vertical([Constraint::Length(BoardDisplay::height())])
        .flex(Flex::Center)
        .areas(area);
    Layout::horizontal([
        Constraint::Length(BoardDisplay::width()),
        Constraint::Length(SidePanel::width()),
    ])
    .flex(Flex::Center)
    .spacing(1)
    .areas(row)
}

pub(crate) mod style {
    use quadrix_engine::PieceKind;
    use ratatui::style::{Color, Style};

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const EMPTY_DOT: Style = Style::new().fg(GRAY);
    pub const HINT: Style = Style::new().fg(GRAY);

    /// Each shape keeps one color for its falling, preview, and locked forms.
    pub fn piece_color(kind: PieceKind) -> Color {
        match kind {
            PieceKind::I => CYAN,
            PieceKind::O => YELLOW,
            PieceKind::S => GREEN,
            PieceKind::Z => RED,
            PieceKind::J => BLUE,
            PieceKind::L => ORANGE,
            PieceKind::T => MAGENTA,
        }
    }

    pub fn block(kind: PieceKind) -> Style {
        let color = piece_color(kind);
        Style::new().fg(color).bg(color)
    }
}
