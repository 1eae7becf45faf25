use std::{io, time::Duration};

use crossterm::event::{Event, KeyCode};
use quadrix_engine::{Command, Game, GameEvent, Phase, PieceFactory};
use ratatui::{DefaultTerminal, Frame};

use crate::{
    Args,
    runtime::{EventLoop, LoopEvent},
    view::{BoardDisplay, SidePanel, SplashDisplay},
};

/// How long a feedback banner stays on screen.
const BANNER_TTL: Duration = Duration::from_millis(1200);

/// The interactive shell around a [`Game`].
///
/// Owns the event loop, maps keys to commands per phase, and turns game
/// events into transient on-screen feedback. All game state lives in the
/// engine; the app only reads it to draw.
pub struct App {
    game: Game,
    fps: u32,
    banner: Option<(String, Duration)>,
    should_exit: bool,
}

impl App {
    pub fn new(args: &Args) -> Self {
        let factory = match args.seed {
            Some(seed) => PieceFactory::with_seed(seed),
            None => PieceFactory::new(),
        };
        Self {
            game: Game::with_factory(factory),
            fps: args.fps.max(1),
            banner: None,
            should_exit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        let mut events = EventLoop::new(Duration::from_secs(1) / self.fps);
        while !self.should_exit {
            match events.next()? {
                LoopEvent::Tick => self.update(events.tick_interval()),
                LoopEvent::Render => {
                    terminal.draw(|frame| self.draw(frame))?;
                }
                LoopEvent::Input(event) => self.handle_event(&event),
            }
        }
        Ok(())
    }

    fn update(&mut self, dt: Duration) {
        self.game.tick(dt);
        self.drain_game_events();

        if let Some((_, remaining)) = &mut self.banner {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.banner = None;
            }
        }
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };

        match self.game.phase() {
            Phase::Splash | Phase::GameOver => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                _ => self.game.apply(Command::Restart),
            },
            Phase::Playing => match key.code {
                KeyCode::Left => self.game.apply(Command::MoveLeft),
                KeyCode::Right => self.game.apply(Command::MoveRight),
                KeyCode::Down => self.game.apply(Command::MoveDown),
                KeyCode::Up => self.game.apply(Command::Rotate),
                KeyCode::Char(' ') => self.game.apply(Command::HardDrop),
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                _ => {}
            },
        }
        self.drain_game_events();
    }

    /// Consumes engine notifications; the ones worth celebrating become the
    /// side-panel banner. A sound backend would hook in here the same way.
    fn drain_game_events(&mut self) {
        for event in self.game.take_events() {
            let text = match event {
                GameEvent::LinesCleared(1) => Some("Single!".to_owned()),
                GameEvent::LinesCleared(2) => Some("Double!".to_owned()),
                GameEvent::LinesCleared(3) => Some("Triple!".to_owned()),
                GameEvent::LinesCleared(_) => Some("Quadrix!".to_owned()),
                GameEvent::LevelUp(level) => Some(format!("Level {level}")),
                GameEvent::Rotated | GameEvent::Locked | GameEvent::GameOver => None,
            };
            if let Some(text) = text {
                self.banner = Some((text, BANNER_TTL));
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        match self.game.phase() {
            Phase::Splash => frame.render_widget(SplashDisplay::new("QUADRIX"), frame.area()),
            Phase::GameOver => frame.render_widget(SplashDisplay::new("GAME OVER"), frame.area()),
            Phase::Playing => {
                let banner = self.banner.as_ref().map(|(text, _)| text.as_str());
                let board = BoardDisplay::new(&self.game);
                let panel = SidePanel::new(&self.game, banner);
                let [board_area, panel_area] = crate::view::playing_layout(frame.area());
                frame.render_widget(board, board_area);
                frame.render_widget(panel, panel_area);
            }
        }
    }
}
