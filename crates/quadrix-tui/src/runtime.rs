use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// Events delivered to the application loop.
#[derive(Debug)]
pub enum LoopEvent {
    /// Advance game logic by one fixed step.
    Tick,
    /// Redraw the screen.
    Render,
    /// Terminal input (key, resize, ...).
    Input(Event),
}

/// Fixed-rate scheduler over crossterm's event stream.
///
/// Each frame runs tick, then render, then input - renders are coalesced so
/// at most one happens per state change. The tick interval doubles as the
/// `dt` handed to the game, keeping the engine free of any clock source.
#[derive(Debug)]
pub struct EventLoop {
    tick_interval: Duration,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            last_tick: Instant::now(),
            // First render must happen before the first tick elapses.
            dirty: true,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Blocks until the next tick, render, or input event.
    pub fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if now.duration_since(self.last_tick) >= self.tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Ok(LoopEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(LoopEvent::Render);
            }

            let next_tick_at = self.last_tick + self.tick_interval;
            let timeout = next_tick_at.saturating_duration_since(now);
            if event::poll(timeout)? {
                self.dirty = true;
                return Ok(LoopEvent::Input(event::read()?));
            }
        }
    }
}
