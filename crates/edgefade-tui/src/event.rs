use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    /// Poll faster than `tick_rate_ms` while something is animating
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let animation_tick = if animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / animation_fps as u64).max(1))
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick,
        }
    }

    pub fn tick_rate(&self, animating: bool) -> Duration {
        if animating {
            self.animation_tick.min(self.tick_rate)
        } else {
            self.tick_rate
        }
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate(animating))? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        // (crossterm 0.27+ sends release events on some systems)
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<AppEvent> {
    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => Some(AppEvent::Scroll(1)),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Some(AppEvent::Scroll(-1)),
        MouseEventKind::Down(_) => Some(AppEvent::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel moved (positive = toward the end)
    Scroll(i32),
    /// Mouse button pressed
    Click { column: u16, row: u16 },
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
