//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop can `select!` between input
//! and timer deadlines.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
}

impl AppEvent {
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(..) => Some(AppEvent::Resize),
            _ => None,
        }
    }
}

/// Spawns a blocking reader that forwards terminal events through the
/// returned channel.  `poll_interval` bounds how long the reader takes to
/// notice that the receiver was dropped.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(poll_interval) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal event poll failed");
                    break;
                }
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            if let Some(app_event) = AppEvent::from_crossterm(ev) {
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    rx
}
