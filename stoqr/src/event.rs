//! Terminal events and the background poller

use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw crossterm events forwarded by the poller
#[derive(Debug, Clone)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Scroll wheel, `delta` is +1 down and -1 up
    Scroll { column: u16, row: u16, delta: isize },
    Resize(u16, u16),
}

impl EventKind {
    /// Ctrl+C quits from anywhere, including text inputs
    pub fn is_force_quit(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
            }
            _ => false,
        }
    }
}

/// Poll crossterm on a background task until `cancel_token` fires.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => Some(RawEvent::Key(key)),
                            Ok(event::Event::Mouse(mouse)) => Some(RawEvent::Mouse(mouse)),
                            Ok(event::Event::Resize(w, h)) => Some(RawEvent::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(raw) = raw {
                            if tx.send(raw).is_err() {
                                debug!("event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Convert a raw event, folding scroll wheel mouse events into `Scroll`
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}
