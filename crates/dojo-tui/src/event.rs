//! Terminal event reader running in a background tokio task.
//!
//! Forwards key presses, mouse scrolls and resizes, plus a tick (toast
//! expiry, throbber animation) and a render beat.

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Scroll wheel only; clicks and drags are dropped.
    Mouse(MouseEvent),
    /// The terminal changed size; the next frame picks up the new area.
    Resize,
    Tick,
    Render,
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            let mut stream = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            let mut render = tokio::time::interval(render_rate);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            render.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = task_cancel.cancelled() => break,
                    _ = tick.tick() => Event::Tick,
                    _ = render.tick() => Event::Render,
                    Some(Ok(raw)) = stream.next() => match translate(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Keep key presses, scroll wheel and resizes; drop everything else.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse)
            if matches!(
                mouse.kind,
                MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
            ) =>
        {
            Some(Event::Mouse(mouse))
        }
        CrosstermEvent::Resize(..) => Some(Event::Resize),
        _ => None,
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
