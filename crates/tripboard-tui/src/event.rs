//! Terminal event reader running in a background tokio task, plus the
//! translation from crossterm keys to the core's backend-neutral `Key`.

use std::io;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use tripboard_core::Key;

/// Events produced by the terminal event reader.
#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Animation tick. Drives shakes and toast expiry.
    Tick,
    /// Render tick (~30 FPS).
    Render,
}

/// Reads terminal events in a background task and sends them over a channel.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let clocks = Clocks {
            tick: skipping_interval(tick_rate),
            render: skipping_interval(render_rate),
        };
        tokio::spawn(pump(EventStream::new(), clocks, tx, cancel.clone()));

        Self { rx, cancel }
    }

    /// Receive the next event. Returns `None` if the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Clocks {
    tick: Interval,
    render: Interval,
}

fn skipping_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Forward terminal input and clock ticks to `tx` until cancelled, the
/// input ends, or the receiver goes away. Pending input is drained
/// ahead of ticks.
async fn pump<S>(
    mut input: S,
    mut clocks: Clocks,
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) where
    S: Stream<Item = io::Result<CrosstermEvent>> + Unpin,
{
    loop {
        let event = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            next = input.next() => match next {
                Some(Ok(raw)) => match from_terminal(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => {
                    warn!(error = %e, "terminal read failed");
                    continue;
                }
                None => {
                    debug!("terminal input closed");
                    break;
                }
            },
            _ = clocks.tick.tick() => Event::Tick,
            _ = clocks.render.tick() => Event::Render,
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}

/// Key presses and resizes are kept. Key releases, repeats, mouse and
/// focus events are dropped.
fn from_terminal(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Map a terminal key press to a core `Key`. Control chords have no
/// core equivalent.
pub fn translate(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    let key = match key.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_keys_translate() {
        assert_eq!(translate(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Escape));
        assert_eq!(
            translate(press(KeyCode::Char('F'), KeyModifiers::SHIFT)),
            Some(Key::Char('F'))
        );
        assert_eq!(
            translate(press(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Key::BackTab)
        );
    }

    fn clocks(period: Duration) -> Clocks {
        Clocks {
            tick: skipping_interval(period),
            render: skipping_interval(period),
        }
    }

    #[test]
    fn only_presses_and_resizes_pass_through() {
        let press_a = press(KeyCode::Char('a'), KeyModifiers::NONE);
        let mut release = press_a;
        release.kind = KeyEventKind::Release;

        assert_eq!(from_terminal(CrosstermEvent::Key(press_a)), Some(Event::Key(press_a)));
        assert_eq!(from_terminal(CrosstermEvent::Key(release)), None);
        assert_eq!(from_terminal(CrosstermEvent::Resize(80, 24)), Some(Event::Resize(80, 24)));
        assert_eq!(from_terminal(CrosstermEvent::FocusGained), None);
    }

    #[tokio::test]
    async fn pump_forwards_input_in_order_and_stops_at_end() {
        let enter = press(KeyCode::Enter, KeyModifiers::NONE);
        let input = futures::stream::iter(vec![
            Ok(CrosstermEvent::Key(enter)),
            Ok(CrosstermEvent::FocusLost),
            Err(io::Error::other("tty gone")),
            Ok(CrosstermEvent::Resize(100, 40)),
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        pump(input, clocks(Duration::from_secs(3600)), tx, CancellationToken::new()).await;

        assert_eq!(rx.recv().await, Some(Event::Key(enter)));
        assert_eq!(rx.recv().await, Some(Event::Resize(100, 40)));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn pump_ticks_while_idle_and_honours_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(pump(
            futures::stream::pending::<io::Result<CrosstermEvent>>(),
            clocks(Duration::from_millis(5)),
            tx,
            cancel.clone(),
        ));

        let first = rx.recv().await;
        assert!(matches!(first, Some(Event::Tick | Event::Render)), "got: {first:?}");

        cancel.cancel();
        let _ = task.await;
        while let Ok(event) = rx.try_recv() {
            assert!(matches!(event, Event::Tick | Event::Render));
        }
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn chords_and_unmapped_keys_do_not() {
        assert_eq!(translate(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), None);
        assert_eq!(translate(press(KeyCode::F(5), KeyModifiers::NONE)), None);
    }
}
