use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
    Interrupt,
    /// The terminal input stream failed; no further events will arrive.
    Error(String),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

/// Sampling clock. The first tick is one full period away so CPU counters
/// have a measurable window, and a slow tick pushes the schedule back
/// instead of firing the missed ticks back to back.
pub fn tick_interval(tick_rate: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + tick_rate, tick_rate);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut ticks = tick_interval(tick_rate);
            let mut interrupt = std::pin::pin!(tokio::signal::ctrl_c());

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(e)) => {
                                let _ = tx.send(Event::Error(e.to_string()));
                                break;
                            }
                            None => break,
                        }
                    }
                    _ = ticks.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    _ = &mut interrupt => {
                        let _ = tx.send(Event::Interrupt);
                        break;
                    }
                }
            }
        });

        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
