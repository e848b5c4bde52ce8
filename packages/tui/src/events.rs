//! Event pump feeding the application loop.
//!
//! Terminal keys are polled on a blocking thread; ticks come from a
//! tokio interval. Both land on one channel, alongside the events the
//! app sends itself when deferred work finishes: a debounced search
//! window closing, or an edit record arriving from the API.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::ui::widgets::form::FormState;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// A search debounce elapsed and the query should be issued
    SearchReady,
    /// The record behind an open edit modal arrived
    EditReady { id: String, form: Box<FormState> },
    /// Fetching the record behind an open edit modal failed
    EditFailed { id: String, message: String },
    Quit,
}

const KEY_POLL: Duration = Duration::from_millis(50);

pub struct EventHandler {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
    ticker: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::unbounded_channel();

        // Crossterm polling blocks, so it gets its own thread. The loop
        // ends once the channel closes.
        let key_sender = sender.clone();
        tokio::task::spawn_blocking(move || loop {
            if !event::poll(KEY_POLL).unwrap_or(false) {
                if key_sender.is_closed() {
                    break;
                }
                continue;
            }
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let quit = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                let message = if quit { AppEvent::Quit } else { AppEvent::Key(key) };
                if key_sender.send(message).is_err() {
                    break;
                }
            }
        });

        let tick_sender = sender.clone();
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_sender.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self {
            sender,
            receiver,
            ticker,
        }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    /// Sender handed to tasks that report back into the loop
    pub fn sender(&self) -> &mpsc::UnboundedSender<AppEvent> {
        &self.sender
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
