//! Event types and source threads for the terminal event loop.
//!
//! The main loop owns one receiver; input keys, resize notices and
//! storage changes all funnel into it as [`UiEvent`]s from background
//! threads. Source threads stop on their own once the receiving side
//! is gone.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use crate::storage::StorageEvent;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    Storage(StorageEvent),
}

/// Spawn the thread that reads terminal input and forwards it as
/// [`UiEvent`]s.
pub fn spawn_input_reader(tx: mpsc::Sender<UiEvent>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(200)) {
                Ok(true) => {
                    let event = match crossterm::event::read() {
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            UiEvent::Input(key)
                        }
                        Ok(Event::Resize(width, height)) => UiEvent::Resize { width, height },
                        Ok(_) => continue,
                        Err(err) => {
                            tracing::error!("input read failed: {err}");
                            return;
                        }
                    };
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::error!("input poll failed: {err}");
                    return;
                }
            }
        }
    })
}

/// Spawn the thread that forwards storage events into the UI channel.
pub fn spawn_storage_bridge(
    events: mpsc::Receiver<StorageEvent>,
    tx: mpsc::Sender<UiEvent>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if tx.send(UiEvent::Storage(event)).is_err() {
                return;
            }
        }
    })
}
