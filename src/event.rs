use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use serde::Deserialize;

/// Payload of a cross-context control message. Only the `type` field is
/// meaningful to this application; anything else in the envelope is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct ChannelMessage {
    #[serde(rename = "type")]
    pub kind: String,
}

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    Message(ChannelMessage),
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self::with_control_file(tick_rate, default_control_path())
    }

    /// `control_path` is polled once per tick for externally appended JSON
    /// lines (`{"type": "..."}`); each line becomes a `Message` event and
    /// the file is consumed. This is how another process delivers events
    /// like `learning.events.sidebar.close`.
    pub fn with_control_file(tick_rate: Duration, control_path: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if input_tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else {
                    if let Some(path) = &control_path {
                        drain_control_messages(path, &input_tx);
                    }
                    if input_tx.send(AppEvent::Tick).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

fn default_control_path() -> Option<PathBuf> {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .map(|base| base.join("courser").join("control.jsonl"))
}

/// Consume the control file: one JSON message per line, unparseable lines
/// dropped. The file is removed before parsing so a slow reader never
/// re-delivers a message.
fn drain_control_messages(path: &Path, tx: &mpsc::Sender<AppEvent>) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    let _ = fs::remove_file(path);
    for line in content.lines() {
        if let Ok(msg) = serde_json::from_str::<ChannelMessage>(line) {
            let _ = tx.send(AppEvent::Message(msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn control_file_lines_become_messages_and_are_consumed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("control.jsonl");
        fs::write(
            &path,
            "{\"type\":\"learning.events.sidebar.close\"}\nnot json\n",
        )
        .unwrap();

        let (tx, rx) = mpsc::channel();
        drain_control_messages(&path, &tx);

        match rx.try_recv() {
            Ok(AppEvent::Message(msg)) => {
                assert_eq!(msg.kind, "learning.events.sidebar.close");
            }
            _ => panic!("expected a message event"),
        }
        // The malformed line is dropped, not delivered.
        assert!(rx.try_recv().is_err());
        // Consumed on read.
        assert!(!path.exists());
    }

    #[test]
    fn missing_control_file_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let (tx, rx) = mpsc::channel();
        drain_control_messages(&dir.path().join("absent.jsonl"), &tx);
        assert!(rx.try_recv().is_err());
    }
}
