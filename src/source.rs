//! Event feed ingestion
//!
//! Events arrive either live (a TCP listener accepting JSON-lines
//! connections from bots) or from a replay file in the same format.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::event::BotEvent;

pub enum EventSource {
    Live {
        receiver: mpsc::UnboundedReceiver<BotEvent>,
        local_addr: SocketAddr,
    },
    Replay {
        events: Vec<BotEvent>,
        current_index: usize,
    },
}

pub struct EventReceiver {
    source: EventSource,
    dropped_lines: Arc<AtomicU64>,
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Option<BotEvent> {
        match &mut self.source {
            EventSource::Live { receiver, .. } => receiver.try_recv().ok(),
            EventSource::Replay {
                events,
                current_index,
            } => {
                if *current_index < events.len() {
                    let event = events[*current_index].clone();
                    *current_index += 1;
                    Some(event)
                } else {
                    None
                }
            }
        }
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &self.source {
            EventSource::Live { local_addr, .. } => Some(*local_addr),
            EventSource::Replay { .. } => None,
        }
    }

    /// Lines received so far that did not parse as a `BotEvent`
    pub fn dropped_lines(&self) -> u64 {
        self.dropped_lines.load(Ordering::Relaxed)
    }

    /// Build a receiver over a fixed set of events, drained in order.
    pub fn from_events(events: Vec<BotEvent>, dropped_lines: u64) -> Self {
        EventReceiver {
            source: EventSource::Replay {
                events,
                current_index: 0,
            },
            dropped_lines: Arc::new(AtomicU64::new(dropped_lines)),
        }
    }
}

async fn read_connection(
    stream: tokio::net::TcpStream,
    peer: SocketAddr,
    sender: mpsc::UnboundedSender<BotEvent>,
    dropped: Arc<AtomicU64>,
) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<BotEvent>(&line) {
                    Ok(event) => {
                        if sender.send(event).is_err() {
                            // Receiver has been dropped, exit the loop
                            break;
                        }
                    }
                    Err(_) => {
                        dropped.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error reading event stream from {}: {}", peer, e);
                break;
            }
        }
    }
}

pub async fn listen(addr: &str) -> Result<EventReceiver> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind event listener on {}: {}", addr, e))?;
    let local_addr = listener.local_addr()?;

    println!("Listening for bot events on {}", local_addr);

    let (sender, receiver) = mpsc::unbounded_channel();
    let dropped = Arc::new(AtomicU64::new(0));
    let dropped_for_tasks = dropped.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    let sender = sender.clone();
                    let dropped = dropped_for_tasks.clone();
                    tokio::spawn(async move {
                        read_connection(stream, peer, sender, dropped).await;
                    });
                }
                Err(e) => {
                    eprintln!("Error accepting event connection: {}", e);
                    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                }
            }
        }
    });

    Ok(EventReceiver {
        source: EventSource::Live {
            receiver,
            local_addr,
        },
        dropped_lines: dropped,
    })
}

pub fn replay(path: &str) -> Result<EventReceiver> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read replay file {}: {}", path, e))?;

    let mut events = Vec::new();
    let mut dropped = 0u64;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<BotEvent>(line) {
            Ok(event) => events.push(event),
            Err(_) => dropped += 1,
        }
    }

    println!("Loaded {} events from replay file: {}", events.len(), path);
    if dropped > 0 {
        println!("Skipped {} malformed lines", dropped);
    }

    Ok(EventReceiver::from_events(events, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(channel: &str, actor: &str) -> BotEvent {
        serde_json::from_str(&format!(
            r#"{{"channel":"{}","kind":"chat","actor":"{}"}}"#,
            channel, actor
        ))
        .unwrap()
    }

    #[test]
    fn replay_receiver_drains_in_order() {
        let mut receiver =
            EventReceiver::from_events(vec![event("#a", "one"), event("#a", "two")], 0);
        assert_eq!(receiver.try_recv().unwrap().actor, "one");
        assert_eq!(receiver.try_recv().unwrap().actor, "two");
        assert!(receiver.try_recv().is_none());
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn replay_receiver_has_no_local_addr() {
        let receiver = EventReceiver::from_events(Vec::new(), 3);
        assert!(receiver.local_addr().is_none());
        assert_eq!(receiver.dropped_lines(), 3);
    }
}
