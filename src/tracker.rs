use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::bounded_vec::BoundedVec;
use crate::event::{BotEvent, EventKind};
use crate::source::EventReceiver;

/// Per-channel view of the feed: a bounded recent-event history plus counters.
#[derive(Debug)]
pub struct ChannelActivity {
    pub history: BoundedVec<BotEvent>,
    pub total_events: u64,
    pub kind_counts: HashMap<EventKind, u64>,
    pub last_seen: Instant,
}

impl ChannelActivity {
    fn new(max_history: usize) -> Self {
        Self {
            history: BoundedVec::new(max_history),
            total_events: 0,
            kind_counts: HashMap::new(),
            last_seen: Instant::now(),
        }
    }

    fn add_event(&mut self, event: BotEvent) {
        self.total_events += 1;
        *self.kind_counts.entry(event.kind).or_insert(0) += 1;
        self.last_seen = Instant::now();
        self.history.push(event);
    }

    pub fn last_kind(&self) -> Option<EventKind> {
        self.history.at(-1).map(|event| event.kind)
    }

    pub fn time_since_last_seen(&self) -> Duration {
        self.last_seen.elapsed()
    }
}

/// Groups incoming events by channel, creating channels on first sight.
pub struct ActivityTracker {
    receiver: EventReceiver,
    channels: HashMap<String, ChannelActivity>,
    max_history: usize,
}

impl ActivityTracker {
    pub fn new(receiver: EventReceiver) -> Self {
        Self {
            receiver,
            channels: HashMap::new(),
            max_history: 1000, // Default max history
        }
    }

    /// Applies a new history bound to every existing channel and to channels
    /// created later. Shrinking evicts each channel's oldest events at once.
    pub fn set_max_history(&mut self, max_history: usize) {
        self.max_history = max_history;
        for activity in self.channels.values_mut() {
            activity.history.set_capacity(max_history);
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Drains all pending events from the receiver into the per-channel
    /// histories. Returns how many events were ingested.
    pub fn update(&mut self) -> usize {
        let mut ingested = 0;
        while let Some(event) = self.receiver.try_recv() {
            self.add_event(event);
            ingested += 1;
        }
        ingested
    }

    fn add_event(&mut self, event: BotEvent) {
        let max_history = self.max_history;
        let activity = self
            .channels
            .entry(event.channel.clone())
            .or_insert_with(|| ChannelActivity::new(max_history));
        activity.add_event(event);
    }

    /// All channels sorted by name for stable display order
    pub fn channels(&self) -> Vec<(&String, &ChannelActivity)> {
        let mut channels: Vec<_> = self.channels.iter().collect();
        channels.sort_by(|a, b| a.0.cmp(b.0));
        channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn total_events(&self) -> u64 {
        self.channels.values().map(|a| a.total_events).sum()
    }

    pub fn channel_history(&self, name: &str) -> Option<&BoundedVec<BotEvent>> {
        self.channels.get(name).map(|activity| &activity.history)
    }

    pub fn clear_channel_history(&mut self, name: &str) {
        if let Some(activity) = self.channels.get_mut(name) {
            activity.history.clear();
        }
    }

    pub fn dropped_lines(&self) -> u64 {
        self.receiver.dropped_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(channel: &str, kind: &str, actor: &str) -> BotEvent {
        serde_json::from_str(&format!(
            r#"{{"channel":"{}","kind":"{}","actor":"{}"}}"#,
            channel, kind, actor
        ))
        .unwrap()
    }

    fn tracker_with(events: Vec<BotEvent>) -> ActivityTracker {
        ActivityTracker::new(EventReceiver::from_events(events, 0))
    }

    #[test]
    fn update_routes_events_per_channel() {
        let mut tracker = tracker_with(vec![
            event("#alpha", "chat", "a"),
            event("#beta", "command", "b"),
            event("#alpha", "ban", "c"),
        ]);
        assert_eq!(tracker.update(), 3);
        assert_eq!(tracker.channel_count(), 2);
        assert_eq!(tracker.total_events(), 3);
        assert_eq!(tracker.channel_history("#alpha").unwrap().len(), 2);
        assert_eq!(tracker.channel_history("#beta").unwrap().len(), 1);
        assert!(tracker.channel_history("#gamma").is_none());
    }

    #[test]
    fn channels_are_sorted_by_name() {
        let mut tracker = tracker_with(vec![
            event("#zed", "chat", "a"),
            event("#ack", "chat", "b"),
            event("#mid", "chat", "c"),
        ]);
        tracker.update();
        let names: Vec<&String> = tracker.channels().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["#ack", "#mid", "#zed"]);
    }

    #[test]
    fn history_is_bounded_per_channel() {
        let mut tracker = tracker_with((0..10).map(|i| event("#a", "chat", &format!("u{}", i))).collect());
        tracker.set_max_history(4);
        tracker.update();
        let history = tracker.channel_history("#a").unwrap();
        assert_eq!(history.len(), 4);
        // Newest four survive, oldest first
        assert_eq!(history.at(0).unwrap().actor, "u6");
        assert_eq!(history.at(-1).unwrap().actor, "u9");
        // Counters keep seeing everything
        assert_eq!(tracker.total_events(), 10);
    }

    #[test]
    fn shrinking_max_history_applies_to_existing_channels() {
        let mut tracker = tracker_with(vec![
            event("#a", "chat", "1"),
            event("#a", "chat", "2"),
            event("#a", "chat", "3"),
            event("#b", "chat", "x"),
            event("#b", "chat", "y"),
        ]);
        tracker.update();
        tracker.set_max_history(1);
        assert_eq!(tracker.channel_history("#a").unwrap().len(), 1);
        assert_eq!(tracker.channel_history("#a").unwrap().at(0).unwrap().actor, "3");
        assert_eq!(tracker.channel_history("#b").unwrap().len(), 1);
        assert_eq!(tracker.channel_history("#b").unwrap().at(0).unwrap().actor, "y");
    }

    #[test]
    fn clear_resets_history_but_not_counters() {
        let mut tracker = tracker_with(vec![event("#a", "timeout", "m"), event("#a", "chat", "n")]);
        tracker.update();
        tracker.clear_channel_history("#a");
        assert_eq!(tracker.channel_history("#a").unwrap().len(), 0);
        assert_eq!(tracker.total_events(), 2);
        // Clearing an unknown channel is a no-op
        tracker.clear_channel_history("#missing");
    }

    #[test]
    fn last_kind_tracks_newest_event() {
        let mut tracker = tracker_with(vec![event("#a", "chat", "m"), event("#a", "raid", "n")]);
        tracker.update();
        let (_, activity) = tracker.channels()[0];
        assert_eq!(activity.last_kind(), Some(EventKind::Raid));
    }
}
