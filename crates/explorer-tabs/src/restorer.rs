//! Recently closed tabs that can be reopened.

use chrono::{DateTime, Utc};
use explorer_tabs_core::{Location, ViewSettings};
use std::collections::VecDeque;

/// What is kept of a closed tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTab {
    pub location: Location,
    pub view: ViewSettings,
    /// Position the tab occupied when it was closed
    pub index: usize,
    pub custom_name: Option<String>,
    pub closed_at: DateTime<Utc>,
}

/// Bounded list of closed tabs, most recent first.
#[derive(Debug, Clone)]
pub struct TabRestorer {
    closed: VecDeque<ClosedTab>,
    capacity: usize,
}

impl TabRestorer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        TabRestorer {
            closed: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Remembers a closed tab, evicting the oldest entry when full.
    pub fn record(&mut self, tab: ClosedTab) {
        if self.capacity == 0 {
            return;
        }

        self.closed.push_front(tab);
        while self.closed.len() > self.capacity {
            if let Some(evicted) = self.closed.pop_back() {
                tracing::trace!("Forgot closed tab at {}", evicted.location);
            }
        }
    }

    /// Takes the most recently closed tab.
    pub fn take_most_recent(&mut self) -> Option<ClosedTab> {
        self.closed.pop_front()
    }

    #[must_use]
    pub fn most_recent(&self) -> Option<&ClosedTab> {
        self.closed.front()
    }

    /// Closed tabs, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &ClosedTab> {
        self.closed.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.closed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(path: &str, index: usize) -> ClosedTab {
        ClosedTab {
            location: Location::new(path),
            view: ViewSettings::default(),
            index,
            custom_name: None,
            closed_at: Utc::now(),
        }
    }

    #[test]
    fn test_most_recent_first() {
        let mut restorer = TabRestorer::new(5);
        restorer.record(closed("/a", 0));
        restorer.record(closed("/b", 1));

        assert_eq!(restorer.most_recent().map(|t| t.index), Some(1));
        assert_eq!(
            restorer.take_most_recent().map(|t| t.location),
            Some(Location::new("/b"))
        );
        assert_eq!(restorer.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut restorer = TabRestorer::new(2);
        restorer.record(closed("/a", 0));
        restorer.record(closed("/b", 0));
        restorer.record(closed("/c", 0));

        let kept: Vec<_> = restorer.iter().map(|t| t.location.to_string()).collect();
        assert_eq!(kept, vec!["/c", "/b"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut restorer = TabRestorer::new(0);
        restorer.record(closed("/a", 0));
        assert!(restorer.is_empty());
        assert!(restorer.take_most_recent().is_none());
    }

    #[test]
    fn test_timestamps_are_ordered() {
        let mut restorer = TabRestorer::new(3);
        restorer.record(closed("/a", 0));
        restorer.record(closed("/b", 0));

        let times: Vec<_> = restorer.iter().map(|t| t.closed_at).collect();
        assert!(times[0] >= times[1]);
    }
}
