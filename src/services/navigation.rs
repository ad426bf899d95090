//! Navigation history port
//!
//! The visible location carries at most one settings token. Every entry
//! may also hold a [`HistoryState`]: the seed and token it was pushed
//! with, which is what moving back or forward restores.

/// State attached to a history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub seed: String,
    /// Settings token; `None` for entries pushed without one
    pub settings: Option<String>,
}

pub trait Navigator: Send {
    /// Token of the visible location, if any
    fn current_token(&self) -> Option<String>;

    /// Add an entry showing `state.settings` as the visible token.
    fn push(&mut self, state: HistoryState);

    /// Add an entry without a token that keeps the current entry's state.
    fn push_cleared(&mut self);

    /// Drop the visible token in place, without adding an entry.
    fn replace_cleared(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Location {
    token: Option<String>,
    state: Option<HistoryState>,
}

/// Browser-style history kept in memory
#[derive(Debug, Clone)]
pub struct InMemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl InMemoryHistory {
    /// A history with one entry showing `token`
    pub fn new(token: Option<String>) -> Self {
        Self {
            entries: vec![Location { token, state: None }],
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move one entry back; returns the state to restore.
    pub fn back(&mut self) -> Option<Option<HistoryState>> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].state.clone())
    }

    /// Move one entry forward; returns the state to restore.
    pub fn forward(&mut self) -> Option<Option<HistoryState>> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].state.clone())
    }

    fn push_location(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Navigator for InMemoryHistory {
    fn current_token(&self) -> Option<String> {
        self.entries.get(self.index).and_then(|l| l.token.clone())
    }

    fn push(&mut self, state: HistoryState) {
        self.push_location(Location {
            token: state.settings.clone(),
            state: Some(state),
        });
    }

    fn push_cleared(&mut self) {
        let state = self.entries.get(self.index).and_then(|l| l.state.clone());
        self.push_location(Location { token: None, state });
    }

    fn replace_cleared(&mut self) {
        if let Some(location) = self.entries.get_mut(self.index) {
            location.token = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(seed: &str, token: &str) -> HistoryState {
        HistoryState {
            seed: seed.to_string(),
            settings: Some(token.to_string()),
        }
    }

    #[test]
    fn test_push_and_walk() {
        let mut history = InMemoryHistory::new(None);
        history.push(state("a", "ta"));
        history.push(state("b", "tb"));
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_token().as_deref(), Some("tb"));

        assert_eq!(history.back(), Some(Some(state("a", "ta"))));
        assert_eq!(history.current_token().as_deref(), Some("ta"));
        assert_eq!(history.back(), Some(None));
        assert_eq!(history.back(), None);

        assert_eq!(history.forward(), Some(Some(state("a", "ta"))));
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = InMemoryHistory::new(None);
        history.push(state("a", "ta"));
        history.push(state("b", "tb"));
        history.back();
        history.push(state("c", "tc"));
        assert_eq!(history.len(), 3);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_cleared_entries() {
        let mut history = InMemoryHistory::new(Some("start".to_string()));
        assert_eq!(history.current_token().as_deref(), Some("start"));

        history.replace_cleared();
        assert_eq!(history.current_token(), None);
        assert_eq!(history.len(), 1);

        history.push(state("a", "ta"));
        history.push_cleared();
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_token(), None);
        // the cleared entry keeps the state it was pushed from
        assert_eq!(history.back(), Some(Some(state("a", "ta"))));
    }
}
