//! Visibility lifecycle for screens and their owners
//!
//! A [`Lifecycle`] is a cloneable handle over a `watch` channel so any number
//! of observers can read the current state or wait for transitions without
//! locking. `Destroyed` is terminal.

use std::sync::Arc;

use tokio::sync::watch;

/// Ordered lifecycle states; observers compare with [`Lifecycle::is_at_least`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    Destroyed,
    Initialized,
    Created,
    Started,
    Resumed,
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    sender: Arc<watch::Sender<LifecycleState>>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(LifecycleState::Initialized);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> LifecycleState {
        *self.sender.borrow()
    }

    pub fn is_at_least(&self, state: LifecycleState) -> bool {
        self.current() >= state
    }

    pub fn is_destroyed(&self) -> bool {
        self.current() == LifecycleState::Destroyed
    }

    /// Move to `state`. Ignored once destroyed.
    pub fn move_to(&self, state: LifecycleState) {
        self.sender.send_if_modified(|current| {
            if *current == LifecycleState::Destroyed || *current == state {
                return false;
            }
            tracing::trace!(from = ?*current, to = ?state, "lifecycle transition");
            *current = state;
            true
        });
    }

    pub fn start(&self) {
        self.move_to(LifecycleState::Started);
    }

    /// Drop back below `Started` without tearing down
    pub fn stop(&self) {
        self.move_to(LifecycleState::Created);
    }

    pub fn destroy(&self) {
        self.move_to(LifecycleState::Destroyed);
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_ordered() {
        assert!(LifecycleState::Resumed > LifecycleState::Started);
        assert!(LifecycleState::Started > LifecycleState::Created);
        assert!(LifecycleState::Destroyed < LifecycleState::Initialized);
    }

    #[test]
    fn test_stop_falls_below_started() {
        let lifecycle = Lifecycle::new();
        lifecycle.start();
        assert!(lifecycle.is_at_least(LifecycleState::Started));
        lifecycle.stop();
        assert!(!lifecycle.is_at_least(LifecycleState::Started));
        assert_eq!(lifecycle.current(), LifecycleState::Created);
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let lifecycle = Lifecycle::new();
        lifecycle.destroy();
        lifecycle.start();
        assert!(lifecycle.is_destroyed());
    }

    #[test]
    fn test_clones_share_state() {
        let lifecycle = Lifecycle::new();
        let other = lifecycle.clone();
        other.start();
        assert_eq!(lifecycle.current(), LifecycleState::Started);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let lifecycle = Lifecycle::new();
        let mut rx = lifecycle.subscribe();
        lifecycle.start();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), LifecycleState::Started);
    }
}
