use std::sync::Arc;

use tokio::sync::watch;

use mentor_core::model::ProgressSnapshot;

/// Receives a fresh snapshot after every change to quiz progress.
pub trait ProgressSink: Send + Sync {
    fn render(&self, snapshot: &ProgressSnapshot);
}

/// `ProgressSink` that publishes the latest snapshot to any number of watchers.
#[derive(Debug, Clone)]
pub struct ProgressChannel {
    tx: Arc<watch::Sender<ProgressSnapshot>>,
}

impl ProgressChannel {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ProgressSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.tx.subscribe()
    }

    /// Last published snapshot.
    #[must_use]
    pub fn current(&self) -> ProgressSnapshot {
        self.tx.borrow().clone()
    }
}

impl Default for ProgressChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressChannel {
    fn render(&self, snapshot: &ProgressSnapshot) {
        // Works with no receivers, unlike `send`.
        self.tx.send_replace(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::model::{LessonId, MasteryState};

    #[test]
    fn starts_at_zero_progress() {
        let channel = ProgressChannel::new();
        assert_eq!(channel.current().percent, 0);
    }

    #[tokio::test]
    async fn subscribers_see_rendered_snapshots() {
        let channel = ProgressChannel::new();
        let mut rx = channel.subscribe();

        let mut mastery = MasteryState::default();
        mastery.mark_lesson_passed(LessonId::VectorsMotion);
        channel.render(&mastery.snapshot());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().percent, 30);
        assert_eq!(channel.current(), mastery.snapshot());
    }
}
