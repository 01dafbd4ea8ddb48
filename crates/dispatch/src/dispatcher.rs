//! Central dispatcher that drives one notification from event to delivery.
//!
//! Per invocation:
//! 1. Fetch the target group — missing group aborts the whole invocation
//! 2. Resolve the user record where the event kind names one, then render
//! 3. Page the roster and deliver page by page: all sends in a page go out
//!    concurrently, a pacing pause separates pages
//!
//! Everything up through rendering is all-or-nothing; from delivery onward a
//! failed recipient is logged and skipped so the rest of the group still gets
//! the message.

use std::time::Duration;

use futures::future::join_all;

use crescendo_common::error::AppError;
use crescendo_common::types::{EventPayload, Group, User};
use crescendo_store::DocumentStore;

use crate::pager;
use crate::render;
use crate::telegram::Messenger;

pub struct Dispatcher<S, M> {
    store: S,
    messenger: M,
    page_size: usize,
    page_delay: Duration,
}

impl<S: DocumentStore, M: Messenger> Dispatcher<S, M> {
    pub fn new(store: S, messenger: M, page_size: usize, page_delay: Duration) -> Self {
        Self {
            store,
            messenger,
            page_size,
            page_delay,
        }
    }

    /// Process one inbound event end to end.
    pub async fn dispatch(&self, event: &EventPayload) -> Result<(), AppError> {
        tracing::info!(
            kind = event.kind(),
            group_id = event.group_id(),
            "Dispatching notification"
        );

        let group = self
            .store
            .get_group(event.group_id())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group {}", event.group_id())))?;

        let message = self.render_message(event, &group).await?;

        let pages = pager::paginate(&group.telegram_chat_ids, self.page_size);
        let page_count = pages.len();

        for (index, page) in pages.into_iter().enumerate() {
            let sends = page.iter().map(|chat_id| self.deliver(chat_id, &message));
            join_all(sends).await;

            if index + 1 < page_count {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        tracing::info!(
            group = %group.name,
            recipients = group.telegram_chat_ids.len(),
            pages = page_count,
            "Dispatch finished"
        );

        Ok(())
    }

    /// Resolve any user the event kind requires, then render. Pure string
    /// building lives in [`render`]; only the lookups happen here.
    async fn render_message(
        &self,
        event: &EventPayload,
        group: &Group,
    ) -> Result<String, AppError> {
        let message = match event {
            EventPayload::PeriodAboutToFinish { hours, stage, .. } => {
                render::period_about_to_finish(*hours, *stage, group)
            }
            EventPayload::EvaluationPeriodFinished { winner, .. } => {
                let user = self.require_user(winner).await?;
                render::evaluation_period_finished(group, &user)
            }
            EventPayload::UserPerformedAction { user_id, stage, .. } => {
                let user = self.require_user(user_id).await?;
                render::user_performed_action(&user, *stage, group)
            }
        };

        Ok(message)
    }

    async fn require_user(&self, user_id: &str) -> Result<User, AppError> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    /// Send to one recipient, logging and discarding the outcome. One stale
    /// or blocked chat id must not keep the rest of the page from delivering.
    async fn deliver(&self, chat_id: &str, text: &str) {
        match self.messenger.send(chat_id, text).await {
            Ok(()) => tracing::debug!(chat_id, "Message delivered"),
            Err(e) => tracing::warn!(
                chat_id,
                text,
                error = %e,
                "Failed to deliver message"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crescendo_common::types::Stage;
    use crescendo_store::MemoryStore;

    /// Messenger fake that records every send and fails for chosen chat ids.
    #[derive(Default, Clone)]
    struct RecordingMessenger {
        sent: Arc<Mutex<Vec<(String, String)>>>,
        failed: Arc<Mutex<Vec<String>>>,
        fail_for: Vec<String>,
    }

    impl RecordingMessenger {
        fn failing_for(chat_ids: &[&str]) -> Self {
            Self {
                fail_for: chat_ids.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }

        fn failures(&self) -> Vec<String> {
            self.failed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
            if self.fail_for.iter().any(|id| id == chat_id) {
                self.failed.lock().unwrap().push(chat_id.to_string());
                return Err(AppError::Internal(format!("chat {} unreachable", chat_id)));
            }
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn store_with_group(chat_ids: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_group(
            "g1",
            Group {
                name: "Indie Lovers".to_string(),
                telegram_chat_ids: chat_ids.iter().map(|s| s.to_string()).collect(),
            },
        );
        store.insert_user(
            "u1",
            User {
                display_name: "Alice".to_string(),
            },
        );
        store
    }

    fn action_event() -> EventPayload {
        EventPayload::UserPerformedAction {
            group_id: "g1".to_string(),
            user_id: "u1".to_string(),
            stage: Stage::Submission,
        }
    }

    #[tokio::test]
    async fn test_missing_group_aborts_before_any_delivery() {
        let messenger = RecordingMessenger::default();
        let dispatcher = Dispatcher::new(MemoryStore::new(), messenger.clone(), 10, Duration::ZERO);

        let result = dispatcher.dispatch(&action_event()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_user_aborts_before_any_delivery() {
        let store = store_with_group(&["c1"]);
        let messenger = RecordingMessenger::default();
        let dispatcher = Dispatcher::new(store, messenger.clone(), 10, Duration::ZERO);

        let event = EventPayload::EvaluationPeriodFinished {
            group_id: "g1".to_string(),
            winner: "ghost".to_string(),
        };
        let result = dispatcher.dispatch(&event).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_one_failing_recipient_does_not_block_the_rest() {
        let store = store_with_group(&["c1", "c2", "c3", "c4"]);
        let messenger = RecordingMessenger::failing_for(&["c2"]);
        let dispatcher = Dispatcher::new(store, messenger.clone(), 10, Duration::ZERO);

        dispatcher.dispatch(&action_event()).await.unwrap();

        assert_eq!(messenger.failures(), vec!["c2".to_string()]);
        let reached: Vec<String> = messenger.sent().into_iter().map(|(id, _)| id).collect();
        assert_eq!(reached, vec!["c1", "c3", "c4"]);
    }

    #[tokio::test]
    async fn test_pages_delivered_in_roster_order() {
        let roster = ["c1", "c2", "c3", "c4", "c5"];
        let store = store_with_group(&roster);
        let messenger = RecordingMessenger::default();
        let dispatcher = Dispatcher::new(store, messenger.clone(), 2, Duration::ZERO);

        dispatcher.dispatch(&action_event()).await.unwrap();

        let reached: Vec<String> = messenger.sent().into_iter().map(|(id, _)| id).collect();
        assert_eq!(reached, roster.map(String::from));
    }

    #[tokio::test]
    async fn test_empty_roster_completes_without_sends() {
        let store = store_with_group(&[]);
        let messenger = RecordingMessenger::default();
        let dispatcher = Dispatcher::new(store, messenger.clone(), 10, Duration::ZERO);

        dispatcher.dispatch(&action_event()).await.unwrap();

        assert!(messenger.sent().is_empty());
    }
}
