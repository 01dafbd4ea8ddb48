use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Phase of a group's recurring round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Submission,
    Evaluation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Submission => write!(f, "submission"),
            Stage::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// Inbound notification event.
///
/// Internally tagged so the wire shape stays `{ "type": ..., "params": ... }`.
/// The params live on the variant itself, so a payload whose params don't
/// match its type cannot be constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "camelCase")]
pub enum EventPayload {
    #[serde(rename_all = "camelCase")]
    PeriodAboutToFinish {
        hours: u32,
        stage: Stage,
        group_id: String,
    },
    #[serde(rename_all = "camelCase")]
    EvaluationPeriodFinished { group_id: String, winner: String },
    #[serde(rename_all = "camelCase")]
    UserPerformedAction {
        group_id: String,
        user_id: String,
        stage: Stage,
    },
}

impl EventPayload {
    /// The target group, present on every event kind.
    pub fn group_id(&self) -> &str {
        match self {
            EventPayload::PeriodAboutToFinish { group_id, .. } => group_id,
            EventPayload::EvaluationPeriodFinished { group_id, .. } => group_id,
            EventPayload::UserPerformedAction { group_id, .. } => group_id,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            EventPayload::PeriodAboutToFinish { .. } => "period_about_to_finish",
            EventPayload::EvaluationPeriodFinished { .. } => "evaluation_period_finished",
            EventPayload::UserPerformedAction { .. } => "user_performed_action",
        }
    }
}

/// A group record as stored in the external document store.
///
/// Read-only, request-scoped copy; the store owns the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    /// Telegram chat ids of every member roster entry. May be empty, and may
    /// contain stale ids of members that blocked the bot.
    #[serde(default)]
    pub telegram_chat_ids: Vec<String>,
}

/// A user record from the external document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub display_name: String,
}

/// Envelope wrapped around an [`EventPayload`] on the notification queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEnvelope {
    pub id: Uuid,
    pub enqueued_at: DateTime<Utc>,
    pub payload: EventPayload,
}

impl QueueEnvelope {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            enqueued_at: Utc::now(),
            payload,
        }
    }
}
