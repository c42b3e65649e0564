use crate::modules::reservations::core::intents::ReservationIntent;
use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};

pub const NOTIFICATION_EVENT_TYPE: &str = "ReservationNotification";

/// Translate a list of domain intents into outbox rows and enqueue them.
/// `starting_version` is the stream version before the commit.
/// Each intent corresponds to one new version: starting_version + index + 1.
pub async fn dispatch_intents(
    outbox: &impl DomainOutbox,
    stream_id: &str,
    starting_version: i64,
    intents: Vec<ReservationIntent>,
) -> Result<(), OutboxError> {
    for (i, intent) in intents.into_iter().enumerate() {
        let stream_version = starting_version + i as i64 + 1;
        let payload = serde_json::to_value(intent.payload())
            .map_err(|e| OutboxError::Validation(e.to_string()))?;
        outbox
            .enqueue(OutboxRow {
                topic: intent.topic().to_string(),
                event_type: NOTIFICATION_EVENT_TYPE.to_string(),
                event_version: 1,
                stream_id: stream_id.to_string(),
                stream_version,
                occurred_at: intent
                    .payload()
                    .occurred_at
                    .and_utc()
                    .timestamp_millis(),
                payload,
            })
            .await?;
    }
    Ok(())
}
