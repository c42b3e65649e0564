use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};
use std::collections::HashSet;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryDomainOutbox {
    pub rows: Mutex<Vec<OutboxRow>>,
    seen: Mutex<HashSet<(String, i64)>>,
    offline: bool,
}

impl InMemoryDomainOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    pub async fn topics(&self) -> Vec<String> {
        self.rows
            .lock()
            .await
            .iter()
            .map(|row| row.topic.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl DomainOutbox for InMemoryDomainOutbox {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        if self.offline {
            return Err(OutboxError::Backend("Outbox offline".into()));
        }
        let key = (row.stream_id.clone(), row.stream_version);
        {
            let mut s = self.seen.lock().await;
            if !s.insert(key) {
                return Err(OutboxError::Duplicate {
                    stream_id: row.stream_id,
                    stream_version: row.stream_version,
                });
            }
        }
        self.rows.lock().await.push(row);
        Ok(())
    }
}
