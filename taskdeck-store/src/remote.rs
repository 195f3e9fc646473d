//! Remote task store client.
//!
//! Contract: four operations, each a single network round-trip that decodes
//! the JSON body or fails on transport error / non-success status. No retry,
//! no backoff, no idempotency key, no UI side effects.

use anyhow::{Context, Result};
use taskdeck_core::{NewTask, Task};

/// The four REST verbs the board controller needs.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<Task>>;

    /// Create a record; the server assigns the id.
    async fn create(&self, new: &NewTask) -> Result<Task>;

    /// Replace a record in full.
    async fn replace(&self, id: &str, task: &Task) -> Result<Task>;

    /// Delete a record.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// reqwest-backed store against a REST collection:
/// GET {base}, POST {base}, PUT {base}/{id}, DELETE {base}/{id}.
#[derive(Debug, Clone)]
pub struct RemoteTaskStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteTaskStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url)
    }
}

impl TaskStore for RemoteTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        let tasks = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .context("listing tasks")?
            .error_for_status()
            .context("listing tasks")?
            .json()
            .await
            .context("decoding task list")?;
        Ok(tasks)
    }

    async fn create(&self, new: &NewTask) -> Result<Task> {
        let created = self
            .client
            .post(&self.base_url)
            .json(new)
            .send()
            .await
            .context("creating task")?
            .error_for_status()
            .context("creating task")?
            .json()
            .await
            .context("decoding created task")?;
        Ok(created)
    }

    async fn replace(&self, id: &str, task: &Task) -> Result<Task> {
        let updated = self
            .client
            .put(self.item_url(id))
            .json(task)
            .send()
            .await
            .with_context(|| format!("updating task {id}"))?
            .error_for_status()
            .with_context(|| format!("updating task {id}"))?
            .json()
            .await
            .context("decoding updated task")?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        // The store returns no meaningful body for deletes.
        self.client
            .delete(self.item_url(id))
            .send()
            .await
            .with_context(|| format!("deleting task {id}"))?
            .error_for_status()
            .with_context(|| format!("deleting task {id}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_url_joins_base_and_id() {
        let s = RemoteTaskStore::new(reqwest::Client::new(), "https://example.test/Api/");
        assert_eq!(s.item_url("42"), "https://example.test/Api/42");
    }

    #[test]
    fn create_payload_has_no_id_field() {
        let new = NewTask::at(
            "Buy milk".to_string(),
            String::new(),
            taskdeck_core::Priority::Low,
            chrono::Utc::now(),
        );
        let v = serde_json::to_value(&new).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["completed"], false);
        assert!(v.get("createdAt").is_some());
    }
}
