use api_types::entry::{Entry, entries_from_json};

use crate::{
    categories::CategoryLookup,
    client::{ClientError, Transport},
};

const API_PATH: &str = "entries";

/// Network access for entries.
///
/// Writes resolve the entry's category first and embed it in the payload, so
/// the backend always stores the denormalized category next to the entry.
#[derive(Debug, Clone)]
pub struct EntryService<T, C> {
    transport: T,
    categories: C,
}

fn log_failure(err: &ClientError) {
    tracing::error!("request failed: {err}");
}

impl<T: Transport + Sync, C: CategoryLookup + Sync> EntryService<T, C> {
    pub fn new(transport: T, categories: C) -> Self {
        Self {
            transport,
            categories,
        }
    }

    pub fn categories(&self) -> &C {
        &self.categories
    }

    pub async fn get_all(&self) -> Result<Vec<Entry>, ClientError> {
        let data = self.transport.get(API_PATH).await.inspect_err(log_failure)?;
        Ok(entries_from_json(&data)?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Entry, ClientError> {
        let data = self
            .transport
            .get(&format!("{API_PATH}/{id}"))
            .await
            .inspect_err(log_failure)?;
        Ok(Entry::from_json(&data)?)
    }

    /// Creates the entry and returns the record the backend stored.
    ///
    /// Any `id` carried by `entry` is dropped.
    pub async fn create(&self, entry: Entry) -> Result<Entry, ClientError> {
        let mut entry = self.with_category(entry).await?;
        entry.id = None;

        let body = serde_json::to_value(&entry)?;
        let data = self
            .transport
            .post(API_PATH, &body)
            .await
            .inspect_err(log_failure)?;
        Ok(Entry::from_json(&data)?)
    }

    /// Updates the entry and returns the enriched local copy.
    pub async fn update(&self, entry: Entry) -> Result<Entry, ClientError> {
        let entry = self.with_category(entry).await?;

        let body = serde_json::to_value(&entry)?;
        self.transport
            .put(API_PATH, &body)
            .await
            .inspect_err(log_failure)?;
        Ok(entry)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.transport
            .delete(&format!("{API_PATH}/{id}"))
            .await
            .inspect_err(log_failure)
    }

    async fn with_category(&self, mut entry: Entry) -> Result<Entry, ClientError> {
        let category = self.categories.get_by_id(entry.category_id).await?;
        entry.category = Some(category);
        Ok(entry)
    }
}
