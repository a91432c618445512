use std::future::Future;

use api_types::category::{Category, categories_from_json};

use crate::client::{ClientError, Transport};

const API_PATH: &str = "categories";

/// Read-only access to categories.
pub trait CategoryLookup {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, ClientError>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Category, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct CategoryService<T> {
    transport: T,
}

impl<T> CategoryService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: Transport + Sync> CategoryLookup for CategoryService<T> {
    async fn get_all(&self) -> Result<Vec<Category>, ClientError> {
        let data = self
            .transport
            .get(API_PATH)
            .await
            .inspect_err(|err| tracing::error!("request failed: {err}"))?;
        Ok(categories_from_json(&data)?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Category, ClientError> {
        let data = self
            .transport
            .get(&format!("{API_PATH}/{id}"))
            .await
            .inspect_err(|err| tracing::error!("request failed: {err}"))?;
        Ok(Category::from_json(&data)?)
    }
}
