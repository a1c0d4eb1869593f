use crate::api::types::ApiResult;
use crate::models::{Property, PropertyId, PropertyInput};
use async_trait::async_trait;

/// The listing backend's CRUD contract.
/// Implemented over HTTP for real use and in memory for tests.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Fetch the whole collection, in the backend's order
    async fn list(&self) -> ApiResult<Vec<Property>>;

    /// Fetch a single property
    async fn get(&self, id: PropertyId) -> ApiResult<Property>;

    /// Persist a new property; the backend assigns the id
    async fn create(&self, input: &PropertyInput) -> ApiResult<Property>;

    /// Overwrite the fields of an existing property
    async fn update(&self, id: PropertyId, input: &PropertyInput) -> ApiResult<Property>;

    async fn delete(&self, id: PropertyId) -> ApiResult<()>;

    /// Where requests go, for log lines
    fn endpoint(&self) -> &str;
}
