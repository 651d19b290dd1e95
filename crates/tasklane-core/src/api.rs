use async_trait::async_trait;
use tasklane_shared::{
    BulkDeleteRequest, BulkUpdateRequest, ServerMessage, TaskListResponse, TaskStats,
};

use crate::query::TaskQuery;

/// Errors surfaced by a [`TaskApi`] implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server returned {code}: {message}")]
    Status { code: u16, message: String },
    #[error("failed to decode server response: {0}")]
    Decode(String),
}

/// The backend seam the controller talks through. Injected explicitly so a
/// shell owns exactly one client handle and tests can substitute an
/// in-memory implementation.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /tasks/my-tasks` with the composed query descriptor.
    async fn list_my_tasks(&self, query: &TaskQuery) -> Result<TaskListResponse, ApiError>;

    /// `GET /tasks/my-tasks/stats`.
    async fn my_task_stats(&self) -> Result<TaskStats, ApiError>;

    /// `PUT /tasks/bulk-update`.
    async fn bulk_update(&self, request: &BulkUpdateRequest) -> Result<ServerMessage, ApiError>;

    /// `DELETE /tasks/bulk-delete`.
    async fn bulk_delete(&self, request: &BulkDeleteRequest) -> Result<ServerMessage, ApiError>;
}
