use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tasklane_core::api::{ApiError, TaskApi};
use tasklane_core::query::TaskQuery;
use tasklane_shared::{
    BulkDeleteRequest, BulkUpdateRequest, ServerMessage, TaskListResponse, TaskStats,
};
use tracing::debug;

use crate::config::{ConfigError, HttpConfig};

/// `TaskApi` over the REST backend. One instance per shell; cheap to clone
/// (reqwest clients share their pool).
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTaskApi {
    pub fn new(config: &HttpConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the server's own message; fall back to the status line.
            let message = response
                .json::<ServerMessage>()
                .await
                .map(|body| body.message)
                .unwrap_or_default();
            let message = if message.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                message
            };
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_my_tasks(&self, query: &TaskQuery) -> Result<TaskListResponse, ApiError> {
        debug!(page = query.page, limit = query.limit, "GET /tasks/my-tasks");
        let request = self
            .http
            .get(self.url("tasks/my-tasks"))
            .query(&query.query_pairs());
        self.send(request).await
    }

    async fn my_task_stats(&self) -> Result<TaskStats, ApiError> {
        debug!("GET /tasks/my-tasks/stats");
        let request = self.http.get(self.url("tasks/my-tasks/stats"));
        self.send(request).await
    }

    async fn bulk_update(&self, body: &BulkUpdateRequest) -> Result<ServerMessage, ApiError> {
        debug!(count = body.task_ids.len(), "PUT /tasks/bulk-update");
        let request = self.http.put(self.url("tasks/bulk-update")).json(body);
        self.send(request).await
    }

    async fn bulk_delete(&self, body: &BulkDeleteRequest) -> Result<ServerMessage, ApiError> {
        debug!(count = body.task_ids.len(), "DELETE /tasks/bulk-delete");
        let request = self.http.delete(self.url("tasks/bulk-delete")).json(body);
        self.send(request).await
    }
}
