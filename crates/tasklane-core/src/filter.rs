use std::str::FromStr;

use tasklane_shared::{TaskPriority, TaskStatus};
use uuid::Uuid;

/// Active filter predicates for the task list. Every field is optional;
/// `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub project_id: Option<Uuid>,
    pub search: Option<String>,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Collapse an empty or whitespace-only search term to `None`. A literal
    /// empty filter must never reach the server.
    pub fn normalized(mut self) -> Self {
        self.search = self.search.and_then(|raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
        self
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} filter value: {value}")]
pub struct ParseFilterError {
    kind: &'static str,
    value: String,
}

/// `FromStr` edges for filter values arriving as raw strings from a shell
/// (select inputs, CLI flags). Empty strings parse to no constraint at the
/// call site via `parse_opt`.
impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .iter()
            .find(|status| status.as_str() == value)
            .map(|status| StatusFilter(*status))
            .ok_or_else(|| ParseFilterError {
                kind: "status",
                value: value.to_string(),
            })
    }
}

impl FromStr for PriorityFilter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskPriority::ALL
            .iter()
            .find(|priority| priority.as_str() == value)
            .map(|priority| PriorityFilter(*priority))
            .ok_or_else(|| ParseFilterError {
                kind: "priority",
                value: value.to_string(),
            })
    }
}

/// Newtype wrappers so the wire enums pick up filter-flavoured parsing
/// without `tasklane_shared` growing a string edge of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter(pub TaskStatus);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityFilter(pub TaskPriority);

/// Parse an optional raw value, treating empty/whitespace input as unset.
pub fn parse_opt<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, T::Err> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
