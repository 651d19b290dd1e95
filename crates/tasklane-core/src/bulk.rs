use chrono::{DateTime, Utc};
use tasklane_shared::{TaskPatch, TaskPriority, TaskStatus};
use uuid::Uuid;

use crate::api::ApiError;

/// One mutation applied identically to every selected task. A tagged union
/// rather than a free-form key/value map, so an invalid payload shape is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    Status(TaskStatus),
    Priority(TaskPriority),
    /// `None` unassigns.
    Assignee(Option<Uuid>),
    /// `None` clears the deadline.
    DueDate(Option<DateTime<Utc>>),
    Delete,
}

impl BulkAction {
    /// Wire payload for the update actions; `Delete` travels on its own
    /// endpoint and has no patch.
    pub fn to_patch(&self) -> Option<TaskPatch> {
        match self {
            Self::Status(status) => Some(TaskPatch {
                status: Some(*status),
                ..TaskPatch::default()
            }),
            Self::Priority(priority) => Some(TaskPatch {
                priority: Some(*priority),
                ..TaskPatch::default()
            }),
            Self::Assignee(assignee) => Some(TaskPatch {
                assignee_id: Some(*assignee),
                ..TaskPatch::default()
            }),
            Self::DueDate(due) => Some(TaskPatch {
                due_date: Some(*due),
                ..TaskPatch::default()
            }),
            Self::Delete => None,
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Status(_) => "set status",
            Self::Priority(_) => "set priority",
            Self::Assignee(Some(_)) => "assign",
            Self::Assignee(None) => "unassign",
            Self::DueDate(Some(_)) => "set due date",
            Self::DueDate(None) => "clear due date",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BulkError {
    #[error("no tasks selected")]
    EmptySelection,
    #[error("bulk {action} failed: {source}")]
    Request {
        action: &'static str,
        source: ApiError,
    },
    /// The mutation itself succeeded but the follow-up refetch did not; the
    /// rendered page may be out of date until the next refresh.
    #[error("bulk {action} applied, but refreshing the list failed: {source}")]
    Refresh {
        action: &'static str,
        source: ApiError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_actions_lower_to_single_field_patches() {
        let patch = BulkAction::Status(TaskStatus::Completed)
            .to_patch()
            .expect("patch");
        assert_eq!(patch.status, Some(TaskStatus::Completed));
        assert_eq!(patch.priority, None);
        assert_eq!(patch.due_date, None);

        let patch = BulkAction::Assignee(None).to_patch().expect("patch");
        assert_eq!(patch.assignee_id, Some(None), "unassign is an explicit null");
    }

    #[test]
    fn unassign_serializes_to_explicit_null() {
        let patch = BulkAction::Assignee(None).to_patch().expect("patch");
        let value = serde_json::to_value(&patch).expect("serialize");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert!(object["assignee_id"].is_null());
    }

    #[test]
    fn delete_carries_no_patch() {
        assert_eq!(BulkAction::Delete.to_patch(), None);
        assert!(BulkAction::Delete.is_destructive());
        assert!(!BulkAction::Status(TaskStatus::Todo).is_destructive());
    }
}
