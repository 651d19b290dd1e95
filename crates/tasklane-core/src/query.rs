use serde::Serialize;
use tasklane_shared::{TaskPriority, TaskStatus};
use uuid::Uuid;

use crate::filter::TaskFilters;
use crate::page::PageState;
use crate::sort::{SortField, SortOrder, SortState};

/// The canonical request descriptor for `GET /tasks/my-tasks`. Page, limit
/// and sort are always present; filter fields appear only when constrained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(serialize_with = "serialize_sort_field")]
    pub sort_by: SortField,
    #[serde(serialize_with = "serialize_sort_order")]
    pub sort_order: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

fn serialize_sort_field<S: serde::Serializer>(
    field: &SortField,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(field.as_param())
}

fn serialize_sort_order<S: serde::Serializer>(
    order: &SortOrder,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(order.as_param())
}

/// Pure composition of the three independent state slices. Callers issue the
/// request; composing has no side effects.
pub fn compose(filters: &TaskFilters, sort: &SortState, page: &PageState) -> TaskQuery {
    let filters = filters.clone().normalized();
    TaskQuery {
        page: page.page,
        limit: page.limit.as_u32(),
        sort_by: sort.field,
        sort_order: sort.order,
        status: filters.status,
        priority: filters.priority,
        project_id: filters.project_id,
        search: filters.search,
    }
}

impl TaskQuery {
    /// Wire key/value pairs in a stable order. Unset filters contribute no
    /// pair at all, never an empty value.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort_by", self.sort_by.as_param().to_string()),
            ("sort_order", self.sort_order.as_param().to_string()),
        ];
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(project_id) = self.project_id {
            pairs.push(("project_id", project_id.to_string()));
        }
        if let Some(search) = self.search.as_deref() {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageLimit;

    #[test]
    fn composes_only_constrained_filter_fields() {
        let filters = TaskFilters {
            status: Some(TaskStatus::InProgress),
            ..TaskFilters::default()
        };
        let sort = SortState {
            field: SortField::DueDate,
            order: SortOrder::Asc,
        };
        let page = PageState {
            page: 1,
            limit: PageLimit::Twenty,
            ..PageState::default()
        };

        let query = compose(&filters, &sort, &page);
        let pairs = query.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
                ("sort_by", "due_date".to_string()),
                ("sort_order", "ASC".to_string()),
                ("status", "in_progress".to_string()),
            ]
        );
        assert!(pairs.iter().all(|(key, _)| *key != "priority"));
        assert!(pairs.iter().all(|(key, _)| *key != "project_id"));
        assert!(pairs.iter().all(|(key, _)| *key != "search"));
    }

    #[test]
    fn blank_search_is_never_composed() {
        let filters = TaskFilters {
            search: Some("  ".to_string()),
            ..TaskFilters::default()
        };
        let query = compose(&filters, &SortState::default(), &PageState::default());
        assert_eq!(query.search, None);
        assert!(query.query_pairs().iter().all(|(key, _)| *key != "search"));
    }

    #[test]
    fn serializes_without_unset_keys() {
        let query = compose(
            &TaskFilters::default(),
            &SortState::default(),
            &PageState::default(),
        );
        let value = serde_json::to_value(&query).expect("serialize query");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 4);
        assert_eq!(object["sort_by"], "updated_at");
        assert_eq!(object["sort_order"], "DESC");
    }
}
