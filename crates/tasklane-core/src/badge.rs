use chrono::{DateTime, Duration, Utc};
use tasklane_shared::Task;

/// Look-ahead window for the due-soon badge.
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

/// Presentation flag derived from a task's due date at render time. A task
/// carries at most one badge, so overdue and due-soon can never both hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBadge {
    Overdue,
    DueSoon,
}

impl DueBadge {
    /// Derive the badge for `task` at instant `now`. Closed tasks
    /// (completed or cancelled) never carry a badge, nor do tasks without a
    /// due date. Nothing is persisted; callers re-derive on every render.
    pub fn derive(task: &Task, now: DateTime<Utc>) -> Option<Self> {
        if task.status.is_closed() {
            return None;
        }
        let due = task.due_date?;
        if due < now {
            Some(Self::Overdue)
        } else if due < now + Duration::days(DUE_SOON_WINDOW_DAYS) {
            Some(Self::DueSoon)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use tasklane_shared::{TaskPriority, TaskStatus};
    use uuid::Uuid;

    use super::*;

    fn task(status: TaskStatus, due: Option<DateTime<Utc>>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "ship release".to_string(),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            due_date: due,
            project_id: None,
            project_name: None,
            tags: vec![],
            estimated_hours: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn yesterday_and_open_is_overdue() {
        let now = Utc::now();
        let subject = task(TaskStatus::Todo, Some(now - Duration::days(1)));
        assert_eq!(DueBadge::derive(&subject, now), Some(DueBadge::Overdue));
    }

    #[test]
    fn two_days_out_and_open_is_due_soon() {
        let now = Utc::now();
        let subject = task(TaskStatus::InProgress, Some(now + Duration::days(2)));
        assert_eq!(DueBadge::derive(&subject, now), Some(DueBadge::DueSoon));
    }

    #[test]
    fn outside_the_window_has_no_badge() {
        let now = Utc::now();
        let subject = task(TaskStatus::Todo, Some(now + Duration::days(4)));
        assert_eq!(DueBadge::derive(&subject, now), None);
    }

    #[test]
    fn closed_tasks_never_carry_a_badge() {
        let now = Utc::now();
        let overdue_done = task(TaskStatus::Completed, Some(now - Duration::days(10)));
        assert_eq!(DueBadge::derive(&overdue_done, now), None);
        let overdue_cancelled = task(TaskStatus::Cancelled, Some(now - Duration::days(10)));
        assert_eq!(DueBadge::derive(&overdue_cancelled, now), None);
    }

    #[test]
    fn no_due_date_means_no_badge() {
        let now = Utc::now();
        assert_eq!(DueBadge::derive(&task(TaskStatus::Todo, None), now), None);
    }
}
