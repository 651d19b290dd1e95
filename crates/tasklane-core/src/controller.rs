use std::sync::Arc;

use chrono::{DateTime, Utc};
use tasklane_shared::{BulkDeleteRequest, BulkUpdateRequest, Task, TaskListResponse, TaskStats};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::api::{ApiError, TaskApi};
use crate::badge::DueBadge;
use crate::bulk::{BulkAction, BulkError};
use crate::filter::TaskFilters;
use crate::notice::NoticeLog;
use crate::page::{PageLimit, PageState};
use crate::query::{self, TaskQuery};
use crate::selection::SelectionSet;
use crate::sort::{SortField, SortState};

/// Handle for one issued fetch. Carries the sequence number that decides
/// whether its response is still the newest when it lands.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: TaskQuery,
}

/// What became of a fetch response once offered to the controller.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The response was the newest issued request and is now rendered.
    Applied,
    /// A newer request was issued while this one was in flight; the
    /// response was discarded without touching any state.
    Stale,
    /// The newest request failed; previous page stays rendered for retry.
    Failed(ApiError),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Owns the list view's state slices and drives them against an injected
/// [`TaskApi`] handle. All mutators are synchronous; only the fetch/bulk
/// round trips await the network.
pub struct TaskListController {
    api: Arc<dyn TaskApi>,
    filters: TaskFilters,
    sort: SortState,
    page: PageState,
    selection: SelectionSet,
    tasks: Vec<Task>,
    stats: Option<TaskStats>,
    issued_seq: u64,
    loading: bool,
    notices: NoticeLog,
}

impl TaskListController {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            filters: TaskFilters::default(),
            sort: SortState::default(),
            page: PageState::default(),
            selection: SelectionSet::default(),
            tasks: Vec::new(),
            stats: None,
            issued_seq: 0,
            loading: false,
            notices: NoticeLog::default(),
        }
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn stats(&self) -> Option<&TaskStats> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notices(&mut self) -> &mut NoticeLog {
        &mut self.notices
    }

    /// Rows paired with their render-time badge.
    pub fn badged_rows(&self, now: DateTime<Utc>) -> Vec<(&Task, Option<DueBadge>)> {
        self.tasks
            .iter()
            .map(|task| (task, DueBadge::derive(task, now)))
            .collect()
    }

    // --- state mutators: filter/sort changes invalidate pagination ---

    /// Replace the filter set. Any change invalidates the current page.
    pub fn set_filters(&mut self, filters: TaskFilters) {
        let filters = filters.normalized();
        if filters != self.filters {
            debug!(?filters, "filters changed, resetting to page 1");
            self.filters = filters;
            self.page.reset_page();
        }
    }

    /// Column-header click; same-field toggle / new-field ASC, and back to
    /// page 1 either way.
    pub fn select_sort(&mut self, field: SortField) {
        self.sort.select(field);
        self.page.reset_page();
    }

    /// Explicit sort assignment (CLI flags). Same page-reset rule.
    pub fn set_sort(&mut self, sort: SortState) {
        if sort != self.sort {
            self.sort = sort;
            self.page.reset_page();
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.page.set_page(page);
    }

    pub fn set_limit(&mut self, limit: PageLimit) {
        self.page.set_limit(limit);
    }

    // --- selection (page-scoped) ---

    pub fn toggle_select(&mut self, id: Uuid) {
        if self.tasks.iter().any(|task| task.id == id) {
            self.selection.toggle(id);
        }
    }

    pub fn select_all(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_page(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn visible_ids(&self) -> Vec<Uuid> {
        self.tasks.iter().map(|task| task.id).collect()
    }

    // --- fetching (last request wins) ---

    /// Current query descriptor; pure, issues nothing.
    pub fn query(&self) -> TaskQuery {
        query::compose(&self.filters, &self.sort, &self.page)
    }

    /// Issue a new fetch. Supersedes every ticket issued before it.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        self.loading = true;
        let ticket = FetchTicket {
            seq: self.issued_seq,
            query: self.query(),
        };
        debug!(seq = ticket.seq, "issued list fetch");
        ticket
    }

    /// Offer a fetch response back. Only the newest issued ticket may touch
    /// state; anything older is discarded (last request wins).
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<(TaskListResponse, TaskStats), ApiError>,
    ) -> FetchOutcome {
        if seq != self.issued_seq {
            debug!(seq, latest = self.issued_seq, "discarding stale fetch response");
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok((list, stats)) => {
                self.page.apply_meta(&list.pagination);
                self.tasks = list.tasks;
                self.stats = Some(stats);
                let visible = self.visible_ids();
                self.selection.retain_visible(&visible);
                debug!(
                    seq,
                    rows = self.tasks.len(),
                    page = self.page.page,
                    "applied list fetch"
                );
                FetchOutcome::Applied
            }
            Err(err) => {
                error!(seq, error = %err, "list fetch failed");
                self.notices.error(format!("failed to load tasks: {err}"));
                FetchOutcome::Failed(err)
            }
        }
    }

    /// One full round trip: list and stats are fetched under the same
    /// ticket and applied atomically, so the two views cannot diverge.
    ///
    /// If the result set shrank and the requested page was clamped down
    /// (e.g. page 4 requested, server now reports 3 pages), the returned
    /// rows belong to a page past the end; one follow-up fetch at the
    /// clamped page replaces them.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = self.fetch_snapshot(&ticket.query).await;
        let outcome = self.apply_fetch(ticket.seq, result);

        if outcome.is_applied() && self.page.page != ticket.query.page {
            debug!(
                requested = ticket.query.page,
                clamped = self.page.page,
                "page clamped by a shrunken result set, refetching"
            );
            let ticket = self.begin_fetch();
            let result = self.fetch_snapshot(&ticket.query).await;
            return self.apply_fetch(ticket.seq, result);
        }
        outcome
    }

    async fn fetch_snapshot(
        &self,
        query: &TaskQuery,
    ) -> Result<(TaskListResponse, TaskStats), ApiError> {
        let list = self.api.list_my_tasks(query).await?;
        let stats = self.api.my_task_stats().await?;
        Ok((list, stats))
    }

    // --- bulk application ---

    /// Apply `action` to the whole selection in one request. Confirmation
    /// for destructive actions is the caller's precondition.
    pub async fn bulk(&mut self, action: BulkAction) -> Result<(), BulkError> {
        let task_ids = self.selection.ids();
        if task_ids.is_empty() {
            self.notices.error("no tasks selected");
            return Err(BulkError::EmptySelection);
        }

        let described = action.describe();
        info!(action = described, count = task_ids.len(), "applying bulk action");

        let sent = match action.to_patch() {
            Some(updates) => {
                let request = BulkUpdateRequest { task_ids, updates };
                self.api.bulk_update(&request).await
            }
            None => {
                let request = BulkDeleteRequest { task_ids };
                self.api.bulk_delete(&request).await
            }
        };

        match sent {
            Ok(reply) => {
                self.selection.clear();
                if reply.message.is_empty() {
                    self.notices.info(format!("bulk {described} applied"));
                } else {
                    self.notices.info(reply.message);
                }
                // List and stats are views over the same collection; both
                // are refetched together after any successful write.
                match self.refresh().await {
                    FetchOutcome::Failed(source) => Err(BulkError::Refresh {
                        action: described,
                        source,
                    }),
                    _ => Ok(()),
                }
            }
            Err(source) => {
                error!(action = described, error = %source, "bulk action failed");
                self.notices.error(format!("bulk {described} failed: {source}"));
                Err(BulkError::Request {
                    action: described,
                    source,
                })
            }
        }
    }
}
