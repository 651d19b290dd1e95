//! Client-side orchestration for the "my tasks" list view: filter, sort and
//! pagination state, the query descriptor composed from them, page-scoped row
//! selection, bulk mutations, and presentation badge derivation.
//!
//! The crate is transport-agnostic. Everything that touches the network goes
//! through the [`api::TaskApi`] trait, which a shell injects into
//! [`controller::TaskListController`] as an explicit handle.

pub mod api;
pub mod badge;
pub mod bulk;
pub mod controller;
pub mod filter;
pub mod notice;
pub mod page;
pub mod query;
pub mod selection;
pub mod sort;

pub use api::{ApiError, TaskApi};
pub use badge::DueBadge;
pub use bulk::{BulkAction, BulkError};
pub use controller::{FetchOutcome, FetchTicket, TaskListController};
pub use filter::TaskFilters;
pub use notice::{Notice, NoticeLevel, NoticeLog};
pub use page::{PageLimit, PageState};
pub use query::TaskQuery;
pub use selection::SelectionSet;
pub use sort::{SortField, SortOrder, SortState};
