use std::collections::BTreeSet;

use uuid::Uuid;

/// Checked rows for bulk operations. Always a subset of the identifiers on
/// the currently rendered page; never spans pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<Uuid>,
}

impl SelectionSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.ids.iter().copied().collect()
    }

    pub fn toggle(&mut self, id: Uuid) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Header-checkbox semantics, scoped to the visible page: if everything
    /// visible is already selected this deselects it; otherwise the
    /// selection becomes exactly the visible rows.
    pub fn toggle_page(&mut self, visible: &[Uuid]) {
        let all_selected =
            !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id));
        if all_selected {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids = visible.iter().copied().collect();
        }
    }

    /// Drop identifiers no longer present on the rendered page. Stale ids
    /// are discarded silently; they must never reach a bulk request.
    pub fn retain_visible(&mut self, visible: &[Uuid]) {
        let visible: BTreeSet<Uuid> = visible.iter().copied().collect();
        self.ids.retain(|id| visible.contains(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
