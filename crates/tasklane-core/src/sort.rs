use std::str::FromStr;

/// Columns the list endpoint accepts in `sort_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Status,
    Priority,
    DueDate,
    EstimatedHours,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Status,
        Self::Priority,
        Self::DueDate,
        Self::EstimatedHours,
        Self::UpdatedAt,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::EstimatedHours => "estimated_hours",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_param() == value)
            .ok_or_else(|| UnknownSortField(value.to_string()))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown sort field: {0}")]
pub struct UnknownSortField(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

/// Exactly one sort column is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        // Most recently touched first, matching the backend's default.
        Self {
            field: SortField::UpdatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    /// Column-header click semantics: reselecting the active field flips the
    /// order, selecting another field starts over ascending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.order = self.order.flipped();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_same_field_flips_order() {
        let mut sort = SortState {
            field: SortField::DueDate,
            order: SortOrder::Asc,
        };
        sort.select(SortField::DueDate);
        assert_eq!(sort.order, SortOrder::Desc);
        sort.select(SortField::DueDate);
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn selecting_new_field_resets_to_ascending() {
        let mut sort = SortState {
            field: SortField::DueDate,
            order: SortOrder::Desc,
        };
        sort.select(SortField::Priority);
        assert_eq!(sort.field, SortField::Priority);
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn round_trips_params() {
        for field in SortField::ALL {
            assert_eq!(field.as_param().parse::<SortField>().expect("parse"), field);
        }
        assert_eq!("desc".parse::<SortOrder>().expect("parse"), SortOrder::Desc);
    }
}
