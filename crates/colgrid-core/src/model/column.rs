use crate::{ACTION_COLUMN_KEY, ACTION_COLUMN_LABEL};
use derive_more::{Deref, Display, IntoIterator};

///
/// ColumnDescriptor
/// One displayable grid column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnDescriptor {
    /// Field key (or the reserved action key); unique within a set.
    pub key: String,
    pub label: String,
    pub options: ColumnOptions,
    pub searchable: bool,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    /// Build a plain data column with no options.
    pub fn data(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options: ColumnOptions::default(),
            searchable: false,
            kind: ColumnKind::Data,
        }
    }

    /// Build the synthetic action column under the reserved key.
    #[must_use]
    pub fn actions(actions: Vec<ActionDescriptor>) -> Self {
        Self {
            key: ACTION_COLUMN_KEY.to_string(),
            label: ACTION_COLUMN_LABEL.to_string(),
            options: ColumnOptions::default(),
            searchable: false,
            kind: ColumnKind::Action(actions),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ColumnOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    #[must_use]
    pub const fn is_action(&self) -> bool {
        matches!(self.kind, ColumnKind::Action(_))
    }

    #[must_use]
    pub fn action_list(&self) -> &[ActionDescriptor] {
        match &self.kind {
            ColumnKind::Action(actions) => actions,
            ColumnKind::Data => &[],
        }
    }
}

///
/// ColumnOptions
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ColumnOptions {
    pub sortable: bool,
}

impl ColumnOptions {
    #[must_use]
    pub const fn sortable() -> Self {
        Self { sortable: true }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.sortable
    }
}

///
/// ColumnKind
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColumnKind {
    Data,
    Action(Vec<ActionDescriptor>),
}

///
/// ActionDescriptor
/// One row-level action rendered inside the action column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionDescriptor {
    pub label: String,
    pub route: String,
    pub action: ActionKind,
}

impl ActionDescriptor {
    pub fn new(label: impl Into<String>, route: impl Into<String>, action: ActionKind) -> Self {
        Self {
            label: label.into(),
            route: route.into(),
            action,
        }
    }
}

///
/// ActionKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ActionKind {
    #[display("show")]
    Show,
    #[display("delete")]
    Delete,
    #[display("other")]
    Other,
}

///
/// ColumnSet
///
/// Ordered, key-unique list of columns. Order is rendering order.
/// Re-inserting an existing key replaces the descriptor in place.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct ColumnSet(Vec<ColumnDescriptor>);

impl ColumnSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a column, returning the descriptor it replaced (if any).
    pub fn insert(&mut self, column: ColumnDescriptor) -> Option<ColumnDescriptor> {
        match self.position(&column.key) {
            Some(idx) => Some(std::mem::replace(&mut self.0[idx], column)),
            None => {
                self.0.push(column);
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.0.iter().find(|c| c.key == key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Column keys in rendering order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.key.as_str())
    }

    /// The synthetic action column, if the set carries one.
    #[must_use]
    pub fn action_column(&self) -> Option<&ColumnDescriptor> {
        self.0.iter().find(|c| c.is_action())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|c| c.key == key)
    }
}

impl FromIterator<ColumnDescriptor> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = ColumnDescriptor>>(iter: I) -> Self {
        let mut set = Self::new();
        for column in iter {
            set.insert(column);
        }

        set
    }
}
