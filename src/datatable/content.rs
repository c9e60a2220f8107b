use std::cell::RefCell;

use super::action::{Action, SortRequest};
use super::column::{CellValue, Column};
use super::update::Motion;

pub mod dynamic;
pub mod rows;
pub mod search;
pub mod select;

/// The active sort of a record source.
///
/// At most one sort key is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Key of the sorted column.
    pub key: String,
    /// Index of the sorted column.
    pub column: usize,
    /// Whether the sort is ascending.
    pub ascending: bool,
}

/// A source of records rendered by a [`Table`](crate::Table).
///
/// The widget renders one header cell per column and one body row per
/// record, in the order this source yields them, and applies interactions
/// through [`perform`](RecordSource::perform). Capability methods
/// (selection, sorting, the active row) default to no-ops so that a source
/// only implements what it supports.
pub trait RecordSource<T> {
    /// The ordered column list.
    fn columns(&self) -> &[Column<T>];
    /// The number of records to display.
    fn row_count(&self) -> usize;
    /// The record at the given display row.
    fn record(&self, row: usize) -> Option<&T>;
    /// A reference to the internal state shared with the widget.
    fn internal(&self) -> &Internal;

    /// The currently active sort, if any.
    fn sort(&self) -> Option<&SortState> {
        None
    }
    /// Applies the given sort.
    fn set_sort(&mut self, _sort: SortState) {}

    /// Whether the record at the given display row is selected.
    fn is_selected(&self, _row: usize) -> bool {
        false
    }
    /// Toggles selection of the record at the given display row.
    fn toggle_row(&mut self, _row: usize) {}
    /// Selects every record, or clears the selection if every record is
    /// already selected.
    fn toggle_all(&mut self) {}

    /// The active (keyboard cursor) row, if any.
    fn active(&self) -> Option<usize> {
        None
    }
    /// Changes the active row.
    fn set_active(&mut self, _row: Option<usize>) {}

    /// Extracts the value of the given cell. Out-of-range coordinates and
    /// columns without a field accessor read as [`CellValue::Empty`].
    fn cell(&self, row: usize, column: usize) -> CellValue {
        let Some(record) = self.record(row) else {
            return CellValue::Empty;
        };

        self.columns()
            .get(column)
            .map(|col| col.value(record))
            .unwrap_or(CellValue::Empty)
    }

    /// The sort that activating the given header cell would request:
    /// toggling the active key flips direction, a new key starts ascending.
    /// Returns `None` for columns without a field accessor.
    fn sort_request(&self, column: usize) -> Option<SortRequest> {
        let col = self.columns().get(column)?;
        if !col.is_sortable() {
            return None;
        }

        let ascending = match self.sort() {
            Some(sort) if sort.key == col.key() => !sort.ascending,
            _ => true,
        };

        Some(SortRequest {
            key: col.key().to_owned(),
            column,
            ascending,
        })
    }

    /// Perform a table [`Action`].
    fn perform(&mut self, action: Action) {
        match action {
            Action::Sort(request) => self.set_sort(SortState {
                key: request.key,
                column: request.column,
                ascending: request.ascending,
            }),
            Action::ToggleRow(row) => {
                self.set_active(Some(row));
                self.toggle_row(row);
            }
            Action::ToggleAll => self.toggle_all(),
            Action::SetActive(row) => self.set_active(row),
            Action::MoveActive(motion) => {
                let count = self.row_count();
                if count > 0 {
                    let next = match (motion, self.active()) {
                        (Motion::Up, Some(row)) => row.saturating_sub(1),
                        (Motion::Up, None) => count - 1,
                        (Motion::Down, Some(row)) => (row + 1).min(count - 1),
                        (Motion::Down, None) => 0,
                        (Motion::Home, _) => 0,
                        (Motion::End, _) => count - 1,
                    };
                    self.set_active(Some(next));
                }
            }
        }

        self.internal().set_dirty();
    }
}

/// State shared between a record source and the widget rendering it.
pub struct Internal {
    /// Whether the content changed and the widget needs to rebuild its
    /// cached geometry on the next redraw.
    is_dirty: RefCell<bool>,
}

impl Clone for Internal {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl Internal {
    /// Mark the content as dirty.
    pub fn set_dirty(&self) {
        *self.is_dirty.borrow_mut() = true;
    }

    /// Mark the content as clean.
    pub fn set_clean(&self) {
        *self.is_dirty.borrow_mut() = false;
    }

    /// Check if the content is dirty.
    pub fn is_dirty(&self) -> bool {
        *self.is_dirty.borrow()
    }
}

impl Default for Internal {
    fn default() -> Self {
        Self {
            is_dirty: RefCell::new(true),
        }
    }
}
