use super::column::CellValue;
use super::update::Motion;

/// A sort-change request emitted when a sortable header cell is activated.
///
/// The `ascending` flag already embodies the toggle rule: requesting the
/// active sort key flips the direction, requesting a new key starts
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    /// Key of the column to sort by.
    pub key: String,
    /// Index of the column in the column list.
    pub column: usize,
    /// The requested direction.
    pub ascending: bool,
}

/// Describes an activated body cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellClick {
    /// Key of the clicked column.
    pub key: String,
    /// Index of the clicked column.
    pub column: usize,
    /// Display index of the clicked row; the record itself lives in the
    /// content the table was built from.
    pub row: usize,
    /// The extracted field value of the clicked cell.
    pub value: CellValue,
}

/// An interaction with a [`Table`](crate::Table). These are handled by
/// calling `.perform()` on the table's record source.
#[derive(Debug, Clone)]
pub enum Action {
    /// Apply the given sort request.
    Sort(SortRequest),
    /// Toggle the selection membership of the given row.
    ToggleRow(usize),
    /// Select every row, or clear the selection if every row is already
    /// selected.
    ToggleAll,
    /// Make the given row the active one.
    SetActive(Option<usize>),
    /// Move the active row by the given [`Motion`].
    MoveActive(Motion),
}

impl Action {
    pub fn is_sort(&self) -> bool {
        matches!(self, Self::Sort(_))
    }
}

/// A notification to the app resulting from a [`Table`](crate::Table)
/// interaction. These carry row context the app needs (which record was
/// clicked) and cannot be `.perform()`ed on the record source.
#[derive(Debug, Clone)]
pub enum Instruction {
    /// A body cell was clicked.
    CellClicked(CellClick),
    /// A row was activated (double click or Enter), such as to open an
    /// editor for it.
    Activate(usize),
}
