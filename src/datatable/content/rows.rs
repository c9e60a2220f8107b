//! Plain record rows, displayed in caller order.
use super::{Internal, RecordSource, SortState};
use crate::datatable::column::Column;

/// The simplest record source: records render in array order, and ordering
/// stays the caller's responsibility. Applying a sort only moves the header
/// indicator; the caller observes the emitted
/// [`Action::Sort`](crate::Action::Sort) and reorders or refetches itself.
pub struct Rows<T> {
    columns: Vec<Column<T>>,
    records: Vec<T>,
    sort: Option<SortState>,
    active: Option<usize>,
    internal: Internal,
}

impl<T> Rows<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            records: Vec::new(),
            sort: None,
            active: None,
            internal: Internal::default(),
        }
    }

    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.records = records;
        self
    }

    /// Replaces the records wholesale.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        if self.active.is_some_and(|row| row >= self.records.len()) {
            self.active = None;
        }
        self.internal.set_dirty();
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }
}

impl<T> RecordSource<T> for Rows<T> {
    fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.records.len()
    }

    fn record(&self, row: usize) -> Option<&T> {
        self.records.get(row)
    }

    fn internal(&self) -> &Internal {
        &self.internal
    }

    fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    fn set_sort(&mut self, sort: SortState) {
        self.sort = Some(sort);
    }

    fn active(&self) -> Option<usize> {
        self.active
    }

    fn set_active(&mut self, row: Option<usize>) {
        self.active = row.filter(|row| *row < self.records.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatable::action::Action;
    use crate::datatable::column::CellValue;

    fn columns() -> Vec<Column<i64>> {
        vec![
            Column::new("value", "Value").with_field(|v: &i64| (*v).into()),
            Column::new("actions", "Actions"),
        ]
    }

    #[test]
    fn renders_one_row_per_record_in_input_order() {
        let rows = Rows::new(columns()).with_records(vec![3, 1, 2]);

        assert_eq!(rows.row_count(), 3);
        assert_eq!(rows.columns().len(), 2);
        assert_eq!(rows.cell(0, 0), CellValue::Integer(3));
        assert_eq!(rows.cell(2, 0), CellValue::Integer(2));
        assert_eq!(rows.cell(0, 1), CellValue::Empty);
    }

    #[test]
    fn sorting_only_moves_the_indicator() {
        let mut rows = Rows::new(columns()).with_records(vec![3, 1, 2]);

        let request = rows.sort_request(0).expect("column is sortable");
        assert!(request.ascending);
        rows.perform(Action::Sort(request));

        // data order is untouched; only the indicator moved
        assert_eq!(rows.records(), &[3, 1, 2]);
        assert_eq!(rows.sort().map(|s| s.ascending), Some(true));
    }

    #[test]
    fn toggling_the_same_header_flips_direction_and_back() {
        let mut rows = Rows::new(columns()).with_records(vec![3, 1, 2]);

        rows.perform(Action::Sort(rows.sort_request(0).unwrap()));
        assert_eq!(rows.sort().map(|s| s.ascending), Some(true));

        rows.perform(Action::Sort(rows.sort_request(0).unwrap()));
        assert_eq!(rows.sort().map(|s| s.ascending), Some(false));

        rows.perform(Action::Sort(rows.sort_request(0).unwrap()));
        assert_eq!(rows.sort().map(|s| s.ascending), Some(true));
    }

    #[test]
    fn unsortable_columns_produce_no_request() {
        let rows = Rows::new(columns()).with_records(vec![1]);

        assert!(rows.sort_request(1).is_none());
        assert!(rows.sort_request(99).is_none());
    }
}
