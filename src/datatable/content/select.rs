//! Selectable, locally sorted record rows.
use std::collections::HashSet;

use super::{Internal, RecordSource, SortState};
use crate::datatable::column::Column;

/// A record source with a selection set and local sorting.
///
/// Selection is keyed, not positional: a caller-supplied key selector
/// extracts a unique identifying value from each record, and the selection
/// set stores those keys. Sorting reorders the internal record copy with a
/// stable sort and leaves the selection untouched; replacing the records
/// prunes any selected key no longer present.
///
/// Records with duplicate keys leave selection and sort behavior
/// unspecified; keys must be caller-guaranteed unique.
pub struct SelectRows<T> {
    columns: Vec<Column<T>>,
    records: Vec<T>,
    key_of: fn(&T) -> String,
    selection: HashSet<String>,
    sort: Option<SortState>,
    active: Option<usize>,
    internal: Internal,
}

impl<T> SelectRows<T> {
    pub fn new(columns: Vec<Column<T>>, key_of: fn(&T) -> String) -> Self {
        Self {
            columns,
            records: Vec::new(),
            key_of,
            selection: HashSet::new(),
            sort: None,
            active: None,
            internal: Internal::default(),
        }
    }

    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.set_records(records);
        self
    }

    /// Replaces the record copy, prunes selected keys absent from the new
    /// records, and re-applies the active sort.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;

        let keys: HashSet<String> = self.records.iter().map(self.key_of).collect();
        self.selection.retain(|key| keys.contains(key));

        if self.active.is_some_and(|row| row >= self.records.len()) {
            self.active = None;
        }

        self.apply_sort();
        self.internal.set_dirty();
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// The records currently selected, in display order.
    pub fn selected_records(&self) -> Vec<&T> {
        self.records
            .iter()
            .filter(|record| self.selection.contains(&(self.key_of)(record)))
            .collect()
    }

    /// The keys currently selected.
    pub fn selected_keys(&self) -> &HashSet<String> {
        &self.selection
    }

    fn apply_sort(&mut self) {
        let Some(sort) = &self.sort else {
            return;
        };
        let Some(column) = self.columns.get(sort.column) else {
            return;
        };
        let ascending = sort.ascending;

        self.records.sort_by(|a, b| {
            let ordering = column.value(a).compare(&column.value(b));
            if ascending { ordering } else { ordering.reverse() }
        });
    }
}

impl<T> RecordSource<T> for SelectRows<T> {
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
        self.apply_sort();
    }

    fn is_selected(&self, row: usize) -> bool {
        self.records
            .get(row)
            .is_some_and(|record| self.selection.contains(&(self.key_of)(record)))
    }

    fn toggle_row(&mut self, row: usize) {
        let Some(record) = self.records.get(row) else {
            return;
        };

        let key = (self.key_of)(record);
        if !self.selection.remove(&key) {
            self.selection.insert(key);
        }
    }

    fn toggle_all(&mut self) {
        if self.selection.len() == self.records.len() {
            self.selection.clear();
        } else {
            self.selection = self.records.iter().map(self.key_of).collect();
        }
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

    #[derive(Debug, Clone, PartialEq)]
    struct Meter {
        key: String,
        name: String,
        voltage: f64,
    }

    fn meter(key: &str, name: &str, voltage: f64) -> Meter {
        Meter {
            key: key.to_owned(),
            name: name.to_owned(),
            voltage,
        }
    }

    fn content() -> SelectRows<Meter> {
        let columns = vec![
            Column::new("name", "Name").with_field(|m: &Meter| m.name.clone().into()),
            Column::new("voltage", "Voltage").with_field(|m: &Meter| m.voltage.into()),
        ];

        SelectRows::new(columns, |m| m.key.clone()).with_records(vec![
            meter("a", "Substation A", 12.5),
            meter("b", "Substation B", 69.0),
            meter("c", "Substation C", 12.5),
        ])
    }

    #[test]
    fn toggling_rows_tracks_keys() {
        let mut rows = content();

        rows.perform(Action::ToggleRow(0));
        rows.perform(Action::ToggleRow(2));

        let selected = rows.selected_records();
        assert_eq!(selected.len(), rows.selected_keys().len());
        assert!(
            selected
                .iter()
                .all(|record| rows.selected_keys().contains(&record.key))
        );

        rows.perform(Action::ToggleRow(0));
        assert_eq!(rows.selected_records().len(), 1);
        assert!(rows.is_selected(2));
        assert!(!rows.is_selected(0));
    }

    #[test]
    fn toggle_all_twice_returns_to_empty() {
        let mut rows = content();

        rows.perform(Action::ToggleAll);
        assert_eq!(rows.selected_records().len(), 3);

        rows.perform(Action::ToggleAll);
        assert!(rows.selected_keys().is_empty());
    }

    #[test]
    fn toggle_all_completes_a_partial_selection() {
        let mut rows = content();

        rows.perform(Action::ToggleRow(1));
        rows.perform(Action::ToggleAll);

        assert_eq!(rows.selected_records().len(), 3);
    }

    #[test]
    fn replacing_records_prunes_dangling_selections() {
        let mut rows = content();

        rows.perform(Action::ToggleAll);
        rows.set_records(vec![meter("b", "Substation B", 69.0)]);

        assert_eq!(
            rows.selected_keys().iter().collect::<Vec<_>>(),
            vec!["b"],
            "keys absent from the new records are removed"
        );
    }

    #[test]
    fn sorting_is_stable_and_keeps_the_selection() {
        let mut rows = content();
        rows.perform(Action::ToggleRow(0));

        rows.perform(Action::Sort(rows.sort_request(1).unwrap()));

        // equal voltages keep their relative order
        let names: Vec<&str> = rows.records().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Substation A", "Substation C", "Substation B"]);

        // selection followed the record, not the row index
        let selected = rows.selected_records();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, "a");
    }

    #[test]
    fn switching_columns_resets_direction_to_ascending() {
        let mut rows = content();

        rows.perform(Action::Sort(rows.sort_request(1).unwrap()));
        rows.perform(Action::Sort(rows.sort_request(1).unwrap()));
        assert_eq!(rows.sort().map(|s| s.ascending), Some(false));

        let request = rows.sort_request(0).unwrap();
        assert!(request.ascending, "a new key starts ascending");
        rows.perform(Action::Sort(request));

        let names: Vec<CellValue> = (0..rows.row_count()).map(|row| rows.cell(row, 0)).collect();
        assert_eq!(
            names,
            vec![
                CellValue::from("Substation A"),
                CellValue::from("Substation B"),
                CellValue::from("Substation C"),
            ]
        );
    }

    #[test]
    fn descending_sort_reverses_comparison() {
        let mut rows = content();

        rows.perform(Action::Sort(rows.sort_request(1).unwrap()));
        rows.perform(Action::Sort(rows.sort_request(1).unwrap()));

        assert_eq!(rows.records()[0].name, "Substation B");
    }
}
