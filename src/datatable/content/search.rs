//! Free-text filtered record rows.
use super::{Internal, RecordSource, SortState};
use crate::datatable::column::Column;

/// A record source filtered by a free-text query.
///
/// The filtered view is recomputed whenever the records or the query
/// change, retaining only records the caller-supplied match predicate
/// accepts. The predicate owns all matching semantics (case sensitivity,
/// substring vs. fuzzy); this source imposes none of its own.
pub struct SearchRows<T> {
    columns: Vec<Column<T>>,
    records: Vec<T>,
    matches: fn(&T, &str) -> bool,
    query: String,
    visible: Vec<usize>,
    sort: Option<SortState>,
    active: Option<usize>,
    internal: Internal,
}

impl<T> SearchRows<T> {
    pub fn new(columns: Vec<Column<T>>, matches: fn(&T, &str) -> bool) -> Self {
        Self {
            columns,
            records: Vec::new(),
            matches,
            query: String::new(),
            visible: Vec::new(),
            sort: None,
            active: None,
            internal: Internal::default(),
        }
    }

    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.set_records(records);
        self
    }

    /// Replaces the records wholesale and recomputes the filtered view.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.refilter();
    }

    /// Changes the search text and recomputes the filtered view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The records currently passing the filter, in input order.
    pub fn visible_records(&self) -> Vec<&T> {
        self.visible
            .iter()
            .filter_map(|index| self.records.get(*index))
            .collect()
    }

    fn refilter(&mut self) {
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| (self.matches)(record, &self.query))
            .map(|(index, _)| index)
            .collect();
        self.active = None;
        self.internal.set_dirty();
    }
}

impl<T> RecordSource<T> for SearchRows<T> {
    fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.visible.len()
    }

    fn record(&self, row: usize) -> Option<&T> {
        self.visible
            .get(row)
            .and_then(|index| self.records.get(*index))
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
        self.active = row.filter(|row| *row < self.visible.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatable::column::CellValue;

    #[derive(Debug, PartialEq)]
    struct Named {
        name: &'static str,
    }

    fn content() -> SearchRows<Named> {
        let columns =
            vec![Column::new("name", "Name").with_field(|n: &Named| n.name.into())];

        SearchRows::new(columns, |record, text| record.name.contains(text))
            .with_records(vec![Named { name: "Alpha" }, Named { name: "Beta" }])
    }

    #[test]
    fn predicate_owns_case_sensitivity() {
        let mut rows = content();

        rows.set_query("Al");
        assert_eq!(rows.visible_records(), vec![&Named { name: "Alpha" }]);

        // a case-sensitive predicate rejects the lowercase query
        rows.set_query("al");
        assert!(rows.visible_records().is_empty());
        assert_eq!(rows.row_count(), 0);
    }

    #[test]
    fn empty_query_passes_everything_through_the_predicate() {
        let rows = content();

        assert_eq!(rows.row_count(), 2);
        assert_eq!(rows.cell(0, 0), CellValue::from("Alpha"));
        assert_eq!(rows.cell(1, 0), CellValue::from("Beta"));
    }

    #[test]
    fn new_records_are_refiltered_against_the_current_query() {
        let mut rows = content();
        rows.set_query("a");

        rows.set_records(vec![
            Named { name: "Saginaw" },
            Named { name: "Flint" },
            Named { name: "Bay City" },
        ]);

        assert_eq!(
            rows.visible_records(),
            vec![&Named { name: "Saginaw" }, &Named { name: "Bay City" }]
        );
    }
}
