//! Record rows with columns derived from the data itself.
use super::{Internal, RecordSource, SortState};
use crate::datatable::column::Column;
use crate::datatable::utils::text_width;

/// A schemaless record: an ordered map of field names to JSON values.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A record source that derives its column list from the keys of the first
/// record: each key becomes the column key, the display label, and a
/// same-named field accessor.
///
/// With no records there are no columns and the table renders nothing. Key
/// order in the first record determines column order, and heterogeneous
/// records produce columns only for the first record's keys.
pub struct DynamicRows {
    columns: Vec<Column<Record>>,
    records: Vec<Record>,
    sort: Option<SortState>,
    active: Option<usize>,
    internal: Internal,
}

impl DynamicRows {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            columns: derive_columns(&records),
            records,
            sort: None,
            active: None,
            internal: Internal::default(),
        }
    }

    /// Replaces the records wholesale and re-derives the column list.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.columns = derive_columns(&records);
        self.records = records;
        if self.active.is_some_and(|row| row >= self.records.len()) {
            self.active = None;
        }
        self.internal.set_dirty();
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

fn derive_columns(records: &[Record]) -> Vec<Column<Record>> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    first
        .keys()
        .map(|key| {
            let width = column_width(records, key);
            let field = key.clone();

            Column::new(key.clone(), key.clone())
                .with_field(move |record: &Record| record.get(&field).into())
                .with_width(width)
        })
        .collect()
}

// Size a column to its widest value, within reason.
fn column_width(records: &[Record], key: &str) -> f32 {
    let widest = records
        .iter()
        .filter_map(|record| record.get(key))
        .map(|value| match value {
            serde_json::Value::String(text) => text_width(text),
            other => text_width(&other.to_string()),
        })
        .chain(std::iter::once(text_width(key)))
        .max()
        .unwrap_or(0);

    (widest as f32 * 9.0).clamp(60.0, 240.0)
}

impl RecordSource<Record> for DynamicRows {
    fn columns(&self) -> &[Column<Record>] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.records.len()
    }

    fn record(&self, row: usize) -> Option<&Record> {
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
    use crate::datatable::column::CellValue;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    #[test]
    fn columns_come_from_the_first_record_in_key_order() {
        let rows = DynamicRows::new(vec![record(json!({ "A": 1, "B": 2 }))]);

        let keys: Vec<&str> = rows.columns().iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(rows.columns()[0].label(), "A");
        assert_eq!(rows.cell(0, 0), CellValue::Integer(1));
        assert_eq!(rows.cell(0, 1), CellValue::Integer(2));
    }

    #[test]
    fn empty_data_renders_nothing() {
        let rows = DynamicRows::new(Vec::new());

        assert!(rows.columns().is_empty());
        assert_eq!(rows.row_count(), 0);
    }

    #[test]
    fn heterogeneous_records_only_get_the_first_records_columns() {
        let rows = DynamicRows::new(vec![
            record(json!({ "A": 1 })),
            record(json!({ "A": 2, "B": 3 })),
        ]);

        assert_eq!(rows.columns().len(), 1);
        assert_eq!(rows.cell(1, 0), CellValue::Integer(2));
    }

    #[test]
    fn missing_fields_read_as_empty_cells() {
        let rows = DynamicRows::new(vec![
            record(json!({ "A": 1, "B": 2 })),
            record(json!({ "A": 3 })),
        ]);

        assert_eq!(rows.cell(1, 1), CellValue::Empty);
    }

    #[test]
    fn replacing_records_rederives_the_columns() {
        let mut rows = DynamicRows::new(vec![record(json!({ "A": 1 }))]);

        rows.set_records(vec![record(json!({ "X": "hello", "Y": false }))]);

        let keys: Vec<&str> = rows.columns().iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["X", "Y"]);
        assert_eq!(rows.cell(0, 1), CellValue::Bool(false));
    }
}
