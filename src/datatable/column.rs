//! Column descriptors and the values they extract from records.
use std::cmp::Ordering;
use std::fmt;

/// The displayable, sortable value of a single table cell.
///
/// Field accessors produce a `CellValue` so that the table can compare and
/// display cells without knowing the record type. A missing field is
/// [`CellValue::Empty`] and renders as an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Total ordering used by the stable sort: values of the same kind
    /// compare naturally, numeric kinds compare with each other, and
    /// otherwise the kind rank decides. NaN compares as equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        use CellValue::*;

        match (self, other) {
            (Empty, Empty) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Number(a), Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Integer(a), Number(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Number(a), Integer(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) | Self::Number(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<V> From<Option<V>> for CellValue
where
    V: Into<CellValue>,
{
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(Self::Empty)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Empty,
            Value::Bool(value) => Self::Bool(*value),
            Value::Number(value) => value
                .as_i64()
                .map(Self::Integer)
                .unwrap_or_else(|| Self::Number(value.as_f64().unwrap_or(0.0))),
            Value::String(value) => Self::Text(value.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Describes how one table column is keyed, labeled, sized, and read out of
/// a record.
///
/// The `key` must be unique within a column list. A column without a field
/// accessor always yields [`CellValue::Empty`] and cannot be sorted; it is
/// typically rendered by a custom cell view instead.
pub struct Column<T> {
    key: String,
    label: String,
    field: Option<Box<dyn Fn(&T) -> CellValue>>,
    width: f32,
}

impl<T> Column<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field: None,
            width: 100.0,
        }
    }

    /// Sets the field accessor used to read this column out of a record.
    pub fn with_field(mut self, field: impl Fn(&T) -> CellValue + 'static) -> Self {
        self.field = Some(Box::new(field));
        self
    }

    /// Sets the raw width of the column, relative to its siblings.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width.max(0.0);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_sortable(&self) -> bool {
        self.field.is_some()
    }

    /// Extracts this column's value from a record. Columns without a field
    /// accessor yield [`CellValue::Empty`].
    pub fn value(&self, record: &T) -> CellValue {
        self.field
            .as_ref()
            .map(|field| field(record))
            .unwrap_or(CellValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        size: i64,
    }

    #[test]
    fn column_extracts_field_value() {
        let column = Column::new("size", "Size").with_field(|s: &Sample| s.size.into());

        let value = column.value(&Sample { size: 42 });

        assert_eq!(value, CellValue::Integer(42));
        assert!(column.is_sortable());
    }

    #[test]
    fn column_without_field_is_empty_and_unsortable() {
        let column = Column::<Sample>::new("actions", "Actions");

        let value = column.value(&Sample { size: 1 });

        assert!(value.is_empty());
        assert!(!column.is_sortable());
        assert_eq!(value.to_string(), "");
    }

    #[test]
    fn values_of_the_same_kind_compare_naturally() {
        assert_eq!(
            CellValue::from("alpha").compare(&CellValue::from("beta")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Integer(3).compare(&CellValue::Number(2.5)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Empty.compare(&CellValue::from("alpha")),
            Ordering::Less
        );
    }

    #[test]
    fn json_values_convert_losslessly() {
        let value = serde_json::json!({ "n": 7, "x": 1.5, "s": "hi", "b": true, "z": null });

        assert_eq!(CellValue::from(&value["n"]), CellValue::Integer(7));
        assert_eq!(CellValue::from(&value["x"]), CellValue::Number(1.5));
        assert_eq!(CellValue::from(&value["s"]), CellValue::from("hi"));
        assert_eq!(CellValue::from(&value["b"]), CellValue::Bool(true));
        assert_eq!(CellValue::from(&value["z"]), CellValue::Empty);
        assert_eq!(
            CellValue::from(&value["missing"]),
            CellValue::Empty,
            "absent keys read as null"
        );
    }
}
