//! Turns positional query rows into labeled records.
//!
//! A record keeps the column order of the statement that produced it, so
//! responses list fields in the same order the SELECT does.

use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapperError {
    #[error("row has {values} values for {columns} columns")]
    ColumnMismatch { columns: usize, values: usize },
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),
}

/// A row whose values line up with a fixed list of column names.
pub trait LabeledRow {
    const COLUMNS: &'static [&'static str];

    fn into_values(self) -> Vec<Value>;
}

/// Zips column names with row values.
///
/// Fails instead of truncating when the lengths differ.
pub fn zip_record<S: AsRef<str>>(columns: &[S], values: Vec<Value>) -> Result<Record, MapperError> {
    if columns.len() != values.len() {
        return Err(MapperError::ColumnMismatch {
            columns: columns.len(),
            values: values.len(),
        });
    }

    let mut record = Record::with_capacity(columns.len());
    for (column, value) in columns.iter().zip(values) {
        let column = column.as_ref();
        if record.insert(column.to_string(), value).is_some() {
            return Err(MapperError::DuplicateColumn(column.to_string()));
        }
    }
    Ok(record)
}

pub fn map_row<R: LabeledRow>(row: R) -> Result<Record, MapperError> {
    zip_record(R::COLUMNS, row.into_values())
}

pub fn map_rows<R, I>(rows: I) -> Result<Vec<Record>, MapperError>
where
    R: LabeledRow,
    I: IntoIterator<Item = R>,
{
    rows.into_iter().map(map_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zip_record_preserves_column_order() {
        let record = zip_record(
            &["website", "area_id", "restaurant_name"],
            vec![json!("https://example.com"), json!(3), json!("Luck Lust Liquor & Burn")],
        )
        .unwrap();

        let keys = record.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["website", "area_id", "restaurant_name"]);
        assert_eq!(record["area_id"], json!(3));
    }

    #[test]
    fn test_zip_record_rejects_short_row() {
        let result = zip_record(&["area_id", "area_name"], vec![json!(1)]);

        assert_eq!(
            result.unwrap_err(),
            MapperError::ColumnMismatch {
                columns: 2,
                values: 1
            }
        );
    }

    #[test]
    fn test_zip_record_rejects_long_row() {
        let result = zip_record(&["area_id"], vec![json!(1), json!("Northern Quarter")]);

        assert!(matches!(
            result,
            Err(MapperError::ColumnMismatch {
                columns: 1,
                values: 2
            })
        ));
    }

    #[test]
    fn test_zip_record_rejects_duplicate_columns() {
        let result = zip_record(&["area_id", "area_id"], vec![json!(1), json!(2)]);

        assert_eq!(
            result.unwrap_err(),
            MapperError::DuplicateColumn("area_id".to_string())
        );
    }

    struct Pair(i32, &'static str);

    impl LabeledRow for Pair {
        const COLUMNS: &'static [&'static str] = &["id", "name"];

        fn into_values(self) -> Vec<Value> {
            vec![self.0.into(), self.1.into()]
        }
    }

    #[test]
    fn test_map_rows() {
        let records = map_rows(vec![Pair(1, "Didsbury"), Pair(2, "Ancoats")]).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(Value::Object(records[1].clone()), json!({"id": 2, "name": "Ancoats"}));
    }

    #[test]
    fn test_map_rows_empty() {
        let records = map_rows(Vec::<Pair>::new()).unwrap();
        assert!(records.is_empty());
    }
}
