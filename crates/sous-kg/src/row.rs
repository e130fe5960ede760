use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed rendering for an empty result set
pub const NO_RESULTS: &str = "Query returned no results.";

/// One result row: column name to scalar value.
///
/// A BTreeMap keeps column order stable across runs, so the rendered text
/// the model sees is deterministic.
pub type Row = BTreeMap<String, Scalar>;

/// Scalar cell value as returned by the graph store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Render rows as model-readable text: one line per row, `key: value`
/// columns joined by `", "`. Null columns are omitted from their line.
pub fn render_rows(rows: &[Row]) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }

    rows.iter()
        .map(render_row)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(row: &Row) -> String {
    row.iter()
        .filter(|(_, value)| !matches!(value, Scalar::Null))
        .map(|(column, value)| format!("{}: {}", column, value))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Scalar)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_result_set_renders_sentinel() {
        assert_eq!(render_rows(&[]), "Query returned no results.");
    }

    #[test]
    fn renders_one_line_per_row() {
        let rows = vec![
            row(&[
                ("name", Scalar::Text("Ratatouille".to_string())),
                ("servings", Scalar::Number(4.0)),
            ]),
            row(&[
                ("name", Scalar::Text("Minestrone".to_string())),
                ("servings", Scalar::Number(6.0)),
            ]),
        ];

        let text = render_rows(&rows);
        assert_eq!(
            text,
            "name: Ratatouille, servings: 4\nname: Minestrone, servings: 6"
        );
    }

    #[test]
    fn null_columns_are_omitted() {
        let rows = vec![row(&[
            ("name", Scalar::Text("Pho".to_string())),
            ("rating", Scalar::Null),
            ("vegetarian", Scalar::Bool(false)),
        ])];

        assert_eq!(render_rows(&rows), "name: Pho, vegetarian: false");
    }

    #[test]
    fn rendered_row_splits_back_into_pairs() {
        let original = row(&[
            ("cuisine", Scalar::Text("thai".to_string())),
            ("name", Scalar::Text("Pad See Ew".to_string())),
            ("servings", Scalar::Number(2.0)),
        ]);

        let text = render_rows(std::slice::from_ref(&original));
        let recovered: Vec<(&str, &str)> = text
            .split(", ")
            .map(|pair| pair.split_once(": ").unwrap())
            .collect();

        assert_eq!(
            recovered,
            vec![
                ("cuisine", "thai"),
                ("name", "Pad See Ew"),
                ("servings", "2"),
            ]
        );
    }

    #[test]
    fn scalar_deserializes_from_json_values() {
        let parsed: Row =
            serde_json::from_str(r#"{"a": null, "b": true, "c": 1.5, "d": "x"}"#).unwrap();

        assert_eq!(parsed["a"], Scalar::Null);
        assert_eq!(parsed["b"], Scalar::Bool(true));
        assert_eq!(parsed["c"], Scalar::Number(1.5));
        assert_eq!(parsed["d"], Scalar::Text("x".to_string()));
    }
}
