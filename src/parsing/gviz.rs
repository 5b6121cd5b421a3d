use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::feed::FeedError;

#[derive(Debug, Deserialize)]
struct GvizResponse {
    table: GvizTable,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default, deserialize_with = "null_as_empty")]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default, deserialize_with = "null_as_empty")]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
}

// gviz writes `null` for rows and cell lists it has nothing for.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a Google Visualization query response into rows of cells.
///
/// The payload arrives wrapped in a JavaScript callback, e.g.
/// `google.visualization.Query.setResponse({...});`, so everything before the
/// first `{` and any trailing `;` is discarded before decoding.
pub fn parse_gviz(payload: &str) -> Result<Vec<Vec<String>>, FeedError> {
    let start = payload
        .find('{')
        .ok_or_else(|| FeedError::Decode("gviz payload contains no JSON object".to_string()))?;
    let body = payload[start..]
        .trim_end()
        .trim_end_matches(';')
        .trim_end();

    let response: GvizResponse =
        serde_json::from_str(body).map_err(|err| FeedError::Decode(err.to_string()))?;

    Ok(response
        .table
        .rows
        .into_iter()
        .map(|row| row.c.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: Option<GvizCell>) -> String {
    match cell.map(|cell| cell.v) {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
