// Query templating: "?key" placeholders are replaced by value text
use std::collections::BTreeMap;

use crate::convert::to_string;
use shared::models::Value;

/// Substitutes each `?key` in `template` with the text form of its value.
/// Longer keys go first so `?field` cannot clobber `?field_name`.
pub fn build_query(template: &str, replacers: &BTreeMap<String, Value>) -> String {
    let mut keys: Vec<&String> = replacers.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    keys.into_iter().fold(template.to_string(), |qry, key| {
        qry.replace(&format!("?{}", key), &to_string(&replacers[key]))
    })
}

/// Wraps a table name as a subquery; text that already is a query is only
/// parenthesised.
pub fn table_or_query(table: &str) -> String {
    if table.to_lowercase().contains("select") {
        if table.starts_with('(') {
            table.to_string()
        } else {
            format!("({})", table)
        }
    } else {
        format!("(SELECT * FROM {})", table)
    }
}
