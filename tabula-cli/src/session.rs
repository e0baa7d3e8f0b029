//! Build a table from the arguments and replay the requested operations.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tabula::model::{ID_FIELD, Record, RowId};
use tabula::{Column, DataTable, TableConfig};

use crate::args::Args;
use crate::error::CliError;

/// Read the rows file.
pub fn load_rows(path: &Path) -> Result<Vec<Record>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<Record> = serde_json::from_str(&text).map_err(|source| CliError::Rows {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Every key found in the rows, `id` first and the rest sorted.
pub fn infer_columns(rows: &[Record]) -> Vec<String> {
    let keys: BTreeSet<&str> = rows.iter().flat_map(|row| row.keys()).collect();
    let mut columns = Vec::with_capacity(keys.len());
    if keys.contains(ID_FIELD) {
        columns.push(ID_FIELD.to_string());
    }
    columns.extend(
        keys.into_iter()
            .filter(|key| *key != ID_FIELD)
            .map(str::to_string),
    );
    columns
}

/// Parse a `--select` value: integers name integer ids, `#N` names the row
/// at source index N, anything else is a text id.
pub fn parse_row_id(raw: &str) -> RowId {
    if let Some(position) = raw.strip_prefix('#')
        && let Ok(position) = position.parse::<usize>()
    {
        return RowId::Position(position);
    }
    match raw.parse::<i64>() {
        Ok(id) => RowId::Int(id),
        Err(_) => RowId::Text(raw.to_string()),
    }
}

/// Header label for a column key: `first_name` becomes `First name`.
fn label_for(key: &str) -> String {
    if key == ID_FIELD {
        return "ID".to_string();
    }
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the table and apply query, sorts, page and selections in the
/// order a user would.
pub fn build_table(args: &Args, rows: Vec<Record>) -> Result<DataTable<Record>, CliError> {
    let mut config = match &args.config {
        Some(path) => TableConfig::load(path)?,
        None => TableConfig::default(),
    };
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }

    let keys = if args.columns.is_empty() {
        infer_columns(&rows)
    } else {
        args.columns.clone()
    };
    let columns: Vec<Column> = keys
        .iter()
        .map(|key| Column::new(key.as_str(), label_for(key)))
        .collect();

    let mut table = DataTable::builder(columns).rows(rows).config(config).build()?;

    table.set_query(args.query.as_str());
    for key in &args.sort {
        if table.set_sort_key(key).is_none() {
            return Err(CliError::UnknownColumn(key.clone()));
        }
    }
    table.set_page_index(args.page.get() - 1);

    for raw in &args.select {
        let id = parse_row_id(raw);
        if !table.toggle_row(id) {
            log::warn!(
                "selection of {raw:?} ignored in {:?} mode",
                table.selection_mode()
            );
        }
    }
    if args.select_page {
        let outcome = table.toggle_all_on_page();
        log::info!("page toggle: {outcome:?}");
    }

    Ok(table)
}
