//! SQLite destination store.

use std::path::Path;

use chrono::{Days, NaiveDate};
use polars::prelude::{AnyValue, DataFrame, DataType};
use rusqlite::types::Value;
use rusqlite::{Connection, Transaction, params_from_iter};
use tracing::{debug, info};

use catalog_common::any_to_string;

use crate::assemble::OutputTables;
use crate::error::Result;
use crate::store::TableStore;

const STAGING_PREFIX: &str = "__staging_";

/// Store backed by one SQLite database.
///
/// Tables are written under staging names first and swapped in by rename,
/// all inside one transaction, so a failed run leaves the previous tables
/// untouched.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl TableStore for SqliteStore {
    fn replace_tables(&mut self, tables: &OutputTables) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (name, frame) in tables.iter() {
            let staging = format!("{STAGING_PREFIX}{name}");
            write_table(&tx, &staging, frame)?;
            debug!(table = name, rows = frame.height(), "staged table");
        }
        for (name, _) in tables.iter() {
            let staging = format!("{STAGING_PREFIX}{name}");
            tx.execute_batch(&format!(
                "DROP TABLE IF EXISTS {target};
                 ALTER TABLE {staging} RENAME TO {target};",
                target = quote_ident(name),
                staging = quote_ident(&staging),
            ))?;
        }
        tx.commit()?;
        info!(tables = tables.len(), "replaced tables");
        Ok(())
    }
}

/// Quotes an SQL identifier.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sql_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => "INTEGER",
        DataType::Float32 | DataType::Float64 => "REAL",
        _ => "TEXT",
    }
}

/// Converts one cell to an SQLite value. Dates become ISO `YYYY-MM-DD` text.
fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Integer(i64::from(v)),
        AnyValue::Int8(v) => Value::Integer(i64::from(v)),
        AnyValue::Int16(v) => Value::Integer(i64::from(v)),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt8(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt16(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Real(v as f64), Value::Integer),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::Date(days) => date_text(days).map_or(Value::Null, Value::Text),
        other => Value::Text(any_to_string(other)),
    }
}

fn date_text(days: i32) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let date = if days >= 0 {
        epoch.checked_add_days(Days::new(u64::from(days.unsigned_abs())))?
    } else {
        epoch.checked_sub_days(Days::new(u64::from(days.unsigned_abs())))?
    };
    Some(date.format("%Y-%m-%d").to_string())
}

fn write_table(tx: &Transaction<'_>, table: &str, frame: &DataFrame) -> Result<()> {
    let columns = frame.get_columns();
    let table = quote_ident(table);
    let definitions: Vec<String> = columns
        .iter()
        .map(|col| format!("{} {}", quote_ident(col.name()), sql_type(col.dtype())))
        .collect();
    let names: Vec<String> = columns.iter().map(|col| quote_ident(col.name())).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|idx| format!("?{idx}")).collect();

    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table};
         CREATE TABLE {table} ({});",
        definitions.join(", ")
    ))?;
    let mut stmt = tx.prepare(&format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    ))?;
    for row in 0..frame.height() {
        let mut values = Vec::with_capacity(columns.len());
        for column in columns {
            values.push(sql_value(column.get(row)?));
        }
        stmt.execute(params_from_iter(values))?;
    }
    Ok(())
}
