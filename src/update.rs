//! UpdateBuilder：构建 UPDATE 语句。

use crate::builder::{Operation, Statement};
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    dialect: Dialect,
    table: Option<String>,
    keys: Vec<String>,
    rows: Vec<Vec<String>>,
    where_expr: Option<String>,
}

impl UpdateBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: None,
            keys: Vec::new(),
            rows: Vec::new(),
            where_expr: None,
        }
    }

    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    pub fn keys(&mut self, keys: Vec<String>) -> &mut Self {
        self.keys = keys;
        self
    }

    /// UPDATE 只接受一行值；多行在 build 时报错。
    pub fn rows(&mut self, rows: Vec<Vec<String>>) -> &mut Self {
        self.rows = rows;
        self
    }

    pub fn where_expr(&mut self, expr: Option<String>) -> &mut Self {
        self.where_expr = expr;
        self
    }
}

impl Statement for UpdateBuilder {
    fn operation(&self) -> Operation {
        Operation::Update
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn build(&self) -> Result<String> {
        let table = self
            .table
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| self.dialect.table_reference(t))
            .ok_or_else(|| QueryError::missing(Operation::Update, "table"))?;
        if self.keys.is_empty() || self.keys.iter().any(|k| k == "*") {
            return Err(QueryError::missing(Operation::Update, "keys"));
        }
        let row = match self.rows.as_slice() {
            [] => return Err(QueryError::missing(Operation::Update, "values")),
            [row] => row,
            rows => {
                return Err(QueryError::mismatched(
                    Operation::Update,
                    format!("expected exactly one row of values, got {}", rows.len()),
                ));
            }
        };
        if row.len() != self.keys.len() {
            return Err(QueryError::mismatched(
                Operation::Update,
                format!("{} keys for {} values", self.keys.len(), row.len()),
            ));
        }

        let assignments: Vec<String> = self
            .keys
            .iter()
            .zip(row)
            .map(|(k, v)| format!("{k}={v}"))
            .collect();

        let mut buf = StringBuilder::new();
        buf.write_leading("UPDATE ");
        buf.write_str(&table);
        buf.write_clause("SET", &assignments.join(","));
        if let Some(w) = &self.where_expr {
            buf.write_clause("WHERE", w);
        }
        Ok(buf.into_string())
    }
}
