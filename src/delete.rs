//! DeleteBuilder：构建 DELETE 语句。

use crate::builder::{Operation, Statement};
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    dialect: Dialect,
    table: Option<String>,
    where_expr: Option<String>,
}

impl DeleteBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: None,
            where_expr: None,
        }
    }

    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    pub fn where_expr(&mut self, expr: Option<String>) -> &mut Self {
        self.where_expr = expr;
        self
    }
}

impl Statement for DeleteBuilder {
    fn operation(&self) -> Operation {
        Operation::Delete
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
            .ok_or_else(|| QueryError::missing(Operation::Delete, "table"))?;

        let mut buf = StringBuilder::new();
        buf.write_leading("DELETE FROM ");
        buf.write_str(&table);
        if let Some(w) = &self.where_expr {
            buf.write_clause("WHERE", w);
        }
        Ok(buf.into_string())
    }
}
