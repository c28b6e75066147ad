//! DropTableBuilder：构建 DROP TABLE。

use crate::builder::{Operation, Statement};
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone)]
pub struct DropTableBuilder {
    dialect: Dialect,
    table: Option<String>,
    if_exists: bool,
}

impl DropTableBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: None,
            if_exists: false,
        }
    }

    pub fn drop_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// 方言不支持时静默忽略。
    pub fn if_exists(&mut self, if_exists: bool) -> &mut Self {
        self.if_exists = if_exists;
        self
    }
}

impl Statement for DropTableBuilder {
    fn operation(&self) -> Operation {
        Operation::Drop
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
            .ok_or_else(|| QueryError::missing(Operation::Drop, "table"))?;

        let mut buf = StringBuilder::new();
        buf.write_leading("DROP TABLE");
        if self.if_exists && self.dialect.supports_drop_if_exists() {
            buf.write_str(" IF EXISTS");
        }
        buf.write_leading(&table);
        Ok(buf.into_string())
    }
}
