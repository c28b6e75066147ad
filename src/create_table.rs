//! CreateTableBuilder：构建 CREATE TABLE。

use crate::builder::{Operation, Statement};
use crate::column::ColumnDefinition;
use crate::compose::Composer;
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    composer: Composer,
    name: Option<String>,
    if_not_exists: bool,
    engine: Option<String>,
    columns: Vec<ColumnDefinition>,
}

impl CreateTableBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_composer(Composer::new(dialect))
    }

    /// 列默认值通过该 Composer 的 escaper 渲染。
    pub fn with_composer(composer: Composer) -> Self {
        Self {
            composer,
            name: None,
            if_not_exists: false,
            engine: None,
            columns: Vec::new(),
        }
    }

    pub fn create_table(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn if_not_exists(&mut self, if_not_exists: bool) -> &mut Self {
        self.if_not_exists = if_not_exists;
        self
    }

    /// 仅 MySQL 家族输出 `ENGINE`。
    pub fn engine(&mut self, engine: Option<String>) -> &mut Self {
        self.engine = engine.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn column(&mut self, column: ColumnDefinition) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn columns(&mut self, columns: Vec<ColumnDefinition>) -> &mut Self {
        self.columns = columns;
        self
    }
}

impl Statement for CreateTableBuilder {
    fn operation(&self) -> Operation {
        Operation::Create
    }

    fn dialect(&self) -> Dialect {
        self.composer.dialect()
    }

    fn build(&self) -> Result<String> {
        let dialect = self.composer.dialect();
        let table = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| dialect.table_reference(t))
            .ok_or_else(|| QueryError::missing(Operation::Create, "name"))?;
        if self.columns.is_empty() {
            return Err(QueryError::missing(Operation::Create, "columns"));
        }

        let defs = self
            .columns
            .iter()
            .map(|c| c.render_with(&self.composer))
            .collect::<Result<Vec<_>>>()?;

        let mut buf = StringBuilder::new();
        buf.write_leading("CREATE TABLE");
        if self.if_not_exists && dialect.supports_create_if_not_exists() {
            buf.write_str(" IF NOT EXISTS");
        }
        buf.write_leading(&table);
        buf.write_str(" (");
        buf.write_joined(&defs, ", ");
        buf.write_str(")");
        if dialect.is_mysql_family() {
            if let Some(engine) = &self.engine {
                buf.write_clause("ENGINE", engine.trim());
            }
        }
        Ok(buf.into_string())
    }
}
