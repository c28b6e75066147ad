//! TruncateBuilder：清空表。
//!
//! SQLite 没有 TRUNCATE，会生成两条语句：删除全部行，再清掉 `SQLITE_SEQUENCE` 里的自增计数。

use crate::builder::{Operation, Statement};
use crate::compose::Composer;
use crate::dialect::{Dialect, TABLE_PREFIX_PLACEHOLDER};
use crate::error::{QueryError, Result};

#[derive(Debug, Clone)]
pub struct TruncateBuilder {
    composer: Composer,
    table: Option<String>,
}

impl TruncateBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_composer(Composer::new(dialect))
    }

    /// SQLite 的 `SQLITE_SEQUENCE` 表名字面量经由该 Composer 的 escaper 转义。
    pub fn with_composer(composer: Composer) -> Self {
        Self {
            composer,
            table: None,
        }
    }

    /// 未加引号、未加前缀的逻辑表名。
    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }
}

impl Statement for TruncateBuilder {
    fn operation(&self) -> Operation {
        Operation::Truncate
    }

    fn dialect(&self) -> Dialect {
        self.composer.dialect()
    }

    fn build(&self) -> Result<String> {
        let name = self
            .table
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| QueryError::missing(Operation::Truncate, "table"))?;
        let dialect = self.composer.dialect();
        let table = dialect.table_reference(name);

        Ok(match dialect {
            Dialect::MySQLi | Dialect::MySQLPdo | Dialect::Oracle | Dialect::SQLServer => {
                format!("TRUNCATE TABLE {table}")
            }
            Dialect::PostgreSQL => format!("TRUNCATE {table} RESTART IDENTITY"),
            Dialect::DB2 => format!(
                "TRUNCATE TABLE {table} IGNORE DELETE TRIGGERS DROP STORAGE IMMEDIATE"
            ),
            Dialect::SQLite => format!(
                "DELETE FROM {table}; DELETE FROM SQLITE_SEQUENCE WHERE name={}",
                self.composer
                    .quote(&format!("{TABLE_PREFIX_PLACEHOLDER}{name}"))
            ),
        })
    }
}
