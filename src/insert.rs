//! InsertBuilder：构建 STORE（INSERT）语句。
//!
//! 单行插入在所有方言上都是 `INSERT INTO t (keys) VALUES (...)`。多行插入：
//!
//! - 支持多 VALUES 的方言：`VALUES (...), (...)`；
//! - Oracle：`SELECT ... FROM DUAL UNION ALL SELECT ... FROM DUAL`；
//! - SQLite：`SELECT v AS k, ... UNION SELECT ...`，必须显式给出 keys。

use crate::builder::{Operation, Statement};
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    dialect: Dialect,
    table: Option<String>,
    keys: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl InsertBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: None,
            keys: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// 渲染好的 key；`*` 等同于不指定列。
    pub fn keys(&mut self, keys: Vec<String>) -> &mut Self {
        self.keys = keys.into_iter().filter(|k| k != "*").collect();
        self
    }

    pub fn row(&mut self, row: Vec<String>) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn rows(&mut self, rows: Vec<Vec<String>>) -> &mut Self {
        self.rows = rows;
        self
    }

    fn validate(&self) -> Result<String> {
        let table = self
            .table
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| self.dialect.table_reference(t))
            .ok_or_else(|| QueryError::missing(Operation::Store, "table"))?;

        let Some(first) = self.rows.first() else {
            return Err(QueryError::missing(Operation::Store, "values"));
        };
        let width = first.len();
        if width == 0 {
            return Err(QueryError::missing(Operation::Store, "values"));
        }
        if let Some(pos) = self.rows.iter().position(|r| r.len() != width) {
            return Err(QueryError::mismatched(
                Operation::Store,
                format!("row {pos} has {} values, expected {width}", self.rows[pos].len()),
            ));
        }
        if !self.keys.is_empty() && self.keys.len() != width {
            return Err(QueryError::mismatched(
                Operation::Store,
                format!("{} keys for {width} values", self.keys.len()),
            ));
        }
        Ok(table)
    }

    fn write_head(&self, buf: &mut StringBuilder, table: &str) {
        buf.write_leading("INSERT INTO ");
        buf.write_str(table);
        if !self.keys.is_empty() {
            buf.write_str(" (");
            buf.write_joined(&self.keys, ",");
            buf.write_str(")");
        }
    }

    fn write_values(&self, buf: &mut StringBuilder) {
        buf.write_leading("VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_str("(");
            buf.write_joined(row, ",");
            buf.write_str(")");
        }
    }

    fn write_dual_union(&self, buf: &mut StringBuilder) {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                buf.write_leading("UNION ALL");
            }
            buf.write_leading("SELECT ");
            buf.write_joined(row, ",");
            buf.write_str(" FROM DUAL");
        }
    }

    fn write_aliased_union(&self, buf: &mut StringBuilder) {
        for (i, row) in self.rows.iter().enumerate() {
            if i == 0 {
                let aliased: Vec<String> = row
                    .iter()
                    .zip(&self.keys)
                    .map(|(v, k)| format!("{v} AS {k}"))
                    .collect();
                buf.write_leading("SELECT ");
                buf.write_joined(&aliased, ", ");
            } else {
                buf.write_leading("UNION SELECT ");
                buf.write_joined(row, ", ");
            }
        }
    }
}

impl Statement for InsertBuilder {
    fn operation(&self) -> Operation {
        Operation::Store
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn build(&self) -> Result<String> {
        let table = self.validate()?;
        let mut buf = StringBuilder::new();

        if self.rows.len() == 1 || self.dialect.supports_multi_values() {
            self.write_head(&mut buf, &table);
            self.write_values(&mut buf);
            return Ok(buf.into_string());
        }

        match self.dialect {
            Dialect::Oracle => {
                self.write_head(&mut buf, &table);
                self.write_dual_union(&mut buf);
            }
            Dialect::SQLite => {
                if self.keys.is_empty() {
                    return Err(QueryError::missing(Operation::Store, "keys"));
                }
                buf.write_leading("INSERT INTO ");
                buf.write_str(&table);
                self.write_aliased_union(&mut buf);
            }
            other => return Err(QueryError::UnsupportedDialect(other.to_string())),
        }
        Ok(buf.into_string())
    }
}
