//! 列定义：CREATE TABLE 中的一列。
//!
//! [`ColumnDefinition`] 是一次构建、多次渲染的不可变值：setter 全部按值消费 `self`，
//! 渲染只读，同一个定义可以对任意方言重复渲染。

use crate::compose::Composer;
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::value::SqlValue;
use std::fmt;
use std::str::FromStr;

/// 逻辑列类型；具体关键字由 [`Dialect::column_type`] 决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Decimal,
    Bool,
    Time,
    Date,
    DateTime,
    Timestamp,
    Text,
    Blob,
}

impl ColumnType {
    pub const ALL: [ColumnType; 11] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Decimal,
        Self::Bool,
        Self::Time,
        Self::Date,
        Self::DateTime,
        Self::Timestamp,
        Self::Text,
        Self::Blob,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Bool => "BOOL",
            Self::Time => "TIME",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| QueryError::InvalidColumnDefinition(format!("unknown column type `{s}`")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    name: String,
    ty: ColumnType,
    length: Option<u32>,
    unsigned: bool,
    zerofill: bool,
    charset: Option<String>,
    collation: Option<String>,
    not_null: bool,
    default: Option<SqlValue>,
    auto_increment: bool,
    unique: bool,
    primary_key: bool,
}

impl ColumnDefinition {
    pub fn new(name: &str, ty: ColumnType) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueryError::InvalidColumnDefinition(
                "empty column name".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            ty,
            length: None,
            unsigned: false,
            zerofill: false,
            charset: None,
            collation: None,
            not_null: false,
            default: None,
            auto_increment: false,
            unique: false,
            primary_key: false,
        })
    }

    /// 类型以文本给出（`"STRING"`、`"integer"` ...）。
    pub fn parse(name: &str, ty: &str) -> Result<Self> {
        Self::new(name, ty.parse()?)
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    pub fn zerofill(mut self) -> Self {
        self.zerofill = true;
        self
    }

    /// 空字符串等同于不设置。
    pub fn charset(mut self, charset: &str) -> Self {
        let charset = charset.trim();
        self.charset = (!charset.is_empty()).then(|| charset.to_string());
        self
    }

    pub fn collate(mut self, collation: &str) -> Self {
        let collation = collation.trim();
        self.collation = (!collation.is_empty()).then(|| collation.to_string());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<SqlValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    pub fn validate(&self) -> Result<()> {
        if self.length == Some(0) {
            return Err(QueryError::InvalidColumnDefinition(format!(
                "column `{}` has zero length",
                self.name
            )));
        }
        Ok(())
    }

    pub fn render(&self, dialect: Dialect) -> Result<String> {
        self.render_with(&Composer::new(dialect))
    }

    /// 使用给定 Composer（及其 escaper）渲染默认值。
    pub fn render_with(&self, c: &Composer) -> Result<String> {
        self.validate()?;
        let dialect = c.dialect();

        let mut parts: Vec<String> = Vec::with_capacity(8);
        parts.push(dialect.quote_identifier(&self.name));

        let keyword = dialect.column_type(self.ty);
        match self.length {
            Some(len) if dialect.column_accepts_length(self.ty) && !keyword.contains('(') => {
                parts.push(format!("{keyword}({len})"));
            }
            _ => parts.push(keyword.to_string()),
        }

        match dialect {
            Dialect::MySQLi | Dialect::MySQLPdo => {
                if self.unsigned {
                    parts.push("UNSIGNED".to_string());
                }
                if self.zerofill {
                    parts.push("ZEROFILL".to_string());
                }
                if let Some(cs) = &self.charset {
                    parts.push(format!("CHARACTER SET {cs}"));
                }
                if let Some(co) = &self.collation {
                    parts.push(format!("COLLATE {co}"));
                }
            }
            Dialect::PostgreSQL => {
                if let Some(co) = &self.collation {
                    parts.push(format!("COLLATE \"{co}\""));
                }
            }
            Dialect::SQLServer => {
                if let Some(co) = &self.collation {
                    parts.push(format!("COLLATE {co}"));
                }
            }
            Dialect::SQLite => {
                if self.unsigned && !self.primary_key {
                    parts.push("UNSIGNED".to_string());
                }
                if let Some(co) = &self.collation {
                    parts.push(format!("COLLATE {co}"));
                }
            }
            Dialect::Oracle | Dialect::DB2 => {}
        }

        if self.not_null {
            parts.push("NOT NULL".to_string());
        }
        if let Some(v) = &self.default {
            parts.push(format!("DEFAULT {}", c.value(v)?));
        }

        if self.auto_increment {
            match dialect {
                Dialect::MySQLi | Dialect::MySQLPdo => parts.push("AUTO_INCREMENT".to_string()),
                Dialect::PostgreSQL | Dialect::Oracle | Dialect::DB2 => {
                    parts.push("GENERATED BY DEFAULT AS IDENTITY".to_string())
                }
                Dialect::SQLServer => parts.push("IDENTITY(1,1)".to_string()),
                // SQLite 只在主键上支持 AUTOINCREMENT，见下方
                Dialect::SQLite => {}
            }
        }

        if self.unique {
            parts.push("UNIQUE".to_string());
        }
        if self.primary_key {
            parts.push("PRIMARY KEY".to_string());
            if dialect == Dialect::SQLite && self.auto_increment {
                parts.push("AUTOINCREMENT".to_string());
            }
        }

        Ok(parts.join(" "))
    }
}
