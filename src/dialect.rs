//! Dialect（方言）：决定标识符引用、布尔字面量、列类型关键字与语句模板。

use crate::column::ColumnType;
use crate::error::QueryError;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 表前缀占位符：生成的表引用里都带着它，构建的最后一步再替换成真实前缀。
pub const TABLE_PREFIX_PLACEHOLDER: &str = "*_DBPREFIX_*";

/// 支持的数据库方言（封闭集合，构建上下文时选定后不再变化）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    MySQLi,
    MySQLPdo,
    PostgreSQL,
    Oracle,
    DB2,
    /// SQL Server（DBLIB 驱动）。
    SQLServer,
    SQLite,
}

static DEFAULT_DIALECT: AtomicU8 = AtomicU8::new(Dialect::MySQLi as u8);
static DEFAULT_DIALECT_LOCK: Mutex<()> = Mutex::new(());

impl Dialect {
    pub const ALL: [Dialect; 7] = [
        Self::MySQLi,
        Self::MySQLPdo,
        Self::PostgreSQL,
        Self::Oracle,
        Self::DB2,
        Self::SQLServer,
        Self::SQLite,
    ];

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::MySQLi,
            1 => Self::MySQLPdo,
            2 => Self::PostgreSQL,
            3 => Self::Oracle,
            4 => Self::DB2,
            5 => Self::SQLServer,
            6 => Self::SQLite,
            _ => Self::MySQLi,
        }
    }

    /// 规范的 model 名称（与驱动层约定的 token 一致）。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MySQLi => "MYSQLI",
            Self::MySQLPdo => "MYSQL_PDO",
            Self::PostgreSQL => "POSTGRESQL",
            Self::Oracle => "ORACLE_PDO",
            Self::DB2 => "DB2",
            Self::SQLServer => "DBLIB_PDO",
            Self::SQLite => "SQLITE_PDO",
        }
    }

    pub fn is_mysql_family(self) -> bool {
        matches!(self, Self::MySQLi | Self::MySQLPdo)
    }

    /// 为标识符加引号：MySQL 家族使用反引号，其余方言保持原样。
    ///
    /// 限定名按 `.` 拆开逐段加引号（`a.id` → `` `a`.`id` ``），`*` 段不加引号。
    pub fn quote_identifier(self, name: &str) -> String {
        if !self.is_mysql_family() {
            return name.to_string();
        }
        name.split('.')
            .map(|part| {
                if part == "*" {
                    part.to_string()
                } else {
                    format!("`{part}`")
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn bool_literal(self, v: bool) -> &'static str {
        match self {
            Self::MySQLi | Self::MySQLPdo | Self::PostgreSQL | Self::DB2 => {
                if v {
                    "TRUE"
                } else {
                    "FALSE"
                }
            }
            Self::Oracle | Self::SQLServer | Self::SQLite => {
                if v {
                    "1"
                } else {
                    "0"
                }
            }
        }
    }

    /// 生成带前缀占位符的表引用，例如 MySQL 下的 `` `*_DBPREFIX_*users` ``。
    pub fn table_reference(self, table: &str) -> String {
        let name = format!("{TABLE_PREFIX_PLACEHOLDER}{}", table.trim());
        if self.is_mysql_family() {
            format!("`{name}`")
        } else {
            name
        }
    }

    /// 逻辑列类型到原生类型关键字的映射。
    pub fn column_type(self, ty: ColumnType) -> &'static str {
        use ColumnType::*;
        match self {
            Self::MySQLi | Self::MySQLPdo => match ty {
                String => "VARCHAR",
                Integer => "INTEGER",
                Float => "FLOAT",
                Decimal => "DECIMAL",
                Bool => "BOOL",
                Time => "TIME",
                Date => "DATE",
                DateTime => "DATETIME",
                Timestamp => "TIMESTAMP",
                Text => "TEXT",
                Blob => "BLOB",
            },
            Self::PostgreSQL => match ty {
                String => "VARCHAR",
                Integer => "INTEGER",
                Float => "FLOAT4",
                Decimal => "DECIMAL",
                Bool => "BOOL",
                Time => "TIME",
                Date => "DATE",
                DateTime => "TIMESTAMP",
                Timestamp => "TIMESTAMP",
                Text => "TEXT",
                Blob => "BYTEA",
            },
            Self::Oracle => match ty {
                String => "VARCHAR",
                Integer => "NUMBER",
                Float => "FLOAT",
                Decimal => "NUMBER",
                Bool => "NUMBER(1)",
                Time | Date | DateTime | Timestamp => "DATE",
                Text => "CLOB",
                Blob => "BLOB",
            },
            Self::DB2 => match ty {
                String => "VARCHAR",
                Integer => "INTEGER",
                Float => "REAL",
                Decimal => "DECIMAL",
                Bool => "SMALLINT",
                Time => "TIME",
                Date => "DATE",
                DateTime | Timestamp => "TIMESTAMP",
                Text => "CLOB",
                Blob => "BLOB",
            },
            Self::SQLServer => match ty {
                String => "NVARCHAR",
                Integer => "INTEGER",
                Float => "FLOAT",
                Decimal => "DECIMAL",
                Bool => "BIT",
                Time => "TIME",
                Date => "DATE",
                DateTime => "DATETIME",
                Timestamp => "TIMESTAMP",
                Text => "NVARCHAR",
                Blob => "BLOB",
            },
            Self::SQLite => match ty {
                String => "TEXT",
                Integer => "INTEGER",
                Float => "REAL",
                Decimal | Bool => "NUMERIC",
                Time | Date | DateTime | Timestamp => "TEXT",
                Text => "TEXT",
                Blob => "BLOB",
            },
        }
    }

    /// 类型关键字后能否跟 `(length)`；不接受长度的类型忽略 `length`。
    pub fn column_accepts_length(self, ty: ColumnType) -> bool {
        use ColumnType::*;
        match self {
            Self::MySQLi | Self::MySQLPdo => !matches!(ty, Bool | Date),
            Self::PostgreSQL => matches!(ty, String | Decimal | Time | DateTime | Timestamp),
            Self::Oracle => matches!(ty, String | Integer | Float | Decimal),
            Self::DB2 => matches!(ty, String | Decimal | DateTime | Timestamp | Text | Blob),
            Self::SQLServer => matches!(ty, String | Float | Decimal | Time | Text),
            Self::SQLite => false,
        }
    }

    /// `CREATE TABLE IF NOT EXISTS` 是否可用；不支持时直接省略该子句。
    pub fn supports_create_if_not_exists(self) -> bool {
        matches!(
            self,
            Self::MySQLi | Self::MySQLPdo | Self::PostgreSQL | Self::SQLite
        )
    }

    /// `DROP TABLE IF EXISTS` 是否可用；不支持时直接省略该子句。
    pub fn supports_drop_if_exists(self) -> bool {
        matches!(
            self,
            Self::MySQLi | Self::MySQLPdo | Self::PostgreSQL | Self::SQLServer
        )
    }

    /// 是否支持 `VALUES (...), (...)` 形式的多行插入。
    pub fn supports_multi_values(self) -> bool {
        !matches!(self, Self::Oracle | Self::SQLite)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MYSQLI" | "MYSQL" => Ok(Self::MySQLi),
            "MYSQL_PDO" => Ok(Self::MySQLPdo),
            "POSTGRESQL" | "POSTGRES" | "PGSQL" => Ok(Self::PostgreSQL),
            "ORACLE_PDO" | "ORACLE" => Ok(Self::Oracle),
            "DB2" => Ok(Self::DB2),
            "DBLIB_PDO" | "DBLIB" | "SQLSERVER" | "MSSQL" => Ok(Self::SQLServer),
            "SQLITE_PDO" | "SQLITE" => Ok(Self::SQLite),
            _ => Err(QueryError::UnsupportedDialect(s.to_string())),
        }
    }
}

/// 获取当前全局默认 Dialect。
pub fn default_dialect() -> Dialect {
    Dialect::from_u8(DEFAULT_DIALECT.load(Ordering::Relaxed))
}

/// 设置全局默认 Dialect，返回旧值。
pub fn set_default_dialect(dialect: Dialect) -> Dialect {
    let old = DEFAULT_DIALECT.swap(dialect as u8, Ordering::Relaxed);
    Dialect::from_u8(old)
}

/// 修改全局默认 Dialect 的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultDialectGuard {
    _lock: MutexGuard<'static, ()>,
    old: Dialect,
}

impl Drop for DefaultDialectGuard {
    fn drop(&mut self) {
        set_default_dialect(self.old);
    }
}

/// 在一个作用域内临时设置默认 Dialect，退出作用域后自动恢复。
pub fn set_default_dialect_scoped(dialect: Dialect) -> DefaultDialectGuard {
    let lock = DEFAULT_DIALECT_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_dialect(dialect);
    DefaultDialectGuard { _lock: lock, old }
}
