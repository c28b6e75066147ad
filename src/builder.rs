//! 语句构建的公共约定：操作种类、[`Statement`] trait 与构建参数。

use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use dyn_clone::DynClone;
use std::fmt;
use std::str::FromStr;

/// 支持的逻辑操作（封闭集合）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Store,
    Update,
    Delete,
    Truncate,
    Create,
    Drop,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Self::Get,
        Self::Store,
        Self::Update,
        Self::Delete,
        Self::Truncate,
        Self::Create,
        Self::Drop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Store => "STORE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Truncate => "TRUNCATE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == upper)
            .ok_or_else(|| QueryError::UnsupportedOperation(s.to_string()))
    }
}

/// 单条语句的构建器：累积片段，`build()` 时校验并按方言模板渲染。
///
/// 返回的 SQL 仍然包含表前缀占位符，由调用方做最后的替换。
pub trait Statement: DynClone + fmt::Debug {
    fn operation(&self) -> Operation;

    fn dialect(&self) -> Dialect;

    fn build(&self) -> Result<String>;
}

dyn_clone::clone_trait_object!(Statement);

/// 终结调用的附加参数。
///
/// - `limit`/`offset`：GET；`limit == 0` 表示不限制，`offset` 只在有 limit 时生效。
/// - `name`/`if_not_exists`/`engine`：CREATE；`name` 为空时回落到累积的表名。
/// - `if_exists`：DROP。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildParams {
    pub limit: u64,
    pub offset: u64,
    pub name: Option<String>,
    pub if_not_exists: bool,
    pub engine: Option<String>,
    pub if_exists: bool,
}

impl BuildParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}
