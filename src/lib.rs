//! halo-query：面向多数据库方言的 SQL 语句组装库。
//!
//! 通过 [`Query`] 链式收集表名、keys、values、条件等片段，终结调用时按方言
//! 选择对应的语句构建器输出最终 SQL 文本；本库不执行 SQL，也不管理连接。

pub mod builder;
pub mod column;
pub mod compose;
#[cfg(test)]
mod compose_tests;
pub mod condition;
pub mod create_table;
pub mod datetime;
pub mod delete;
pub mod dialect;
pub mod drop_table;
pub mod error;
pub mod escape;
pub mod insert;
#[cfg(test)]
mod insert_tests;
pub mod macros;
pub use crate::macros::*;
#[cfg(test)]
mod macros_tests;
pub mod query;
pub mod select;
#[cfg(test)]
mod select_tests;
pub(crate) mod string_builder;
pub mod truncate;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;

pub use crate::builder::{BuildParams, Operation, Statement};
pub use crate::column::{ColumnDefinition, ColumnType};
pub use crate::compose::Composer;
pub use crate::condition::{
    Combinator, Condition, ConditionValue, IntoCondition, OnClause, OnOperator, Operator,
    Predicate,
};
pub use crate::create_table::CreateTableBuilder;
pub use crate::datetime::{convert_date, convert_time};
pub use crate::delete::DeleteBuilder;
pub use crate::dialect::{
    DefaultDialectGuard, Dialect, TABLE_PREFIX_PLACEHOLDER, default_dialect, set_default_dialect,
    set_default_dialect_scoped,
};
pub use crate::drop_table::DropTableBuilder;
pub use crate::error::{ErrorKind, QueryError, Result};
pub use crate::escape::{Escaper, FnEscaper, StandardEscaper, escape_fn};
pub use crate::insert::InsertBuilder;
pub use crate::query::Query;
pub use crate::select::{Join, JoinType, SelectBuilder};
pub use crate::truncate::TruncateBuilder;
pub use crate::update::UpdateBuilder;
pub use crate::value::SqlValue;
