//! SelectBuilder：构建 GET（SELECT）语句。

use crate::builder::{Operation, Statement};
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::string_builder::StringBuilder;
use std::fmt;
use std::str::FromStr;

/// JOIN 类型；[`JoinType::Plain`] 渲染为不带修饰的 `JOIN`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinType {
    #[default]
    Plain,
    Inner,
    Natural,
    Cross,
    Left,
    Right,
    LeftOuter,
    RightOuter,
    FullOuter,
}

impl JoinType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Inner => "INNER",
            Self::Natural => "NATURAL",
            Self::Cross => "CROSS",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::LeftOuter => "LEFT OUTER",
            Self::RightOuter => "RIGHT OUTER",
            Self::FullOuter => "FULL OUTER",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "" => Ok(Self::Plain),
            "INNER" => Ok(Self::Inner),
            "NATURAL" => Ok(Self::Natural),
            "CROSS" => Ok(Self::Cross),
            "LEFT" => Ok(Self::Left),
            "RIGHT" => Ok(Self::Right),
            "LEFT OUTER" => Ok(Self::LeftOuter),
            "RIGHT OUTER" => Ok(Self::RightOuter),
            "FULL OUTER" => Ok(Self::FullOuter),
            _ => Err(QueryError::invalid_clause(
                "join",
                format!("unsupported join type `{s}`"),
            )),
        }
    }
}

/// 一个 JOIN 片段；`table` 是逻辑表名，渲染时和主表一样加前缀占位符。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: String,
    pub alias: Option<String>,
}

impl Join {
    pub fn new(join_type: JoinType, table: &str, alias: Option<&str>) -> Result<Self> {
        let table = table.trim();
        if table.is_empty() {
            return Err(QueryError::invalid_clause("join", "empty table name"));
        }
        Ok(Self {
            join_type,
            table: table.to_string(),
            alias: alias
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        })
    }

    fn write_to(&self, dialect: Dialect, buf: &mut StringBuilder) {
        if self.join_type != JoinType::Plain {
            buf.write_leading(self.join_type.as_str());
        }
        buf.write_leading("JOIN ");
        buf.write_str(&dialect.table_reference(&self.table));
        if let Some(alias) = &self.alias {
            buf.write_str(" AS ");
            buf.write_str(alias);
        }
    }
}

/// LIMIT/OFFSET 子句（含前导空格）；`limit == 0` 时为空。
pub(crate) fn limit_clause(dialect: Dialect, limit: u64, offset: u64, has_order: bool) -> String {
    if limit == 0 {
        return String::new();
    }
    match dialect {
        Dialect::MySQLi | Dialect::MySQLPdo => {
            if offset > 0 {
                format!(" LIMIT {offset},{limit}")
            } else {
                format!(" LIMIT {limit}")
            }
        }
        Dialect::PostgreSQL | Dialect::SQLite => {
            if offset > 0 {
                format!(" LIMIT {limit} OFFSET {offset}")
            } else {
                format!(" LIMIT {limit}")
            }
        }
        Dialect::Oracle => format!(" OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY"),
        // OFFSET/FETCH 在 SQL Server 上必须跟在 ORDER BY 之后
        Dialect::SQLServer => {
            let order = if has_order { "" } else { " ORDER BY 1" };
            format!("{order} OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY")
        }
        Dialect::DB2 => {
            if offset > 0 {
                format!(" OFFSET {offset} ROWS FETCH FIRST {limit} ROWS ONLY")
            } else {
                format!(" FETCH FIRST {limit} ROWS ONLY")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectBuilder {
    dialect: Dialect,
    distinct: bool,
    table: Option<String>,
    keys: Vec<String>,
    joins: Vec<Join>,
    using: Vec<String>,
    on: Option<String>,
    where_expr: Option<String>,
    group_by: Vec<String>,
    having: Vec<String>,
    order_by: Vec<String>,
    limit: u64,
    offset: u64,
}

impl SelectBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            distinct: false,
            table: None,
            keys: Vec::new(),
            joins: Vec::new(),
            using: Vec::new(),
            on: None,
            where_expr: None,
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: 0,
            offset: 0,
        }
    }

    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    pub fn keys(&mut self, keys: Vec<String>) -> &mut Self {
        self.keys = keys;
        self
    }

    pub fn join(&mut self, join: Join) -> &mut Self {
        self.joins.push(join);
        self
    }

    pub fn joins(&mut self, joins: Vec<Join>) -> &mut Self {
        self.joins = joins;
        self
    }

    pub fn using(&mut self, columns: Vec<String>) -> &mut Self {
        self.using = columns;
        self
    }

    pub fn on(&mut self, expr: Option<String>) -> &mut Self {
        self.on = expr;
        self
    }

    pub fn where_expr(&mut self, expr: Option<String>) -> &mut Self {
        self.where_expr = expr;
        self
    }

    pub fn group_by(&mut self, columns: Vec<String>) -> &mut Self {
        self.group_by = columns;
        self
    }

    pub fn having(&mut self, clauses: Vec<String>) -> &mut Self {
        self.having = clauses;
        self
    }

    /// 每一项形如 `col DESC`，已渲染。
    pub fn order_by(&mut self, items: Vec<String>) -> &mut Self {
        self.order_by = items;
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = limit;
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = offset;
        self
    }
}

impl Statement for SelectBuilder {
    fn operation(&self) -> Operation {
        Operation::Get
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
            .ok_or_else(|| QueryError::missing(Operation::Get, "table"))?;
        if self.keys.is_empty() {
            return Err(QueryError::missing(Operation::Get, "keys"));
        }

        let mut buf = StringBuilder::new();
        buf.write_leading("SELECT");
        if self.distinct {
            buf.write_str(" DISTINCT");
        }
        buf.write_str(" ");
        buf.write_joined(&self.keys, ",");
        buf.write_leading("FROM ");
        buf.write_str(&table);

        for join in &self.joins {
            join.write_to(self.dialect, &mut buf);
        }
        if !self.joins.is_empty() {
            if !self.using.is_empty() {
                buf.write_leading("USING (");
                buf.write_joined(&self.using, ",");
                buf.write_str(")");
            } else if let Some(on) = &self.on {
                buf.write_clause("ON", on);
            }
        }

        if let Some(w) = &self.where_expr {
            buf.write_clause("WHERE", w);
        }
        buf.write_clause("GROUP BY", &self.group_by.join(","));
        buf.write_clause("HAVING", &self.having.join(" AND "));
        buf.write_clause("ORDER BY", &self.order_by.join(", "));
        buf.write_str(&limit_clause(
            self.dialect,
            self.limit,
            self.offset,
            !self.order_by.is_empty(),
        ));

        Ok(buf.into_string())
    }
}
