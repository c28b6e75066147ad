//! Query：流式前端。
//!
//! 按调用顺序累积表名、keys、values、条件树、JOIN、排序、分组与列定义；
//! 终结调用时选择对应的语句构建器渲染 SQL，替换表前缀占位符，并按需清空状态。
//!
//! 每个会失败的调用都返回 `Result<&mut Self>`，校验在调用当下完成，失败时状态不变：
//!
//! ```
//! use halo_query::{Dialect, Query};
//!
//! let mut q = Query::with_dialect(Dialect::PostgreSQL);
//! q.table_prefix("app_");
//! let sql = q
//!     .table("users")?
//!     .keys(["id", "name"])?
//!     .where_("id", "=", 1)?
//!     .get(0, 0)?;
//! assert_eq!(sql, "SELECT id,name FROM app_users WHERE id = 1");
//! # Ok::<(), halo_query::QueryError>(())
//! ```
//!
//! 一个 `Query` 同一时刻只描述一条语句，不要在并发的语句之间共享。

use crate::builder::{BuildParams, Operation, Statement};
use crate::column::ColumnDefinition;
use crate::compose::Composer;
use crate::condition::{Combinator, Condition, ConditionValue, IntoCondition, OnClause};
use crate::create_table::CreateTableBuilder;
use crate::delete::DeleteBuilder;
use crate::dialect::{Dialect, TABLE_PREFIX_PLACEHOLDER, default_dialect};
use crate::drop_table::DropTableBuilder;
use crate::error::{QueryError, Result};
use crate::escape::Escaper;
use crate::insert::InsertBuilder;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::select::{Join, SelectBuilder};
use crate::truncate::TruncateBuilder;
use crate::update::UpdateBuilder;
use crate::value::SqlValue;

/// 累积中的语句片段；reset 时整体恢复为默认值。
#[derive(Debug, Clone, Default)]
struct QueryState {
    table: Option<String>,
    distinct: bool,
    keys: Vec<String>,
    values: Vec<Vec<String>>,
    condition: Option<Condition>,
    joins: Vec<Join>,
    using: Vec<String>,
    on: OnClause,
    group_by: Vec<String>,
    having: Vec<String>,
    order_by: Vec<String>,
    columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone)]
pub struct Query {
    composer: Composer,
    prefix: String,
    auto_reset: bool,
    state: QueryState,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// 使用全局默认方言。
    pub fn new() -> Self {
        Self::with_dialect(default_dialect())
    }

    pub fn with_dialect(dialect: Dialect) -> Self {
        Self::from_composer(Composer::new(dialect))
    }

    /// 按 model 名称选择方言，例如 `"MYSQL_PDO"`、`"SQLITE_PDO"`。
    pub fn from_model(model: &str) -> Result<Self> {
        Ok(Self::with_dialect(model.parse()?))
    }

    /// 注入驱动提供的字符串转义函数。
    pub fn with_escaper(dialect: Dialect, escaper: impl Escaper + 'static) -> Self {
        Self::from_composer(Composer::with_escaper(dialect, escaper))
    }

    fn from_composer(composer: Composer) -> Self {
        Self {
            composer,
            prefix: String::new(),
            auto_reset: false,
            state: QueryState::default(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.composer.dialect()
    }

    pub fn set_escaper(&mut self, escaper: impl Escaper + 'static) -> &mut Self {
        self.composer.set_escaper(escaper);
        self
    }

    pub fn table_prefix(&mut self, prefix: &str) -> &mut Self {
        self.prefix = prefix.trim().to_string();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 开启后每次成功构建都会清空累积的片段（保留表前缀）。
    pub fn auto_reset(&mut self, enabled: bool) -> &mut Self {
        self.auto_reset = enabled;
        self
    }

    pub fn table(&mut self, name: &str) -> Result<&mut Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueryError::invalid_clause("table", "empty table name"));
        }
        self.state.table = Some(name.to_string());
        Ok(self)
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.state.distinct = true;
        self
    }

    /// 设置 key 列表；支持 `base=>alias` 与 `fn::arg` 记号，`*` 不加引号。
    pub fn keys<T: IntoStrings>(&mut self, keys: T) -> Result<&mut Self> {
        let keys = collect_into_strings(keys);
        self.state.keys = self.composer.keys(&keys)?;
        Ok(self)
    }

    /// 追加一行值；多次调用得到多行。
    pub fn values<I, V>(&mut self, row: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        let row: Vec<SqlValue> = row.into_iter().map(Into::into).collect();
        if row.is_empty() {
            return Err(QueryError::InvalidValue("empty value row".to_string()));
        }
        let rendered = self.composer.values(&row)?;
        self.state.values.push(rendered);
        Ok(self)
    }

    /// 设置 WHERE 的根条件（覆盖已有条件）。
    pub fn where_(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<ConditionValue>,
    ) -> Result<&mut Self> {
        let leaf = Condition::leaf(column, operator, value)?;
        self.state.condition = Some(leaf);
        Ok(self)
    }

    pub fn and_where(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<ConditionValue>,
    ) -> Result<&mut Self> {
        let leaf = Condition::leaf(column, operator, value)?;
        self.graft(Combinator::And, leaf);
        Ok(self)
    }

    pub fn or_where(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<ConditionValue>,
    ) -> Result<&mut Self> {
        let leaf = Condition::leaf(column, operator, value)?;
        self.graft(Combinator::Or, leaf);
        Ok(self)
    }

    /// 嵌套条件作为根：`(left COMBINATOR right)`。
    ///
    /// `left`/`right` 可以是 `(column, operator, value)` 三元组，也可以是已经构造好的 [`Condition`]。
    pub fn where_group(
        &mut self,
        left: impl IntoCondition,
        combinator: &str,
        right: impl IntoCondition,
    ) -> Result<&mut Self> {
        let group = Self::group(left, combinator, right)?;
        self.state.condition = Some(group);
        Ok(self)
    }

    pub fn and_where_group(
        &mut self,
        left: impl IntoCondition,
        combinator: &str,
        right: impl IntoCondition,
    ) -> Result<&mut Self> {
        let group = Self::group(left, combinator, right)?;
        self.graft(Combinator::And, group);
        Ok(self)
    }

    pub fn or_where_group(
        &mut self,
        left: impl IntoCondition,
        combinator: &str,
        right: impl IntoCondition,
    ) -> Result<&mut Self> {
        let group = Self::group(left, combinator, right)?;
        self.graft(Combinator::Or, group);
        Ok(self)
    }

    fn group(
        left: impl IntoCondition,
        combinator: &str,
        right: impl IntoCondition,
    ) -> Result<Condition> {
        let combinator: Combinator = combinator.parse()?;
        Ok(Condition::group(
            left.into_condition()?,
            combinator,
            right.into_condition()?,
        ))
    }

    fn graft(&mut self, combinator: Combinator, next: Condition) {
        self.state.condition = Some(match self.state.condition.take() {
            None => next,
            Some(root) => root.append(combinator, next),
        });
    }

    /// 追加一个 JOIN；`join_type` 为空字符串时输出不带修饰的 `JOIN`。
    pub fn join(&mut self, join_type: &str, table: &str, alias: Option<&str>) -> Result<&mut Self> {
        let join = Join::new(join_type.parse()?, table, alias)?;
        self.state.joins.push(join);
        Ok(self)
    }

    /// `USING (a,b)`；同时设置了 ON 时以 USING 为准。
    pub fn using<T: IntoStrings>(&mut self, columns: T) -> Result<&mut Self> {
        let columns = collect_into_strings(columns);
        if columns.is_empty() || columns.iter().any(|c| c.trim().is_empty()) {
            return Err(QueryError::invalid_clause("using", "empty column list"));
        }
        self.state.using = columns
            .iter()
            .map(|c| self.composer.identifier(c))
            .collect();
        Ok(self)
    }

    /// 重新开始 ON 子句。
    pub fn on(&mut self, first: &str, operator: &str, second: &str) -> Result<&mut Self> {
        self.state.on = OnClause::new(first, operator, second)?;
        Ok(self)
    }

    pub fn and_on(&mut self, first: &str, operator: &str, second: &str) -> Result<&mut Self> {
        self.state
            .on
            .push(Combinator::And, first, operator, second)?;
        Ok(self)
    }

    pub fn or_on(&mut self, first: &str, operator: &str, second: &str) -> Result<&mut Self> {
        self.state
            .on
            .push(Combinator::Or, first, operator, second)?;
        Ok(self)
    }

    pub fn order_by<T: IntoStrings>(&mut self, columns: T) -> Result<&mut Self> {
        self.order_by_dir(columns, Vec::<String>::new())
    }

    /// 第 i 个方向作用于第 i 列；方向可以少于列，缺省的列不写方向。
    /// 再次调用会替换之前的 ORDER BY，`group_by`、`having` 同理。
    pub fn order_by_dir<C, D>(&mut self, columns: C, directions: D) -> Result<&mut Self>
    where
        C: IntoStrings,
        D: IntoStrings,
    {
        let columns = collect_into_strings(columns);
        let directions = collect_into_strings(directions);
        if columns.is_empty() {
            return Err(QueryError::invalid_clause("order by", "empty column list"));
        }
        if directions.len() > columns.len() {
            return Err(QueryError::invalid_clause(
                "order by",
                format!(
                    "{} directions for {} columns",
                    directions.len(),
                    columns.len()
                ),
            ));
        }

        let mut items = Vec::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            if col.trim().is_empty() {
                return Err(QueryError::invalid_clause("order by", "empty column"));
            }
            let mut item = self.composer.identifier(col);
            if self.dialect() == Dialect::SQLite {
                item.push_str(" COLLATE NOCASE");
            }
            if let Some(dir) = directions.get(i).map(|d| d.trim().to_ascii_uppercase()) {
                match dir.as_str() {
                    "" => {}
                    "ASC" | "DESC" => {
                        item.push(' ');
                        item.push_str(&dir);
                    }
                    _ => {
                        return Err(QueryError::invalid_clause(
                            "order by",
                            format!("invalid direction `{dir}`"),
                        ));
                    }
                }
            }
            items.push(item);
        }
        self.state.order_by = items;
        Ok(self)
    }

    pub fn group_by<T: IntoStrings>(&mut self, columns: T) -> Result<&mut Self> {
        let columns = collect_into_strings(columns);
        if columns.is_empty() || columns.iter().any(|c| c.trim().is_empty()) {
            return Err(QueryError::invalid_clause("group by", "empty column list"));
        }
        let rendered: Vec<String> = columns
            .iter()
            .map(|c| self.composer.identifier(c))
            .collect();
        self.state.group_by = rendered;
        Ok(self)
    }

    /// HAVING 子句按原样拼接，多条之间用 `AND`。
    pub fn having<T: IntoStrings>(&mut self, clauses: T) -> Result<&mut Self> {
        let clauses = collect_into_strings(clauses);
        if clauses.is_empty() || clauses.iter().any(|c| c.trim().is_empty()) {
            return Err(QueryError::invalid_clause("having", "empty clause"));
        }
        self.state.having = clauses.into_iter().map(|c| c.trim().to_string()).collect();
        Ok(self)
    }

    /// CREATE 用的列定义。
    pub fn column(&mut self, column: ColumnDefinition) -> Result<&mut Self> {
        column.validate()?;
        self.state.columns.push(column);
        Ok(self)
    }

    /// 清空累积的片段；`deep` 同时清空表前缀。
    pub fn reset(&mut self, deep: bool) -> &mut Self {
        self.state = QueryState::default();
        if deep {
            self.prefix.clear();
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "halo_query", deep, "query state reset");
        self
    }

    fn where_sql(&self) -> Result<Option<String>> {
        self.state
            .condition
            .as_ref()
            .map(|c| c.render(&self.composer))
            .transpose()
    }

    fn table_name(&self) -> String {
        self.state.table.clone().unwrap_or_default()
    }

    /// 把累积状态交给对应操作的构建器；返回的 SQL 仍带有前缀占位符。
    pub fn statement(&self, operation: Operation, params: &BuildParams) -> Result<Box<dyn Statement>> {
        let dialect = self.dialect();
        let state = &self.state;
        let stmt: Box<dyn Statement> = match operation {
            Operation::Get => {
                let mut b = SelectBuilder::new(dialect);
                b.table(self.table_name())
                    .distinct(state.distinct)
                    .keys(state.keys.clone())
                    .joins(state.joins.clone())
                    .using(state.using.clone())
                    .on(state.on.render())
                    .where_expr(self.where_sql()?)
                    .group_by(state.group_by.clone())
                    .having(state.having.clone())
                    .order_by(state.order_by.clone())
                    .limit(params.limit)
                    .offset(params.offset);
                Box::new(b)
            }
            Operation::Store => {
                let mut b = InsertBuilder::new(dialect);
                b.table(self.table_name())
                    .keys(state.keys.clone())
                    .rows(state.values.clone());
                Box::new(b)
            }
            Operation::Update => {
                let mut b = UpdateBuilder::new(dialect);
                b.table(self.table_name())
                    .keys(state.keys.clone())
                    .rows(state.values.clone())
                    .where_expr(self.where_sql()?);
                Box::new(b)
            }
            Operation::Delete => {
                let mut b = DeleteBuilder::new(dialect);
                b.table(self.table_name()).where_expr(self.where_sql()?);
                Box::new(b)
            }
            Operation::Truncate => {
                let mut b = TruncateBuilder::with_composer(self.composer.clone());
                b.table(self.table_name());
                Box::new(b)
            }
            Operation::Create => {
                let name = params
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| self.table_name());
                let mut b = CreateTableBuilder::with_composer(self.composer.clone());
                b.create_table(name)
                    .if_not_exists(params.if_not_exists)
                    .engine(params.engine.clone())
                    .columns(state.columns.clone());
                Box::new(b)
            }
            Operation::Drop => {
                let mut b = DropTableBuilder::new(dialect);
                b.drop_table(self.table_name()).if_exists(params.if_exists);
                Box::new(b)
            }
        };
        Ok(stmt)
    }

    /// 构建指定操作的 SQL，替换表前缀占位符；开启 auto reset 时随后清空状态。
    pub fn build(&mut self, operation: Operation, params: &BuildParams) -> Result<String> {
        let sql = self
            .statement(operation, params)?
            .build()?
            .replace(TABLE_PREFIX_PLACEHOLDER, &self.prefix);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "halo_query",
            operation = %operation,
            dialect = %self.dialect(),
            sql = %sql,
            "query built"
        );

        if self.auto_reset {
            self.reset(false);
        }
        Ok(sql)
    }

    /// 以文本给出操作名（`"GET"`、`"store"` ...）；未知操作返回 `UnsupportedOperation`。
    pub fn get_query(&mut self, operation: &str, params: &BuildParams) -> Result<String> {
        let operation: Operation = operation.parse()?;
        self.build(operation, params)
    }

    pub fn get(&mut self, limit: u64, offset: u64) -> Result<String> {
        self.build(Operation::Get, &BuildParams::new().limit(limit).offset(offset))
    }

    pub fn store(&mut self) -> Result<String> {
        self.build(Operation::Store, &BuildParams::default())
    }

    pub fn update(&mut self) -> Result<String> {
        self.build(Operation::Update, &BuildParams::default())
    }

    pub fn delete(&mut self) -> Result<String> {
        self.build(Operation::Delete, &BuildParams::default())
    }

    pub fn truncate(&mut self) -> Result<String> {
        self.build(Operation::Truncate, &BuildParams::default())
    }

    /// `name` 为 `None` 时使用 `table()` 设置的表名。
    pub fn create(
        &mut self,
        name: Option<&str>,
        if_not_exists: bool,
        engine: Option<&str>,
    ) -> Result<String> {
        let params = BuildParams {
            name: name.map(str::to_string),
            if_not_exists,
            engine: engine.map(str::to_string),
            ..BuildParams::default()
        };
        self.build(Operation::Create, &params)
    }

    pub fn drop(&mut self, if_exists: bool) -> Result<String> {
        let params = BuildParams {
            if_exists,
            ..BuildParams::default()
        };
        self.build(Operation::Drop, &params)
    }
}
