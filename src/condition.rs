//! 条件树：WHERE 布尔表达式与 JOIN 的 ON 子句。
//!
//! 顶层链式调用（`and_where` / `or_where`）用 [`Condition::append`] 左折叠，
//! 不加括号；显式嵌套（三元组套三元组）用 [`Condition::group`]，渲染时整体加括号。

use crate::compose::Composer;
use crate::error::{QueryError, Result};
use crate::value::SqlValue;
use std::fmt;
use std::str::FromStr;

/// WHERE 运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    /// `!=`
    NotEqual,
    /// `<>`，与 `!=` 同义，按书写原样输出。
    LessGreater,
    GreaterThan,
    GreaterEqualThan,
    LessThan,
    LessEqualThan,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    Is,
    IsNot,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessGreater => "<>",
            Self::GreaterThan => ">",
            Self::GreaterEqualThan => ">=",
            Self::LessThan => "<",
            Self::LessEqualThan => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }

    fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessGreater
                | Self::GreaterThan
                | Self::GreaterEqualThan
                | Self::LessThan
                | Self::LessEqualThan
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "=" => Ok(Self::Equal),
            "!=" => Ok(Self::NotEqual),
            "<>" => Ok(Self::LessGreater),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterEqualThan),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessEqualThan),
            "LIKE" => Ok(Self::Like),
            "NOT LIKE" | "NOTLIKE" => Ok(Self::NotLike),
            "IN" => Ok(Self::In),
            "NOT IN" | "NOTIN" => Ok(Self::NotIn),
            "BETWEEN" => Ok(Self::Between),
            "NOT BETWEEN" | "NOTBETWEEN" => Ok(Self::NotBetween),
            "IS" => Ok(Self::Is),
            "IS NOT" | "ISNOT" => Ok(Self::IsNot),
            _ => Err(QueryError::InvalidCondition(format!(
                "unknown operator `{s}`"
            ))),
        }
    }
}

/// AND / OR。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Combinator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(QueryError::InvalidCondition(format!(
                "unknown combinator `{s}`"
            ))),
        }
    }
}

/// 条件值：单值、列表或区间。
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Scalar(SqlValue),
    List(Vec<SqlValue>),
    Range(SqlValue, SqlValue),
}

impl ConditionValue {
    fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::List(_) => "list",
            Self::Range(..) => "range",
        }
    }
}

macro_rules! impl_scalar_condition_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ConditionValue {
                fn from(v: $t) -> Self {
                    Self::Scalar(v.into())
                }
            }
        )*
    };
}

impl_scalar_condition_value!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    time::OffsetDateTime,
    SqlValue,
);

impl<T: Into<SqlValue>> From<Option<T>> for ConditionValue {
    fn from(v: Option<T>) -> Self {
        Self::Scalar(SqlValue::from_option(v))
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for ConditionValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for ConditionValue {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<SqlValue>, B: Into<SqlValue>> From<(A, B)> for ConditionValue {
    fn from((lo, hi): (A, B)) -> Self {
        Self::Range(lo.into(), hi.into())
    }
}

/// 叶子条件：`column operator value`，构造时已校验运算符与值的形状匹配。
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    column: String,
    operator: Operator,
    value: ConditionValue,
}

impl Predicate {
    pub fn new(column: &str, operator: Operator, value: ConditionValue) -> Result<Self> {
        let column = column.trim();
        if column.is_empty() {
            return Err(QueryError::InvalidCondition("empty column".to_string()));
        }

        let value = match (operator, value) {
            (Operator::Is | Operator::IsNot, ConditionValue::Scalar(v)) => {
                if !v.is_null_like() {
                    return Err(QueryError::InvalidCondition(format!(
                        "`{operator}` only accepts NULL"
                    )));
                }
                ConditionValue::Scalar(SqlValue::Null)
            }
            (op, ConditionValue::Scalar(v)) if op.is_comparison() => ConditionValue::Scalar(v),
            (Operator::Like | Operator::NotLike, ConditionValue::Scalar(v)) => {
                if matches!(v, SqlValue::Null) {
                    return Err(QueryError::InvalidCondition(format!(
                        "`{operator}` needs a pattern"
                    )));
                }
                ConditionValue::Scalar(v)
            }
            (Operator::In | Operator::NotIn, ConditionValue::List(list)) => {
                if list.is_empty() {
                    return Err(QueryError::InvalidCondition(format!(
                        "`{operator}` needs a non-empty list"
                    )));
                }
                ConditionValue::List(list)
            }
            (Operator::Between | Operator::NotBetween, ConditionValue::Range(lo, hi)) => {
                ConditionValue::Range(lo, hi)
            }
            (Operator::Between | Operator::NotBetween, ConditionValue::List(list)) => {
                let Ok([lo, hi]) = <[SqlValue; 2]>::try_from(list) else {
                    return Err(QueryError::InvalidCondition(format!(
                        "`{operator}` needs exactly two values"
                    )));
                };
                ConditionValue::Range(lo, hi)
            }
            (op, v) => {
                return Err(QueryError::InvalidCondition(format!(
                    "operator `{op}` does not accept a {} value",
                    v.shape()
                )));
            }
        };

        Ok(Self {
            column: column.to_string(),
            operator,
            value,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &ConditionValue {
        &self.value
    }

    fn render(&self, c: &Composer) -> Result<String> {
        let col = c.identifier(&self.column);
        let op = self.operator;
        match (&self.operator, &self.value) {
            (Operator::Is | Operator::IsNot, _) => Ok(format!("{col} {op} NULL")),
            (_, ConditionValue::Scalar(v)) => Ok(format!("{col} {op} {}", c.value(v)?)),
            (_, ConditionValue::List(list)) => {
                Ok(format!("{col} {op} ({})", c.values(list)?.join(",")))
            }
            (_, ConditionValue::Range(lo, hi)) => Ok(format!(
                "{col} {op} {} AND {}",
                c.value(lo)?,
                c.value(hi)?
            )),
        }
    }
}

/// WHERE 条件树。
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Predicate),
    /// 显式嵌套，渲染为 `(left COMBINATOR right)`。
    Group {
        left: Box<Condition>,
        combinator: Combinator,
        right: Box<Condition>,
    },
    /// 顶层链式拼接，渲染为 `left COMBINATOR right`。
    Chain {
        left: Box<Condition>,
        combinator: Combinator,
        right: Box<Condition>,
    },
}

impl Condition {
    pub fn leaf(
        column: &str,
        operator: &str,
        value: impl Into<ConditionValue>,
    ) -> Result<Self> {
        let operator = operator.parse()?;
        Ok(Self::Leaf(Predicate::new(column, operator, value.into())?))
    }

    /// wrapNested：把两个条件组合成一个带括号的整体。
    pub fn group(left: Condition, combinator: Combinator, right: Condition) -> Self {
        Self::Group {
            left: Box::new(left),
            combinator,
            right: Box::new(right),
        }
    }

    /// appendTopLevel：`root = Chain(root, combinator, next)`，得到严格左结合的树。
    pub fn append(self, combinator: Combinator, next: Condition) -> Self {
        Self::Chain {
            left: Box::new(self),
            combinator,
            right: Box::new(next),
        }
    }

    pub fn render(&self, c: &Composer) -> Result<String> {
        match self {
            Self::Leaf(p) => p.render(c),
            Self::Group {
                left,
                combinator,
                right,
            } => Ok(format!(
                "({} {combinator} {})",
                left.render(c)?,
                right.render(c)?
            )),
            Self::Chain {
                left,
                combinator,
                right,
            } => Ok(format!(
                "{} {combinator} {}",
                left.render(c)?,
                right.render(c)?
            )),
        }
    }
}

/// 可以转换为 [`Condition`] 的输入：现成的条件，或 `(column, operator, value)` 三元组。
pub trait IntoCondition {
    fn into_condition(self) -> Result<Condition>;
}

impl IntoCondition for Condition {
    fn into_condition(self) -> Result<Condition> {
        Ok(self)
    }
}

impl<C, O, V> IntoCondition for (C, O, V)
where
    C: AsRef<str>,
    O: AsRef<str>,
    V: Into<ConditionValue>,
{
    fn into_condition(self) -> Result<Condition> {
        Condition::leaf(self.0.as_ref(), self.1.as_ref(), self.2)
    }
}

/// ON 子句允许的运算符（两侧都是列引用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnOperator {
    Equal,
    NotEqual,
    LessGreater,
    GreaterThan,
    GreaterEqualThan,
    LessThan,
    LessEqualThan,
}

impl OnOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessGreater => "<>",
            Self::GreaterThan => ">",
            Self::GreaterEqualThan => ">=",
            Self::LessThan => "<",
            Self::LessEqualThan => "<=",
        }
    }
}

impl FromStr for OnOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" => Ok(Self::Equal),
            "!=" => Ok(Self::NotEqual),
            "<>" => Ok(Self::LessGreater),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterEqualThan),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessEqualThan),
            _ => Err(QueryError::InvalidCondition(format!(
                "invalid on clause operator `{s}`"
            ))),
        }
    }
}

/// JOIN 的 ON 子句：`col1<op>col2`，不加引号、不做字面量转义。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnClause {
    first: Option<String>,
    rest: Vec<(Combinator, String)>,
}

impl OnClause {
    fn compose(first: &str, operator: &str, second: &str) -> Result<String> {
        let op: OnOperator = operator.parse()?;
        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() {
            return Err(QueryError::InvalidCondition(
                "on clause needs two columns".to_string(),
            ));
        }
        Ok(format!("{first}{}{second}", op.as_str()))
    }

    /// 重新开始一个 ON 子句。
    pub fn new(first: &str, operator: &str, second: &str) -> Result<Self> {
        Ok(Self {
            first: Some(Self::compose(first, operator, second)?),
            rest: Vec::new(),
        })
    }

    pub fn push(
        &mut self,
        combinator: Combinator,
        first: &str,
        operator: &str,
        second: &str,
    ) -> Result<()> {
        let expr = Self::compose(first, operator, second)?;
        if self.first.is_none() {
            self.first = Some(expr);
        } else {
            self.rest.push((combinator, expr));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// 不含 `ON` 关键字的表达式；为空时返回 `None`。
    pub fn render(&self) -> Option<String> {
        let first = self.first.as_ref()?;
        let mut out = first.clone();
        for (comb, expr) in &self.rest {
            out.push(' ');
            out.push_str(comb.as_str());
            out.push(' ');
            out.push_str(expr);
        }
        Some(out)
    }
}
