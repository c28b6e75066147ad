//! Composer：把 key 表达式与标量字面量渲染成方言正确的 SQL 片段。
//!
//! key 支持两种记号，按顺序处理：
//!
//! - 别名 `base=>alias`，渲染为 `base AS alias`，最多一个 `=>`；
//! - 函数 `fn::arg1::arg2`，渲染为 `fn(arg1,arg2)`。
//!
//! 通配符 `*` 永远不加引号。

use crate::datetime::datetime_body;
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::escape::{Escaper, StandardEscaper};
use crate::value::SqlValue;

const ALIAS_MARKER: &str = "=>";
const FUNCTION_MARKER: &str = "::";

#[derive(Debug, Clone)]
pub struct Composer {
    dialect: Dialect,
    escaper: Box<dyn Escaper>,
}

impl Composer {
    /// 使用方言内置的 [`StandardEscaper`]。
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            escaper: Box::new(StandardEscaper::new(dialect)),
        }
    }

    pub fn with_escaper(dialect: Dialect, escaper: impl Escaper + 'static) -> Self {
        Self {
            dialect,
            escaper: Box::new(escaper),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn set_escaper(&mut self, escaper: impl Escaper + 'static) {
        self.escaper = Box::new(escaper);
    }

    /// 单个裸标识符：`*` 原样输出，其余按方言加引号。
    pub fn identifier(&self, name: &str) -> String {
        let name = name.trim();
        if name == "*" {
            name.to_string()
        } else {
            self.dialect.quote_identifier(name)
        }
    }

    pub fn key(&self, expr: &str) -> Result<String> {
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(QueryError::invalid_key(expr, "empty key"));
        }

        let parts: Vec<&str> = trimmed.split(ALIAS_MARKER).collect();
        let (base, alias) = match parts.as_slice() {
            [base] => (*base, None),
            [base, alias] => {
                let alias = alias.trim();
                if alias.is_empty() {
                    return Err(QueryError::invalid_key(expr, "empty alias"));
                }
                (*base, Some(alias))
            }
            _ => return Err(QueryError::invalid_key(expr, "more than one alias marker")),
        };

        let base = base.trim();
        if base.is_empty() {
            return Err(QueryError::invalid_key(expr, "empty key before alias"));
        }

        let mut out = match base.split_once(FUNCTION_MARKER) {
            None => self.identifier(base),
            Some((func, args)) => {
                let func = func.trim();
                if func.is_empty() {
                    return Err(QueryError::invalid_key(expr, "empty function name"));
                }
                let args: Vec<String> = args
                    .split(FUNCTION_MARKER)
                    .map(|a| self.identifier(a))
                    .collect();
                format!("{func}({})", args.join(","))
            }
        };

        if let Some(alias) = alias {
            out.push_str(" AS ");
            out.push_str(alias);
        }
        Ok(out)
    }

    pub fn keys<I, S>(&self, exprs: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        exprs.into_iter().map(|k| self.key(k.as_ref())).collect()
    }

    /// 渲染一个字面量；字符串一律经过 escaper 转义后再加单引号。
    pub fn value(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Null => Ok("NULL".to_string()),
            SqlValue::Bool(b) => Ok(self.dialect.bool_literal(*b).to_string()),
            SqlValue::I64(n) => Ok(n.to_string()),
            SqlValue::U64(n) => Ok(n.to_string()),
            SqlValue::F64(n) => {
                if n.is_finite() {
                    Ok(n.to_string())
                } else {
                    Err(QueryError::InvalidValue(format!(
                        "non-finite number {n}"
                    )))
                }
            }
            SqlValue::String(s) => Ok(self.quote(s)),
            SqlValue::DateTime(dt) => {
                let body = self.quote(&datetime_body(self.dialect, dt)?);
                if self.dialect == Dialect::Oracle {
                    Ok(format!("TO_TIMESTAMP({body}, 'YYYY-MM-DD HH24:MI:SS')"))
                } else {
                    Ok(body)
                }
            }
        }
    }

    pub fn values<'a, I>(&self, values: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'a SqlValue>,
    {
        values.into_iter().map(|v| self.value(v)).collect()
    }

    /// 转义并加单引号。
    pub fn quote(&self, raw: &str) -> String {
        format!("'{}'", self.escaper.escape(raw))
    }
}
