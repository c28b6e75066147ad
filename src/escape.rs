//! Escaper：字符串字面量转义的外部协作者。
//!
//! 真实的转义函数通常由驱动连接提供（例如 mysqli 的 `real_escape_string`）。
//! 这里抽象成一个可克隆的 trait object，由调用方注入；没有注入时使用
//! [`StandardEscaper`] 按方言的常规规则转义。

use crate::dialect::Dialect;
use std::fmt;
use std::sync::Arc;

/// 把原始字符串转成可以放进 `'...'` 里的内容（不含外层引号）。
pub trait Escaper: dyn_clone::DynClone + fmt::Debug {
    fn escape(&self, raw: &str) -> String;
}

dyn_clone::clone_trait_object!(Escaper);

/// 按方言内置规则转义：MySQL 家族使用反斜杠转义，其余方言把 `'` 加倍。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardEscaper {
    dialect: Dialect,
}

impl StandardEscaper {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl Escaper for StandardEscaper {
    fn escape(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + 2);
        if self.dialect.is_mysql_family() {
            for ch in raw.chars() {
                match ch {
                    '\u{0000}' => out.push_str("\\0"),
                    '\u{0008}' => out.push_str("\\b"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    '\u{001a}' => out.push_str("\\Z"),
                    '\'' => out.push_str("\\'"),
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    _ => out.push(ch),
                }
            }
        } else {
            for ch in raw.chars() {
                if ch == '\'' {
                    out.push('\'');
                }
                out.push(ch);
            }
        }
        out
    }
}

/// 用闭包充当 Escaper（例如包装驱动自带的转义函数）。
#[derive(Clone)]
pub struct FnEscaper {
    f: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl Escaper for FnEscaper {
    fn escape(&self, raw: &str) -> String {
        (self.f)(raw)
    }
}

impl fmt::Debug for FnEscaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEscaper").finish_non_exhaustive()
    }
}

pub fn escape_fn(f: impl Fn(&str) -> String + Send + Sync + 'static) -> FnEscaper {
    FnEscaper { f: Arc::new(f) }
}

#[cfg(test)]
mod tests {
    use super::{Escaper, StandardEscaper, escape_fn};
    use crate::dialect::Dialect;
    use pretty_assertions::assert_eq;

    #[test]
    fn mysql_uses_backslashes() {
        let e = StandardEscaper::new(Dialect::MySQLi);
        assert_eq!(e.escape("I'm \"fine\"\n"), "I\\'m \\\"fine\\\"\\n");
        assert_eq!(e.escape("a\\b"), "a\\\\b");
    }

    #[test]
    fn others_double_single_quotes() {
        for d in [Dialect::PostgreSQL, Dialect::SQLite, Dialect::Oracle] {
            let e = StandardEscaper::new(d);
            assert_eq!(e.escape("O'Reilly"), "O''Reilly");
            assert_eq!(e.escape("a\\b"), "a\\b");
        }
    }

    #[test]
    fn fn_escaper_is_clonable_trait_object() {
        let boxed: Box<dyn Escaper> = Box::new(escape_fn(|s| s.to_uppercase()));
        let cloned = boxed.clone();
        assert_eq!(cloned.escape("abc"), "ABC");
        assert_eq!(format!("{boxed:?}"), "FnEscaper { .. }");
    }
}
