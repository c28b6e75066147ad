//! 错误类型：所有校验失败都是同步、确定性的调用方错误，不做重试。

use crate::builder::Operation;

pub type Result<T> = std::result::Result<T, QueryError>;

/// 错误分类（不携带上下文，便于调用方做 match）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidKey,
    InvalidValue,
    InvalidCondition,
    InvalidClause,
    InvalidColumnDefinition,
    MissingParameter,
    MismatchedValues,
    UnsupportedDialect,
    UnsupportedOperation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("builder invalid key `{key}`: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("builder invalid value: {0}")]
    InvalidValue(String),

    #[error("builder invalid condition: {0}")]
    InvalidCondition(String),

    #[error("builder invalid {clause} clause: {reason}")]
    InvalidClause {
        clause: &'static str,
        reason: String,
    },

    #[error("builder invalid column definition: {0}")]
    InvalidColumnDefinition(String),

    #[error("builder missing parameter `{parameter}` for {operation}")]
    MissingParameter {
        operation: Operation,
        parameter: &'static str,
    },

    #[error("builder mismatched values for {operation}: {reason}")]
    MismatchedValues {
        operation: Operation,
        reason: String,
    },

    #[error("builder unsupported dialect `{0}`")]
    UnsupportedDialect(String),

    #[error("builder unsupported operation `{0}`")]
    UnsupportedOperation(String),
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKey { .. } => ErrorKind::InvalidKey,
            Self::InvalidValue(_) => ErrorKind::InvalidValue,
            Self::InvalidCondition(_) => ErrorKind::InvalidCondition,
            Self::InvalidClause { .. } => ErrorKind::InvalidClause,
            Self::InvalidColumnDefinition(_) => ErrorKind::InvalidColumnDefinition,
            Self::MissingParameter { .. } => ErrorKind::MissingParameter,
            Self::MismatchedValues { .. } => ErrorKind::MismatchedValues,
            Self::UnsupportedDialect(_) => ErrorKind::UnsupportedDialect,
            Self::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
        }
    }

    pub(crate) fn invalid_key(key: &str, reason: &'static str) -> Self {
        Self::InvalidKey {
            key: key.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_clause(clause: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidClause {
            clause,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(operation: Operation, parameter: &'static str) -> Self {
        Self::MissingParameter {
            operation,
            parameter,
        }
    }

    pub(crate) fn mismatched(operation: Operation, reason: impl Into<String>) -> Self {
        Self::MismatchedValues {
            operation,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, QueryError};
    use crate::builder::Operation;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_parameter_names_operation() {
        let err = QueryError::missing(Operation::Get, "table");
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
        assert_eq!(
            err.to_string(),
            "builder missing parameter `table` for GET"
        );
    }

    #[test]
    fn invalid_key_message() {
        let err = QueryError::invalid_key("a=>b=>c", "more than one alias marker");
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        assert_eq!(
            err.to_string(),
            "builder invalid key `a=>b=>c`: more than one alias marker"
        );
    }
}
