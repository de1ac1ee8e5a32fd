//! Typed WHERE predicates. Values are always bound as parameters.

use super::builder::{quoted, validate_identifier, QueryBuf};
use super::SqlValue;
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Matches every row.
    All,
    Compare {
        column: String,
        op: Op,
        value: SqlValue,
    },
    IsNull(String),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    /// Literal predicate fixed at compile time. Never built from request data.
    Trusted(&'static str),
}

impl Condition {
    pub fn all() -> Self {
        Condition::All
    }

    pub fn compare(column: impl Into<String>, op: Op, value: impl Into<SqlValue>) -> Self {
        Condition::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Op::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Op::Ne, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Op::Lt, value)
    }

    pub fn le(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Op::Le, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Op::Gt, value)
    }

    pub fn ge(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Op::Ge, value)
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Condition::IsNull(column.into())
    }

    pub fn trusted(predicate: &'static str) -> Self {
        Condition::Trusted(predicate)
    }

    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Condition) -> Self {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Render as SQL, appending bound values to `q` in placeholder order.
    pub(crate) fn render(&self, q: &mut QueryBuf) -> Result<String, ConfigError> {
        Ok(match self {
            Condition::All => "1 = 1".to_string(),
            Condition::Compare { column, op, value } => {
                validate_identifier(column)?;
                q.push_param(value.clone());
                format!("{} {} ?", quoted(column), op.as_sql())
            }
            Condition::IsNull(column) => {
                validate_identifier(column)?;
                format!("{} IS NULL", quoted(column))
            }
            Condition::And(a, b) => format!("({}) AND ({})", a.render(q)?, b.render(q)?),
            Condition::Or(a, b) => format!("({}) OR ({})", a.render(q)?, b.render(q)?),
            Condition::Trusted(s) => (*s).to_string(),
        })
    }
}
