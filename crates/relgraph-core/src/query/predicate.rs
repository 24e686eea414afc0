//! Row predicates for [`RecordList`](super::RecordList).
//!
//! Predicates are descriptors. [`Predicate::InProjection`] holds another list
//! and is only evaluated by [`Predicate::resolve`], right before rows are
//! matched, so chained traversals stay lazy until enumeration.

use roaring::RoaringTreemap;
use serde_json::Value;
use std::cmp::Ordering;

use super::Projection;
use crate::error::Result;
use crate::store::Record;

/// A condition on the columns of one record.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// column == value
    Eq {
        /// Column name (`ID` and `ClassName` included)
        column: String,
        /// Value to compare against
        value: Value,
    },
    /// column != value (missing columns match)
    Neq {
        /// Column name
        column: String,
        /// Value to compare against
        value: Value,
    },
    /// column > value
    Gt {
        /// Column name
        column: String,
        /// Value to compare against
        value: Value,
    },
    /// column >= value
    Gte {
        /// Column name
        column: String,
        /// Value to compare against
        value: Value,
    },
    /// column < value
    Lt {
        /// Column name
        column: String,
        /// Value to compare against
        value: Value,
    },
    /// column <= value
    Lte {
        /// Column name
        column: String,
        /// Value to compare against
        value: Value,
    },
    /// column value is one of `values`; an empty list matches nothing
    In {
        /// Column name
        column: String,
        /// Accepted values
        values: Vec<Value>,
    },
    /// column holds a record reference contained in `ids`; an empty set matches nothing
    InIds {
        /// Column name
        column: String,
        /// Accepted identifiers
        ids: RoaringTreemap,
    },
    /// column holds a reference found in another list's column (deferred)
    InProjection {
        /// Column name
        column: String,
        /// Source of the accepted identifiers
        projection: Box<Projection>,
    },
    /// column is missing or null
    IsNull {
        /// Column name
        column: String,
    },
    /// column is present and not null
    IsNotNull {
        /// Column name
        column: String,
    },
    /// all predicates hold
    And {
        /// Predicates to AND together
        predicates: Vec<Predicate>,
    },
    /// at least one predicate holds
    Or {
        /// Predicates to OR together
        predicates: Vec<Predicate>,
    },
    /// negation
    Not {
        /// Predicate to negate
        predicate: Box<Predicate>,
    },
    /// matches no record
    Never,
}

impl Predicate {
    /// Creates an equality predicate.
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates a not-equal predicate.
    #[must_use]
    pub fn neq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Neq {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates a greater-than predicate.
    #[must_use]
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Gt {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates a greater-than-or-equal predicate.
    #[must_use]
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Gte {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates a less-than predicate.
    #[must_use]
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Lt {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates a less-than-or-equal predicate.
    #[must_use]
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Lte {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates a value-set membership predicate.
    #[must_use]
    pub fn is_in(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self::In {
            column: column.into(),
            values,
        }
    }

    /// Creates an identifier-set membership predicate.
    #[must_use]
    pub fn in_ids(column: impl Into<String>, ids: impl IntoIterator<Item = u64>) -> Self {
        Self::InIds {
            column: column.into(),
            ids: ids.into_iter().collect(),
        }
    }

    /// Creates a deferred membership predicate against another list's column.
    #[must_use]
    pub fn in_projection(column: impl Into<String>, projection: Projection) -> Self {
        Self::InProjection {
            column: column.into(),
            projection: Box::new(projection),
        }
    }

    /// Creates an is-null predicate.
    #[must_use]
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull {
            column: column.into(),
        }
    }

    /// Creates an is-not-null predicate.
    #[must_use]
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::IsNotNull {
            column: column.into(),
        }
    }

    /// Creates an AND of several predicates.
    #[must_use]
    pub fn and(predicates: Vec<Predicate>) -> Self {
        Self::And { predicates }
    }

    /// Creates an OR of several predicates.
    #[must_use]
    pub fn or(predicates: Vec<Predicate>) -> Self {
        Self::Or { predicates }
    }

    /// Negates a predicate.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(predicate: Predicate) -> Self {
        Self::Not {
            predicate: Box::new(predicate),
        }
    }

    /// Returns true if this predicate rejects every record without looking at it.
    ///
    /// Only checks the top level; a resolved predicate is needed to catch
    /// projections that turned out empty.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        match self {
            Self::Never => true,
            Self::In { values, .. } => values.is_empty(),
            Self::InIds { ids, .. } => ids.is_empty(),
            Self::And { predicates } => predicates.iter().any(Self::is_unsatisfiable),
            Self::Or { predicates } => predicates.iter().all(Self::is_unsatisfiable),
            _ => false,
        }
    }

    /// Evaluates every deferred projection, returning a predicate that can
    /// be matched directly.
    ///
    /// # Errors
    ///
    /// Propagates backing-store errors raised while enumerating projections.
    pub fn resolve(&self) -> Result<Predicate> {
        Ok(match self {
            Self::InProjection { column, projection } => Self::InIds {
                column: column.clone(),
                ids: projection.ids()?,
            },
            Self::And { predicates } => Self::And {
                predicates: predicates
                    .iter()
                    .map(Self::resolve)
                    .collect::<Result<Vec<_>>>()?,
            },
            Self::Or { predicates } => Self::Or {
                predicates: predicates
                    .iter()
                    .map(Self::resolve)
                    .collect::<Result<Vec<_>>>()?,
            },
            Self::Not { predicate } => Self::Not {
                predicate: Box::new(predicate.resolve()?),
            },
            other => other.clone(),
        })
    }

    /// Evaluates the predicate against a record.
    ///
    /// An unresolved [`Predicate::InProjection`] never matches; call
    /// [`Predicate::resolve`] first.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Eq { column, value } => record
                .value(column)
                .is_some_and(|v| values_equal(&v, value)),
            Self::Neq { column, value } => record
                .value(column)
                .is_none_or(|v| !values_equal(&v, value)),
            Self::Gt { column, value } => {
                compare_column(record, column, value).is_some_and(Ordering::is_gt)
            }
            Self::Gte { column, value } => {
                compare_column(record, column, value).is_some_and(Ordering::is_ge)
            }
            Self::Lt { column, value } => {
                compare_column(record, column, value).is_some_and(Ordering::is_lt)
            }
            Self::Lte { column, value } => {
                compare_column(record, column, value).is_some_and(Ordering::is_le)
            }
            Self::In { column, values } => record
                .value(column)
                .is_some_and(|v| values.iter().any(|val| values_equal(&v, val))),
            Self::InIds { column, ids } => record
                .reference(column)
                .is_some_and(|id| ids.contains(id)),
            Self::InProjection { .. } => {
                debug_assert!(false, "InProjection must be resolved before matching");
                false
            }
            Self::IsNull { column } => record.value(column).is_none_or(|v| v.is_null()),
            Self::IsNotNull { column } => record.value(column).is_some_and(|v| !v.is_null()),
            Self::And { predicates } => predicates.iter().all(|p| p.matches(record)),
            Self::Or { predicates } => predicates.iter().any(|p| p.matches(record)),
            Self::Not { predicate } => !predicate.matches(record),
            Self::Never => false,
        }
    }
}

fn compare_column(record: &Record, column: &str, value: &Value) -> Option<Ordering> {
    record
        .value(column)
        .and_then(|v| compare_values(&v, value))
}

/// Compares two JSON values for equality; integers compare exactly.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            x.as_f64()
                .zip(y.as_f64())
                .is_some_and(|(x, y)| (x - y).abs() < f64::EPSILON)
        }
        _ => a == b,
    }
}

/// Orders numbers and strings; other pairs are not comparable.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return Some(x.cmp(&y));
            }
            x.as_f64()?.partial_cmp(&y.as_f64()?)
        }
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
