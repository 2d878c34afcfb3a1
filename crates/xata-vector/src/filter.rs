//! Abstract filter conditions and their native translation.
//!
//! A condition list is evaluated as a conjunction, except that conditions
//! targeting the reserved `search_vector` and `id` columns are extracted
//! rather than conjoined: the backend exposes vector retrieval and id-based
//! retrieval through distinct call shapes, not through the filter grammar.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::TableField;

/// Comparison operators accepted in a [`FilterCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    NotIn,
    Like,
}

impl FilterOperator {
    /// Native comparison keyword for this operator.
    fn native(self) -> &'static str {
        match self {
            Self::Equal => "$is",
            Self::NotEqual => "$isNot",
            Self::LessThan => "$lt",
            Self::LessThanOrEqual => "$le",
            Self::GreaterThan => "$gt",
            Self::GreaterThanOrEqual => "$ge",
            Self::In | Self::NotIn => "$any",
            Self::Like => "$contains",
        }
    }
}

/// A single caller-supplied predicate on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Target column.
    pub column: String,

    /// Comparison operator.
    pub operator: FilterOperator,

    /// Comparison value; a list for `In`/`NotIn`, a scalar otherwise.
    pub value: Value,
}

impl FilterCondition {
    /// Creates a new condition.
    pub fn new(column: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            column: column.into(),
            operator,
            value,
        }
    }

    fn targets(&self, field: TableField) -> bool {
        self.column == field.as_ref()
    }

    /// Native expression for this condition alone.
    fn native_expr(&self) -> Value {
        let comparison = json!({ self.column.clone(): { self.operator.native(): self.value.clone() } });
        match self.operator {
            FilterOperator::NotIn => json!({"$not": comparison}),
            _ => comparison,
        }
    }
}

/// Translates conditions into one native filter expression.
///
/// Zero conditions yield `None`; a single condition stands alone; several
/// are conjoined under `$all`. Callers are expected to have stripped
/// reserved-column conditions first (see [`ConditionSet::partition`]).
pub fn translate_filter(conditions: &[FilterCondition]) -> Option<Value> {
    let mut exprs: Vec<Value> = conditions.iter().map(FilterCondition::native_expr).collect();
    match exprs.len() {
        0 => None,
        1 => exprs.pop(),
        _ => Some(json!({"$all": exprs})),
    }
}

/// A condition list split by reserved column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    /// The first condition targeting `search_vector`, if any; its value is
    /// the query embedding.
    pub vector: Option<FilterCondition>,

    /// Values of conditions targeting `id`, flattened into one id list.
    pub ids: Option<Vec<String>>,

    /// Native filter expression for every remaining condition.
    pub filter: Option<Value>,
}

impl ConditionSet {
    /// Partitions a condition list into vector predicate, id list, and
    /// generic filter.
    pub fn partition(conditions: Option<&[FilterCondition]>) -> Self {
        let conditions = match conditions {
            Some(conditions) => conditions,
            None => return Self::default(),
        };

        let mut vector = None;
        let mut ids = Vec::new();
        let mut rest = Vec::new();

        for condition in conditions {
            if condition.targets(TableField::SearchVector) {
                if vector.is_none() {
                    vector = Some(condition.clone());
                }
            } else if condition.targets(TableField::Id) {
                collect_ids(&condition.value, &mut ids);
            } else {
                rest.push(condition.clone());
            }
        }

        Self {
            vector,
            ids: if ids.is_empty() { None } else { Some(ids) },
            filter: translate_filter(&rest),
        }
    }

    /// True when neither an id list nor a generic filter survived.
    pub fn is_unconstrained(&self) -> bool {
        self.ids.is_none() && self.filter.is_none()
    }
}

/// Flattens an id condition value into string ids; lists contribute each
/// element.
fn collect_ids(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_ids(item, out);
            }
        }
        Value::String(s) => out.push(s.clone()),
        other => out.push(other.to_string()),
    }
}
