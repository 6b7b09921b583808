//! Delta-tree generation between two counter snapshots.
//!
//! [`subtract`] compares a current tree against a previous snapshot of the
//! same shape and produces a new, detached tree of element-wise
//! differences - the before/after comparison that accumulated statistics
//! exist for.

use log::debug;
use thiserror::Error;

use crate::node::value::{TypeTag, Value};
use crate::node::Node;

/// Errors raised when two snapshots do not line up structurally.
///
/// Diffing never coerces: operands must agree on type and count at every
/// node, and every child must have a same-named counterpart.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("type mismatch at '{path}': {current} vs {previous}")]
    TypeMismatch {
        path: String,
        current: TypeTag,
        previous: TypeTag,
    },

    #[error("count mismatch at '{path}': {current} vs {previous}")]
    CountMismatch {
        path: String,
        current: usize,
        previous: usize,
    },

    #[error("no counterpart for '{path}' in previous snapshot")]
    MissingCounterpart { path: String },
}

/// Subtract a previous snapshot from a current one, producing a delta tree.
///
/// The result is detached, carries `current`'s name, and holds
/// `current - previous` element-wise at every node. String values are not
/// arithmetically diffable; the previous snapshot's string is taken as
/// authoritative. Children are zipped by name, recursively.
///
/// # Errors
/// * [`DiffError::TypeMismatch`] / [`DiffError::CountMismatch`] - operands
///   disagree on stored type or cardinality
/// * [`DiffError::MissingCounterpart`] - a child of `current` has no
///   same-named child in `previous`
pub fn subtract(current: &Node, previous: &Node) -> Result<Node, DiffError> {
    debug!(
        "diffing '{}' against previous snapshot '{}'",
        current.name(),
        previous.name()
    );
    subtract_at(current, previous, current.name())
}

fn subtract_at(current: &Node, previous: &Node, path: &str) -> Result<Node, DiffError> {
    if current.type_tag() != previous.type_tag() {
        return Err(DiffError::TypeMismatch {
            path: path.to_string(),
            current: current.type_tag(),
            previous: previous.type_tag(),
        });
    }
    if current.count() != previous.count() {
        return Err(DiffError::CountMismatch {
            path: path.to_string(),
            current: current.count(),
            previous: previous.count(),
        });
    }

    let value = subtract_values(current.value(), previous.value());
    let mut result = Node::new(current.name(), value);
    result.set_summable(current.summable());
    if let Some(range) = current.histogram_range() {
        result.set_histogram_range(*range);
    }

    for (name, child) in current.entries() {
        let child_path = format!("{}/{}", path, name);
        let counterpart =
            previous
                .search(name)
                .ok_or_else(|| DiffError::MissingCounterpart {
                    path: child_path.clone(),
                })?;
        result.add(subtract_at(child, counterpart, &child_path)?);
    }

    Ok(result)
}

/// Element-wise value difference; types and counts are already verified equal
fn subtract_values(current: &Value, previous: &Value) -> Value {
    match (current, previous) {
        (Value::Null, Value::Null) => Value::Null,
        (Value::Int(a), Value::Int(b)) => Value::Int(a.wrapping_sub(*b)),
        (Value::IntArray(a), Value::IntArray(b)) => {
            Value::IntArray(a.iter().zip(b).map(|(x, y)| x.wrapping_sub(*y)).collect())
        }
        (Value::Float(a), Value::Float(b)) => Value::Float(a - b),
        (Value::FloatArray(a), Value::FloatArray(b)) => {
            Value::FloatArray(a.iter().zip(b).map(|(x, y)| x - y).collect())
        }
        // strings keep the previous snapshot's value
        (Value::Str(_), Value::Str(b)) => Value::Str(b.clone()),
        (Value::StrArray(_), Value::StrArray(b)) => Value::StrArray(b.clone()),
        _ => unreachable!("operands verified to share type and count"),
    }
}

impl Node {
    /// Method form of [`subtract`]: `current.subtract(&previous)`
    pub fn subtract(&self, previous: &Node) -> Result<Node, DiffError> {
        subtract(self, previous)
    }
}
