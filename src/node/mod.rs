//! The statistics tree node and its child directory.
//!
//! A [`Node`] owns its payload and its children exclusively: dropping a node
//! drops the whole subtree, and detaching a child hands ownership back to
//! the caller. Sibling names are unique; attaching a child under a name
//! that already exists replaces (drops) the previous child.

pub mod value;

use log::debug;
use serde::{Deserialize, Serialize};

pub use value::{TypeTag, Value};

/// Numeric range metadata for a histogram-array node.
///
/// Maps array indices onto a value range: bucket `i` covers
/// `[min + i * stride, min + (i + 1) * stride)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramRange {
    pub min: i64,
    pub max: i64,
    pub stride: i64,
}

/// A named node in a statistics tree.
///
/// Holds a typed scalar or array [`Value`], optional histogram metadata,
/// a summable flag consumed by the renderer, and an insertion-ordered
/// directory of uniquely named children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) value: Value,
    pub(crate) summable: bool,
    pub(crate) histogram: Option<HistogramRange>,
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Create a detached node holding the given value
    ///
    /// # Panics
    /// If `name` is empty. Every node needs a directory key.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "node name must be non-empty");
        Self {
            name,
            value: value.into(),
            summable: false,
            histogram: None,
            children: Vec::new(),
        }
    }

    /// Create a detached node with no value (the `Null` type)
    pub fn null(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn type_tag(&self) -> TypeTag {
        self.value.type_tag()
    }

    /// Number of values held: 0 for `Null`, 1 for scalars, array length otherwise
    pub fn count(&self) -> usize {
        self.value.count()
    }

    pub fn summable(&self) -> bool {
        self.summable
    }

    /// Mark this node's total as a percentage base for rendering
    pub fn set_summable(&mut self, summable: bool) -> &mut Self {
        self.summable = summable;
        self
    }

    pub fn histogram_range(&self) -> Option<&HistogramRange> {
        self.histogram.as_ref()
    }

    /// Annotate an array-valued node with histogram range metadata
    pub fn set_histogram_range(&mut self, range: HistogramRange) -> &mut Self {
        self.histogram = Some(range);
        self
    }

    /// Replace this node's payload with a new scalar value.
    ///
    /// The previous payload is dropped; type and count switch to match the
    /// new value.
    pub fn assign(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Attach a child, replacing any existing child with the same name.
    ///
    /// Replacement drops the old child and its entire subtree but keeps its
    /// position in the directory.
    ///
    /// # Returns
    /// A mutable reference to the attached child.
    pub fn add(&mut self, child: Node) -> &mut Node {
        match self.children.iter().position(|c| c.name == child.name) {
            Some(idx) => {
                debug!("replacing child '{}' of '{}'", child.name, self.name);
                self.children[idx] = child;
                &mut self.children[idx]
            }
            None => {
                self.children.push(child);
                self.children.last_mut().unwrap()
            }
        }
    }

    /// Detach the child with the given name, returning ownership of it.
    ///
    /// Does not recurse; returns `None` if no such child exists.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        let idx = self.children.iter().position(|c| c.name == name)?;
        Some(self.children.remove(idx))
    }

    /// Non-creating lookup of an immediate child by name
    pub fn search(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable variant of [`Node::search`]
    pub fn search_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Lookup-or-create: the idiomatic entry point for building trees.
    ///
    /// If no child with this name exists, an empty (`Null`) child is
    /// created and attached first.
    pub fn get(&mut self, name: &str) -> &mut Node {
        if let Some(idx) = self.children.iter().position(|c| c.name == name) {
            return &mut self.children[idx];
        }
        self.add(Node::null(name))
    }

    /// Resolve a `/`-delimited path of child names starting at this node.
    ///
    /// Empty segments are skipped, so `"a//b"` and `"/a/b"` resolve like
    /// `"a/b"`. Never creates intermediate nodes; returns `None` as soon
    /// as a segment is missing.
    pub fn searchpath(&self, path: &str) -> Option<&Node> {
        let mut node = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = node.search(segment)?;
        }
        Some(node)
    }

    /// Immediate children in directory (insertion) order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Snapshot of the directory as (name, child) pairs
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|c| (c.name.as_str(), c))
    }

    /// Coerced numeric value of this node plus the recursive sum of every
    /// descendant.
    ///
    /// Applies regardless of the summable flag; that flag only affects
    /// rendering. Strings contribute their numeric-parse value, `Null`
    /// contributes 0.
    pub fn sum(&self) -> f64 {
        self.value.as_f64() + self.children.iter().map(Node::sum).sum::<f64>()
    }

    /// Expand a raw count array into one scalar child per bucket index,
    /// named by the stringified index, and mark this node summable.
    pub fn histogram(&mut self, values: &[i64]) -> &mut Self {
        self.summable = true;
        for (i, v) in values.iter().enumerate() {
            self.add(Node::new(i.to_string(), *v));
        }
        self
    }

    /// Like [`Node::histogram`] but with caller-supplied bucket labels.
    ///
    /// # Panics
    /// If `names` and `values` differ in length.
    pub fn histogram_labeled(&mut self, names: &[&str], values: &[i64]) -> &mut Self {
        assert_eq!(
            names.len(),
            values.len(),
            "histogram labels and values must pair up"
        );
        self.summable = true;
        for (name, v) in names.iter().zip(values) {
            self.add(Node::new(*name, *v));
        }
        self
    }

    /// Attach an int-array child annotated as a histogram array.
    ///
    /// The child keeps the raw bucket counts as its payload; `min`, `max`
    /// and `stride` describe how indices map onto the value range.
    pub fn add_histogram_array(
        &mut self,
        name: impl Into<String>,
        values: &[i64],
        min: i64,
        max: i64,
        stride: i64,
    ) -> &mut Node {
        let mut child = Node::new(name, values);
        child.histogram = Some(HistogramRange { min, max, stride });
        self.add(child)
    }
}
