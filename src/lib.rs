//! Hierarchical typed statistics trees.
//!
//! A [`Node`] is a named entry in an arbitrary-depth tree of performance
//! counters: it holds a typed scalar or fixed-length array value and an
//! insertion-ordered directory of uniquely named children. On top of the
//! tree sit recursive aggregation ([`Node::sum`]), snapshot diffing
//! ([`diff::subtract`]), a versioned binary codec ([`codec`]), a JSON
//! export surface ([`output`]), and a percentage- and histogram-aware text
//! renderer ([`render`]).
//!
//! Trees are single-writer, single-thread structures: a node exclusively
//! owns its payload and children, and none of the operations take locks.
//!
//! # Example
//! ```
//! use stattree::Node;
//!
//! let mut root = Node::null("stats");
//! root.get("cache").set_summable(true);
//! root.get("cache").add(Node::new("hits", 90i64));
//! root.get("cache").add(Node::new("misses", 10i64));
//!
//! assert_eq!(root.sum(), 100.0);
//! assert_eq!(root.searchpath("cache/hits").unwrap().value().as_i64(), 90);
//! ```

pub mod codec;
pub mod commands;
pub mod diff;
pub mod node;
pub mod output;
pub mod render;

pub use diff::{subtract, DiffError};
pub use node::value::{TypeTag, Value};
pub use node::{HistogramRange, Node};
pub use render::{render_tree, render_tree_with, RenderOptions};
