//! Human-readable text rendering of a statistics tree.
//!
//! Output is a nested, indented dump: scalar values as `name = v;`, arrays
//! as braced listings, and histogram-annotated arrays as a bucket table
//! with low-count buckets suppressed. Summable nodes show their total and
//! their children show percentage-of-parent. Rendering never mutates the
//! tree and is idempotent.

use crate::node::value::Value;
use crate::node::Node;

/// Rendering configuration
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Show percentage-of-parent prefixes under summable nodes
    pub percents: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { percents: true }
    }
}

/// Render a tree with the default options
pub fn render_tree(root: &Node) -> String {
    render_tree_with(root, RenderOptions::default())
}

/// Render a tree with explicit options
pub fn render_tree_with(root: &Node, options: RenderOptions) -> String {
    let mut out = String::new();
    render_node(&mut out, root, options, 0, 0.0);
    out
}

impl Node {
    /// Convenience form of [`render_tree`]
    pub fn render(&self) -> String {
        render_tree(self)
    }
}

fn render_node(
    out: &mut String,
    node: &Node,
    options: RenderOptions,
    depth: usize,
    parent_sum: f64,
) {
    let padding = "  ".repeat(depth);
    out.push_str(&padding);

    let self_sum = node.sum();

    if options.percents && parent_sum != 0.0 {
        if self_sum == parent_sum {
            out.push_str("[ 100% ] ");
        } else {
            let percent = (self_sum / parent_sum) * 100.0;
            out.push_str(&format!("[ {:>3.0}% ] ", percent));
        }
    }

    render_value(out, node, &padding);

    if !node.children().is_empty() {
        if node.summable() {
            out.push_str(&format!(" (total {})", self_sum as i64));
        }
        out.push_str(" {\n");
        // percentages are relative to the nearest summable ancestor
        let child_base = if node.summable() { self_sum } else { 0.0 };
        for child in node.children() {
            render_node(out, child, options, depth + 1, child_base);
        }
        out.push_str(&padding);
        out.push('}');
    }
    out.push('\n');
}

fn render_value(out: &mut String, node: &Node, padding: &str) {
    let name = node.name();
    match node.value() {
        Value::Null => out.push_str(name),
        Value::Int(v) => out.push_str(&format!("{} = {};", name, v)),
        Value::IntArray(values) => {
            out.push_str(&format!("{}[{}] = {{", name, values.len()));
            if let Some(range) = node.histogram_range() {
                out.push('\n');
                render_histogram_buckets(out, values, range, padding);
                out.push_str(padding);
            } else {
                out.push_str(&join(values.iter()));
            }
            out.push_str("};");
        }
        Value::Float(v) => out.push_str(&format!("{} = {};", name, v)),
        Value::FloatArray(values) => {
            out.push_str(&format!(
                "{}[{}] = {{{}}};",
                name,
                values.len(),
                join(values.iter())
            ));
        }
        Value::Str(s) => out.push_str(&format!("{} = \"{}\";", name, s)),
        Value::StrArray(values) => {
            let quoted = values
                .iter()
                .map(|s| format!("\"{}\"", s))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("{}[{}] = {{{}}};", name, values.len(), quoted));
        }
    }
}

/// Bucket table for a histogram-annotated int array.
///
/// Buckets whose count falls below `max(ceil(total/1000), 1)` are
/// suppressed to keep the dump compact.
fn render_histogram_buckets(
    out: &mut String,
    values: &[i64],
    range: &crate::node::HistogramRange,
    padding: &str,
) {
    let total: i64 = values.iter().sum();
    let min_value = values.iter().copied().min().unwrap_or(0);
    let max_value = values.iter().copied().max().unwrap_or(0);

    let thresh = display_threshold(total);
    let w = digits(range.min.max(range.max)).max(digits(max_value));

    out.push_str(&format!(
        "{}  Range:   {:>w$} {:>w$}\n",
        padding,
        range.min,
        range.max,
        w = w
    ));
    out.push_str(&format!(
        "{}  Stride:  {:>w$}\n",
        padding,
        range.stride,
        w = w
    ));
    out.push_str(&format!(
        "{}  ValRange:{:>w$} {:>w$}\n",
        padding,
        min_value,
        max_value,
        w = w
    ));
    out.push_str(&format!("{}  Total:   {:>w$}\n", padding, total, w = w));
    out.push_str(&format!("{}  Thresh:  {:>w$}\n", padding, thresh, w = w));

    let mut base = range.min;
    for &value in values {
        if value >= thresh {
            let percent = if total != 0 {
                (value as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            out.push_str(&format!(
                "{}  [ {:>3.0}% ] {:>w$} {:>w$} {:>w$}\n",
                padding,
                percent,
                base,
                base + (range.stride - 1),
                value,
                w = w
            ));
        }
        base += range.stride;
    }
}

/// Display threshold for histogram buckets: `max(ceil(total/1000), 1)`
pub(crate) fn display_threshold(total: i64) -> i64 {
    ((total as f64 / 1000.0).ceil() as i64).max(1)
}

fn digits(v: i64) -> usize {
    v.to_string().len()
}

fn join<T: std::fmt::Display>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}
