//! Depth-first snapshot encoder.

use log::debug;
use std::io::Write;

use super::{EncodeError, FLAG_HISTOGRAM_ARRAY, FLAG_IS_ARRAY, FLAG_SUMMABLE, MAGIC};
use crate::node::value::Value;
use crate::node::Node;

/// Encode a node and its entire subtree into a byte stream.
///
/// The stream position advances monotonically; a position is never
/// revisited, so any `Write` impl works.
///
/// # Errors
/// * [`EncodeError::NameTooLong`] / [`EncodeError::StringTooLong`] - the
///   format carries name and string lengths in one byte
/// * [`EncodeError::ArrayTooLarge`] - array length or child count exceeds
///   the 32-bit wire fields
/// * [`EncodeError::Io`] - the underlying sink failed
pub fn write_node<W: Write>(node: &Node, w: &mut W) -> Result<(), EncodeError> {
    let name = node.name();
    if name.len() > 255 {
        return Err(EncodeError::NameTooLong(name.to_string()));
    }

    let count = node.count();
    // isArray is a wire property: a 1-element array degrades to a scalar
    let is_array = count > 1;
    if count > u32::MAX as usize || node.children().len() > u32::MAX as usize {
        return Err(EncodeError::ArrayTooLarge(name.to_string()));
    }

    let mut flags = 0u16;
    if is_array {
        flags |= FLAG_IS_ARRAY;
    }
    if node.summable() {
        flags |= FLAG_SUMMABLE;
    }
    if node.histogram_range().is_some() {
        flags |= FLAG_HISTOGRAM_ARRAY;
    }

    w.write_all(&MAGIC)?;
    w.write_all(&[node.type_tag().as_byte(), name.len() as u8])?;
    w.write_all(&flags.to_le_bytes())?;
    w.write_all(&(node.children().len() as u32).to_le_bytes())?;

    if is_array {
        let range = node.histogram_range().copied().unwrap_or_default();
        w.write_all(&(count as u32).to_le_bytes())?;
        w.write_all(&range.min.to_le_bytes())?;
        w.write_all(&range.max.to_le_bytes())?;
        w.write_all(&range.stride.to_le_bytes())?;
    }

    w.write_all(name.as_bytes())?;
    w.write_all(&[0])?;

    write_payload(node, w)?;

    for child in node.children() {
        write_node(child, w)?;
    }

    debug!("encoded '{}' ({} children)", name, node.children().len());
    Ok(())
}

fn write_payload<W: Write>(node: &Node, w: &mut W) -> Result<(), EncodeError> {
    match node.value() {
        Value::Null => {}
        Value::Int(v) => w.write_all(&v.to_le_bytes())?,
        Value::IntArray(values) => {
            for v in values {
                w.write_all(&v.to_le_bytes())?;
            }
        }
        Value::Float(v) => w.write_all(&v.to_le_bytes())?,
        Value::FloatArray(values) => {
            for v in values {
                w.write_all(&v.to_le_bytes())?;
            }
        }
        Value::Str(s) => write_string(node.name(), s, w)?,
        Value::StrArray(values) => {
            for s in values {
                write_string(node.name(), s, w)?;
            }
        }
    }
    Ok(())
}

fn write_string<W: Write>(owner: &str, s: &str, w: &mut W) -> Result<(), EncodeError> {
    if s.len() > 255 {
        return Err(EncodeError::StringTooLong(owner.to_string()));
    }
    w.write_all(&[s.len() as u8])?;
    w.write_all(s.as_bytes())?;
    w.write_all(&[0])?;
    Ok(())
}
