//! Depth-first snapshot decoder, the mirror image of the encoder.

use log::debug;
use std::io::Read;

use super::{DecodeError, FLAG_HISTOGRAM_ARRAY, FLAG_IS_ARRAY, FLAG_SUMMABLE, MAGIC};
use crate::node::value::{TypeTag, Value};
use crate::node::{HistogramRange, Node};

/// Decode one node and its entire subtree from a byte stream.
///
/// Children are attached as they are decoded. A bad magic value or any
/// malformed field aborts the whole read; the partially decoded tree is
/// discarded.
pub fn read_node<R: Read>(r: &mut R) -> Result<Node, DecodeError> {
    let magic = read_array::<4, _>(r)?;
    if magic != MAGIC {
        return Err(DecodeError::BadMagic(u32::from_le_bytes(magic)));
    }

    let [type_byte, name_len] = read_array::<2, _>(r)?;
    let type_tag = TypeTag::from_byte(type_byte).ok_or(DecodeError::UnknownType(type_byte))?;
    let flags = u16::from_le_bytes(read_array::<2, _>(r)?);
    let subcount = u32::from_le_bytes(read_array::<4, _>(r)?);

    let is_array = flags & FLAG_IS_ARRAY != 0;
    let (count, range) = if is_array {
        let count = u32::from_le_bytes(read_array::<4, _>(r)?) as usize;
        let min = i64::from_le_bytes(read_array::<8, _>(r)?);
        let max = i64::from_le_bytes(read_array::<8, _>(r)?);
        let stride = i64::from_le_bytes(read_array::<8, _>(r)?);
        (count, HistogramRange { min, max, stride })
    } else {
        (1, HistogramRange::default())
    };

    let name = read_name(r, name_len as usize)?;
    let value = read_payload(r, type_tag, is_array, count)?;

    let mut node = Node {
        name,
        value,
        summable: flags & FLAG_SUMMABLE != 0,
        histogram: (flags & FLAG_HISTOGRAM_ARRAY != 0).then_some(range),
        children: Vec::new(),
    };

    for _ in 0..subcount {
        node.add(read_node(r)?);
    }

    debug!("decoded '{}' ({} children)", node.name(), subcount);
    Ok(node)
}

fn read_name<R: Read>(r: &mut R, len: usize) -> Result<String, DecodeError> {
    if len == 0 {
        return Err(DecodeError::InvalidFormat("empty node name".to_string()));
    }
    // len + 1 bytes on the wire, the last being the terminator
    let mut buf = vec![0u8; len + 1];
    r.read_exact(&mut buf)?;
    buf.pop();
    Ok(String::from_utf8(buf)?)
}

fn read_payload<R: Read>(
    r: &mut R,
    type_tag: TypeTag,
    is_array: bool,
    count: usize,
) -> Result<Value, DecodeError> {
    let value = match (type_tag, is_array) {
        (TypeTag::Null, _) => Value::Null,
        (TypeTag::Int, false) => Value::Int(i64::from_le_bytes(read_array::<8, _>(r)?)),
        (TypeTag::Int, true) => {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(i64::from_le_bytes(read_array::<8, _>(r)?));
            }
            Value::IntArray(values)
        }
        (TypeTag::Float, false) => Value::Float(f64::from_le_bytes(read_array::<8, _>(r)?)),
        (TypeTag::Float, true) => {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(f64::from_le_bytes(read_array::<8, _>(r)?));
            }
            Value::FloatArray(values)
        }
        (TypeTag::Str, false) => Value::Str(read_string(r)?),
        (TypeTag::Str, true) => {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(read_string(r)?);
            }
            Value::StrArray(values)
        }
    };
    Ok(value)
}

fn read_string<R: Read>(r: &mut R) -> Result<String, DecodeError> {
    let [len] = read_array::<1, _>(r)?;
    let mut buf = vec![0u8; len as usize + 1];
    r.read_exact(&mut buf)?;
    buf.pop();
    Ok(String::from_utf8(buf)?)
}

fn read_array<const N: usize, R: Read>(r: &mut R) -> Result<[u8; N], DecodeError> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::write_node;

    #[test]
    fn test_bad_magic_rejected() {
        let bytes = b"JUNKxxxxxxxxxxxxxxxx".to_vec();
        match read_node(&mut bytes.as_slice()) {
            Err(DecodeError::BadMagic(found)) => {
                assert_eq!(found, u32::from_le_bytes(*b"JUNK"));
            }
            other => panic!("expected bad magic, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_truncated_stream_rejected() {
        let mut bytes = Vec::new();
        write_node(&Node::new("n", 42i64), &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(
            read_node(&mut bytes.as_slice()),
            Err(DecodeError::Io(_))
        ));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut bytes = Vec::new();
        write_node(&Node::new("n", 42i64), &mut bytes).unwrap();
        bytes[4] = 9; // type byte follows the magic
        assert!(matches!(
            read_node(&mut bytes.as_slice()),
            Err(DecodeError::UnknownType(9))
        ));
    }
}
