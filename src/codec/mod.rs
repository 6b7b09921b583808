//! Versioned binary snapshot format (`DSN1`).
//!
//! A snapshot is a single depth-first pass over the tree: fixed header,
//! optional array header, NUL-terminated name, payload, then one encoded
//! block per child. All multi-byte integers are little-endian. The layout
//! is:
//!
//! ```text
//! Header:
//!   magic        4 bytes, literal "DSN1"
//!   type         1 byte   (0=null, 1=int64, 2=float64, 3=string)
//!   nameLength   1 byte   (excluding terminator; max 255)
//!   flags        2 bytes  (bit 0 isArray, bit 1 summable, bit 2 histogramArray)
//!   subcount     4 bytes  (number of immediate children)
//! ArrayHeader (iff isArray, i.e. count > 1):
//!   count        4 bytes
//!   histoMin/histoMax/histoStride   8 bytes each
//! Name:          nameLength + 1 bytes (includes terminating zero)
//! Payload:       per type/count; strings as [len byte][len+1 bytes incl. NUL]
//! Children:      subcount encoded blocks, recursively
//! ```

mod reader;
mod writer;

pub use reader::read_node;
pub use writer::write_node;

use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::node::Node;

/// Literal magic prefix of every encoded node
pub const MAGIC: [u8; 4] = *b"DSN1";

pub(crate) const FLAG_IS_ARRAY: u16 = 1 << 0;
pub(crate) const FLAG_SUMMABLE: u16 = 1 << 1;
pub(crate) const FLAG_HISTOGRAM_ARRAY: u16 = 1 << 2;

/// Errors that can occur while encoding a snapshot
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("node name '{0}' exceeds 255 bytes")]
    NameTooLong(String),

    #[error("string value of '{0}' exceeds 255 bytes")]
    StringTooLong(String),

    #[error("array of '{0}' exceeds the format's 32-bit count")]
    ArrayTooLarge(String),
}

/// Errors that can occur while decoding a snapshot.
///
/// Any failure aborts the whole read; there is no partial recovery.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream does not begin with a DSN1 header (found {0:#010x})")]
    BadMagic(u32),

    #[error("unknown type tag {0}")]
    UnknownType(u8),

    #[error("malformed stream: {0}")]
    InvalidFormat(String),

    #[error("name or string payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Write a tree to a snapshot file
///
/// # Errors
/// * [`EncodeError::Io`] - file creation or write failure
/// * the encoding errors of [`write_node`]
pub fn write_file(node: &Node, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_node(node, &mut writer)?;
    writer.flush()?;
    info!("snapshot written to {}", path.display());
    Ok(())
}

/// Read a tree back from a snapshot file
pub fn read_file(path: impl AsRef<Path>) -> Result<Node, DecodeError> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let node = read_node(&mut reader)?;
    info!("snapshot read from {}", path.display());
    Ok(node)
}
