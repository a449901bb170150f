use serde::Serialize;
use std::fmt;

/// Size of the region the tagged value sits at the end of.
pub const VALUE_REGION_END: usize = 1 << 20;
pub const TAG_OFFSET: usize = VALUE_REGION_END - 12;
pub const DATA_OFFSET: usize = VALUE_REGION_END - 8;

pub const TAG_UNASSIGNED: u32 = 0;
pub const TAG_UNDEFINED: u32 = 1;
pub const TAG_NUMBER: u32 = 2;
pub const TAG_BOOLEAN: u32 = 3;
pub const TAG_STRING: u32 = 4;
pub const TAG_FUNCTION: u32 = 5;

/// The value a module left behind when its entry point returned.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum DecodedValue {
    Unassigned,
    Undefined,
    Number(f64),
    Boolean(bool),
    Text(String),
    Function,
    InvalidTag(u32),
    /// A read past the end of memory, usually a layout mismatch between
    /// the compiler and this decoder.
    OutOfBounds { offset: usize, len: usize },
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodedValue::Unassigned => write!(f, "unassigned"),
            DecodedValue::Undefined => write!(f, "undefined"),
            DecodedValue::Number(number) => write!(f, "{}", number),
            DecodedValue::Boolean(boolean) => write!(f, "{}", boolean),
            DecodedValue::Text(text) => write!(f, "{:?}", text),
            DecodedValue::Function => write!(f, "<function>"),
            DecodedValue::InvalidTag(tag) => write!(f, "<invalid type tag {}>", tag),
            DecodedValue::OutOfBounds { offset, len } => {
                write!(f, "<out of bounds read of {} bytes at {}>", len, offset)
            }
        }
    }
}

/// Reads the tagged value region of `memory`. Never fails: bad tags and
/// bad pointers come back as values.
pub fn decode(memory: &[u8]) -> DecodedValue {
    match decode_region(memory) {
        Ok(value) => value,
        Err(out_of_bounds) => out_of_bounds,
    }
}

fn decode_region(memory: &[u8]) -> Result<DecodedValue, DecodedValue> {
    let tag = read_u32(memory, TAG_OFFSET)?;

    let value = match tag {
        TAG_UNASSIGNED => DecodedValue::Unassigned,
        TAG_UNDEFINED => DecodedValue::Undefined,
        TAG_NUMBER => DecodedValue::Number(f64::from_le_bytes(read(memory, DATA_OFFSET)?)),
        TAG_BOOLEAN => DecodedValue::Boolean(read_u32(memory, DATA_OFFSET)? != 0),
        TAG_STRING => {
            let pointer = read_u32(memory, DATA_OFFSET)? as usize;
            let len = read_u32(memory, pointer)? as usize;
            let start = pointer.saturating_add(4);
            let bytes = slice(memory, start, len)?;
            DecodedValue::Text(String::from_utf8_lossy(bytes).into_owned())
        }
        TAG_FUNCTION => DecodedValue::Function,
        other => DecodedValue::InvalidTag(other),
    };

    Ok(value)
}

fn read_u32(memory: &[u8], offset: usize) -> Result<u32, DecodedValue> {
    read(memory, offset).map(u32::from_le_bytes)
}

fn read<const N: usize>(memory: &[u8], offset: usize) -> Result<[u8; N], DecodedValue> {
    let mut bytes = [0; N];
    bytes.copy_from_slice(slice(memory, offset, N)?);
    Ok(bytes)
}

fn slice(memory: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodedValue> {
    offset
        .checked_add(len)
        .and_then(|end| memory.get(offset..end))
        .ok_or(DecodedValue::OutOfBounds { offset, len })
}
