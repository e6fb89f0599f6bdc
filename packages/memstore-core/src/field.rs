//! Fixed-width field codec.
//!
//! Every field is a 4-byte little-endian `i32` stored in a flat byte buffer.
//! Offsets are byte offsets; slicing past the buffer end panics.

/// Width of one field in bytes.
pub const FIELD_LEN: usize = 4;

/// Byte offset of the `index`-th field in a flat buffer.
#[inline]
pub fn field_offset(index: usize) -> usize {
    index * FIELD_LEN
}

/// Reads the field starting at `byte_offset`.
#[inline]
pub fn read_int(buf: &[u8], byte_offset: usize) -> i32 {
    let mut bytes = [0u8; FIELD_LEN];
    bytes.copy_from_slice(&buf[byte_offset..byte_offset + FIELD_LEN]);
    i32::from_le_bytes(bytes)
}

/// Writes `value` into the field starting at `byte_offset`.
#[inline]
pub fn write_int(buf: &mut [u8], byte_offset: usize, value: i32) {
    buf[byte_offset..byte_offset + FIELD_LEN].copy_from_slice(&value.to_le_bytes());
}

/// Encodes a row of values into a row buffer.
pub fn encode_row(values: &[i32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(values.len() * FIELD_LEN);
    for value in values {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    buf
}

/// Iterates the consecutive fields of `buf`.
/// Trailing bytes that do not form a full field are ignored.
#[inline]
pub fn ints(buf: &[u8]) -> impl Iterator<Item = i32> + '_ {
    buf.chunks_exact(FIELD_LEN)
        .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Decodes a row buffer.
pub fn decode_row(buf: &[u8]) -> Vec<i32> {
    ints(buf).collect()
}
