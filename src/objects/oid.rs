//! Object ID (keyed xxh3-128 digest) representation.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::infra::hash::HASH_BYTES;

/// The length of an object id in bytes.
pub const OID_BYTES: usize = HASH_BYTES;

/// The length of an object id as a hexadecimal string.
pub const OID_HEX_LEN: usize = OID_BYTES * 2;

/// A content id: a 128-bit keyed xxh3 digest identifying a blob, tree, or
/// commit object within one repository.
///
/// Ids are not portable across repositories with different seeds and carry
/// no cryptographic guarantee — they are a fast, repository-local content
/// key, not a tamper-evidence mechanism.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid {
    bytes: [u8; OID_BYTES],
}

impl Oid {
    /// Creates an Oid from a 32-character hexadecimal string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != OID_HEX_LEN {
            return Err(Error::InvalidInput(format!("invalid object id: {hex}")));
        }

        let mut bytes = [0u8; OID_BYTES];

        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let high = hex_digit_to_value(chunk[0])
                .ok_or_else(|| Error::InvalidInput(format!("invalid object id: {hex}")))?;
            let low = hex_digit_to_value(chunk[1])
                .ok_or_else(|| Error::InvalidInput(format!("invalid object id: {hex}")))?;
            bytes[i] = (high << 4) | low;
        }

        Ok(Oid { bytes })
    }

    /// Creates an Oid from a raw byte array.
    pub fn from_bytes(bytes: [u8; OID_BYTES]) -> Self {
        Oid { bytes }
    }

    /// Returns the hexadecimal string representation of this Oid.
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(OID_HEX_LEN);
        for byte in &self.bytes {
            hex.push(HEX_CHARS[(byte >> 4) as usize]);
            hex.push(HEX_CHARS[(byte & 0x0f) as usize]);
        }
        hex
    }

    /// Returns a short (8-character) hexadecimal representation, for display.
    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }

    /// Returns a reference to the raw byte array.
    pub fn as_bytes(&self) -> &[u8; OID_BYTES] {
        &self.bytes
    }
}

const HEX_CHARS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

fn hex_digit_to_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self.short())
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Oid::from_hex(s)
    }
}
