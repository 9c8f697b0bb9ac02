use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur when parsing a Meridian address string.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("address must start with 'm'")]
    InvalidPrefix,
    #[error("address must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("address payload is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("address payload must be exactly 32 bytes")]
    InvalidPayloadLength,
}

/// Number of raw bytes contained in an address.
pub const ADDRESS_BYTES: usize = 32;
/// Expected string length of an encoded address (prefix + 64 hex chars).
pub const ADDRESS_STRING_LENGTH: usize = 1 + ADDRESS_BYTES * 2;

/// Encode a 32-byte account identifier into the human readable Meridian format.
///
/// The encoded address always begins with the character `m` followed by the
/// hexadecimal representation of the raw bytes.
pub fn encode_address(bytes: &[u8; ADDRESS_BYTES]) -> String {
    let mut encoded = String::with_capacity(ADDRESS_STRING_LENGTH);
    encoded.push('m');
    encoded.push_str(&hex::encode(bytes));
    encoded
}

/// Attempt to decode a human readable Meridian address string into the raw bytes.
pub fn decode_address(address: &str) -> Result<[u8; ADDRESS_BYTES], AddressError> {
    if !address.starts_with('m') {
        return Err(AddressError::InvalidPrefix);
    }

    if address.len() != ADDRESS_STRING_LENGTH {
        return Err(AddressError::InvalidLength {
            expected: ADDRESS_STRING_LENGTH,
            actual: address.len(),
        });
    }

    let payload = &address[1..];
    let decoded = hex::decode(payload)?;

    let bytes: [u8; ADDRESS_BYTES] = decoded
        .try_into()
        .map_err(|_| AddressError::InvalidPayloadLength)?;

    Ok(bytes)
}

/// Check whether the provided string is a valid Meridian address.
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

/// Account identifier used as the key for every balance, allowance, role and
/// whitelist entry. Serialises as its encoded string form in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Address(bytes)
    }

    /// Derive a well-known account from a stable label.
    ///
    /// Used for protocol-owned accounts (vault, gateway) that have no
    /// external keyholder. The same label always yields the same address.
    pub fn derive(label: &str) -> Self {
        Address(*blake3::hash(label.as_bytes()).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_address(&self.0))
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(value: [u8; ADDRESS_BYTES]) -> Self {
        Address(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        encode_address(&value.0)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode_address(&value).map(Address)
    }
}
