//! Applet identifiers

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;
use derive_more::Deref;

use crate::Error;

/// Applet Identifier, used as an exact-match key when selecting by name
///
/// The SELECT command carries the AID in a short Lc field, so an AID is at
/// most 255 bytes.
#[derive(Clone, PartialEq, Eq, Deref)]
pub struct Aid(Bytes);

impl Aid {
    /// Longest AID a short SELECT command can carry
    pub const MAX_LEN: usize = crate::command::MAX_DATA_LEN;

    /// Create an AID from raw bytes
    pub fn new(aid: impl Into<Bytes>) -> Result<Self, Error> {
        let aid = aid.into();
        if aid.len() > Self::MAX_LEN {
            return Err(Error::DataTooLong(aid.len()));
        }
        Ok(Self(aid))
    }

    /// Parse an AID from a hex string, ignoring whitespace
    pub fn from_hex(aid: &str) -> Result<Self, Error> {
        let cleaned: String = aid.split_whitespace().collect();
        let bytes =
            hex::decode(cleaned).map_err(|_| Error::InvalidCommandData("AID is not valid hex"))?;
        Self::new(bytes)
    }

    /// The AID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The AID as cheaply clonable bytes
    pub fn to_bytes(&self) -> Bytes {
        self.0.clone()
    }
}

impl Hash for Aid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl Borrow<[u8]> for Aid {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Aid").field(&hex::encode_upper(&self.0)).finish()
    }
}

impl fmt::Display for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(&self.0))
    }
}

impl TryFrom<&[u8]> for Aid {
    type Error = Error;

    fn try_from(aid: &[u8]) -> Result<Self, Error> {
        Self::new(Bytes::copy_from_slice(aid))
    }
}

impl TryFrom<Vec<u8>> for Aid {
    type Error = Error;

    fn try_from(aid: Vec<u8>) -> Result<Self, Error> {
        Self::new(aid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use std::collections::HashMap;

    #[test]
    fn test_from_hex() {
        let aid = Aid::from_hex("A0 00 00 00 03 00 00 00").unwrap();
        assert_eq!(aid.as_bytes(), hex!("A000000003000000"));
        assert_eq!(aid.to_string(), "A000000003000000");
        assert_eq!(aid.len(), 8);

        assert!(Aid::from_hex("A0Z1").is_err());
    }

    #[test]
    fn test_length_limit() {
        assert!(Aid::new(vec![0xA0; 255]).is_ok());
        assert_eq!(
            Aid::new(vec![0xA0; 256]),
            Err(Error::DataTooLong(256))
        );
    }

    #[test]
    fn test_lookup_by_slice() {
        let mut map = HashMap::new();
        map.insert(Aid::new(hex!("A000000003000000").to_vec()).unwrap(), 1);

        assert_eq!(map.get(&hex!("A000000003000000")[..]), Some(&1));
        assert_eq!(map.get(&hex!("A0000000030000")[..]), None);
        assert_eq!(map.get(&hex!("A00000000300000000")[..]), None);
    }
}
