use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use log::info;
use rand::rngs::OsRng;
use rand::Rng;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A store-native document identifier.
///
/// A `DocId` is 12 bytes rendered as a 24-character lowercase hex string:
/// a 4-byte unix-seconds timestamp, 5 bytes of per-process entropy, and a
/// 3-byte counter. Ids generated in one process are unique and roughly
/// time-ordered.
///
/// Entities whose key format is [crate::entity::NativeKey] must carry ids in
/// this shape; [DocId::from_hex] is the validating conversion from the
/// generic string form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId {
    bytes: [u8; 12],
}

impl DocId {
    /// Generates a fresh identifier from the process-wide generator.
    pub fn new() -> Self {
        crate::ID_GENERATOR.next_id()
    }

    /// Parses an identifier from its 24-character hex form.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` if the input is not exactly 24 hex characters.
    pub fn from_hex(hex: &str) -> DocbaseResult<Self> {
        if hex.len() != 24 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DocbaseError::new(
                &format!("'{}' is not a valid 24-character hex id", hex),
                ErrorKind::InvalidId,
            ));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            // safe to unwrap: validated as hex above
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).unwrap_or(0);
        }
        Ok(DocId { bytes })
    }

    /// Returns the 24-character lowercase hex form.
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(24);
        for byte in &self.bytes {
            hex.push_str(&format!("{:02x}", byte));
        }
        hex
    }

    /// Returns the embedded creation timestamp as unix seconds.
    pub fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }
}

impl Default for DocId {
    fn default() -> Self {
        DocId::new()
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Debug for DocId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocId({})", self.to_hex())
    }
}

/// Process-wide [DocId] generator.
///
/// Holds the per-process entropy bytes and the rolling counter. One instance
/// lives behind a `LazyLock` in the crate root; `DocId::new` goes through it.
pub(crate) struct DocIdGenerator {
    process_entropy: [u8; 5],
    counter: AtomicU32,
}

impl DocIdGenerator {
    pub(crate) fn new() -> Self {
        let mut process_entropy = [0u8; 5];
        OsRng.fill(&mut process_entropy);
        // counter starts at a random point so restarts do not collide
        let counter = AtomicU32::new(OsRng.gen::<u32>() & 0x00FF_FFFF);
        info!("Initialized id generator with entropy {:02x?}", process_entropy);

        DocIdGenerator {
            process_entropy,
            counter,
        }
    }

    pub(crate) fn next_id(&self) -> DocId {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & 0x00FF_FFFF;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process_entropy);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        DocId { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_24_char_hex() {
        let id = DocId::new();
        let hex = id.to_hex();
        assert_eq!(hex.len(), 24);
        assert!(hex.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn generates_unique_ids() {
        let mut ids = Vec::new();
        for _ in 0..1000 {
            ids.push(DocId::new());
        }
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn hex_round_trip() {
        let id = DocId::new();
        let parsed = DocId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        for bad in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzz", "67332a5e9f1b2c3d4e5f60"] {
            let result = DocId::from_hex(bad);
            assert!(result.is_err(), "expected rejection of {:?}", bad);
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
        }
    }

    #[test]
    fn from_hex_accepts_uppercase() {
        assert!(DocId::from_hex("67332A5E9F1B2C3D4E5F6071").is_ok());
    }

    #[test]
    fn embeds_creation_timestamp() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as u32;
        let id = DocId::new();
        assert!(id.timestamp_secs() >= before);
        assert!(id.timestamp_secs() <= before + 2);
    }

    #[test]
    fn ids_are_time_ordered_within_a_second() {
        let a = DocId::new();
        let b = DocId::new();
        // counter is monotonic, so later ids within the same second sort later
        assert!(b > a);
    }
}
