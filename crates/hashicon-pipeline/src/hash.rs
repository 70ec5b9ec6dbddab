//! Hashing: turn an input string into a fixed-length byte sequence.
//!
//! This module defines the [`Hasher`] trait for pluggable digest
//! algorithms and the [`HashAlgorithm`] enum for selecting one at
//! runtime. Every algorithm produces exactly [`HASH_LEN`] bytes so the
//! downstream grid always has the same shape.
//!
//! The input is hashed as its raw UTF-8 bytes with no normalization.

use std::hash::Hasher as _;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use siphasher::sip128::{Hasher128, SipHasher13};

use crate::types::HASH_LEN;

/// Selects which digest algorithm derives the identicon bytes.
///
/// [`Md5`](Self::Md5) is the default and the only algorithm whose output
/// matches previously generated identicons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// MD5 over the raw input bytes.
    #[default]
    Md5,
    /// Keyed SipHash-1-3 with 128-bit output.
    ///
    /// Different keys yield unrelated identicons for the same input,
    /// which lets a deployment keep its avatars unguessable from the
    /// input alone.
    SipHash13 {
        /// First half of the 128-bit key.
        k0: u64,
        /// Second half of the 128-bit key.
        k1: u64,
    },
}

impl HashAlgorithm {
    /// Short lowercase name, e.g. for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::SipHash13 { .. } => "siphash13",
        }
    }
}

/// Trait for digest strategies.
///
/// Implementations must be pure: the same input always yields the same
/// bytes.
pub trait Hasher {
    /// Digest `input` into exactly [`HASH_LEN`] bytes.
    fn digest(&self, input: &[u8]) -> [u8; HASH_LEN];
}

impl Hasher for HashAlgorithm {
    fn digest(&self, input: &[u8]) -> [u8; HASH_LEN] {
        match *self {
            Self::Md5 => md5_digest(input),
            Self::SipHash13 { k0, k1 } => siphash13_digest(input, k0, k1),
        }
    }
}

/// Hash a string with the default algorithm (MD5).
///
/// ```
/// use hashicon_pipeline::hash_to_bytes;
///
/// let bytes = hash_to_bytes("apple");
/// assert_eq!(&bytes[..3], &[31, 56, 112]);
/// ```
#[must_use]
pub fn hash_to_bytes(input: &str) -> [u8; HASH_LEN] {
    HashAlgorithm::Md5.digest(input.as_bytes())
}

fn md5_digest(input: &[u8]) -> [u8; HASH_LEN] {
    let digest = Md5::digest(input);
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&digest);
    out
}

fn siphash13_digest(input: &[u8], k0: u64, k1: u64) -> [u8; HASH_LEN] {
    let mut hasher = SipHasher13::new_with_keys(k0, k1);
    hasher.write(input);
    hasher.finish128().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_md5() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Md5);
    }

    #[test]
    fn apple_reference_vector() {
        assert_eq!(
            hash_to_bytes("apple"),
            [
                31, 56, 112, 190, 39, 79, 108, 73, 179, 227, 26, 12, 103, 40, 149, 127
            ]
        );
    }

    #[test]
    fn ball_reference_vector() {
        assert_eq!(
            hash_to_bytes("ball"),
            [
                122, 16, 234, 27, 155, 40, 114, 218, 159, 55, 80, 2, 196, 77, 223, 206
            ]
        );
    }

    #[test]
    fn empty_string_hashes() {
        // MD5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(
            hash_to_bytes(""),
            [
                0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8,
                0x42, 0x7e
            ]
        );
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_to_bytes("identicon"), hash_to_bytes("identicon"));
    }

    #[test]
    fn distinct_inputs_differ() {
        assert_ne!(hash_to_bytes("apple"), hash_to_bytes("apples"));
    }

    #[test]
    fn non_ascii_input_is_hashed_as_utf8_bytes() {
        let text = "\u{00e9}t\u{00e9}";
        assert_eq!(
            hash_to_bytes(text),
            HashAlgorithm::Md5.digest(text.as_bytes())
        );
    }

    #[test]
    fn siphash_is_keyed() {
        let a = HashAlgorithm::SipHash13 { k0: 1, k1: 2 };
        let b = HashAlgorithm::SipHash13 { k0: 3, k1: 4 };
        assert_eq!(a.digest(b"apple"), a.digest(b"apple"));
        assert_ne!(a.digest(b"apple"), b.digest(b"apple"));
    }

    #[test]
    fn siphash_differs_from_md5() {
        let sip = HashAlgorithm::SipHash13 { k0: 0, k1: 0 };
        assert_ne!(sip.digest(b"apple"), HashAlgorithm::Md5.digest(b"apple"));
    }

    #[test]
    fn names() {
        assert_eq!(HashAlgorithm::Md5.name(), "md5");
        assert_eq!(HashAlgorithm::SipHash13 { k0: 0, k1: 0 }.name(), "siphash13");
    }
}
