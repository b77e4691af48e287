#![forbid(unsafe_code)]
#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

//! Stake ledger primitives: fixed-point arithmetic, hashing, fixed-width encodings, binary Merkle trees.
//
// Shared by the ledger engine and its tests:
//
// - Floor-division fixed-point helpers with 256-bit intermediates
// - Domain-tagged SHA3-256 with length framing
// - Fixed-width little-endian integer encodings
// - Binary Merkle root (duplicate last when odd)
// - Constant-time equality helpers for 32-byte digests

use sha3::{Digest, Sha3_256};
use subtle::ConstantTimeEq;

/// 32-byte hash (SHA3-256 output).
pub type Hash256 = [u8; 32];

pub mod constants;
pub mod fixed;

pub use fixed::{mul3_div_floor, mul3_div_floor_saturating, mul_div_floor, pow10, scale_units, ArithmeticError};

/// Convert an unsigned integer to fixed-width little-endian bytes.
///
/// The output is exactly `W` bytes (no overlong encodings).
#[must_use]
pub fn le_bytes<const W: usize>(mut x: u128) -> [u8; W] {
    let mut out = [0u8; W];
    let mut i = 0usize;
    while i < W {
        out[i] = (x & 0xFF) as u8;
        x >>= 8;
        i += 1;
    }
    out
}

/// Domain-tagged SHA3-256 with length framing:
/// `H(tag_ascii, parts[])` = `SHA3_256`( UTF8(tag) || Σ ( LE(|p|,8) || p ) )
#[must_use]
pub fn h_tag(tag: &str, parts: &[&[u8]]) -> Hash256 {
    debug_assert!(
        tag.starts_with("stake."),
        "non-stake.* tag used in ledger hashing: {tag}"
    );
    let mut hasher = Sha3_256::new();
    hasher.update(tag.as_bytes());
    for p in parts {
        let len_le = le_bytes::<8>(p.len() as u128);
        hasher.update(len_le);
        hasher.update(p);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Compute the Merkle leaf hash of a payload using the shared leaf domain tag.
#[must_use]
pub fn merkle_leaf(payload: &[u8]) -> Hash256 {
    h_tag(constants::TAG_MERKLE_LEAF, &[payload])
}

/// Compute the Merkle node hash from two child node hashes.
#[must_use]
pub fn merkle_node(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut cat = [0u8; 64];
    cat[..32].copy_from_slice(left);
    cat[32..].copy_from_slice(right);
    h_tag(constants::TAG_MERKLE_NODE, &[&cat])
}

/// Compute the binary Merkle root. When the number of nodes at a level is odd,
/// the last node is duplicated. The empty tree root is `H("stake.merkle.empty", [])`.
#[must_use]
pub fn merkle_root(leaves_payload: &[Vec<u8>]) -> Hash256 {
    if leaves_payload.is_empty() {
        return h_tag(constants::TAG_MERKLE_EMPTY, &[]);
    }
    let mut level: Vec<Hash256> = leaves_payload.iter().map(|p| merkle_leaf(p)).collect();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            if let Some(last) = level.last().copied() {
                level.push(last);
            }
        }
        let mut next: Vec<Hash256> = Vec::with_capacity(level.len() / 2);
        let mut i = 0usize;
        while i < level.len() {
            next.push(merkle_node(&level[i], &level[i + 1]));
            i += 2;
        }
        level = next;
    }
    // length >= 1
    level[0]
}

/// Constant-time equality for two 32-byte hashes.
#[must_use]
pub fn ct_eq_hash(a: &Hash256, b: &Hash256) -> bool {
    a.ct_eq(b).into()
}
