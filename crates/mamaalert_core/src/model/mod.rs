//! Addressing model for persisted companion data.
//!
//! # Responsibility
//! - Enumerate every logical resource the app persists.
//! - Derive stable, collision-free storage keys from kind + owner.
//!
//! # Invariants
//! - Kind tags and global literal keys are persisted schema and never change.
//! - Key derivation is a pure function of its inputs.

pub mod key;
pub mod resource;
