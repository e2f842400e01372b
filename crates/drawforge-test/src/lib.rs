//! Shared test fixtures for drawforge crates.
//!
//! This crate provides data builders and brute-force oracles for testing.
//! It depends only on `drawforge-core` so every crate can use it.
//!
//! - [`group`] - Group builder with couples and exclusions
//! - [`oracle`] - Brute-force enumeration of valid assignments
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! drawforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use drawforge_test::group::GroupFixture;
//! use drawforge_test::oracle::count_valid_assignments;
//! ```

pub mod group;
pub mod oracle;

// Re-export commonly used types at crate root for convenience
pub use group::{participants, GroupFixture};
pub use oracle::{count_valid_assignments, derangements, is_valid_assignment};

/// Seeds used by multi-run solver tests.
pub const TEST_SEEDS: std::ops::Range<u64> = 0..32;
