//! Collision queries for Skyfire.
//!
//! Entity counts are small, so every query here is a brute-force scan.

pub mod collision;

pub use collision::*;
