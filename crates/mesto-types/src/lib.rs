//! Mesto Types - Shared domain types
//!
//! This crate contains domain types used across Mesto crates:
//! - User identity and public profile
//! - Cards and their like-sets

pub mod card;
pub mod user;

pub use card::*;
pub use user::*;
