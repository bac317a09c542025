//! # Storage Module
//!
//! Holds activity records for the domain services. Records live in memory
//! for the lifetime of the process behind the `ActivityStorage` trait.

pub mod memory;
pub mod traits;

pub use memory::InMemoryActivityStore;
pub use traits::ActivityStorage;
