//! Core types and trait definitions for the juicios case register.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, export and web crates all depend on it.

pub mod attachment;
pub mod case;
pub mod movement;
pub mod store;

pub use case::{Case, CaseId, CaseUpdate, NewCase};
pub use movement::{CaseMovements, Movement, MovementId, NewMovement, StoredAttachment};
pub use store::{CaseStore, Snapshot};
