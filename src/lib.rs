//! # swift-codes
//!
//! REST service for looking up, listing, creating and deleting bank
//! SWIFT-code records, backed by a single PostgreSQL table.
//!
//! ## SWIFT codes
//!
//! A SWIFT code is an 8- or 11-character bank identifier. The first 8
//! characters identify institution, country and location; an optional
//! 3-character suffix identifies a branch, with `XXX` denoting the
//! headquarters itself. The headquarters/branch relationship is never
//! stored: branches are derived at query time by matching the 8-character
//! prefix of the headquarters code.
//!
//! ## Layout
//!
//! - [`cli`]: command line parsing, configuration and startup.
//! - [`api`]: axum router, middleware and HTTP handlers.
//! - [`swift`]: domain models, business rules and the Postgres store.

pub mod api;
pub mod cli;
pub mod swift;
