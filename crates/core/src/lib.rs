//! Catalog Sync Core - Shared domain types.
//!
//! This crate provides the types used across all Catalog Sync components:
//! - `sync` - CSV record source, Shopify Admin client, sync driver
//! - `cli` - Command-line entry point
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no HTTP
//! clients. The inventory level selection rule and delta computation live
//! here so they can be tested without a remote catalog.
//!
//! # Modules
//!
//! - [`types`] - SKUs, unit costs, inventory entities and sync outcomes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
