//! Shared domain types for the Car Home Services booking client.
//!
//! This crate contains the types exchanged with the booking backend
//! (services, pricing, quotes, bookings), the fixed add-on catalog, the
//! booking draft, client configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod addon;
pub mod booking;
pub mod config;
pub mod error;
pub mod quote;
pub mod service;
