//! Infrastructure layer for Car Home Services.
//!
//! Implements the [`carcare_core::api::BookingApi`] port over HTTP and loads
//! client configuration from disk.

pub mod config;
pub mod http;
