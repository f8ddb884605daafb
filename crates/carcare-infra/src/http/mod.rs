//! HTTP adapter for the booking backend.

pub mod client;

pub use client::HttpBookingApi;
