//! Booking workflow logic and backend port definitions for Car Home Services.
//!
//! This crate defines the "port" (the [`api::BookingApi`] trait) that the
//! infrastructure layer implements, plus the UI-agnostic state behind the
//! customer booking page and the admin page. It depends only on
//! `carcare-types` -- never on `carcare-infra` or any HTTP crate.

pub mod api;
pub mod draft;
pub mod page;
pub mod transition;

#[cfg(test)]
pub(crate) mod mock;
