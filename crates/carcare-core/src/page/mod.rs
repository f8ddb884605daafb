//! Page state: the customer booking page and the admin page.
//!
//! Each page owns its state outright and is driven through named
//! operations; rendering is left to the caller.

pub mod admin;
pub mod booking;
