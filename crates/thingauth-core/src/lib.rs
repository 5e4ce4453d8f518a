//! Core domain types for thingauth: device identities, principals and certificate material.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod principal;
pub mod sanitize;
pub mod types;
