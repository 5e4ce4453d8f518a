//! thingauth authentication library: certificate cache, registry resolver and authenticator.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod authenticator;
pub mod cache;
/// Runtime configuration loaded from environment variables.
pub mod config;
pub mod error;
pub mod resolver;
