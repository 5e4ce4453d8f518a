//! Cryptographic primitives for thingauth: certificate decoding and signature verification.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod decoder;
pub mod error;
pub mod verifier;
