//! Clients for the services thingauth depends on: the device registry and the object store.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod aws;
pub mod error;
pub mod object_store;
pub mod registry;

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
