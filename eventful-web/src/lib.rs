//! Browser binding for eventful storage.
//!
//! On `wasm32` with the `wasm` feature, [`WebStorage`] implements the storage
//! backend over the window's `Storage` objects and [`window_storage_areas`]
//! builds the local/session facades. Other targets only get the error type.

mod error;

pub use error::*;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use web::*;
