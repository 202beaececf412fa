//! This file is the root of the `fixrec_codec` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`decoder`,
//!     `generator`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the public API surface: the schema types, the two
//!     engines, the batch container, and the tool adapters.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod config;
pub mod tool;

mod batch;
mod decoder;
mod encoding;
mod error;
mod generator;
mod kernels;
mod schema;
mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use batch::{BoundsDiagnostic, DecodedBatch};
pub use config::{DecoderOptions, GeneratorOptions, SignStyle};
pub use decoder::Decoder;
pub use encoding::TextEncoding;
pub use error::FixrecError;
pub use generator::Generator;
pub use schema::{FieldSpec, Schema};
pub use types::{FieldValue, Utype};
