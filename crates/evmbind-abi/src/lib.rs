//! # evmbind-abi
//!
//! The ABI marshaling core: parses embedded contract interface descriptions
//! into immutable [`AbiSchema`] values, encodes view-function calls into
//! calldata, decodes raw return bytes into typed results, and decodes raw
//! log entries (indexed topics + data payload) into typed events.

pub mod convert;
pub mod decode;
pub mod encode;
pub mod event;
pub mod schema;

pub use decode::Returns;
pub use event::{decode_event, DecodedEvent};
pub use schema::AbiSchema;
