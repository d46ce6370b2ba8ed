//! Infrastructure layer: store implementations and wiring.

pub mod store;

pub use store::{open_store, JsonFileStore, Store};
