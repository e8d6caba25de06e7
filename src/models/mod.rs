//! Domain models shared by the gate and its downstream handlers.

pub mod identity;

pub use identity::{Identity, Role};
