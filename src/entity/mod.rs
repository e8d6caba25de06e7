//! SeaORM entities.

pub mod session;
