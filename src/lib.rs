//! Admin gate library.
//!
//! Authenticates each request by admin header secret or cookie session,
//! enforces roles through route guards, and manages session lifetime in a
//! key-value store with expiration.

pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
pub mod session;
