//! HTTP endpoint modules.

pub mod health;
pub mod pages;

pub use health::configure_health_routes;
pub use pages::configure_page_routes;
