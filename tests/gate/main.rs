//! End-to-end tests of the route guards.
//!
//! Each test builds an in-process actix app with an in-memory session store
//! and a pinned clock.
//!
//! Run with: cargo test --test gate

mod test_helpers;

mod test_failures;
mod test_properties;
mod test_scenarios;
