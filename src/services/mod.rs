//! Session lifecycle services.

pub mod sessions;
pub mod sweeper;

pub use sessions::{generate_token, issue_session, revoke_session};
pub use sweeper::{run_sweep, start_sweep_task};
