//! Car ownership cost and affordability engine
//!
//! [`calculator::calculate`] is a pure function over a [`calculator::CalcInput`]
//! and the static [`profiles`] table. Everything else in the crate (the HTTP
//! service, the advisory adapter, snapshot storage) is plumbing around it.

pub mod advisory;
pub mod calculator;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod profiles;
pub mod providers;
pub mod server;
pub mod signals;
pub mod snapshots;

pub use logging::init_tracing;
