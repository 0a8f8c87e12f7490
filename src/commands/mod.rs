//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - serve: Start the HTTP server
//! - calc: Evaluate an input and print the breakdown
//! - profiles: Print the vehicle profile table
//! - config: Configuration display and validation

pub mod calc;
pub mod config;
pub mod profiles;
pub mod serve;
