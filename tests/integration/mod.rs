//! Integration test suite for permascript
//!
//! These tests drive the compiled binary against a temporary Steam install
//! and a directory of app info snapshots. No network access is needed.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate**: Bundle generation end to end
//! - **resolve**: Record listing in table and JSON form
//! - **shell**: Interactive loop fed from stdin
//! - **config**: Global configuration management

#[path = "../common/mod.rs"]
mod common;

mod config;
mod generate;
mod resolve;
mod shell;
