//! hookd library
//!
//! Startup configuration for the hookd webhook execution server.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod observability;

pub use config::Config;
pub use error::{Error, Result};
