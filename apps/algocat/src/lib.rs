//! # algocat
//!
//! HTTP API, CLI and configuration for the algorithm catalog.
//! All catalog logic lives in `algocat-core`; this crate wires it to the outside world.

pub mod api;
pub mod cli;
pub mod config;
