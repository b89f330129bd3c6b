//! Carbon Tracker API library.
//!
//! This crate provides the purchase recorder and query service as a
//! library, allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod payload;
pub mod routes;
pub mod services;
pub mod state;
