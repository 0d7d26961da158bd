//! Saltbloom Storefront library.
//!
//! All storefront functionality lives here so both the API binary and the
//! CLI can use it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_service;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
