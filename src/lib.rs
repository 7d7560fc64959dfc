//! Core library for the waves-swap project.
//!
//! The swap form state machine and its quote live in `form`; everything
//! that talks to the outside world (rate feed, wallet) sits behind `rates`
//! and `wallet`, and `session` ties them together.

pub mod config;
pub mod errors;
pub mod form;
pub mod models;
pub mod rates;
pub mod session;
pub mod utils;
pub mod wallet;
