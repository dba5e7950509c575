//! # Pet Friends API suite
//!
//! Client wrapper for the Pet Friends REST service plus the scripted
//! scenarios that check authentication, pet CRUD and photo upload against a
//! running deployment.

pub mod api;
pub mod cli;
pub mod config;
pub mod consts;
pub mod logger;
pub mod models;
pub mod oracle;
pub mod scenarios;
