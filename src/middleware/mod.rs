//! Middleware module
//!
//! Contains HTTP request logging middleware

pub mod logging;
