//! Data models module
//!
//! Contains gateway request/response structures and OpenAI API structures

pub mod openai;
pub mod query;
