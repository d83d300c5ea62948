//! Pipeline orchestration for Brandscope.
//!
//! This crate ties together fetching, style aggregation, style parsing, token
//! extraction, and voice analysis into one call ([`pipeline::extract_website`]).

pub mod assembler;
pub mod pipeline;
