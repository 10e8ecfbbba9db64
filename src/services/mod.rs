//! Service clients built on the shared request pipeline.
//!
//! Each service lives in its own module with its models and any
//! service-specific error codes.

pub mod chatai;
