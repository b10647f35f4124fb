//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`AppError`](crate::errors::AppError), so
//! handlers see one error envelope no matter where a request fails.

pub mod id_path;
pub mod json_body;

pub use id_path::IdPath;
pub use json_body::{JsonBody, MAX_BODY_BYTES, decode_json, reject_body};
