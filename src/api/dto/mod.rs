//! Data Transfer Objects for REST request deserialization.
//!
//! Responses are rendered by [`crate::api::view`]; these types only cover
//! what clients send.

pub mod product_dto;

pub use product_dto::*;
