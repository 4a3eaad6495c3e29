//! HTTP API surface.

pub mod http;
