//! Infrastructure: model provider clients and their port traits.

pub mod comfyui;
pub mod ollama;
pub mod ports;
