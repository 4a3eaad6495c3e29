//! ArtisanAI Engine - all server-side code.
//!
//! Layers, outermost first: `api` (HTTP surface), `use_cases` (wizard
//! sessions and storefront orchestration), `flows` (typed model-call
//! contracts), `infrastructure` (provider clients behind ports).

pub mod api;
pub mod app;
pub mod flows;
pub mod infrastructure;
pub mod use_cases;
