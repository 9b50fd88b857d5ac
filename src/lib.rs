//! Remote memory for AI agents — search/add tools and prompt augmentation
//! over a hosted memory API.
//!
//! Engram connects two consumers to one external memory store:
//!
//! - **MCP tools** (`search_memories`, `add_memory`) served over stdio or
//!   Streamable HTTP, for orchestration frameworks that invoke tools during
//!   generation.
//! - **[`model::augmented::AugmentedModel`]**, a drop-in wrapper around any
//!   [`model::ChatModel`] that retrieves relevant memories before each
//!   generation, injects them into the prompt, and optionally writes the
//!   completed exchange back.
//!
//! All storage, ranking, and retrieval semantics live behind the remote API;
//! this crate builds requests, reshapes responses, and enforces the scoping
//! invariant that one configuration yields one set of container tags for
//! both reads and writes.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment
//!   variables, plus container-tag resolution
//! - [`client`] — The remote memory API client and wire types
//! - [`tools`] — MCP tool handler exposing search/add to agent frameworks
//! - [`model`] — Chat model capability trait and the augmentation wrapper
//! - [`server`] — stdio and Streamable HTTP MCP transports
//! - [`error`] — Error taxonomy shared across the crate

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod server;
pub mod tools;
