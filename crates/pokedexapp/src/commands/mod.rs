//! # Command Layer
//!
//! This module contains the **core business logic** of pokedex. Each command
//! lives in its own submodule and is a plain function over a [`RecordStore`].
//!
//! ## Role and Responsibilities
//!
//! - Implement the actual logic for each operation
//! - Return structured values (`PageResponse`, `CreateResult`), never strings
//! - Stay transport-agnostic: the same functions back the HTTP server and the
//!   local CLI
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, sockets or terminal concerns
//! - **Parameter parsing**: raw strings are turned into typed requests by the
//!   API layer and [`crate::query`]
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! `InMemoryStore` and exercise every branch, including the store fallback
//! path for stores without snapshot reads.
//!
//! ## Command Modules
//!
//! - [`list`]: Answer one page request
//! - [`create`]: Validate and insert a new record
//!
//! [`RecordStore`]: crate::store::RecordStore

pub mod create;
pub mod list;
