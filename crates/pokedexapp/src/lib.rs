//! # pokedexapp
//!
//! The UI-agnostic core of pokedex: records with a name, a list of types and a
//! sprite, browsed page by page under a type filter.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Transports (crates/pokedex): HTTP server, HTTP client, CLI │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Turns raw wire parameters into typed requests            │
//! │  - Dispatches to command modules                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*)                                 │
//! │  - Listing: skip/limit arithmetic, empty-page short-circuit │
//! │  - Creation: validation, insertion                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store Layer (store/*)                                      │
//! │  - `RecordStore` trait: count / list / insert               │
//! │  - In-memory and JSON-file backends                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client side of the listing protocol lives in [`client`]: a paging
//! controller that tracks page, page size and filter, issues fetch tickets and
//! drops responses that arrive for a request it has since superseded.
//!
//! Nothing in this crate performs terminal or network I/O.

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod validation;
