//! # pokedex
//!
//! The binary is intentionally thin: it only invokes `cli::run()` and handles
//! process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/pokedexapp/`: UI-agnostic library: model, query builder, stores,
//!   listing and creation commands, API facade, paging controller
//! - `crates/pokedex/`: this binary: CLI, HTTP server, HTTP client
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - command handlers + local/remote connection (commands.rs) │
//! │  - terminal rendering (render.rs)                           │
//! │  - interactive browsing over the paging controller          │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌──────────────────────────┐     ┌──────────────────────────────┐
//! │  HTTP Client (client.rs) │ ──▶ │  HTTP Server (src/server/)   │
//! └──────────────────────────┘     └──────────────────────────────┘
//!                                                │
//!                                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (pokedexapp::api)                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--local` the CLI skips the network and talks to the API over the
//! configured data file directly.
//!
//! ## Testing Approach
//!
//! - **Library**: listing, creation and paging logic, unit tested there.
//! - **Server**: router tests with `tower::ServiceExt::oneshot`.
//! - **Client**: against a server bound to an ephemeral port.
//! - **CLI**: end-to-end with `assert_cmd` in `tests/`.

mod cli;
mod client;
mod server;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
