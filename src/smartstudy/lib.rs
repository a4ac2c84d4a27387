//! # SmartStudy Architecture
//!
//! SmartStudy is a **local document store** for a study platform: named
//! collections of JSON documents (users, courses, enrollments, notebooks,
//! quiz results, course progress, settings), a single-session account
//! service, and the maintenance tools around them. The CLI is one client of
//! the library, not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, parses JSON and filter clauses              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs), seed.rs, auth/              │
//! │  - Maintenance, document CRUD and accounts                  │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore over a StorageBackend                      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Ownership
//!
//! There are no globals. The caller builds a backend, wraps it in a
//! [`store::document_store::DocumentStore`], and hands that to
//! [`auth::AuthService`] (or [`api::StudyApi`]), which owns it from then on.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade used by the CLI
//! - [`auth`]: Registration, login and the persisted session
//! - [`commands`]: Maintenance and CRUD operations returning `CmdResult`
//! - [`config`]: `config.json` handling
//! - [`error`]: Error types
//! - [`filter`]: Equality filters for queries
//! - [`ids`]: Document id generation
//! - [`model`]: `Document`, `Snapshot` and collection names
//! - [`seed`]: Demo courses and settings
//! - [`store`]: Storage backends and the document store

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod ids;
pub mod model;
pub mod seed;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
