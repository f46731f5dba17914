//! # Tudo - Task tracking for the terminal
//!
//! A command-line task tracker built around a concurrency-safe record
//! store with file-backed persistence.
//!
//! ## Features
//!
//! - **Task Management**: Create, update, complete and delete tasks with
//!   priorities, due dates, categories, tags and subtasks
//! - **Rich Queries**: Conjunctive filtering, directional sorting and
//!   pagination over the whole record set
//! - **Aggregation**: Whole-store summaries and date-ranged productivity
//!   statistics
//! - **Persistence**: A JSON-backed store with throttled auto-save and
//!   timestamped backup/restore snapshots
//! - **Data Exchange**: Lossless JSON and flat CSV import/export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tudo::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod libs;
pub mod storage;
