//! # taskman
//!
//! An interactive command-line task tracker. Tasks have a title, an optional
//! description and due date, a priority and a status, and live as documents
//! in a collection stored in SQLite.
//!
//! ## Layout
//!
//! - [`libs`]: the task entity, configuration, sorting and terminal output
//! - [`db`]: the document collection and the task repository over it
//! - [`commands`]: the shell loop and one module per shell command
//!
//! ## Quick start
//!
//! ```bash
//! taskman
//! > add
//! > list --filter status:Pending --sort due_date:asc
//! > mark_complete
//! > exit
//! ```

pub mod commands;
pub mod db;
pub mod libs;
