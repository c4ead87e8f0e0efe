//! # CLI Module
//!
//! Command-line access to a demo routing table.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List routes in resolution order:
//!
//! ```bash
//! verbrouter routes --format json
//! ```
//!
//! ### `dispatch`
//!
//! Send one request through the table and print the response. Form fields
//! are sent as a urlencoded body, so a POST can emulate another method:
//!
//! ```bash
//! verbrouter dispatch --method POST --path /items/3/ --form _method=put
//! ```
//!
//! `--config FILE` (or `VERBROUTER_CONFIG`) loads a YAML
//! [`RouterConfig`](crate::config::RouterConfig).

mod commands;


pub use self::commands::{demo_table, execute, run_cli, Cli, Commands, OutputFormat};
