//! langkit - i18n helpers for TypeScript front-ends
//!
//! Two independent tools, each usable from the CLI or as a library:
//!
//! - **extract**: scan `.ts`/`.tsx` sources for quoted literals, write one
//!   nested resource file per source file, and rewrite the literals as lookup
//!   calls once the operator confirms.
//! - **reconcile**: read `Translation key not found` messages from a runtime
//!   log and add empty placeholders for those keys to two locale files.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, prompts, output)
//! - `config`: Configuration file loading and parsing
//! - `extract`: Literal scanning, planning and source rewriting
//! - `reconcile`: Log parsing and locale file backfilling
//! - `resource`: Nested resource document model and JSON output

pub mod cli;
pub mod config;
pub mod extract;
pub mod reconcile;
pub mod resource;
