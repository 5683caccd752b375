//! Declarative command grammars.
//!
//! A host builds a [`CommandGrammar`] once from literal and typed
//! [`GrammarNode`]s, then for every input line:
//!
//! - [`bind`] matches the line against the grammar and records, per typed
//!   node, the raw text, parsed value, token position or parse failure;
//! - [`complete`] suggests candidates for the token being typed;
//! - [`generate_usage`] renders a one-line usage string.
//!
//! [`CommandRegistry`] is a ready-made registration sink that ties grammars
//! to handlers, aliases and configuration.

pub use cmdtree_core::commands::*;
pub use cmdtree_core::config::{ConfigError, RegistryConfig};
