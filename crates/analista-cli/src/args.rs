//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default policy file looked up next to the process.
pub const DEFAULT_CONFIG_FILE: &str = "analista_policy.toml";

#[derive(Parser)]
#[command(name = "analista")]
#[command(about = "SQL guardrails for the business analyst agent")]
#[command(
    long_about = r#"Operator tooling for the analista SQL guardrails

USAGE:
  analista ask "¿qué se vendió ayer?"      # Dry-run the curated router
  analista check "SELECT * FROM items"     # Vet one SQL statement
  echo "SELECT 1" | analista check         # Vet SQL from stdin

The policy (allowed tables, dangerous keywords, default row limit) is
read from analista_policy.toml when present, otherwise the built-in
defaults apply."#
)]
#[command(version)]
pub struct Cli {
    /// Path to the policy configuration file (TOML or JSON)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route a natural-language question through the curated rules
    Ask {
        /// The question, exactly as the user would type it
        question: String,
    },
    /// Vet a SQL statement against the safety policy
    Check {
        /// The SQL text (omit to read from stdin)
        sql: Option<String>,
    },
    /// Print the active policy tables
    Policy,
}
