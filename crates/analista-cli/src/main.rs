//! Operator CLI for the analista SQL guardrails.
//!
//! Lets an operator exercise the curated router and the safety policy
//! outside the chat surface: dry-run a question, vet a SQL statement,
//! inspect the active policy tables.

mod args;

use analista_core::{plan_question, vet_sql, SafetyConfig, SqlPolicy};
use anyhow::{Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use std::io::Read;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = SafetyConfig::load_from_file(&cli.config_file)
        .with_context(|| format!("loading policy from '{}'", cli.config_file.display()))?;
    let policy = SqlPolicy::new(&config).context("compiling safety policy")?;

    match cli.command {
        Commands::Ask { question } => run_ask(&policy, &question),
        Commands::Check { sql } => run_check(&policy, sql),
        Commands::Policy => run_policy(&config),
    }
}

fn run_ask(policy: &SqlPolicy, question: &str) -> Result<ExitCode> {
    match plan_question(policy, question)? {
        Some(vetted) => {
            println!("Consulta curada: {}", vetted.key);
            println!("{}", vetted.explanation);
            println!("Visualización sugerida: {}", vetted.viz_hint);
            println!("\n{}", vetted.sql);
            if !vetted.params.is_empty() {
                println!("\nParámetros:");
                let mut params: Vec<_> = vetted.params.iter().collect();
                params.sort_by_key(|(name, _)| name.as_str());
                for (name, value) in params {
                    println!("  :{name} = {value}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Sin regla curada: la pregunta pasaría al agente LLM.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_check(policy: &SqlPolicy, sql: Option<String>) -> Result<ExitCode> {
    let sql = match sql {
        Some(sql) => sql,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading SQL from stdin")?;
            buf
        }
    };

    match vet_sql(policy, &sql) {
        Ok(guarded) => {
            println!("{guarded}");
            Ok(ExitCode::SUCCESS)
        }
        Err(reason) => {
            eprintln!("Consulta rechazada: {reason}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_policy(config: &SafetyConfig) -> Result<ExitCode> {
    println!("Tablas permitidas:");
    for table in &config.allowed_tables {
        println!("  {table}");
    }
    println!("Comandos prohibidos:");
    for keyword in &config.dangerous_keywords {
        println!("  {keyword}");
    }
    println!("Límite de filas por defecto: {}", config.default_row_limit);
    Ok(ExitCode::SUCCESS)
}
