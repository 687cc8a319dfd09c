//! Command line front end: load a network and some evidence, answer one query, print the report.

use bayes_enum::{
    load_evidence,
    load_network,
    Assignment,
    ConditionalInferenceEngine,
    EngineOptions,
    EnumerationEngine,
    FactorScope,
    LookupMode
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::path::PathBuf;

/// Exact inference by enumeration over a discrete Bayesian network
#[derive(Parser)]
#[command(name = "bayes-enum")]
#[command(version)]
struct Cli {
    /// JSON network definition
    network: PathBuf,

    /// Variable to infer
    #[arg(short, long)]
    query: String,

    /// Evidence file, one `name = value` per line
    #[arg(short, long)]
    evidence: Option<PathBuf>,

    /// How CPT levels are matched against an assignment
    #[arg(long, value_enum, default_value_t = LookupArg::ByVariable)]
    lookup: LookupArg,

    /// Which CPTs are multiplied into each term
    #[arg(long, value_enum, default_value_t = ScopeArg::Ancestors)]
    scope: ScopeArg,

    /// Refuse queries needing more hidden-variable combinations than this
    #[arg(long)]
    max_combinations: Option<u64>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LookupArg {
    ByVariable,
    ByState,
}

impl LookupArg {
    fn as_lookup_mode(self) -> LookupMode {
        match self {
            LookupArg::ByVariable => LookupMode::ByVariable,
            LookupArg::ByState => LookupMode::ByState,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ScopeArg {
    Ancestors,
    All,
}

impl ScopeArg {
    fn as_factor_scope(self) -> FactorScope {
        match self {
            ScopeArg::Ancestors => FactorScope::QueryAncestors,
            ScopeArg::All => FactorScope::AllVariables,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so the report can be piped
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let lookup = cli.lookup.as_lookup_mode();
    let network = load_network(&cli.network, lookup)
        .with_context(|| format!("failed to load network from {}", cli.network.display()))?;

    let evidence = match cli.evidence {
        Some(ref path) => {
            let (evidence, warnings) = load_evidence(path)
                .with_context(|| format!("failed to read evidence from {}", path.display()))?;
            if ! warnings.is_empty() {
                warn!(skipped = warnings.len(), path = %path.display(), "some evidence lines were skipped");
            }
            evidence
        },
        None => Assignment::new(),
    };

    let mut options = EngineOptions::default()
        .lookup(lookup)
        .scope(cli.scope.as_factor_scope());
    if let Some(budget) = cli.max_combinations {
        options = options.max_combinations(budget);
    }
    info!(?options, query = %cli.query, "running query");

    let engine = EnumerationEngine::with_options(&network, options);
    let posterior = engine
        .posterior(&cli.query, &evidence)
        .with_context(|| format!("failed to infer P({} | {})", cli.query, evidence))?;

    println!("{}", posterior);
    Ok(())
}
