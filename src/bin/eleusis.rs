//! Play one game of Eleusis against a built-in arbiter.
//!
//! ```text
//! eleusis --rule "equal(suit(previous), suit(current))" --seed 7 2H
//! RUST_LOG=debug eleusis 10D 3H
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eleusis::{
    Agent, AgentConfig, Card, EleusisConfig, ExpressionTree, RuleArbiter, RuleConsistency,
};

/// Eleusis rule-inference agent
#[derive(Parser)]
#[command(name = "eleusis")]
#[command(about = "Infer a hidden Eleusis rule by playing cards", long_about = None)]
#[command(version)]
struct Cli {
    /// Hidden rule the arbiter enforces, in prefix notation
    #[arg(short, long, default_value = "equal(color(previous), color(current))")]
    rule: String,

    /// Seed for card sampling
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Play ceiling
    #[arg(short, long, default_value_t = 200)]
    max_plays: u32,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    /// Up to two cards known to be legal, e.g. 10D 3H
    seed_cards: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let rule = ExpressionTree::parse(&cli.rule).context("parsing --rule")?;
    let seeds = cli
        .seed_cards
        .iter()
        .map(|s| s.parse::<Card>())
        .collect::<Result<Vec<_>, _>>()
        .context("parsing seed cards")?;
    if seeds.len() > 2 {
        bail!("at most two seed cards may be given, got {}", seeds.len());
    }

    let arbiter = RuleArbiter::new(rule.clone());
    for (i, &card) in seeds.iter().enumerate() {
        let mut check = arbiter.clone();
        if !eleusis::Arbiter::judge(&mut check, card, &seeds[..i]) {
            bail!("seed card {card} is not legal under the hidden rule");
        }
    }

    let config = EleusisConfig::default().with_agent(
        AgentConfig::default()
            .with_seed(cli.seed)
            .with_max_plays(cli.max_plays),
    );
    info!(hidden = %rule, seed = cli.seed, "starting");

    let mut agent = Agent::with_random_sampler(config, arbiter);
    let result = agent.run(&seeds)?;
    let consistency = RuleConsistency::measure(&result.tree, agent.board());

    println!("terminal:  {}", result.terminal);
    println!("plays:     {}", result.plays);
    println!(
        "board:     {} accepted, {} rejected",
        agent.board().accepted_count(),
        agent.board().rejected_count()
    );
    if let Some(compound) = &result.compound {
        println!("compound:  {compound}");
    }
    println!("inferred:  {}", result.tree);
    println!("hidden:    {rule}");
    println!(
        "agreement: {}/{} ({:.1}%)",
        consistency.agreements(),
        consistency.total(),
        consistency.accuracy() * 100.0
    );
    Ok(())
}
