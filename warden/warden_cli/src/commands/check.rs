//! The check command.

use anyhow::Context as _;
use clap::Args;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;
use warden_predicates::{Authorizer, Context, Identity};

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Permission name, e.g. `group:read`
    #[clap(long)]
    pub permission: String,

    /// JSON file describing who is acting; anonymous when omitted
    #[clap(long)]
    pub identity: Option<PathBuf>,

    /// JSON file describing what is acted on; empty when omitted
    #[clap(long)]
    pub context: Option<PathBuf>,

    /// Show which clauses were tried and where they failed
    #[clap(long)]
    pub explain: bool,
}

/// Check the permission and print `granted` or `denied`.
///
/// # Returns
///
/// * `Ok(true)` - The permission was granted.
/// * `Ok(false)` - The permission was denied.
/// * `Err(_)` - A fixture could not be read or a predicate failed.
pub fn execute(authorizer: &Authorizer, args: &CheckArgs) -> anyhow::Result<bool> {
    let identity: Identity = load_or_default(args.identity.as_deref(), "identity")?;
    let context: Context = load_or_default(args.context.as_deref(), "context")?;

    let decision = authorizer
        .evaluate(&args.permission, &identity, &context)
        .with_context(|| format!("failed to check '{}'", args.permission))?;

    println!("{}", if decision.is_granted() { "granted" } else { "denied" });

    if args.explain {
        println!("{}: {}", decision.permission, decision.result);
        for trace in &decision.trace {
            let sequence = if trace.evaluated.is_empty() {
                "(always)".to_string()
            } else {
                trace.evaluated.join(" -> ")
            };
            match &trace.failed_at {
                Some(failed) => println!("  [{}] {} (failed at {})", trace.clause, sequence, failed),
                None => println!("  [{}] {} (held)", trace.clause, sequence),
            }
        }
    }

    Ok(decision.is_granted())
}

fn load_or_default<T>(path: Option<&Path>, what: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        debug!(what, "No fixture given, using the default");
        return Ok(T::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {} from {}", what, path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {} from {}", what, path.display()))
}
