//! Commands that print the resolved permission map.

use anyhow::anyhow;
use clap::Args;
use warden_predicates::Authorizer;

/// Arguments for the plan command
#[derive(Args)]
pub struct PlanArgs {
    /// Only this permission
    #[clap(long)]
    pub permission: Option<String>,

    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}

/// Print every permission name with its number of clauses.
pub fn permissions(authorizer: &Authorizer) -> anyhow::Result<()> {
    let resolved = authorizer.resolved();

    for permission in resolved.permissions() {
        let clauses = resolved.clauses(permission).map_or(0, <[_]>::len);
        println!("{:<24} {} clause(s)", permission, clauses);
    }

    Ok(())
}

/// Print every predicate with the parents it declares.
pub fn predicates(authorizer: &Authorizer) -> anyhow::Result<()> {
    let registry = authorizer.resolved().registry();

    for id in registry.ids() {
        let name = registry
            .name(id)
            .ok_or_else(|| anyhow!("{} has no name", id))?;
        let parents = registry
            .parents(id)?
            .iter()
            .filter_map(|parent| registry.name(*parent))
            .collect::<Vec<_>>();

        if parents.is_empty() {
            println!("{}", name);
        } else {
            println!("{} <- {}", name, parents.join(", "));
        }
    }

    Ok(())
}

/// Print resolved evaluation plans.
pub fn plan(authorizer: &Authorizer, args: &PlanArgs) -> anyhow::Result<()> {
    let resolved = authorizer.resolved();

    let plans = match &args.permission {
        Some(permission) => vec![resolved
            .describe(permission)
            .ok_or_else(|| anyhow!("unknown permission '{}'", permission))?],
        None => resolved.plan(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
    } else {
        for plan in plans {
            print!("{}", plan);
        }
    }

    Ok(())
}
