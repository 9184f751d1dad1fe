//! crud-contract CLI
//!
//! Inspects what the CRUD contract suites would check for a resource:
//! - `names`: the derived naming variants
//! - `plan`: names, routes and every example, grouped by suite
//!
//! Output is JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crud_contract::suites::{self, Example};
use crud_contract::{Action, ContractConfig, ResourceNames};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "crud-contract", version, about = "Inspect CRUD contract suites")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the names derived from each resource
    Names {
        #[arg(required = true)]
        resources: Vec<String>,
    },
    /// Print routes and contract examples for each resource
    Plan {
        #[arg(required = true)]
        resources: Vec<String>,

        /// Route prefix, overriding CRUD_CONTRACT_ROUTE_PREFIX
        #[arg(long)]
        prefix: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct Route {
    action: Action,
    method: String,
    path: String,
}

#[derive(Debug, Serialize)]
struct SuitePlan {
    suite: String,
    examples: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ResourcePlan {
    names: ResourceNames,
    routes: Vec<Route>,
    suites: Vec<SuitePlan>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Names { resources } => {
            let names = resources
                .iter()
                .map(|r| derive(r))
                .collect::<Result<Vec<_>>>()?;
            serde_json::to_string_pretty(&names)?
        }
        Command::Plan { resources, prefix } => {
            let mut config = ContractConfig::from_env();
            if let Some(prefix) = prefix {
                config = config.with_route_prefix(&prefix);
            }
            tracing::debug!("Planning with route prefix {:?}", config.route_prefix);

            let plans = resources
                .iter()
                .map(|r| plan(r, &config))
                .collect::<Result<Vec<_>>>()?;
            serde_json::to_string_pretty(&plans)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn derive(resource: &str) -> Result<ResourceNames> {
    ResourceNames::derive(resource).with_context(|| format!("Invalid resource {:?}", resource))
}

fn plan(resource: &str, config: &ContractConfig) -> Result<ResourcePlan> {
    let names = derive(resource)?;
    let routes = Action::ALL
        .iter()
        .map(|action| Route {
            action: *action,
            method: action.method().to_string(),
            path: route(*action, &names, &config.route_prefix),
        })
        .collect();
    let suites = Action::ALL
        .iter()
        .map(|action| SuitePlan {
            suite: format!("CRUD {}", action),
            examples: suites::examples(*action, &names)
                .iter()
                .map(Example::full_description)
                .collect(),
        })
        .collect();

    tracing::info!("Planned {} ({})", names.model_name, names.plural_key);
    Ok(ResourcePlan {
        names,
        routes,
        suites,
    })
}

fn route(action: Action, names: &ResourceNames, prefix: &str) -> String {
    match action {
        Action::Index | Action::Create => names.collection_path(prefix),
        Action::Edit => names.edit_path(prefix, ":id"),
        Action::Show | Action::Update | Action::Destroy => names.member_path(prefix, ":id"),
    }
}
