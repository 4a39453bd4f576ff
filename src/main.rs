use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use orgviz::schema::{FixtureProvider, RestSchemaProvider, SchemaProvider};
use orgviz::{generate_erd, Config, DisplayMode, ErdOptions, TraversalMode};

#[derive(Parser)]
#[command(name = "orgviz", about = "Bounded ERD generation from Salesforce org metadata")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a Mermaid ER diagram reachable from the given root objects
    Generate {
        /// Root object API names, e.g. Account Opportunity
        #[arg(required = true)]
        roots: Vec<String>,

        /// Relationship hops to traverse from the roots (recommended 0-5)
        #[arg(long)]
        depth: Option<u32>,

        /// Stop after this many objects (unbounded when omitted)
        #[arg(long)]
        max_objects: Option<usize>,

        /// Key fields shown per entity block
        #[arg(long)]
        max_fields: Option<usize>,

        /// Entity names only, no field blocks
        #[arg(long)]
        compact: bool,

        /// Show only the roots and the relationships among them
        #[arg(long)]
        roots_only: bool,

        /// Generate offline from captured describe JSON (file or directory)
        /// instead of the live org
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Write the diagram here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the org's objects (for picking roots), sorted by label
    List {
        /// Include only custom objects
        #[arg(long)]
        custom_only: bool,
    },
}

/// Build the live REST provider from config + environment.
fn build_rest_provider(config: &Config) -> Result<RestSchemaProvider> {
    let access_token = std::env::var(&config.salesforce.access_token_env).map_err(|_| {
        anyhow::anyhow!(
            "Environment variable {} not set. Set it in your .env file or as an environment variable.",
            config.salesforce.access_token_env
        )
    })?;
    let instance_url = std::env::var(&config.salesforce.instance_url_env).map_err(|_| {
        anyhow::anyhow!(
            "Environment variable {} not set. Set it in your .env file or as an environment variable.",
            config.salesforce.instance_url_env
        )
    })?;

    url::Url::parse(&instance_url).with_context(|| {
        format!(
            "{} is not a valid URL: {}",
            config.salesforce.instance_url_env, instance_url
        )
    })?;

    Ok(RestSchemaProvider::new(
        instance_url,
        access_token,
        config.salesforce.api_version.clone(),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagram text goes to stdout; logs stay on stderr
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::Generate {
            roots,
            depth,
            max_objects,
            max_fields,
            compact,
            roots_only,
            fixture,
            output,
        } => {
            let options = ErdOptions {
                max_depth: depth.unwrap_or(config.erd.max_depth),
                max_objects: max_objects.or(config.erd.max_objects),
                max_fields_per_object: max_fields.unwrap_or(config.erd.max_fields_per_object),
                display: if compact || config.erd.compact {
                    DisplayMode::Compact
                } else {
                    DisplayMode::Full
                },
                mode: if roots_only {
                    TraversalMode::RootsOnly
                } else {
                    TraversalMode::Expand
                },
            };

            let provider: Box<dyn SchemaProvider> = match fixture {
                Some(path) => Box::new(
                    FixtureProvider::load(&path)
                        .with_context(|| format!("Failed to load fixture {}", path.display()))?,
                ),
                None => Box::new(build_rest_provider(&config)?),
            };

            let result = generate_erd(provider.as_ref(), &roots, &options).await;

            log::info!(
                "Included {} of {} discovered objects, {} relationships",
                result.objects_included.len(),
                result.total_objects_found,
                result.relationship_count
            );
            if result.truncated {
                log::warn!(
                    "Traversal stopped at the object ceiling; raise --max-objects to see more"
                );
            }
            if result.may_exceed_render_limit {
                log::warn!("Diagram is large and may not render in a browser");
            }

            match output {
                Some(path) => {
                    std::fs::write(&path, &result.mermaid_code)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote diagram to {}", path.display());
                }
                None => print!("{}", result.mermaid_code),
            }
        }
        Command::List { custom_only } => {
            let provider = build_rest_provider(&config)?;
            let objects = provider
                .describe_global()
                .await
                .context("Failed to list org objects")?;
            for obj in objects {
                if custom_only && !obj.custom {
                    continue;
                }
                println!("{}\t{}", obj.name, obj.label);
            }
        }
    }

    Ok(())
}
