use anyhow::{Context, Result};
use clap::Parser;
use openapi_drift::compat::{DiffConfig, rules};
use openapi_drift::spec::{Compatibility, Spec};
use openapi_drift::{SpecRole, generate_changelog, generate_migration_guide};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openapi-drift")]
#[command(about = "Compare OpenAPI specifications and report breaking changes")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SpecPair {
    #[arg(help = "Path to the old specification (JSON or YAML)")]
    old_file: PathBuf,
    #[arg(help = "Path to the new specification (JSON or YAML)")]
    new_file: PathBuf,
    #[arg(long, help = "YAML configuration file with a `drift` section")]
    config: Option<PathBuf>,
    #[arg(long, help = "Paths to ignore (comma-separated, `/**` suffix for prefixes)")]
    ignore: Option<String>,
    #[arg(long, help = "Change categories to suppress (comma-separated)")]
    except_categories: Option<String>,
    #[arg(long, help = "Report a newly required field once across media types")]
    dedupe_required: bool,
}

#[derive(Parser)]
enum Commands {
    #[command(about = "Compare two specifications and list the changes")]
    Compare {
        #[command(flatten)]
        specs: SpecPair,
        #[arg(long, help = "Output format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
    #[command(about = "Render a Markdown changelog for the new specification")]
    Changelog {
        #[command(flatten)]
        specs: SpecPair,
    },
    #[command(about = "Render a Markdown migration guide for the breaking changes")]
    Migrate {
        #[command(flatten)]
        specs: SpecPair,
    },
    #[command(about = "Print the semantic fingerprint of a specification")]
    Fingerprint {
        #[arg(help = "Path to the specification")]
        file: PathBuf,
    },
    #[command(about = "List the breaking change rules")]
    Rules,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl SpecPair {
    fn load(&self) -> Result<(Spec, Spec, DiffConfig)> {
        let mut config = match &self.config {
            Some(path) => DiffConfig::from_yaml_file(path)?,
            None => DiffConfig::default(),
        };

        if let Some(ignore) = &self.ignore {
            config.ignore.extend(split_list(ignore));
        }
        if let Some(except) = &self.except_categories {
            config.except_categories.extend(split_list(except));
        }
        if self.dedupe_required {
            config.dedupe_required_fields = true;
        }
        config.validate()?;

        let old_spec = Spec::from_file(&self.old_file, SpecRole::Old)?;
        let new_spec = Spec::from_file(&self.new_file, SpecRole::New)?;
        Ok((old_spec, new_spec, config))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Compare { specs, format } => {
            let (old_spec, new_spec, config) = specs.load()?;
            let diff = old_spec.diff_with_config(&new_spec, &config);

            match format {
                OutputFormat::Json => {
                    println!("{}", diff.to_json_pretty()?);
                }
                OutputFormat::Text => {
                    match old_spec.verdict(&new_spec, &diff) {
                        Compatibility::Green => println!("Green: No changes reported"),
                        Compatibility::Yellow => {
                            println!("Yellow: New specification is backward-compatible")
                        }
                        Compatibility::Red => println!("Red: Breaking changes detected"),
                    }

                    println!("Versions: {} -> {}", diff.old_version, diff.new_version);
                    for change in &diff.changes {
                        let icon = match change.kind {
                            openapi_drift::ChangeKind::Added => '+',
                            openapi_drift::ChangeKind::Removed => '-',
                            openapi_drift::ChangeKind::Modified => '~',
                        };
                        let flag = if change.is_breaking { " [BREAKING]" } else { "" };
                        match &change.method {
                            Some(method) if change.kind == openapi_drift::ChangeKind::Modified => {
                                println!(
                                    "  {icon} {method} {}: {}{flag}",
                                    change.path, change.description
                                )
                            }
                            _ => println!("  {icon} {}{flag}", change.description),
                        }
                    }
                    for breaking in &diff.breaking {
                        let severity = breaking
                            .category
                            .rule_kind()
                            .and_then(rules::find_rule)
                            .map_or(rules::Severity::Error, |rule| rule.severity);
                        println!();
                        println!(
                            "  [{} {}] {} ({severity})",
                            breaking.method, breaking.path, breaking.reason
                        );
                        println!("    Migration: {}", breaking.migration);
                    }

                    println!();
                    println!("Summary:");
                    println!("  Added endpoints:    {}", diff.summary.added_endpoints);
                    println!("  Removed endpoints:  {}", diff.summary.removed_endpoints);
                    println!("  Modified endpoints: {}", diff.summary.modified_endpoints);
                    println!("  Breaking changes:   {}", diff.summary.breaking_changes);
                }
            }

            if diff.has_breaking_changes() {
                std::process::exit(1);
            }
        }
        Commands::Changelog { specs } => {
            let (old_spec, new_spec, config) = specs.load()?;
            let diff = old_spec.diff_with_config(&new_spec, &config);
            print!("{}", generate_changelog(&diff));
        }
        Commands::Migrate { specs } => {
            let (old_spec, new_spec, config) = specs.load()?;
            let diff = old_spec.diff_with_config(&new_spec, &config);
            print!("{}", generate_migration_guide(&diff));
        }
        Commands::Fingerprint { file } => {
            let spec = Spec::from_file(&file, SpecRole::New)
                .with_context(|| format!("Failed to fingerprint '{}'", file.display()))?;
            println!("{}", spec.fingerprint);
        }
        Commands::Rules => {
            for rule in rules::default_rules() {
                println!(
                    "{:<22} {:<8} {}",
                    rule.kind.id(),
                    rule.severity.to_string(),
                    rule.description
                );
            }
        }
    }

    Ok(())
}
