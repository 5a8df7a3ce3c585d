use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use ags_core::cfn::Template;
use ags_core::config::{self, DEFAULT_CONFIG_FILE};
use ags_core::synth::AuthorizationType;
use ags_core::{synthesize, synthesize_dns};

#[derive(Parser)]
#[command(
    name = "ags",
    about = "CloudFormation synthesis for API Gateway ingress stacks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the gateway template from a config file
    Synth {
        /// Path to the config file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the template here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Synthesize the Route53 alias template for a custom domain
    Dns {
        /// Path to the DNS config file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Write the template here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Check a config file and summarize what it would synthesize
    Validate {
        /// Path to the config file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            config,
            output,
            format,
        } => cmd_synth(config, output.as_deref(), format),

        Commands::Dns {
            config,
            output,
            format,
        } => cmd_dns(&config, output.as_deref(), format),

        Commands::Validate { config } => cmd_validate(&config),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "ags", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn cmd_synth(path: Option<PathBuf>, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let cfg = config::load_config(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let template = synthesize(&cfg);
    log::debug!(
        "synthesized {} resources, {} outputs",
        template.resources.len(),
        template.outputs.len()
    );

    emit(&template, output, format)
}

fn cmd_dns(path: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let cfg = config::load_dns_config(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let template = synthesize_dns(&cfg);
    emit(&template, output, format)
}

fn emit(template: &Template, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(template)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml_ng::to_string(template)?,
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    let cfg = config::load_config(path)
        .with_context(|| format!("failed to load {}", path.display()))?
        .with_defaults();

    eprintln!("Valid gateway config: {}", path.display());
    eprintln!("  API slots: {}", cfg.api_count());
    eprintln!("  Stage: {}", cfg.stage_name);
    if cfg.api_resources.is_empty() {
        eprintln!("  Routing: wildcard proxy ({} paths)", cfg.paths.len());
    } else {
        eprintln!(
            "  Routing: explicit resources ({} records)",
            cfg.api_resources.len()
        );
    }
    eprintln!(
        "  Authorization: {}",
        AuthorizationType::derive(&cfg.arns).as_str()
    );

    let mut features = Vec::new();
    if cfg.custom_domain().is_some() {
        features.push("custom-domain");
    }
    if cfg.waf_enabled {
        features.push("waf");
    }
    if cfg.caching_enabled {
        features.push("caching");
    }
    if !cfg.usage_plans.is_empty() || cfg.api_definitions.iter().any(|d| !d.usage_plans.is_empty())
    {
        features.push("usage-plans");
    }
    if cfg.minimum_compression_size > 0 {
        features.push("compression");
    }
    if features.is_empty() {
        eprintln!("  Features: none");
    } else {
        eprintln!("  Features: {}", features.join(", "));
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::starter_config())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
