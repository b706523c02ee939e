//! gradr CLI - review a candidate's repository against an assignment
//!
//! Walks the repository's file tree on GitHub and asks a chat-completion
//! model for a structured verdict, from the terminal or over HTTP.

mod commands;
mod pipeline;
mod server;

use clap::{Parser, Subcommand};
use gradr_core::{Config, ConfigOverrides, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ReviewArgs, ServeArgs};

/// gradr: structured code reviews of assignment repositories
#[derive(Parser, Debug)]
#[command(name = "gradr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "GRADR_MODEL")]
    model: Option<String>,

    /// GitHub REST API base URL (overrides config and env)
    #[arg(long, global = true, env = "GRADR_GITHUB_API_URL")]
    github_api_url: Option<String>,

    /// Chat-completion API base URL (overrides config and env)
    #[arg(long, global = true, env = "GRADR_COMPLETION_API_URL")]
    completion_api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Review a repository
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Serve the HTTP review endpoint
    Serve(ServeArgs),

    /// Show current configuration
    Config,

    /// Create a secrets file template
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::load_with_overrides(ConfigOverrides {
        github_api_url: cli.github_api_url.clone(),
        completion_api_url: cli.completion_api_url.clone(),
        model: cli.model.clone(),
        bind: None,
    })?;

    if cli.verbose {
        tracing::info!(
            github_api = %config.github.api_url,
            completion_api = %config.completion.api_url,
            model = %config.completion.model,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("gradr {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Review(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Serve(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("gradr Configuration");
            println!("===================");
            println!();
            println!("GitHub:");
            println!("  api_url: {}", config.github.api_url);
            println!("  timeout: {:?}", config.github.timeout);
            println!("  user_agent: {}", config.github.user_agent);
            println!();
            println!("Completion:");
            println!("  api_url: {}", config.completion.api_url);
            println!("  model: {}", config.completion.model);
            println!("  timeout: {:?}", config.completion.timeout);
            println!();
            println!("Server:");
            println!("  bind: {}", config.server.bind);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        Some(Commands::Init) => {
            let path = Secrets::create_template()?;
            println!("Created secrets template at {}", path.display());
            println!("Add your GitHub token and OpenAI API key, then run `gradr review`.");
        }
        None => {
            println!("gradr - structured code reviews of assignment repositories");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
