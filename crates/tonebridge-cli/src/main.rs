//! Tonebridge CLI - MBTI-aware message tone conversion
//!
//! Rewrites a message in a requested tone, tailored to the receiver's MBTI type.

mod config;
mod provider;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use tracing_subscriber::EnvFilter;

use tonebridge::{build_prompt, receiver_traits, LlmMessageConverter, MessageConverter, Mbti};

use config::{mask_secret, Config, ProviderKind};
use provider::{build_provider, env_var_for};

#[derive(Parser)]
#[command(name = "tonebridge")]
#[command(about = "Tonebridge CLI - Rewrite messages for the receiver's MBTI", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a message into a tone suited to the receiver
    Convert {
        /// Original message
        message: String,
        /// Sender MBTI (e.g., ESTJ)
        #[arg(long = "from")]
        sender: Mbti,
        /// Receiver MBTI (e.g., INFP)
        #[arg(long = "to")]
        receiver: Mbti,
        /// Target tone (defaults to config's default_tone)
        #[arg(short, long)]
        tone: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent, without calling any provider
    Prompt {
        /// Original message
        message: String,
        /// Sender MBTI
        #[arg(long = "from")]
        sender: Mbti,
        /// Receiver MBTI
        #[arg(long = "to")]
        receiver: Mbti,
        /// Target tone
        #[arg(short, long)]
        tone: Option<String>,
    },

    /// Show the communication traits for an MBTI type
    Traits {
        /// MBTI code
        mbti: Mbti,
    },

    /// List all sixteen MBTI types
    Types,

    /// Store an API key
    Login {
        /// Provider: openai, gemini
        #[arg(short, long, default_value = "openai")]
        provider: ProviderKind,
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            message,
            sender,
            receiver,
            tone,
            json,
        } => cmd_convert(message, sender, receiver, tone, json).await,
        Commands::Prompt {
            message,
            sender,
            receiver,
            tone,
        } => cmd_prompt(message, sender, receiver, tone),
        Commands::Traits { mbti } => cmd_traits(mbti),
        Commands::Types => cmd_types(),
        Commands::Login { provider, key } => cmd_login(provider, key),
        Commands::Config => cmd_config(),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_convert(
    message: String,
    sender: Mbti,
    receiver: Mbti,
    tone: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let tone = tone.unwrap_or_else(|| config.default_tone.clone());

    let provider = build_provider(&config)?;
    let converter = LlmMessageConverter::new(provider);

    let result = converter
        .convert(&message, &sender, &receiver, &tone)
        .await
        .context("Conversion failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} → {} ({})",
        "Converted".green().bold(),
        sender.to_string().cyan(),
        receiver.to_string().cyan(),
        result.tone.yellow()
    );
    println!();
    println!("{}", result.content);
    println!();
    println!("{}", "Why it works:".bold());
    println!("{}", result.explanation.dimmed());

    Ok(())
}

fn cmd_prompt(message: String, sender: Mbti, receiver: Mbti, tone: Option<String>) -> Result<()> {
    let tone = match tone {
        Some(t) => t,
        None => Config::load_file()?.default_tone,
    };

    println!("{}", build_prompt(&message, &sender, &receiver, &tone));
    Ok(())
}

fn cmd_traits(mbti: Mbti) -> Result<()> {
    println!("{}", mbti.to_string().cyan().bold());
    println!("{}", receiver_traits(&mbti));
    Ok(())
}

fn cmd_types() -> Result<()> {
    let codes: Vec<String> = Mbti::all().iter().map(Mbti::code).collect();
    for row in codes.chunks(4) {
        println!("{}", row.join("  "));
    }
    Ok(())
}

fn cmd_login(provider: ProviderKind, key: Option<String>) -> Result<()> {
    let mut config = Config::load_file()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt(format!("{} API Key", provider))
            .interact()
            .context("Failed to read API key")?,
    };

    if api_key.trim().is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    config.set_api_key(provider, api_key.trim().to_string());
    config.provider = provider;
    config.save()?;

    println!(
        "{} {} API key saved to {:?}",
        "✓".green(),
        provider,
        Config::config_path()?
    );

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Tonebridge Configuration".bold());
    println!("  Config file:  {:?}", Config::config_path()?);
    println!("  Provider:     {}", config.provider.to_string().cyan());
    println!(
        "  Model:        {}",
        config.model.as_deref().unwrap_or("(provider default)")
    );
    if let Some(base_url) = &config.base_url {
        println!("  Base URL:     {}", base_url);
    }
    if let Some(timeout) = config.timeout_secs {
        println!("  Timeout:      {}s", timeout);
    }
    println!("  Default tone: {}", config.default_tone);

    for kind in [ProviderKind::OpenAI, ProviderKind::Gemini] {
        let key = match kind {
            ProviderKind::OpenAI => config.openai_api_key.as_deref(),
            ProviderKind::Gemini => config.gemini_api_key.as_deref(),
        };
        match key {
            Some(k) => println!("  {:<13} {}", format!("{} key:", kind), mask_secret(k).green()),
            None => println!(
                "  {:<13} {} (set {})",
                format!("{} key:", kind),
                "not set".red(),
                env_var_for(kind)
            ),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_args_parse_mbti() {
        let cli = Cli::try_parse_from([
            "tonebridge",
            "convert",
            "Can you send the report today?",
            "--from",
            "estj",
            "--to",
            "INFP",
            "--tone",
            "formal",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert {
                message,
                sender,
                receiver,
                tone,
                json,
            } => {
                assert_eq!(message, "Can you send the report today?");
                assert_eq!(sender.code(), "ESTJ");
                assert_eq!(receiver.code(), "INFP");
                assert_eq!(tone.as_deref(), Some("formal"));
                assert!(!json);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_invalid_mbti_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["tonebridge", "traits", "XXXX"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_provider_parses() {
        let cli = Cli::try_parse_from(["tonebridge", "-v", "login", "--provider", "gemini"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(
            cli.command,
            Commands::Login {
                provider: ProviderKind::Gemini,
                key: None
            }
        ));
    }
}
