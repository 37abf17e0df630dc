//! rconsole - an interactive console for RCON servers.
//!
//! Connects to a remote server, forwards typed commands, and renders the
//! legacy `§` color codes in responses as terminal escape sequences.

mod config;
mod console;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use crossterm::style::{Attribute, Color, Stylize};
use session::Session;
use std::process::Command as ProcessCommand;
use tracing_subscriber::EnvFilter;

const GOLD: Color = Color::Rgb { r: 255, g: 200, b: 0 };
const GREEN: Color = Color::Rgb { r: 0, g: 225, b: 31 };
const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };

#[derive(Parser)]
#[command(name = "rconsole")]
#[command(author, version, about = "An interactive console for RCON servers")]
#[command(long_about = "Connects to an RCON server and forwards typed commands.\n\nResponses using the legacy \u{a7}-code markup are rendered with terminal colors.")]
struct Cli {
    /// Server address (falls back to the config file)
    #[arg(value_name = "HOST")]
    host: Option<String>,

    /// Server RCON port (falls back to the config file)
    #[arg(value_name = "PORT")]
    port: Option<u16>,

    /// Password (falls back to $RCONSOLE_PASSWORD, then the config file)
    #[arg(value_name = "PASSWORD")]
    password: Option<String>,

    /// When to translate markup to terminal colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open configuration file in $EDITOR
    Config,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset
    Auto,
    /// Always emit escape sequences
    Always,
    /// Strip markup instead of rendering it
    Never,
}

impl ColorMode {
    /// Resolve against the config toggle, NO_COLOR and tty detection.
    fn enabled(self, config: &Config) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                config.output.color
                    && std::env::var_os("NO_COLOR").is_none()
                    && atty::is(atty::Stream::Stdout)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rconsole=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config) => handle_config(),
        None => run_console(cli).await,
    }
}

/// Connect, print the banner, run the interactive loop, disconnect.
async fn run_console(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let color = cli.color.enabled(&config);

    let host = cli.host.unwrap_or_else(|| config.connection.host.clone());
    let port = cli.port.unwrap_or(config.connection.port);
    let password = resolve_password(
        cli.password,
        std::env::var("RCONSOLE_PASSWORD").ok(),
        &config,
    )?;

    let mut session = match Session::connect(&host, port, &password).await {
        Ok(session) => session,
        Err(error) => {
            error_line(&format!("{:#}", error), color);
            std::process::exit(1);
        }
    };

    banner(color);
    status_line(
        &format!("Connection to server {} on port {} succeeded.", host, port),
        color,
    );
    disconnect_hint(color);

    console::run(&mut session, color).await?;

    // Dropping the session closes the socket.
    drop(session);
    status_line("Connection closed.", color);

    Ok(())
}

/// Pick the password from the CLI argument, the environment, or the
/// config file, in that order.
fn resolve_password(
    cli: Option<String>,
    env: Option<String>,
    config: &Config,
) -> Result<String> {
    if let Some(password) = cli {
        return Ok(password);
    }
    if let Some(password) = env.filter(|p| !p.is_empty()) {
        return Ok(password);
    }
    if let Some(password) = &config.connection.password {
        return Ok(password.clone());
    }
    anyhow::bail!(
        "No password given. Pass it as the third argument, set RCONSOLE_PASSWORD, or add it to {}",
        Config::config_path()?.display()
    )
}

fn banner(color: bool) {
    let line = format!("rconsole {}", env!("CARGO_PKG_VERSION"));
    if color {
        println!("{}", line.with(GOLD).attribute(Attribute::Underlined));
    } else {
        println!("{}", line);
    }
}

fn status_line(message: &str, color: bool) {
    if color {
        println!("{}", message.with(GREEN));
    } else {
        println!("{}", message);
    }
}

fn disconnect_hint(color: bool) {
    if color {
        println!(
            "{}{}",
            "Disconnect command: ".with(GREEN),
            console::DISCONNECT_COMMAND
                .with(GREEN)
                .attribute(Attribute::Italic)
        );
    } else {
        println!("Disconnect command: {}", console::DISCONNECT_COMMAND);
    }
}

fn error_line(message: &str, color: bool) {
    if color {
        eprintln!("{}", message.with(RED));
    } else {
        eprintln!("{}", message);
    }
}

/// Handle the config subcommand.
fn handle_config() -> Result<()> {
    let config_path = Config::config_path()?;

    // Create default config if it doesn't exist
    if !config_path.exists() {
        Config::default().save()?;
        println!("Created default config at {}", config_path.display());
    }

    // Open in editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = ProcessCommand::new(&editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        eprintln!("Editor exited with non-zero status");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_overrides() {
        let config = Config::default();
        assert!(ColorMode::Always.enabled(&config));
        assert!(!ColorMode::Never.enabled(&config));
    }

    #[test]
    fn test_password_cli_wins() {
        let mut config = Config::default();
        config.connection.password = Some("from-config".to_string());
        let password = resolve_password(
            Some("from-cli".to_string()),
            Some("from-env".to_string()),
            &config,
        )
        .unwrap();
        assert_eq!(password, "from-cli");
    }

    #[test]
    fn test_password_env_beats_config() {
        let mut config = Config::default();
        config.connection.password = Some("from-config".to_string());
        let password = resolve_password(None, Some("from-env".to_string()), &config).unwrap();
        assert_eq!(password, "from-env");
    }

    #[test]
    fn test_password_empty_env_is_ignored() {
        let mut config = Config::default();
        config.connection.password = Some("from-config".to_string());
        let password = resolve_password(None, Some(String::new()), &config).unwrap();
        assert_eq!(password, "from-config");
    }

    #[test]
    fn test_password_missing_everywhere_is_an_error() {
        let config = Config::default();
        assert!(resolve_password(None, None, &config).is_err());
    }
}
