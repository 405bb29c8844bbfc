//! Nutrichat CLI
//!
//! Command-line client for the nutrition backend:
//! - Submit a profile
//! - Ask a single question
//! - Chat interactively
//! - Generate a default config file

use clap::{Parser, Subcommand};
use colored::Colorize;
use copypasta::{ClipboardContext, ClipboardProvider};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nutrichat::config::{generate_default_config, write_default_config, LoggingConfig};
use nutrichat::conversation::{ConversationState, COPIED, DISCLAIMER};
use nutrichat::terminal::render_message;
use nutrichat::{ChatError, Config, Controller, Gender, Goal, HttpBackend, LogFormat, ProfileForm};

#[derive(Parser)]
#[command(name = "nutrichat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Nutrition assistant client")]
#[command(long_about = "Nutrichat talks to the nutrition backend.\nSave your profile, then ask for meal plans, recipes and nutritional content.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/nutrichat/config.toml, then ./nutrichat.toml)
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Backend base URL, overrides config and NUTRICHAT_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save your profile
    Profile {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        age: u32,
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Height, e.g. "180 cm"
        #[arg(long)]
        height: String,
        #[arg(long, value_enum)]
        gender: Gender,
        #[arg(long, value_enum)]
        goal: Goal,
        /// e.g. vegetarian
        #[arg(long, default_value = "")]
        preferences: String,
        #[arg(long, default_value = "")]
        restrictions: String,
    },

    /// Ask one question and print the reply
    Ask {
        #[arg(long)]
        user_id: String,
        /// The question
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Chat interactively
    Chat {
        #[arg(long)]
        user_id: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config_file {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&loaded.config.logging);
    loaded.report();

    let mut config = loaded.config;
    if let Some(url) = cli.api_url {
        config.backend.url = url;
    }

    let backend = HttpBackend::new(config.backend.http())?;
    tracing::debug!(base_url = backend.base_url(), "Using backend");
    let mut controller = Controller::new(backend);

    match cli.command {
        Commands::Profile {
            user_id,
            age,
            weight,
            height,
            gender,
            goal,
            preferences,
            restrictions,
        } => {
            *controller.state_mut().form_mut() = ProfileForm {
                user_id,
                age,
                weight,
                height,
                gender: Some(gender),
                preferences,
                restrictions,
                goal: Some(goal),
            };

            if let Err(e) = controller.submit_profile().await {
                fail(controller.state(), &e);
            }
            if let Some(ack) = controller.state().transcript().last() {
                println!("{}", render_message(ack));
            }
        }

        Commands::Ask { user_id, query } => {
            controller.state_mut().form_mut().user_id = user_id;

            let outcome = controller
                .send_query(&query.join(" "))
                .await
                .map(|reply| reply.map(render_message));
            match outcome {
                Ok(Some(text)) => println!("{}", text),
                Ok(None) => eprintln!("Nothing to ask."),
                Err(e) => fail(controller.state(), &e),
            }
        }

        Commands::Chat { user_id } => {
            controller.state_mut().form_mut().user_id = user_id;
            run_repl(&mut controller).await?;
        }

        Commands::Config { output } => {
            match output {
                Some(path) => {
                    write_default_config(&path)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", generate_default_config()),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("nutrichat={}", config.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so replies on stdout stay clean
    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run_repl(controller: &mut Controller<HttpBackend>) -> anyhow::Result<()> {
    println!("{}", "How can I assist you?".bold());
    println!(
        "{}",
        "Type a question. /copy copies the last reply, /retry resends a failed question, /quit exits."
            .dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = line.trim().to_owned();
        match command.as_str() {
            "/quit" | "/exit" => break,
            "/copy" => copy_last_reply(controller.state()),
            "/retry" => ask_draft(controller).await,
            _ => {
                controller.state_mut().set_draft(line);
                ask_draft(controller).await;
            }
        }
    }

    println!("{}", DISCLAIMER.dimmed());
    Ok(())
}

async fn ask_draft(controller: &mut Controller<HttpBackend>) {
    let outcome = controller
        .send_draft()
        .await
        .map(|reply| reply.map(render_message));

    match outcome {
        Ok(Some(text)) => println!("{}\n", text),
        Ok(None) => {}
        Err(e) => {
            report(controller.state(), &e);
            if e.is_network() {
                eprintln!("{}", "Type /retry to send it again.".dimmed());
            }
        }
    }
}

fn copy_last_reply(state: &ConversationState) {
    let Some(reply) = state.transcript().last_assistant() else {
        eprintln!("Nothing to copy yet.");
        return;
    };
    match copy_to_clipboard(reply.content()) {
        Ok(()) => println!("{}", COPIED.green()),
        Err(e) => {
            tracing::error!(error = %e, "Clipboard write failed");
            eprintln!("{}", format!("Could not copy: {}", e).red());
        }
    }
}

fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = ClipboardContext::new()
        .map_err(|e| anyhow::anyhow!("clipboard unavailable: {}", e))?;
    clipboard
        .set_contents(text.to_owned())
        .map_err(|e| anyhow::anyhow!("clipboard write failed: {}", e))
}

/// Print the user-visible error line
fn report(state: &ConversationState, error: &ChatError) {
    let message = state
        .error()
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    eprintln!("{}", message.red());
}

fn fail(state: &ConversationState, error: &ChatError) -> ! {
    report(state, error);
    std::process::exit(1);
}
