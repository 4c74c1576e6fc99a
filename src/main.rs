use clap::{Parser, Subcommand};
use colored::*;
use llamacodeanalysis::{
    analysis::{self, AnalysisState, BackendClient, GitHubClient},
    chat::{self, ChatState, CompletionClient},
    cli, logging, server,
    error::Result,
    Config,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chat interactively with the completion endpoint
    Chat,
    /// Analyze a GitHub repository
    Analyze {
        /// Repository URL, e.g. https://github.com/rust-lang/rust
        url: String,

        /// Delegate to the backend analysis endpoint instead of calling
        /// the GitHub API directly
        #[arg(long)]
        remote: bool,
    },
    /// Run the backend analysis service
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let level = logging::verbosity_to_level(args.verbose);
    logging::init(level.as_str())?;

    let config = Config::load()?;
    config.validate()?;

    match args.command {
        Command::Chat => run_chat(&config).await,
        Command::Analyze { url, remote } => run_analyze(&config, &url, remote).await,
        Command::Serve => server::run(config).await,
    }
}

/// Interactive chat loop against the configured completion endpoint
async fn run_chat(config: &Config) -> Result<()> {
    cli::print_banner();
    println!(
        "{}",
        "Ask me anything. Enter 'q' to quit.".bright_blue()
    );

    let client = CompletionClient::from_config(config)?;
    let mut state = ChatState::new();

    loop {
        let input = cli::prompt_chat_input()?;
        if input.trim() == "q" || input.trim() == "exit" {
            break;
        }

        let already_shown = state.messages.len();
        chat::submit(&mut state, &client, &input).await?;

        for message in &state.messages[already_shown..] {
            cli::print_message(message);
        }
        if let Some(error) = &state.error {
            cli::print_error(error);
        }
    }

    Ok(())
}

/// One analysis invocation, direct or delegated
async fn run_analyze(config: &Config, url: &str, remote: bool) -> Result<()> {
    let mut state = AnalysisState::new();
    let spinner = cli::spinner("Analyzing repository...");

    if remote {
        let client = BackendClient::from_config(config)?;
        analysis::analyze_remote(&mut state, &client, url).await?;
    } else {
        let client = GitHubClient::from_config(config)?;
        analysis::analyze(&mut state, &client, url).await?;
    }

    spinner.finish_and_clear();
    cli::render_analysis(&state);

    Ok(())
}
