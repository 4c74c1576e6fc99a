use crate::analysis::{AnalysisEntry, AnalysisState};
use crate::chat::{ChatMessage, ChatRole};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::error::AnalysisError;

/// Prints a colorful banner at the start of the CLI.
pub fn print_banner() {
    let banner = format!(
        "{}\n{}\n{}",
        "  _    _                     _____          _      ".blue(),
        " | |  | |__ _ _ __  __ _    / ____|___   __| |___   LlamaSearch".bold().green(),
        " |_|__|_,__,_|_|_|_|__,_|   \\____/\\___/\\__,_\\___|   Code Analysis".bold().green(),
    );
    println!("{}", banner);
}

/// Prompts the user for chat input; empty submissions are allowed.
pub fn prompt_chat_input() -> Result<String, AnalysisError> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("You")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AnalysisError::new(&e.to_string()))
}

/// Creates a spinner shown while a network sequence is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a single transcript message with a role-colored prefix.
pub fn print_message(message: &ChatMessage) {
    match message.role {
        ChatRole::User => println!("{} {}", "You:".bold().green(), message.content),
        ChatRole::Assistant => println!("{} {}", "Assistant:".bold().cyan(), message.content),
    }
}

/// (Optional) Helper to print an info message.
pub fn print_info(message: &str) {
    println!("{}", message.green());
}

/// (Optional) Helper to print an error message.
pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

/// Renders the outcome of one analysis invocation.
pub fn render_analysis(state: &AnalysisState) {
    if let Some(error) = &state.error {
        print_error(error);
    }

    if !state.analysis_results.is_empty() {
        println!("\n{}", "Analysis Results".bold().yellow());
        for entry in &state.analysis_results {
            match entry {
                AnalysisEntry::Summary(summary) => {
                    println!(
                        "{}: {}",
                        summary.full_name.bold(),
                        summary.description.as_deref().unwrap_or("")
                    );
                    println!("  {} {}", "Stars:".bold(), summary.stargazers_count);
                    println!("  {} {}", "Forks:".bold(), summary.forks_count);
                    println!("  {} {}", "Open Issues:".bold(), summary.open_issues_count);
                    println!(
                        "  {} {}",
                        "Primary Language:".bold(),
                        summary.language.as_deref().unwrap_or("Unknown")
                    );
                    println!("  {} {}", "Owner:".bold(), summary.owner.login);
                    println!(
                        "  {} {}",
                        "Created At:".bold(),
                        summary.created_at.format("%Y-%m-%d")
                    );
                    println!(
                        "  {} {}",
                        "Last Updated:".bold(),
                        summary.updated_at.format("%Y-%m-%d")
                    );
                }
                AnalysisEntry::Text(block) => println!("{}\n", block),
            }
        }
    }

    if !state.readme_content.is_empty() {
        println!("\n{}", "README".bold().yellow());
        println!("{}", state.readme_content);
    }

    if !state.open_issues.is_empty() {
        println!("\n{}", "Open Issues".bold().yellow());
        for issue in &state.open_issues {
            println!(
                "{} by {}",
                issue.title.bold(),
                issue.user.login.bright_white()
            );
            if let Some(body) = &issue.body {
                println!("  {}", body);
            }
        }
    }
}
