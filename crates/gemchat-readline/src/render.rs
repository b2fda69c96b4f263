//! Terminal rendering of turns and session info.

use std::fmt::Write;

use colored::{ColoredString, Colorize};
use gemchat_core::config::{ClientConfig, GenerationConfig};
use gemchat_core::session::{ChatSession, Turn, TurnRole};

use crate::command::SLASH_COMMANDS;

pub fn format_turn(turn: &Turn) -> String {
    let style: fn(&str) -> ColoredString = match turn.role {
        TurnRole::User => |line| line.green(),
        TurnRole::Assistant if turn.is_error() => |line| line.red(),
        TurnRole::Assistant => |line| line.bright_blue(),
    };
    let prefix = if turn.role == TurnRole::User { "> " } else { "" };

    // Writing into a String cannot fail.
    let mut out = String::new();
    for line in turn.content.lines() {
        let _ = writeln!(out, "{}{}", style(prefix), style(line));
    }
    let _ = write!(out, "{} {}", "🕐".bright_black(), turn.timestamp.bright_black());
    out
}

pub fn format_history(session: &ChatSession) -> String {
    if session.transcript.is_empty() {
        return "(no messages yet)".bright_black().to_string();
    }
    session
        .transcript
        .iter()
        .map(format_turn)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_info(session: &ChatSession, config: &ClientConfig) -> String {
    let generation = GenerationConfig::FIXED;
    [
        format!("{} {}", "Model:".bold(), config.model),
        format!("{} {}", "Endpoint:".bold(), config.endpoint()),
        format!("{} {}s", "Timeout:".bold(), config.timeout_secs),
        format!(
            "{} temperature={} topP={} topK={} maxOutputTokens={}",
            "Generation:".bold(),
            generation.temperature,
            generation.top_p,
            generation.top_k,
            generation.max_output_tokens
        ),
        format!("{} {}", "Turns:".bold(), session.transcript.len()),
        format!("{} {}", "Session:".bold(), session.id),
    ]
    .join("\n")
}

pub fn help_text() -> String {
    let mut lines = vec!["Type a message and press Enter to send it.".to_string()];
    lines.extend(
        SLASH_COMMANDS
            .iter()
            .map(|(name, description)| format!("  {name:<10}{description}")),
    );
    lines.push(format!("  {:<10}exit (or Ctrl-D)", "quit"));
    lines.join("\n")
}
