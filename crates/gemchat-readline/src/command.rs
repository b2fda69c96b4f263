/// Slash commands and their one-line descriptions.
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/clear", "clear the conversation"),
    ("/help", "show this help"),
    ("/history", "show the whole conversation"),
    ("/info", "show model and session details"),
];

/// Description of an exact slash command, if it is one.
pub fn describe(command: &str) -> Option<&'static str> {
    SLASH_COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, description)| *description)
}

/// What one line of REPL input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text to send to the model.
    Message(String),
    Clear,
    History,
    Info,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => Command::Empty,
            "quit" | "exit" | "/quit" | "/exit" => Command::Quit,
            "/clear" => Command::Clear,
            "/history" => Command::History,
            "/info" => Command::Info,
            "/help" => Command::Help,
            other if other.starts_with('/') => Command::Unknown(other.to_string()),
            other => Command::Message(other.to_string()),
        }
    }
}
