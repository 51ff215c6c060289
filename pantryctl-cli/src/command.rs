//! Commands accepted at the `Enter a command:` prompt

use std::fmt;

/// One decoded line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    View,
    Sort,
    Update,
    Delete,
    Lookup,
    Exit,
    /// Anything else, kept as typed (after trimming)
    Unknown(String),
}

impl Command {
    /// Keywords in the order they are advertised
    pub const KEYWORDS: [&'static str; 7] =
        ["add", "view", "sort", "update", "delete", "lookup", "exit"];

    /// Decode a line; keywords are case-insensitive and surrounding
    /// whitespace is ignored.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "add" => Command::Add,
            "view" => Command::View,
            "sort" => Command::Sort,
            "update" => Command::Update,
            "delete" => Command::Delete,
            "lookup" => Command::Lookup,
            "exit" => Command::Exit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }

    /// `Available commands: ...` line shown before every prompt
    pub fn help_line() -> String {
        format!("Available commands: {}", Self::KEYWORDS.join(", "))
    }
}

impl From<&str> for Command {
    fn from(input: &str) -> Self {
        Command::parse(input)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Command::Add => "add",
            Command::View => "view",
            Command::Sort => "sort",
            Command::Update => "update",
            Command::Delete => "delete",
            Command::Lookup => "lookup",
            Command::Exit => "exit",
            Command::Unknown(raw) => raw.as_str(),
        };
        f.write_str(keyword)
    }
}
