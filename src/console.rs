use chrono::{DateTime, Local, TimeDelta};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    profile::Profile,
};

/// How long an entry stays on screen
pub const ENTRY_TTL_SECS: i64 = 11;

/// Only the newest entries are drawn
pub const VISIBLE_ENTRIES: usize = 3;

const COMMAND_NAMES: [&str; 7] = [
    "about",
    "exp",
    "projects",
    "skills",
    "social",
    "clear",
    "ask <question>",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    About,
    Experience,
    Projects,
    Skills,
    Social,
    Clear,
    Ask(String),
    Unknown(String),
}

impl Command {
    /// First token, lowercased, picks the command; the rest are its arguments
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args = parts.join(" ");

        match name.as_str() {
            "help" => Command::Help,
            "about" => Command::About,
            "exp" => Command::Experience,
            "projects" => Command::Projects,
            "skills" => Command::Skills,
            "social" => Command::Social,
            "clear" => Command::Clear,
            "ask" => Command::Ask(args),
            _ => Command::Unknown(name),
        }
    }
}

/// Portfolio section a command brought into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Section {
    About,
    Experience,
    Projects,
    Skills,
}

/// Remote question answering, e.g. a hosted language model
pub trait Assistant {
    fn answer(&self, question: &str, system_prompt: &str) -> Result<String>;
}

/// Used when no backend is wired up; every question fails politely
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssistant;

impl Assistant for OfflineAssistant {
    fn answer(&self, _question: &str, _system_prompt: &str) -> Result<String> {
        Err(Error::Assistant("no language model backend configured".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleEntry {
    pub cmd: String,
    pub response: String,
    pub at: DateTime<Local>,
}

/// The terminal-style command prompt with its short-lived log
pub struct Console<A: Assistant = OfflineAssistant> {
    profile: Profile,
    assistant: A,
    entries: Vec<ConsoleEntry>,
    focus: Option<Section>,
    line: String,
}

impl<A: Assistant> Console<A> {
    pub fn new(profile: Profile, assistant: A) -> Self {
        Self {
            profile,
            assistant,
            entries: Vec::new(),
            focus: None,
            line: String::new(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    pub fn visible_entries(&self) -> &[ConsoleEntry] {
        let skip = self.entries.len().saturating_sub(VISIBLE_ENTRIES);
        &self.entries[skip..]
    }

    pub fn focus(&self) -> Option<Section> {
        self.focus
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn push_char(&mut self, c: char) {
        self.line.push(c);
    }

    pub fn backspace(&mut self) {
        self.line.pop();
    }

    /// Submit the line being edited
    pub fn submit_line(&mut self, now: DateTime<Local>) {
        let raw = std::mem::take(&mut self.line);
        self.submit(&raw, now);
    }

    pub fn submit(&mut self, raw: &str, now: DateTime<Local>) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }

        let command = Command::parse(raw);
        debug!(?command, "console command");

        if command == Command::Clear {
            self.entries.clear();
            return;
        }

        let response = self.respond(command);
        self.entries.push(ConsoleEntry {
            cmd: raw.to_string(),
            response,
            at: now,
        });
    }

    fn respond(&mut self, command: Command) -> String {
        match command {
            Command::Help => format!("Available commands: {}", COMMAND_NAMES.iter().join(", ")),
            Command::About => {
                self.focus = Some(Section::About);
                "Navigating to About section...".to_string()
            }
            Command::Experience => {
                self.focus = Some(Section::Experience);
                "Navigating to Experience...".to_string()
            }
            Command::Projects => {
                self.focus = Some(Section::Projects);
                "Listing Projects...".to_string()
            }
            Command::Skills => {
                self.focus = Some(Section::Skills);
                "Loading skill matrix...".to_string()
            }
            Command::Social => format!(
                "Github: {} | LinkedIn: {}",
                self.profile.socials.github, self.profile.socials.linkedin
            ),
            Command::Ask(question) if question.is_empty() => {
                "Error: usage 'ask <question>'. Example: 'ask what is his gpa?'".to_string()
            }
            Command::Ask(question) => match self.ask(&question) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "assistant request failed");
                    format!("Error: {e}")
                }
            },
            Command::Unknown(name) => format!("Command not found: {name}. Type 'help'."),
            Command::Clear => String::new(),
        }
    }

    fn ask(&self, question: &str) -> Result<String> {
        let system_prompt = self.profile.system_prompt()?;
        self.assistant.answer(question, &system_prompt)
    }

    /// Drop entries that have outlived their time on screen
    pub fn prune(&mut self, now: DateTime<Local>) {
        let ttl = TimeDelta::seconds(ENTRY_TTL_SECS);
        self.entries.retain(|entry| now - entry.at < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    struct EchoAssistant;

    impl Assistant for EchoAssistant {
        fn answer(&self, question: &str, system_prompt: &str) -> Result<String> {
            assert!(system_prompt.contains("portfolio"));
            Ok(format!("echo: {question}"))
        }
    }

    fn console() -> Console<OfflineAssistant> {
        Console::new(Profile::embedded().unwrap(), OfflineAssistant)
    }

    fn last_response<A: Assistant>(console: &Console<A>) -> String {
        console
            .entries()
            .last()
            .map(|e| e.response.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("  HELP  "), Command::Help);
        assert_eq!(Command::parse("exp"), Command::Experience);
        assert_eq!(
            Command::parse("ask is he  good at web dev"),
            Command::Ask("is he good at web dev".to_string())
        );
        assert_eq!(Command::parse("ask"), Command::Ask(String::new()));
        assert_matches!(Command::parse("sudo rm"), Command::Unknown(name) if name == "sudo");
    }

    #[test]
    fn test_help_lists_commands() {
        let mut console = console();
        console.submit("help", Local::now());

        assert_eq!(
            last_response(&console),
            "Available commands: about, exp, projects, skills, social, clear, ask <question>"
        );
    }

    #[test]
    fn test_navigation_sets_focus() {
        let mut console = console();
        assert_eq!(console.focus(), None);

        console.submit("projects", Local::now());
        assert_eq!(console.focus(), Some(Section::Projects));
        assert_eq!(last_response(&console), "Listing Projects...");

        console.submit("skills", Local::now());
        assert_eq!(console.focus(), Some(Section::Skills));
    }

    #[test]
    fn test_social_uses_profile_links() {
        let mut console = console();
        console.submit("social", Local::now());

        let response = last_response(&console);
        assert!(response.contains(&console.profile().socials.github));
        assert!(response.contains(&console.profile().socials.linkedin));
    }

    #[test]
    fn test_unknown_command() {
        let mut console = console();
        console.submit("Dance now", Local::now());

        assert_eq!(last_response(&console), "Command not found: dance. Type 'help'.");
        assert_eq!(console.entries()[0].cmd, "Dance now");
    }

    #[test]
    fn test_ask_without_question() {
        let mut console = console();
        console.submit("ask", Local::now());

        assert!(last_response(&console).starts_with("Error: usage 'ask <question>'"));
    }

    #[test]
    fn test_ask_offline_reports_error() {
        let mut console = console();
        console.submit("ask what is his gpa?", Local::now());

        assert_eq!(
            last_response(&console),
            "Error: assistant unavailable: no language model backend configured"
        );
    }

    #[test]
    fn test_ask_forwards_question() {
        let mut console = Console::new(Profile::embedded().unwrap(), EchoAssistant);
        console.submit("ask what is his gpa?", Local::now());

        assert_eq!(last_response(&console), "echo: what is his gpa?");
    }

    #[test]
    fn test_clear_empties_log() {
        let mut console = console();
        console.submit("help", Local::now());
        console.submit("social", Local::now());
        console.submit("clear", Local::now());

        assert!(console.entries().is_empty());
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut console = console();
        console.submit("   ", Local::now());

        assert!(console.entries().is_empty());
    }

    #[test]
    fn test_prune_expires_old_entries() {
        let mut console = console();
        let start = Local::now();
        console.submit("help", start);
        console.submit("social", start + TimeDelta::seconds(5));

        console.prune(start + TimeDelta::seconds(10));
        assert_eq!(console.entries().len(), 2);

        console.prune(start + TimeDelta::seconds(12));
        assert_eq!(console.entries().len(), 1);
        assert_eq!(console.entries()[0].cmd, "social");
    }

    #[test]
    fn test_visible_entries_keeps_newest() {
        let mut console = console();
        for cmd in ["help", "about", "exp", "skills", "social"] {
            console.submit(cmd, Local::now());
        }

        let visible: Vec<&str> = console
            .visible_entries()
            .iter()
            .map(|e| e.cmd.as_str())
            .collect();
        assert_eq!(visible, vec!["exp", "skills", "social"]);
    }

    #[test]
    fn test_line_editing_and_submit() {
        let mut console = console();
        for c in "helpx".chars() {
            console.push_char(c);
        }
        console.backspace();
        assert_eq!(console.line(), "help");

        console.submit_line(Local::now());
        assert_eq!(console.line(), "");
        assert_eq!(console.entries().len(), 1);
    }
}
