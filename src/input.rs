//! Interpretation of one line typed at the prompt.
//!
//! | Line        | Meaning |
//! |-------------|---------|
//! | empty       | show the answer |
//! | `?`         | list menu items |
//! | `:name`     | switch to a menu item |
//! | `>args`     | re-parse `args` as a full command line |
//! | anything else | a guess |
//!
//! Guesses support two editing conveniences. Everything up to the last
//! period is dropped, so `12.14` means `14` and `14.` means `14`. A trailing
//! comma reverses the digits, so `41,` means `14`: digits can be typed in the
//! order they are worked out.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reveal the answer without guessing.
    Reveal,
    Guess(String),
    ListMenu,
    MenuItem(String),
    Reconfigure(String),
}

/// Keep the last period-separated piece; a trailing period keeps the piece before it.
fn after_last_period(text: &str) -> &str {
    let pieces: Vec<&str> = text.split('.').collect();
    match pieces.as_slice() {
        [.., before, ""] => *before,
        [.., last] => *last,
        [] => text,
    }
}

/// Keep the text after the last comma, or the text before a trailing comma reversed.
fn apply_reversal(text: &str) -> String {
    let pieces: Vec<&str> = text.split(',').collect();
    match pieces.as_slice() {
        [.., before, ""] => before.chars().rev().collect(),
        [.., last] => (*last).to_string(),
        [] => text.to_string(),
    }
}

/// Normalise a guess: retry trimming, reversal, whitespace and case.
pub fn normalize_guess(text: &str) -> String {
    apply_reversal(after_last_period(text)).trim().to_lowercase()
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Reveal;
    }
    if line == "?" {
        return Command::ListMenu;
    }
    if let Some(name) = line.strip_prefix(':') {
        return Command::MenuItem(name.trim().to_string());
    }
    if let Some(args) = line.strip_prefix('>') {
        return Command::Reconfigure(args.trim().to_string());
    }
    Command::Guess(normalize_guess(line))
}
