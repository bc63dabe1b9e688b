//! Parsing of typed input
//!
//! Everything the user types goes through here and comes back as a
//! `Result`, so a stray letter never takes the session down.

use thiserror::Error;

use roster_core::{ParseRollNumberError, RollNumber};

/// Why a line of input was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error(transparent)]
    RollNumber(#[from] ParseRollNumberError),
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Edit,
    Search,
    List,
    Exit,
}

impl MenuChoice {
    /// Map a menu number to its entry; `None` for numbers not on the menu
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::Add),
            2 => Some(MenuChoice::Edit),
            3 => Some(MenuChoice::Search),
            4 => Some(MenuChoice::List),
            5 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Parse a menu line as an integer
pub fn parse_menu_number(line: &str) -> Result<i32, InputError> {
    let trimmed = line.trim();
    trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// Parse a roll number line
pub fn parse_roll_number(line: &str) -> Result<RollNumber, InputError> {
    Ok(line.parse::<RollNumber>()?)
}

/// Trimmed value, or `None` when the line is blank
pub fn non_blank(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_from_number() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::from_number(5), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(6), None);
        assert_eq!(MenuChoice::from_number(-1), None);
    }

    #[test]
    fn test_parse_menu_number() {
        assert_eq!(parse_menu_number(" 3 "), Ok(3));
        assert_eq!(
            parse_menu_number("three"),
            Err(InputError::NotANumber("three".to_string()))
        );
        assert!(parse_menu_number("").is_err());
    }

    #[test]
    fn test_parse_roll_number() {
        assert_eq!(parse_roll_number("12"), Ok(RollNumber(12)));
        assert_eq!(
            parse_roll_number(""),
            Err(InputError::RollNumber(ParseRollNumberError::Empty))
        );
        assert!(matches!(
            parse_roll_number("12a"),
            Err(InputError::RollNumber(ParseRollNumberError::NotANumber(_)))
        ));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  Alice "), Some("Alice".to_string()));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
    }
}
