//! Console text for an interactive session.
use crate::types::Decision;

/// Shown once before the first pair.
pub const INTRO: &str = "\nYou can rank the following pairs or exit at any time.\n\
                         To exit, type 'exit' when prompted for input.\n";

/// Input prompt shown after each menu.
pub const CHOICE_PROMPT: &str = "Enter 1, 2, 3, 4, 5, or 'exit': ";

/// Shown after a line that is not a menu choice.
pub const INVALID_CHOICE: &str = "Invalid input. Please enter 1, 2, 3, 4, 5, or 'exit'.";

pub const EXIT_NOTICE: &str = "\nExiting comparisons early...";

/// Build the menu for one pair.
pub fn build_menu(first: &str, second: &str) -> String {
    format!(
        "\nWhich item do you prefer?\n\
         1: {first}\n\
         2: {second}\n\
         3: Remove {first}\n\
         4: Remove {second}\n\
         5: Remove both items\n\
         Type 'exit' to stop comparing."
    )
}

/// Echo line for a decision, if it gets one. Preferences are silent.
pub fn decision_notice(decision: Decision, first: &str, second: &str) -> Option<String> {
    match decision {
        Decision::PreferFirst | Decision::PreferSecond => None,
        Decision::RemoveFirst => Some(format!("Removed {first}")),
        Decision::RemoveSecond => Some(format!("Removed {second}")),
        Decision::RemoveBoth => Some(format!("Removed {first} and {second}")),
        Decision::Exit => Some(EXIT_NOTICE.to_string()),
    }
}
