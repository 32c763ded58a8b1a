/// Fewest items a session can compare. With one item there is no pair to ask about.
pub const MIN_ITEMS: usize = 2;

/// Menu literal that abandons the remaining pairs. Matched case-insensitively.
pub const EXIT_COMMAND: &str = "exit";
