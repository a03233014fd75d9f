//! Prompt lines shown above the input marker.

pub const TOP: &str = "Choose a group by name or number, or press enter to quit.";
pub const TOP_WITH_TESTS: &str = concat!(
    "Choose a group by name or number, type `tests` to browse test targets, ",
    "or press enter to quit."
);
pub const GROUP: &str = "Choose a snippet by name or number, or press enter to go back.";
pub const SNIPPET: &str = "Type `r` to run this snippet, or press enter to go back.";
pub const OUTPUT: &str = "Press enter to go back.";
pub const TEST_TARGETS: &str = "Choose a test target by name or number, or press enter to go back.";
pub const TEST_SUITES: &str = "Press enter to go back.";
