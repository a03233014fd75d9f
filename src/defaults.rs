//! Central place for all default values.
//! Update these and the whole app picks them up.

pub struct Defaults;

impl Defaults {
    /* Package layout */
    pub const PACKAGE_PATH: &'static str = ".";
    pub const MANIFEST: &'static str = "Cargo.toml";
    pub const SNIPPETS_DIR: &'static str = "snippets";
    pub const TESTS_DIR: &'static str = "tests";
    pub const GROUP_README: &'static str = "README.md";

    /* Tools */
    pub const CARGO: &'static str = "cargo";

    /* Test runs */
    pub const COVERAGE_DIR: &'static str = "target/coverage";
    pub const SANITIZER_RUNTIME_DIR: &'static str = "/usr/lib/clang/lib/linux";

    /* Presentation */
    pub const WRAP_WIDTH: usize = 80;

    /* Logging */
    pub const LOG_ENV: &'static str = "SNIPPET_DECK_LOG";
}
