use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::defaults::Defaults;
use crate::types::{Sanitizer, TestConfig};

/// Browse, run, and test the snippets of a Cargo package
#[derive(Parser, Debug)]
#[command(version, about = "Interactive snippet browser for Cargo packages")]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Resolved against stdout.
    pub fn colorize_stdout(self) -> bool {
        self.resolve(std::io::stdout().is_terminal())
    }
}

#[derive(Args, Debug, Clone)]
pub struct PackageArgs {
    /// Root of the Cargo package to browse
    #[arg(long, default_value = Defaults::PACKAGE_PATH)]
    pub package_path: PathBuf,

    /// Snippets directory, relative to the package root
    #[arg(long, default_value = Defaults::SNIPPETS_DIR)]
    pub snippets_dir: String,

    /// Cargo executable used to run snippets and tests
    #[arg(long, env = "CARGO", default_value = Defaults::CARGO)]
    pub cargo: String,
}

#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Instrument test builds for code coverage
    #[arg(long)]
    pub enable_code_coverage: bool,

    /// Where coverage profiles are written
    #[arg(long, default_value = Defaults::COVERAGE_DIR)]
    pub coverage_dir: PathBuf,

    /// Sanitizers to build tests with (comma separated)
    #[arg(long = "sanitize", value_enum, value_delimiter = ',')]
    pub sanitizers: Vec<Sanitizer>,

    /// Directory holding the sanitizer runtime libraries
    #[arg(long, default_value = Defaults::SANITIZER_RUNTIME_DIR)]
    pub sanitizer_runtime_dir: PathBuf,

    /// List tests without building them first
    #[arg(long)]
    pub skip_build: bool,

    /// Ask libtest for its unstable JSON listing
    #[arg(long)]
    pub experimental_output: bool,
}

impl TestArgs {
    pub fn to_config(&self) -> TestConfig {
        let mut sanitizers = self.sanitizers.clone();
        sanitizers.sort();
        sanitizers.dedup();
        TestConfig {
            coverage: self.enable_code_coverage,
            coverage_dir: self.coverage_dir.clone(),
            sanitizers,
            sanitizer_runtime_dir: self.sanitizer_runtime_dir.clone(),
            skip_build: self.skip_build,
            experimental_output: self.experimental_output,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session
    Learn {
        #[command(flatten)]
        package: PackageArgs,

        #[command(flatten)]
        tests: TestArgs,
    },

    /// Print the package's snippet catalog as JSON
    Snippets {
        #[command(flatten)]
        package: PackageArgs,

        /// Optional path to write JSON output (pretty-printed)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the tests of one test target as JSON
    ListTests {
        #[command(flatten)]
        package: PackageArgs,

        #[command(flatten)]
        tests: TestArgs,

        /// Test target to list
        #[arg(long)]
        target: String,

        /// Optional path to write JSON output (pretty-printed)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_test_flags() {
        let cli = Cli::try_parse_from([
            "snippet-deck",
            "list-tests",
            "--target",
            "api",
            "--sanitize",
            "thread,address,thread",
            "--enable-code-coverage",
            "--skip-build",
            "--color",
            "never",
        ])
        .unwrap();

        assert_eq!(cli.color, ColorMode::Never);
        let Command::ListTests { tests, target, .. } = cli.cmd else {
            panic!("expected list-tests");
        };
        assert_eq!(target, "api");
        let config = tests.to_config();
        assert_eq!(config.sanitizers, vec![Sanitizer::Address, Sanitizer::Thread]);
        assert!(config.coverage && config.skip_build && !config.experimental_output);
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.resolve(true));
        assert!(!ColorMode::Auto.resolve(false));
        assert!(ColorMode::Always.resolve(false));
        assert!(!ColorMode::Never.resolve(true));
    }
}
