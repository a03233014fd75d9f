//! Tracing subscriber setup and the sink that card errors are reported to.
//!
//! Filter priority, highest first: `SNIPPET_DECK_LOG`, `RUST_LOG`, then the
//! CLI flags (`-v` debug, `-q` error, default warn). Logs go to stderr so they
//! land on the same terminal as the session without going through the stack.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::defaults::Defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber. Call once, first thing in `main`.
pub fn init_subscriber(verbosity: Verbosity, colorize: bool) {
    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(colorize && stderr_is_tty)
        .with_target(verbosity == Verbosity::Verbose)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt_layer)
        .init();
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    if let Ok(directives) = std::env::var(Defaults::LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(verbosity.default_level().as_str().to_ascii_lowercase())
}

/// Receives errors that cards hand back with a pop. Fire and forget.
pub trait ErrorSink: Send {
    fn report(&mut self, error: &anyhow::Error);
}

/// Reports through `tracing`, which prints to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&mut self, error: &anyhow::Error) {
        tracing::error!("{error:#}");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Keeps every reported error as its formatted chain.
    #[derive(Clone, Default)]
    pub struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl RecordingSink {
        pub fn reports(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl ErrorSink for RecordingSink {
        fn report(&mut self, error: &anyhow::Error) {
            self.0.lock().unwrap().push(format!("{error:#}"));
        }
    }

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true).default_level(), Level::ERROR);
        assert_eq!(Verbosity::from_flags(false, false).default_level(), Level::WARN);
    }
}
