use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems reading a package's manifest or snippets.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing {}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{} has no [package] name", path.display())]
    MissingPackageName { path: PathBuf },

    #[error("walking {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Which external step an invocation was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Build,
    ListTests,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Build => "build",
            Step::ListTests => "list tests",
        })
    }
}

/// Failures from running cargo on behalf of a card.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("could not find `{tool}`")]
    LocateTool {
        tool: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to launch `{command}`")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{} is not declared as an [[example]] target", path.display())]
    NoExampleTarget { path: PathBuf },

    #[error("{step} step failed ({}){}", exit_label(*code), stderr_tail(stderr))]
    NonZeroExit { step: Step, code: Option<i32>, stderr: String },

    #[error("malformed test listing at line {line}: {reason}")]
    MalformedOutput { line: usize, reason: String },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

/// Last few lines of stderr, enough to show what went wrong.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(5);
    format!(":\n{}", lines[start..].join("\n"))
}
