use serde::Deserialize;
use std::collections::BTreeMap;

use crate::errors::InvokeError;
use crate::types::TestSuite;

/// One line of libtest's JSON listing.
#[derive(Deserialize)]
struct ListingEvent {
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
}

/// Gather test names into suites keyed by module path.
fn into_suites(target: &str, names: Vec<String>) -> Vec<TestSuite> {
    let mut suites: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for full in names {
        let (suite, test) = match full.rsplit_once("::") {
            Some((module, test)) => (module.to_string(), test.to_string()),
            None => (target.to_string(), full),
        };
        suites.entry(suite).or_default().push(test);
    }
    suites.into_iter().map(|(name, tests)| TestSuite { name, tests }).collect()
}

/// Parse `--list --format terse` output: `path::name: test` per line.
pub fn parse_terse(target: &str, output: &str) -> Result<Vec<TestSuite>, InvokeError> {
    let mut names = Vec::new();
    for (idx, raw) in output.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || is_summary(line) {
            continue;
        }
        match line.rsplit_once(": ") {
            Some((name, "test")) if !name.is_empty() => names.push(name.to_string()),
            Some((_, "bench")) => {}
            _ => {
                return Err(InvokeError::MalformedOutput {
                    line: idx + 1,
                    reason: format!("unexpected entry `{line}`"),
                })
            }
        }
    }
    Ok(into_suites(target, names))
}

/// `3 tests, 0 benchmarks`
fn is_summary(line: &str) -> bool {
    line.ends_with(" benchmarks") || line.ends_with(" benchmark")
}

/// Parse `-Z unstable-options --list --format json` output.
pub fn parse_json(target: &str, output: &str) -> Result<Vec<TestSuite>, InvokeError> {
    let mut names = Vec::new();
    for (idx, raw) in output.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let event: ListingEvent = serde_json::from_str(line)
            .map_err(|e| InvokeError::MalformedOutput { line: idx + 1, reason: e.to_string() })?;
        if event.kind != "test" {
            continue;
        }
        match event.name {
            Some(name) => names.push(name),
            None => {
                return Err(InvokeError::MalformedOutput {
                    line: idx + 1,
                    reason: "test entry without a name".into(),
                })
            }
        }
    }
    Ok(into_suites(target, names))
}
