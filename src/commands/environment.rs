use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

use crate::types::TestConfig;

pub type Environment = BTreeMap<String, String>;

#[cfg(target_os = "macos")]
pub const PRELOAD_VAR: &str = "DYLD_INSERT_LIBRARIES";
#[cfg(not(target_os = "macos"))]
pub const PRELOAD_VAR: &str = "LD_PRELOAD";

/// Put `value` in front of a `:`-separated variable, keeping what was there.
fn prepend_path(env: &mut Environment, key: &str, value: &str) {
    let merged = match env.get(key).filter(|v| !v.is_empty()) {
        Some(existing) => format!("{value}:{existing}"),
        None => value.to_string(),
    };
    env.insert(key.to_string(), merged);
}

fn append_flag(env: &mut Environment, key: &str, flag: &str) {
    let merged = match env.get(key).filter(|v| !v.trim().is_empty()) {
        Some(existing) => format!("{existing} {flag}"),
        None => flag.to_string(),
    };
    env.insert(key.to_string(), merged);
}

fn disable_color(env: &mut Environment) {
    env.insert("NO_COLOR".into(), "1".into());
    env.insert("CARGO_TERM_COLOR".into(), "never".into());
}

/// Environment for running a snippet.
pub fn run_environment<I>(base: I, colorize: bool) -> Environment
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env: Environment = base.into_iter().collect();
    if !colorize {
        disable_color(&mut env);
    }
    env
}

/// Environment for building and listing the tests of `target`.
///
/// Every call with coverage enabled gets its own profile path.
pub fn test_environment<I>(
    base: I,
    target: &str,
    config: &TestConfig,
    colorize: bool,
) -> Environment
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env = run_environment(base, colorize);

    for sanitizer in &config.sanitizers {
        append_flag(&mut env, "RUSTFLAGS", &format!("-Zsanitizer={}", sanitizer.flag_name()));
        let runtime = sanitizer.runtime_library(&config.sanitizer_runtime_dir);
        prepend_path(&mut env, PRELOAD_VAR, &runtime.to_string_lossy());
    }

    if config.coverage {
        append_flag(&mut env, "RUSTFLAGS", "-Cinstrument-coverage");
        env.insert("LLVM_PROFILE_FILE".into(), profile_path(&config.coverage_dir, target));
    }

    env
}

fn profile_path(coverage_dir: &Path, target: &str) -> String {
    coverage_dir
        .join(format!("{target}-{}-%p.profraw", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}
