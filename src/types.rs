use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::defaults::Defaults;

/// Runtime checkers a test run can be instrumented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Sanitizer {
    Address,
    Thread,
    Undefined,
    Leak,
}

impl Sanitizer {
    /// Name as understood by `-Zsanitizer=`.
    pub fn flag_name(self) -> &'static str {
        match self {
            Sanitizer::Address => "address",
            Sanitizer::Thread => "thread",
            Sanitizer::Undefined => "undefined",
            Sanitizer::Leak => "leak",
        }
    }

    /// Short name of the clang runtime library.
    fn runtime_stem(self) -> &'static str {
        match self {
            Sanitizer::Address => "asan",
            Sanitizer::Thread => "tsan",
            Sanitizer::Undefined => "ubsan_standalone",
            Sanitizer::Leak => "lsan",
        }
    }

    /// Shared runtime library to preload for this sanitizer.
    ///
    /// Clang's per-OS runtime directory names the Linux libraries with an
    /// architecture suffix, e.g. `libclang_rt.asan-x86_64.so`.
    pub fn runtime_library(self, runtime_dir: &Path) -> PathBuf {
        let file = if cfg!(target_os = "macos") {
            format!("libclang_rt.{}_osx_dynamic.dylib", self.runtime_stem())
        } else {
            format!("libclang_rt.{}-{}.so", self.runtime_stem(), std::env::consts::ARCH)
        };
        runtime_dir.join(file)
    }
}

/// How tests get built and listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    pub coverage: bool,
    pub coverage_dir: PathBuf,
    pub sanitizers: Vec<Sanitizer>,
    pub sanitizer_runtime_dir: PathBuf,
    pub skip_build: bool,
    pub experimental_output: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            coverage: false,
            coverage_dir: PathBuf::from(Defaults::COVERAGE_DIR),
            sanitizers: Vec::new(),
            sanitizer_runtime_dir: PathBuf::from(Defaults::SANITIZER_RUNTIME_DIR),
            skip_build: false,
            experimental_output: false,
        }
    }
}

/// Tests sharing a module path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<String>,
}

/// Captured result of running a snippet, whatever its exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}
