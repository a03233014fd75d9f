use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

use crate::catalog::Snippet;
use crate::commands::environment::{run_environment, test_environment, Environment};
use crate::commands::listing::{parse_json, parse_terse};
use crate::errors::{InvokeError, Step};
use crate::types::{RunOutput, TestConfig, TestSuite};

/// Runs cargo on behalf of cards. The stack never calls this directly.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn run_snippet(&self, snippet: &Snippet) -> Result<RunOutput, InvokeError>;

    async fn discover_tests(
        &self,
        target: &str,
        config: &TestConfig,
    ) -> Result<Vec<TestSuite>, InvokeError>;
}

/// Options for the process-backed invoker
#[derive(Clone, Debug)]
pub struct InvokerOpts {
    pub cargo: String,
    pub package_root: PathBuf,
    pub colorize: bool,
}

pub struct ProcessInvoker {
    opts: InvokerOpts,
}

impl ProcessInvoker {
    pub fn new(opts: InvokerOpts) -> Self {
        Self { opts }
    }

    fn locate_cargo(&self) -> Result<PathBuf, InvokeError> {
        which::which(&self.opts.cargo)
            .map_err(|source| InvokeError::LocateTool { tool: self.opts.cargo.clone(), source })
    }

    /// Run cargo to completion. Only a failure to launch is an error.
    async fn capture(
        &self,
        cargo: &Path,
        args: &[&str],
        env: &Environment,
    ) -> Result<Output, InvokeError> {
        let command = format!("{} {}", self.opts.cargo, args.join(" "));
        tracing::debug!(%command, "invoking");

        Command::new(cargo)
            .args(args)
            .current_dir(&self.opts.package_root)
            .env_clear()
            .envs(env)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| InvokeError::Launch { command, source })
    }

    /// Like `capture`, but a non-zero exit fails `step`.
    async fn exec(
        &self,
        cargo: &Path,
        args: &[&str],
        env: &Environment,
        step: Step,
    ) -> Result<Output, InvokeError> {
        let output = self.capture(cargo, args, env).await?;
        if !output.status.success() {
            return Err(InvokeError::NonZeroExit {
                step,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output)
    }
}

#[async_trait]
impl Invoker for ProcessInvoker {
    async fn run_snippet(&self, snippet: &Snippet) -> Result<RunOutput, InvokeError> {
        let example = snippet
            .example
            .as_deref()
            .ok_or_else(|| InvokeError::NoExampleTarget { path: snippet.path.clone() })?;
        let cargo = self.locate_cargo()?;
        let env = run_environment(std::env::vars(), self.opts.colorize);
        // The snippet's own exit status is part of its output, not a failure.
        let output = self.capture(&cargo, &["run", "--quiet", "--example", example], &env).await?;

        tracing::info!(
            snippet = %snippet.name,
            %example,
            code = ?output.status.code(),
            "snippet finished"
        );
        Ok(RunOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn discover_tests(
        &self,
        target: &str,
        config: &TestConfig,
    ) -> Result<Vec<TestSuite>, InvokeError> {
        let cargo = self.locate_cargo()?;
        let env = test_environment(std::env::vars(), target, config, self.opts.colorize);

        if config.skip_build {
            tracing::debug!(%target, "skipping build");
        } else {
            self.exec(&cargo, &["test", "--no-run", "--test", target], &env, Step::Build).await?;
        }

        let mut args = vec!["test", "--quiet", "--test", target, "--"];
        if config.experimental_output {
            args.extend(["-Z", "unstable-options", "--list", "--format", "json"]);
        } else {
            args.extend(["--list", "--format", "terse"]);
        }
        let output = self.exec(&cargo, &args, &env, Step::ListTests).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        let suites = if config.experimental_output {
            parse_json(target, &stdout)?
        } else {
            parse_terse(target, &stdout)?
        };
        tracing::info!(%target, suites = suites.len(), "discovered tests");
        Ok(suites)
    }
}
