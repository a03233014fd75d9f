use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod app;
mod catalog;
mod cli;
mod commands;
mod defaults;
mod errors;
mod logging;
mod screens;
mod tui;
mod types;
mod ui;

use crate::app::{AppCtx, CardStack};
use crate::cli::{Cli, Command, PackageArgs};
use crate::commands::invoke::{Invoker, InvokerOpts, ProcessInvoker};
use crate::logging::{init_subscriber, TracingSink, Verbosity};
use crate::screens::{Screen, TopScreen};
use crate::tui::ConsoleTerminal;

fn load_package(args: &PackageArgs) -> Result<catalog::Package> {
    catalog::load(&args.package_path, &args.snippets_dir)
        .with_context(|| format!("loading package at {}", args.package_path.display()))
}

fn invoker(args: &PackageArgs, colorize: bool) -> ProcessInvoker {
    ProcessInvoker::new(InvokerOpts {
        cargo: args.cargo.clone(),
        package_root: args.package_path.clone(),
        colorize,
    })
}

fn emit<T: Serialize>(value: &T, out: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(p) = out {
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&p, json).with_context(|| format!("writing {}", p.display()))?;
        println!("✓ Wrote {}", p.display());
    } else {
        println!("{json}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let colorize = cli.color.colorize_stdout();
    init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet), colorize);

    match cli.cmd {
        Command::Learn { package, tests } => {
            let pkg = load_package(&package)?;
            let ctx = AppCtx {
                package: Arc::new(pkg),
                invoker: Arc::new(invoker(&package, colorize)),
                test_config: tests.to_config(),
            };

            let mut term = ConsoleTerminal::stdio(colorize)?;
            let mut stack = CardStack::new(Screen::Top(TopScreen::new(ctx)), Box::new(TracingSink));
            let end = stack.run(&mut term).await?;
            tracing::debug!(
                ?end,
                depth = stack.depth(),
                pending_clear = stack.needs_to_clear_screen(),
                "session over"
            );
            Ok(())
        }

        Command::Snippets { package, out } => emit(&load_package(&package)?, out),

        Command::ListTests { package, tests, target, out } => {
            let inv = invoker(&package, colorize);
            let suites = inv
                .discover_tests(&target, &tests.to_config())
                .await
                .with_context(|| format!("listing tests of `{target}`"))?;
            emit(&suites, out)
        }
    }
}
