/* Copyright (C) 2024  AlphaKeks <alphakeks@dawn.sh>
 *
 * This library is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this repository.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use decimal_id::{Direction, PlayerSummaries, Strategy};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::{Layer as _, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod config;

use self::cli::Command;
use self::config::{Config, TracingConfig};

fn main() -> anyhow::Result<ExitCode> {
    let cli_args = cli::args();
    let mut config = Config::load(cli_args.config_path.as_deref())?;

    cli_args.apply_to_config(&mut config);

    let _guard = if config.tracing.enable {
        init_tracing(&config.tracing).context("failed to initialize tracing")?
    } else {
        None
    };

    let strategy = config.conversion.strategy;

    match cli_args.command {
        Command::ToWide { ref ids } => convert(ids, Direction::ToWide, strategy),
        Command::ToNarrow { ref ids } => convert(ids, Direction::ToNarrow, strategy),
        Command::Profiles { ref input } => profiles(input.as_deref(), strategy),
    }
}

/// Prints one converted identifier per line.
///
/// Identifiers that fail to convert are reported on stderr and leave an empty line, so the
/// output still lines up with the input.
fn convert(ids: &[String], direction: Direction, strategy: Strategy) -> anyhow::Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let mut failed = false;

    for id in ids {
        let written = match direction.apply(Some(id.as_str()), strategy) {
            Ok(Some(converted)) => writeln!(stdout, "{converted}"),
            Ok(None) => writeln!(stdout),
            Err(error) => {
                tracing::debug!(%id, ?direction, %strategy, "conversion failed");
                eprintln!("{id:?}: {error}");
                failed = true;
                writeln!(stdout)
            }
        };

        written.context("failed to write to stdout")?;
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn profiles(input: Option<&Path>, strategy: Strategy) -> anyhow::Result<ExitCode> {
    let json = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read stdin")?,
    };

    let mut profiles = serde_json::from_str::<PlayerSummaries>(&json)
        .context("failed to parse player summaries")?
        .into_profiles();

    let report = decimal_id::attach_account_ids(&mut profiles, strategy);

    tracing::info!(
        converted = report.converted,
        absent = report.absent,
        failed = report.failed,
        "attached account ids",
    );

    let mut stdout = io::stdout().lock();

    serde_json::to_writer_pretty(&mut stdout, &profiles).context("failed to write profiles")?;
    writeln!(stdout).context("failed to write to stdout")?;

    Ok(if report.failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing(config: &TracingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    assert!(config.enable, "tracing should only be initialized if enabled");

    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("decimal_id=info,warn"))
    };

    let stderr = config.stderr.enable.then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(config.stderr.ansi)
            .with_writer(io::stderr)
    });

    let (files, guard) = config
        .files
        .enable
        .then(|| {
            if !config.files.directory.exists() {
                fs::create_dir_all(&config.files.directory).context("create log dir")?;
            }

            let log_dir = config
                .files
                .directory
                .canonicalize()
                .context("canonicalize log dir path")?;

            let (writer, guard) = tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .filename_prefix("idconv")
                .filename_suffix("log")
                .build(&log_dir)
                .map(tracing_appender::non_blocking)
                .context("failed to initialize logger")?;

            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_file(true)
                .with_level(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_writer(writer);

            anyhow::Ok((layer, guard))
        })
        .transpose()?
        .unzip();

    let layers = tracing_subscriber::Layer::and_then(stderr, files);

    tracing_subscriber::registry()
        .with(layers.with_filter(env_filter()))
        .init();

    Ok(guard)
}
