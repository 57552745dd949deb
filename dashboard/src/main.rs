//! Dashboard entry point: loads settings, wires adapters, and runs one
//! command against freshly loaded data.

use std::ffi::OsString;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use dashboard::DashboardSettings;
use dashboard::domain::Dashboard;
use dashboard::domain::ports::{
    AlwaysConfirm, ConfirmationGate, DashboardPorts, RemoteSource, Renderer,
};
use dashboard::inbound::cli::{self, CliArgs, CliError, PromptGate, TerminalRenderer, WriterNotifier};
use dashboard::outbound::placeholder::{OfflineSource, PlaceholderHttpSource};
use dashboard::outbound::storage::SlotLocalStore;

/// Failures that end the process.
#[derive(Debug, Error)]
enum AppError {
    /// Start-up could not complete.
    #[error("{0}")]
    Setup(String),
    /// The command failed.
    #[error(transparent)]
    Cli(#[from] CliError),
}

impl AppError {
    fn setup<E: std::fmt::Display>(context: &str, err: &E) -> Self {
        Self::Setup(format!("{context}: {err}"))
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Cli(err)) if err.is_reported() => ExitCode::FAILURE,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "error: {err}") {
                debug!(error = %write_err, "failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        if let Err(write_err) = writeln!(io::stderr().lock(), "tracing init failed: {err}") {
            debug!(error = %write_err, "failed to report tracing init failure");
        }
    }
}

fn remote_source(
    settings: &DashboardSettings,
    offline: bool,
) -> Result<Arc<dyn RemoteSource>, AppError> {
    if offline {
        return Ok(Arc::new(OfflineSource));
    }
    let base = Url::parse(settings.api_base_url())
        .map_err(|err| AppError::setup("parse API base URL", &err))?;
    let source = PlaceholderHttpSource::new(base, settings.request_timeout())
        .map_err(|err| AppError::setup("build HTTP client", &err))?;
    Ok(Arc::new(source))
}

fn run(args: CliArgs) -> Result<(), AppError> {
    let settings = DashboardSettings::load_from_iter([OsString::from("dashboard")])
        .map_err(|err| AppError::setup("load settings", &err))?;
    init_tracing(settings.log_json);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::setup("create Tokio runtime", &err))?;

    let data_dir = Utf8PathBuf::from_path_buf(settings.data_dir()).map_err(|path| {
        AppError::Setup(format!("data directory is not UTF-8: {}", path.display()))
    })?;
    let store = SlotLocalStore::open(&data_dir)
        .map_err(|err| AppError::setup("open data directory", &err))?;
    let gate: Arc<dyn ConfirmationGate> = if args.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(PromptGate::new(BufReader::new(io::stdin()), io::stderr()))
    };
    let view = Arc::new(TerminalRenderer::default());
    let ports = DashboardPorts {
        remote: remote_source(&settings, args.offline)?,
        store: Arc::new(store),
        notifier: Arc::new(WriterNotifier::new(io::stderr())),
        renderer: Arc::clone(&view) as Arc<dyn Renderer>,
        gate,
    };

    let mut dashboard = Dashboard::open(ports, Arc::new(DefaultClock), settings.merge_policy());
    let commit = runtime.block_on(dashboard.load());
    debug!(?commit, "initial load");

    cli::run(&mut dashboard, &view, args.command, &mut io::stdout().lock())?;
    Ok(())
}
