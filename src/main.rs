//! Thread toggle
//!
//! A background console utility that suspends and resumes every thread of a
//! named process whenever a global hotkey is pressed, using raw Win32 API
//! calls via the `windows` crate.
//!
//! Every process whose executable name matches the target exactly is
//! affected; there is no path or signature check.
//!
//! Controls:
//! - Hotkey (default Ctrl+Space): Suspend/resume the target
//! - q / Esc / Ctrl+C in the console: Quit (resumes the target first)

#![cfg_attr(not(windows), allow(dead_code))]

mod app;
mod constants;
#[cfg(windows)]
mod ffi;
mod system;

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use app::cli::{self, Args};
use app::AppResult;

fn main() -> ExitCode {
    let args = cli::parse_args();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) -> AppResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true)
        .with_env_filter(filter)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(windows)]
fn run(args: &Args) -> AppResult<()> {
    use std::time::Duration;

    use crossterm::terminal;
    use tracing::info;

    use app::hotkey::Hotkey;
    use app::trigger::TriggerSource;
    use app::{App, AppError};
    use constants::{APP_NAME, APP_VERSION, HOTKEY_ID, SINGLE_INSTANCE_MUTEX};
    use ffi::{HotkeyRegistration, SingleInstanceMutex};
    use system::{ToggleEngine, Win32Platform};

    info!("{} {} starting", APP_NAME, APP_VERSION);

    let _instance = SingleInstanceMutex::acquire(SINGLE_INSTANCE_MUTEX)
        .map_err(|e| AppError::MutexFailed(e.message()))?
        .ok_or(AppError::AlreadyRunning)?;

    let hotkey = Hotkey::parse(&args.hotkey)?;
    let registration = HotkeyRegistration::register(HOTKEY_ID, hotkey.modifiers, hotkey.vk)
        .map_err(|e| AppError::HotkeyRegistration {
            hotkey: hotkey.to_string(),
            reason: e.message(),
        })?;
    info!(hotkey = %hotkey, exe = %args.target, "RegisterHotKey succeeded; press q to quit");

    let engine = ToggleEngine::new(Win32Platform, args.target.clone());
    let mut app = App::new(engine, args.resume_on_exit);
    let mut triggers = TriggerSource::new(registration.id());
    let interval = Duration::from_millis(args.poll_ms);

    terminal::enable_raw_mode()?;
    let result = pump(&mut app, &mut triggers, interval);
    let restored = terminal::disable_raw_mode();

    app.shutdown();
    drop(registration);
    info!("{} stopped", APP_NAME);

    result?;
    restored?;
    Ok(())
}

/// Dispatches triggers until one asks to quit.
#[cfg(windows)]
fn pump<P: system::ThreadControl>(
    app: &mut app::App<P>,
    triggers: &mut app::trigger::TriggerSource,
    interval: std::time::Duration,
) -> std::io::Result<()> {
    loop {
        match triggers.poll()? {
            Some(trigger) => {
                if !app.dispatch(trigger) {
                    return Ok(());
                }
            }
            None => std::thread::sleep(interval),
        }
    }
}

#[cfg(not(windows))]
fn run(_args: &Args) -> AppResult<()> {
    Err(app::AppError::UnsupportedPlatform(constants::APP_NAME))
}
