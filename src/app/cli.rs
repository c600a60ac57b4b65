//! Command-line argument parsing (manual implementation)

use std::env;
use std::process;

use thiserror::Error;

use crate::constants::{
    APP_NAME, APP_VERSION, DEFAULT_HOTKEY, DEFAULT_POLL_MS, DEFAULT_TARGET_EXE, MAX_POLL_MS,
    MIN_POLL_MS,
};

/// Parsed command-line arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Executable name whose threads are toggled (exact, case-sensitive)
    pub target: String,
    /// Global hotkey combination
    pub hotkey: String,
    /// Poll interval in milliseconds
    pub poll_ms: u64,
    /// Resume the target on exit if it is left suspended
    pub resume_on_exit: bool,
    /// Enable debug logging
    pub verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET_EXE.to_string(),
            hotkey: DEFAULT_HOTKEY.to_string(),
            poll_ms: DEFAULT_POLL_MS,
            resume_on_exit: true,
            verbose: false,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for {option}: {reason}")]
    InvalidValue {
        option: String,
        value: String,
        reason: String,
    },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Print help message
fn print_help() {
    println!(
        "{} {}
Suspend and resume every thread of a process with a global hotkey.

USAGE:
    {} [OPTIONS]

OPTIONS:
    -t, --target <EXE>     Executable name to toggle [default: {}]
                           Matched exactly (case-sensitive); every running
                           instance with that name is affected
    -k, --hotkey <COMBO>   Global hotkey [default: {}]
                           Modifiers: ctrl, alt, shift, win
                           Keys: a-z, 0-9, f1-f24, space, enter, tab, esc,
                                 pause, insert, delete, home, end, pageup, pagedown
    -p, --poll <MS>        Poll interval in milliseconds [default: {}]
                           Range: {}-{}
        --no-resume-on-exit
                           Leave the target suspended when quitting
    -v, --verbose          Enable debug logging (RUST_LOG overrides)
    -h, --help             Print help information
    -V, --version          Print version information

EXAMPLES:
    {}                              Toggle {} with Ctrl+Space
    {} -t game.exe -k alt+f9        Toggle game.exe with Alt+F9

CONTROLS (console window):
    q / Esc / Ctrl+C   Quit",
        APP_NAME,
        APP_VERSION,
        APP_NAME,
        DEFAULT_TARGET_EXE,
        DEFAULT_HOTKEY,
        DEFAULT_POLL_MS,
        MIN_POLL_MS,
        MAX_POLL_MS,
        APP_NAME,
        DEFAULT_TARGET_EXE,
        APP_NAME,
    );
}

/// Parse poll interval from string
fn parse_poll(option: &str, s: &str) -> Result<u64, CliError> {
    let invalid = |reason: String| CliError::InvalidValue {
        option: option.to_string(),
        value: s.to_string(),
        reason,
    };
    match s.parse::<u64>() {
        Ok(ms) if (MIN_POLL_MS..=MAX_POLL_MS).contains(&ms) => Ok(ms),
        Ok(_) => Err(invalid(format!(
            "must be between {} and {} ms",
            MIN_POLL_MS, MAX_POLL_MS
        ))),
        Err(_) => Err(invalid("must be a number".to_string())),
    }
}

fn parse_target(option: &str, s: &str) -> Result<String, CliError> {
    if s.trim().is_empty() {
        return Err(CliError::InvalidValue {
            option: option.to_string(),
            value: s.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(s.to_string())
}

/// Applies an option that takes a value.
fn apply_value(args: &mut Args, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "-t" | "--target" => args.target = parse_target(key, value)?,
        "-k" | "--hotkey" => args.hotkey = value.to_string(),
        "-p" | "--poll" => args.poll_ms = parse_poll(key, value)?,
        _ => return Err(CliError::UnknownOption(key.to_string())),
    }
    Ok(())
}

fn takes_value(key: &str) -> bool {
    matches!(
        key,
        "-t" | "--target" | "-k" | "--hotkey" | "-p" | "--poll"
    )
}

/// Parse arguments (excluding the program name)
pub fn parse_from<I>(argv: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args::default();
    let mut argv: Vec<String> = argv.into_iter().collect();

    while !argv.is_empty() {
        let arg = argv.remove(0);

        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-v" | "--verbose" => args.verbose = true,
            "--no-resume-on-exit" => args.resume_on_exit = false,

            key if takes_value(key) => {
                if argv.is_empty() {
                    return Err(CliError::MissingValue(key.to_string()));
                }
                let value = argv.remove(0);
                apply_value(&mut args, key, &value)?;
            }

            // Handle combined short flags like -vt, and attached values like -tgame.exe
            s if s.starts_with('-') && !s.starts_with("--") && s[1..].chars().count() > 1 => {
                let mut queued = Vec::new();
                for (i, c) in s[1..].char_indices() {
                    let flag = format!("-{}", c);
                    if takes_value(&flag) {
                        // The rest of the argument, if any, is the flag's value
                        let rest = &s[1 + i + c.len_utf8()..];
                        queued.push(flag);
                        if !rest.is_empty() {
                            queued.push(rest.to_string());
                        }
                        break;
                    }
                    queued.push(flag);
                }
                for (i, item) in queued.into_iter().enumerate() {
                    argv.insert(i, item);
                }
            }

            // Handle --key=value syntax
            s if s.starts_with("--") && s.contains('=') => {
                let (key, value) = s.split_once('=').unwrap_or((s, ""));
                if !takes_value(key) {
                    return Err(CliError::UnknownOption(key.to_string()));
                }
                apply_value(&mut args, key, value)?;
            }

            s if s.starts_with('-') => {
                return Err(CliError::UnknownOption(s.to_string()));
            }

            s => {
                return Err(CliError::UnexpectedArgument(s.to_string()));
            }
        }
    }

    Ok(Command::Run(args))
}

/// Parse command-line arguments, handling help/version/errors by exiting
pub fn parse_args() -> Args {
    match parse_from(env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            print_help();
            process::exit(0);
        }
        Ok(Command::Version) => {
            println!("{} {}", APP_NAME, APP_VERSION);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("For more information, try '--help'");
            process::exit(1);
        }
    }
}
