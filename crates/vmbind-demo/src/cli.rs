#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args by hand to keep the binary lean. Supports environment
//! variable overrides via the `VMBIND_DEMO_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

use crate::error::{DemoError, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
vmbind demo: a person card bound to a cycling data provider

USAGE:
    vmbind-demo [OPTIONS]

OPTIONS:
    --data=PATH      JSON array of person records (default: built-in sample)
    --start=N        Start at record N, 0-indexed (default: 0)
    --presses=N      Press \"next\" N times and exit instead of reading stdin
    --log=FILTER     tracing filter for stderr logs (default: warn)
    --help, -h       Show this help message
    --version, -V    Show version

COMMANDS (interactive mode):
    n, next, <enter> Advance to the next record
    q, quit          Exit

ENVIRONMENT VARIABLES:
    VMBIND_DEMO_DATA      Override --data
    VMBIND_DEMO_START     Override --start
    VMBIND_DEMO_PRESSES   Override --presses
    VMBIND_DEMO_LOG       Override --log";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Dataset file; `None` selects the built-in sample.
    pub data: Option<PathBuf>,
    /// Starting record index.
    pub start: usize,
    /// Scripted press count; `None` means interactive.
    pub presses: Option<usize>,
    /// tracing filter directive.
    pub log: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            data: None,
            start: 0,
            presses: None,
            log: "warn".into(),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Opts),
    Help,
    Version,
}

fn parse_number(flag: &str, val: &str) -> Result<usize> {
    val.parse()
        .map_err(|_| DemoError::invalid(format!("invalid {flag} value: {val}")))
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad argument.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(args, |key| env::var(key).ok()) {
            Ok(Invocation::Run(opts)) => opts,
            Ok(Invocation::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Invocation::Version) => {
                println!("vmbind-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(err.exit_code());
            }
        }
    }

    /// Parse `args` with environment lookups through `var`.
    ///
    /// Environment variables take precedence over defaults but are
    /// overridden by explicit command-line flags. Unparseable environment
    /// values are ignored.
    pub fn parse_from(
        args: impl IntoIterator<Item = String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Invocation> {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = var("VMBIND_DEMO_DATA") {
            opts.data = Some(PathBuf::from(val));
        }
        if let Some(val) = var("VMBIND_DEMO_START")
            && let Ok(n) = val.parse()
        {
            opts.start = n;
        }
        if let Some(val) = var("VMBIND_DEMO_PRESSES")
            && let Ok(n) = val.parse()
        {
            opts.presses = Some(n);
        }
        if let Some(val) = var("VMBIND_DEMO_LOG") {
            opts.log = val;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Invocation::Help),
                "--version" | "-V" => return Ok(Invocation::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--data=") {
                        opts.data = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--start=") {
                        opts.start = parse_number("--start", val)?;
                    } else if let Some(val) = other.strip_prefix("--presses=") {
                        opts.presses = Some(parse_number("--presses", val)?);
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log = val.to_string();
                    } else {
                        return Err(DemoError::invalid(format!("unknown argument: {other}")));
                    }
                }
            }
        }

        Ok(Invocation::Run(opts))
    }
}
