//! Command line arguments

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be spelled with a single dash (`-dir`, `-debug`)
const SINGLE_DASH_FLAGS: &[&str] = &["dir", "debug", "config", "log-file"];

/// tailwatch - print lines appended to every file in a directory
#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "tailwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to watch
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Log every change event before processing it
    #[arg(long)]
    pub debug: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments, accepting single-dash long flags
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite `-dir x` / `-dir=x` / `-debug[=bool]` into the `--long` form clap expects.
///
/// Arguments after a bare `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let Some(flag) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
            normalized.push(arg);
            continue;
        };

        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };
        if !SINGLE_DASH_FLAGS.contains(&name) {
            normalized.push(arg);
            continue;
        }

        match (name, value) {
            // Boolean flag with explicit value, as in `-debug=false`
            ("debug", Some(value)) => {
                if matches!(value, "true" | "1" | "t" | "T" | "TRUE" | "True") {
                    normalized.push(OsString::from("--debug"));
                }
            }
            (_, Some(value)) => normalized.push(OsString::from(format!("--{name}={value}"))),
            (_, None) => normalized.push(OsString::from(format!("--{name}"))),
        }
    }

    normalized
}
