use std::fmt;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use ui::{ApiClient, App, AppContext};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidServerUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidServerUrl { raw } => {
                write!(f, "invalid --server-url value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    server_url: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--server-url <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --server-url http://127.0.0.1:8080");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_SERVER_URL");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut server_url = std::env::var("TUTOR_SERVER_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:8080".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server-url" => {
                    let value = args.next().ok_or(ArgsError::MissingValue {
                        flag: "--server-url",
                    })?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidServerUrl { raw: value });
                    }
                    server_url = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { server_url })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let context = AppContext::new(ApiClient::new(args.server_url));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Math Tutor")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);

    Ok(())
}
