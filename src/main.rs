use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use payscraper::{
    config::DEFAULT_LISTING_URL, fetch::links::run_links, process::run_records, Config,
    FailurePolicy, HttpSource, Mode,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Scraper for the Maceió city council payroll portal.
#[derive(Parser, Debug)]
#[command(name = "payscraper", version)]
struct Cli {
    /// Only extract links to the payroll items and print them on stdout.
    #[arg(
        long = "extrair_links",
        alias = "extrair-links",
        conflicts_with = "processar_links",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true"
    )]
    extrair_links: bool,

    /// Year of interest. Empty keeps every year.
    #[arg(long, default_value = "")]
    ano: String,

    /// Only process a list of links (one per line) read from stdin.
    #[arg(
        long = "processar-links",
        alias = "processar_links",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true"
    )]
    processar_links: bool,

    /// Listing page URL; `&pagina=<N>` is appended to it.
    #[arg(long = "base-url", default_value = DEFAULT_LISTING_URL)]
    base_url: String,

    /// HTTP request timeout in seconds. Requests never time out by default.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log and skip failing pages instead of aborting the run.
    #[arg(long = "keep-going")]
    keep_going: bool,
}

impl Cli {
    fn into_config(self) -> Option<Config> {
        let mode = if self.extrair_links {
            Mode::ExtractLinks
        } else if self.processar_links {
            Mode::ProcessLinks
        } else {
            return None;
        };

        let mut config = Config::new(mode);
        config.year = self.ano;
        config.listing_url = self.base_url;
        config.timeout = self.timeout.map(Duration::from_secs);
        if self.keep_going {
            config.on_failure = FailurePolicy::Skip;
        }
        Some(config)
    }
}

/// Accepts Go-style single-dash long flags (`-ano 2020`, `-extrair_links`,
/// `-extrair_links=true`).
fn go_style_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    for arg in args {
        match arg.to_str() {
            Some(s) if s.len() > 2 && s.starts_with('-') && !s.starts_with("--") => {
                out.push(format!("-{s}").into());
            }
            _ => out.push(arg),
        }
    }
    out
}

fn main() -> Result<()> {
    // stdout carries the data, logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse_from(go_style_args(std::env::args_os()));
    let Some(config) = cli.into_config() else {
        println!("Nothing to do. Pick one of the options:");
        Cli::command().print_help()?;
        return Ok(());
    };
    config.validate()?;

    let start = Instant::now();
    let source = HttpSource::new(&config).context("building HTTP client")?;

    match config.mode {
        Mode::ExtractLinks => {
            let mut out = BufWriter::new(io::stdout().lock());
            let total = run_links(&source, &config, &mut out).context("extracting links")?;
            info!(links = total, year = %config.year, elapsed = ?start.elapsed(), "done");
        }
        Mode::ProcessLinks => {
            let out = BufWriter::new(io::stdout().lock());
            let summary = run_records(&source, io::stdin().lock(), out, &config)
                .context("processing links")?;
            info!(
                written = summary.written,
                skipped = summary.skipped,
                elapsed = ?start.elapsed(),
                "done"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let args = std::iter::once("payscraper")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(go_style_args(args))
    }

    #[test]
    fn test_go_style_flags() {
        let cli = parse(&["-extrair_links", "-ano", "2020"]).unwrap();
        let cfg = cli.into_config().unwrap();
        assert_eq!(cfg.mode, Mode::ExtractLinks);
        assert_eq!(cfg.year, "2020");
        assert_eq!(cfg.listing_url, DEFAULT_LISTING_URL);
    }

    #[test]
    fn test_go_style_bool_values() {
        let cfg = parse(&["-extrair_links=true", "-ano=2020"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(cfg.mode, Mode::ExtractLinks);

        let cli = parse(&["-processar-links=false"]).unwrap();
        assert!(cli.into_config().is_none());

        // bool flags never swallow the next argument
        assert!(parse(&["-processar-links", "false"]).is_err());
    }

    #[test]
    fn test_go_style_equals_form() {
        let cli = parse(&["-processar-links", "-ano=2019"]).unwrap();
        let cfg = cli.into_config().unwrap();
        assert_eq!(cfg.mode, Mode::ProcessLinks);
        assert_eq!(cfg.year, "2019");
    }

    #[test]
    fn test_double_dash_flags_and_extras() {
        let cli = parse(&[
            "--processar-links",
            "--keep-going",
            "--timeout",
            "30",
            "--base-url",
            "http://portal.test/x?y=1",
        ])
        .unwrap();
        let cfg = cli.into_config().unwrap();
        assert_eq!(cfg.on_failure, FailurePolicy::Skip);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.listing_url, "http://portal.test/x?y=1");
    }

    #[test]
    fn test_no_mode_means_nothing_to_do() {
        assert!(parse(&[]).unwrap().into_config().is_none());
        assert!(parse(&["-ano", "2020"]).unwrap().into_config().is_none());
    }

    #[test]
    fn test_modes_conflict() {
        assert!(parse(&["-extrair_links", "-processar-links"]).is_err());
    }

    #[test]
    fn test_values_are_not_rewritten() {
        let args = go_style_args(["bin", "-ano", "-1", "2020"].map(OsString::from));
        assert_eq!(args, ["bin", "--ano", "-1", "2020"].map(OsString::from));
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
