use anyhow::bail;
use anyhow::Context;
use anyhow::Result;

use chrono::Utc;

use clap::Parser;
use clap::Subcommand;

use std::convert::TryFrom;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use tracing::error;
use tracing::info;
use tracing::warn;
use tracing::Level;

use tracing_subscriber::filter::EnvFilter;

use ntp_sunset::clock;
use ntp_sunset::configuration::Configuration;
use ntp_sunset::web_api;

/// Manage NTP, timezone, and sunrise/sunset settings
#[derive(Parser)]
#[clap(about)]
struct Args {
    /// Configuration file
    config: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a configuration file with default settings
    Init {
        /// Replace an existing configuration file
        #[clap(long)]
        force: bool,
    },
    /// Print the NTP settings as sent to the web UI
    Show,
    /// Validate the NTP settings
    Check,
    /// Apply NTP settings submitted from the web UI, "-" reads them from standard input
    Submit { data: String },
    /// Show the current local time in the configured timezone
    Time,
    /// Check whether it is day now, sunrise and sunset given as local HH:MM
    Day { sunrise: String, sunset: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = args.config.as_path();

    match args.command {
        Command::Init { force } => init(path, force),
        Command::Show => show(path),
        Command::Check => check(path),
        Command::Submit { data } => submit(path, data),
        Command::Time => time(path),
        Command::Day { sunrise, sunset } => day(path, &sunrise, &sunset),
    }
}

fn start_tracing(config: &Configuration) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .finish();

    let filter = tracing::subscriber::with_default(subscriber, || {
        match EnvFilter::try_from(config.clone()) {
            Ok(f) => f,
            Err(e) => {
                error!("{}", e);

                std::process::exit(1);
            }
        }
    });

    // stdout carries JSON for the web UI
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Configuration> {
    let config = Configuration::load(path)
        .with_context(|| format!("failed to load configuration file {}", path.display()))?;

    start_tracing(&config);

    Ok(config)
}

fn init(path: &Path, force: bool) -> Result<()> {
    let config = Configuration::default();

    start_tracing(&config);

    if path.exists() && !force {
        bail!("{} already exists, use --force to replace it", path.display());
    }

    config
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let config = load(path)?;

    println!("{}", web_api::config_response(&config.ntp)?);

    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let config = load(path)?;

    let valid = config
        .ntp
        .validate()
        .with_context(|| format!("invalid NTP settings in {}", path.display()))?;

    info!("NTP server {}", valid.server);
    info!(
        "timezone {} ({})",
        valid.timezone_description, config.ntp.ntp_timezone
    );
    info!(
        "location {:.4}, {:.4}",
        valid.location.latitude, valid.location.longitude
    );

    if valid.sunset_enabled {
        info!(
            "sunrise offset {} min, sunset offset {} min",
            valid.sunrise_offset.num_minutes(),
            valid.sunset_offset.num_minutes()
        );
    } else {
        info!("sunrise/sunset disabled");
    }

    match valid.deep_sleep {
        Some(d) => info!("deep sleep for {} s", d.as_secs()),
        None => info!("deep sleep disabled"),
    }

    Ok(())
}

fn submit(path: &Path, data: String) -> Result<()> {
    let mut config = load(path)?;

    let data = if data == "-" {
        let mut buffer = String::new();

        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read settings from standard input")?;

        buffer.trim_end().to_string()
    } else {
        data
    };

    let response = web_api::apply_submission(&mut config, path, &data);

    println!("{}", response.to_json());

    if !response.is_success() {
        bail!("settings rejected: {}", response.message);
    }

    Ok(())
}

fn time(path: &Path) -> Result<()> {
    let config = load(path)?;

    let valid = config
        .ntp
        .validate()
        .with_context(|| format!("invalid NTP settings in {}", path.display()))?;

    let tz = &valid.timezone;
    let now = Utc::now();

    match clock::local_time(tz, now) {
        Some(local) => info!(
            "{} {} (UTC{}, daylight saving {}), {} minutes past midnight",
            local.format("%Y-%m-%d %H:%M:%S"),
            tz.abbreviation_at(now),
            local.offset(),
            if tz.is_dst_at(now) { "on" } else { "off" },
            clock::minutes_past_midnight(&local)
        ),
        None => warn!("clock is not synchronized, system time is {}", now),
    }

    Ok(())
}

fn parse_minutes(text: &str) -> Result<u32> {
    let (hours, minutes) = text
        .split_once(':')
        .with_context(|| format!("expected HH:MM, got {}", text))?;

    let hours: u32 = hours.parse().with_context(|| format!("bad hour in {}", text))?;
    let minutes: u32 = minutes
        .parse()
        .with_context(|| format!("bad minute in {}", text))?;

    if hours > 23 || minutes > 59 {
        bail!("{} is not a time of day", text);
    }

    Ok(hours * 60 + minutes)
}

fn day(path: &Path, sunrise: &str, sunset: &str) -> Result<()> {
    let sunrise = parse_minutes(sunrise)?;
    let sunset = parse_minutes(sunset)?;

    let config = load(path)?;

    let valid = config
        .ntp
        .validate()
        .with_context(|| format!("invalid NTP settings in {}", path.display()))?;

    let now = Utc::now();

    let local = match clock::local_time(&valid.timezone, now) {
        Some(l) => l,
        None => bail!("clock is not synchronized, system time is {}", now),
    };

    let minutes = clock::minutes_past_midnight(&local);

    if clock::is_day_period(minutes, sunrise, sunset, &valid) {
        info!("day at {}", local.format("%H:%M"));
    } else {
        info!("night at {}", local.format("%H:%M"));
    }

    Ok(())
}
