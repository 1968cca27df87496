use chrono::{TimeZone, Utc};
use clap::Parser;
use clap::ValueHint;
use promwrite::remote::{Datapoint, Label, DEFAULT_REMOTE_WRITE_URL};
use reqwest::header::{HeaderName, HeaderValue};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Remote write endpoint
    ///
    /// The remote write endpoint the samples are pushed to.
    #[arg(short='u', long, env="PROM_WRITE_URL", value_hint=ValueHint::Url, default_value=DEFAULT_REMOTE_WRITE_URL)]
    pub write_url: String,

    /// Tag pair to include in the metric
    ///
    /// Specify as name:value, e.g. status_code:200. May be repeated; the
    /// metric name itself goes in a tag named __name__.
    #[arg(short = 't', long = "tag", value_parser = parse_tag)]
    pub tags: Vec<Label>,

    /// Datapoint to write
    ///
    /// Specify as value,unixTimestamp e.g. 14.23,1556026059 or use `now`
    /// instead of a timestamp for the current time. May be repeated; each
    /// datapoint becomes one series carrying the full tag set.
    #[arg(short = 'd', long = "datapoint", value_parser = parse_datapoint, required = true)]
    pub datapoints: Vec<Datapoint>,

    /// Extra request header
    ///
    /// Specify as name:value, e.g. M3-Metrics-Type:aggregated. May be
    /// repeated; overrides a default header of the same name.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(HeaderName, HeaderValue)>,

    /// HTTP timeout in seconds
    #[arg(long, env="PROM_WRITE_TIMEOUT", value_hint=ValueHint::Other, default_value="30")]
    pub timeout: u64,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Set the logging level
    ///
    /// Set the logging level to use when logging to the app.log file
    #[arg(short, long, env="LOG_LEVEL", value_hint=ValueHint::Other, default_value="INFO")]
    pub loglevel: log::LevelFilter,
}

fn parse_tag(raw: &str) -> Result<Label, String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("tag must be specified as name:value, got: {raw}"))?;
    Ok(Label {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn parse_datapoint(raw: &str) -> Result<Datapoint, String> {
    let (value, timestamp) = raw
        .split_once(',')
        .ok_or_else(|| format!("datapoint must be specified as value,timestamp, got: {raw}"))?;

    let value: f64 = value
        .parse()
        .map_err(|_| format!("unable to parse value as float64: {value}"))?;

    let timestamp = if timestamp.eq_ignore_ascii_case("now") {
        Utc::now()
    } else {
        let seconds: i64 = timestamp
            .parse()
            .map_err(|_| format!("unable to parse timestamp: {timestamp}"))?;
        Utc.timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| format!("timestamp out of range: {seconds}"))?
    };

    Ok(Datapoint { timestamp, value })
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("header must be specified as name:value, got: {raw}"))?;
    let name: HeaderName = name
        .trim()
        .parse()
        .map_err(|_| format!("invalid header name: {name}"))?;
    let value: HeaderValue = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid header value for {name}"))?;
    Ok((name, value))
}
