use std::time::Duration;

use crate::logging::app_config;
use clap::Parser;
use cli::Cli;
use promwrite::remote::{Client, Config, ConfigOption, TimeSeries, WriteOptions};
use serde_json::json;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // initialize the logger
    log4rs::init_config(app_config("log.out", cli.loglevel)).unwrap();
    log::info!("Writing metrics to endpoint: {}", cli.write_url);

    // each datapoint becomes one series carrying the full tag set
    let series_list: Vec<TimeSeries> = cli
        .datapoints
        .iter()
        .map(|datapoint| TimeSeries {
            labels: cli.tags.clone(),
            datapoint: *datapoint,
        })
        .collect();

    let mut options = vec![
        ConfigOption::WriteUrl(cli.write_url),
        ConfigOption::HttpTimeout(Duration::from_secs(cli.timeout)),
    ];
    if cli.insecure {
        options.push(ConfigOption::SkipTlsVerify);
    }
    let client = Client::new(Config::new(options))?;

    let mut write_options = WriteOptions::new();
    for (name, value) in cli.headers {
        write_options = write_options.with_header(name, value);
    }

    match client.write_time_series(&series_list, &write_options).await {
        Ok(result) => {
            log::info!("write succeeded with status {}", result.status_code);
            println!(
                "{}",
                json!({"success": true, "statusCode": result.status_code})
            );
        }
        Err(err) => {
            log::error!("write failed: {err}");
            println!(
                "{}",
                json!({
                    "success": false,
                    "statusCode": err.status_code(),
                    "error": err.to_string(),
                })
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
