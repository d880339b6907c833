use bizpulse::config::{load_config_or_default, AppConfig};
use bizpulse::pipeline::Pipeline;
use bizpulse::report::{render_markdown, to_json};
use clap::Parser;
use std::fs::{self, File};
use std::io::BufReader;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "bizpulse", version, about = "Revenue & risk report from a sales CSV")]
struct Cli {
    /// CSV file to analyze (headers: date, customer, product, amount, status)
    #[arg(short = 'f', long = "file")]
    file: String,

    /// JSON config file; defaults are used when it does not exist
    #[arg(short = 'c', long = "config", default_value = "config.json")]
    config: String,

    /// Markdown report path (overrides the config)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Also write the report as JSON to this path (overrides the config)
    #[arg(long = "json")]
    json: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration from file and environment
    let mut config: AppConfig = match load_config_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(output) = cli.output {
        config.report_path = output;
    }
    if cli.json.is_some() {
        config.json_path = cli.json;
    }

    match run(&cli.file, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Analyzes one file and writes the configured report outputs.
async fn run(path: &str, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Analyzing {}...", path);
    let file = File::open(path)?;
    let pipeline = Pipeline::from_config(config);
    let report = pipeline.run(BufReader::new(file)).await?;

    fs::write(&config.report_path, render_markdown(&report))?;
    println!("Wrote {}", config.report_path);

    if let Some(json_path) = &config.json_path {
        fs::write(json_path, to_json(&report)?)?;
        println!("Wrote {}", json_path);
    }
    Ok(())
}
