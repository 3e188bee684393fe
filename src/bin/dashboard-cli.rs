use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "dashboard-cli")]
#[command(about = "Command-line client for the nginx dashboard API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000", env = "DASHBOARD_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Status,
    /// List sites with hostnames, ports and backends
    Sites,
    /// List sites with a single derived backend port
    Summary,
    /// List log files
    Logs,
    /// Print the last lines of a log file
    Tail {
        name: String,
        #[arg(short = 'n', long)]
        lines: Option<usize>,
    },
    /// Probe a hostname or URL
    Ping { target: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Status => client.get(format!("{base}/api/status")),
        Commands::Sites => client.get(format!("{base}/api/sites")),
        Commands::Summary => client.get(format!("{base}/api/sites/summary")),
        Commands::Logs => client.get(format!("{base}/api/logs")),
        Commands::Tail { name, lines } => {
            let request = client.get(format!("{base}/api/logs/{name}"));
            match lines {
                Some(n) => request.query(&[("lines", n)]),
                None => request,
            }
        }
        Commands::Ping { target } => {
            client.get(format!("{base}/api/ping")).query(&[("url", target)])
        }
    };

    let res = request.send().await?;
    match cli.command {
        Commands::Tail { .. } => print_text(res).await,
        _ => print_json(res).await,
    }
}

async fn print_text(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body = res.text().await?;
    if status.is_success() {
        print!("{body}");
    } else {
        report_failure(status, &body);
    }
    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body = res.text().await?;

    // Probe failures (502) still carry a structured body worth printing.
    match serde_json::from_str::<Value>(&body) {
        Ok(json) if status.is_success() || status == reqwest::StatusCode::BAD_GATEWAY => {
            println!("{}", serde_json::to_string_pretty(&json)?);
            if !status.is_success() {
                std::process::exit(1);
            }
        }
        _ => report_failure(status, &body),
    }
    Ok(())
}

fn report_failure(status: reqwest::StatusCode, body: &str) {
    eprintln!("Error: dashboard API returned status {status}");
    if !body.is_empty() {
        eprintln!("Response: {body}");
    }
    std::process::exit(1);
}
