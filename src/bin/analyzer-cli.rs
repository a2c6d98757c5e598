use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "analyzer-cli")]
#[command(about = "Command line client for the HTTP response analyzer", long_about = None)]
struct Cli {
    /// Base URL of a running analyzer.
    #[arg(short, long, default_value = "http://localhost:8000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full analysis as JSON
    Analyze {
        /// URL the analyzer should fetch
        url: String,
    },
    /// Print protocol, status, server, and content length only
    Summary {
        /// URL the analyzer should fetch
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (url, summary_only) = match cli.command {
        Commands::Analyze { url } => (url, false),
        Commands::Summary { url } => (url, true),
    };

    let res = client
        .post(format!("{}/analyze", cli.server.trim_end_matches('/')))
        .json(&json!({ "url": url }))
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: analyzer returned status {}", status);
        if let Ok(text) = res.text().await {
            let detail = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or(text);
            eprintln!("Detail: {}", detail);
        }
        std::process::exit(1);
    }

    let report: Value = res.json().await?;
    if summary_only {
        print_summary(&report);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn print_summary(report: &Value) {
    let analysis = &report["analysis"];
    println!("Protocol:       {}", report["http_version"].as_str().unwrap_or("?"));
    println!("Status:         {}", analysis["status_code"]);
    println!("Server:         {}", analysis["service_name"].as_str().unwrap_or("?"));
    println!("Content-Length: {}", analysis["content_length"].as_str().unwrap_or("?"));
    println!(
        "Headers:        {}",
        report["headers"].as_object().map(|h| h.len()).unwrap_or(0)
    );
}
