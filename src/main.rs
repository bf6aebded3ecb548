// src/main.rs

use jobharvest::config::{self, RunSettings};
use jobharvest::service::{HttpSupplier, Pipeline};

/// Initialize logging with tracing_subscriber. Diagnostics go to stderr;
/// stdout carries only the JSON payload.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jobharvest=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .compact()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Invocation: `jobharvest [site] [keyword|all] [limit] [test]`.
/// An optional session credential is read from JOBHARVEST_SESSION.
fn parse_args() -> (String, RunSettings) {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let site = args.first().cloned().unwrap_or_else(|| "weremoto".into());
    let keyword = args.get(1).cloned().unwrap_or_else(|| "all".into());
    let limit = args
        .get(2)
        .and_then(|a| a.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(5);
    let test_mode = args.get(3).map(|a| a == "test").unwrap_or(false);

    let mut settings = RunSettings {
        keyword,
        limit,
        session_token: std::env::var("JOBHARVEST_SESSION").ok(),
        ..RunSettings::default()
    };
    if test_mode {
        settings = settings.test_mode();
    }

    (site, settings)
}

#[tokio::main]
async fn main() {
    init_logging();
    let (site, settings) = parse_args();

    // The contract: always exit 0 with a syntactically valid JSON array on
    // stdout, however badly the run went.
    let records = run(&site, settings).await;
    match serde_json::to_string(&records) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize output: {}", e);
            println!("[]");
        }
    }
}

async fn run(site: &str, settings: RunSettings) -> Vec<jobharvest::domain::models::JobPosting> {
    let Some(profile) = config::site_profile(site) else {
        log::error!("Unknown site '{}'; known: wellfound, weremoto", site);
        return Vec::new();
    };

    let supplier = match HttpSupplier::new(settings.session_token.as_deref()) {
        Ok(supplier) => supplier,
        Err(e) => {
            log::error!("Content supplier unavailable, ending run: {}", e);
            return Vec::new();
        }
    };

    Pipeline::new(&supplier, profile, settings).run().await
}
