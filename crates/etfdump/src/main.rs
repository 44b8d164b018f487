mod cli;

// remote imports
use clap::error::ErrorKind;
use clap::Parser;
use cli::{Cli, TraceLevel};
use etfdump_spider::etf::cbonds::{self, Scrape};
use serde_json::json;
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preprocess the trace level; stdout carries the JSON report, so the
// subscriber writes to stderr
fn preprocess(trace_level: Level) {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

// hard failures leave as a JSON object on stdout with a non-zero exit;
// soft outcomes (no fund, no structure) exit zero with an empty report
fn fail(message: String) -> ! {
    println!("{}", json!({ "error": message }));
    std::process::exit(1);
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                std::process::exit(0);
            }
            ErrorKind::MissingRequiredArgument => fail("Missing ISIN argument".to_string()),
            kind => fail(format!("invalid arguments ({kind})")),
        },
    };

    // open the .env file, and set the trace level
    dotenv::dotenv().ok();
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    }
    trace!("command line input recorded: {cli:?}");

    let isin = cli.isin.trim().to_uppercase();

    let http_client = match etfdump_spider::std_client_build() {
        Ok(client) => client,
        Err(err) => fail(format!("failed to build HTTP client: {err}")),
    };

    match cbonds::scrape(&http_client, &isin).await {
        Ok(Scrape::Report(report)) => {
            println!(
                "{}",
                serde_json::to_string(&report).expect("report serialization")
            );
        }
        Ok(Scrape::NoFund { isin }) => {
            println!(
                "{}",
                json!({
                    "error": format!("No ETF found on cbonds for ISIN {isin}"),
                    "holdings": [],
                })
            );
        }
        Ok(Scrape::NoStructure { cbonds_id }) => {
            println!(
                "{}",
                json!({
                    "error": "Could not find structure data in page",
                    "holdings": [],
                    "cbondsId": cbonds_id,
                })
            );
        }
        Err(err) => fail(err.to_string()),
    }
}
