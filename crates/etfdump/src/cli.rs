use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// ISIN of the exchange-traded fund to look up.
    pub isin: String,

    /// Sets the level of tracing (logs go to stderr; stdout stays JSON).
    #[arg(short, long)]
    pub trace: Option<TraceLevel>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
