use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::anyhow;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum_macros::{Display, EnumString};
use tracing::{debug, info};

use pennant::display::DisplayAnalysis;
use pennant::elimination::{Analysis, AnalysisOptions};
use pennant::trivial::TrivialCertificate;
use pennant::{file, print};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Format {
    Table,
    Text,
    Json,
}

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// division file to analyse (.txt or .json)
    file: Option<PathBuf>,

    /// output format: table, text or json
    #[clap(short = 'f', long, value_parser = parse_format, default_value = "table")]
    format: Format,

    /// witnesses to report for trivial eliminations: all or first
    #[clap(short = 'w', long, value_parser = parse_witnesses, default_value = "all")]
    witnesses: TrivialCertificate,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.file
            .as_ref()
            .ok_or(anyhow!("division file must be specified"))?;
        Ok(())
    }
}
fn parse_format(s: &str) -> anyhow::Result<Format> {
    Format::from_str(&s.to_lowercase()).map_err(|_| anyhow!("unsupported format {s}"))
}
fn parse_witnesses(s: &str) -> anyhow::Result<TrivialCertificate> {
    TrivialCertificate::from_str(&s.to_lowercase()).map_err(|_| anyhow!("unsupported witness policy {s}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let path = args.file.unwrap();
    let standings = file::read_division(&path)?;
    info!("read {} teams from {}", standings.len(), path.display());

    let start_time = Instant::now();
    let options = AnalysisOptions {
        trivial_certificate: args.witnesses,
    };
    let analysis = Analysis::new(standings, &options)?;
    let elapsed = start_time.elapsed();
    info!(
        "analysed {} teams in {:.3}s; {} eliminated",
        analysis.num_teams(),
        elapsed.as_micros() as f64 / 1_000_000.,
        analysis.eliminated_teams().count()
    );

    match args.format {
        Format::Table => println!("{}", Console::default().render(&print::tabulate(&analysis))),
        Format::Text => print!("{}", DisplayAnalysis::from(&analysis)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&print::report(&analysis))?),
    }

    Ok(())
}
