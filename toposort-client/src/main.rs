use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use toposort_core::{Config, Error, Pipeline};
use toposort_net::{HttpSource, TcpProber};
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Rank Cardano relays by TCP connect time and write the fastest to topology.yaml"
)]
struct Args {
    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Relay directory URL.
    #[arg(long)]
    url: Option<String>,

    /// Topology file to (over)write.
    #[arg(long, short)]
    output: Option<String>,

    /// Number of relays written to the topology file.
    #[arg(long, short)]
    limit: Option<usize>,

    /// Per-relay connect timeout in ms.
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long)]
    skip_connectivity_check: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Auto)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Auto,
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_format);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = print_failure(&err, &mut io::stderr().lock());
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

// Printed regardless of RUST_LOG so a failed run always says why.
fn print_failure<W: Write>(err: &Error, out: &mut W) -> io::Result<()> {
    if matches!(err, Error::NoConnectivity { .. }) {
        writeln!(out, "No Internet access, please try again.")?;
    }
    writeln!(out, "[!!] {}", err)
}

fn run(args: Args) -> Result<(), Error> {
    let cfg = build_config(args)?;

    println!("TopoSorter running");
    println!("  source:  {}", cfg.source_url);
    println!("  output:  {}", cfg.output_path().display());
    println!("  keep:    {}", cfg.limit);
    println!("  timeout: {}ms", cfg.probe_timeout_ms);

    let source = HttpSource::new(cfg.fetch_timeout())?;
    let prober = TcpProber::new(cfg.probe_timeout());
    let mut stdout = io::stdout().lock();

    let summary = Pipeline::new(&cfg, source, prober).run(&mut stdout)?;

    println!(
        "Wrote {} of {} relays to {}",
        summary.written,
        summary.ranked.len(),
        summary.output_path.display()
    );
    Ok(())
}

fn build_config(args: Args) -> Result<Config, Error> {
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(url) = args.url {
        cfg.source_url = url;
    }
    if let Some(output) = args.output {
        cfg.output_path = output;
    }
    if let Some(limit) = args.limit {
        cfg.limit = limit;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        cfg.probe_timeout_ms = timeout_ms;
    }
    if args.skip_connectivity_check {
        cfg.check_connectivity = false;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = match format {
        LogFormat::Json => true,
        LogFormat::Text => false,
        LogFormat::Auto => !io::stderr().is_terminal(),
    };

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true).with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(io::stderr))
            .init();
    }
}
