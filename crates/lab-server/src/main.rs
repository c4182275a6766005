mod config;
mod report;
mod wiring;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use core_sim::{
    AgentConfig, RngSource, SeededSource, StrategyFocus, TradingHorizon, DEFAULT_CAPITAL,
    DEFAULT_DRAWDOWN_TARGET, DEFAULT_LEVERAGE, DEFAULT_RISK_LEVEL,
};
use runtime::{export::EquityCsvWriter, simulate, SimulationResult};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "lab-server")]
#[command(about = "Stochastic trading-agent performance lab")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard and simulation API (default).
    Serve,
    /// Run one simulation and print the result.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[arg(long, default_value_t = DEFAULT_CAPITAL)]
    capital: f64,

    /// Risk appetite, 1 to 100.
    #[arg(long, default_value_t = DEFAULT_RISK_LEVEL)]
    risk_level: u32,

    /// Drawdown target in percent.
    #[arg(long, default_value_t = DEFAULT_DRAWDOWN_TARGET)]
    drawdown_target: f64,

    #[arg(long, default_value_t = DEFAULT_LEVERAGE)]
    leverage: u32,

    #[arg(long, default_value_t = TradingHorizon::Swing)]
    horizon: TradingHorizon,

    #[arg(long, default_value_t = StrategyFocus::Trend)]
    strategy_focus: StrategyFocus,

    /// Active pairs, comma separated. Defaults to EUR/USD,USD/JPY,GBP/USD.
    #[arg(long = "pairs", value_delimiter = ',')]
    pairs: Option<Vec<String>>,

    /// Seed for a reproducible run; OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,

    /// Write the equity curve as CSV. Relative paths land under LAB_EXPORT_DIR.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl SimulateArgs {
    fn agent_config(&self) -> AgentConfig {
        let defaults = AgentConfig::default();
        AgentConfig {
            capital: self.capital,
            risk_level: self.risk_level,
            drawdown_target: self.drawdown_target,
            leverage: self.leverage,
            horizon: self.horizon,
            strategy_focus: self.strategy_focus,
            pairs: self.pairs.clone().unwrap_or(defaults.pairs),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::Config::from_env()?;
    runtime::logging::init_tracing(&config.log_filter)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Simulate(args) => run_simulate(&config, &args),
    }
}

async fn serve(config: &config::Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "lab server listening");

    axum::serve(listener, wiring::build_app()).await?;
    Ok(())
}

fn run_simulate(config: &config::Config, args: &SimulateArgs) -> anyhow::Result<()> {
    let agent = args.agent_config();
    let result = match args.seed {
        Some(seed) => simulate(&agent, &mut SeededSource::new(seed))?,
        None => simulate(&agent, &mut RngSource::from_entropy())?,
    };

    if let Some(csv) = &args.csv {
        let path = resolve_export_path(&config.export_dir, csv);
        export_equity_csv(&path, &result)
            .with_context(|| format!("writing equity curve to {}", path.display()))?;
        info!(path = %path.display(), "exported equity curve");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_report(&result, args.seed));
    }
    Ok(())
}

fn resolve_export_path(export_dir: &Path, requested: &Path) -> PathBuf {
    if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        export_dir.join(requested)
    }
}

fn export_equity_csv(path: &Path, result: &SimulationResult) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = EquityCsvWriter::new(BufWriter::new(File::create(path)?));
    writer.write_curve(&result.equity_curve)
}
