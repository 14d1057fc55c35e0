//! gwt-sim: inspect GWT economic curves and simulate settlements.
//!
//! Sweeps the mining curve and capacity-growth ratio, scores data items,
//! prints level/income tables, steps the network reward rate and runs
//! withdrawal scenarios loaded from TOML or JSON files.

mod config;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gwt_core::constants::{GIB, MIB};
use gwt_core::types::{Ledger, Settlement};
use gwt_reward::history::SnapshotHistory;
use gwt_reward::mining::{mine_curve, ratio_sweep};
use gwt_reward::rate::calc_reward_rate;
use gwt_reward::settlement::SettlementEngine;
use gwt_score::{
    INCOME_TABLE, LEVEL_TABLE, basic_rate, basic_score, composite_score, level_rows, rate_by_size,
};
use serde::Serialize;
use tracing::{error, info};

use crate::config::{Scenario, SimConfig};

/// Experience values of a 1 MB file shown on ETH one to six times.
const DEFAULT_LEVEL_PROBES: [u64; 6] = [9, 17, 25, 33, 41, 49];

#[derive(Parser, Debug)]
#[command(name = "gwt-sim", version, about = "GWT economic model simulator")]
struct Cli {
    /// Config file (default: <config_dir>/gwt/sim.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json"); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample mine_gwt over a range of growth ratios.
    MineCurve {
        #[arg(long, default_value_t = 0.1)]
        step: f64,
        #[arg(long, default_value_t = 10.0)]
        until: f64,
    },
    /// Grow network capacity step by step and print the mining ratio.
    RatioSweep {
        #[arg(long, default_value_t = MIB)]
        start: u64,
        #[arg(long, default_value_t = MIB)]
        step: u64,
        #[arg(long, default_value_t = GIB)]
        until: u64,
    },
    /// Score a data item by size and data point count.
    Score {
        /// Data size in bytes
        #[arg(long)]
        size: u64,
        #[arg(long, default_value_t = 0)]
        points: u64,
    },
    /// Map experience values to level and daily income.
    Levels {
        /// Experience values (comma-separated)
        #[arg(long, value_delimiter = ',')]
        exp: Vec<u64>,
        /// Print the whole level table instead
        #[arg(long)]
        table: bool,
    },
    /// Step the network reward rate between two capacity readings.
    Rate {
        #[arg(long)]
        last_size: u64,
        #[arg(long)]
        size: u64,
        #[arg(long)]
        last_rate: f64,
    },
    /// Run a withdrawal scenario file.
    Withdraw {
        #[arg(long)]
        scenario: PathBuf,
    },
}

#[derive(Serialize)]
struct ScoreReport {
    size: u64,
    points: u64,
    basic_score: f64,
    basic_rate: f64,
    composite_score: f64,
    size_rate: f64,
}

#[derive(Serialize)]
struct LevelProbe {
    exp: u64,
    level: u32,
    daily_income: u64,
}

#[derive(Serialize)]
struct WithdrawReport {
    settlement: Settlement,
    ledger: Ledger,
    last_withdraw: u64,
}

fn main() {
    let cli = Cli::parse();

    let mut cfg = match SimConfig::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    };
    if let Some(level) = cli.log_level.clone() {
        cfg.log_level = level;
    }
    if let Some(format) = cli.log_format.clone() {
        cfg.log_format = format;
    }
    init_logging(&cfg.log_level, &cfg.log_format);

    if let Err(e) = run(cli, &cfg) {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli, cfg: &SimConfig) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::MineCurve { step, until } => {
            let samples = mine_curve(step, until)?;
            if json {
                return print_json(&samples);
            }
            for s in samples {
                println!("{:>8.3}  {:.6}", s.x, s.value);
            }
        }
        Commands::RatioSweep { start, step, until } => {
            let samples = ratio_sweep(start, step, until)?;
            if json {
                return print_json(&samples);
            }
            for s in samples {
                println!("{:>14} -> {:>14}  {:.6}", s.last_size, s.this_size, s.ratio);
            }
        }
        Commands::Score { size, points } => {
            let report = ScoreReport {
                size,
                points,
                basic_score: basic_score(size),
                basic_rate: basic_rate(points),
                composite_score: composite_score(size, points),
                size_rate: rate_by_size(size),
            };
            if json {
                return print_json(&report);
            }
            println!("basic score:     {:.4}", report.basic_score);
            println!("basic rate:      {:.4}", report.basic_rate);
            println!("composite score: {:.4}", report.composite_score);
            println!("size multiplier: {:.4}", report.size_rate);
        }
        Commands::Levels { exp, table } => {
            if table {
                let rows = level_rows();
                if json {
                    return print_json(&rows);
                }
                for r in rows {
                    println!(
                        "level {:>2}  exp [{:>5}, {:>5})  income {:>6}",
                        r.level, r.min_exp, r.max_exp, r.daily_income
                    );
                }
                return Ok(());
            }
            let probes = if exp.is_empty() {
                DEFAULT_LEVEL_PROBES.to_vec()
            } else {
                exp
            };
            let mut out = Vec::with_capacity(probes.len());
            for e in probes {
                let level = LEVEL_TABLE
                    .level_for_exp(e)
                    .with_context(|| format!("cannot place exp {e}"))?;
                out.push(LevelProbe {
                    exp: e,
                    level,
                    daily_income: INCOME_TABLE.income_for_level(level),
                });
            }
            if json {
                return print_json(&out);
            }
            for p in out {
                println!("exp {:>6}  level {:>2}  income {:>6}", p.exp, p.level, p.daily_income);
            }
        }
        Commands::Rate {
            last_size,
            size,
            last_rate,
        } => {
            let carve = cfg.carve.build()?;
            let update = calc_reward_rate(last_size, size, last_rate, carve.as_ref())?;
            if json {
                return print_json(&update);
            }
            println!(
                "{:?}: {:.6} -> {:.6} (change {:.6})",
                update.branch, last_rate, update.rate, update.change
            );
        }
        Commands::Withdraw { scenario } => {
            let sc = Scenario::load(&scenario)?;
            info!(path = %scenario.display(), snapshots = sc.snapshots.len(), "scenario loaded");
            let carve = sc.carve.unwrap_or(cfg.carve).build()?;
            let history = SnapshotHistory::from_snapshots(sc.snapshots)?;
            let engine = SettlementEngine::new(history, carve);

            let mut usage = sc.usage;
            let mut ledger = sc.ledger;
            let settlement = engine.withdraw(&sc.order, &mut usage, sc.now, &mut ledger)?;
            let report = WithdrawReport {
                settlement,
                ledger,
                last_withdraw: usage.last_withdraw,
            };
            if json {
                return print_json(&report);
            }
            let s = &report.settlement;
            println!("elapsed:        {}", s.elapsed);
            println!("income:         {:.6}", s.income);
            println!("reward rate:    {:.6} -> {:.6}", s.start_reward_rate, s.end_reward_rate);
            println!("reward:         {:.6}", s.reward);
            println!("  daemon:       {:.6}", s.daemon_reward);
            println!("  supply:       {:.6}", s.supply_reward);
            println!("  system:       {:.6}", s.system_income);
            println!(
                "balances:       system {:.6}  daemon {:.6}  supply {:.6}",
                report.ledger.system, report.ledger.daemon, report.ledger.supply
            );
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so JSON results on stdout stay machine-readable.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
