// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use supply_chain_analytics::analysis::Report;
use supply_chain_analytics::forecast::{forecast_demand, forecaster_for, ForecastMethod};
use supply_chain_analytics::io::{load_dataset, write_report, write_table};
use supply_chain_analytics::{logging, AnalyticsConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sca")]
#[command(about = "Supply-chain analytics over a CSV snapshot")]
#[command(version)]
struct Args {
    /// JSON file with analysis options; missing keys keep their defaults
    #[arg(short, long, env = "SCA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every analysis and export one CSV per result table
    Report {
        /// Directory holding the input tables
        #[arg(long)]
        data_dir: PathBuf,

        /// Where result CSVs are written
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,
    },
    /// Forecast daily demand for one product
    Forecast {
        #[arg(long)]
        data_dir: PathBuf,

        #[arg(long)]
        product_id: u32,

        /// Only use sales shipped from this warehouse
        #[arg(long)]
        warehouse_id: Option<u32>,

        #[arg(long, value_enum, default_value_t = MethodArg::MovingAverage)]
        method: MethodArg,

        /// Write the forecast here instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MethodArg {
    MovingAverage,
    ExponentialSmoothing,
}

impl From<MethodArg> for ForecastMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::MovingAverage => ForecastMethod::MovingAverage,
            MethodArg::ExponentialSmoothing => ForecastMethod::ExponentialSmoothing,
        }
    }
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    // 1. SETUP CONFIGURATION
    let config = match &args.config {
        Some(path) => AnalyticsConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };

    match args.command {
        Command::Report { data_dir, out_dir } => run_report(&config, data_dir, out_dir),
        Command::Forecast {
            data_dir,
            product_id,
            warehouse_id,
            method,
            out,
        } => run_forecast(&config, data_dir, product_id, warehouse_id, method.into(), out),
    }
}

fn run_report(config: &AnalyticsConfig, data_dir: PathBuf, out_dir: PathBuf) -> Result<()> {
    // 2. LOAD SNAPSHOT
    let dataset = load_dataset(&data_dir)
        .with_context(|| format!("loading tables from {}", data_dir.display()))?;

    // 3. RUN ANALYSES
    let report = Report::build(&dataset, config).context("running analyses")?;

    // 4. EXPORT RESULTS
    let written = write_report(&out_dir, &report)
        .with_context(|| format!("writing results to {}", out_dir.display()))?;
    info!(files = written.len(), out_dir = %out_dir.display(), "results exported");

    // 5. PRINT SUMMARY
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &Report) {
    println!("\n=== ABC Classification ===");
    for class in &report.abc_summary {
        println!(
            "{}: {} products, ${:.2} revenue",
            class.abc_class, class.product_count, class.total_revenue
        );
    }

    println!("\n=== Top Suppliers ===");
    for supplier in report.top_suppliers(10) {
        println!(
            "{} {}: {:.1} ({})",
            supplier.supplier_code, supplier.supplier_name, supplier.reliability_score, supplier.tier
        );
    }

    println!("\n=== Stockout Root Causes ===");
    for cause in &report.root_causes {
        println!(
            "{}: {} events ({:.1}%), ${:.2} lost",
            cause.root_cause, cause.occurrence_count, cause.pct_of_stockouts, cause.total_lost_revenue
        );
    }

    println!("\n=== Carrying Cost ===");
    for warehouse in &report.carrying_by_warehouse {
        println!("{}: ${:.2}/year", warehouse.warehouse_code, warehouse.total_carrying_cost);
    }
    let total: f64 = report
        .carrying_by_warehouse
        .iter()
        .map(|w| w.total_carrying_cost)
        .sum();
    println!("Total Carrying Cost: ${:.2}", total);
}

fn run_forecast(
    config: &AnalyticsConfig,
    data_dir: PathBuf,
    product_id: u32,
    warehouse_id: Option<u32>,
    method: ForecastMethod,
    out: Option<PathBuf>,
) -> Result<()> {
    // 2. LOAD SNAPSHOT
    let dataset = load_dataset(&data_dir)
        .with_context(|| format!("loading tables from {}", data_dir.display()))?;

    // 3. FORECAST
    let forecaster = forecaster_for(method, &config.forecast)?;
    let rows = forecast_demand(
        &dataset,
        product_id,
        warehouse_id,
        forecaster.as_ref(),
        config.forecast.forecast_days,
    )
    .with_context(|| format!("forecasting product {product_id}"))?;

    if rows.is_empty() {
        println!("Product {product_id} has no sales history; nothing to forecast.");
        return Ok(());
    }

    // 4. EXPORT OR PRINT
    match out {
        Some(path) => write_table(&path, "forecast", &rows)
            .with_context(|| format!("writing forecast to {}", path.display()))?,
        None => {
            println!("\n=== {} Forecast: product {} ===", method, product_id);
            for row in &rows {
                println!("{}: {}", row.date, row.forecasted_quantity);
            }
        }
    }
    Ok(())
}
