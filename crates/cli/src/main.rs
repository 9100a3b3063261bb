//! Command Line Interface for the lump sum vs DCA backtester.
mod output;

use anyhow::{Context, Result, bail};
use chrono::{Local, Months, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use lsdca_data::{CachedProvider, JsonFileProvider, MarketDataProvider};
use lsdca_domain::entities::PriceSeries;
use lsdca_domain::enums::ContributionTiming;
use lsdca_domain::tax::TaxSchedule;
use lsdca_domain::value_objects::percentage::Percentage;
use lsdca_domain::value_objects::simulation_result::SimulationResult;
use lsdca_simulation::comparison::compare;
use lsdca_simulation::horizon::HorizonWindow;
use lsdca_simulation::price_path::{DAILY_TIME_STEP, GeometricBrownianMotion, generate_series};
use lsdca_simulation::state::{SimulationConfig, TRADING_DAYS_PER_YEAR};
use lsdca_simulation::strategies::CashFlowModel;
use lsdca_simulation::strategy_simulator::simulate;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lsdca")]
#[command(about = "Lump sum vs dollar-cost averaging backtester", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lump sum and DCA on the same prices and compare them
    Compare {
        #[command(flatten)]
        market: MarketArgs,
        #[command(flatten)]
        costs: CostArgs,
        #[command(flatten)]
        tax: TaxArgs,
        #[command(flatten)]
        dca: DcaArgs,
        /// Capital to invest
        #[arg(long, default_value = "10000")]
        capital: Decimal,
    },
    /// Invest everything on the first day
    LumpSum {
        #[command(flatten)]
        market: MarketArgs,
        #[command(flatten)]
        costs: CostArgs,
        #[command(flatten)]
        tax: TaxArgs,
        /// Capital to invest
        #[arg(long, default_value = "10000")]
        capital: Decimal,
    },
    /// Invest in monthly installments
    Dca {
        #[command(flatten)]
        market: MarketArgs,
        #[command(flatten)]
        costs: CostArgs,
        #[command(flatten)]
        tax: TaxArgs,
        #[command(flatten)]
        dca: DcaArgs,
        /// Capital to invest across all installments
        #[arg(long, default_value = "10000")]
        capital: Decimal,
    },
    /// Show the capital-gains tax owed on a gain
    Tax {
        /// Realized gain
        gain: Decimal,
        #[command(flatten)]
        tax: TaxArgs,
    },
}

#[derive(Args)]
struct MarketArgs {
    /// Directory with one `<SYMBOL>.json` price file per symbol
    #[arg(long, env = "LSDCA_PRICES")]
    prices: Option<PathBuf>,

    /// Ticker symbol
    #[arg(short, long, env = "LSDCA_SYMBOL", default_value = "SPY")]
    symbol: String,

    /// First date of the backtest (defaults to `horizon` years ago)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Investment horizon in years
    #[arg(long, default_value_t = 5)]
    horizon: u32,

    /// Use a simulated price path instead of a price file
    #[arg(long)]
    synthetic: bool,

    /// Annualized drift of the simulated path
    #[arg(long, default_value_t = 0.07)]
    drift: f64,

    /// Annualized volatility of the simulated path
    #[arg(long, default_value_t = 0.18)]
    volatility: f64,

    /// Seed for a reproducible simulated path
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct CostArgs {
    /// Commission per transaction, in percent
    #[arg(long, default_value = "0.10")]
    commission: Decimal,

    /// Slippage per transaction, in percent
    #[arg(long, default_value = "0.05")]
    slippage: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TaxRegime {
    /// Five brackets with a 28% top rate
    Current,
    /// Four brackets with a 27% top rate
    Legacy,
}

#[derive(Args)]
struct TaxArgs {
    /// Bracket schedule applied to the gain and to idle-cash interest
    #[arg(long, value_enum, default_value_t = TaxRegime::Current)]
    tax_schedule: TaxRegime,

    /// Tax everything at a single rate, in percent, instead of brackets
    #[arg(long)]
    flat_tax: Option<Decimal>,
}

impl TaxArgs {
    fn schedule(&self) -> Result<TaxSchedule> {
        if let Some(rate) = self.flat_tax {
            return TaxSchedule::flat(Percentage::from_percent(rate)).context("invalid --flat-tax");
        }
        Ok(match self.tax_schedule {
            TaxRegime::Current => TaxSchedule::spain_savings(),
            TaxRegime::Legacy => TaxSchedule::spain_savings_legacy(),
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DcaModel {
    /// Capital available upfront; idle cash earns the risk-free rate
    Funded,
    /// Capital arrives as monthly contributions
    Contributory,
}

#[derive(Args)]
struct DcaArgs {
    /// Number of monthly installments
    #[arg(long, default_value_t = 12)]
    installments: u32,

    /// Annual risk-free rate on idle cash, in percent
    #[arg(long, default_value = "2.0")]
    risk_free_rate: Decimal,

    /// Buy on the last trading day of each month
    #[arg(long)]
    month_end: bool,

    /// DCA cash-flow model
    #[arg(long, value_enum, default_value_t = DcaModel::Funded)]
    model: DcaModel,
}

impl DcaArgs {
    fn cash_flow_model(&self, capital: Decimal) -> Result<CashFlowModel> {
        if self.installments == 0 {
            bail!("--installments must be at least 1");
        }
        Ok(match self.model {
            DcaModel::Funded => CashFlowModel::dca_funded(
                capital,
                self.installments,
                self.risk_free_rate / Decimal::ONE_HUNDRED,
            ),
            DcaModel::Contributory => CashFlowModel::dca_contributory(
                capital / Decimal::from(self.installments),
                self.installments,
            ),
        })
    }

    fn timing(&self) -> ContributionTiming {
        if self.month_end {
            ContributionTiming::MonthEnd
        } else {
            ContributionTiming::MonthStart
        }
    }
}

impl MarketArgs {
    fn start_date(&self) -> NaiveDate {
        self.start.unwrap_or_else(|| {
            let today = Local::now().date_naive();
            today
                .checked_sub_months(Months::new(12 * self.horizon))
                .unwrap_or(today)
        })
    }

    /// Loads (or generates) prices and trims them to the horizon.
    async fn load(&self) -> Result<PriceSeries> {
        let start = self.start_date();
        let series = match (&self.prices, self.synthetic) {
            (Some(dir), false) => {
                println!("📡 Loading {} from {}...", self.symbol, dir.display());
                let provider = CachedProvider::new(JsonFileProvider::new(dir));
                provider
                    .price_history(&self.symbol, start)
                    .await
                    .with_context(|| format!("loading prices for {}", self.symbol))?
            }
            _ => {
                println!(
                    "🎲 Simulating {} years of prices (drift {}, volatility {})...",
                    self.horizon, self.drift, self.volatility
                );
                let mut gbm = GeometricBrownianMotion::new(
                    Decimal::ONE_HUNDRED,
                    self.drift,
                    self.volatility,
                    DAILY_TIME_STEP,
                );
                if let Some(seed) = self.seed {
                    gbm = gbm.with_seed(seed);
                }
                let steps = self.horizon as usize * TRADING_DAYS_PER_YEAR;
                generate_series(&mut gbm, start, steps).context("generating price path")?
            }
        };

        let (trimmed, report) = HorizonWindow::new(self.horizon).apply(&series);
        output::print_horizon(self.horizon, &report);
        info!(points = trimmed.len(), "prices ready");
        Ok(trimmed)
    }
}

impl CostArgs {
    fn config(&self, tax: &TaxArgs) -> Result<SimulationConfig> {
        Ok(SimulationConfig::default()
            .with_cost_percentages(self.commission, self.slippage)
            .context("invalid transaction costs")?
            .with_tax_schedule(tax.schedule()?))
    }
}

fn run(prices: &PriceSeries, model: &CashFlowModel, config: &SimulationConfig) -> Result<SimulationResult> {
    let result = simulate(prices, model, config).context("simulation failed")?;
    output::print_result(&result);
    Ok(result)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Compare {
            market,
            costs,
            tax,
            dca,
            capital,
        } => {
            let prices = market.load().await?;
            let config = costs.config(tax)?.with_timing(dca.timing());
            let lump = run(&prices, &CashFlowModel::lump_sum(*capital), &config)?;
            let averaged = run(&prices, &dca.cash_flow_model(*capital)?, &config)?;
            output::print_comparison(&compare(&lump, &averaged));
        }
        Commands::LumpSum {
            market,
            costs,
            tax,
            capital,
        } => {
            let prices = market.load().await?;
            run(&prices, &CashFlowModel::lump_sum(*capital), &costs.config(tax)?)?;
        }
        Commands::Dca {
            market,
            costs,
            tax,
            dca,
            capital,
        } => {
            let prices = market.load().await?;
            let config = costs.config(tax)?.with_timing(dca.timing());
            run(&prices, &dca.cash_flow_model(*capital)?, &config)?;
        }
        Commands::Tax { gain, tax } => {
            output::print_tax(&tax.schedule()?.assess(*gain));
        }
    }

    Ok(())
}
