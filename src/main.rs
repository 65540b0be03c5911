//! Advisory Projections CLI
//!
//! Runs any of the four calculators from the command line, prints a summary
//! (or a JSON report with `--json`), and optionally writes the time series to CSV.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use advisory_projections::assumptions::{
    AssumptionSet, ClaimsScenario, DefinedBenefitAssumptions, EmployeeLoad, LeverageAssumptions,
    MasterAssumptions, Preset, ReserveAssumptions, RetentionAssumptions, StrategyFunding,
    TaxStatus, TeamSize,
};
use advisory_projections::projection::{
    calculate, CalculationRequest, CalculationResult, DefinedBenefitResult, MasterResult,
    ReserveResult, RetentionResult, TimeSeries, ValueBand,
};
use advisory_projections::report::{
    format_currency, format_multiplier, format_percent, write_series_file, CalculationReport,
};
use advisory_projections::ScenarioRunner;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "advisory-projections")]
#[command(about = "Retirement and tax-efficiency projection calculators")]
struct Cli {
    /// Print a JSON report instead of the text summary
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Write the result's time series to this CSV file
    #[arg(long, global = true)]
    series_csv: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Defined Benefit plan accelerator
    Db {
        #[arg(long)]
        age: f64,
        #[arg(long)]
        income: f64,
        /// Target annual contribution
        #[arg(long)]
        target: f64,
        /// Tax rate in percent
        #[arg(long)]
        tax_rate: f64,
        #[arg(long, default_value_t = 10)]
        years: u32,
        /// Annual return in percent
        #[arg(long)]
        return_rate: f64,
        #[arg(long, value_enum, default_value_t = TeamSizeCli::Solo)]
        team: TeamSizeCli,
        #[arg(long, value_enum, default_value_t = EmployeeLoadCli::Medium)]
        load: EmployeeLoadCli,
    },
    /// 831(b) captive reserve calculator
    Reserve {
        #[arg(long)]
        premium: f64,
        #[arg(long)]
        admin: f64,
        /// Reserve return in percent
        #[arg(long)]
        return_rate: f64,
        #[arg(long, default_value_t = 10)]
        years: u32,
        #[arg(long, value_enum, default_value_t = ClaimsCli::None)]
        claims: ClaimsCli,
        /// Tax rate in percent
        #[arg(long)]
        tax_rate: f64,
        /// Monthly practice overhead
        #[arg(long)]
        overhead: f64,
        /// Deductible share of premium in percent
        #[arg(long, default_value_t = 100.0)]
        deductible: f64,
    },
    /// SERP retention ROI, optionally with policy-loan leverage
    Serp {
        #[arg(long)]
        comp: f64,
        #[arg(long)]
        replacement: f64,
        #[arg(long)]
        profit_risk: f64,
        #[arg(long)]
        funding: f64,
        #[arg(long)]
        vesting: u32,
        /// Departure probability reduction in percent
        #[arg(long)]
        departure: f64,
        /// Enable the leverage overlay with this cash value
        #[arg(long)]
        cash_value: Option<f64>,
        /// Loan rate in percent
        #[arg(long, default_value_t = 5.0)]
        loan_rate: f64,
        /// Policy drag in percent
        #[arg(long, default_value_t = 0.0)]
        policy_drag: f64,
        /// Expected return on borrowed capital in percent
        #[arg(long, default_value_t = 8.0)]
        expected_return: f64,
        #[arg(long, default_value_t = false)]
        taxable: bool,
        #[arg(long, default_value_t = 1)]
        loan_start: u32,
        #[arg(long, default_value_t = 10)]
        leverage_years: u32,
    },
    /// Composite dashboard, starting from a preset
    Master {
        #[arg(long, value_enum, default_value_t = PresetCli::Base)]
        preset: PresetCli,
        #[arg(long)]
        sde: Option<f64>,
        /// Tax rate in percent
        #[arg(long)]
        tax_rate: Option<f64>,
        #[arg(long)]
        years: Option<u32>,
        /// Expected return in percent
        #[arg(long)]
        expected_return: Option<f64>,
        #[arg(long)]
        exit_multiple: Option<f64>,
        #[arg(long)]
        reinvest_eff: Option<f64>,
        #[arg(long)]
        db_contrib: Option<f64>,
        #[arg(long)]
        captive_premium: Option<f64>,
        #[arg(long)]
        serp_funding: Option<f64>,
        #[arg(long, default_value_t = false)]
        no_db: bool,
        #[arg(long, default_value_t = false)]
        no_captive: bool,
        #[arg(long, default_value_t = false)]
        no_serp: bool,
        #[arg(long, default_value_t = 0.0)]
        advisory_fee: f64,
        #[arg(long, default_value_t = 0.0)]
        setup_cost: f64,
        #[arg(long, default_value_t = 0.0)]
        third_party: f64,
    },
    /// Run every preset, built-in or from a CSV file
    Presets {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Re-run a preset across expected returns (percent, comma separated)
    Sweep {
        #[arg(long, default_value = "base")]
        preset: String,
        #[arg(long, value_delimiter = ',', default_values_t = vec![4.0, 6.0, 8.0, 10.0, 12.0])]
        returns: Vec<f64>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Run a JSON calculation request from a file, or stdin with "-"
    Run {
        request: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TeamSizeCli {
    Solo,
    Small,
    Larger,
}

impl From<TeamSizeCli> for TeamSize {
    fn from(value: TeamSizeCli) -> Self {
        match value {
            TeamSizeCli::Solo => TeamSize::Solo,
            TeamSizeCli::Small => TeamSize::Small,
            TeamSizeCli::Larger => TeamSize::Larger,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EmployeeLoadCli {
    Low,
    Medium,
    High,
}

impl From<EmployeeLoadCli> for EmployeeLoad {
    fn from(value: EmployeeLoadCli) -> Self {
        match value {
            EmployeeLoadCli::Low => EmployeeLoad::Low,
            EmployeeLoadCli::Medium => EmployeeLoad::Medium,
            EmployeeLoadCli::High => EmployeeLoad::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ClaimsCli {
    None,
    Low,
    Medium,
}

impl From<ClaimsCli> for ClaimsScenario {
    fn from(value: ClaimsCli) -> Self {
        match value {
            ClaimsCli::None => ClaimsScenario::None,
            ClaimsCli::Low => ClaimsScenario::Low,
            ClaimsCli::Medium => ClaimsScenario::Medium,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetCli {
    Conservative,
    Base,
    Strong,
}

impl From<PresetCli> for Preset {
    fn from(value: PresetCli) -> Self {
        match value {
            PresetCli::Conservative => Preset::Conservative,
            PresetCli::Base => Preset::Base,
            PresetCli::Strong => Preset::Strong,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Db { age, income, target, tax_rate, years, return_rate, team, load } => {
            let set = AssumptionSet::DefinedBenefit(DefinedBenefitAssumptions {
                age,
                income,
                target_contribution: target,
                tax_rate: tax_rate / 100.0,
                horizon_years: years,
                return_rate: return_rate / 100.0,
                team_size: team.into(),
                employee_load: load.into(),
            });
            emit(calculate(&set)?, cli.json, cli.series_csv)
        }
        Commands::Reserve { premium, admin, return_rate, years, claims, tax_rate, overhead, deductible } => {
            let set = AssumptionSet::Reserve(ReserveAssumptions {
                premium,
                admin_cost: admin,
                return_rate: return_rate / 100.0,
                horizon_years: years,
                claims: claims.into(),
                tax_rate: tax_rate / 100.0,
                monthly_overhead: overhead,
                deductible_fraction: deductible / 100.0,
            });
            emit(calculate(&set)?, cli.json, cli.series_csv)
        }
        Commands::Serp {
            comp, replacement, profit_risk, funding, vesting, departure,
            cash_value, loan_rate, policy_drag, expected_return, taxable, loan_start, leverage_years,
        } => {
            let leverage = cash_value.map(|cash_value| LeverageAssumptions {
                cash_value,
                loan_rate: loan_rate / 100.0,
                policy_drag: policy_drag / 100.0,
                expected_return: expected_return / 100.0,
                tax_status: if taxable { TaxStatus::Taxable } else { TaxStatus::TaxFree },
                loan_start_year: loan_start,
                horizon_years: leverage_years,
            });
            let set = AssumptionSet::Retention(RetentionAssumptions {
                compensation: comp,
                replacement_multiple: replacement,
                profit_at_risk: profit_risk,
                annual_funding: funding,
                vesting_years: vesting,
                departure_reduction: departure / 100.0,
                leverage,
            });
            emit(calculate(&set)?, cli.json, cli.series_csv)
        }
        Commands::Master {
            preset, sde, tax_rate, years, expected_return, exit_multiple, reinvest_eff,
            db_contrib, captive_premium, serp_funding, no_db, no_captive, no_serp,
            advisory_fee, setup_cost, third_party,
        } => {
            let base = Preset::from(preset).assumptions();
            let toggle = |current: StrategyFunding, amount: Option<f64>, off: bool| StrategyFunding {
                enabled: !off,
                amount: amount.unwrap_or(current.amount),
            };
            let assumptions = MasterAssumptions {
                sde: sde.unwrap_or(base.sde),
                tax_rate: tax_rate.map(|t| t / 100.0).unwrap_or(base.tax_rate),
                horizon_years: years.unwrap_or(base.horizon_years),
                expected_return: expected_return.map(|r| r / 100.0).unwrap_or(base.expected_return),
                exit_multiple: exit_multiple.unwrap_or(base.exit_multiple),
                reinvestment_efficiency: reinvest_eff.unwrap_or(base.reinvestment_efficiency),
                db_contribution: toggle(base.db_contribution, db_contrib, no_db),
                captive_premium: toggle(base.captive_premium, captive_premium, no_captive),
                serp_funding: toggle(base.serp_funding, serp_funding, no_serp),
                advisory_fee,
                setup_cost,
                third_party_cost: third_party,
            };
            emit(calculate(&AssumptionSet::Master(assumptions))?, cli.json, cli.series_csv)
        }
        Commands::Presets { file } => {
            let runner = load_runner(file)?;
            let results = runner.run_all();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{:<16} {:>16} {:>16} {:>10}", "Preset", "Tax Saved", "Net Value", "Multiple");
                println!("{}", "-".repeat(61));
                for (name, r) in &results {
                    println!(
                        "{:<16} {:>16} {:>16} {:>10}",
                        name,
                        format_currency(r.total_tax_savings, 0),
                        format_currency(r.net_value_created, 0),
                        format_multiplier(r.multiplier, 1),
                    );
                }
            }
            Ok(())
        }
        Commands::Sweep { preset, returns, file } => {
            let runner = load_runner(file)?;
            let rates: Vec<f64> = returns.iter().map(|r| r / 100.0).collect();
            let results = runner.sweep_returns(&preset, &rates)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{:>8} {:>16} {:>16} {:>10}", "Return", "Retirement", "Net Value", "Multiple");
                println!("{}", "-".repeat(53));
                for (rate, r) in returns.iter().zip(&results) {
                    println!(
                        "{:>8} {:>16} {:>16} {:>10}",
                        format_percent(*rate, 1),
                        format_currency(r.retirement_accumulation, 0),
                        format_currency(r.net_value_created, 0),
                        format_multiplier(r.multiplier, 1),
                    );
                }
            }
            Ok(())
        }
        Commands::Run { request } => {
            let body = read_request(&request)?;
            let request = CalculationRequest::from_json(&body)
                .with_context(|| format!("Invalid request in {}", request.display()))?;
            emit(calculate(&request.into_assumptions())?, cli.json, cli.series_csv)
        }
    }
}

fn load_runner(file: Option<PathBuf>) -> Result<ScenarioRunner> {
    match file {
        Some(path) => ScenarioRunner::from_csv_path(&path)
            .with_context(|| format!("Failed to load presets from {}", path.display())),
        None => Ok(ScenarioRunner::new()),
    }
}

fn read_request(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn emit(result: CalculationResult, json: bool, series_csv: Option<PathBuf>) -> Result<()> {
    if let Some(path) = &series_csv {
        write_series_file(path, &result.series())
            .with_context(|| format!("Failed to write series to {}", path.display()))?;
    }

    if json {
        println!("{}", CalculationReport::new(result).to_json_pretty()?);
        return Ok(());
    }

    match &result {
        CalculationResult::DefinedBenefit(r) => print_db(r),
        CalculationResult::Reserve(r) => print_reserve(r),
        CalculationResult::Retention(r) => print_retention(r),
        CalculationResult::Master(r) => print_master(r),
    }
    for series in result.series() {
        print_series(series);
    }
    if let Some(path) = series_csv {
        println!("\nSeries written to: {}", path.display());
    }
    Ok(())
}

fn band(b: &ValueBand) -> String {
    format!("{} - {}", format_currency(b.low, 0), format_currency(b.high, 0))
}

fn print_db(r: &DefinedBenefitResult) {
    println!("Defined Benefit Accelerator");
    println!("===========================");
    println!("  Contribution range:  {}", band(&r.contribution));
    println!("  Tax savings:         {}", band(&r.tax_savings));
    println!("  Net cost:            {}", band(&r.net_cost));
    println!("  Accumulation:        {}", format_currency(r.accumulation, 0));
    match &r.employee_cost {
        Some(cost) => println!("  Employee cost:       {}", band(cost)),
        None => println!("  Employee cost:       N/A (solo plan)"),
    }
    println!("  Total cost:          {}", band(&r.total_cost));
}

fn print_reserve(r: &ReserveResult) {
    println!("831(b) Reserve + Tax Efficiency");
    println!("===============================");
    println!("  Tax effect:          {}", format_currency(r.tax_effect, 0));
    println!("  Net reserve (yr 1):  {}", format_currency(r.net_reserve, 0));
    println!("  Reserve pool:        {}", format_currency(r.reserve_pool, 0));
    println!("  Shock coverage:      {}", r.shock_coverage.message());
}

fn print_retention(r: &RetentionResult) {
    println!("SERP Retention ROI");
    println!("==================");
    println!("  Cost of loss:        {}", format_currency(r.cost_of_loss, 0));
    println!("  Total investment:    {}", format_currency(r.total_investment, 0));
    println!("  Value protected:     {}", format_currency(r.value_protected, 0));
    println!("  Break-even:          {}", r.breakeven.message());
    println!(
        "  Continuity:          {} {}",
        "*".repeat(r.continuity.stars() as usize),
        r.continuity.label()
    );

    if let Some(l) = &r.leverage {
        println!("\n  Leverage strategy");
        println!("    Borrowed capital:  {}", format_currency(l.borrowed_capital, 0));
        println!("    Annual interest:   {}", format_currency(l.annual_interest, 0));
        println!("    Future value:      {}", format_currency(l.future_value, 0));
        println!("    Total interest:    {}", format_currency(l.total_interest, 0));
        println!("    Net gain:          {}", format_currency(l.net_gain, 0));
        println!("    Spread:            {}", format_percent(l.spread * 100.0, 1));
        println!("    Total value:       {}", format_currency(l.total_value_created, 0));
    }
}

fn print_master(r: &MasterResult) {
    println!("Master Dashboard");
    println!("================");
    println!("  Total tax savings:   {}", format_currency(r.total_tax_savings, 0));
    println!("  Retirement:          {}", format_currency(r.retirement_accumulation, 0));
    println!("  Reserves:            {}", format_currency(r.total_reserves, 0));
    println!("  Retention ROI:       {}", format_currency(r.retention_roi, 0));
    println!("  Exit uplift:         {}", format_currency(r.exit_uplift, 0));
    println!("  Total costs:         {}", format_currency(r.total_costs, 0));
    println!("  Net value created:   {}", format_currency(r.net_value_created, 0));
    println!("  WOW multiplier:      {}", format_multiplier(r.multiplier, 1));
}

fn print_series(series: &TimeSeries) {
    println!("\n  {}", series.label);
    for point in &series.points {
        println!("    Year {:>3}: {:>16}", point.year, format_currency(point.value, 0));
    }
}
