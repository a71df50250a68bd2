//! CLI definition and dispatch.

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_fund_adapter::CsvFundAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_session_adapter::JsonSessionAdapter;
use crate::adapters::memory_portfolio_store::MemoryPortfolioStore;
use crate::adapters::memory_user_store::{MemoryUserStore, DEMO_EMAIL, DEMO_PASSWORD};
use crate::domain::allocation::{AssetAllocation, CategoryAmounts};
use crate::domain::category::FundCategory;
use crate::domain::config_validation::{
    build_preset_table, load_profile, target_allocation, validate_bracket_overrides,
    validate_profile_config, validate_target_config, Profile,
};
use crate::domain::engine::{
    current_allocation, investment_by_salary, rebalancing_needed, rebalancing_recommendations,
};
use crate::domain::error::FundfolioError;
use crate::domain::fund::{group_by_category, Fund, NewFund};
use crate::domain::portfolio::Portfolio;
use crate::domain::presets::{age_on, PresetTable};
use crate::domain::user::User;
use crate::ports::portfolio_store::PortfolioStore;
use crate::ports::session_store::SessionStore;
use crate::ports::user_store::UserStore;

#[derive(Parser, Debug)]
#[command(name = "fundfolio", about = "Personal mutual-fund portfolio tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show target vs. current allocation and whether rebalancing is due
    Status {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show per-category amounts to buy or reduce to get back to target
    Rebalance {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Split a monthly investment amount from salary across the target
    Plan {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the salary from the config file
        #[arg(long)]
        salary: Option<f64>,
        /// Override the investment percentage from the config file
        #[arg(long)]
        percentage: Option<f64>,
    },
    /// Print the age-bracket allocation table
    Brackets {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Walk the seeded demo account through the full flow
    Demo {
        /// Where to persist the demo session
        #[arg(long)]
        session: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Status { config } => run_status(&config),
        Command::Rebalance { config } => run_rebalance(&config),
        Command::Plan {
            config,
            salary,
            percentage,
        } => run_plan(&config, salary, percentage),
        Command::Brackets { config } => run_brackets(config.as_ref()),
        Command::Demo { session } => run_demo(session),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| fail(&e))
}

fn fail(err: &FundfolioError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

/// Everything a portfolio command needs, loaded and validated.
struct Workspace {
    profile: Profile,
    table: PresetTable,
    portfolio: Portfolio,
}

fn load_workspace(config_path: &PathBuf) -> Result<Workspace, ExitCode> {
    let adapter = load_config(config_path)?;
    let now = Utc::now();
    let today = Local::now().date_naive();

    if let Err(e) = validate_profile_config(&adapter) {
        return Err(fail(&e));
    }
    if let Err(e) = validate_target_config(&adapter) {
        return Err(fail(&e));
    }

    if let Err(e) = validate_bracket_overrides(&adapter, &PresetTable::default()) {
        return Err(fail(&e));
    }

    let table = match build_preset_table(&adapter) {
        Ok(t) => t,
        Err(e) => return Err(fail(&e)),
    };

    let profile = match load_profile(&adapter, now) {
        Ok(p) => p,
        Err(e) => return Err(fail(&e)),
    };

    let (target, custom) = match target_allocation(&adapter, &profile, &table, today) {
        Ok(t) => t,
        Err(e) => return Err(fail(&e)),
    };

    let funds: Vec<Fund> = match &profile.funds_csv {
        Some(path) => {
            let csv_path = match config_path.parent() {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            };
            eprintln!("Loading holdings from {}", csv_path.display());
            match CsvFundAdapter::new(csv_path).load() {
                Ok(funds) => funds,
                Err(e) => return Err(fail(&e)),
            }
        }
        None => Vec::new(),
    };

    let portfolio = Portfolio {
        user_id: "local".to_string(),
        last_rebalanced: profile.last_rebalanced,
        salary: profile.salary,
        investment_percentage: profile.investment_percentage,
        custom_allocation: custom,
        allocation: target,
        funds,
    };

    Ok(Workspace {
        profile,
        table,
        portfolio,
    })
}

fn run_status(config_path: &PathBuf) -> ExitCode {
    let ws = match load_workspace(config_path) {
        Ok(ws) => ws,
        Err(code) => return code,
    };

    print_status(&ws.portfolio, &ws.table, Utc::now());
    ExitCode::SUCCESS
}

fn run_rebalance(config_path: &PathBuf) -> ExitCode {
    let ws = match load_workspace(config_path) {
        Ok(ws) => ws,
        Err(code) => return code,
    };

    print_recommendations(&ws.portfolio, &ws.table);
    ExitCode::SUCCESS
}

fn run_plan(config_path: &PathBuf, salary: Option<f64>, percentage: Option<f64>) -> ExitCode {
    let ws = match load_workspace(config_path) {
        Ok(ws) => ws,
        Err(code) => return code,
    };

    let salary = salary.unwrap_or(ws.profile.salary);
    let percentage = percentage.unwrap_or(ws.profile.investment_percentage);
    print_plan(salary, &ws.portfolio.allocation, percentage);
    ExitCode::SUCCESS
}

fn run_brackets(config_path: Option<&PathBuf>) -> ExitCode {
    let table = match config_path {
        Some(path) => {
            let adapter = match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            };
            match build_preset_table(&adapter) {
                Ok(t) => t,
                Err(e) => return fail(&e),
            }
        }
        None => PresetTable::default(),
    };

    println!("{:<10}{}", "Ages", header_row());
    for preset in table.presets() {
        print!("{:<10}", preset.range.to_string());
        for (_, pct) in preset.allocation.iter() {
            print!("{pct:>14}");
        }
        println!();
    }
    ExitCode::SUCCESS
}

fn run_demo(session_path: Option<PathBuf>) -> ExitCode {
    let now = Utc::now();
    let users = MemoryUserStore::with_demo_user(now);
    let portfolios = MemoryPortfolioStore::with_demo_portfolio(now);
    let table = PresetTable::default();

    eprintln!("Logging in as {DEMO_EMAIL}");
    let user = match users.authenticate(DEMO_EMAIL, DEMO_PASSWORD) {
        Ok(u) => u,
        Err(e) => return fail(&e),
    };

    let session = JsonSessionAdapter::new(
        session_path.unwrap_or_else(|| PathBuf::from(".fundfolio-session.json")),
    );
    if let Err(e) = session.save(&user) {
        return fail(&e);
    }
    match session.load() {
        Some(restored) => eprintln!("Session persisted for {}", restored.name),
        None => eprintln!("Session did not survive the round trip; continuing logged in"),
    }

    let portfolio = match portfolios.get(&user.id) {
        Some(p) => p,
        None => return fail(&FundfolioError::PortfolioNotFound),
    };

    println!("== Portfolio status ==");
    print_status(&portfolio, &table, now);
    println!();
    println!("== Rebalancing plan ==");
    print_recommendations(&portfolio, &table);
    println!();
    println!("== Monthly investment plan ==");
    print_plan(portfolio.salary, &portfolio.allocation, portfolio.investment_percentage);

    // Register a second user to show bracket seeding and fund CRUD.
    let dob = now.date_naive() - chrono::Duration::days(28 * 365 + 100);
    let jane = User::new("Jane Kumar", "jane@example.com", dob, "welcome");
    let jane = match users.create(jane) {
        Ok(u) => u,
        Err(e) => return fail(&e),
    };
    let seeded = match portfolios.create(&jane, &table, now) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };
    let jane_age = age_on(now.date_naive(), jane.date_of_birth);
    println!();
    println!(
        "Registered {} (age {jane_age}), target seeded from the {} bracket",
        jane.name,
        table.resolve_bracket(jane_age).range
    );
    print_target_row(&seeded.allocation);

    let fund = match portfolios.add_fund(
        &jane.id,
        NewFund {
            name: "SBI Gold Fund".to_string(),
            category: FundCategory::Gold,
            current_value: 5000.0,
            invested_amount: 5000.0,
        },
    ) {
        Ok(f) => f,
        Err(e) => return fail(&e),
    };
    eprintln!("Added fund {} ({})", fund.name, fund.id);
    if let Err(e) = portfolios.remove_fund(&jane.id, &fund.id) {
        return fail(&e);
    }
    eprintln!("Removed fund {}, portfolio back to empty", fund.name);

    if let Err(e) = session.clear() {
        return fail(&e);
    }
    eprintln!("Session cleared");
    ExitCode::SUCCESS
}

fn header_row() -> String {
    FundCategory::ALL
        .iter()
        .map(|c| format!("{:>14}", c.name()))
        .collect()
}

fn print_status(portfolio: &Portfolio, table: &PresetTable, now: DateTime<Utc>) {
    let current = current_allocation(&portfolio.funds, table);

    println!("{:<14}{:>10}{:>10}", "Category", "Target %", "Current %");
    for (category, target_pct) in portfolio.allocation.iter() {
        println!(
            "{:<14}{:>10}{:>10}",
            category.name(),
            target_pct,
            current.get(category)
        );
    }
    println!(
        "{:<14}{:>10}{:>10}",
        "Total",
        portfolio.allocation.total(),
        current.total()
    );

    if !portfolio.funds.is_empty() {
        println!();
        println!("Holdings:");
        for (category, funds) in group_by_category(&portfolio.funds) {
            if funds.is_empty() {
                continue;
            }
            println!("  {}", category.name());
            for fund in funds {
                println!(
                    "    {:<34}{:>12.2}{:>+12.2}",
                    fund.name,
                    fund.current_value,
                    fund.gain()
                );
            }
        }
    }

    println!();
    println!("Portfolio value: {:.2}", portfolio.total_value());
    println!("Amount invested: {:.2}", portfolio.total_invested());
    let needed = rebalancing_needed(portfolio, table, now);
    println!("Rebalancing needed: {}", if needed { "yes" } else { "no" });
}

fn print_recommendations(portfolio: &Portfolio, table: &PresetTable) {
    let recommendations = rebalancing_recommendations(portfolio, table);

    println!("{:<14}{:>14}", "Category", "Amount");
    for (category, amount) in recommendations.iter() {
        let action = if amount > 0.0 {
            "buy"
        } else if amount < 0.0 {
            "reduce"
        } else {
            "hold"
        };
        println!("{:<14}{:>14.2}  {}", category.name(), amount, action);
    }
}

fn print_plan(salary: f64, allocation: &AssetAllocation, percentage: f64) {
    let amounts: CategoryAmounts = investment_by_salary(salary, allocation, percentage);
    let investable = salary * (percentage / 100.0);
    println!("Investable amount: {investable:.2} ({percentage}% of salary {salary:.2})");
    println!("{:<14}{:>14}", "Category", "Amount");
    for (category, amount) in amounts.iter() {
        println!("{:<14}{:>14.2}", category.name(), amount);
    }
}

fn print_target_row(allocation: &AssetAllocation) {
    println!("{:<10}{}", "", header_row());
    print!("{:<10}", "Target");
    for (_, pct) in allocation.iter() {
        print!("{pct:>14}");
    }
    println!();
}
