use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::{format_amount, parse_amount, total, ExpenseId, Month, UserId};

/// FinanceBook - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "financebook")]
#[command(about = "A local-first personal expense tracker with monthly category breakdowns")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "finance.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Register a new account
    Register {
        /// Username (must be unique)
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Verify credentials
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Record an expense
    Add {
        /// Amount spent (e.g., "12.50" or "100")
        amount: String,

        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Month name (defaults to the current calendar month)
        #[arg(short, long)]
        month: Option<String>,

        /// Category label (e.g., food, transport, entertainment, housing,
        /// health, clothing, beauty, travel, education, sport, other)
        #[arg(short, long)]
        category: String,

        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Edit an expense (fields you omit keep their current value)
    Edit {
        /// Expense id
        id: ExpenseId,

        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// New month name
        #[arg(short, long)]
        month: Option<String>,

        /// New category label
        #[arg(short, long)]
        category: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense id
        id: ExpenseId,

        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// List expenses
    List {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Restrict to one month (omit for all months)
        #[arg(short, long)]
        month: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show the category breakdown and totals
    Summary {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Restrict to one month (omit for all months)
        #[arg(short, long)]
        month: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Register { username, password } => {
                let service = LedgerService::connect(&self.database).await?;
                if service.register(&username, &password).await? {
                    println!("Account created. You can now log in as '{}'.", username);
                } else {
                    anyhow::bail!("Username '{}' already exists. Please pick another.", username);
                }
            }

            Commands::Login { username, password } => {
                let service = LedgerService::connect(&self.database).await?;
                let user_id = login(&service, &username, &password).await?;
                println!("Logged in as '{}' (user id {}).", username, user_id);
            }

            Commands::Add {
                amount,
                username,
                password,
                month,
                category,
                note,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let user_id = login(&service, &username, &password).await?;

                let amount =
                    parse_amount(&amount).context("Invalid amount format. Use '12.50' or '100'")?;
                let month = match month {
                    Some(name) => parse_month(&name)?,
                    None => current_month(),
                };

                let expense = service
                    .add_expense(user_id, month, category, amount, note)
                    .await?;

                println!(
                    "Recorded expense #{}: {} {} ({})",
                    expense.id,
                    format_amount(expense.amount),
                    expense.category,
                    expense.month
                );
            }

            Commands::Edit {
                id,
                username,
                password,
                month,
                category,
                amount,
                note,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                login(&service, &username, &password).await?;

                // Pre-populate from the stored expense, then apply overrides.
                let existing = service
                    .get_expense(id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Expense not found: {}", id))?;

                let month = match month {
                    Some(name) => parse_month(&name)?,
                    None => existing.month,
                };
                let category = category.unwrap_or(existing.category);
                let amount = match amount {
                    Some(raw) => parse_amount(&raw)
                        .context("Invalid amount format. Use '12.50' or '100'")?,
                    None => existing.amount,
                };
                let note = note.or(existing.note);

                let expense = service
                    .edit_expense(id, month, category, amount, note)
                    .await?;

                println!(
                    "Updated expense #{}: {} {} ({})",
                    expense.id,
                    format_amount(expense.amount),
                    expense.category,
                    expense.month
                );
            }

            Commands::Delete {
                id,
                username,
                password,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                login(&service, &username, &password).await?;
                service.delete_expense(id).await?;
                println!("Deleted expense #{}.", id);
            }

            Commands::List {
                username,
                password,
                month,
                format,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let user_id = login(&service, &username, &password).await?;
                let month = month.map(|name| parse_month(&name)).transpose()?;
                run_list_command(&service, user_id, month, &format).await?;
            }

            Commands::Summary {
                username,
                password,
                month,
                format,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let user_id = login(&service, &username, &password).await?;
                let month = month.map(|name| parse_month(&name)).transpose()?;
                run_summary_command(&service, user_id, month, &format).await?;
            }
        }

        Ok(())
    }
}

/// Authenticate or abort. The message never says whether the username or the
/// password was wrong.
async fn login(service: &LedgerService, username: &str, password: &str) -> Result<UserId> {
    service
        .authenticate(username, password)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Login failed: wrong username or password"))
}

fn parse_month(input: &str) -> Result<Month> {
    Month::from_str(input)
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'. Use a full name like 'january'", input))
}

fn current_month() -> Month {
    Month::from_number(Utc::now().month()).unwrap_or(Month::January)
}

async fn run_list_command(
    service: &LedgerService,
    user_id: UserId,
    month: Option<Month>,
    format: &str,
) -> Result<()> {
    let expenses = service.list_expenses(user_id, month).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
        return Ok(());
    }

    if expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<18} {:>10}  {}",
        "ID", "MONTH", "CATEGORY", "AMOUNT", "NOTE"
    );
    println!("{}", "-".repeat(60));
    for expense in &expenses {
        println!(
            "{:<6} {:<10} {:<18} {:>10}  {}",
            expense.id,
            expense.month,
            truncate(&expense.category, 18),
            format_amount(expense.amount),
            expense.note.as_deref().unwrap_or("")
        );
    }

    println!("{}", "-".repeat(60));
    println!("Total: {}", format_amount(total(&expenses)));

    Ok(())
}

async fn run_summary_command(
    service: &LedgerService,
    user_id: UserId,
    month: Option<Month>,
    format: &str,
) -> Result<()> {
    let report = service.expense_report(user_id, month).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // The chart is hidden entirely when there is nothing to show.
    if report.chart.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    match report.month {
        Some(month) => println!("Expense summary ({})", month),
        None => println!("Expense summary (all months)"),
    }
    println!();

    println!("{:<18} {:>10} {:>8}", "CATEGORY", "TOTAL", "%");
    println!("{}", "-".repeat(60));

    let max_size = report
        .chart
        .sizes
        .iter()
        .fold(0.0_f64, |max, &size| max.max(size));

    for (summary, &size) in report.categories.iter().zip(&report.chart.sizes) {
        println!(
            "{:<18} {:>10} {:>7.1}%  {}",
            truncate(&summary.category, 18),
            format_amount(summary.total),
            summary.percentage,
            bar(size, max_size, 20)
        );
    }

    println!("{}", "-".repeat(60));
    println!("Total: {}", format_amount(report.total));
    if let (Some(month), Some(monthly_total)) = (report.month, report.monthly_total) {
        println!("{} total: {}", month, format_amount(monthly_total));
    }

    Ok(())
}

/// Proportional text bar for a chart size.
fn bar(size: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let filled = ((size / max) * width as f64).round().max(0.0) as usize;
    "#".repeat(filled.min(width))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
