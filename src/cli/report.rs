//! CLI commands for reports
//!
//! Every report reads saved backend payloads (a path, or `-` for stdin),
//! decodes them at the boundary, aggregates, and writes the result in the
//! requested format.

use chrono::Datelike;
use clap::Subcommand;
use serde::Serialize;

use super::output::{
    check_quality, load_batch, load_object, parse_day, parse_month, today, OutputArgs, Report,
};
use crate::api::{
    BudgetRecord, CategoryRecord, CategoryTotalRecord, DataIssue, GoalRecord,
    MonthlySummaryRecord, MonthlyTrendsRecord, TransactionRecord,
};
use crate::config::Settings;
use crate::display::{
    entry_rows, format_budget_table, format_entries, format_goal_table, BudgetRow, BudgetStatus,
    CurrencyFormat, GoalRow, GoalStatus,
};
use crate::error::{CarteiraError, CarteiraResult};
use crate::models::{Category, Money, Transaction};
use crate::reports::ranking::format_ranking;
use crate::reports::{
    category_totals, group_by_category, group_entries, top_n, AnalysisPeriod, MonthlySummary,
    MonthlyTrends, RankedCategory,
};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Expenses by category, then by month (extrato)
    #[command(alias = "extrato")]
    Statement {
        /// Saved expense payload (`-` for stdin)
        #[arg(short, long)]
        transactions: String,

        /// Saved category payload
        #[arg(short, long)]
        categories: String,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Income entries by month
    #[command(alias = "entradas")]
    Entries {
        /// Saved entry payload (`-` for stdin)
        #[arg(short, long)]
        transactions: String,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Budget progress
    #[command(alias = "orcamentos")]
    Budgets {
        /// Saved budget payload (`-` for stdin)
        #[arg(short, long)]
        budgets: String,

        /// Saved category payload, for budgets without a joined name
        #[arg(short, long)]
        categories: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Savings goal progress
    #[command(alias = "metas")]
    Goals {
        /// Saved goal payload (`-` for stdin)
        #[arg(short, long)]
        goals: String,

        /// Reference day for remaining days (YYYY-MM-DD, default today)
        #[arg(long)]
        today: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Top spending categories with their shares
    Top {
        /// Saved per-category totals payload
        #[arg(long, conflicts_with_all = ["transactions", "period"])]
        totals: Option<String>,

        /// Saved expense payload, totalled client-side
        #[arg(short, long, requires = "categories")]
        transactions: Option<String>,

        /// Saved category payload
        #[arg(short, long)]
        categories: Option<String>,

        /// Number of categories (default from settings)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Only count transactions in this window ending today
        #[arg(short, long, value_parser = parse_period)]
        period: Option<AnalysisPeriod>,

        /// Reference day for the period window (YYYY-MM-DD, default today)
        #[arg(long)]
        today: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Income, expenses and balance for one month
    #[command(alias = "resumo")]
    Summary {
        /// Saved monthly summary payload
        #[arg(short, long, conflicts_with_all = ["transactions", "month"])]
        summary: Option<String>,

        /// Saved transaction payload, summarised client-side
        #[arg(short, long)]
        transactions: Option<String>,

        /// Month to summarise (YYYY-MM, default current month)
        #[arg(short, long)]
        month: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Income and expenses month by month
    #[command(alias = "tendencias")]
    Trends {
        /// Saved monthly trends payload
        #[arg(long, conflicts_with_all = ["transactions", "months"])]
        trends: Option<String>,

        /// Saved transaction payload, grouped client-side
        #[arg(short, long)]
        transactions: Option<String>,

        /// Keep only the most recent N months
        #[arg(short, long)]
        months: Option<usize>,

        #[command(flatten)]
        out: OutputArgs,
    },
}

fn parse_period(value: &str) -> CarteiraResult<AnalysisPeriod> {
    value.parse()
}

/// Handle report commands
pub fn handle_report_command(settings: &Settings, cmd: ReportCommands) -> CarteiraResult<()> {
    let currency = settings.currency_format()?;

    match cmd {
        ReportCommands::Statement {
            transactions,
            categories,
            out,
        } => handle_statement(settings, &currency, &transactions, &categories, &out),
        ReportCommands::Entries { transactions, out } => {
            handle_entries(settings, &currency, &transactions, &out)
        }
        ReportCommands::Budgets {
            budgets,
            categories,
            out,
        } => handle_budgets(settings, &currency, &budgets, categories.as_deref(), &out),
        ReportCommands::Goals { goals, today, out } => {
            handle_goals(settings, &currency, &goals, today.as_deref(), &out)
        }
        ReportCommands::Top {
            totals,
            transactions,
            categories,
            limit,
            period,
            today,
            out,
        } => {
            let source = match (totals, transactions, categories) {
                (Some(totals), _, _) => TopSource::Totals(totals),
                (None, Some(transactions), Some(categories)) => TopSource::Transactions {
                    transactions,
                    categories,
                    period,
                },
                _ => {
                    return Err(CarteiraError::Validation(
                        "Provide --totals, or --transactions with --categories".to_string(),
                    ))
                }
            };
            let n = limit.unwrap_or(settings.top_categories);
            handle_top(settings, &currency, source, n, today.as_deref(), &out)
        }
        ReportCommands::Summary {
            summary,
            transactions,
            month,
            out,
        } => handle_summary(
            settings,
            &currency,
            summary.as_deref(),
            transactions.as_deref(),
            month.as_deref(),
            &out,
        ),
        ReportCommands::Trends {
            trends,
            transactions,
            months,
            out,
        } => handle_trends(
            settings,
            &currency,
            trends.as_deref(),
            transactions.as_deref(),
            months,
            &out,
        ),
    }
}

fn load_categories(source: &str) -> CarteiraResult<(Vec<Category>, Vec<DataIssue>)> {
    let converted = load_batch::<CategoryRecord>(source)?;
    Ok((converted.items, converted.issues))
}

fn load_transactions(source: &str) -> CarteiraResult<(Vec<Transaction>, Vec<DataIssue>)> {
    let converted = load_batch::<TransactionRecord>(source)?;
    Ok((converted.items, converted.issues))
}

fn handle_statement(
    settings: &Settings,
    currency: &CurrencyFormat,
    transactions: &str,
    categories: &str,
    out: &OutputArgs,
) -> CarteiraResult<()> {
    let (transactions, mut issues) = load_transactions(transactions)?;
    let (categories, category_issues) = load_categories(categories)?;
    issues.extend(category_issues);
    check_quality(settings, &issues)?;

    let statement = group_by_category(&transactions, &categories);

    Report {
        name: "statement",
        rows: statement.rows(),
        text: statement.format_terminal(currency),
        data: statement,
        issues,
    }
    .emit(out)
}

fn handle_entries(
    settings: &Settings,
    currency: &CurrencyFormat,
    transactions: &str,
    out: &OutputArgs,
) -> CarteiraResult<()> {
    let (transactions, issues) = load_transactions(transactions)?;
    check_quality(settings, &issues)?;

    let entries = group_entries(&transactions);

    Report {
        name: "entries",
        rows: entry_rows(&entries),
        text: format_entries(&entries, currency),
        data: entries,
        issues,
    }
    .emit(out)
}

fn handle_budgets(
    settings: &Settings,
    currency: &CurrencyFormat,
    budgets: &str,
    categories: Option<&str>,
    out: &OutputArgs,
) -> CarteiraResult<()> {
    let converted = load_batch::<BudgetRecord>(budgets)?;
    let mut issues = converted.issues;
    let categories = match categories {
        Some(source) => {
            let (categories, category_issues) = load_categories(source)?;
            issues.extend(category_issues);
            categories
        }
        None => Vec::new(),
    };
    check_quality(settings, &issues)?;

    let statuses: Vec<BudgetStatus<'_>> = converted
        .items
        .iter()
        .map(|b| BudgetStatus::new(b, &categories))
        .collect();

    Report {
        name: "budgets",
        rows: statuses
            .iter()
            .map(|s| BudgetRow::from_status(s, currency))
            .collect(),
        text: format_budget_table(&statuses, currency),
        data: statuses,
        issues,
    }
    .emit(out)
}

fn handle_goals(
    settings: &Settings,
    currency: &CurrencyFormat,
    goals: &str,
    reference_day: Option<&str>,
    out: &OutputArgs,
) -> CarteiraResult<()> {
    let day = reference_day.map(parse_day).transpose()?.unwrap_or_else(today);

    let converted = load_batch::<GoalRecord>(goals)?;
    check_quality(settings, &converted.issues)?;

    let statuses: Vec<GoalStatus<'_>> = converted
        .items
        .iter()
        .map(|g| GoalStatus::new(g, day))
        .collect();

    Report {
        name: "goals",
        rows: statuses
            .iter()
            .map(|s| GoalRow::from_status(s, currency))
            .collect(),
        text: format_goal_table(&statuses, currency),
        data: statuses,
        issues: converted.issues,
    }
    .emit(out)
}

/// Where the ranking's totals come from
enum TopSource {
    Totals(String),
    Transactions {
        transactions: String,
        categories: String,
        period: Option<AnalysisPeriod>,
    },
}

#[derive(Debug, Serialize)]
struct RankingRow {
    rank: usize,
    category: String,
    total: String,
    share: String,
}

fn ranking_rows(ranked: &[RankedCategory]) -> Vec<RankingRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| RankingRow {
            rank: i + 1,
            category: r.name.clone(),
            total: r.total.to_decimal_string(),
            share: format!("{:.2}", r.share),
        })
        .collect()
}

fn handle_top(
    settings: &Settings,
    currency: &CurrencyFormat,
    source: TopSource,
    n: usize,
    reference_day: Option<&str>,
    out: &OutputArgs,
) -> CarteiraResult<()> {
    let (totals, issues) = match source {
        TopSource::Totals(source) => {
            let converted = load_batch::<CategoryTotalRecord>(&source)?;
            (converted.items, converted.issues)
        }
        TopSource::Transactions {
            transactions,
            categories,
            period,
        } => {
            let (transactions, mut issues) = load_transactions(&transactions)?;
            let (categories, category_issues) = load_categories(&categories)?;
            issues.extend(category_issues);

            let transactions: Vec<Transaction> = match period {
                Some(period) => {
                    let day = reference_day.map(parse_day).transpose()?.unwrap_or_else(today);
                    period
                        .filter(&transactions, day)
                        .into_iter()
                        .cloned()
                        .collect()
                }
                None => transactions,
            };
            (category_totals(&transactions, &categories), issues)
        }
    };
    check_quality(settings, &issues)?;

    let ranked = top_n(&totals, n);

    Report {
        name: "top",
        rows: ranking_rows(&ranked),
        text: format_ranking(&ranked, currency),
        data: ranked,
        issues,
    }
    .emit(out)
}

#[derive(Debug, Serialize)]
struct SummaryView {
    #[serde(flatten)]
    summary: MonthlySummary,
    balance: Money,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    total_entries: String,
    total_expenses: String,
    balance: String,
}

fn handle_summary(
    settings: &Settings,
    currency: &CurrencyFormat,
    summary: Option<&str>,
    transactions: Option<&str>,
    month: Option<&str>,
    out: &OutputArgs,
) -> CarteiraResult<()> {
    let (summary, issues) = match (summary, transactions) {
        (Some(source), _) => {
            let record: MonthlySummaryRecord = load_object(source)?;
            (MonthlySummary::from_record(&record)?, Vec::new())
        }
        (None, Some(source)) => {
            let (year, month) = match month {
                Some(value) => parse_month(value)?,
                None => {
                    let day = today();
                    (day.year(), day.month())
                }
            };
            let (transactions, issues) = load_transactions(source)?;
            (MonthlySummary::for_month(&transactions, year, month), issues)
        }
        (None, None) => {
            return Err(CarteiraError::Validation(
                "Provide --summary or --transactions".to_string(),
            ))
        }
    };
    check_quality(settings, &issues)?;

    Report {
        name: "summary",
        rows: vec![SummaryRow {
            total_entries: summary.total_entries.to_decimal_string(),
            total_expenses: summary.total_expenses.to_decimal_string(),
            balance: summary.balance().to_decimal_string(),
        }],
        text: summary.format_terminal(currency),
        data: SummaryView {
            balance: summary.balance(),
            summary,
        },
        issues,
    }
    .emit(out)
}

#[derive(Debug, Serialize)]
struct TrendRow {
    label: String,
    entries: String,
    expenses: String,
}

fn handle_trends(
    settings: &Settings,
    currency: &CurrencyFormat,
    trends: Option<&str>,
    transactions: Option<&str>,
    months: Option<usize>,
    out: &OutputArgs,
) -> CarteiraResult<()> {
    let (trends, issues) = match (trends, transactions) {
        (Some(source), _) => {
            let record: MonthlyTrendsRecord = load_object(source)?;
            (MonthlyTrends::from_record(&record)?, Vec::new())
        }
        (None, Some(source)) => {
            let (transactions, issues) = load_transactions(source)?;
            let trends = MonthlyTrends::from_transactions(&transactions);
            let trends = match months {
                Some(n) => trends.last(n),
                None => trends,
            };
            (trends, issues)
        }
        (None, None) => {
            return Err(CarteiraError::Validation(
                "Provide --trends or --transactions".to_string(),
            ))
        }
    };
    check_quality(settings, &issues)?;

    Report {
        name: "trends",
        rows: trends
            .points
            .iter()
            .map(|p| TrendRow {
                label: p.label.clone(),
                entries: p.entries.to_decimal_string(),
                expenses: p.expenses.to_decimal_string(),
            })
            .collect(),
        text: trends.format_terminal(currency),
        data: trends,
        issues,
    }
    .emit(out)
}
