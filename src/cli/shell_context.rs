use std::{str::FromStr, sync::Arc};

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::cli::{help, output, CliError, CommandError, LoopControl};
use crate::config::{Config, ConfigManager};
use crate::core::services::{CategoryService, SummaryService};
use crate::core::MutationPipeline;
use crate::domain::{MonthKey, NewCategory, NewTransaction, TransactionKind};
use crate::storage::JsonStorage;
use crate::utils::build_info;

/// State shared by every command of one shell session.
pub struct ShellContext {
    pipeline: MutationPipeline,
    config: Config,
}

impl ShellContext {
    /// Opens the configured store and loads it.
    pub fn new() -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let store_path = manager.store_path(&config);
        let storage = JsonStorage::new(&store_path).map_err(crate::LedgerError::Load)?;
        let pipeline = MutationPipeline::load(Arc::new(storage))?;
        if config.seed_defaults && pipeline.snapshot().catalog.is_empty() {
            pipeline.seed_default_categories()?;
        }
        Ok(Self::with_pipeline(pipeline, config))
    }

    pub fn with_pipeline(pipeline: MutationPipeline, config: Config) -> Self {
        Self { pipeline, config }
    }

    pub fn pipeline(&self) -> &MutationPipeline {
        &self.pipeline
    }

    pub fn dispatch(&self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "help" => output::plain(help::overview()),
            "version" => output::plain(build_info::current().describe()),
            "summary" => self.show_summary()?,
            "compare" => self.show_comparison(args)?,
            "list" => self.show_recent(args)?,
            "categories" => self.show_categories(args)?,
            "add" => self.add_transaction(args)?,
            "category" => self.add_category(args)?,
            "seed" => {
                let created = self.pipeline.seed_default_categories()?;
                output::success(format!("{created} default categories created"));
            }
            "exit" | "quit" => return Ok(LoopControl::Exit),
            other => {
                return Err(CommandError::Usage(format!(
                    "unknown command `{other}`, type `help` for a list"
                )))
            }
        }
        Ok(LoopControl::Continue)
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::Usage(message) => output::warning(message),
            other => output::error(other),
        }
    }

    fn show_summary(&self) -> Result<(), CommandError> {
        let summary = self.pipeline.summary();
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|err| CommandError::Input(err.to_string()))?;
        output::plain(json);
        match summary.totals.savings_rate() {
            Some(rate) => output::info(format!("savings rate: {}%", rate.round_dp(2).normalize())),
            None => output::info("savings rate: n/a"),
        }
        Ok(())
    }

    fn show_comparison(&self, args: &[&str]) -> Result<(), CommandError> {
        let reference = match args.first() {
            Some(raw) => MonthKey::parse(raw).map_err(CommandError::Input)?,
            None => MonthKey::from_date(Local::now().date_naive()),
        };
        let comparison = self.pipeline.month_comparison(reference);
        output::section(format!("{} vs {}", comparison.current.month, comparison.previous.month));
        for entry in [&comparison.previous, &comparison.current] {
            output::plain(format!(
                "{}  income {}  expense {}  net {}",
                entry.month,
                entry.income,
                entry.expense,
                entry.net()
            ));
        }
        Ok(())
    }

    fn show_recent(&self, args: &[&str]) -> Result<(), CommandError> {
        let limit = match args.first() {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| CommandError::Input(format!("invalid count `{raw}`")))?,
            None => self.config.recent_limit,
        };
        let snapshot = self.pipeline.snapshot();
        if snapshot.ledger.is_empty() {
            output::info("no transactions recorded");
            return Ok(());
        }
        for txn in SummaryService::recent(&snapshot.ledger, limit) {
            output::plain(format!(
                "{}  {:<7}  {:>12}  {:<14}  {}",
                txn.date,
                txn.kind.as_str(),
                txn.amount,
                txn.category,
                txn.description
            ));
        }
        Ok(())
    }

    fn show_categories(&self, args: &[&str]) -> Result<(), CommandError> {
        let kind = args.first().map(|raw| parse_kind(raw)).transpose()?;
        let snapshot = self.pipeline.snapshot();
        let categories = CategoryService::list(&snapshot.catalog, kind);
        if categories.is_empty() {
            output::info("no categories defined");
            return Ok(());
        }
        output::section(kind.map_or("categories", |kind| kind.as_str()));
        for category in categories {
            output::plain(format!(
                "  {:<7}  {:<14}  {}",
                category.kind.as_str(),
                category.name,
                category.color.as_deref().unwrap_or_default()
            ));
        }
        Ok(())
    }

    fn add_transaction(&self, args: &[&str]) -> Result<(), CommandError> {
        let [kind, amount, category, date, description @ ..] = args else {
            return Err(usage_error("add"));
        };
        if description.is_empty() {
            return Err(usage_error("add"));
        }
        let candidate = NewTransaction::new(
            parse_kind(kind)?,
            Decimal::from_str(amount)
                .map_err(|_| CommandError::Input(format!("invalid amount `{amount}`")))?,
            description.join(" "),
            *category,
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| CommandError::Input(format!("invalid date `{date}`")))?,
        );
        let summary = self.pipeline.submit(candidate)?;
        output::success(format!(
            "recorded; balance is now {}",
            summary.totals.balance
        ));
        Ok(())
    }

    fn add_category(&self, args: &[&str]) -> Result<(), CommandError> {
        let (kind, name, color) = match args {
            [kind, name] => (kind, name, None),
            [kind, name, color] => (kind, name, Some(*color)),
            _ => return Err(usage_error("category")),
        };
        let mut candidate = NewCategory::new(*name, parse_kind(kind)?);
        if let Some(color) = color {
            candidate = candidate.with_color(color);
        }
        self.pipeline.add_category(candidate)?;
        output::success(format!("category `{name}` created"));
        Ok(())
    }
}

fn parse_kind(raw: &str) -> Result<TransactionKind, CommandError> {
    raw.parse::<TransactionKind>().map_err(CommandError::Input)
}

fn usage_error(command: &str) -> CommandError {
    CommandError::Usage(format!(
        "usage: {}",
        help::usage(command).unwrap_or(command)
    ))
}
