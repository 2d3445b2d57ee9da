use std::{env, io::IsTerminal, path::PathBuf};

use chrono::NaiveDate;
use dialoguer::Confirm;
use madbudget_config::{Config, ConfigManager};
use madbudget_core::{
    aggregate, partition, Clock, CoreError, FixedClock, SettingsService, TransactionService,
    TransactionStore,
};
use madbudget_domain::{BudgetSettings, PayPeriod, PeriodSummary, Transaction};
use madbudget_storage_json::JsonStore;
use tracing::{info, warn};

use crate::errors::AppError;

use super::errors::{CommandError, CommandResult};
use super::format::AmountFormatter;
use super::handlers;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
use super::system_clock::SystemClock;

/// Overrides the directory holding `config/` and `data/`.
pub const HOME_ENV: &str = "MADBUDGET_HOME";
/// Pins "today" to a `YYYY-MM-DD` date.
pub const TODAY_ENV: &str = "MADBUDGET_TODAY";
/// Reads commands from stdin instead of the line editor.
pub const SCRIPT_ENV: &str = "MADBUDGET_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Everything the period views need, computed from one settings/transactions snapshot.
#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub settings: BudgetSettings,
    pub period: PayPeriod,
    pub prorate: bool,
    pub today: NaiveDate,
    pub summary: PeriodSummary,
    /// Transactions inside the period, newest first.
    pub transactions: Vec<Transaction>,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: JsonStore,
    pub clock: Box<dyn Clock>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, AppError> {
        let base = env::var_os(HOME_ENV).map(PathBuf::from);
        let config_manager = match &base {
            Some(base) => ConfigManager::with_base_dir(base.clone())?,
            None => ConfigManager::from_default_location()?,
        };
        let config = config_manager.load()?;
        let data_root = match (&config.data_root, &base) {
            (None, Some(base)) => base.join("data"),
            _ => config.resolve_data_root(),
        };
        let store = JsonStore::new(data_root)?;
        Ok(Self::with_parts(
            mode,
            config_manager,
            config,
            store,
            clock_from_env(),
        ))
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        store: JsonStore,
        clock: Box<dyn Clock>,
    ) -> Self {
        let registry = handlers::registry();

        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled
                && mode == CliMode::Interactive
                && std::io::stdout().is_terminal(),
            quiet_mode: mode == CliMode::Script,
        });

        info!(
            config = %config_manager.config_path().display(),
            transactions = %store.paths().transactions.display(),
            today = %clock.today(),
            "shell context ready"
        );

        Self {
            mode,
            registry,
            config_manager,
            config,
            store,
            clock,
            last_command: None,
            running: true,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn prompt(&self) -> String {
        "madbudget> ".into()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn amounts(&self) -> AmountFormatter {
        AmountFormatter::from_config(&self.config)
    }

    pub fn settings(&self) -> Result<BudgetSettings, CommandError> {
        Ok(SettingsService::load(&self.store, self.today())?)
    }

    pub fn save_settings(&self, settings: &BudgetSettings) -> CommandResult {
        SettingsService::save(&self.store, settings)?;
        Ok(())
    }

    pub fn save_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Resolves the settings, partitions the period and aggregates the stored transactions.
    pub fn period_report(&self) -> Result<PeriodReport, CommandError> {
        let settings = self.settings()?;
        let bins = partition(settings.pay_start, settings.pay_end)?;
        let period = settings.period().map_err(CoreError::from)?;
        let history = self.store.load_transactions()?;
        let today = self.today();
        let prorate = self.config.prorate_short_weeks;
        let summary = aggregate(&bins, settings.weekly_budget, prorate, &history, today)?;
        let transactions = TransactionService::in_period(&history, &period);
        Ok(PeriodReport {
            settings,
            period,
            prorate,
            today,
            summary,
            transactions,
        })
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        crate::cli::shell::handle_line(self, line)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, AppError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    /// Input problems are warnings; nothing derived from the bad input is shown.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::warning(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other if other.is_user_input() => output::warning(other),
            other => {
                warn!(error = %other, "command failed");
                output::error(other);
            }
        }
    }
}

fn clock_from_env() -> Box<dyn Clock> {
    let Ok(raw) = env::var(TODAY_ENV) else {
        return Box::new(SystemClock);
    };
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Box::new(FixedClock::new(date)),
        Err(_) => {
            warn!(value = %raw, "ignoring invalid {}", TODAY_ENV);
            Box::new(SystemClock)
        }
    }
}
