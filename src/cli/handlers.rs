use chrono::NaiveDate;
use madbudget_core::TransactionService;
use madbudget_domain::{
    BudgetSettings, NewTransaction, TransactionKind, CATEGORY_SUGGESTIONS,
};

use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::format::format_date;
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::shell_context::{PeriodReport, ShellContext};
use crate::cli::table::{Table, TableColumn, TableRenderer};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "settings",
            "Show the pay period, weekly budget and pro-rating",
            "settings",
            cmd_settings,
        ),
        CommandEntry::new(
            "period",
            "Set the pay period",
            "period <start|today> <end|today>   (dates as YYYY-MM-DD)",
            cmd_period,
        ),
        CommandEntry::new(
            "budget",
            "Set the weekly budget",
            "budget <amount>",
            cmd_budget,
        ),
        CommandEntry::new(
            "prorate",
            "Scale the budget of short weeks by their day count",
            "prorate <on|off>",
            cmd_prorate,
        ),
        CommandEntry::new(
            "add",
            "Record a spend or a top-up",
            "add <date|today> <spend|topup> <amount> <category> <text...>",
            cmd_add,
        ),
        CommandEntry::new(
            "categories",
            "List suggested categories",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "summary",
            "Show remaining budget and the per-day projection",
            "summary [--json]",
            cmd_summary,
        ),
        CommandEntry::new(
            "weeks",
            "Show the budget of every week in the period",
            "weeks",
            cmd_weeks,
        ),
        CommandEntry::new(
            "transactions",
            "List the period's transactions, newest first",
            "transactions",
            cmd_transactions,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

pub(crate) fn registry() -> CommandRegistry {
    CommandRegistry::from_entries(definitions())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.registry.get(&command) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Madbudget {}", meta.version));
    output::info(format!("  Build hash : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_settings(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let settings = context.settings()?;
    let amounts = context.amounts();
    output::section("Settings");
    output::info(format!(
        "  Pay period    : {} .. {}",
        format_date(settings.pay_start),
        format_date(settings.pay_end)
    ));
    output::info(format!(
        "  Weekly budget : {}",
        amounts.format(settings.weekly_budget)
    ));
    output::info(format!(
        "  Pro-rating    : {}",
        on_off(context.config.prorate_short_weeks)
    ));
    output::info(format!(
        "  Data file     : {}",
        context.store.paths().transactions.display()
    ));
    Ok(())
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [start, end] = args else {
        return Err(usage("period <start|today> <end|today>"));
    };
    let today = context.today();
    let current = context.settings()?;
    let updated = BudgetSettings {
        pay_start: parse_date(start, today)?,
        pay_end: parse_date(end, today)?,
        ..current
    };
    context.save_settings(&updated)?;
    output::success(format!(
        "Pay period set to {} .. {}.",
        format_date(updated.pay_start),
        format_date(updated.pay_end)
    ));
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage("budget <amount>"));
    };
    let current = context.settings()?;
    let updated = BudgetSettings {
        weekly_budget: parse_amount(raw)?,
        ..current
    };
    context.save_settings(&updated)?;
    output::success(format!(
        "Weekly budget set to {}.",
        context.amounts().format(updated.weekly_budget)
    ));
    Ok(())
}

fn cmd_prorate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage("prorate <on|off>"));
    };
    let enabled = match raw.to_lowercase().as_str() {
        "on" | "true" | "yes" | "ja" => true,
        "off" | "false" | "no" | "nej" => false,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "expected `on` or `off`, got `{}`",
                other
            )))
        }
    };
    context.config.prorate_short_weeks = enabled;
    context.save_config()?;
    output::success(format!("Pro-rating of short weeks is {}.", on_off(enabled)));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, kind, amount, category, text @ ..] = args else {
        return Err(usage(
            "add <date|today> <spend|topup> <amount> <category> <text...>",
        ));
    };
    if text.is_empty() {
        return Err(CommandError::InvalidArguments(
            "a transaction needs a text".into(),
        ));
    }

    let draft = NewTransaction::new(
        parse_date(date, context.today())?,
        text.join(" "),
        *category,
        kind.parse::<TransactionKind>()
            .map_err(CommandError::InvalidArguments)?,
        parse_amount(amount)?,
    );
    let stored = TransactionService::add(&context.store, draft)?;
    output::success(format!(
        "Recorded {} #{}: {} on {} ({}).",
        stored.kind,
        stored.id,
        context.amounts().format(stored.amount),
        format_date(stored.date),
        stored.category
    ));

    let settings = context.settings()?;
    if stored.date < settings.pay_start || stored.date > settings.pay_end {
        output::hint("The date is outside the current pay period and will not count towards it.");
    }
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    for name in CATEGORY_SUGGESTIONS {
        output::info(format!("  {}", name));
    }
    output::hint("Any other category name is accepted as well.");
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let report = context.period_report()?;
    match args {
        [] => {}
        ["--json"] => {
            output::info(serde_json::to_string_pretty(&report.summary)?);
            return Ok(());
        }
        _ => return Err(usage("summary [--json]")),
    }

    let amounts = context.amounts();
    let totals = &report.summary.totals;
    output::section(format!("Pay period {}", report.period));
    output::info(format!("  Budget     : {}", amounts.format(totals.budget)));
    output::info(format!("  Top-ups    : {}", amounts.format(totals.topups)));
    output::info(format!("  Spend      : {}", amounts.format(totals.spend)));
    output::info(format!("  Remaining  : {}", amounts.format(totals.remaining)));
    output::info(format!("  Days left  : {}", report.summary.days_left));
    output::info(format!(
        "  Per day    : {}",
        amounts.format(report.summary.daily_projection)
    ));
    if totals.remaining < 0.0 {
        output::warning("The period is overspent.");
    }
    report_excluded(&report);
    Ok(())
}

fn cmd_weeks(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.period_report()?;
    let amounts = context.amounts();

    let title = if report.prorate {
        format!("Weeks {} (pro-rated)", report.period)
    } else {
        format!("Weeks {}", report.period)
    };
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::right("Week"),
            TableColumn::left("Start"),
            TableColumn::left("End"),
            TableColumn::right("Days"),
            TableColumn::right("Budget"),
            TableColumn::right("Top-ups"),
            TableColumn::right("Spend"),
            TableColumn::right("Remaining"),
        ],
    );
    for entry in &report.summary.weeks {
        let marker = if entry.week.contains(report.today) { "*" } else { "" };
        table.add_row(vec![
            format!("{}{}", marker, entry.week.index),
            format_date(entry.week.start),
            format_date(entry.week.end),
            entry.week.day_count.to_string(),
            amounts.format(entry.budget),
            amounts.format(entry.topups),
            amounts.format(entry.spend),
            amounts.format(entry.remaining),
        ]);
    }
    let totals = &report.summary.totals;
    table.add_row(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        report.period.day_count().to_string(),
        amounts.format(totals.budget),
        amounts.format(totals.topups),
        amounts.format(totals.spend),
        amounts.format(totals.remaining),
    ]);
    TableRenderer::render(&table);
    report_excluded(&report);
    Ok(())
}

fn cmd_transactions(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.period_report()?;
    let amounts = context.amounts();

    let mut table = Table::new(
        Some(format!("Transactions {}", report.period)),
        vec![
            TableColumn::right("#"),
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::left("Category"),
            TableColumn::right("Amount"),
            TableColumn::left("Text"),
        ],
    );
    for txn in &report.transactions {
        table.add_row(vec![
            txn.id.to_string(),
            format_date(txn.date),
            txn.kind.to_string(),
            txn.category.clone(),
            amounts.format(txn.amount),
            txn.text.clone(),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn report_excluded(report: &PeriodReport) {
    if report.summary.excluded.is_empty() {
        return;
    }
    let ids: Vec<String> = report
        .summary
        .excluded
        .iter()
        .map(|id| format!("#{}", id))
        .collect();
    output::warning(format!(
        "Skipped transactions with invalid amounts: {}",
        ids.join(", ")
    ));
}

fn usage(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!(
            "`{}` is not a date, use YYYY-MM-DD or `today`",
            value
        ))
    })
}

/// Accepts `.` or `,` as the decimal mark.
fn parse_amount(value: &str) -> Result<f64, CommandError> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not an amount", value)))
}
