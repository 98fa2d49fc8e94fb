use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use crate::config::Config;
use crate::db::{Database, KeyValueStore, STORAGE_KEY};
use crate::models::{BudgetField, BudgetRecord, ExpenseCategory};
use crate::network;
use crate::store::BudgetStore;
use crate::ui::util::{format_amount, format_last_sync, format_rate, parse_amount_input};

pub(crate) async fn as_cli(args: &[String], store: &BudgetStore, config: &Config) -> Result<()> {
    let result = match args[1].as_str() {
        "show" => cli_show(store),
        "set" => cli_set(&args[2..], store),
        "analytics" | "a" => cli_analytics(store),
        "warnings" | "w" => cli_warnings(store),
        "status" => cli_status(store),
        "sync" => cli_sync(store, config).await,
        "import" => cli_import(&args[2..], store),
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetbox {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            Err(anyhow::anyhow!("Unknown command: {other}"))
        }
    };

    // Make sure every change reaches disk before the process exits.
    store.flush().await?;
    result
}

/// Forget the stored budget entirely. Runs before the store is hydrated.
pub(crate) fn reset(db: &mut Database) -> Result<()> {
    db.remove(STORAGE_KEY)?;
    println!("Budget reset; all amounts are back to zero");
    Ok(())
}

fn print_usage() {
    println!("BudgetBox — offline-first monthly budget planner");
    println!();
    println!("Usage: budgetbox [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  show                          Print the current budget");
    println!("  set <field> <amount>          Set income or an expense category");
    println!("                                Fields: income, bills, food, transport, subscriptions, misc");
    println!("  analytics, a                  Print burn rate, savings and category shares");
    println!("  warnings, w                   Print budget insights");
    println!("  status                        Print network and sync status");
    println!("  sync                          Push the budget to the server");
    println!("  import <file.json>            Replace the budget with a JSON document");
    println!("  export [file.json]            Write the budget as JSON (stdout by default)");
    println!("  reset                         Delete the stored budget");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_show(store: &BudgetStore) -> Result<()> {
    let budget = store.budget();
    println!("BudgetBox — {}", store.sync_status().badge());
    println!("{}", "─".repeat(40));
    for field in BudgetField::all() {
        println!(
            "  {} {:<20} {:>14}",
            field.icon(),
            field.label(),
            format_amount(budget.get(*field))
        );
    }
    println!("{}", "─".repeat(40));
    println!("  Total expenses:        {:>14}", format_amount(budget.total_expenses()));
    println!("  Updated:               {}", budget.updated_at.format("%Y-%m-%d %H:%M UTC"));
    Ok(())
}

fn cli_set(args: &[String], store: &BudgetStore) -> Result<()> {
    let [name, amount] = args else {
        anyhow::bail!("Usage: budgetbox set <field> <amount>");
    };
    let field = BudgetField::parse(name).ok_or_else(|| {
        let fields: Vec<&str> = BudgetField::all().iter().map(|f| f.key()).collect();
        anyhow::anyhow!("Unknown field '{name}'. Fields: {}", fields.join(", "))
    })?;
    let value = parse_amount_input(amount)
        .ok_or_else(|| anyhow::anyhow!("Invalid amount: {amount}. Use a non-negative number up to 1 trillion"))?;

    store.update_field(field, value);
    println!("{} set to {}", field.label(), format_amount(value));
    Ok(())
}

fn cli_analytics(store: &BudgetStore) -> Result<()> {
    let analytics = store.analytics();
    println!("Total expenses:     {}", format_amount(analytics.total_expenses));
    println!(
        "Burn rate:          {} ({})",
        format_rate(analytics.burn_rate),
        analytics.burn_level()
    );
    println!("Savings potential:  {}", format_amount(analytics.savings_potential));
    println!("Month-end balance:  {}", format_amount(analytics.month_end_prediction));
    println!();
    println!("Share of income:");
    for category in ExpenseCategory::all() {
        println!(
            "  {} {:<20} {:>6.1}%",
            category.icon(),
            category.label(),
            analytics.category_percentages.get(*category)
        );
    }
    Ok(())
}

fn cli_warnings(store: &BudgetStore) -> Result<()> {
    for line in insight_lines(store) {
        println!("{line}");
    }
    Ok(())
}

/// Same empty states as the dashboard's insights panel: no expenses first,
/// then a healthy budget, otherwise one line per warning.
fn insight_lines(store: &BudgetStore) -> Vec<String> {
    if !store.budget().has_expenses() {
        return vec![
            "Add your income and expenses to receive personalized budget insights.".to_string(),
        ];
    }
    let warnings = store.warnings();
    if warnings.is_empty() {
        return vec!["Your budget looks healthy! Keep up the good work.".to_string()];
    }
    warnings
        .iter()
        .map(|w| format!("[{}] {}", w.severity, w.message))
        .collect()
}

fn cli_status(store: &BudgetStore) -> Result<()> {
    let state = store.snapshot();
    println!("Network:    {}", if state.is_online { "online" } else { "offline" });
    println!("Sync:       {}", state.sync_status.badge());
    println!("Last sync:  {}", format_last_sync(state.last_synced_at, Utc::now()));
    Ok(())
}

async fn cli_sync(store: &BudgetStore, config: &Config) -> Result<()> {
    if !config.offline {
        let online = network::probe(&config.probe_addr, config.sync_timeout).await;
        store.set_online_status(online);
    }
    if store.sync_to_server().await {
        println!("Budget synced");
        Ok(())
    } else if !store.is_online() {
        println!("Offline: changes kept locally and will sync when the connection returns");
        Ok(())
    } else {
        anyhow::bail!("Sync failed; changes kept locally (see the log for details)")
    }
}

fn cli_import(args: &[String], store: &BudgetStore) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: budgetbox import <file.json>");
    };
    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {file_path}"))?;
    let record: BudgetRecord = serde_json::from_str(&raw)
        .with_context(|| format!("{file_path} is not a budget document"))?;
    if !record.is_valid() {
        anyhow::bail!("{file_path} contains negative or out-of-range amounts");
    }

    store.replace_record(record);
    println!("Imported budget from {file_path}");
    Ok(())
}

fn cli_export(args: &[String], store: &BudgetStore) -> Result<()> {
    let json = serde_json::to_string_pretty(&store.budget())?;
    match args.first().filter(|a| !a.starts_with('-')) {
        Some(path) => {
            let path = shellexpand(path);
            std::fs::write(&path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {path}"))?;
            println!("Exported budget to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
