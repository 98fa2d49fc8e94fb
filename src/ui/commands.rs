use std::collections::HashMap;
use std::sync::LazyLock;

use futures::FutureExt;

use super::app::{App, Screen};
use super::util::parse_amount_input;
use crate::models::BudgetField;
use crate::network;
use crate::store::BudgetStore;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &BudgetStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit BudgetBox", cmd_quit, r);
    register_command!("quit", "Quit BudgetBox", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("b", "Go to Budget", cmd_budget, r);
    register_command!("budget", "Go to Budget", cmd_budget, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "set",
        "Set an amount (e.g. :set food 450.50)",
        cmd_set,
        r
    );
    register_command!("s", "Set an amount (e.g. :s income 5000)", cmd_set, r);
    register_command!("sync", "Push the budget to the server now", cmd_sync, r);
    register_command!(
        "online",
        "Mark the connection as restored (retries pending sync)",
        cmd_online,
        r
    );
    register_command!("offline", "Mark the connection as lost", cmd_offline, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &BudgetStore) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &BudgetStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _store: &BudgetStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_budget(_args: &str, app: &mut App, _store: &BudgetStore) -> anyhow::Result<()> {
    app.screen = Screen::Budget;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &BudgetStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_set(args: &str, app: &mut App, store: &BudgetStore) -> anyhow::Result<()> {
    let fields: Vec<&str> = BudgetField::all().iter().map(|f| f.key()).collect();
    let usage = format!("Usage: :set <field> <amount>. Fields: {}", fields.join(", "));

    let mut parts = args.split_whitespace();
    let (Some(name), Some(amount), None) = (parts.next(), parts.next(), parts.next()) else {
        app.set_status(usage);
        return Ok(());
    };

    let Some(field) = BudgetField::parse(name) else {
        app.set_status(format!("Unknown field '{name}'. Fields: {}", fields.join(", ")));
        return Ok(());
    };

    match parse_amount_input(amount) {
        Some(value) => app.apply_amount(store, field, value),
        None => app.set_status(format!("Invalid amount: {amount}")),
    }
    Ok(())
}

fn cmd_sync(_args: &str, app: &mut App, store: &BudgetStore) -> anyhow::Result<()> {
    let store = store.clone();
    app.spawn_background(async move { Some(store.sync_to_server().await) }.boxed());
    app.set_status("Syncing…");
    Ok(())
}

fn cmd_online(_args: &str, app: &mut App, store: &BudgetStore) -> anyhow::Result<()> {
    let store = store.clone();
    app.spawn_background(async move { network::on_connectivity_change(&store, true).await }.boxed());
    app.set_status("Back online");
    Ok(())
}

fn cmd_offline(_args: &str, app: &mut App, store: &BudgetStore) -> anyhow::Result<()> {
    let store = store.clone();
    app.spawn_background(async move { network::on_connectivity_change(&store, false).await }.boxed());
    app.set_status("Working offline");
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
