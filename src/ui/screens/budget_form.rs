use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::BudgetField;
use crate::ui::app::{App, InputMode};
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);

    render_fields(f, chunks[0], app);
    render_totals(f, chunks[1], app);
}

fn render_fields(f: &mut Frame, area: Rect, app: &App) {
    let budget = &app.state.budget;
    let editing = app.input_mode == InputMode::Editing;

    let items: Vec<ListItem> = BudgetField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let amount = budget.get(*field);
            let selected = i == app.field_index;

            let value = if selected && editing {
                format!("${}▏", app.edit_buffer)
            } else {
                format_amount(amount)
            };

            let row_style = if selected {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            let mut spans = vec![
                Span::styled(format!(" {} ", field.icon()), row_style),
                Span::styled(format!("{:<20}", truncate(field.label(), 19)), row_style),
                Span::styled(
                    format!("{value:>16} "),
                    if selected {
                        row_style.add_modifier(Modifier::BOLD)
                    } else {
                        match field {
                            BudgetField::Income => Style::default().fg(theme::GREEN),
                            BudgetField::Expense(_) => Style::default().fg(theme::RED),
                        }
                    },
                ),
            ];

            if let BudgetField::Expense(category) = field {
                let share = app.analytics.category_percentages.get(*category);
                let ratio = (share / Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0);
                spans.push(Span::styled(progress_bar(ratio, 20), theme::dim_style()));
                spans.push(Span::styled(
                    format!(" {}% of income", share.round()),
                    theme::dim_style(),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if editing {
        " Monthly Budget (Enter save, Esc cancel) "
    } else {
        " Monthly Budget "
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(title, theme::title_style())),
    );
    f.render_widget(list, area);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let analytics = &app.analytics;
    let line = Line::from(vec![
        Span::styled(" Income ", theme::dim_style()),
        Span::styled(
            format_amount(app.state.budget.income),
            Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Expenses ", theme::dim_style()),
        Span::styled(
            format_amount(analytics.total_expenses),
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Left over ", theme::dim_style()),
        Span::styled(
            format_amount(analytics.savings_potential),
            Style::default()
                .fg(theme::balance_color(analytics.savings_potential >= Decimal::ZERO))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let totals = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY)),
    );
    f.render_widget(totals, area);
}
