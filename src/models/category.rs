#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Bills,
    Food,
    Transport,
    Subscriptions,
    Misc,
}

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Bills,
            Self::Food,
            Self::Transport,
            Self::Subscriptions,
            Self::Misc,
        ]
    }

    /// Stable key used in persisted documents and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Bills => "bills",
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Subscriptions => "subscriptions",
            Self::Misc => "misc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bills => "Bills & Utilities",
            Self::Food => "Food & Groceries",
            Self::Transport => "Transportation",
            Self::Subscriptions => "Subscriptions",
            Self::Misc => "Miscellaneous",
        }
    }

    /// Compact name for chart axes.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Bills => "Bills",
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Subscriptions => "Subscriptions",
            Self::Misc => "Misc",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bills => "🏠",
            Self::Food => "🍔",
            Self::Transport => "🚗",
            Self::Subscriptions => "📱",
            Self::Misc => "📦",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bills" => Some(Self::Bills),
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "subscriptions" => Some(Self::Subscriptions),
            "misc" => Some(Self::Misc),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
