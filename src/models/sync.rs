use serde::{Deserialize, Serialize};

/// Replication state of the budget relative to the remote copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Never mirrored remotely.
    #[default]
    Local,
    /// Local changes not yet mirrored.
    Pending,
    Synced,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Pending => "pending",
            Self::Synced => "synced",
        }
    }

    /// Badge text shown next to the network indicator.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Local => "Local Only",
            Self::Pending => "Sync Pending",
            Self::Synced => "Synced",
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
