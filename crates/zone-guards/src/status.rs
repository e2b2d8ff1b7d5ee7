use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete safety level shown to caregivers, least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Safe,
    Advisory,
    Warning,
    Urgent,
    Emergency,
}

/// Badge descriptor consumed verbatim by presentation layers.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDisplay {
    pub label: &'static str,
    pub css_class: &'static str,
    pub icon: &'static str,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 5] = [
        PatientStatus::Safe,
        PatientStatus::Advisory,
        PatientStatus::Warning,
        PatientStatus::Urgent,
        PatientStatus::Emergency,
    ];

    /// Rank from 0 (safe) to 4 (emergency).
    pub fn severity(self) -> u8 {
        self as u8
    }

    pub fn is_escalation_from(self, previous: PatientStatus) -> bool {
        self > previous
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Safe => "safe",
            PatientStatus::Advisory => "advisory",
            PatientStatus::Warning => "warning",
            PatientStatus::Urgent => "urgent",
            PatientStatus::Emergency => "emergency",
        }
    }

    pub fn display(self) -> StatusDisplay {
        match self {
            PatientStatus::Safe => StatusDisplay {
                label: "SAFE",
                css_class: "bg-[var(--accent-primary-muted)] text-[var(--status-safe)]",
                icon: "🟢",
            },
            PatientStatus::Advisory => StatusDisplay {
                label: "ADVISORY",
                css_class: "bg-blue-500/15 text-blue-500",
                icon: "🔵",
            },
            PatientStatus::Warning => StatusDisplay {
                label: "WARNING",
                css_class: "bg-amber-500/15 text-[var(--status-warning)]",
                icon: "🟡",
            },
            PatientStatus::Urgent => StatusDisplay {
                label: "URGENT",
                css_class: "bg-orange-500/15 text-[var(--status-urgent)]",
                icon: "🟠",
            },
            PatientStatus::Emergency => StatusDisplay {
                label: "EMERGENCY",
                css_class: "bg-red-600/20 text-[var(--status-emergency)] animate-pulse",
                icon: "🔴",
            },
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
