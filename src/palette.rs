//! Presentation lookups: mood colors, status badges, chart colors and labels.
//!
//! Moods and statuses are open vocabularies, so every lookup here is a table
//! scan with an explicit default rather than a match over known values.

use serde::Serialize;

// =============================================================================
// Theme colors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftColor {
    Azure,
    Crimson,
    Golden,
    Violet,
    Amber,
    Emerald,
    Pearl,
    Cosmic,
}

impl DriftColor {
    /// Theme token as used by the stylesheet.
    pub fn token(&self) -> &'static str {
        match self {
            DriftColor::Azure => "drift-azure",
            DriftColor::Crimson => "drift-crimson",
            DriftColor::Golden => "drift-golden",
            DriftColor::Violet => "drift-violet",
            DriftColor::Amber => "drift-amber",
            DriftColor::Emerald => "drift-emerald",
            DriftColor::Pearl => "drift-pearl",
            DriftColor::Cosmic => "drift-cosmic",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            DriftColor::Azure => "#60A5FA",
            DriftColor::Crimson => "#EF4444",
            DriftColor::Golden => "#F59E0B",
            DriftColor::Violet => "#A855F7",
            DriftColor::Amber => "#F97316",
            DriftColor::Emerald => "#10B981",
            DriftColor::Pearl => "#D1D5DB",
            DriftColor::Cosmic => "#C084FC",
        }
    }

    /// CSS value referencing the theme variable.
    pub fn css_var(&self) -> String {
        format!("hsl(var(--{}))", self.token())
    }
}

pub const DEFAULT_MOOD_COLOR: DriftColor = DriftColor::Azure;

static MOOD_COLORS: &[(&str, DriftColor)] = &[
    ("Contemplative", DriftColor::Azure),
    ("Frustrated", DriftColor::Crimson),
    ("Serene", DriftColor::Golden),
    ("Curious", DriftColor::Violet),
    ("Anxious", DriftColor::Amber),
    ("Uncertain", DriftColor::Emerald),
    ("Determined", DriftColor::Violet),
    ("Balanced", DriftColor::Golden),
    ("Vulnerable", DriftColor::Pearl),
    ("Transcendent", DriftColor::Cosmic),
];

/// Color for a mood label. Lookup is exact; unknown moods get azure.
pub fn mood_color(mood: &str) -> DriftColor {
    MOOD_COLORS
        .iter()
        .find(|(name, _)| *name == mood)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_MOOD_COLOR)
}

static PHASE_COLORS: [DriftColor; 4] = [
    DriftColor::Azure,
    DriftColor::Violet,
    DriftColor::Golden,
    DriftColor::Cosmic,
];

/// Phases 1..=4 index the palette; anything else falls back to azure.
pub fn phase_color(phase: i64) -> DriftColor {
    phase
        .checked_sub(1)
        .and_then(|idx| usize::try_from(idx).ok())
        .and_then(|idx| PHASE_COLORS.get(idx).copied())
        .unwrap_or(DriftColor::Azure)
}

/// Color for a frequency band, keyed by its lower bound in Hz.
pub fn frequency_color(lower_hz: i64) -> DriftColor {
    if lower_hz < 400 {
        DriftColor::Violet
    } else if lower_hz < 500 {
        DriftColor::Azure
    } else if lower_hz < 700 {
        DriftColor::Emerald
    } else if lower_hz < 900 {
        DriftColor::Amber
    } else {
        DriftColor::Cosmic
    }
}

// =============================================================================
// Status classification
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Completed,
    InProgress,
    Processing,
    Evaluating,
    Protected,
    Elevated,
    Unknown,
}

/// Badge data for a status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusClass {
    pub kind: StatusKind,
    pub icon: &'static str,
    pub color: &'static str,
    pub label: &'static str,
}

const COMPLETED_FRAGMENTS: &[&str] = &["complete", "mastered", "fully_validated", "excellence_achieved"];

/// Ordered rules; the first rule with a matching fragment wins.
static STATUS_RULES: &[(&[&str], StatusClass)] = &[
    (
        COMPLETED_FRAGMENTS,
        StatusClass {
            kind: StatusKind::Completed,
            icon: "check-circle",
            color: "text-green-400",
            label: "Completed",
        },
    ),
    (
        &["compliant", "progressing", "active", "validated"],
        StatusClass {
            kind: StatusKind::InProgress,
            icon: "trending-up",
            color: "text-blue-400",
            label: "In Progress",
        },
    ),
    (
        &["processing", "pending", "in_progress"],
        StatusClass {
            kind: StatusKind::Processing,
            icon: "clock",
            color: "text-yellow-400",
            label: "Processing",
        },
    ),
    (
        &["evaluating", "preliminary"],
        StatusClass {
            kind: StatusKind::Evaluating,
            icon: "activity",
            color: "text-orange-400",
            label: "Evaluating",
        },
    ),
    (
        &["protective", "safety"],
        StatusClass {
            kind: StatusKind::Protected,
            icon: "shield",
            color: "text-purple-400",
            label: "Protected",
        },
    ),
    (
        &["elevated", "divine"],
        StatusClass {
            kind: StatusKind::Elevated,
            icon: "sparkles",
            color: "text-pink-400",
            label: "Elevated",
        },
    ),
];

pub const UNKNOWN_STATUS: StatusClass = StatusClass {
    kind: StatusKind::Unknown,
    icon: "alert-circle",
    color: "text-gray-400",
    label: "Unknown",
};

/// Classify a status by case-insensitive substring match, first rule wins.
pub fn classify_status(status: &str) -> StatusClass {
    let normalized = status.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| normalized.contains(f)))
        .map(|(_, class)| *class)
        .unwrap_or(UNKNOWN_STATUS)
}

/// Case-sensitive completion check used by the overview cards.
pub fn is_completed_status(status: &str) -> bool {
    COMPLETED_FRAGMENTS.iter().any(|f| status.contains(f))
}

// =============================================================================
// Chart labels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Timeline,
    Frequency,
    Phase,
    Status,
    Entries,
    Other,
}

impl ChartKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "timeline" => ChartKind::Timeline,
            "frequency" => ChartKind::Frequency,
            "phase" => ChartKind::Phase,
            "status" => ChartKind::Status,
            "entries" => ChartKind::Entries,
            _ => ChartKind::Other,
        }
    }

    pub fn empty_state_message(&self) -> &'static str {
        match self {
            ChartKind::Timeline => "As this user progresses through their emotional journey, their conflict intensity patterns will be visualized here.",
            ChartKind::Frequency => "Frequency distributions will show the user's most visited energetic states once more entries are logged.",
            ChartKind::Phase => "Bloom phase progression will display the user's growth trajectory through different emotional stages.",
            ChartKind::Status => "Guardian status monitoring will track the safety and compliance of the user's journey.",
            ChartKind::Entries => "Individual drift log entries will appear here as the user documents their emotional experiences.",
            ChartKind::Other => "Data visualization will appear here as the user's journey develops.",
        }
    }
}

/// Tooltip caption for a chart data key.
pub fn tooltip_label(data_key: &str, chart: ChartKind) -> String {
    let label = match data_key {
        "intensity" => "Conflict Intensity",
        "value" => match chart {
            ChartKind::Frequency => "Frequency Count",
            ChartKind::Phase => "Phase Progress",
            ChartKind::Status => "Status Count",
            _ => "Value",
        },
        "count" => "Occurrences",
        "phase" => "Bloom Phase",
        "hz" => "Frequency (Hz)",
        "mood" => "Emotional State",
        "date" => "Timeline",
        other => return capitalize(other),
    };
    label.to_string()
}

/// Tooltip value text for a numeric data point.
pub fn format_tooltip_value(value: f64, data_key: &str, show_unit: bool) -> String {
    match data_key {
        "intensity" if show_unit => format!("{:.1}%", value * 100.0),
        "intensity" => format!("{:.2}", value),
        "hz" if show_unit => format!("{:.1} Hz", value),
        "hz" => format!("{:.1}", value),
        "phase" => format!("Phase {}", value),
        "count" if show_unit => format!("{} entries", value),
        "count" | "value" => format!("{}", value),
        _ => format!("{:.1}", value),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
