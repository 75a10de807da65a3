//! Export selection for CLI integration.

use std::fmt;
use std::str::FromStr;

use crate::error::DevlogError;

/// Data sets that can be exported as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Migration search matches.
    MigrationResults,
    /// Per-module analytics.
    ModuleAnalytics,
    /// Server-detected changes.
    DetectedChanges,
}

impl ExportKind {
    /// File name used when no output path is configured.
    #[must_use]
    pub const fn default_filename(self) -> &'static str {
        match self {
            Self::MigrationResults => "migration_results.csv",
            Self::ModuleAnalytics => "module_analytics.csv",
            Self::DetectedChanges => "detected_changes.csv",
        }
    }

    /// Human description used in status messages.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MigrationResults => "migration results",
            Self::ModuleAnalytics => "module analytics",
            Self::DetectedChanges => "detected changes",
        }
    }
}

impl FromStr for ExportKind {
    type Err = DevlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "migration" | "migration-results" => Ok(Self::MigrationResults),
            "modules" | "module-analytics" => Ok(Self::ModuleAnalytics),
            "detected-changes" | "changes" => Ok(Self::DetectedChanges),
            _ => Err(DevlogError::Configuration {
                message: format!(
                    "unsupported export '{s}': valid options are 'migration', 'modules' or 'detected-changes'"
                ),
            }),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MigrationResults => write!(f, "migration"),
            Self::ModuleAnalytics => write!(f, "modules"),
            Self::DetectedChanges => write!(f, "detected-changes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ExportKind;

    #[rstest]
    #[case("migration", ExportKind::MigrationResults)]
    #[case("MODULES", ExportKind::ModuleAnalytics)]
    #[case(" detected-changes ", ExportKind::DetectedChanges)]
    fn parses_known_kinds(#[case] input: &str, #[case] expected: ExportKind) {
        assert_eq!(input.parse::<ExportKind>().expect("kind should parse"), expected);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in [
            ExportKind::MigrationResults,
            ExportKind::ModuleAnalytics,
            ExportKind::DetectedChanges,
        ] {
            assert_eq!(kind.to_string().parse::<ExportKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let error = "xlsx".parse::<ExportKind>().expect_err("xlsx is unsupported");
        assert!(error.to_string().contains("valid options"));
    }
}
