//! Profile configuration: validation and loading.
//!
//! The CLI reads one INI file. `[profile]` holds the user figures,
//! `[portfolio]` points at the holdings CSV, `[target]` optionally pins a
//! custom target allocation, and `[bracket start-end]` sections override
//! preset-table rows. Overrides are validated here, at the boundary; the
//! table itself accepts whatever it is given.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};

use super::allocation::AssetAllocation;
use super::category::FundCategory;
use super::error::FundfolioError;
use super::portfolio::DEFAULT_INVESTMENT_PERCENTAGE;
use super::presets::{AgeRange, PresetTable};
use crate::ports::config_port::ConfigPort;

/// User figures parsed out of the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub date_of_birth: NaiveDate,
    pub salary: f64,
    pub investment_percentage: f64,
    pub last_rebalanced: DateTime<Utc>,
    pub funds_csv: Option<PathBuf>,
}

/// Section name for a bracket override, e.g. `bracket 25-30`.
pub fn bracket_section(range: AgeRange) -> String {
    format!("bracket {range}")
}

pub fn validate_profile_config(config: &dyn ConfigPort) -> Result<(), FundfolioError> {
    parse_date(
        config.get_string("profile", "date_of_birth").as_deref(),
        "profile",
        "date_of_birth",
    )?;

    if let Some(value) = config.get_string("profile", "salary") {
        let salary: f64 = parse_number(&value, "profile", "salary")?;
        if salary < 0.0 {
            return Err(invalid("profile", "salary", "must be non-negative"));
        }
    }

    if let Some(value) = config.get_string("profile", "investment_percentage") {
        let pct: f64 = parse_number(&value, "profile", "investment_percentage")?;
        if !(pct > 0.0 && pct <= 100.0) {
            return Err(invalid(
                "profile",
                "investment_percentage",
                "must be between 0 and 100",
            ));
        }
    }

    if let Some(value) = config.get_string("portfolio", "last_rebalanced") {
        DateTime::parse_from_rfc3339(&value)
            .map_err(|_| invalid("portfolio", "last_rebalanced", "expected an RFC 3339 timestamp"))?;
    }

    Ok(())
}

/// When `[target] custom = true`, all six category keys must be present and
/// parse as percentages.
pub fn validate_target_config(config: &dyn ConfigPort) -> Result<(), FundfolioError> {
    if !config.get_bool("target", "custom", false) {
        return Ok(());
    }
    allocation_from_section(config, "target").map(|_| ())
}

/// Bracket override sections must carry all six categories once any key is
/// present. Missing sections are simply not overridden.
pub fn validate_bracket_overrides(
    config: &dyn ConfigPort,
    table: &PresetTable,
) -> Result<(), FundfolioError> {
    for preset in table.presets() {
        let section = bracket_section(preset.range);
        if section_present(config, &section) {
            allocation_from_section(config, &section)?;
        }
    }
    Ok(())
}

pub fn load_profile(
    config: &dyn ConfigPort,
    now: DateTime<Utc>,
) -> Result<Profile, FundfolioError> {
    let date_of_birth = parse_date(
        config.get_string("profile", "date_of_birth").as_deref(),
        "profile",
        "date_of_birth",
    )?;

    let last_rebalanced = match config.get_string("portfolio", "last_rebalanced") {
        Some(value) => DateTime::parse_from_rfc3339(&value)
            .map_err(|_| invalid("portfolio", "last_rebalanced", "expected an RFC 3339 timestamp"))?
            .with_timezone(&Utc),
        None => now,
    };

    Ok(Profile {
        date_of_birth,
        salary: config.get_double("profile", "salary", 0.0),
        investment_percentage: config.get_double(
            "profile",
            "investment_percentage",
            DEFAULT_INVESTMENT_PERCENTAGE,
        ),
        last_rebalanced,
        funds_csv: config
            .get_string("portfolio", "funds_csv")
            .map(PathBuf::from),
    })
}

/// The default preset table with any `[bracket start-end]` overrides applied.
pub fn build_preset_table(config: &dyn ConfigPort) -> Result<PresetTable, FundfolioError> {
    let mut table = PresetTable::default();

    let overrides: Vec<(AgeRange, AssetAllocation)> = table
        .presets()
        .iter()
        .filter_map(|preset| {
            let section = bracket_section(preset.range);
            if section_present(config, &section) {
                Some(allocation_from_section(config, &section).map(|a| (preset.range, a)))
            } else {
                None
            }
        })
        .collect::<Result<_, _>>()?;

    for (range, allocation) in overrides {
        table.set_allocation(range, allocation);
    }
    Ok(table)
}

/// The target allocation for this run: the `[target]` section when
/// `custom = true`, otherwise the preset for the user's age bracket.
/// Returns the allocation and whether it was custom.
pub fn target_allocation(
    config: &dyn ConfigPort,
    profile: &Profile,
    table: &PresetTable,
    today: NaiveDate,
) -> Result<(AssetAllocation, bool), FundfolioError> {
    if config.get_bool("target", "custom", false) {
        let allocation = allocation_from_section(config, "target")?;
        return Ok((allocation, true));
    }
    let age = super::presets::age_on(today, profile.date_of_birth);
    Ok((table.resolve_bracket(age).allocation, false))
}

fn section_present(config: &dyn ConfigPort, section: &str) -> bool {
    FundCategory::ALL
        .iter()
        .any(|c| config.get_string(section, c.config_key()).is_some())
}

fn allocation_from_section(
    config: &dyn ConfigPort,
    section: &str,
) -> Result<AssetAllocation, FundfolioError> {
    let mut allocation = AssetAllocation::ZERO;
    for category in FundCategory::ALL {
        let key = category.config_key();
        let value =
            config
                .get_string(section, key)
                .ok_or_else(|| FundfolioError::ConfigMissing {
                    section: section.to_string(),
                    key: key.to_string(),
                })?;
        allocation.set(category, parse_percent(&value, section, key)?);
    }
    Ok(allocation)
}

fn parse_date(
    value: Option<&str>,
    section: &str,
    key: &str,
) -> Result<NaiveDate, FundfolioError> {
    match value {
        None => Err(FundfolioError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| invalid(section, key, "expected date format YYYY-MM-DD")),
    }
}

fn parse_number(value: &str, section: &str, key: &str) -> Result<f64, FundfolioError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, "expected a number"))
}

fn parse_percent(value: &str, section: &str, key: &str) -> Result<u32, FundfolioError> {
    let pct: u32 = value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, "expected an integer percentage"))?;
    if pct > 100 {
        return Err(invalid(section, key, "must be between 0 and 100"));
    }
    Ok(pct)
}

fn invalid(section: &str, key: &str, reason: &str) -> FundfolioError {
    FundfolioError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    const VALID: &str = r#"
[profile]
date_of_birth = 1992-03-14
salary = 85000
investment_percentage = 25

[portfolio]
funds_csv = holdings.csv
last_rebalanced = 2024-01-01T00:00:00Z
"#;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_profile_passes() {
        assert!(validate_profile_config(&adapter(VALID)).is_ok());
    }

    #[test]
    fn date_of_birth_is_required() {
        let err = validate_profile_config(&adapter("[profile]\nsalary = 100\n")).unwrap_err();
        assert!(matches!(err, FundfolioError::ConfigMissing { .. }));
    }

    #[test]
    fn bad_date_is_invalid() {
        let err =
            validate_profile_config(&adapter("[profile]\ndate_of_birth = 14/03/1992\n"))
                .unwrap_err();
        assert!(matches!(err, FundfolioError::ConfigInvalid { .. }));
    }

    #[test]
    fn negative_salary_is_invalid() {
        let content = "[profile]\ndate_of_birth = 1992-03-14\nsalary = -5\n";
        let err = validate_profile_config(&adapter(content)).unwrap_err();
        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn investment_percentage_must_be_in_range() {
        for bad in ["0", "101", "-3"] {
            let content = format!(
                "[profile]\ndate_of_birth = 1992-03-14\ninvestment_percentage = {bad}\n"
            );
            assert!(validate_profile_config(&adapter(&content)).is_err());
        }
    }

    #[test]
    fn bad_last_rebalanced_timestamp_is_invalid() {
        let content =
            "[profile]\ndate_of_birth = 1992-03-14\n[portfolio]\nlast_rebalanced = yesterday\n";
        let err = validate_profile_config(&adapter(content)).unwrap_err();
        assert!(err.to_string().contains("last_rebalanced"));
    }

    #[test]
    fn load_profile_fills_defaults() {
        let now = Utc::now();
        let profile =
            load_profile(&adapter("[profile]\ndate_of_birth = 1992-03-14\n"), now).unwrap();
        assert!((profile.salary - 0.0).abs() < f64::EPSILON);
        assert!((profile.investment_percentage - 20.0).abs() < f64::EPSILON);
        assert_eq!(profile.last_rebalanced, now);
        assert_eq!(profile.funds_csv, None);
    }

    #[test]
    fn load_profile_parses_all_fields() {
        let profile = load_profile(&adapter(VALID), Utc::now()).unwrap();
        assert_eq!(
            profile.date_of_birth,
            NaiveDate::from_ymd_opt(1992, 3, 14).unwrap()
        );
        assert!((profile.salary - 85000.0).abs() < f64::EPSILON);
        assert_eq!(profile.funds_csv, Some(PathBuf::from("holdings.csv")));
        assert_eq!(
            profile.last_rebalanced,
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap()
        );
    }

    #[test]
    fn target_defaults_to_age_bracket() {
        let config = adapter(VALID);
        let table = PresetTable::default();
        let profile = load_profile(&config, Utc::now()).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let (allocation, custom) =
            target_allocation(&config, &profile, &table, today).unwrap();
        assert!(!custom);
        // Born 1992-03-14 → age 32 → 30-35 bracket.
        assert_eq!(allocation, AssetAllocation::new(20, 35, 25, 20, 0, 0));
    }

    #[test]
    fn custom_target_overrides_age_bracket() {
        let content = format!(
            "{VALID}\n[target]\ncustom = true\ngold = 10\nnifty50 = 50\nflexicap = 20\nmidcap = 20\ndebthybrid = 0\nconservative = 0\n"
        );
        let config = adapter(&content);
        let table = PresetTable::default();
        let profile = load_profile(&config, Utc::now()).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let (allocation, custom) =
            target_allocation(&config, &profile, &table, today).unwrap();
        assert!(custom);
        assert_eq!(allocation, AssetAllocation::new(10, 50, 20, 20, 0, 0));
    }

    #[test]
    fn custom_target_with_missing_category_fails() {
        let content = format!("{VALID}\n[target]\ncustom = true\ngold = 10\n");
        let err = validate_target_config(&adapter(&content)).unwrap_err();
        assert!(matches!(err, FundfolioError::ConfigMissing { .. }));
    }

    #[test]
    fn bracket_override_replaces_one_row() {
        let content = format!(
            "{VALID}\n[bracket 25-30]\ngold = 15\nnifty50 = 35\nflexicap = 25\nmidcap = 25\ndebthybrid = 0\nconservative = 0\n"
        );
        let table = build_preset_table(&adapter(&content)).unwrap();
        assert_eq!(
            table.allocation_for_range(AgeRange::new(25, 30)),
            AssetAllocation::new(15, 35, 25, 25, 0, 0)
        );
        // Other rows untouched.
        assert_eq!(
            table.allocation_for_range(AgeRange::new(30, 35)),
            AssetAllocation::new(20, 35, 25, 20, 0, 0)
        );
    }

    #[test]
    fn partial_bracket_override_fails_validation() {
        let content = format!("{VALID}\n[bracket 25-30]\ngold = 15\n");
        let config = adapter(&content);
        let err = validate_bracket_overrides(&config, &PresetTable::default()).unwrap_err();
        assert!(matches!(err, FundfolioError::ConfigMissing { .. }));
    }

    #[test]
    fn override_percent_above_100_fails() {
        let content = format!(
            "{VALID}\n[bracket 25-30]\ngold = 150\nnifty50 = 35\nflexicap = 25\nmidcap = 25\ndebthybrid = 0\nconservative = 0\n"
        );
        let err = build_preset_table(&adapter(&content)).unwrap_err();
        assert!(matches!(err, FundfolioError::ConfigInvalid { .. }));
    }

    #[test]
    fn no_overrides_keeps_default_table() {
        let table = build_preset_table(&adapter(VALID)).unwrap();
        assert_eq!(table, PresetTable::default());
    }
}
