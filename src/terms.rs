use chrono::{Datelike, NaiveDate};

use crate::error::{ConfigError, Result};
use crate::models::{TermConfig, TermMode};

/// Non-leap year used to turn "MM-DD" values into comparable ordinals.
const REFERENCE_YEAR: i32 = 2003;

/// Zero-based day of year (Jan 1 = 0) of a "MM-DD" value in the reference year.
pub fn day_of_year(month_day: &str) -> Result<u32> {
    let invalid = || ConfigError::InvalidMonthDay(month_day.to_string());

    let (month, day) = month_day.trim().split_once('-').ok_or_else(invalid)?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let day: u32 = day.trim().parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
        .map(|date| date.ordinal0())
        .ok_or_else(invalid)
}

/// Checks that the active terms start on strictly increasing days of the year.
///
/// A single term needs no ordering, so its start day is not parsed at all. Start
/// days of terms beyond the configured mode are never parsed either.
pub fn check_term_config(config: &TermConfig) -> Result<()> {
    if config.termmode == TermMode::One {
        return Ok(());
    }

    let start_days = config
        .active_start_days()
        .ok_or_else(|| ConfigError::UnknownTermMode(config.termmode.into()))?;

    let ordinals = start_days
        .iter()
        .map(|day| day_of_year(day))
        .collect::<Result<Vec<_>>>()?;

    for (index, pair) in ordinals.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(ConfigError::TermsOutOfOrder {
                earlier: index + 1,
                earlier_day: pair[0],
                later: index + 2,
                later_day: pair[1],
            });
        }
    }

    Ok(())
}

/// Whether the term configuration makes sense. Unparseable start days of active
/// terms in modes Two to Four, and unknown term modes, count as invalid.
pub fn is_valid(config: &TermConfig) -> bool {
    match check_term_config(config) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("term configuration rejected: {err}");
            false
        }
    }
}
