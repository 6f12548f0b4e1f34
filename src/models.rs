use serde::{Deserialize, Serialize};

/// Resource types that get a "new since last visit" badge, in display order.
pub const TRACKED_RESOURCE_TYPES: &[&str] = &["book", "folder", "page", "resource", "url"];

/// Number of terms the campus splits an academic year into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TermMode {
    One,
    Two,
    Three,
    Four,
    Unrecognized(i64),
}

impl TermMode {
    /// Number of active terms, `None` for an unknown mode.
    pub fn active_terms(self) -> Option<usize> {
        match self {
            TermMode::One => Some(1),
            TermMode::Two => Some(2),
            TermMode::Three => Some(3),
            TermMode::Four => Some(4),
            TermMode::Unrecognized(_) => None,
        }
    }
}

impl From<i64> for TermMode {
    fn from(code: i64) -> Self {
        match code {
            1 => TermMode::One,
            2 => TermMode::Two,
            3 => TermMode::Three,
            4 => TermMode::Four,
            other => TermMode::Unrecognized(other),
        }
    }
}

impl From<TermMode> for i64 {
    fn from(mode: TermMode) -> Self {
        match mode {
            TermMode::One => 1,
            TermMode::Two => 2,
            TermMode::Three => 3,
            TermMode::Four => 4,
            TermMode::Unrecognized(code) => code,
        }
    }
}

/// How teacher names are rendered in the second row of a course entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TeacherNameStyle {
    Full,
    Last,
    First,
    Display,
    Unrecognized(i64),
}

impl From<i64> for TeacherNameStyle {
    fn from(code: i64) -> Self {
        match code {
            1 => TeacherNameStyle::Full,
            2 => TeacherNameStyle::Last,
            3 => TeacherNameStyle::First,
            4 => TeacherNameStyle::Display,
            other => TeacherNameStyle::Unrecognized(other),
        }
    }
}

impl From<TeacherNameStyle> for i64 {
    fn from(style: TeacherNameStyle) -> Self {
        match style {
            TeacherNameStyle::Full => 1,
            TeacherNameStyle::Last => 2,
            TeacherNameStyle::First => 3,
            TeacherNameStyle::Display => 4,
            TeacherNameStyle::Unrecognized(code) => code,
        }
    }
}

/// Separator between the two years of a term spanning a year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum YearSeparation {
    Hyphen,
    Slash,
    Underscore,
    /// Show the first year only.
    None,
    Unrecognized(i64),
}

impl From<i64> for YearSeparation {
    fn from(code: i64) -> Self {
        match code {
            1 => YearSeparation::Hyphen,
            2 => YearSeparation::Slash,
            3 => YearSeparation::Underscore,
            4 => YearSeparation::None,
            other => YearSeparation::Unrecognized(other),
        }
    }
}

impl From<YearSeparation> for i64 {
    fn from(sep: YearSeparation) -> Self {
        match sep {
            YearSeparation::Hyphen => 1,
            YearSeparation::Slash => 2,
            YearSeparation::Underscore => 3,
            YearSeparation::None => 4,
            YearSeparation::Unrecognized(code) => code,
        }
    }
}

/// Where the year goes relative to the term name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TermYearPosition {
    PrefixSpace,
    PrefixNoSpace,
    SuffixSpace,
    SuffixNoSpace,
    Unrecognized(i64),
}

impl From<i64> for TermYearPosition {
    fn from(code: i64) -> Self {
        match code {
            1 => TermYearPosition::PrefixSpace,
            2 => TermYearPosition::PrefixNoSpace,
            3 => TermYearPosition::SuffixSpace,
            4 => TermYearPosition::SuffixNoSpace,
            other => TermYearPosition::Unrecognized(other),
        }
    }
}

impl From<TermYearPosition> for i64 {
    fn from(pos: TermYearPosition) -> Self {
        match pos {
            TermYearPosition::PrefixSpace => 1,
            TermYearPosition::PrefixNoSpace => 2,
            TermYearPosition::SuffixSpace => 3,
            TermYearPosition::SuffixNoSpace => 4,
            TermYearPosition::Unrecognized(code) => code,
        }
    }
}

/// Term related block settings. Field names follow the host's setting keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermConfig {
    pub termmode: TermMode,
    pub term1startday: String,
    pub term2startday: String,
    pub term3startday: String,
    pub term4startday: String,
    pub secondrowshowteachernamestyle: TeacherNameStyle,
    pub termyearseparation: YearSeparation,
    pub termyearpos: TermYearPosition,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            termmode: TermMode::One,
            term1startday: "01-01".to_string(),
            term2startday: String::new(),
            term3startday: String::new(),
            term4startday: String::new(),
            secondrowshowteachernamestyle: TeacherNameStyle::Full,
            termyearseparation: YearSeparation::Hyphen,
            termyearpos: TermYearPosition::PrefixSpace,
        }
    }
}

impl TermConfig {
    /// Start days of the terms that are active for the configured mode.
    pub fn active_start_days(&self) -> Option<Vec<&str>> {
        let all = [
            self.term1startday.as_str(),
            self.term2startday.as_str(),
            self.term3startday.as_str(),
            self.term4startday.as_str(),
        ];
        self.termmode
            .active_terms()
            .map(|count| all[..count].to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRecord {
    /// Role relevance, lower is more relevant.
    pub sortorder: i64,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub sortorder: i64,
    pub name: String,
}

/// A course module as seen by the notification counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEvent {
    pub type_tag: String,
    /// Epoch seconds when the module was added.
    pub added: i64,
    pub visible: bool,
    pub has_view: bool,
}

/// A meta-link enrolment pointing from a child course to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaLink {
    pub parent_id: i64,
    pub parent_code: String,
    pub child_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRef {
    pub id: i64,
    pub shortname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_variants_and_back() {
        assert_eq!(TermMode::from(3), TermMode::Three);
        assert_eq!(i64::from(TermYearPosition::from(9)), 9);
        assert_eq!(YearSeparation::from(4), YearSeparation::None);
        assert_eq!(
            TeacherNameStyle::from(0),
            TeacherNameStyle::Unrecognized(0)
        );
    }

    #[test]
    fn only_active_terms_are_returned() {
        let config = TermConfig {
            termmode: TermMode::Two,
            term1startday: "09-01".to_string(),
            term2startday: "02-01".to_string(),
            term3startday: "not a date".to_string(),
            ..TermConfig::default()
        };
        assert_eq!(config.active_start_days(), Some(vec!["09-01", "02-01"]));

        let unknown = TermConfig {
            termmode: TermMode::Unrecognized(7),
            ..config
        };
        assert_eq!(unknown.active_start_days(), None);
    }

    #[test]
    fn config_deserializes_from_integer_codes() {
        let json = r#"{"termmode": 2, "term1startday": "09-01", "term2startday": "02-15",
            "secondrowshowteachernamestyle": 3, "termyearseparation": 2, "termyearpos": 5}"#;
        let config: TermConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.termmode, TermMode::Two);
        assert_eq!(config.secondrowshowteachernamestyle, TeacherNameStyle::First);
        assert_eq!(config.termyearseparation, YearSeparation::Slash);
        assert_eq!(config.termyearpos, TermYearPosition::Unrecognized(5));
        assert_eq!(config.term3startday, "");
    }
}
