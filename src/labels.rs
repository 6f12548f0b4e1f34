use crate::models::{TermYearPosition, YearSeparation};

/// Joins the first and optional second year of a term.
pub fn combine_years(year: &str, year2: &str, separation: YearSeparation) -> String {
    if year2.is_empty() {
        return year.to_string();
    }

    match separation {
        YearSeparation::Hyphen => format!("{year}-{year2}"),
        YearSeparation::Slash => format!("{year}/{year2}"),
        YearSeparation::Underscore => format!("{year}_{year2}"),
        YearSeparation::None => year.to_string(),
        YearSeparation::Unrecognized(code) => {
            log::warn!("unknown term year separation {code}, using a slash");
            format!("{year}/{year2}")
        }
    }
}

/// Display name of a term for the term filter, e.g. `"2023-2024 Fall"`.
///
/// `year2` is empty for terms inside a single year. An unknown position places the
/// year in front with a space.
pub fn term_display_name(
    term_name: &str,
    year: &str,
    year2: &str,
    separation: YearSeparation,
    position: TermYearPosition,
) -> String {
    let years = combine_years(year, year2, separation);

    match position {
        TermYearPosition::PrefixSpace => format!("{years} {term_name}"),
        TermYearPosition::PrefixNoSpace => format!("{years}{term_name}"),
        TermYearPosition::SuffixSpace => format!("{term_name} {years}"),
        TermYearPosition::SuffixNoSpace => format!("{term_name}{years}"),
        TermYearPosition::Unrecognized(code) => {
            log::warn!("unknown term year position {code}, placing year first");
            format!("{years} {term_name}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_year_joined_by_separator() {
        assert_eq!(combine_years("2023", "2024", YearSeparation::Hyphen), "2023-2024");
        assert_eq!(combine_years("2023", "2024", YearSeparation::Slash), "2023/2024");
        assert_eq!(combine_years("2023", "2024", YearSeparation::Underscore), "2023_2024");
        assert_eq!(combine_years("2023", "2024", YearSeparation::None), "2023");
        assert_eq!(
            combine_years("2023", "2024", YearSeparation::Unrecognized(0)),
            "2023/2024"
        );
    }

    #[test]
    fn single_year_ignores_separator() {
        assert_eq!(combine_years("2023", "", YearSeparation::Underscore), "2023");
        assert_eq!(combine_years("2023", "", YearSeparation::Unrecognized(7)), "2023");
    }

    #[test]
    fn term_name_placement() {
        let label = |pos| term_display_name("Fall", "2023", "2024", YearSeparation::Hyphen, pos);

        assert_eq!(label(TermYearPosition::PrefixSpace), "2023-2024 Fall");
        assert_eq!(label(TermYearPosition::PrefixNoSpace), "2023-2024Fall");
        assert_eq!(label(TermYearPosition::SuffixSpace), "Fall 2023-2024");
        assert_eq!(label(TermYearPosition::SuffixNoSpace), "Fall2023-2024");
    }

    #[test]
    fn single_year_suffix_without_space() {
        assert_eq!(
            term_display_name(
                "Fall",
                "2023",
                "",
                YearSeparation::Hyphen,
                TermYearPosition::SuffixNoSpace
            ),
            "Fall2023"
        );
    }

    #[test]
    fn unknown_position_keeps_the_year() {
        assert_eq!(
            term_display_name(
                "Spring",
                "2024",
                "",
                YearSeparation::Slash,
                TermYearPosition::Unrecognized(0)
            ),
            "2024 Spring"
        );
    }
}
