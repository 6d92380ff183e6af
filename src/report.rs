//! The ten-line country facts report.

use crate::error::Result;
use crate::stats::{
    AreaTotal, AverageGini, CombinedPopulation, CountryFacts, Density, Extreme, NamedCount,
};
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Results of every query, gathered before anything is printed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Country whose GINI rank is reported.
    pub subject: String,
    pub subject_gini_rank: Option<usize>,
    pub lowest_gini_country: String,
    pub region_with_most_timezones: Option<NamedCount>,
    pub most_used_currency: Option<NamedCount>,
    pub top_languages: Vec<NamedCount>,
    pub highest_combined_population: Option<CombinedPopulation>,
    pub lowest_density: Density,
    pub highest_density: Density,
    pub largest_subregion: Option<AreaTotal>,
    pub lowest_gini_bloc: Option<AverageGini>,
}

impl Report {
    /// Run all queries. The first failing query aborts the report.
    pub fn build(facts: &CountryFacts, subject: &str) -> Result<Self> {
        Ok(Self {
            subject: subject.to_string(),
            subject_gini_rank: facts.gini_rank(subject)?,
            lowest_gini_country: facts.lowest_gini_country()?,
            region_with_most_timezones: facts.region_with_most_timezones()?,
            most_used_currency: facts.most_used_currency()?,
            top_languages: facts.top_three_languages()?,
            highest_combined_population: facts.highest_combined_population()?,
            lowest_density: facts.density_extreme(Extreme::Lowest)?,
            highest_density: facts.density_extreme(Extreme::Highest)?,
            largest_subregion: facts.largest_subregion_by_area()?,
            lowest_gini_bloc: facts.lowest_average_gini_bloc()?,
        })
    }

    /// One sentence per query, numbered 1 to 10.
    pub fn lines(&self) -> Vec<String> {
        let rank = match self.subject_gini_rank {
            Some(r) => format!("{}'s Gini coefficient is the {} highest", self.subject, ordinal(r)),
            None => format!("{} has no ranked Gini coefficient", self.subject),
        };

        let lowest_gini = format!("{} has the lowest Gini coefficient", self.lowest_gini_country);

        let timezones = match &self.region_with_most_timezones {
            Some(r) => format!(
                "{} is the region that spans most timezones at {} timezones",
                r.name, r.count
            ),
            None => "No region lists any timezones".to_string(),
        };

        let currency = match &self.most_used_currency {
            Some(c) => format!(
                "{} is the most popular currency and is used in {} countries",
                c.name, c.count
            ),
            None => "No currency is listed for any country".to_string(),
        };

        let languages = if self.top_languages.is_empty() {
            "No language is listed for any country".to_string()
        } else {
            let names: Vec<&str> = self.top_languages.iter().map(|l| l.name.as_str()).collect();
            let label = match names.len() {
                1 => "The most popular language is",
                2 => "The top two popular languages are",
                _ => "The top three popular languages are",
            };
            format!("{} {}", label, join_and(&names))
        };

        let combined = match &self.highest_combined_population {
            Some(c) => format!(
                "{} and its {} bordering countries has the highest combined population of {}",
                c.country_name,
                c.border_count,
                fmt_count(c.combined_population)
            ),
            None => "No country lists any bordering countries".to_string(),
        };

        let low_density = format!(
            "{} has the lowest population density of {}",
            self.lowest_density.country_name,
            fmt_decimal(self.lowest_density.density)
        );
        let high_density = format!(
            "{} has the highest population density of {}",
            self.highest_density.country_name,
            fmt_decimal(self.highest_density.density)
        );

        let subregion = match &self.largest_subregion {
            Some(s) => format!(
                "{} is the subregion that covers the most area at {} km²",
                s.subregion,
                fmt_decimal(s.total_area)
            ),
            None => "No subregion has a known area".to_string(),
        };

        let bloc = match &self.lowest_gini_bloc {
            Some(b) => format!(
                "{} is the regional block with the lowest average Gini coefficient of {}",
                b.bloc_name,
                fmt_decimal(b.average_gini)
            ),
            None => "No regional block has members with a Gini coefficient".to_string(),
        };

        [
            rank,
            lowest_gini,
            timezones,
            currency,
            languages,
            combined,
            low_density,
            high_density,
            subregion,
            bloc,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// `1` -> `1st`, `12` -> `12th`, `23` -> `23rd`.
///
/// Numbers ending in 11, 12 or 13 always take `th`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Integer with English thousands separators (`148,519,300`).
pub fn fmt_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Round to two decimals; non-finite values print as `NA`.
pub fn fmt_decimal(v: f64) -> String {
    if v.is_finite() {
        format!("{:.2}", v)
    } else {
        "NA".to_string()
    }
}

fn join_and(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (101, "101st"),
            (111, "111th"),
            (112, "112th"),
            (113, "113th"),
        ];
        for (n, want) in cases {
            assert_eq!(ordinal(n), want, "ordinal({})", n);
        }
    }

    #[test]
    fn join_and_lists() {
        assert_eq!(join_and(&["English"]), "English");
        assert_eq!(join_and(&["English", "French"]), "English and French");
        assert_eq!(
            join_and(&["English", "Afrikaans", "French"]),
            "English, Afrikaans and French"
        );
    }

    #[test]
    fn decimals_round_to_two_places() {
        assert_eq!(fmt_decimal(19009.900990099), "19009.90");
        assert_eq!(fmt_decimal(f64::NAN), "NA");
        assert_eq!(fmt_count(148_519_300), "148,519,300");
    }
}
