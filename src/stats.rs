//! Aggregation engine over an immutable set of country records.
//!
//! Every query is read-only and builds its own working state, so a single
//! `CountryFacts` can be shared across threads and queried in any order.
//!
//! Grouping by currency, language, bloc and region name is case-insensitive.
//! Groups are kept in a `BTreeMap` keyed by the lower-cased name, so a tie on
//! the ranked value goes to the alphabetically first key. The displayed name is
//! the spelling of the first record that mentioned it.

use crate::config::{NO_COUNTRY_FOUND, TOP_LANGUAGES};
use crate::error::{FactsError, Result};
use crate::models::Country;
use ahash::{AHashMap, AHashSet};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A group name with the number of members (countries, timezones) counted for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

/// A country together with the population of its bordering countries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinedPopulation {
    pub country_name: String,
    pub country_population: u64,
    /// Number of border codes listed, resolved or not.
    pub border_count: usize,
    /// Population of the bordering countries present in the dataset.
    pub bordering_population: u64,
    pub combined_population: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Density {
    pub country_name: String,
    /// Inhabitants per square kilometre.
    pub density: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AreaTotal {
    pub subregion: String,
    pub total_area: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AverageGini {
    pub bloc_name: String,
    pub average_gini: f64,
}

/// Which end of an ordering a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extreme {
    Lowest,
    Highest,
}

/// Lower-cased grouping key, `None` for blank names.
pub(crate) fn fold_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Count, per distinct name, how many countries list it. A country counts once
/// per name even if it lists the name several times.
fn count_countries_per_name<'a, F, I>(countries: &'a [Country], names: F) -> Vec<NamedCount>
where
    F: Fn(&'a Country) -> I,
    I: Iterator<Item = &'a str>,
{
    let mut tallies: BTreeMap<String, NamedCount> = BTreeMap::new();
    for country in countries {
        let mut seen = AHashSet::new();
        for name in names(country) {
            let Some(key) = fold_key(name) else { continue };
            if !seen.insert(key.clone()) {
                continue;
            }
            tallies
                .entry(key)
                .or_insert_with(|| NamedCount {
                    name: name.trim().to_string(),
                    count: 0,
                })
                .count += 1;
        }
    }
    tallies.into_values().collect()
}

/// First entry with the strictly highest count.
fn first_max(tallies: impl IntoIterator<Item = NamedCount>) -> Option<NamedCount> {
    tallies.into_iter().fold(None, |best, cur| match best {
        Some(b) if b.count >= cur.count => Some(b),
        _ => Some(cur),
    })
}

/// Read-only query engine over a loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct CountryFacts {
    countries: Vec<Country>,
    by_alpha3: AHashMap<String, usize>,
}

impl CountryFacts {
    /// Take ownership of the records and index them by alpha3 code.
    ///
    /// When two records share a code the first one wins the index slot.
    pub fn new(countries: Vec<Country>) -> Self {
        let mut by_alpha3 = AHashMap::with_capacity(countries.len());
        for (i, c) in countries.iter().enumerate() {
            let code = c.alpha3_code.trim();
            if !code.is_empty() {
                by_alpha3.entry(code.to_ascii_uppercase()).or_insert(i);
            }
        }
        debug!(
            "indexed {} countries ({} alpha3 codes)",
            countries.len(),
            by_alpha3.len()
        );
        Self {
            countries,
            by_alpha3,
        }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Resolve an alpha3 code (case-insensitive) to its record.
    pub fn find_by_alpha3(&self, code: &str) -> Option<&Country> {
        self.by_alpha3
            .get(&code.trim().to_ascii_uppercase())
            .map(|&i| &self.countries[i])
    }

    fn ensure_data(&self) -> Result<()> {
        if self.countries.is_empty() {
            return Err(FactsError::InvalidState("dataset is empty".into()));
        }
        Ok(())
    }

    fn with_gini(&self) -> impl Iterator<Item = (&Country, f64)> {
        self.countries
            .iter()
            .filter_map(|c| c.gini.map(|g| (c, g)))
    }

    /// 1-based position of `country_name` among countries with a GINI value,
    /// highest GINI first. Equal values keep dataset order and still take
    /// distinct positions. `Ok(None)` when the country has no GINI or is unknown.
    pub fn gini_rank(&self, country_name: &str) -> Result<Option<usize>> {
        self.ensure_data()?;
        let wanted = fold_key(country_name).ok_or_else(|| {
            FactsError::InvalidArgument("country name must not be empty".into())
        })?;

        let mut ranked: Vec<(&Country, f64)> = self.with_gini().collect();
        // sort_by is stable, ties stay in dataset order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(ranked
            .iter()
            .position(|(c, _)| fold_key(&c.name).as_deref() == Some(wanted.as_str()))
            .map(|i| i + 1))
    }

    /// Name of the country with the smallest GINI, or `"No country found"`.
    pub fn lowest_gini_country(&self) -> Result<String> {
        self.ensure_data()?;
        // min_by keeps the first of several equal minimums
        Ok(self
            .with_gini()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c.name.clone())
            .unwrap_or_else(|| NO_COUNTRY_FOUND.to_string()))
    }

    /// Region whose countries span the most distinct timezones.
    ///
    /// Countries without a region are skipped; blank timezone entries are ignored
    /// and timezones compare case-insensitively.
    pub fn region_with_most_timezones(&self) -> Result<Option<NamedCount>> {
        self.ensure_data()?;
        let mut zones: BTreeMap<String, (String, AHashSet<String>)> = BTreeMap::new();
        for country in self.countries.iter().filter(|c| c.region.is_specified()) {
            let label = country.region.label();
            let (_, set) = zones
                .entry(label.to_lowercase())
                .or_insert_with(|| (label.to_string(), AHashSet::new()));
            set.extend(country.timezones.iter().filter_map(|tz| fold_key(tz)));
        }
        Ok(first_max(zones.into_values().map(|(name, set)| NamedCount {
            name,
            count: set.len(),
        })))
    }

    /// Currency name used by the most countries.
    pub fn most_used_currency(&self) -> Result<Option<NamedCount>> {
        self.ensure_data()?;
        let tallies = count_countries_per_name(&self.countries, |c| {
            c.currencies.iter().filter_map(|cur| cur.name.as_deref())
        });
        Ok(first_max(tallies))
    }

    /// Up to `limit` language names, most widely spoken first.
    pub fn top_languages(&self, limit: usize) -> Result<Vec<NamedCount>> {
        self.ensure_data()?;
        let mut tallies = count_countries_per_name(&self.countries, |c| {
            c.languages.iter().filter_map(|l| l.name.as_deref())
        });
        tallies.sort_by(|a, b| b.count.cmp(&a.count));
        tallies.truncate(limit);
        Ok(tallies)
    }

    pub fn top_three_languages(&self) -> Result<Vec<NamedCount>> {
        self.top_languages(TOP_LANGUAGES)
    }

    /// Country whose own population plus that of its neighbours is the largest.
    ///
    /// Countries are grouped by their exact border list and the first country of
    /// each group represents it. Border codes missing from the dataset still count
    /// toward `border_count` but add no population. `Ok(None)` when no country
    /// has borders.
    pub fn highest_combined_population(&self) -> Result<Option<CombinedPopulation>> {
        self.ensure_data()?;
        let mut seen: AHashSet<&[String]> = AHashSet::new();
        let mut best: Option<CombinedPopulation> = None;
        for country in self.countries.iter().filter(|c| !c.borders.is_empty()) {
            if !seen.insert(country.borders.as_slice()) {
                continue;
            }
            let candidate = self.combine_with_borders(country);
            if best
                .as_ref()
                .is_none_or(|b| candidate.combined_population > b.combined_population)
            {
                best = Some(candidate);
            }
        }
        Ok(best)
    }

    fn combine_with_borders(&self, country: &Country) -> CombinedPopulation {
        let mut codes = AHashSet::new();
        let bordering_population = country
            .borders
            .iter()
            .filter(|code| codes.insert(code.trim().to_ascii_uppercase()))
            .filter_map(|code| self.find_by_alpha3(code))
            .fold(0u64, |acc, c| acc.saturating_add(c.population));
        CombinedPopulation {
            country_name: country.name.clone(),
            country_population: country.population,
            border_count: country.borders.len(),
            bordering_population,
            combined_population: country.population.saturating_add(bordering_population),
        }
    }

    /// Least or most densely populated country with a known, positive area.
    pub fn density_extreme(&self, extreme: Extreme) -> Result<Density> {
        self.ensure_data()?;
        let densities = self
            .countries
            .iter()
            .filter_map(|c| c.density().map(|d| (c, d)));
        // min_by returns the first of equal elements, max_by the last
        let picked = match extreme {
            Extreme::Lowest => densities.min_by(|a, b| a.1.total_cmp(&b.1)),
            Extreme::Highest => densities.min_by(|a, b| b.1.total_cmp(&a.1)),
        };
        picked
            .map(|(c, density)| Density {
                country_name: c.name.clone(),
                density,
            })
            .ok_or_else(|| {
                FactsError::InvalidState("no country has a known, positive area".into())
            })
    }

    /// Subregion with the largest summed area. Subregion names match exactly.
    pub fn largest_subregion_by_area(&self) -> Result<Option<AreaTotal>> {
        self.ensure_data()?;
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for country in &self.countries {
            let (Some(subregion), Some(area)) = (country.subregion.as_deref(), country.area) else {
                continue;
            };
            if subregion.trim().is_empty() {
                continue;
            }
            *totals.entry(subregion).or_default() += area;
        }
        Ok(totals
            .into_iter()
            .min_by(|a, b| b.1.total_cmp(&a.1))
            .map(|(subregion, total_area)| AreaTotal {
                subregion: subregion.to_string(),
                total_area,
            }))
    }

    /// Regional bloc with the lowest mean GINI over its members that have one.
    ///
    /// Blocs where no member has a GINI value have no average and are left out.
    pub fn lowest_average_gini_bloc(&self) -> Result<Option<AverageGini>> {
        self.ensure_data()?;
        let mut blocs: BTreeMap<String, (String, f64, usize)> = BTreeMap::new();
        for country in &self.countries {
            let mut seen = AHashSet::new();
            for name in country.regional_blocs.iter().filter_map(|b| b.name.as_deref()) {
                let Some(key) = fold_key(name) else { continue };
                if !seen.insert(key.clone()) {
                    continue;
                }
                let (_, sum, members) = blocs
                    .entry(key)
                    .or_insert_with(|| (name.trim().to_string(), 0.0, 0));
                if let Some(g) = country.gini {
                    *sum += g;
                    *members += 1;
                }
            }
        }
        Ok(blocs
            .into_values()
            .filter(|(_, _, members)| *members > 0)
            .map(|(bloc_name, sum, members)| AverageGini {
                bloc_name,
                average_gini: sum / members as f64,
            })
            .min_by(|a, b| a.average_gini.total_cmp(&b.average_gini)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_key_trims_and_lowercases() {
        assert_eq!(fold_key("  South African Rand "), Some("south african rand".into()));
        assert_eq!(fold_key("   "), None);
        assert_eq!(fold_key(""), None);
    }

    #[test]
    fn first_max_keeps_earliest_on_tie() {
        let got = first_max(vec![
            NamedCount {
                name: "a".into(),
                count: 2,
            },
            NamedCount {
                name: "b".into(),
                count: 3,
            },
            NamedCount {
                name: "c".into(),
                count: 3,
            },
        ]);
        assert_eq!(got.unwrap().name, "b");
        assert_eq!(first_max(Vec::new()), None);
    }
}
