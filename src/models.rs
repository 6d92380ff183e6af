use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Continental region a country belongs to.
///
/// The API encodes "no region" as an empty string; `null` and a missing field
/// are treated the same way. Labels outside the known set are kept verbatim in
/// `Other` so one unexpected record does not reject the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    #[default]
    Unspecified,
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    Polar,
    Other(String),
}

impl Region {
    /// Label as it appears on the wire (`""` for `Unspecified`).
    pub fn label(&self) -> &str {
        match self {
            Region::Unspecified => "",
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Polar => "Polar",
            Region::Other(label) => label.as_str(),
        }
    }

    pub fn is_specified(&self) -> bool {
        *self != Region::Unspecified
    }

    /// Case-insensitive lookup; blank input maps to `Unspecified`, anything
    /// unknown to `Other` with the trimmed label.
    pub fn from_label(label: &str) -> Region {
        match label.trim().to_ascii_lowercase().as_str() {
            "" => Region::Unspecified,
            "africa" => Region::Africa,
            "americas" => Region::Americas,
            "asia" => Region::Asia,
            "europe" => Region::Europe,
            "oceania" => Region::Oceania,
            "polar" => Region::Polar,
            _ => Region::Other(label.trim().to_string()),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let region = raw.as_deref().map(Region::from_label).unwrap_or_default();
        if let Region::Other(label) = &region {
            warn!("unknown region `{}`, grouping it under its own label", label);
        }
        Ok(region)
    }
}

/// Serde helper: treat JSON `null` like an absent field (empty list or map).
fn de_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default)]
    pub iso639_1: Option<String>,
    #[serde(default)]
    pub iso639_2: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "nativeName")]
    pub native_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalBloc {
    #[serde(default)]
    pub acronym: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub other_acronyms: Vec<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub other_names: Vec<String>,
}

/// One country record as served by the REST Countries v2 API.
///
/// `area` and `gini` stay `None` when unknown so aggregates can skip them
/// instead of counting a zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub top_level_domain: Vec<String>,
    #[serde(default)]
    pub alpha2_code: String,
    #[serde(default)]
    pub alpha3_code: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub calling_codes: Vec<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub alt_spellings: Vec<String>,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub latlng: Vec<f64>,
    #[serde(default)]
    pub demonym: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub gini: Option<f64>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub timezones: Vec<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub borders: Vec<String>,
    #[serde(default)]
    pub native_name: Option<String>,
    #[serde(default)]
    pub numeric_code: Option<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub currencies: Vec<Currency>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub languages: Vec<Language>,
    /// Country name keyed by language code (`de`, `es`, `fr`, ...).
    #[serde(default, deserialize_with = "de_or_default")]
    pub translations: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub regional_blocs: Vec<RegionalBloc>,
    #[serde(default)]
    pub cioc: Option<String>,
}

impl Country {
    /// Population per unit of area, when the area is known and positive.
    pub fn density(&self) -> Option<f64> {
        match self.area {
            Some(a) if a > 0.0 => Some(self.population as f64 / a),
            _ => None,
        }
    }
}
