use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffSource {
    Evidence,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMarketProfile {
    pub country: String,
    /// Import duty in percent.
    pub tariff_rate: f64,
    pub tariff_source: TariffSource,
    pub market_size: String,
    pub competitors: String,
    pub entry_channels: Vec<String>,
    pub regulations: Vec<String>,
    pub incentives: BTreeMap<String, String>,
}

impl CountryMarketProfile {
    pub fn tariff_is_default(&self) -> bool {
        self.tariff_source == TariffSource::Default
    }
}

/// Country-keyed profiles that remember the order countries were requested in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileSet {
    profiles: Vec<CountryMarketProfile>,
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a profile, replacing any existing one for the same country in place.
    pub fn insert(&mut self, profile: CountryMarketProfile) {
        match self
            .profiles
            .iter_mut()
            .find(|existing| existing.country == profile.country)
        {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    pub fn get(&self, country: &str) -> Option<&CountryMarketProfile> {
        self.profiles.iter().find(|p| p.country == country)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.get(country).is_some()
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.country.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryMarketProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<CountryMarketProfile> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = CountryMarketProfile>>(iter: I) -> Self {
        let mut set = ProfileSet::new();
        for profile in iter {
            set.insert(profile);
        }
        set
    }
}

impl Serialize for ProfileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.profiles.len()))?;
        for profile in &self.profiles {
            map.serialize_entry(&profile.country, profile)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProfileSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, CountryMarketProfile>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|(country, mut profile)| {
                profile.country = country;
                profile
            })
            .collect())
    }
}
