use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Nominal home counties (and optionally the current seat count) of one region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionReference {
    pub region: String,
    #[serde(deserialize_with = "county_list")]
    pub home_counties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
}

impl RegionReference {
    pub fn new(region: impl Into<String>, home_counties: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            region: region.into(),
            home_counties: home_counties.into_iter().map(Into::into).collect(),
            seats: None,
        }
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = Some(seats);
        self
    }
}

/// Split a comma separated county list such as `"CORK,KERRY"`.
pub fn parse_county_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|county| !county.is_empty())
        .map(str::to_string)
        .collect()
}

/// Home counties may be given as a JSON list or as a comma separated string.
fn county_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Counties { List(Vec<String>), Text(String) }

    Ok(match Counties::deserialize(deserializer)? {
        Counties::List(list) => list,
        Counties::Text(text) => parse_county_list(&text),
    })
}

/// Region → home-county reference table, consulted read-only by the
/// county-boundary term and by VNA reporting.
#[derive(Clone, Debug, Default)]
pub struct ReferenceTable {
    entries: AHashMap<String, RegionReference>,
}

impl ReferenceTable {
    pub fn new() -> Self { Self::default() }

    /// Insert an entry, replacing any previous entry for the same region.
    pub fn insert(&mut self, entry: RegionReference) {
        self.entries.insert(entry.region.clone(), entry);
    }

    #[inline] pub fn get(&self, region: &str) -> Option<&RegionReference> { self.entries.get(region) }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &RegionReference> + '_ { self.entries.values() }
}

impl FromIterator<RegionReference> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = RegionReference>>(iter: I) -> Self {
        let mut table = Self::new();
        iter.into_iter().for_each(|entry| table.insert(entry));
        table
    }
}
