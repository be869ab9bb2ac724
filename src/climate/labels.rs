use std::collections::BTreeMap;

/// Köppen-Geiger classification codes and their descriptive names.
const KOPPEN: &[(&str, &str)] = &[
    ("Af", "Tropical rainforest"),
    ("Am", "Tropical monsoon"),
    ("Aw", "Tropical savanna"),
    ("As", "Tropical dry-summer savanna"),
    ("BWh", "Hot desert"),
    ("BWk", "Cold desert"),
    ("BSh", "Hot semi-arid"),
    ("BSk", "Cold semi-arid"),
    ("Csa", "Hot-summer Mediterranean"),
    ("Csb", "Warm-summer Mediterranean"),
    ("Csc", "Cold-summer Mediterranean"),
    ("Cwa", "Monsoon-influenced humid subtropical"),
    ("Cwb", "Subtropical highland"),
    ("Cwc", "Cold subtropical highland"),
    ("Cfa", "Humid subtropical"),
    ("Cfb", "Oceanic"),
    ("Cfc", "Subpolar oceanic"),
    ("Dsa", "Hot-summer Mediterranean continental"),
    ("Dsb", "Warm-summer Mediterranean continental"),
    ("Dsc", "Mediterranean-influenced subarctic"),
    ("Dsd", "Mediterranean-influenced extremely cold subarctic"),
    ("Dwa", "Monsoon-influenced hot-summer humid continental"),
    ("Dwb", "Monsoon-influenced warm-summer humid continental"),
    ("Dwc", "Monsoon-influenced subarctic"),
    ("Dwd", "Monsoon-influenced extremely cold subarctic"),
    ("Dfa", "Hot-summer humid continental"),
    ("Dfb", "Warm-summer humid continental"),
    ("Dfc", "Subarctic"),
    ("Dfd", "Extremely cold subarctic"),
    ("ET", "Tundra"),
    ("EF", "Ice cap"),
];

/// Immutable code → label dictionary, built once at startup and passed by
/// reference to whatever needs display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateLabels {
    labels: BTreeMap<String, String>,
}

impl ClimateLabels {
    /// The Köppen-Geiger dictionary.
    pub fn koppen() -> Self {
        KOPPEN.iter().copied().collect()
    }

    /// Display name for `code`. Lookup is exact and case-sensitive; unknown
    /// codes are their own label.
    pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
        self.labels.get(code).map(String::as_str).unwrap_or(code)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClimateLabels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ClimateLabels {
            labels: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
