use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the reference dataset
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_CLASS: &str = "class";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Every column a dataset must carry, in reference order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_CLASS,
    COL_PAYLOAD_MASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// LaunchSite – the fixed site enumeration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaunchSite {
    CcafsLc40,
    VafbSlc4e,
    KscLc39a,
    CcafsSlc40,
}

/// Site ↔ name table, in dropdown order.
const SITE_NAMES: [(LaunchSite, &str); 4] = [
    (LaunchSite::CcafsLc40, "CCAFS LC-40"),
    (LaunchSite::VafbSlc4e, "VAFB SLC-4E"),
    (LaunchSite::KscLc39a, "KSC LC-39A"),
    (LaunchSite::CcafsSlc40, "CCAFS SLC-40"),
];

impl LaunchSite {
    /// All sites in dropdown order.
    pub const ALL: [LaunchSite; 4] = [
        LaunchSite::CcafsLc40,
        LaunchSite::VafbSlc4e,
        LaunchSite::KscLc39a,
        LaunchSite::CcafsSlc40,
    ];

    /// The site name exactly as it appears in the dataset.
    pub fn as_str(self) -> &'static str {
        SITE_NAMES
            .iter()
            .find(|(site, _)| *site == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    /// Look a site up by its dataset name.
    pub fn from_name(name: &str) -> Option<LaunchSite> {
        SITE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(site, _)| *site)
    }
}

impl fmt::Display for LaunchSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value: success = 1, failure = 0.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn from_class(class: u8) -> Option<Outcome> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Accepts integral text such as `1` as well as float spellings like `1.0`.
    pub fn parse_class(s: &str) -> Option<Outcome> {
        let s = s.trim();
        if let Ok(i) = s.parse::<u8>() {
            return Outcome::from_class(i);
        }
        match s.parse::<f64>() {
            Ok(v) if v == 0.0 => Some(Outcome::Failure),
            Ok(v) if v == 1.0 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: LaunchSite,
    pub outcome: Outcome,
    /// Always finite and non-negative.
    pub payload_mass_kg: f64,
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: LaunchSite,
        outcome: Outcome,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
    ) -> Self {
        LaunchRecord {
            site,
            outcome,
            payload_mass_kg,
            booster_category: booster_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full record set with derived scalars pre-computed at load.
///
/// Never mutated after construction; every view is recomputed from it.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    /// Sites in order of first appearance.
    sites: Vec<LaunchSite>,
    booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    /// Build a dataset from validated records. Returns `None` when empty,
    /// since payload bounds are undefined without rows.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut min_payload = first.payload_mass_kg;
        let mut max_payload = first.payload_mass_kg;
        let mut sites: Vec<LaunchSite> = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if !sites.contains(&rec.site) {
                sites.push(rec.site);
            }
            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.insert(rec.booster_category.clone());
            }
        }

        Some(LaunchDataset {
            records,
            min_payload,
            max_payload,
            sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn sites(&self) -> &[LaunchSite] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Number of records launched from `site`.
    pub fn count_for_site(&self, site: LaunchSite) -> usize {
        self.records.iter().filter(|r| r.site == site).count()
    }

    /// Number of records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_names_round_trip_through_the_table() {
        for site in LaunchSite::ALL {
            assert_eq!(LaunchSite::from_name(site.as_str()), Some(site));
        }
        assert_eq!(LaunchSite::from_name("Boca Chica"), None);
    }

    #[test]
    fn class_parsing_accepts_integer_and_float_spellings() {
        assert_eq!(Outcome::parse_class("1"), Some(Outcome::Success));
        assert_eq!(Outcome::parse_class("0.0"), Some(Outcome::Failure));
        assert_eq!(Outcome::parse_class(" 1.0 "), Some(Outcome::Success));
        assert_eq!(Outcome::parse_class("2"), None);
        assert_eq!(Outcome::parse_class("0.5"), None);
        assert_eq!(Outcome::parse_class("yes"), None);
    }

    #[test]
    fn dataset_tracks_bounds_sites_and_categories() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new(LaunchSite::KscLc39a, Outcome::Success, 2500.0, "FT"),
            LaunchRecord::new(LaunchSite::CcafsLc40, Outcome::Failure, 0.0, "v1.0"),
            LaunchRecord::new(LaunchSite::KscLc39a, Outcome::Success, 9600.0, "B4"),
        ])
        .unwrap();

        assert_eq!(ds.record_count(), 3);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(ds.sites(), &[LaunchSite::KscLc39a, LaunchSite::CcafsLc40]);
        assert_eq!(ds.count_for_site(LaunchSite::KscLc39a), 2);
        assert_eq!(ds.count_for_site(LaunchSite::VafbSlc4e), 0);
        let cats: Vec<&str> = ds.booster_categories().iter().map(String::as_str).collect();
        assert_eq!(cats, vec!["B4", "FT", "v1.0"]);
    }

    #[test]
    fn empty_record_set_has_no_dataset() {
        assert!(LaunchDataset::from_records(Vec::new()).is_none());
    }
}
