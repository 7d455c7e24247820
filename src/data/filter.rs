use std::fmt;

use super::model::{LaunchDataset, LaunchRecord, LaunchSite, Outcome};

// ---------------------------------------------------------------------------
// Selection inputs
// ---------------------------------------------------------------------------

/// Dropdown value meaning "every site".
pub const ALL_SITES: &str = "ALL";

/// Site half of the selection.
///
/// `Unmapped` carries a dropdown value that names neither `ALL` nor a known
/// site; every view computed from it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(LaunchSite),
    Unmapped(String),
}

impl SiteFilter {
    /// Interpret a raw dropdown value.
    pub fn from_value(value: &str) -> SiteFilter {
        if value == ALL_SITES {
            return SiteFilter::All;
        }
        match LaunchSite::from_name(value) {
            Some(site) => SiteFilter::Site(site),
            None => SiteFilter::Unmapped(value.to_string()),
        }
    }

    /// The raw dropdown value this filter corresponds to.
    pub fn value(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES,
            SiteFilter::Site(site) => site.as_str(),
            SiteFilter::Unmapped(v) => v,
        }
    }

    /// Whether a record passes the site half of the filter.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(site) => record.site == *site,
            SiteFilter::Unmapped(_) => false,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Closed payload interval `[low, high]` in kilograms, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Returns `None` unless both ends are numbers and `low <= high`.
    pub fn new(low: f64, high: f64) -> Option<Self> {
        (low <= high).then_some(PayloadRange { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive at both ends.
    pub fn contains(&self, mass_kg: f64) -> bool {
        mass_kg >= self.low && mass_kg <= self.high
    }

    /// Clamp both ends into `bounds`, keeping the interval ordered.
    pub fn clamped_to(&self, bounds: &PayloadRange) -> PayloadRange {
        let low = self.low.clamp(bounds.low, bounds.high);
        let high = self.high.clamp(bounds.low, bounds.high);
        PayloadRange {
            low,
            high: high.max(low),
        }
    }
}

impl PayloadRange {
    /// The dataset's observed `[min, max]` payload: slider bounds and the
    /// default range.
    pub fn bounds_of(dataset: &LaunchDataset) -> PayloadRange {
        PayloadRange {
            low: dataset.min_payload(),
            high: dataset.max_payload(),
        }
    }
}

/// Everything the user has picked: site and payload range.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteFilter,
    pub payload: PayloadRange,
}

impl Selection {
    /// All sites, full payload range.
    pub fn default_for(dataset: &LaunchDataset) -> Selection {
        Selection {
            site: SiteFilter::All,
            payload: PayloadRange::bounds_of(dataset),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome aggregation (pie-chart data)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SiteSuccessRate {
    pub site: LaunchSite,
    /// Mean of the class column, in `[0, 1]`.
    pub mean_outcome: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeCount {
    pub outcome: Outcome,
    pub count: usize,
}

/// Pie-chart result set.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeSummary {
    /// One row per site present, in order of first appearance.
    BySite(Vec<SiteSuccessRate>),
    /// One row per outcome present for a single site, failures first.
    ByOutcome(Vec<OutcomeCount>),
}

/// Aggregate launch outcomes for the pie chart.
///
/// * `All` → mean outcome per site.
/// * one site → record count per outcome for that site.
/// * unmapped → empty.
pub fn outcome_summary(records: &[LaunchRecord], site: &SiteFilter) -> OutcomeSummary {
    match site {
        SiteFilter::All => OutcomeSummary::BySite(success_rate_by_site(records)),
        SiteFilter::Site(_) => OutcomeSummary::ByOutcome(outcome_counts(
            records.iter().filter(|r| site.matches(r)),
        )),
        SiteFilter::Unmapped(value) => {
            log::warn!("No launch site named '{value}', outcome summary is empty");
            OutcomeSummary::ByOutcome(Vec::new())
        }
    }
}

fn success_rate_by_site(records: &[LaunchRecord]) -> Vec<SiteSuccessRate> {
    // (site, successes, total) in order of first appearance
    let mut groups: Vec<(LaunchSite, usize, usize)> = Vec::new();
    for rec in records {
        let idx = match groups.iter().position(|(s, _, _)| *s == rec.site) {
            Some(idx) => idx,
            None => {
                groups.push((rec.site, 0, 0));
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.1 += usize::from(rec.outcome.class());
        group.2 += 1;
    }
    groups
        .into_iter()
        .map(|(site, successes, total)| SiteSuccessRate {
            site,
            mean_outcome: successes as f64 / total as f64,
        })
        .collect()
}

fn outcome_counts<'a>(records: impl Iterator<Item = &'a LaunchRecord>) -> Vec<OutcomeCount> {
    let mut counts = [0usize; 2];
    for rec in records {
        counts[usize::from(rec.outcome.class())] += 1;
    }
    [Outcome::Failure, Outcome::Success]
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(outcome, count)| OutcomeCount { outcome, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload correlation filter (scatter-chart data)
// ---------------------------------------------------------------------------

/// One scatter point: payload on x, class on y, booster category as colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

/// Records that pass both the site filter and the payload range, in source
/// order. Feeding the output back in with the same selection returns it
/// unchanged.
pub fn select_records<'a, I>(
    records: I,
    site: &SiteFilter,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| site.matches(rec))
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .collect()
}

/// Scatter-chart result set: `(payload, class, booster category)` rows.
pub fn payload_scatter(
    records: &[LaunchRecord],
    site: &SiteFilter,
    range: &PayloadRange,
) -> Vec<ScatterPoint> {
    if let SiteFilter::Unmapped(value) = site {
        log::warn!("No launch site named '{value}', payload scatter is empty");
        return Vec::new();
    }
    select_records(records, site, range)
        .into_iter()
        .map(|rec| ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
        })
        .collect()
}
