use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Commercial building class, A being the highest quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingClass {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
}

impl BuildingClass {
    /// Quality rank, higher is better
    pub fn rank(self) -> u8 {
        match self {
            BuildingClass::A => 3,
            BuildingClass::B => 2,
            BuildingClass::C => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildingClass::A => "A",
            BuildingClass::B => "B",
            BuildingClass::C => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Withdrawn,
    Leased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseType {
    FullService,
    ModifiedGross,
    TripleNet,
    #[serde(other)]
    Other,
}

/// Where a solicitation requires the space to be
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationConstraint {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub center: Option<GeoPoint>,
    #[serde(default)]
    pub radius_miles: Option<f64>,
}

/// Government leasing requirement taken from a solicitation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub solicitation_number: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub min_sqft: Option<u32>,
    #[serde(default)]
    pub max_sqft: Option<u32>,
    #[serde(default)]
    pub occupancy_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: LocationConstraint,
    #[serde(default)]
    pub building_class: Option<BuildingClass>,
}

/// Listing agent details attached to a property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerContact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Prior government leases this broker has closed
    #[serde(default)]
    pub closed_transactions: Option<u32>,
}

/// Broker-submitted commercial listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub available_sqft: Option<u32>,
    #[serde(default)]
    pub building_class: Option<BuildingClass>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub available_date: Option<NaiveDate>,
    #[serde(default)]
    pub lease_type: Option<LeaseType>,
    #[serde(default)]
    pub broker: BrokerContact,
    #[serde(default)]
    pub status: ListingStatus,
}

/// Entry of the federally-associated property inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceProperty {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
    pub location: GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Location,
    Space,
    Building,
    Timeline,
    Experience,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Location => "location",
            Category::Space => "space",
            Category::Building => "building",
            Category::Timeline => "timeline",
            Category::Experience => "experience",
        }
    }
}

/// Score used when a dimension cannot be evaluated
pub const INSUFFICIENT_DATA_SCORE: f64 = 50.0;

/// One scored dimension of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    pub reasons: Vec<String>,
}

impl CategoryScore {
    /// Build a score, clamped to [0, 100] and rounded to two decimals
    pub fn new(category: Category, score: f64, reasons: Vec<String>) -> Self {
        Self {
            category,
            score: round_score(score),
            reasons,
        }
    }

    pub fn full(category: Category) -> Self {
        Self::new(category, 100.0, Vec::new())
    }

    pub fn insufficient_data(category: Category, detail: &str) -> Self {
        Self::new(
            category,
            INSUFFICIENT_DATA_SCORE,
            vec![format!("insufficient data: {}", detail)],
        )
    }
}

/// Clamp to [0, 100] and round to two decimals so boundary checks are stable
pub fn round_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// The five category scores of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub location: CategoryScore,
    pub space: CategoryScore,
    pub building: CategoryScore,
    pub timeline: CategoryScore,
    pub experience: CategoryScore,
}

impl CategoryBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        [
            &self.location,
            &self.space,
            &self.building,
            &self.timeline,
            &self.experience,
        ]
        .into_iter()
    }

    /// Lowest-scoring category, the earlier one on ties
    pub fn weakest(&self) -> &CategoryScore {
        self.iter()
            .reduce(|lowest, c| if c.score < lowest.score { c } else { lowest })
            .unwrap_or(&self.location)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Qualification tier, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualificationTier {
    Unqualified,
    Marginal,
    Qualified,
    Competitive,
}

impl QualificationTier {
    pub fn is_qualified(self) -> bool {
        self >= QualificationTier::Qualified
    }

    pub fn is_competitive(self) -> bool {
        self == QualificationTier::Competitive
    }
}

/// Scored (opportunity, property) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub opportunity_id: String,
    pub property_id: String,
    pub categories: CategoryBreakdown,
    pub overall_score: f64,
    pub grade: Grade,
    pub tier: QualificationTier,
}

/// Reference property found near a query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyProperty {
    pub id: String,
    pub name: Option<String>,
    pub agency: Option<String>,
    pub distance_km: f64,
}

/// Federal presence around a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodScore {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub count: usize,
    /// Reference properties per square kilometer
    pub density: f64,
    pub score: f64,
    pub properties: Vec<NearbyProperty>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Narrowing applied to the listing pool before a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Minimum acceptable class; better classes pass too
    #[serde(default)]
    pub building_class: Option<BuildingClass>,
    #[serde(default)]
    pub min_available_sqft: Option<u32>,
}

/// Category weights of the overall score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub location: f64,
    pub space: f64,
    pub building: f64,
    pub timeline: f64,
    pub experience: f64,
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.location + self.space + self.building + self.timeline + self.experience
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            location: 0.30,
            space: 0.25,
            building: 0.15,
            timeline: 0.15,
            experience: 0.15,
        }
    }
}

/// Building class compatibility scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingClassTable {
    pub exact_match: f64,
    pub above_required: f64,
    pub one_below: f64,
    pub two_or_more_below: f64,
}

impl BuildingClassTable {
    pub fn score(&self, required: BuildingClass, offered: BuildingClass) -> f64 {
        let (required, offered) = (required.rank(), offered.rank());
        if offered > required {
            self.above_required
        } else if offered == required {
            self.exact_match
        } else if required - offered == 1 {
            self.one_below
        } else {
            self.two_or_more_below
        }
    }
}

impl Default for BuildingClassTable {
    fn default() -> Self {
        Self {
            exact_match: 100.0,
            above_required: 100.0,
            one_below: 60.0,
            two_or_more_below: 20.0,
        }
    }
}

/// Lower bounds of the A to D grades; anything below `d` is an F
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBands {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for GradeBands {
    fn default() -> Self {
        Self {
            a: 90.0,
            b: 80.0,
            c: 70.0,
            d: 60.0,
        }
    }
}

/// Lower bounds of the qualification tiers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub competitive: f64,
    pub qualified: f64,
    pub marginal: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            competitive: 85.0,
            qualified: 70.0,
            marginal: 55.0,
        }
    }
}

/// Every tunable constant of the scoring engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub weights: MatchWeights,
    /// Distance past the required area at which location reaches 0
    pub max_location_distance_km: f64,
    /// Delivery delay at which timeline reaches 0
    pub max_delay_days: f64,
    /// Points lost per unit of fractional excess over the maximum, relative to 100
    pub oversize_penalty_rate: f64,
    /// Lowest space score an oversized listing can get
    pub oversize_floor: f64,
    pub building: BuildingClassTable,
    /// Closed transactions at which experience reaches 75
    pub experience_half_saturation: f64,
    /// Reference properties per square kilometer treated as saturated
    pub neighborhood_saturation_density: f64,
    pub grade_bands: GradeBands,
    pub tier_thresholds: TierThresholds,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            max_location_distance_km: 50.0,
            max_delay_days: 180.0,
            oversize_penalty_rate: 0.5,
            oversize_floor: 40.0,
            building: BuildingClassTable::default(),
            experience_half_saturation: 3.0,
            neighborhood_saturation_density: 0.05,
            grade_bands: GradeBands::default(),
            tier_thresholds: TierThresholds::default(),
        }
    }
}

impl ScoringPolicy {
    /// Reject policies that would break the score range or band ordering
    pub fn validate(&self) -> Result<(), EngineError> {
        let w = &self.weights;
        let weights = [w.location, w.space, w.building, w.timeline, w.experience];
        if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Err(EngineError::InvalidInput(
                "category weights must be non-negative".to_string(),
            ));
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidInput(format!(
                "category weights must sum to 1.0, got {}",
                w.sum()
            )));
        }

        let positive = [
            ("max_location_distance_km", self.max_location_distance_km),
            ("max_delay_days", self.max_delay_days),
            ("experience_half_saturation", self.experience_half_saturation),
            ("neighborhood_saturation_density", self.neighborhood_saturation_density),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.oversize_penalty_rate.is_finite() && self.oversize_penalty_rate >= 0.0) {
            return Err(EngineError::InvalidInput(
                "oversize_penalty_rate must be non-negative".to_string(),
            ));
        }

        let table = &self.building;
        let in_range = [
            self.oversize_floor,
            table.exact_match,
            table.above_required,
            table.one_below,
            table.two_or_more_below,
        ];
        if in_range.iter().any(|v| !(0.0..=100.0).contains(v)) {
            return Err(EngineError::InvalidInput(
                "oversize floor and building table scores must lie in [0, 100]".to_string(),
            ));
        }

        let g = &self.grade_bands;
        if !descending_within_range(&[g.a, g.b, g.c, g.d]) {
            return Err(EngineError::InvalidInput(
                "grade bands must be strictly descending within [0, 100]".to_string(),
            ));
        }
        let t = &self.tier_thresholds;
        if !descending_within_range(&[t.competitive, t.qualified, t.marginal]) {
            return Err(EngineError::InvalidInput(
                "tier thresholds must be strictly descending within [0, 100]".to_string(),
            ));
        }

        Ok(())
    }
}

fn descending_within_range(bounds: &[f64]) -> bool {
    bounds.iter().all(|b| (0.0..=100.0).contains(b)) && bounds.windows(2).all(|w| w[0] > w[1])
}
