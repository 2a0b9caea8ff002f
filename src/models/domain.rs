use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel value selecting every region
pub const ALL_REGIONS: &str = "all";

/// Blood-donation center as served by the data API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "estado")]
    pub region: String,
    #[serde(rename = "endereco_completo", default)]
    pub address: String,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Center {
    /// Google Maps search link pointing at the center's coordinates
    pub fn maps_url(&self) -> String {
        let query = format!("{},{}", self.latitude, self.longitude);
        format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&query)
        )
    }

    /// Phone number, treating blank strings as absent
    pub fn phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Center with the distance to the current reference point, when one is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCenter {
    #[serde(flatten)]
    pub center: Center,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none", default)]
    pub distance_km: Option<f64>,
}

impl AnnotatedCenter {
    pub fn new(center: Center, distance_km: Option<f64>) -> Self {
        Self { center, distance_km }
    }

    /// Distance formatted for display ("850 m", "12.3 km")
    pub fn formatted_distance(&self) -> Option<String> {
        self.distance_km
            .filter(|d| !d.is_nan())
            .map(crate::core::distance::format_distance)
    }
}

/// User location used as the distance origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl ReferencePoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Region filter: a region code or every region
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Region(String),
}

impl RegionFilter {
    /// Parse a filter value, mapping the "all" sentinel and blank input to `All`
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_REGIONS {
            RegionFilter::All
        } else {
            RegionFilter::Region(value.to_string())
        }
    }

    #[inline]
    pub fn matches(&self, center: &Center) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Region(code) => center.region == *code,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegionFilter::All => ALL_REGIONS,
            RegionFilter::Region(code) => code,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RegionFilter {
    fn from(value: &str) -> Self {
        RegionFilter::parse(value)
    }
}

/// Mutable view state driven by user actions
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub region: RegionFilter,
    pub sort_by_distance: bool,
    pub show_beyond_limit: bool,
    /// 1-based, clamped against the result size when paginating
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            region: RegionFilter::All,
            sort_by_distance: false,
            show_beyond_limit: false,
            page: 1,
        }
    }
}

/// Listing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingParams {
    pub page_size: usize,
    pub max_radius_km: f64,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_radius_km: 500.0,
        }
    }
}
