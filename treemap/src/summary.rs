//! Clustered tree summary returned by the API server.
//!
//! `GET {api}trees?clusterRadius={r}&zoom_level={z}&{filters}` answers with
//! `{"data": [...]}` where each record is either a cluster (centroid as a
//! serialized point) or a single tree (direct `lat`/`lon`).

use serde::Deserialize;
use tracing::debug;

use crate::cluster::cluster_radius;
use crate::filter::FilterSet;
use crate::geo::{parse_point, GeometryError, LatLng};

/// Raw response body of the summary endpoint.
///
/// Records are kept as raw JSON so one malformed record cannot fail the
/// whole response; see [`SummaryResponse::records`].
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl SummaryResponse {
    /// Decodes each record, dropping the ones that do not match any shape.
    pub fn records(&self) -> Vec<SummaryRecord> {
        self.data
            .iter()
            .filter_map(|value| match SummaryRecord::deserialize(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(error = %e, "Dropping undecodable summary record");
                    None
                }
            })
            .collect()
    }
}

/// One item of the summary, discriminated by its `type` tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SummaryRecord {
    /// Aggregate of several trees
    Cluster {
        centroid: String,
        #[serde(default)]
        count: Option<u64>,
    },
    /// A single tree
    Point { lat: f64, lon: f64 },
    /// Any other tag
    #[serde(other)]
    Unknown,
}

impl SummaryRecord {
    /// Normalizes the record to a position.
    ///
    /// Returns `Ok(None)` for unrecognized record types and an error for
    /// clusters whose centroid cannot be parsed or positions out of range.
    pub fn position(&self) -> Result<Option<LatLng>, GeometryError> {
        match self {
            Self::Cluster { centroid, .. } => parse_point(centroid).map(Some),
            Self::Point { lat, lon } => LatLng::try_new(*lat, *lon).map(Some),
            Self::Unknown => Ok(None),
        }
    }
}

/// Normalizes records to positions, one slot per record.
///
/// Unknown types and malformed centroids leave a gap (`None`).
pub fn normalize_records(records: &[SummaryRecord]) -> Vec<Option<LatLng>> {
    records
        .iter()
        .map(|record| match record.position() {
            Ok(position) => position,
            Err(e) => {
                debug!(error = %e, "Dropping summary record with bad position");
                None
            }
        })
        .collect()
}

/// Builds the summary request URL for a zoom level.
pub fn summary_url(api_server_url: &str, zoom_level: u8, filters: &FilterSet) -> String {
    format!(
        "{}trees?clusterRadius={}&zoom_level={}&{}",
        api_server_url,
        cluster_radius(zoom_level as f64),
        zoom_level,
        filters.to_query()
    )
}
