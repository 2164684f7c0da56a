//! Initial viewport computation.
//!
//! When the map is scoped to a user, the camera should open on that user's
//! trees instead of the world view. The initializer fetches the clustered
//! summary at a fixed reference zoom and fits a viewport around it.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cluster::SUMMARY_ZOOM_LEVEL;
use crate::filter::FilterSet;
use crate::geo::{BoundsFitter, LatLng, Viewport};
use crate::http::{AsyncHttpClient, HttpError, Requester};
use crate::summary::{normalize_records, summary_url, SummaryResponse};

/// Computes the opening viewport from the API summary.
pub struct ViewportInitializer<C> {
    requester: Requester<C>,
    fitter: Arc<dyn BoundsFitter>,
    api_server_url: String,
    width: u32,
    height: u32,
}

impl<C: AsyncHttpClient> ViewportInitializer<C> {
    pub fn new(
        requester: Requester<C>,
        fitter: Arc<dyn BoundsFitter>,
        api_server_url: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            requester,
            fitter,
            api_server_url: api_server_url.into(),
            width,
            height,
        }
    }

    /// Returns the viewport framing the scoped trees.
    ///
    /// Resolves to `Ok(None)` without any request when no user scope is set,
    /// and to `Ok(None)` when the summary holds no usable positions.
    pub async fn initial_view(&self, filters: &FilterSet) -> Result<Option<Viewport>, HttpError> {
        if filters.user_id().is_none() {
            debug!("No user scope, keeping configured viewport");
            return Ok(None);
        }

        let url = summary_url(&self.api_server_url, SUMMARY_ZOOM_LEVEL, filters);
        info!(url = %url, "Fetching initial bounds");

        let response: SummaryResponse = self.requester.get_json(&url).await?;
        let records = response.records();
        let points: Vec<LatLng> = normalize_records(&records).into_iter().flatten().collect();

        debug!(
            records = records.len(),
            points = points.len(),
            "Summary normalized"
        );

        Ok(self.fitter.fit(&points, self.width, self.height))
    }
}
