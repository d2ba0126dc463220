use std::sync::Arc;

use stocklens_analytics::{AnalyticsService, DatasetSource};
use stocklens_auth::AuthService;

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    pub auth: AuthService,
    pub dataset: Arc<dyn DatasetSource>,
}

impl AppServices {
    pub fn new(
        analytics: AnalyticsService,
        auth: AuthService,
        dataset: Arc<dyn DatasetSource>,
    ) -> Self {
        Self {
            analytics,
            auth,
            dataset,
        }
    }
}
