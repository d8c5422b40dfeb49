//! Home dashboard

use shared::{DashboardStats, DateRange};
use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::error::ClientResult;

pub struct DashboardController {
    api: ApiClient,
    stats: Mutex<DashboardStats>,
}

impl DashboardController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            stats: Mutex::new(DashboardStats::default()),
        }
    }

    /// Fetch the statistics, optionally restricted to a date range.
    /// The previous figures stay displayed when the request fails.
    pub async fn load(&self, range: Option<&DateRange>) -> ClientResult<DashboardStats> {
        let stats = self.api.dashboard(range).await.map_err(|e| {
            tracing::warn!("Failed to load dashboard statistics: {}", e);
            e
        })?;
        *self.stats.lock().await = stats.clone();
        Ok(stats)
    }

    /// Statistics restricted to the current local day
    pub async fn load_today(&self) -> ClientResult<DashboardStats> {
        let today = DateRange::day(chrono::Local::now().date_naive());
        self.load(Some(&today)).await
    }

    pub async fn stats(&self) -> DashboardStats {
        self.stats.lock().await.clone()
    }
}
