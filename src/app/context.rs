use std::sync::Arc;
use std::time::Duration;

use crate::api::http::HttpFoodApi;
use crate::api::FoodApi;
use crate::app::error::Result;
use crate::config::Config;
use crate::dashboard::DashboardController;

pub struct AppContext {
    pub api: Arc<dyn FoodApi + Send + Sync>,
    pub config: Arc<Config>,
}

impl AppContext {
    /// Build a context talking to `api_url`, or to the configured base URL when `None`.
    pub fn new(config: Config, api_url: Option<&str>) -> Result<Self> {
        let base_url = api_url.unwrap_or(config.api.base_url.as_str());
        let timeout = Duration::from_secs(config.api.timeout_secs);
        let api: Arc<dyn FoodApi + Send + Sync> = Arc::new(HttpFoodApi::new(base_url, timeout)?);

        Ok(Self {
            api,
            config: Arc::new(config),
        })
    }

    pub fn controller(&self) -> DashboardController {
        DashboardController::new(self.api.clone())
    }
}
