use crate::error::{FloodMapError, FloodMapResult};

/// Runtime configuration for the query and print workflows.
///
/// Timing values mirror the production service: the print job service is
/// polled on a one second interval and the query display settles for two
/// seconds before the info panel state becomes visible.
#[derive(Debug, Clone)]
pub struct FloodMapConfig {
    /// Base URL of the geoprocessing print service.
    pub print_service_url: String,
    /// HTTP request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Delay between job status polls in milliseconds.
    pub poll_interval_ms: u64,
    /// Ceiling on job status polls before the workflow gives up.
    pub max_poll_attempts: u32,
    /// Delay before the externally visible query state becomes `info`.
    pub settling_delay_ms: u64,
}

impl Default for FloodMapConfig {
    fn default() -> Self {
        Self {
            print_service_url:
                "https://msc.fema.gov/arcgis/rest/services/NFHL_Print/AGOLPrintB/GPServer/Print%20FIRM%20or%20FIRMette"
                    .to_string(),
            request_timeout_ms: 30000,
            poll_interval_ms: 1000,
            max_poll_attempts: 120,
            settling_delay_ms: 2000,
        }
    }
}

impl FloodMapConfig {
    pub fn from_env() -> FloodMapResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("FLOODMAP_PRINT_SERVICE_URL") {
            config.print_service_url = url;
        }

        if let Ok(timeout) = std::env::var("FLOODMAP_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = timeout.parse().map_err(|e| {
                FloodMapError::ConfigurationError(format!("Invalid request_timeout_ms: {e}"))
            })?;
        }

        if let Ok(interval) = std::env::var("FLOODMAP_POLL_INTERVAL_MS") {
            config.poll_interval_ms = interval.parse().map_err(|e| {
                FloodMapError::ConfigurationError(format!("Invalid poll_interval_ms: {e}"))
            })?;
        }

        if let Ok(attempts) = std::env::var("FLOODMAP_MAX_POLL_ATTEMPTS") {
            config.max_poll_attempts = attempts.parse().map_err(|e| {
                FloodMapError::ConfigurationError(format!("Invalid max_poll_attempts: {e}"))
            })?;
        }

        if let Ok(delay) = std::env::var("FLOODMAP_SETTLING_DELAY_MS") {
            config.settling_delay_ms = delay.parse().map_err(|e| {
                FloodMapError::ConfigurationError(format!("Invalid settling_delay_ms: {e}"))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FloodMapConfig::default();
        assert!(config.print_service_url.starts_with("https://"));
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.max_poll_attempts, 120);
        assert_eq!(config.settling_delay_ms, 2000);
    }
}
