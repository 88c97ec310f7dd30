//! Server configuration from flags and environment.

use clap::Parser;
use recommender::{Severity, SidePolicy};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "bartender-server")]
#[command(about = "HTTP API for the bartender questionnaire", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "BARTENDER_BIND", default_value = "0.0.0.0:5012")]
    pub bind: SocketAddr,

    /// House catalog (JSON array of drinks)
    #[arg(long, env = "BARTENDER_PRIMARY_CATALOG", default_value = "data/main_drinks.json")]
    pub primary_catalog: PathBuf,

    /// Retail catalog (JSON array of drinks)
    #[arg(long, env = "BARTENDER_VENDOR_CATALOG", default_value = "data/systembolaget.json")]
    pub vendor_catalog: PathBuf,

    /// API key for the phrasing service; canned replies are used without one
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = phrasing::openai::DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "BARTENDER_MODEL", default_value = phrasing::openai::DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "BARTENDER_PHRASING_TIMEOUT_SECS", default_value_t = 15)]
    pub phrasing_timeout_secs: u64,

    /// Idle time after which a session is dropped
    #[arg(long, env = "BARTENDER_SESSION_TTL_SECS", default_value_t = 3600)]
    pub session_ttl_secs: u64,

    #[arg(long, env = "BARTENDER_SWEEP_INTERVAL_SECS", default_value_t = 60)]
    pub sweep_interval_secs: u64,

    /// What to do when the house catalog has no match: error or warning
    #[arg(long, env = "BARTENDER_PRIMARY_MISS", default_value = "error")]
    pub primary_miss: Severity,

    /// What to do when the retail catalog has no match: error or warning
    #[arg(long, env = "BARTENDER_VENDOR_MISS", default_value = "error")]
    pub vendor_miss: Severity,

    /// Wine names that always win when present (repeatable)
    #[arg(long = "pin")]
    pub pins: Vec<String>,
}

impl ServerConfig {
    pub fn side_policy(&self) -> SidePolicy {
        SidePolicy::new(self.primary_miss, self.vendor_miss)
    }

    pub fn phrasing_timeout(&self) -> Duration {
        Duration::from_secs(self.phrasing_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["bartender-server"]).unwrap();

        assert_eq!(config.bind.port(), 5012);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.phrasing_timeout(), Duration::from_secs(15));
        assert_eq!(config.session_ttl(), Duration::from_secs(3600));
        assert_eq!(config.side_policy(), SidePolicy::default());
        assert!(config.pins.is_empty());
    }

    #[test]
    fn test_soft_vendor_miss_and_pins() {
        let config = ServerConfig::try_parse_from([
            "bartender-server",
            "--vendor-miss",
            "warning",
            "--pin",
            "Rioja Reserva",
            "--pin",
            "Leva Riesling",
        ])
        .unwrap();

        assert_eq!(
            config.side_policy(),
            SidePolicy::new(Severity::Error, Severity::Warning)
        );
        assert_eq!(config.pins, vec!["Rioja Reserva", "Leva Riesling"]);
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let result = ServerConfig::try_parse_from(["bartender-server", "--primary-miss", "maybe"]);
        assert!(result.is_err());
    }
}
