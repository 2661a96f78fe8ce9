//! Hub Configuration

use serde::{Deserialize, Serialize};
use url::Url;

use atech_features::Locale;

/// Hub configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Locale used for dispatch when the caller does not supply one
    pub default_locale: Locale,

    /// Register every known feature with defaults at initialization
    pub register_default_features: bool,

    /// Built-in command set and keyboard shortcuts at initialization
    pub register_builtin_commands: bool,

    /// Addresses of the external monitoring stack
    pub monitoring: MonitoringConfig,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            register_default_features: true,
            register_builtin_commands: true,
            monitoring: MonitoringConfig::default(),
        }
    }
}

/// External monitoring service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonitoringService {
    Grafana,
    Prometheus,
    Loki,
    Alertmanager,
    UptimeKuma,
}

/// Addresses of the external log/metric sinks.
///
/// The stack itself is an external collaborator; only its documented ports
/// are modeled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub host: String,
    pub grafana_port: u16,
    pub prometheus_port: u16,
    pub loki_port: u16,
    pub alertmanager_port: u16,
    pub uptime_port: u16,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            grafana_port: 3000,
            prometheus_port: 9090,
            loki_port: 3100,
            alertmanager_port: 9093,
            uptime_port: 3001,
        }
    }
}

impl MonitoringConfig {
    pub fn port(&self, service: MonitoringService) -> u16 {
        match service {
            MonitoringService::Grafana => self.grafana_port,
            MonitoringService::Prometheus => self.prometheus_port,
            MonitoringService::Loki => self.loki_port,
            MonitoringService::Alertmanager => self.alertmanager_port,
            MonitoringService::UptimeKuma => self.uptime_port,
        }
    }

    /// Base URL of a monitoring service; `None` if the host is not a valid
    /// URL component
    pub fn endpoint(&self, service: MonitoringService) -> Option<Url> {
        Url::parse(&format!("http://{}:{}/", self.host, self.port(service))).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_ports() {
        let monitoring = MonitoringConfig::default();
        assert_eq!(monitoring.port(MonitoringService::Grafana), 3000);
        assert_eq!(monitoring.port(MonitoringService::Prometheus), 9090);
        assert_eq!(monitoring.port(MonitoringService::Loki), 3100);
        assert_eq!(monitoring.port(MonitoringService::Alertmanager), 9093);
        assert_eq!(monitoring.port(MonitoringService::UptimeKuma), 3001);
    }

    #[test]
    fn test_endpoint() {
        let monitoring = MonitoringConfig::default();
        let url = monitoring.endpoint(MonitoringService::Prometheus).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9090/");
    }
}
