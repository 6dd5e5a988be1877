//! Compose file generation

use crate::catalog::{self, templates};
use crate::config::Config;
use crate::error::{DevstackError, Result};

/// Render the full compose file for a configuration
///
/// Services are emitted in stored order, each from its catalog
/// fragment, followed by a `volumes:` section listing the deduplicated
/// union of the selected services' named volumes. A configured service
/// that is no longer in the catalog (stale config) is an error.
pub fn render_compose(cfg: &Config) -> Result<String> {
    let mut out = String::new();
    out.push_str("version: '3.8'\n\nservices:\n");

    for service in &cfg.services {
        let def = catalog::get(service)
            .ok_or_else(|| DevstackError::UnknownService(service.clone()))?;

        let port = cfg.ports.get(service).copied().unwrap_or(def.default_port);
        out.push_str(&templates::render(
            def.compose_template,
            port,
            &cfg.data_path,
            &cfg.env,
        ));
        out.push('\n');
    }

    out.push_str("volumes:\n");
    let mut seen = Vec::new();
    for service in &cfg.services {
        if let Some(def) = catalog::get(service) {
            for volume in def.volumes {
                if !seen.contains(volume) {
                    out.push_str(&format!("  {}:\n", volume));
                    seen.push(volume);
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::add_services;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn config_with(services: &[&str]) -> Config {
        let mut cfg = Config::new(PathBuf::from("/data/devstack"));
        let requested: Vec<String> = services.iter().map(|s| s.to_string()).collect();
        add_services(&mut cfg, &requested, &BTreeMap::new()).unwrap();
        cfg
    }

    #[test]
    fn test_render_names_each_container() {
        let cfg = config_with(&["mysql", "redis"]);
        let compose = render_compose(&cfg).unwrap();

        assert!(compose.contains("container_name: devstack-mysql"));
        assert!(compose.contains("container_name: devstack-redis"));
    }

    #[test]
    fn test_render_respects_port_override() {
        let mut cfg = config_with(&["mysql"]);
        cfg.ports.insert("mysql".to_string(), 3307);

        let compose = render_compose(&cfg).unwrap();
        assert!(compose.contains("\"3307:3306\""));
    }

    #[test]
    fn test_render_emits_deduplicated_volumes() {
        let cfg = config_with(&["mysql", "kafka"]);
        let compose = render_compose(&cfg).unwrap();

        let volumes_section = compose.split("volumes:\n").last().unwrap();
        assert!(volumes_section.contains("mysql_data:"));
        assert!(volumes_section.contains("kafka_data:"));
        assert!(volumes_section.contains("zookeeper_data:"));
        assert_eq!(compose.matches("  kafka_data:").count(), 1);
    }

    #[test]
    fn test_render_preserves_service_order() {
        let cfg = config_with(&["redis", "mysql"]);
        let compose = render_compose(&cfg).unwrap();

        let redis_at = compose.find("container_name: devstack-redis").unwrap();
        let mysql_at = compose.find("container_name: devstack-mysql").unwrap();
        assert!(redis_at < mysql_at);
    }

    #[test]
    fn test_render_fails_on_stale_service() {
        let mut cfg = Config::new(PathBuf::from("/data"));
        cfg.services.push("retired-service".to_string());

        assert!(matches!(
            render_compose(&cfg),
            Err(DevstackError::UnknownService(name)) if name == "retired-service"
        ));
    }
}
