//! Configuration reconciliation
//!
//! Computes the delta when services are added to or removed from a
//! configuration and applies it in memory. These functions perform no
//! I/O; the command layer saves the config and regenerates artifacts
//! afterwards.
//!
//! All validation happens before any mutation: a batch containing one
//! unknown service or one misdirected port override changes nothing.

use crate::catalog;
use crate::config::Config;
use crate::error::{DevstackError, Result};
use std::collections::{BTreeMap, HashSet};

/// Result of an add operation
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Requested services that were already configured
    pub already_present: Vec<String>,
    /// Services newly appended to the configuration
    pub added: Vec<String>,
}

/// Result of a remove operation
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Requested services that were not configured
    pub missing: Vec<String>,
    /// Services actually removed
    pub removed: Vec<String>,
}

/// Parse a `service:port` override
pub fn parse_port_spec(spec: &str) -> Result<(String, u16)> {
    let (service, port) = spec
        .split_once(':')
        .ok_or_else(|| DevstackError::InvalidPortSpec(spec.to_string()))?;

    if service.is_empty() {
        return Err(DevstackError::InvalidPortSpec(spec.to_string()));
    }

    let port: u16 = port
        .parse()
        .map_err(|_| DevstackError::InvalidPortSpec(spec.to_string()))?;

    Ok((service.to_string(), port))
}

/// Add services to the configuration
///
/// Requested services are partitioned into already-configured and new;
/// new services are appended in request order, given their override or
/// catalog-default port, and have their environment defaults merged in
/// (existing env values are never overwritten).
pub fn add_services(
    cfg: &mut Config,
    requested: &[String],
    port_overrides: &BTreeMap<String, u16>,
) -> Result<AddOutcome> {
    catalog::validate(requested)?;

    let mut outcome = AddOutcome::default();
    for service in requested {
        if cfg.services.contains(service) || outcome.added.contains(service) {
            if !outcome.already_present.contains(service) {
                outcome.already_present.push(service.clone());
            }
        } else {
            outcome.added.push(service.clone());
        }
    }

    // A port override must target a service being added in this batch.
    for service in port_overrides.keys() {
        if !outcome.added.contains(service) {
            return Err(DevstackError::InvalidPortSpec(format!(
                "{} is not among the services being added",
                service
            )));
        }
    }

    for service in &outcome.added {
        let def = catalog::get(service)
            .ok_or_else(|| DevstackError::UnknownService(service.clone()))?;

        cfg.services.push(service.clone());

        let port = port_overrides
            .get(service)
            .copied()
            .unwrap_or(def.default_port);
        cfg.ports.insert(service.clone(), port);

        for (key, value) in def.env_defaults {
            cfg.env
                .entry((*key).to_string())
                .or_insert_with(|| (*value).to_string());
        }
    }

    Ok(outcome)
}

/// Remove services from the configuration
///
/// Services not present are reported in the outcome, not treated as an
/// error. A removed service loses its entry in `services`, its port,
/// and its default environment keys; a key is kept when another still
/// selected service also declares it as a default.
pub fn remove_services(cfg: &mut Config, requested: &[String]) -> Result<RemoveOutcome> {
    let mut outcome = RemoveOutcome::default();
    for service in requested {
        if cfg.services.contains(service) {
            if !outcome.removed.contains(service) {
                outcome.removed.push(service.clone());
            }
        } else if !outcome.missing.contains(service) {
            outcome.missing.push(service.clone());
        }
    }

    cfg.services.retain(|s| !outcome.removed.contains(s));

    // Default env keys still claimed by the remaining services.
    let retained_keys: HashSet<&'static str> = cfg
        .services
        .iter()
        .filter_map(|s| catalog::get(s))
        .flat_map(|def| def.env_defaults.iter().map(|(key, _)| *key))
        .collect();

    for service in &outcome.removed {
        cfg.ports.remove(service);

        if let Some(def) = catalog::get(service) {
            for (key, _) in def.env_defaults {
                if !retained_keys.contains(key) {
                    cfg.env.remove(*key);
                }
            }
        }
    }

    Ok(outcome)
}
