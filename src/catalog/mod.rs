//! Service catalog
//!
//! Compile-time table of the backing services devstack knows how to run,
//! plus named profiles bundling common stacks. The catalog is read-only
//! static data and is never mutated after startup.

pub mod templates;

use crate::error::{DevstackError, Result};

/// A catalog entry describing one supported backing service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDefinition {
    /// Catalog identifier (also the compose service name)
    pub name: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Host port published when no override is configured
    pub default_port: u16,
    /// Compose fragment for this service
    pub compose_template: &'static str,
    /// Named volumes declared by the fragment
    pub volumes: &'static [&'static str],
    /// Environment defaults merged into the project `.env`
    pub env_defaults: &'static [(&'static str, &'static str)],
}

/// All supported services, in display order
pub static CATALOG: &[ServiceDefinition] = &[
    ServiceDefinition {
        name: "mysql",
        display_name: "MySQL",
        description: "MySQL Database Server",
        default_port: 3306,
        compose_template: templates::MYSQL,
        volumes: &["mysql_data"],
        env_defaults: &[
            ("DB_CONNECTION", "mysql"),
            ("DB_HOST", "127.0.0.1"),
            ("DB_PORT", "3306"),
            ("DB_DATABASE", "devstack"),
            ("DB_USERNAME", "devstack"),
            ("DB_PASSWORD", "password"),
        ],
    },
    ServiceDefinition {
        name: "postgres",
        display_name: "PostgreSQL",
        description: "PostgreSQL Database Server",
        default_port: 5432,
        compose_template: templates::POSTGRES,
        volumes: &["postgres_data"],
        env_defaults: &[
            ("DB_CONNECTION", "pgsql"),
            ("DB_HOST", "127.0.0.1"),
            ("DB_PORT", "5432"),
            ("DB_DATABASE", "devstack"),
            ("DB_USERNAME", "devstack"),
            ("DB_PASSWORD", "password"),
        ],
    },
    ServiceDefinition {
        name: "redis",
        display_name: "Redis",
        description: "Redis In-Memory Data Store",
        default_port: 6379,
        compose_template: templates::REDIS,
        volumes: &["redis_data"],
        env_defaults: &[
            ("REDIS_HOST", "127.0.0.1"),
            ("REDIS_PORT", "6379"),
            ("REDIS_PASSWORD", ""),
        ],
    },
    ServiceDefinition {
        name: "mongodb",
        display_name: "MongoDB",
        description: "MongoDB NoSQL Database",
        default_port: 27017,
        compose_template: templates::MONGODB,
        volumes: &["mongodb_data"],
        env_defaults: &[
            ("MONGO_HOST", "127.0.0.1"),
            ("MONGO_PORT", "27017"),
            ("MONGO_DATABASE", "devstack"),
            ("MONGO_USERNAME", "devstack"),
            ("MONGO_PASSWORD", "password"),
        ],
    },
    ServiceDefinition {
        name: "kafka",
        display_name: "Apache Kafka",
        description: "Apache Kafka Message Broker",
        default_port: 9092,
        compose_template: templates::KAFKA,
        volumes: &["kafka_data", "zookeeper_data"],
        env_defaults: &[("KAFKA_HOST", "127.0.0.1"), ("KAFKA_PORT", "9092")],
    },
    ServiceDefinition {
        name: "elasticsearch",
        display_name: "Elasticsearch",
        description: "Elasticsearch Search Engine",
        default_port: 9200,
        compose_template: templates::ELASTICSEARCH,
        volumes: &["elasticsearch_data"],
        env_defaults: &[
            ("ELASTICSEARCH_HOST", "127.0.0.1"),
            ("ELASTICSEARCH_PORT", "9200"),
        ],
    },
    ServiceDefinition {
        name: "rabbitmq",
        display_name: "RabbitMQ",
        description: "RabbitMQ Message Broker",
        default_port: 5672,
        compose_template: templates::RABBITMQ,
        volumes: &["rabbitmq_data"],
        env_defaults: &[
            ("RABBITMQ_HOST", "127.0.0.1"),
            ("RABBITMQ_PORT", "5672"),
            ("RABBITMQ_USERNAME", "devstack"),
            ("RABBITMQ_PASSWORD", "password"),
        ],
    },
];

/// Named service bundles for common stacks
pub static PROFILES: &[(&str, &[&str])] = &[
    ("laravel", &["mysql", "redis"]),
    ("node", &["postgres", "redis"]),
    ("django", &["postgres", "redis"]),
    ("rails", &["postgres", "redis"]),
    ("spring", &["mysql", "kafka"]),
    ("full", &["mysql", "postgres", "redis", "mongodb", "kafka"]),
];

/// Look up a service definition by name
pub fn get(name: &str) -> Option<&'static ServiceDefinition> {
    CATALOG.iter().find(|def| def.name == name)
}

/// Service names in catalog order
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|def| def.name)
}

/// Validate that every identifier exists in the catalog
///
/// Returns the first unknown identifier as an error; callers rely on
/// this running before any mutation so a bad batch changes nothing.
pub fn validate<S: AsRef<str>>(services: &[S]) -> Result<()> {
    for service in services {
        if get(service.as_ref()).is_none() {
            return Err(DevstackError::UnknownService(service.as_ref().to_string()));
        }
    }
    Ok(())
}

/// Resolve a profile to its service names
pub fn profile(name: &str) -> Option<&'static [&'static str]> {
    PROFILES
        .iter()
        .find(|(profile_name, _)| *profile_name == name)
        .map(|(_, services)| *services)
}

/// Profile names in declaration order
pub fn profile_names() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|(name, _)| *name)
}
