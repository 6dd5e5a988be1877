//! Compose fragments for catalog services
//!
//! Each fragment is a pre-indented block for the `services:` section of
//! the generated compose file. Placeholders are substituted by
//! [`render`] with a fixed schema rather than a template engine: the
//! only placeholders are `{port}`, `{data_path}` and `{env:KEY}`.

use std::collections::BTreeMap;
use std::path::Path;

pub const MYSQL: &str = r#"  mysql:
    image: mysql:8.0
    container_name: devstack-mysql
    restart: unless-stopped
    environment:
      MYSQL_ROOT_PASSWORD: root
      MYSQL_DATABASE: devstack
      MYSQL_USER: devstack
      MYSQL_PASSWORD: password
    ports:
      - "{port}:3306"
    volumes:
      - {data_path}/mysql:/var/lib/mysql
    healthcheck:
      test: ["CMD", "mysqladmin", "ping", "-h", "localhost"]
      timeout: 20s
      retries: 10
"#;

pub const POSTGRES: &str = r#"  postgres:
    image: postgres:15
    container_name: devstack-postgres
    restart: unless-stopped
    environment:
      POSTGRES_DB: devstack
      POSTGRES_USER: devstack
      POSTGRES_PASSWORD: password
    ports:
      - "{port}:5432"
    volumes:
      - {data_path}/postgres:/var/lib/postgresql/data
    healthcheck:
      test: ["CMD-SHELL", "pg_isready -U devstack"]
      interval: 30s
      timeout: 10s
      retries: 5
"#;

pub const REDIS: &str = r#"  redis:
    image: redis:7-alpine
    container_name: devstack-redis
    restart: unless-stopped
    ports:
      - "{port}:6379"
    volumes:
      - {data_path}/redis:/data
    healthcheck:
      test: ["CMD", "redis-cli", "ping"]
      interval: 30s
      timeout: 10s
      retries: 5
"#;

pub const MONGODB: &str = r#"  mongodb:
    image: mongo:7
    container_name: devstack-mongodb
    restart: unless-stopped
    environment:
      MONGO_INITDB_ROOT_USERNAME: devstack
      MONGO_INITDB_ROOT_PASSWORD: password
      MONGO_INITDB_DATABASE: devstack
    ports:
      - "{port}:27017"
    volumes:
      - {data_path}/mongodb:/data/db
    healthcheck:
      test: ["CMD", "mongo", "--eval", "db.adminCommand('ping')"]
      interval: 30s
      timeout: 10s
      retries: 5
"#;

pub const KAFKA: &str = r#"  zookeeper:
    image: confluentinc/cp-zookeeper:latest
    container_name: devstack-zookeeper
    restart: unless-stopped
    environment:
      ZOOKEEPER_CLIENT_PORT: 2181
      ZOOKEEPER_TICK_TIME: 2000
    volumes:
      - {data_path}/zookeeper:/var/lib/zookeeper/data

  kafka:
    image: confluentinc/cp-kafka:latest
    container_name: devstack-kafka
    restart: unless-stopped
    depends_on:
      - zookeeper
    environment:
      KAFKA_BROKER_ID: 1
      KAFKA_ZOOKEEPER_CONNECT: zookeeper:2181
      KAFKA_ADVERTISED_LISTENERS: PLAINTEXT://localhost:{port}
      KAFKA_OFFSETS_TOPIC_REPLICATION_FACTOR: 1
    ports:
      - "{port}:9092"
    volumes:
      - {data_path}/kafka:/var/lib/kafka/data
"#;

pub const ELASTICSEARCH: &str = r#"  elasticsearch:
    image: docker.elastic.co/elasticsearch/elasticsearch:8.11.0
    container_name: devstack-elasticsearch
    restart: unless-stopped
    environment:
      - discovery.type=single-node
      - xpack.security.enabled=false
      - "ES_JAVA_OPTS=-Xms512m -Xmx512m"
    ports:
      - "{port}:9200"
    volumes:
      - {data_path}/elasticsearch:/usr/share/elasticsearch/data
    healthcheck:
      test: ["CMD-SHELL", "curl -f http://localhost:9200/_cluster/health || exit 1"]
      interval: 30s
      timeout: 10s
      retries: 5
"#;

pub const RABBITMQ: &str = r#"  rabbitmq:
    image: rabbitmq:3-management
    container_name: devstack-rabbitmq
    restart: unless-stopped
    environment:
      RABBITMQ_DEFAULT_USER: devstack
      RABBITMQ_DEFAULT_PASS: password
    ports:
      - "{port}:5672"
      - "15672:15672"
    volumes:
      - {data_path}/rabbitmq:/var/lib/rabbitmq
    healthcheck:
      test: ["CMD", "rabbitmq-diagnostics", "ping"]
      interval: 30s
      timeout: 10s
      retries: 5
"#;

/// Substitute the fixed placeholder schema into a compose fragment
pub fn render(template: &str, port: u16, data_path: &Path, env: &BTreeMap<String, String>) -> String {
    let mut result = template
        .replace("{port}", &port.to_string())
        .replace("{data_path}", &data_path.display().to_string());

    for (key, value) in env {
        result = result.replace(&format!("{{env:{}}}", key), value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_substitutes_port_and_data_path() {
        let env = BTreeMap::new();
        let rendered = render(REDIS, 6380, &PathBuf::from("/srv/devstack"), &env);

        assert!(rendered.contains("\"6380:6379\""));
        assert!(rendered.contains("/srv/devstack/redis:/data"));
        assert!(!rendered.contains("{port}"));
        assert!(!rendered.contains("{data_path}"));
    }

    #[test]
    fn test_render_env_placeholder() {
        let mut env = BTreeMap::new();
        env.insert("DB_PASSWORD".to_string(), "hunter2".to_string());

        let rendered = render("password: {env:DB_PASSWORD}", 0, &PathBuf::from("/tmp"), &env);
        assert_eq!(rendered, "password: hunter2");
    }
}
