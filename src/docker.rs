//! Docker and Docker Compose gateway
//!
//! devstack never talks to the container runtime directly; it shells
//! out to `docker compose` (falling back to the standalone
//! `docker-compose` binary) against the generated compose file. Calls
//! are synchronous and block until the subprocess exits; a non-zero
//! exit becomes an [`DevstackError::ExternalTool`] error.

use crate::error::{DevstackError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Snapshot of the local Docker installation
#[derive(Debug, Clone, Default)]
pub struct DockerInfo {
    /// `docker` binary found
    pub docker_installed: bool,
    /// Compose plugin or standalone binary found
    pub compose_installed: bool,
    /// Docker daemon reachable
    pub daemon_running: bool,
    /// Output of `docker --version`
    pub docker_version: Option<String>,
    /// Output of `docker compose version`
    pub compose_version: Option<String>,
}

impl DockerInfo {
    /// Probe the local Docker installation
    pub fn check() -> Self {
        let mut info = DockerInfo::default();

        if let Some(version) = capture(&["docker", "--version"]) {
            info.docker_installed = true;
            info.docker_version = Some(version);
            info.daemon_running = silent(&["docker", "info"]);
        }

        if let Some(version) = capture(&["docker", "compose", "version"]) {
            info.compose_installed = true;
            info.compose_version = Some(version);
        } else if let Some(version) = capture(&["docker-compose", "--version"]) {
            info.compose_installed = true;
            info.compose_version = Some(version);
        }

        info
    }

    /// Whether lifecycle commands can run
    pub fn is_ready(&self) -> bool {
        self.docker_installed && self.compose_installed && self.daemon_running
    }

    /// Remediation text for an incomplete installation
    pub fn install_instructions(&self) -> String {
        let mut instructions = Vec::new();

        if !self.docker_installed {
            instructions.push(
                "Docker is not installed. Install it from https://docs.docker.com/get-docker/",
            );
        } else if !self.daemon_running {
            instructions.push("Docker daemon is not running. Start Docker and try again.");
        }

        if !self.compose_installed {
            instructions.push(
                "Docker Compose is not installed. Install it from https://docs.docker.com/compose/install/",
            );
        }

        if instructions.is_empty() {
            "Docker and Docker Compose are installed and running.".to_string()
        } else {
            instructions.join("\n")
        }
    }
}

/// Run a command and capture its trimmed stdout, or None on any failure
fn capture(argv: &[&str]) -> Option<String> {
    let output = Command::new(argv[0])
        .args(&argv[1..])
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

/// Run a command discarding all output, reporting only success
fn silent(argv: &[&str]) -> bool {
    Command::new(argv[0])
        .args(&argv[1..])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run a compose subcommand with inherited stdio
///
/// Prefers the `docker compose` plugin and falls back to the standalone
/// `docker-compose` binary when the plugin is absent.
fn run_compose(args: &[String]) -> Result<()> {
    let status = if silent(&["docker", "compose", "version"]) {
        Command::new("docker").arg("compose").args(args).status()
    } else {
        Command::new("docker-compose").args(args).status()
    };

    let status = status.map_err(|e| {
        DevstackError::ExternalTool(format!("Failed to invoke Docker Compose: {}", e))
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(DevstackError::ExternalTool(format!(
            "Docker Compose exited with {}",
            status
        )))
    }
}

fn base_args(file: &Path, subcommand: &str) -> Vec<String> {
    vec![
        "-f".to_string(),
        file.display().to_string(),
        subcommand.to_string(),
    ]
}

/// Start services in detached mode
pub fn compose_up(
    file: &Path,
    services: &[String],
    build: bool,
    remove_orphans: bool,
) -> Result<()> {
    let mut args = base_args(file, "up");
    args.push("-d".to_string());
    if build {
        args.push("--build".to_string());
    }
    if remove_orphans {
        args.push("--remove-orphans".to_string());
    }
    args.extend(services.iter().cloned());
    run_compose(&args)
}

/// Stop services, optionally removing volumes and images
pub fn compose_down(file: &Path, remove_volumes: bool, remove_images: bool) -> Result<()> {
    let mut args = base_args(file, "down");
    if remove_volumes {
        args.push("-v".to_string());
    }
    if remove_images {
        args.push("--rmi".to_string());
        args.push("all".to_string());
    }
    run_compose(&args)
}

/// Restart services
pub fn compose_restart(file: &Path, services: &[String]) -> Result<()> {
    let mut args = base_args(file, "restart");
    args.extend(services.iter().cloned());
    run_compose(&args)
}

/// Show running status
pub fn compose_status(file: &Path) -> Result<()> {
    run_compose(&base_args(file, "ps"))
}

/// Stream service logs
pub fn compose_logs(file: &Path, services: &[String], follow: bool) -> Result<()> {
    let mut args = base_args(file, "logs");
    if follow {
        args.push("-f".to_string());
    }
    args.extend(services.iter().cloned());
    run_compose(&args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_instructions_when_missing() {
        let info = DockerInfo::default();
        let text = info.install_instructions();
        assert!(text.contains("Docker is not installed"));
        assert!(text.contains("Docker Compose is not installed"));
        assert!(!info.is_ready());
    }

    #[test]
    fn test_install_instructions_when_daemon_stopped() {
        let info = DockerInfo {
            docker_installed: true,
            compose_installed: true,
            daemon_running: false,
            ..Default::default()
        };
        assert!(info.install_instructions().contains("daemon is not running"));
        assert!(!info.is_ready());
    }

    #[test]
    fn test_ready_when_all_present() {
        let info = DockerInfo {
            docker_installed: true,
            compose_installed: true,
            daemon_running: true,
            ..Default::default()
        };
        assert!(info.is_ready());
    }
}
