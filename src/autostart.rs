//! Systemd autostart integration
//!
//! Installs a oneshot unit that brings the configured services up at
//! boot from the current working directory. Linux-only; every systemd
//! interaction shells out to `systemctl` via sudo.

use crate::error::{DevstackError, Result};
use std::path::Path;
use std::process::Command;

/// Installed unit name
pub const UNIT_NAME: &str = "devstack.service";

const SYSTEMD_DIR: &str = "/etc/systemd/system";

/// Render the unit file contents
fn render_unit(working_dir: &Path, user: &str) -> String {
    format!(
        r#"[Unit]
Description=Devstack Development Services
Requires=docker.service
After=docker.service
StartLimitIntervalSec=0

[Service]
Type=oneshot
RemainAfterExit=yes
WorkingDirectory={}
ExecStart=/usr/local/bin/devstack up
ExecStop=/usr/local/bin/devstack down
TimeoutStartSec=0
User={}

[Install]
WantedBy=multi-user.target
"#,
        working_dir.display(),
        user
    )
}

fn systemctl(args: &[&str]) -> Result<()> {
    let status = Command::new("sudo")
        .arg("systemctl")
        .args(args)
        .status()
        .map_err(|e| DevstackError::ExternalTool(format!("Failed to run systemctl: {}", e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(DevstackError::ExternalTool(format!(
            "systemctl {} failed (try running with sudo)",
            args.join(" ")
        )))
    }
}

/// Install and enable the autostart unit for the current directory
pub fn enable() -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let user = std::env::var("USER")
        .map_err(|_| DevstackError::ExternalTool("Could not determine current user".to_string()))?;

    let unit = render_unit(&working_dir, &user);
    let staging = std::env::temp_dir().join(UNIT_NAME);
    std::fs::write(&staging, unit)?;

    let target = format!("{}/{}", SYSTEMD_DIR, UNIT_NAME);
    let status = Command::new("sudo")
        .args(["cp", &staging.display().to_string(), &target])
        .status()
        .map_err(|e| DevstackError::ExternalTool(format!("Failed to install unit: {}", e)))?;
    if !status.success() {
        return Err(DevstackError::ExternalTool(
            "Failed to install unit file (try running with sudo)".to_string(),
        ));
    }

    systemctl(&["daemon-reload"])?;
    systemctl(&["enable", UNIT_NAME])?;

    let _ = std::fs::remove_file(&staging);
    tracing::info!("Installed {}", target);
    Ok(())
}

/// Disable and remove the autostart unit
pub fn disable() -> Result<()> {
    systemctl(&["disable", UNIT_NAME])?;

    let target = format!("{}/{}", SYSTEMD_DIR, UNIT_NAME);
    let status = Command::new("sudo")
        .args(["rm", "-f", &target])
        .status()
        .map_err(|e| DevstackError::ExternalTool(format!("Failed to remove unit: {}", e)))?;
    if !status.success() {
        return Err(DevstackError::ExternalTool(
            "Failed to remove unit file".to_string(),
        ));
    }

    systemctl(&["daemon-reload"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_unit() {
        let unit = render_unit(&PathBuf::from("/home/dev/project"), "dev");

        assert!(unit.contains("WorkingDirectory=/home/dev/project"));
        assert!(unit.contains("User=dev"));
        assert!(unit.contains("ExecStart=/usr/local/bin/devstack up"));
        assert!(unit.contains("After=docker.service"));
    }
}
