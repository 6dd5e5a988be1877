//! Environment file generation
//!
//! The `.env` file is shared with the user's application, so generation
//! merges instead of clobbering: comments, blank lines and keys devstack
//! does not manage are passed through untouched, managed keys are
//! updated in place and missing ones appended.

use std::collections::{BTreeMap, BTreeSet};

/// Merge managed variables into an existing env file text
///
/// Idempotent: applying the same variables twice yields the same output
/// as applying them once.
pub fn render_env_file(existing: &str, vars: &BTreeMap<String, String>) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut written: BTreeSet<&str> = BTreeSet::new();

    for line in existing.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        if let Some((key, _)) = line.split_once('=') {
            let key = key.trim();
            if let Some((managed_key, value)) = vars.get_key_value(key) {
                lines.push(format!("{}={}", managed_key, value));
                written.insert(managed_key);
                continue;
            }
        }

        lines.push(line.to_string());
    }

    for (key, value) in vars {
        if !written.contains(key.as_str()) {
            lines.push(format!("{}={}", key, value));
        }
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_appends_to_empty_file() {
        let out = render_env_file("", &vars(&[("DB_HOST", "127.0.0.1")]));
        assert_eq!(out, "DB_HOST=127.0.0.1\n");
    }

    #[test]
    fn test_updates_managed_key_in_place() {
        let existing = "APP_NAME=myapp\nDB_PORT=3306\nAPP_DEBUG=true\n";
        let out = render_env_file(existing, &vars(&[("DB_PORT", "3307")]));
        assert_eq!(out, "APP_NAME=myapp\nDB_PORT=3307\nAPP_DEBUG=true\n");
    }

    #[test]
    fn test_preserves_comments_and_blank_lines() {
        let existing = "# Application settings\nAPP_NAME=myapp\n\n# Database\nDB_HOST=localhost\n";
        let out = render_env_file(existing, &vars(&[("DB_HOST", "127.0.0.1")]));

        assert!(out.contains("# Application settings\n"));
        assert!(out.contains("# Database\n"));
        assert!(out.contains("\n\n"));
        assert!(out.contains("APP_NAME=myapp\n"));
        assert!(out.contains("DB_HOST=127.0.0.1\n"));
        assert!(!out.contains("DB_HOST=localhost"));
    }

    #[test]
    fn test_idempotent() {
        let existing = "# comment\nAPP_NAME=myapp\n";
        let managed = vars(&[("DB_HOST", "127.0.0.1"), ("DB_PORT", "3306")]);

        let once = render_env_file(existing, &managed);
        let twice = render_env_file(&once, &managed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preserves_unrelated_keys() {
        let existing = "SECRET_TOKEN=abc123\n";
        let out = render_env_file(existing, &vars(&[("DB_HOST", "127.0.0.1")]));

        assert!(out.contains("SECRET_TOKEN=abc123\n"));
        assert!(out.contains("DB_HOST=127.0.0.1\n"));
    }

    #[test]
    fn test_value_with_equals_sign() {
        let existing = "DB_URL=mysql://localhost:3306/app?charset=utf8\n";
        let out = render_env_file(existing, &vars(&[("DB_URL", "postgres://localhost")]));
        assert_eq!(out, "DB_URL=postgres://localhost\n");
    }
}
