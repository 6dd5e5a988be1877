//! Project type detection
//!
//! Heuristic behind `devstack init --auto-detect`: well-known marker
//! files map to profile names. First match in marker order wins, so the
//! more specific frameworks are checked before the generic `node`
//! fallback.

use std::path::Path;

/// Marker files and the profile they suggest
const MARKERS: &[(&str, &str)] = &[
    ("artisan", "laravel"),
    ("composer.json", "laravel"),
    ("manage.py", "django"),
    ("Gemfile", "rails"),
    ("pom.xml", "spring"),
    ("build.gradle", "spring"),
    ("package.json", "node"),
];

/// Detect a profile name for the project rooted at `dir`
pub fn detect_profile(dir: &Path) -> Option<&'static str> {
    MARKERS
        .iter()
        .find(|(marker, _)| dir.join(marker).exists())
        .map(|(_, profile)| *profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_laravel() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("artisan"), "").unwrap();
        std::fs::write(temp.path().join("package.json"), "{}").unwrap();

        // artisan outranks package.json
        assert_eq!(detect_profile(temp.path()), Some("laravel"));
    }

    #[test]
    fn test_detect_node() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("package.json"), "{}").unwrap();
        assert_eq!(detect_profile(temp.path()), Some("node"));
    }

    #[test]
    fn test_detect_django() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("manage.py"), "").unwrap();
        assert_eq!(detect_profile(temp.path()), Some("django"));
    }

    #[test]
    fn test_detect_nothing() {
        let temp = tempdir().unwrap();
        assert_eq!(detect_profile(temp.path()), None);
    }
}
