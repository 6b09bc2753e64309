//! Config schema and deserialization

use crate::CheckStatus;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Display override for a check (error, warning, good, off)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckSeverity {
    Error,
    Warning,
    Good,
    /// Hide the check from reports
    Off,
}

impl CheckSeverity {
    /// Convert to crate::CheckStatus if not Off
    pub fn to_status(self) -> Option<CheckStatus> {
        match self {
            CheckSeverity::Error => Some(CheckStatus::Error),
            CheckSeverity::Warning => Some(CheckStatus::Warning),
            CheckSeverity::Good => Some(CheckStatus::Good),
            CheckSeverity::Off => None,
        }
    }
}

/// Per-path override configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Optional threshold override for matched documents
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Optional check overrides for matched documents
    #[serde(default)]
    pub checks: HashMap<String, CheckSeverity>,
}

/// Root config structure for .seoscorerc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Minimum score threshold (exit 1 if below). Default: none
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Per-check display overrides. Key is the check id, e.g. `link_structure_low`.
    #[serde(default)]
    pub checks: HashMap<String, CheckSeverity>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Document file suffixes picked up when walking a directory
    #[serde(default)]
    pub document_patterns: Vec<String>,

    /// Per-path configuration overrides (blog drafts, legacy pages, ...)
    #[serde(default)]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        self
    }

    /// Check ids in `checks` or any override that no rule can emit
    pub fn unknown_check_ids(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .checks
            .keys()
            .chain(self.overrides.iter().flat_map(|o| o.checks.keys()))
            .filter(|id| id.parse::<crate::CheckId>().is_err())
            .cloned()
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            threshold: self.threshold,
            checks: self.checks.clone(),
        };

        // Apply matching overrides in order
        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(threshold) = override_cfg.threshold {
                    effective.threshold = Some(threshold);
                }
                for (check, severity) in &override_cfg.checks {
                    effective.checks.insert(check.clone(), *severity);
                }
            }
        }

        effective
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        for pattern in patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(file_path)
                    || path_str.contains(pattern.trim_start_matches("**/"))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        for (check, severity) in base.checks {
            self.checks.entry(check).or_insert(severity);
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.document_patterns.is_empty() {
            self.document_patterns = base.document_patterns;
        }

        // Prepend base overrides
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Get document file patterns (defaults when none configured)
    pub fn get_document_patterns(&self) -> Vec<&str> {
        if self.document_patterns.is_empty() {
            crate::document::DEFAULT_DOCUMENT_PATTERNS.to_vec()
        } else {
            self.document_patterns.iter().map(|s| s.as_str()).collect()
        }
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub threshold: Option<u8>,
    pub checks: HashMap<String, CheckSeverity>,
}
