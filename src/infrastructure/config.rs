//! Static classification configuration: label tables, location-code sets,
//! sentinel lists, and library priority.
//!
//! Built once at process start (seed data or a JSON override file) and then
//! passed around by shared reference — classification never reads ambient
//! global state.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use regex::RegexSet;
use serde::Deserialize;

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Csv(String),
    Json(String),
    Pattern(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {}", e),
            ConfigError::Csv(e) => write!(f, "config CSV error: {}", e),
            ConfigError::Json(e) => write!(f, "config JSON error: {}", e),
            ConfigError::Pattern(e) => write!(f, "config pattern error: {}", e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<csv::Error> for ConfigError {
    fn from(e: csv::Error) -> Self {
        ConfigError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

impl From<regex::Error> for ConfigError {
    fn from(e: regex::Error) -> Self {
        ConfigError::Pattern(e.to_string())
    }
}

/// All static data consumed by the cataloguing modules. Field-by-field:
/// label tables for facet rendering, sentinel/location sets for exclusion,
/// deny patterns and library sets for grammar validation, and the library
/// priority used by preferred-barcode selection.
#[derive(Debug, Clone)]
pub struct ClassificationConfig {
    /// LC class letter -> label ("M" -> "Music").
    pub lc_classes: HashMap<char, String>,
    /// LC subclass prefix (1-3 letters) -> label; consulted longest-prefix-first.
    pub lc_subclasses: HashMap<String, String>,
    /// Dewey hundred bucket (0, 100, ... 900) -> label.
    pub dewey_hundreds: HashMap<u16, String>,
    /// Dewey ten bucket (0, 10, ... 990) -> label.
    pub dewey_tens: HashMap<u16, String>,
    /// Call-number texts that mean "there is no call number" (uppercase, exact).
    pub ignore_sentinels: HashSet<String>,
    /// Sentinel prefixes, e.g. "INTERNET RESOURCE" (uppercase).
    pub ignore_prefixes: Vec<String>,
    /// Current-location codes for lost/missing/withdrawn items.
    pub unwanted_locations: HashSet<String>,
    /// Home-location codes for shelved-by-title/series collections.
    pub shelby_locations: HashSet<String>,
    /// Location codes marking online-only access.
    pub online_locations: HashSet<String>,
    /// Location code -> government-document category label.
    pub gov_doc_locations: HashMap<String, String>,
    /// Category used when only the record-level gov-doc field is present.
    pub default_gov_doc_category: String,
    /// Known-bad patterns rejected by the LC grammar even when they would
    /// otherwise parse (legacy accession numbers and the like).
    pub lc_deny_patterns: Vec<String>,
    /// Library codes whose LC call numbers skip the Cutter requirement.
    pub relaxed_lc_libraries: HashSet<String>,
    /// ALPHANUM leading tokens that are allowed to try the LC/Dewey grammars.
    pub alphanum_class_prefixes: HashSet<String>,
    /// Library whose items win preferred-barcode library ties outright.
    pub home_library: Option<String>,

    pub(crate) lc_deny: RegexSet,
}

impl ClassificationConfig {
    /// Longest-prefix subclass lookup over 1-3 leading letters. Returns the
    /// matched prefix together with its label so callers can render
    /// "{prefix} - {label}"; `None` means the caller echoes the code verbatim.
    pub fn subclass_label<'a, 'c>(&'a self, code: &'c str) -> Option<(&'c str, &'a str)> {
        for len in (1..=code.len().min(3)).rev() {
            let prefix = &code[..len];
            if let Some(label) = self.lc_subclasses.get(prefix) {
                return Some((prefix, label));
            }
        }
        None
    }

    /// True when a normalized call number matches the LC deny-list.
    pub fn lc_denied(&self, text: &str) -> bool {
        self.lc_deny.is_match(text)
    }

    /// Recompile the deny-list after `lc_deny_patterns` changed.
    pub fn compile_deny_patterns(&mut self) -> Result<(), ConfigError> {
        self.lc_deny = RegexSet::new(&self.lc_deny_patterns)?;
        Ok(())
    }

    /// Build the seeded config, then apply a partial JSON override file on
    /// top. Fields absent from the file keep their seeded values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let overrides: ConfigOverrides = serde_json::from_str(&content)?;
        let mut config = ClassificationConfig::default();
        config.apply(overrides)?;
        Ok(config)
    }

    fn apply(&mut self, overrides: ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(classes) = overrides.lc_classes {
            self.lc_classes = parse_letter_keys(classes)?;
        }
        if let Some(subclasses) = overrides.lc_subclasses {
            self.lc_subclasses = subclasses;
        }
        if let Some(hundreds) = overrides.dewey_hundreds {
            self.dewey_hundreds = parse_bucket_keys(hundreds)?;
        }
        if let Some(tens) = overrides.dewey_tens {
            self.dewey_tens = parse_bucket_keys(tens)?;
        }
        if let Some(sentinels) = overrides.ignore_sentinels {
            self.ignore_sentinels = sentinels.into_iter().map(|s| s.to_uppercase()).collect();
        }
        if let Some(prefixes) = overrides.ignore_prefixes {
            self.ignore_prefixes = prefixes.into_iter().map(|s| s.to_uppercase()).collect();
        }
        if let Some(locs) = overrides.unwanted_locations {
            self.unwanted_locations = locs;
        }
        if let Some(locs) = overrides.shelby_locations {
            self.shelby_locations = locs;
        }
        if let Some(locs) = overrides.online_locations {
            self.online_locations = locs;
        }
        if let Some(locs) = overrides.gov_doc_locations {
            self.gov_doc_locations = locs;
        }
        if let Some(category) = overrides.default_gov_doc_category {
            self.default_gov_doc_category = category;
        }
        if let Some(patterns) = overrides.lc_deny_patterns {
            self.lc_deny_patterns = patterns;
            self.compile_deny_patterns()?;
        }
        if let Some(libs) = overrides.relaxed_lc_libraries {
            self.relaxed_lc_libraries = libs;
        }
        if let Some(prefixes) = overrides.alphanum_class_prefixes {
            self.alphanum_class_prefixes = prefixes;
        }
        if let Some(home) = overrides.home_library {
            self.home_library = Some(home);
        }
        Ok(())
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        crate::infrastructure::seed::default_config()
    }
}

/// Partial override file shape. Every field is optional; table keys are
/// strings for JSON friendliness and re-parsed into their typed forms.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigOverrides {
    pub lc_classes: Option<HashMap<String, String>>,
    pub lc_subclasses: Option<HashMap<String, String>>,
    pub dewey_hundreds: Option<HashMap<String, String>>,
    pub dewey_tens: Option<HashMap<String, String>>,
    pub ignore_sentinels: Option<HashSet<String>>,
    pub ignore_prefixes: Option<Vec<String>>,
    pub unwanted_locations: Option<HashSet<String>>,
    pub shelby_locations: Option<HashSet<String>>,
    pub online_locations: Option<HashSet<String>>,
    pub gov_doc_locations: Option<HashMap<String, String>>,
    pub default_gov_doc_category: Option<String>,
    pub lc_deny_patterns: Option<Vec<String>>,
    pub relaxed_lc_libraries: Option<HashSet<String>>,
    pub alphanum_class_prefixes: Option<HashSet<String>>,
    pub home_library: Option<String>,
}

fn parse_letter_keys(map: HashMap<String, String>) -> Result<HashMap<char, String>, ConfigError> {
    let mut out = HashMap::new();
    for (key, label) in map {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => {
                out.insert(c, label);
            }
            _ => {
                return Err(ConfigError::Json(format!(
                    "LC class key must be a single uppercase letter, got {:?}",
                    key
                )));
            }
        }
    }
    Ok(out)
}

fn parse_bucket_keys(map: HashMap<String, String>) -> Result<HashMap<u16, String>, ConfigError> {
    let mut out = HashMap::new();
    for (key, label) in map {
        let bucket = key
            .parse::<u16>()
            .map_err(|_| ConfigError::Json(format!("Dewey bucket key must be numeric, got {:?}", key)))?;
        out.insert(bucket, label);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subclass_longest_prefix() {
        let config = ClassificationConfig::default();
        // "DS" is seeded, "DSX" is not: the DS entry wins.
        let (prefix, _) = config.subclass_label("DSX").unwrap();
        assert_eq!(prefix, "DS");
        // Nothing prefixes "KFC" in the seed table.
        assert!(config.subclass_label("KFC").is_none());
    }

    #[test]
    fn test_override_keeps_seeded_values() {
        let mut config = ClassificationConfig::default();
        let overrides = ConfigOverrides {
            home_library: Some("EAST-ASIA".to_string()),
            ..Default::default()
        };
        config.apply(overrides).unwrap();
        assert_eq!(config.home_library.as_deref(), Some("EAST-ASIA"));
        // Untouched tables keep their seed contents.
        assert_eq!(config.lc_classes.get(&'M').map(String::as_str), Some("Music"));
    }

    #[test]
    fn test_bad_bucket_key_rejected() {
        let mut config = ClassificationConfig::default();
        let mut tens = HashMap::new();
        tens.insert("15x".to_string(), "Psychology".to_string());
        let overrides = ConfigOverrides {
            dewey_tens: Some(tens),
            ..Default::default()
        };
        assert!(config.apply(overrides).is_err());
    }
}
