//! Keyword profiles — the skill vocabulary for each job role, and the
//! read-only registry that maps role names to profiles.
//!
//! The registry is constructed once at startup (built-in defaults or a JSON
//! file) and carried in `AppState` behind an `Arc`; nothing mutates it after
//! that, so the scoring path needs no locking.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoreError;

/// The skill vocabulary for one job role. Keyword order is preserved for
/// display; matching is order-independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordProfile {
    pub role: String,
    pub keywords: Vec<String>,
}

impl KeywordProfile {
    /// Builds a profile, trimming keywords and dropping case-insensitive
    /// duplicates (first occurrence wins). A profile that ends up with no
    /// keywords is refused: scoring against it would be undefined.
    pub fn new<R, K, I>(role: R, keywords: I) -> Result<Self, ScoreError>
    where
        R: Into<String>,
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        let role = role.into();
        let mut seen = HashSet::new();
        let mut deduped = Vec::new();
        for keyword in keywords {
            let keyword = keyword.into().trim().to_string();
            if keyword.is_empty() {
                continue;
            }
            if seen.insert(keyword.to_lowercase()) {
                deduped.push(keyword);
            }
        }
        if deduped.is_empty() {
            return Err(ScoreError::InvalidProfile(role));
        }
        Ok(KeywordProfile {
            role,
            keywords: deduped,
        })
    }
}

/// Read-only mapping from role name to its keyword profile.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<KeywordProfile>,
    index: HashMap<String, usize>,
}

impl ProfileRegistry {
    /// Builds a registry from already-validated profiles. Role names must be
    /// unique (case-insensitive).
    pub fn new(profiles: Vec<KeywordProfile>) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, profile) in profiles.iter().enumerate() {
            let key = normalize_role(&profile.role);
            if index.insert(key, i).is_some() {
                bail!("duplicate keyword profile for role '{}'", profile.role);
            }
        }
        Ok(ProfileRegistry { profiles, index })
    }

    /// The default role set shipped with the service.
    pub fn builtin() -> Self {
        let profiles = vec![
            ("Data Scientist", vec![
                "python",
                "machine learning",
                "data analysis",
                "sql",
                "communication",
            ]),
            ("Backend Engineer", vec![
                "rust",
                "api design",
                "postgresql",
                "docker",
                "testing",
                "communication",
            ]),
            ("Frontend Engineer", vec![
                "javascript",
                "typescript",
                "react",
                "css",
                "accessibility",
                "testing",
            ]),
            ("DevOps Engineer", vec![
                "kubernetes",
                "terraform",
                "aws",
                "linux",
                "ci/cd",
                "monitoring",
            ]),
            ("Product Manager", vec![
                "roadmap",
                "stakeholder management",
                "analytics",
                "agile",
                "communication",
            ]),
        ]
        .into_iter()
        .map(|(role, keywords)| KeywordProfile::new(role, keywords))
        .collect::<Result<Vec<_>, _>>()
        .expect("built-in keyword profiles are valid");

        Self::new(profiles).expect("built-in role names are unique")
    }

    /// Loads profiles from a JSON file: `[{"role": "...", "keywords": [...]}]`.
    pub fn from_json_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read keyword profiles from '{path}'"))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("invalid keyword profiles in '{path}'"))
    }

    fn from_json_str(raw: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ProfileSpec {
            role: String,
            keywords: Vec<String>,
        }

        let specs: Vec<ProfileSpec> = serde_json::from_str(raw)?;
        let profiles = specs
            .into_iter()
            .map(|spec| {
                KeywordProfile::new(spec.role.clone(), spec.keywords)
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(profiles)
    }

    /// Looks up a role by name (case-insensitive, whitespace-trimmed).
    /// An unknown role is surfaced to the caller, never defaulted.
    pub fn lookup(&self, role: &str) -> Result<&KeywordProfile, ScoreError> {
        self.index
            .get(&normalize_role(role))
            .map(|&i| &self.profiles[i])
            .ok_or_else(|| ScoreError::UnknownRole(role.trim().to_string()))
    }

    pub fn profiles(&self) -> &[KeywordProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}
