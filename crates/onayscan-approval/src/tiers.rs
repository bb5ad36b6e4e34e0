//! The approval-authority ladder: ordered value ranges mapped to role
//! titles. The ladder is configuration, loadable from JSON, with the
//! organization's default table built in.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use onayscan_core::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
struct TierEntry {
    /// Inclusive upper bound in USD; `None` marks the open top tier.
    upper: Option<f64>,
    authority: String,
}

/// Ordered, contiguous approval tiers. Each tier covers values up to and
/// including its upper bound; the last tier is unbounded, so every value
/// `v >= 0` resolves to exactly one authority.
#[derive(Debug, Clone)]
pub struct ApprovalLadder {
    tiers: Vec<(f64, String)>,
    top: String,
}

impl ApprovalLadder {
    /// The organization's default ladder.
    pub fn builtin() -> Self {
        Self {
            tiers: vec![
                (1_000.0, "Satınalmacı".to_string()),
                (5_000.0, "Şef / Kategori Yöneticisi".to_string()),
                (75_000.0, "Müdür / Bölge Müdürü".to_string()),
                (150_000.0, "Direktör".to_string()),
                (400_000.0, "Kıdemli Direktör".to_string()),
                (600_000.0, "Genel Müdür Yardımcısı".to_string()),
            ],
            top: "Genel Müdür".to_string(),
        }
    }

    /// Load a ladder override, falling back to the builtin table when the
    /// path is absent or unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match Self::load_from(path) {
            Ok(ladder) => {
                info!("loaded approval ladder from {}", path.display());
                ladder
            }
            Err(e) => {
                warn!("failed to load tiers {}: {e}, using builtin", path.display());
                Self::builtin()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<TierEntry> = serde_json::from_str(&raw)?;
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<TierEntry>) -> Result<Self> {
        let Some((last, bounded)) = entries.split_last() else {
            return Err(Error::Config("tier table is empty".to_string()));
        };
        if last.upper.is_some() {
            return Err(Error::Config(
                "last tier must be unbounded (no upper)".to_string(),
            ));
        }

        let mut tiers = Vec::with_capacity(bounded.len());
        let mut previous = 0.0_f64;
        for entry in bounded {
            let Some(upper) = entry.upper else {
                return Err(Error::Config(
                    "only the last tier may be unbounded".to_string(),
                ));
            };
            if upper <= previous {
                return Err(Error::Config(format!(
                    "tier bounds must strictly increase (got {upper} after {previous})"
                )));
            }
            previous = upper;
            tiers.push((upper, entry.authority.clone()));
        }

        Ok(Self {
            tiers,
            top: last.authority.clone(),
        })
    }

    /// Resolve the authority for a value. Negative values clamp to the
    /// bottom tier.
    pub fn authority_for(&self, value: f64) -> &str {
        for (upper, authority) in &self.tiers {
            if value <= *upper {
                return authority;
            }
        }
        &self.top
    }
}

impl Default for ApprovalLadder {
    fn default() -> Self {
        Self::builtin()
    }
}
