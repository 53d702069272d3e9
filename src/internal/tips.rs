use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::models::Tip;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// The session's tip collection, read from a local JSON file the first time
/// it is needed and never re-read afterwards.
#[derive(Debug, Clone, Default)]
pub struct TipStore {
    tips: Vec<Tip>,
    loaded: bool,
}

impl TipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an in-memory collection, marking it loaded.
    pub fn from_tips(tips: Vec<Tip>) -> Self {
        Self { tips, loaded: true }
    }

    /// Load the tips file on first call; later calls are no-ops. A missing or
    /// malformed file substitutes a single placeholder tip so the view always
    /// has something to show.
    pub fn ensure_loaded(&mut self, path: &Path) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        match Self::read_file(path) {
            Ok(tips) => {
                info!(count = tips.len(), file = %path.display(), "loaded tips");
                self.tips = tips;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %format!("{e:#}"), "failed to load tips, substituting placeholder");
                self.tips = vec![error_tip()];
            }
        }
    }

    fn read_file(path: &Path) -> Result<Vec<Tip>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read tips file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse tips file {}", path.display()))
    }

    pub fn tips(&self) -> &[Tip] {
        &self.tips
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// "all" plus each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for tip in &self.tips {
            if !categories.iter().any(|c| c == &tip.category) {
                categories.push(tip.category.clone());
            }
        }
        categories
    }
}

/// The one-element stand-in used when the tips file cannot be loaded.
pub fn error_tip() -> Tip {
    Tip {
        id: "tip-load-error".to_string(),
        title: "Tips unavailable".to_string(),
        content: "The local tips file could not be loaded. Check that it exists \
                  next to the binary and contains a JSON array of tips."
            .to_string(),
        category: ALL_CATEGORIES.to_string(),
        source: String::new(),
    }
}

/// Select the tips that survive both filters: category equality (disabled by
/// "all") and a case-insensitive substring match of the search term against
/// title or content. Input order is preserved.
pub fn filter_tips<'a>(tips: &'a [Tip], category: &str, search: &str) -> Vec<&'a Tip> {
    let needle = search.trim().to_lowercase();
    tips.iter()
        .filter(|tip| category == ALL_CATEGORIES || tip.category == category)
        .filter(|tip| {
            needle.is_empty()
                || tip.title.to_lowercase().contains(&needle)
                || tip.content.to_lowercase().contains(&needle)
        })
        .collect()
}
