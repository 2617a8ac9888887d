use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};
use log::{debug, info};
use rustc_hash::FxHashMap;

/// Reference identifiers of the bundled coronavirus panel and their display names.
pub const CORONAVIRUS_NAMES: [(&str, &str); 17] = [
    ("Bat_Coronavirus_HKU4_1", "Bat coronavirus HKU4-1"),
    ("Bat_Coronavirus_HKU5_1", "Bat coronavirus HKU5-1"),
    ("Bat_Coronavirus_HKU9_1", "Bat coronavirus HKU9-1"),
    ("bat_Coronavirus_Parker", "Rat coronavirus Parker"),
    ("Bat_Hp_Betacoronavirus_Zhejiang2013", "Bat Hp-betacoronavirus"),
    ("Betacoronavirus_England", "Betacoronavirus England 1"),
    ("Betacoronavirus_Erinaceus", "Betacoronavirus isolate Erinaceus CoV, 2012"),
    ("Betacoronavirus_HKU24_Strain_HKU24_R05005I", "Betacoronavirus HKU24 strain HKU24-R05005I"),
    ("Bovine_Coronavirus", "Bovine coronavirus"),
    ("Human_Coronavirus_HKU1", "Human coronavirus HKU1"),
    ("Human_Coronavirus_OC43_Strain_ATCC_VR_759", "Human coronavirus OC43 strain ATCC VR-759"),
    ("Middle_East_Respiratory_Syndrome_Coronavirus", "Middle East respiratory syndrome (MERS) coronavirus"),
    ("Mouse_Hepatitis_Virus_Strain_MHV_A59_C12_mutant", "Mouse hepatitis virus strain MHV-A59 C12 mutant"),
    ("Rabbit_Coronavirus_HKU14", "Rabbit coronavirus HKU14"),
    ("Rousettus_Bat_Coronavirus_Isolate_GCCDC1_356", "Rousettus bat coronavirus isolate GCCDC1 356"),
    ("Severe_Acute_Respiratory_Syndrome_Coronavirus", "Severe acute respiratory syndrome (SARS) coronavirus"),
    ("Wuhan_seafood_market_pneumonia_virus_isolate_Wuhan_Hu_1", "SARS-CoV-2"),
];

pub const DEFAULT_QUERY_PATTERN: &str = "wuhan";
pub const DEFAULT_QUERY_NAME: &str = "SARS-CoV-2";

/// Lookup from lowercased raw identifier to display name.
#[derive(Debug, Clone)]
pub struct NameTable {
    entries: FxHashMap<String, String>,
}

impl NameTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();
        NameTable { entries }
    }

    pub fn coronavirus() -> Self {
        Self::new(CORONAVIRUS_NAMES)
    }

    /// Load a table from a two column TSV: `raw_id<TAB>display name`.
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open name table {}", path.display()))?;
        let mut entries = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Error reading {}", path.display()))?;
            let line = line.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((id, name)) if !id.trim().is_empty() => {
                    entries.push((id.trim().to_string(), name.trim().to_string()))
                }
                _ => bail!(
                    "{}:{}: expected raw_id<TAB>display name",
                    path.display(),
                    i + 1
                ),
            }
        }
        info!("Loaded {} display names from {}", entries.len(), path.display());
        Ok(Self::new(entries))
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(&raw.to_lowercase()).map(String::as_str)
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::coronavirus()
    }
}

/// Identifies the query genome by a case-insensitive substring of its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRule {
    pattern: String,
    display_name: String,
}

impl QueryRule {
    pub fn new(pattern: &str, display_name: &str) -> Self {
        QueryRule {
            pattern: pattern.to_lowercase(),
            display_name: display_name.to_string(),
        }
    }

    pub fn matches(&self, raw: &str) -> bool {
        raw.to_lowercase().contains(&self.pattern)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Default for QueryRule {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_PATTERN, DEFAULT_QUERY_NAME)
    }
}

/// Maps raw reference labels to the names shown on the figure.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    table: NameTable,
    query: QueryRule,
}

impl NameNormalizer {
    pub fn new(table: NameTable, query: QueryRule) -> Self {
        NameNormalizer { table, query }
    }

    pub fn query(&self) -> &QueryRule {
        &self.query
    }

    /// The query rule wins over the table, and unknown labels fall back to
    /// their lowercased form.
    pub fn display_name(&self, raw: &str) -> String {
        if self.query.matches(raw) {
            return self.query.display_name().to_string();
        }
        let lower = raw.to_lowercase();
        match self.table.get(&lower) {
            Some(name) => name.to_string(),
            None => {
                debug!("No display name for {}", raw);
                lower
            }
        }
    }
}
