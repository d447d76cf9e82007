use serde::{Deserialize, Deserializer, Serialize};

/// Wear ceiling applied to every marketplace query.
pub const FLOAT_CEILING: f64 = 0.08;

/// What a caller asked to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    pub item_family: String,
    pub sub_variant: String,
    pub phase_selector: Option<String>,
}

impl VariantSpec {
    pub fn new(item_family: &str, sub_variant: &str, phase_selector: Option<&str>) -> Self {
        Self {
            item_family: item_family.to_string(),
            sub_variant: sub_variant.to_string(),
            phase_selector: phase_selector.map(str::to_string),
        }
    }

    /// The selector as a plain string, empty when none was given.
    pub fn phase(&self) -> &str {
        self.phase_selector.as_deref().unwrap_or("")
    }
}

/// Marketplace attribute encoding for a family: `def_index` plus an optional `paint_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEncoding {
    pub category_code: String,
    pub phase_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub display_name: String,
    pub category_code: String,
    pub phase_code: Option<String>,
    pub seed_value: Option<String>,
    pub float_ceiling: f64,
}

impl QuerySpec {
    /// Query parameters in the order the listings endpoint documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("market_hash_name", self.display_name.clone()),
            ("max_float", self.float_ceiling.to_string()),
            ("def_index", self.category_code.clone()),
        ];
        if let Some(phase) = &self.phase_code {
            pairs.push(("paint_index", phase.clone()));
        }
        if let Some(seed) = &self.seed_value {
            pairs.push(("paint_seed", seed.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingItem {
    pub market_hash_name: String,
    pub float_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub item: ListingItem,
    /// Minor currency units (cents).
    pub price: u64,
    /// Seed that was searched to find this listing, set in tier mode only.
    #[serde(skip)]
    pub searched_seed: Option<String>,
}

impl ListingRecord {
    pub fn with_seed(mut self, seed: &str) -> Self {
        self.searched_seed = Some(seed.to_string());
        self
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected listing id as string or number, got {}",
            other
        ))),
    }
}

/// Command parameters delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search {
        weapon: String,
        skin: String,
        phase: Option<String>,
        paint_seed: Option<String>,
    },
    Locate {
        weapon: String,
        skin: String,
        phase: String,
        tier: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search { .. } => "search",
            Command::Locate { .. } => "locate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

/// A rendered reply: title, named fields and an accent color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDocument {
    pub title: String,
    pub fields: Vec<EmbedField>,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMessage {
    Text(String),
    Embed(DisplayDocument),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub records: Vec<ListingRecord>,
}

/// How a command invocation ended, as far as the caller is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Delivered { listings: usize, pages: usize },
    NoListings { display_name: String },
    UnknownTier { tier: String },
    FetchFailed,
}
