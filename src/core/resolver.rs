use crate::domain::model::AttributeEncoding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `def_index` used by every family without a special encoding.
pub const FALLBACK_CATEGORY_CODE: &str = "7";

/// A family whose variants are told apart by `paint_index` phase codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasedFamily {
    pub def_index: String,
    #[serde(default)]
    pub phases: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseRegistry {
    families: HashMap<String, PhasedFamily>,
}

impl PhaseRegistry {
    pub fn empty() -> Self {
        Self {
            families: HashMap::new(),
        }
    }

    pub fn from_families(families: HashMap<String, PhasedFamily>) -> Self {
        Self { families }
    }

    pub fn with_family(mut self, name: &str, family: PhasedFamily) -> Self {
        self.families.insert(name.to_string(), family);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PhasedFamily> {
        self.families.get(name)
    }
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        let phases = [("1", "418"), ("2", "419"), ("3", "420"), ("4", "421")]
            .into_iter()
            .map(|(phase, code)| (phase.to_string(), code.to_string()))
            .collect();

        Self::empty().with_family(
            "Karambit",
            PhasedFamily {
                def_index: "507".to_string(),
                phases,
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct VariantResolver {
    registry: PhaseRegistry,
}

impl VariantResolver {
    pub fn new(registry: PhaseRegistry) -> Self {
        Self { registry }
    }

    /// Never fails: unknown families fall back, unknown phases drop the phase filter.
    pub fn resolve(&self, item_family: &str, phase_selector: &str) -> AttributeEncoding {
        match self.registry.get(item_family) {
            Some(family) => {
                let phase_code = if phase_selector.is_empty() {
                    None
                } else {
                    family.phases.get(phase_selector).cloned()
                };
                if phase_code.is_none() && !phase_selector.is_empty() {
                    tracing::debug!(
                        "No phase code for {} phase '{}', searching without paint_index",
                        item_family,
                        phase_selector
                    );
                }
                AttributeEncoding {
                    category_code: family.def_index.clone(),
                    phase_code,
                }
            }
            None => AttributeEncoding {
                category_code: FALLBACK_CATEGORY_CODE.to_string(),
                phase_code: None,
            },
        }
    }
}

impl Default for VariantResolver {
    fn default() -> Self {
        Self::new(PhaseRegistry::default())
    }
}
