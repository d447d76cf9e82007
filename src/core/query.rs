use crate::domain::model::{AttributeEncoding, QuerySpec, FLOAT_CEILING};

/// Marketplace name filter, e.g. `Karambit | Doppler (Phase 2)`.
pub fn display_name(item_family: &str, sub_variant: &str, phase_selector: &str) -> String {
    let phase = if phase_selector.is_empty() {
        String::new()
    } else {
        format!(" (Phase {})", phase_selector)
    };
    format!("{} | {}{}", item_family, sub_variant, phase)
        .trim()
        .to_string()
}

pub fn build(
    item_family: &str,
    sub_variant: &str,
    phase_selector: &str,
    encoding: &AttributeEncoding,
    seed_value: Option<&str>,
) -> QuerySpec {
    QuerySpec {
        display_name: display_name(item_family, sub_variant, phase_selector),
        category_code: encoding.category_code.clone(),
        phase_code: encoding.phase_code.clone(),
        seed_value: seed_value.map(str::to_string),
        float_ceiling: FLOAT_CEILING,
    }
}
