use crate::model::NearbyCity;

pub const DEFAULT_NEARBY_COUNT: u8 = 5;

/// Drop every candidate whose name equals `name` after lowercasing.
/// No whitespace or diacritic folding; the remaining order is kept.
pub fn exclude_location(candidates: Vec<NearbyCity>, name: &str) -> Vec<NearbyCity> {
    let needle = name.to_lowercase();
    candidates.into_iter().filter(|c| c.name.to_lowercase() != needle).collect()
}
