use crate::model::Observation;

/// Parse a `label:value, label:value` group, left to right.
///
/// Each candidate is split on its first `:`; candidates without one are
/// dropped. Labels and values are trimmed, and values that are not numbers
/// are kept as categorical text.
pub fn parse_pairs(group: &str) -> impl Iterator<Item = (&str, Observation)> {
    group.split(',').filter_map(|candidate| {
        let (label, value) = candidate.split_once(':')?;
        Some((label.trim(), Observation::parse(value.trim())))
    })
}
