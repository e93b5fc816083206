use crate::domain::model::DigitStats;

/// Counts digits 1..=9 in `digits` and reports which are missing and which
/// repeat. Zeros are never counted. Values in `extra` only remove digits
/// from `missing`, they do not add to the counts.
pub fn analyze(digits: &[u32], extra: &[u32]) -> DigitStats {
    let mut stats = DigitStats::default();

    for &digit in digits.iter().filter(|d| (1..=9).contains(*d)) {
        *stats.counts.entry(digit).or_insert(0) += 1;
    }

    stats.missing = (1..=9)
        .filter(|d| !stats.counts.contains_key(d) && !extra.contains(d))
        .collect();

    stats.repeating = stats
        .counts
        .iter()
        .filter(|&(_, &count)| count > 1)
        .map(|(&digit, &count)| (digit, count))
        .collect();

    stats
}
