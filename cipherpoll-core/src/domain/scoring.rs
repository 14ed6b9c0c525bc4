/// Category a score classifies into: a label plus a reader-facing description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryProfile {
    pub label: &'static str,
    pub description: &'static str,
}

/// Inclusive upper score bound per category, evaluated top to bottom.
/// Buckets are contiguous and the final entry covers the rest of the domain,
/// so every score maps to exactly one category.
static CATEGORY_TABLE: &[(u64, CategoryProfile)] = &[
    (8, CategoryProfile { label: "ISTJ", description: "Practical and responsible, attentive to detail and tradition" }),
    (12, CategoryProfile { label: "ENFP", description: "Enthusiastic and creative, drawn to new possibilities" }),
    (16, CategoryProfile { label: "INTJ", description: "Strategic thinker, independent and goal-driven" }),
    (u64::MAX, CategoryProfile { label: "ESFJ", description: "Warm and conscientious, values harmony and cooperation" }),
];

/// Sum of answer ranks. Pure and total; no failure mode.
pub fn score(answers: &[u32]) -> u64 {
    answers.iter().map(|rank| u64::from(*rank)).sum()
}

/// Map a score to its category. Deterministic: first bucket whose upper
/// bound contains the score wins.
pub fn classify(score: u64) -> &'static CategoryProfile {
    for (upper, profile) in CATEGORY_TABLE {
        if score <= *upper {
            return profile;
        }
    }
    // The table's final bucket is unbounded.
    unreachable!("category table must cover the full score domain")
}
