use crate::core::aliases::are_aliases;

/// Default similarity required for an edit-distance first-name match
pub const DEFAULT_NAME_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Lowercase, trim and collapse every whitespace run to a single space
#[inline]
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case- and whitespace-insensitive equality
#[inline]
pub fn normalized_eq(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Strip every non-digit character
#[inline]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Levenshtein edit distance over characters
///
/// Insertion, deletion and substitution each cost 1.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1]
            } else {
                1 + dp[i - 1][j].min(dp[i][j - 1]).min(dp[i - 1][j - 1])
            };
        }
    }

    dp[m][n]
}

/// Similarity in [0, 1] derived from edit distance: `1 - d / max(len)`
///
/// Comparison is case-insensitive. An empty input always yields 0.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());

    let distance = levenshtein_distance(&a, &b);
    1.0 - distance as f64 / max_len as f64
}

/// Compare first names: exact, then alias group, then edit distance
pub fn fuzzy_first_name_match(a: &str, b: &str, threshold: f64) -> bool {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    if are_aliases(&a, &b) {
        return true;
    }

    // distance is at least the length gap, so skip the table when that alone misses
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    let max_len = len_a.max(len_b);
    let best_case = 1.0 - len_a.abs_diff(len_b) as f64 / max_len as f64;
    if best_case < threshold {
        return false;
    }

    levenshtein_similarity(&a, &b) >= threshold
}
