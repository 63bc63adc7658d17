use std::cmp::Reverse;

use wm_core::Warp;

/// How well a warp name matches a query, best first.
///
/// The derived ordering is the ranking priority: a prefix match always beats
/// a substring match, which always beats an edit-distance match; among
/// edit-distance matches a lower distance ranks higher. All comparisons are
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchScore {
    /// The name begins with the query string.
    Prefix,
    /// The name contains the query string elsewhere.
    Substring,
    /// Neither; ranked by Levenshtein distance to the query.
    Distance(usize),
}

impl MatchScore {
    /// Score a single name against a query.
    pub fn of(name: &str, query: &str) -> Self {
        let name = name.to_lowercase();
        let query = query.to_lowercase();
        if name.starts_with(&query) {
            Self::Prefix
        } else if name.contains(&query) {
            Self::Substring
        } else {
            Self::Distance(edit_distance(&name, &query))
        }
    }
}

/// A warp paired with its score for one query.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    /// The scored warp.
    pub warp: &'a Warp,
    /// Its score against the query.
    pub score: MatchScore,
}

/// Rank candidates against a query.
///
/// Ties on score are broken by higher visit count, then by case-insensitive
/// name order, so the result is stable and reproducible for identical input.
pub fn rank<'a>(candidates: impl IntoIterator<Item = &'a Warp>, query: &str) -> Vec<Ranked<'a>> {
    let mut ranked: Vec<Ranked<'a>> = candidates
        .into_iter()
        .map(|warp| Ranked {
            warp,
            score: MatchScore::of(&warp.name, query),
        })
        .collect();
    ranked.sort_by(|a, b| {
        (a.score, Reverse(a.warp.visits()), a.warp.name.to_lowercase()).cmp(&(
            b.score,
            Reverse(b.warp.visits()),
            b.warp.name.to_lowercase(),
        ))
    });
    ranked
}

/// The candidate whose name equals the query ignoring case, if any.
///
/// Warp names are unique ignoring case, so at most one candidate can match.
pub fn exact_match<'a>(
    candidates: impl IntoIterator<Item = &'a Warp>,
    query: &str,
) -> Option<&'a Warp> {
    candidates
        .into_iter()
        .find(|w| w.name.eq_ignore_ascii_case(query))
}

/// Levenshtein distance between two strings, by characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic program over the edit matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
