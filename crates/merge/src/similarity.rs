//! Path-prefix similarity used to choose between fragments that define the
//! same missing symbol.

use std::cmp::Reverse;

use crate::pool::Candidate;

/// Number of leading `/`-separated segments two paths share.
///
/// ```
/// use graphql_merge::path_similarity;
///
/// assert_eq!(path_similarity("a/b/query.graphql", "a/b/pet.graphql"), 2);
/// assert_eq!(path_similarity("a/b/query.graphql", "x/b/pet.graphql"), 0);
/// ```
#[must_use]
pub fn path_similarity(entry_path: &str, candidate_path: &str) -> usize {
    entry_path
        .split('/')
        .zip(candidate_path.split('/'))
        .take_while(|(a, b)| a == b)
        .count()
}

/// Order `candidates` by descending similarity to `entry_path`.
///
/// The sort is stable: equally similar candidates keep their pool order.
#[must_use]
pub fn rank<'a>(entry_path: &str, mut candidates: Vec<&'a Candidate>) -> Vec<&'a Candidate> {
    candidates.sort_by_key(|candidate| {
        Reverse(path_similarity(
            entry_path,
            &candidate.fragment().source_path,
        ))
    });
    candidates
}

/// The top-ranked candidate, if any.
#[must_use]
pub fn best<'a>(entry_path: &str, candidates: Vec<&'a Candidate>) -> Option<&'a Candidate> {
    rank(entry_path, candidates).into_iter().next()
}
