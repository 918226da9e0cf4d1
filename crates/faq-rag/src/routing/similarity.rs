//! String-similarity ratio used by the fuzzy routing stages

/// Ratcliff/Obershelp similarity: `2*M / (len(a) + len(b))`, where `M` is the
/// total length of the recursively matched common substrings. Equivalent to
/// the classic "gestalt pattern matching" ratio; 1.0 means identical.
pub fn sequence_ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a, &b);
    2.0 * matches as f32 / total as f32
}

/// Best key by similarity ratio, if any reaches `cutoff`.
pub fn closest_match<'a, I>(query: &str, candidates: I, cutoff: f32) -> Option<(&'a str, f32)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f32)> = None;
    for candidate in candidates {
        let ratio = sequence_ratio(query, candidate);
        if ratio >= cutoff && best.map_or(true, |(_, b)| ratio > b) {
            best = Some((candidate, ratio));
        }
    }
    best
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_common_run(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..ai], &b[..bi]) + matching_chars(&a[ai + len..], &b[bi + len..])
}

/// Longest common substring via dynamic programming with a rolling row.
fn longest_common_run(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut curr = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                curr[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = curr;
    }

    best
}
