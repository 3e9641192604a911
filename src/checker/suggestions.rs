use crate::checker::dictionary::Dictionary;
use std::collections::BTreeSet;

/// Common keyboard and phonetic slips tried as single substitutions.
const COMMON_SLIPS: &[(char, char)] = &[
    ('a', 'e'),
    ('e', 'a'),
    ('e', 'i'),
    ('i', 'e'),
    ('i', 'o'),
    ('o', 'u'),
    ('b', 'v'),
    ('c', 'k'),
    ('f', 'v'),
    ('g', 'j'),
    ('m', 'n'),
    ('n', 'm'),
    ('s', 'z'),
    ('t', 'd'),
];

/// Rank dictionary words close to `word`, best first.
///
/// Candidates come from single edits of the word and from dictionary words
/// sharing its first two letters; anything further than `max_distance` edits
/// away is dropped.
pub fn generate(word: &str, dictionary: &Dictionary, max_suggestions: usize) -> Vec<String> {
    let word = word.to_lowercase();
    if max_suggestions == 0 || word.is_empty() {
        return Vec::new();
    }

    let mut candidates: BTreeSet<String> = single_edits(&word)
        .into_iter()
        .filter(|candidate| dictionary.contains(candidate))
        .collect();

    let prefix: String = word.chars().take(2).collect();
    candidates.extend(dictionary.words_with_prefix(&prefix));
    candidates.remove(&word);

    let limit = max_distance(&word);
    let mut ranked: Vec<(usize, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = edit_distance(&word, &candidate);
            (distance <= limit).then_some((distance, candidate))
        })
        .collect();

    ranked.sort_by(|(da, a), (db, b)| {
        da.cmp(db)
            .then_with(|| length_gap(&word, a).cmp(&length_gap(&word, b)))
            .then_with(|| a.cmp(b))
    });

    ranked
        .into_iter()
        .take(max_suggestions)
        .map(|(_, candidate)| candidate)
        .collect()
}

fn max_distance(word: &str) -> usize {
    match word.chars().count() {
        0..=3 => 1,
        4..=7 => 2,
        _ => 3,
    }
}

fn length_gap(a: &str, b: &str) -> usize {
    a.chars().count().abs_diff(b.chars().count())
}

/// Edit distance over characters, counting an adjacent swap as one edit.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut d = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        d[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (d[i - 1][j] + 1).min(d[i][j - 1] + 1).min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(d[i - 2][j - 2] + 1);
            }
            d[i][j] = best;
        }
    }

    d[a.len()][b.len()]
}

/// Deletions, adjacent transpositions and common slips of `word`.
fn single_edits(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut edits = Vec::new();

    for i in 0..chars.len() {
        let mut deleted = chars.clone();
        deleted.remove(i);
        edits.push(deleted.into_iter().collect());
    }

    for i in 0..chars.len().saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        edits.push(swapped.into_iter().collect());
    }

    for (i, &ch) in chars.iter().enumerate() {
        for &(from, to) in COMMON_SLIPS {
            if ch == from {
                let mut slipped = chars.clone();
                slipped[i] = to;
                edits.push(slipped.into_iter().collect());
            }
        }
    }

    edits
}
