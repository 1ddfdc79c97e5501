// src/compare/distance.rs
//! Levenshtein distance over node sequences.

/// Minimum insertions, deletions and substitutions turning `left` into
/// `right`. A substitution is free when `same` holds for the pair.
///
/// Uses two rolling rows of `right.len() + 1` cells.
pub fn distance<'a, T, F>(left: &'a [T], right: &'a [T], mut same: F) -> usize
where
    F: FnMut(&'a T, &'a T) -> bool,
{
    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    let mut prev: Vec<usize> = (0..=right.len()).collect();
    let mut curr = vec![0usize; right.len() + 1];

    for (i, l) in left.iter().enumerate() {
        curr[0] = i + 1;
        for (j, r) in right.iter().enumerate() {
            let cost = usize::from(!same(l, r));
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[right.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_classic_pairs() {
        let eq = |a: &char, b: &char| a == b;
        assert_eq!(distance(&chars("kitten"), &chars("sitting"), eq), 3);
        assert_eq!(distance(&chars("flaw"), &chars("lawn"), eq), 2);
        assert_eq!(distance(&chars("same"), &chars("same"), eq), 0);
    }

    #[test]
    fn test_empty_sides() {
        let eq = |a: &char, b: &char| a == b;
        assert_eq!(distance(&[], &chars("abc"), eq), 3);
        assert_eq!(distance(&chars("ab"), &[], eq), 2);
    }

    #[test]
    fn test_extract_method_shape() {
        // S1 S2 S3 S4 -> S1 call S4
        let left = chars("abcd");
        let right = chars("axd");
        assert_eq!(distance(&left, &right, |a, b| a == b), 2);
    }
}
