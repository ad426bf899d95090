//! Palindromic expansion for seamless circular display
//!
//! A sequence `S` of length `n >= 2` is expanded to
//! `M = S ++ reverse(S[..n-1])` followed by `M[1..len-1]`, length `4n - 4`.
//! Walking the result in a loop visits every color and returns to the
//! start without a jump.
//!
//! The expansion depends only on `n`, so it is described once by a
//! [`MirrorMap`] and applied to colors, names and contrast rows alike.
//! Index `k` of every mirrored view then refers to the same palette
//! entry.

/// The source index of every slot of a mirrored sequence of base length `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorMap {
    base_len: usize,
    sources: Vec<usize>,
}

impl MirrorMap {
    pub fn new(base_len: usize) -> Self {
        if base_len <= 1 {
            return Self {
                base_len,
                sources: (0..base_len).collect(),
            };
        }

        // first mirror: 0, 1, .., n-1, n-2, .., 0
        let first: Vec<usize> = (0..base_len).chain((0..base_len - 1).rev()).collect();
        let sources = first
            .iter()
            .copied()
            .chain(first[1..first.len() - 1].iter().copied())
            .collect();
        Self { base_len, sources }
    }

    /// Length of the sequence this map applies to.
    pub fn base_len(&self) -> usize {
        self.base_len
    }

    /// Length of the mirrored output.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source index of mirrored slot `k`.
    pub fn source(&self, k: usize) -> Option<usize> {
        self.sources.get(k).copied()
    }

    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Mirror `items`, or `None` if it is not `base_len` long.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Option<Vec<T>> {
        if items.len() != self.base_len {
            return None;
        }
        Some(self.sources.iter().map(|&i| items[i].clone()).collect())
    }
}

/// Mirror any sequence.
///
/// # Example
///
/// ```
/// use farbe::mirror;
///
/// assert_eq!(mirror(&['A', 'B', 'C']), ['A', 'B', 'C', 'B', 'A', 'B', 'C', 'B']);
/// assert_eq!(mirror(&['A']), ['A']);
/// ```
pub fn mirror<T: Clone>(items: &[T]) -> Vec<T> {
    let map = MirrorMap::new(items.len());
    map.sources.iter().map(|&i| items[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_and_three_elements() {
        assert_eq!(mirror(&["A", "B"]), ["A", "B", "A", "B"]);
        assert_eq!(mirror(&["A", "B", "C"]), ["A", "B", "C", "B", "A", "B", "C", "B"]);
    }

    #[test]
    fn test_short_sequences_are_identity() {
        assert_eq!(mirror::<u8>(&[]), Vec::<u8>::new());
        assert_eq!(mirror(&[7]), [7]);
        assert!(MirrorMap::new(0).is_empty());
    }

    #[test]
    fn test_length_law() {
        for n in 2..=10 {
            let items: Vec<usize> = (0..n).collect();
            assert_eq!(mirror(&items).len(), 4 * n - 4);
            assert_eq!(MirrorMap::new(n).len(), 4 * n - 4);
        }
    }

    #[test]
    fn test_loop_has_no_jump() {
        // consecutive slots, including the wrap-around, differ by one step
        for n in 2..=10 {
            let map = MirrorMap::new(n);
            let sources = map.sources();
            for k in 0..sources.len() {
                let next = sources[(k + 1) % sources.len()];
                assert_eq!(sources[k].abs_diff(next), 1, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_apply_keeps_views_aligned() {
        let map = MirrorMap::new(4);
        let colors = ["#000", "#444", "#888", "#fff"];
        let names = ["Black", "Dim", "Gray", "White"];
        let colors = map.apply(&colors).unwrap();
        let names = map.apply(&names).unwrap();
        assert_eq!(colors.len(), names.len());
        for k in 0..colors.len() {
            let source = map.source(k).unwrap();
            assert_eq!(colors[k], ["#000", "#444", "#888", "#fff"][source]);
            assert_eq!(names[k], ["Black", "Dim", "Gray", "White"][source]);
        }
    }

    #[test]
    fn test_apply_refuses_mismatched_length() {
        let map = MirrorMap::new(3);
        assert_eq!(map.apply(&[1, 2]), None);
        assert_eq!(map.source(map.len()), None);
    }
}
