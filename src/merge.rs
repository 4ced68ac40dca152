//! Overlap merging for consecutive reads of a scrolled view.
//!
//! After a partial scroll the new window shares a suffix of the previous
//! window as its prefix. Appending `current` wholesale would duplicate those
//! lines; this module finds the largest such overlap and returns only the
//! tail that is genuinely new.

/// Return the suffix of `current` that does not overlap the tail of
/// `previous`.
///
/// Picks the largest `k` with `previous[len-k..] == current[..k]` and returns
/// `&current[k..]`. When no overlap exists, all of `current` is new — a
/// duplicated line at a scroll boundary is preferred over a lost one.
pub fn new_lines<'a, S: AsRef<str>>(previous: &[S], current: &'a [S]) -> &'a [S] {
    let max_k = previous.len().min(current.len());
    let mut overlap = 0;
    for k in 1..=max_k {
        let tail = &previous[previous.len() - k..];
        let head = &current[..k];
        if tail
            .iter()
            .zip(head)
            .all(|(a, b)| a.as_ref() == b.as_ref())
        {
            overlap = k;
        }
    }
    &current[overlap..]
}
