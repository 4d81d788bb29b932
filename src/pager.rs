//! Page-local slicing of an already-materialized result set.
//!
//! Not a database cursor: the caller scans first, then slices. A write
//! landing between the scan and the slice can skew the reported totals.

/// Slice `items` down to the 1-based page `page` of `page_size` rows.
///
/// Out-of-range pages yield an empty vec, never an error.
pub fn paginate<T: Clone>(page: usize, page_size: usize, items: &[T]) -> Vec<T> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(items.len());
    items[start..end].to_vec()
}

/// Resolve a raw `page` query value. Absent or non-numeric input means
/// page 1, matching what the listing endpoints have always done.
pub fn page_from_query(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok()).filter(|p| *p >= 1).unwrap_or(1)
}
