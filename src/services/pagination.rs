//! Pagination: page-size clamping, window trimming and the page envelope.

use serde::Serialize;

/// Hard upper bound on page size.
pub const MAX_LIMIT: u64 = 100;

/// Largest start offset the database accepts for `SKIP`.
pub const MAX_START: u64 = i64::MAX as u64;

/// Clamps a requested page size to [`MAX_LIMIT`].
pub fn clamp_limit(limit: u64) -> u64 {
    limit.min(MAX_LIMIT)
}

/// Clamps a requested start offset to [`MAX_START`]. Any offset that large
/// is past the end of every list, so the page is simply empty.
pub fn clamp_start(start: u64) -> u64 {
    start.min(MAX_START)
}

/// Returns the window `items[start .. start + limit]` with `limit` clamped.
///
/// Windows running past the end are cut short; a start past the end yields
/// an empty slice.
pub fn trim_list<T>(items: &[T], start: usize, limit: usize) -> &[T] {
    let limit = limit.min(MAX_LIMIT as usize);
    let start = start.min(items.len());
    let end = start.saturating_add(limit).min(items.len());
    &items[start..end]
}

/// A page of results with links to its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub start: u64,
    pub limit: u64,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub results: Vec<T>,
}

/// Wraps `results` in a [`Page`] whose links are relative to `url`.
///
/// `results` are taken as-is. The previous link reuses the current start
/// as its limit, so it covers everything before this page when
/// `start < limit`.
pub fn get_paginated_list<T>(
    results: Vec<T>,
    url: &str,
    has_next: bool,
    start: u64,
    limit: u64,
) -> Page<T> {
    let limit = clamp_limit(limit);

    let previous = (start != 0).then(|| {
        format!(
            "{}?start={}&limit={}",
            url,
            start.saturating_sub(limit),
            start
        )
    });
    let next = has_next.then(|| {
        format!(
            "{}?start={}&limit={}",
            url,
            start.saturating_add(limit),
            limit
        )
    });

    Page {
        start,
        limit,
        previous,
        next,
        results,
    }
}
