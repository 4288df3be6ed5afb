//! Pagination utilities for service layer
//!
//! `PageRequest` describes which slice of a sorted result set to return, `Page` carries that
//! slice plus the metadata of the whole set.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on page size; larger requests are clamped.
pub const MAX_PAGE_SIZE: u64 = 100;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseSortError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Direction {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            _ => Err(ParseSortError { kind: "sort direction", value: s.to_string() }),
        }
    }
}

/// Sort key plus direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort<F> {
    pub field: F,
    pub direction: Direction,
}

impl<F> Sort<F> {
    pub fn new(field: F, direction: Direction) -> Self { Self { field, direction } }
}

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest<F> {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
    pub sort: Sort<F>,
}

impl<F> PageRequest<F> {
    pub fn new(page: u64, size: u64, sort: Sort<F>) -> Self { Self { page, size, sort } }

    /// Clamp `size` into `1..=MAX_PAGE_SIZE`
    pub fn normalize(self) -> Self {
        Self { size: self.size.clamp(1, MAX_PAGE_SIZE), ..self }
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> u64 { self.page.saturating_mul(self.size) }

    /// True when the page starts at or beyond `total` elements, including offsets past `u64::MAX`.
    pub fn starts_past(&self, total: u64) -> bool {
        self.page.checked_mul(self.size).map_or(true, |offset| offset >= total)
    }
}

impl<F: Default> Default for PageRequest<F> {
    fn default() -> Self { Self { page: 0, size: DEFAULT_PAGE_SIZE, sort: Sort::default() } }
}

/// One page of a larger result set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T, F> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub sort: Sort<F>,
}

impl<T, F> Page<T, F> {
    pub fn new(content: Vec<T>, request: PageRequest<F>, total_elements: u64) -> Self {
        let total_pages = if request.size == 0 { 0 } else { total_elements.div_ceil(request.size) };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            sort: request.sort,
        }
    }

    /// Cut the requested page out of an already sorted, complete result set.
    pub fn from_sorted(all: Vec<T>, request: PageRequest<F>) -> Self {
        let total = all.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.size).unwrap_or(usize::MAX);
        let content = all.into_iter().skip(skip).take(take).collect();
        Self::new(content, request, total)
    }

    /// Transform the items, keeping every piece of page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U, F> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            sort: self.sort,
        }
    }

    pub fn is_empty(&self) -> bool { self.content.is_empty() }
}
