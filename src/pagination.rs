use std::collections::BTreeMap;

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.clamp(1, last_page);
    let mut pages = Vec::new();

    let left_end = left_edge.saturating_add(1).min(last_page.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page.saturating_add(1));

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Request for one page of a filtered list.
///
/// Filters with blank values are dropped, so "no filter" has exactly one
/// representation and two queries compare equal when they would fetch the
/// same page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: usize,
    pub page_size: usize,
    filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            filters: BTreeMap::new(),
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets or, for a blank value, removes a filter.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into().trim().to_string();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
        self
    }

    pub fn without_filter(mut self, key: &str) -> Self {
        self.filters.remove(key);
        self
    }

    pub fn filter_value(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.page >= 1 && self.page_size > 0
    }

    /// Zero-based offset of the first item on this page, saturating for
    /// pages far past any real list.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// One page of a list as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Number of items matching the filters across all pages.
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, total_count: usize, page: usize, page_size: usize) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
        }
    }

    /// Cuts an already filtered, complete list down to the page `query` asks for.
    pub fn slice(all: Vec<T>, query: &ListQuery) -> Self {
        let total_count = all.len();
        let items = all
            .into_iter()
            .skip(query.offset())
            .take(query.page_size)
            .collect();
        Self::new(items, total_count, query.page, query.page_size)
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    /// Page numbers to offer as links, `None` marking a gap.
    pub fn page_links(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages(), self.page, 2, 2, 4, 2)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_removed() {
        let query = ListQuery::new(10)
            .filter("search", "gato")
            .filter("search", "   ");

        assert!(!query.has_filters());
        assert_eq!(query, ListQuery::new(10));
    }

    #[test]
    fn validity_requires_positive_page_and_size() {
        assert!(ListQuery::new(10).is_valid());
        assert!(!ListQuery::new(10).page(0).is_valid());
        assert!(!ListQuery::new(0).is_valid());
    }

    #[test]
    fn slice_respects_page_bounds() {
        let query = ListQuery::new(4).page(3);
        let page = ListPage::slice((1..=10).collect::<Vec<_>>(), &query);

        assert_eq!(page.items, vec![9, 10]);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let query = ListQuery::new(5).page(9);
        let page = ListPage::slice(vec![1, 2, 3], &query);

        assert!(page.is_empty());
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let query = ListQuery::new(10).page(usize::MAX);
        assert!(query.is_valid());
        assert_eq!(query.offset(), usize::MAX);

        let page = ListPage::slice(vec![1, 2, 3], &query);
        assert!(page.is_empty());
        assert_eq!(page.total_count, 3);

        let beyond: ListPage<u8> = ListPage::new(vec![], 5, usize::MAX, 10);
        assert_eq!(beyond.page_links(), vec![Some(1)]);

        let far: ListPage<u8> = ListPage::new(vec![], 200, usize::MAX, 10);
        assert_eq!(far.page_links().last(), Some(&Some(20)));
    }

    #[test]
    fn page_links_collapse_distant_pages() {
        let page: ListPage<u8> = ListPage::new(vec![], 200, 10, 10);

        assert_eq!(
            page.page_links(),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn page_links_for_short_lists_have_no_gaps() {
        let page: ListPage<u8> = ListPage::new(vec![], 25, 1, 10);
        assert_eq!(page.page_links(), vec![Some(1), Some(2), Some(3)]);

        let empty: ListPage<u8> = ListPage::new(vec![], 0, 1, 10);
        assert!(empty.page_links().is_empty());
    }
}
