//! Page-number pagination.
//!
//! A [`Paginator`] turns a total item count and a [`PageRequest`] into a
//! [`PageMeta`] describing the window to fetch. Out-of-range page numbers
//! resolve to the last page; non-numeric or non-positive ones are rejected.

use crate::error::DomainError;

/// Default number of posts per public listing page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Literal accepted in place of a page number to select the last page.
pub const LAST_PAGE: &str = "last";

/// Pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    pub fn with_page_size(page_size: u64) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }
}

/// A requested page, as parsed from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(u64),
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl PageRequest {
    /// Parse a raw `page` parameter. Absent or blank means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };

        if raw == LAST_PAGE {
            return Ok(Self::Last);
        }

        let number: i64 = match raw.parse() {
            Ok(number) => number,
            // Too large to represent, but still past the last page.
            Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) => {
                return Ok(Self::Number(u64::MAX));
            }
            Err(_) => {
                return Err(DomainError::Validation(
                    "That page number is not an integer".to_string(),
                ));
            }
        };

        if number < 1 {
            return Err(DomainError::Validation(
                "That page number is less than 1".to_string(),
            ));
        }

        Ok(Self::Number(number as u64))
    }
}

/// Offset/limit pair handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Navigation metadata for one page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    /// Current page (1-based, always within `1..=total_pages`).
    pub number: u64,
    pub page_size: u64,
    pub total_items: u64,
    /// At least 1, even for an empty result set.
    pub total_pages: u64,
}

impl PageMeta {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn window(&self) -> Window {
        Window {
            offset: (self.number - 1) * self.page_size,
            limit: self.page_size,
        }
    }

    /// 1-based index of the first item on this page (0 when empty).
    pub fn start_index(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            self.window().offset + 1
        }
    }

    /// 1-based index of the last item on this page (0 when empty).
    pub fn end_index(&self) -> u64 {
        (self.window().offset + self.page_size).min(self.total_items)
    }
}

/// A page of items together with its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Fixed-size page calculator.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    config: PaginationConfig,
}

impl Paginator {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config: PaginationConfig::with_page_size(config.page_size),
        }
    }

    pub fn page_size(&self) -> u64 {
        self.config.page_size
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.config.page_size).max(1)
    }

    /// Resolve a request against a result set of `total_items`.
    pub fn locate(&self, total_items: u64, request: PageRequest) -> PageMeta {
        let total_pages = self.total_pages(total_items);
        let number = match request {
            PageRequest::Number(n) => n.clamp(1, total_pages),
            PageRequest::Last => total_pages,
        };

        PageMeta {
            number,
            page_size: self.config.page_size,
            total_items,
            total_pages,
        }
    }

    /// Slice an already ordered, fully materialised sequence.
    pub fn paginate<T>(&self, items: Vec<T>, request: PageRequest) -> Page<T> {
        let meta = self.locate(items.len() as u64, request);
        let window = meta.window();
        let items = items
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect();

        Page { items, meta }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers(n: u64) -> Vec<u64> {
        (1..=n).collect()
    }

    #[test]
    fn test_twenty_five_items_in_pages_of_ten() {
        let paginator = Paginator::default();

        let first = paginator.paginate(numbers(25), PageRequest::Number(1));
        assert_eq!(first.items.len(), 10);
        assert!(!first.meta.has_previous());
        assert!(first.meta.has_next());

        let second = paginator.paginate(numbers(25), PageRequest::Number(2));
        assert_eq!(second.items, (11..=20).collect::<Vec<_>>());

        let third = paginator.paginate(numbers(25), PageRequest::Number(3));
        assert_eq!(third.items.len(), 5);
        assert!(third.meta.has_previous());
        assert!(!third.meta.has_next());
        assert_eq!(third.meta.total_pages, 3);
        assert_eq!(third.meta.total_items, 25);
    }

    #[test]
    fn test_out_of_range_resolves_to_last_page() {
        let page = Paginator::default().paginate(numbers(25), PageRequest::Number(99));
        assert_eq!(page.meta.number, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_empty_result_is_single_empty_page() {
        let page = Paginator::default().paginate(Vec::<u64>::new(), PageRequest::Number(4));
        assert_eq!(page.meta.number, 1);
        assert_eq!(page.meta.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.meta.has_next());
        assert!(!page.meta.has_previous());
        assert_eq!(page.meta.start_index(), 0);
        assert_eq!(page.meta.end_index(), 0);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        let paginator = Paginator::default();
        assert_eq!(paginator.total_pages(20), 2);

        let last = paginator.paginate(numbers(20), PageRequest::Last);
        assert_eq!(last.meta.number, 2);
        assert_eq!(last.items.len(), 10);
        assert!(!last.meta.has_next());
    }

    #[test]
    fn test_indices_and_neighbours() {
        let meta = Paginator::default().locate(25, PageRequest::Number(3));
        assert_eq!(meta.start_index(), 21);
        assert_eq!(meta.end_index(), 25);
        assert_eq!(meta.previous_page_number(), Some(2));
        assert_eq!(meta.next_page_number(), None);
        assert_eq!(meta.window(), Window { offset: 20, limit: 10 });
    }

    #[test]
    fn test_huge_page_number_resolves_to_last_page() {
        let request = PageRequest::parse(Some("99999999999999999999")).unwrap();
        let page = Paginator::default().paginate(numbers(25), request);
        assert_eq!(page.meta.number, 3);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let paginator = Paginator::new(PaginationConfig { page_size: 0 });
        assert_eq!(paginator.page_size(), 1);
    }

    #[rstest]
    #[case(None, PageRequest::Number(1))]
    #[case(Some(""), PageRequest::Number(1))]
    #[case(Some("2"), PageRequest::Number(2))]
    #[case(Some(" 7 "), PageRequest::Number(7))]
    #[case(Some("last"), PageRequest::Last)]
    #[case(Some("99999999999999999999"), PageRequest::Number(u64::MAX))]
    fn test_parse_valid_page(#[case] raw: Option<&str>, #[case] expected: PageRequest) {
        assert_eq!(PageRequest::parse(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    #[case("1.5")]
    #[case("-99999999999999999999")]
    fn test_parse_rejects_invalid_page(#[case] raw: &str) {
        let err = PageRequest::parse(Some(raw)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
