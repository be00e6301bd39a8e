//! Page slicing for ordered result sets.
//!
//! Pages are 1-indexed. A page parameter that is not an integer falls back to
//! the first page; an integer outside `1..=num_pages` is an [`PaginationError::EmptyPage`].

use std::num::IntErrorKind;

use serde::Serialize;
use thiserror::Error;

/// Default number of posts per list page.
pub const DEFAULT_PAGE_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page number is not an integer")]
    NotAnInteger,

    #[error("page {number} is out of range (1..={num_pages})")]
    EmptyPage { number: i64, num_pages: usize },
}

/// Raw page parameter, parsed but not yet range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(i64),
    NotAnInteger,
}

impl PageNumber {
    /// A missing parameter means page 1. Integers too large for `i64`
    /// saturate, so they still fail the range check instead of falling back.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return PageNumber::Number(1);
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => PageNumber::Number(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => PageNumber::Number(i64::MAX),
                IntErrorKind::NegOverflow => PageNumber::Number(i64::MIN),
                _ => PageNumber::NotAnInteger,
            },
        }
    }
}

/// One slice of a paginated sequence plus its presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 for an empty page.
    pub fn start_index(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn end_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start_index() + self.items.len() - 1
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// Total pages; an empty sequence still has one (empty) first page.
    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page).max(1)
    }

    pub fn validate_number(&self, number: PageNumber, count: usize) -> Result<usize, PaginationError> {
        let number = match number {
            PageNumber::Number(n) => n,
            PageNumber::NotAnInteger => return Err(PaginationError::NotAnInteger),
        };
        let num_pages = self.num_pages(count);
        if number < 1 || number as u64 > num_pages as u64 {
            return Err(PaginationError::EmptyPage { number, num_pages });
        }
        Ok(number as usize)
    }

    /// Slice `items` to the requested page, strictly.
    pub fn page<T>(&self, items: Vec<T>, number: PageNumber) -> Result<Page<T>, PaginationError> {
        let count = items.len();
        let number = self.validate_number(number, count)?;
        let start = (number - 1) * self.per_page;
        let items = items.into_iter().skip(start).take(self.per_page).collect();

        Ok(Page {
            items,
            number,
            num_pages: self.num_pages(count),
            count,
            per_page: self.per_page,
        })
    }

    /// List-view pagination: a non-integer page parameter delivers the first
    /// page, an out-of-range integer is left to surface as an error.
    pub fn paginate<T>(&self, items: Vec<T>, requested: Option<&str>) -> Result<Page<T>, PaginationError> {
        match PageNumber::parse(requested) {
            PageNumber::NotAnInteger => self.page(items, PageNumber::Number(1)),
            number => self.page(items, number),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Vec<u32> {
        (1..=10).collect()
    }

    #[test]
    fn test_pages_of_four() {
        let paginator = Paginator::new(4);

        let first = paginator.paginate(ten(), Some("1")).unwrap();
        assert_eq!(first.items, vec![1, 2, 3, 4]);
        assert_eq!(first.num_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginator.paginate(ten(), Some("3")).unwrap();
        assert_eq!(last.items, vec![9, 10]);
        assert!(!last.has_next());
        assert_eq!(last.previous_page_number(), Some(2));
        assert_eq!((last.start_index(), last.end_index()), (9, 10));
    }

    #[test]
    fn test_non_integer_falls_back_to_first_page() {
        let paginator = Paginator::new(4);
        for raw in ["abc", "", "2.0", "1e1"] {
            let page = paginator.paginate(ten(), Some(raw)).unwrap();
            assert_eq!(page.number, 1, "raw = {raw:?}");
            assert_eq!(page.items, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_missing_page_is_first_page() {
        let page = Paginator::new(4).paginate(ten(), None).unwrap();
        assert_eq!(page.number, 1);
    }

    #[test]
    fn test_whitespace_around_number_is_ignored() {
        let page = Paginator::new(4).paginate(ten(), Some(" 2 ")).unwrap();
        assert_eq!(page.items, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_out_of_range_integer_is_an_error() {
        let paginator = Paginator::new(4);
        assert_eq!(
            paginator.paginate(ten(), Some("4")).unwrap_err(),
            PaginationError::EmptyPage {
                number: 4,
                num_pages: 3
            }
        );
        assert!(paginator.paginate(ten(), Some("0")).is_err());
        assert!(paginator.paginate(ten(), Some("-1")).is_err());
    }

    #[test]
    fn test_integer_beyond_i64_is_out_of_range() {
        let paginator = Paginator::new(4);
        assert_eq!(
            paginator.paginate(ten(), Some("99999999999999999999")).unwrap_err(),
            PaginationError::EmptyPage {
                number: i64::MAX,
                num_pages: 3
            }
        );
        assert!(matches!(
            paginator.paginate(ten(), Some("-99999999999999999999")),
            Err(PaginationError::EmptyPage { .. })
        ));
    }

    #[test]
    fn test_empty_sequence_has_one_empty_page() {
        let page = Paginator::new(4).paginate(Vec::<u32>::new(), None).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.num_pages, 1);
        assert_eq!((page.start_index(), page.end_index()), (0, 0));
    }

    #[test]
    fn test_strict_page_rejects_non_integer() {
        let err = Paginator::new(4)
            .page(ten(), PageNumber::NotAnInteger)
            .unwrap_err();
        assert_eq!(err, PaginationError::NotAnInteger);
    }
}
