//! Recipient paging — splits the roster into fixed-size pages.
//!
//! Pages are the unit of concurrent delivery: everything in one page is sent
//! together, and the dispatcher pauses between pages to stay under the
//! messaging API's request-rate ceiling.

/// Partition `items` into order-preserving pages of `page_size` elements.
/// The last page is short when the length doesn't divide evenly; empty input
/// yields no pages. `page_size` must be non-zero.
pub fn paginate<T>(items: &[T], page_size: usize) -> Vec<&[T]> {
    debug_assert!(page_size > 0, "page_size must be non-zero");
    if items.is_empty() {
        return Vec::new();
    }
    items.chunks(page_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uneven_split() {
        let items: Vec<u32> = (1..=25).collect();
        let pages = paginate(&items, 10);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[1].len(), 10);
        assert_eq!(pages[2].len(), 5);
    }

    #[test]
    fn test_order_preserved() {
        let items: Vec<u32> = (1..=25).collect();
        let pages = paginate(&items, 10);
        let flattened: Vec<u32> = pages.iter().flat_map(|p| p.iter().copied()).collect();
        assert_eq!(flattened, items);
    }

    #[test]
    fn test_empty_input_yields_no_pages() {
        let items: Vec<u32> = vec![];
        assert!(paginate(&items, 10).is_empty());
    }

    #[test]
    fn test_exact_division() {
        let items: Vec<u32> = (1..=20).collect();
        let pages = paginate(&items, 10);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 10);
    }

    #[test]
    fn test_single_short_page() {
        let items = ["c1", "c2"];
        let pages = paginate(&items, 10);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], &["c1", "c2"]);
    }
}
