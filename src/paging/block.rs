use std::ops::RangeInclusive;

/// Number of page buttons shown at once.
pub const PAGE_BLOCK_SIZE: usize = 5;

/// The run of page numbers visible around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBlock {
    pub start: usize,
    pub end: usize,
    /// Last page of the previous block, if any.
    pub previous: Option<usize>,
    /// First page of the next block, if any.
    pub next: Option<usize>,
}

impl PageBlock {
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Computes the block containing `current_page`.
///
/// `block_start = floor((current_page - 1) / block_size) * block_size + 1`
/// and the block is cut off at `total_pages`.
pub fn page_block(current_page: usize, total_pages: usize, block_size: usize) -> PageBlock {
    let block_size = block_size.max(1);
    let total_pages = total_pages.max(1);
    let start = (current_page.saturating_sub(1) / block_size) * block_size + 1;
    let end = (start + block_size - 1).min(total_pages);
    let next_start = start + block_size;

    PageBlock {
        start,
        end,
        previous: (start > 1).then(|| start - 1),
        next: (next_start <= total_pages).then_some(next_start),
    }
}

#[cfg(test)]
mod tests {
    use super::{PAGE_BLOCK_SIZE, page_block};

    #[test]
    fn middle_block_has_both_neighbours() {
        let block = page_block(6, 12, PAGE_BLOCK_SIZE);
        assert_eq!(block.pages().collect::<Vec<_>>(), [6, 7, 8, 9, 10]);
        assert_eq!(block.previous, Some(5));
        assert_eq!(block.next, Some(11));
    }

    #[test]
    fn last_block_is_clamped_to_total() {
        let block = page_block(12, 12, PAGE_BLOCK_SIZE);
        assert_eq!(block.pages().collect::<Vec<_>>(), [11, 12]);
        assert_eq!(block.previous, Some(10));
        assert_eq!(block.next, None);
    }

    #[test]
    fn single_page_has_no_neighbours() {
        let block = page_block(1, 1, PAGE_BLOCK_SIZE);
        assert_eq!(block.pages().collect::<Vec<_>>(), [1]);
        assert_eq!(block.previous, None);
        assert_eq!(block.next, None);
    }

    #[test]
    fn block_boundaries_are_inclusive() {
        assert_eq!(page_block(5, 12, PAGE_BLOCK_SIZE).start, 1);
        assert_eq!(page_block(10, 12, PAGE_BLOCK_SIZE).start, 6);
        assert_eq!(page_block(10, 10, PAGE_BLOCK_SIZE).next, None);
    }
}
