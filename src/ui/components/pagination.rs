//! Block-style page navigator: `« 6 7 [8] 9 10 »`.

use crate::paging::PageBlock;
use crate::ui::theme;
use ratatui::text::{Line, Span};

/// Builds the navigator line for `block` with `current` highlighted.
///
/// The arrows are dimmed when there is no block in that direction.
pub fn line(block: &PageBlock, current: usize, total: usize) -> Line<'static> {
    let arrow_style = |enabled: bool| if enabled { theme::info() } else { theme::dim() };

    let mut spans = vec![Span::styled("«", arrow_style(block.previous.is_some()))];
    for page in block.pages() {
        if page == current {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("[{page}]"), theme::page_current()));
        } else {
            spans.push(Span::styled(format!(" {page}"), theme::text()));
        }
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled("»", arrow_style(block.next.is_some())));
    spans.push(Span::styled(format!("   page {current}/{total}"), theme::dim()));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::line;
    use crate::paging::page_block;

    fn plain(current: usize, total: usize) -> String {
        let block = page_block(current, total, 5);
        line(&block, current, total)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn highlights_current_page_inside_its_block() {
        assert_eq!(plain(8, 12), "« 6 7 [8] 9 10 »   page 8/12");
    }

    #[test]
    fn single_page_still_renders() {
        assert_eq!(plain(1, 1), "« [1] »   page 1/1");
    }
}
