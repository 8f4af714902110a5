//! crates/campus_console_core/src/pagination.rs
//!
//! Pure computation of the numbered-pagination strip: which page buttons to
//! show for a given current page, and where the collapsed ranges go.

/// One slot in the rendered pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    /// A clickable page button, 1-based.
    Page(u32),
    /// A collapsed range, rendered as an ellipsis.
    Gap,
}

/// Computes the pagination strip for `current_page` out of `total_pages`,
/// keeping `sibling_count` neighbors visible on each side of the current page.
///
/// The strip always starts at page 1 and ends at `total_pages`, with at most
/// one gap on each side. When every page fits in the window (first + last +
/// current + siblings + the two gap slots) the dense sequence is returned
/// instead.
///
/// `current_page` must lie in `1..=total_pages`; out-of-range values are a
/// caller bug and are not clamped here. Suppressing the strip entirely for
/// `total_pages <= 1` is likewise the caller's concern.
pub fn plan(current_page: u32, total_pages: u32, sibling_count: u32) -> Vec<PageEntry> {
    let window = 2 * sibling_count + 5;
    if total_pages <= window {
        return (1..=total_pages).map(PageEntry::Page).collect();
    }

    let left_sibling = current_page.saturating_sub(sibling_count).max(1);
    let right_sibling = (current_page + sibling_count).min(total_pages);

    let left_gap = left_sibling > 2;
    let right_gap = right_sibling < total_pages - 1;

    match (left_gap, right_gap) {
        // Unreachable once total_pages > window, kept as the tie-break arm.
        (false, false) => (1..=total_pages).map(PageEntry::Page).collect(),
        (false, true) => {
            let mut strip: Vec<PageEntry> =
                (1..=right_sibling + 1).map(PageEntry::Page).collect();
            strip.push(PageEntry::Gap);
            strip.push(PageEntry::Page(total_pages));
            strip
        }
        (true, false) => {
            let mut strip = vec![PageEntry::Page(1), PageEntry::Gap];
            strip.extend((left_sibling - 1..=total_pages).map(PageEntry::Page));
            strip
        }
        (true, true) => {
            let mut strip = vec![PageEntry::Page(1), PageEntry::Gap];
            strip.extend((left_sibling..=right_sibling).map(PageEntry::Page));
            strip.push(PageEntry::Gap);
            strip.push(PageEntry::Page(total_pages));
            strip
        }
    }
}
