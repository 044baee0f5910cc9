// Pagination and filtering over the repository list.
// Rendering is a pure function of the item list and the view state.

use std::ops::Range;

use crate::error::{FolioError, Result};
use crate::github::Item;

/// Page size used until the user picks another one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page, page size, and active name filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// 1-based page number.
    pub current_page: usize,
    /// Items per page, always at least 1.
    pub page_size: usize,
    /// Name filter; empty means unfiltered.
    pub filter: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            filter: String::new(),
        }
    }

    /// Parse and apply a page size typed by the user.
    ///
    /// Rejects non-numeric and zero values, leaving the current size in place.
    /// On success the view returns to page 1; the filter is kept.
    pub fn set_page_size(&mut self, value: &str) -> Result<usize> {
        let size = value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| FolioError::InvalidPageSize(value.to_string()))?;

        self.page_size = size;
        self.current_page = 1;
        Ok(size)
    }

    /// Replace the name filter and return to page 1.
    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = query.into();
        self.current_page = 1;
    }

    /// Activate a page control. The filter is kept.
    pub fn select_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }
}

/// Display data for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub description: String,
    pub language: String,
}

impl Card {
    fn from_item(item: &Item) -> Self {
        Self {
            name: sanitize(&item.name),
            description: sanitize(item.description_or_default()),
            language: sanitize(item.language_or_default()),
        }
    }
}

/// One pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub number: usize,
    /// Highlighted as the page being shown.
    pub current: bool,
}

/// Result of rendering one page of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub cards: Vec<Card>,
    pub controls: Vec<PageControl>,
    /// Length of the list the page was cut from.
    pub total: usize,
}

impl RenderedPage {
    pub fn total_pages(&self) -> usize {
        self.controls.len()
    }
}

/// Render the current page of `items`.
///
/// An empty list renders nothing, pagination included.
pub fn render(items: &[Item], view: &ViewState) -> RenderedPage {
    if items.is_empty() {
        tracing::warn!("No repositories found for the user.");
        return RenderedPage::default();
    }

    let cards = items[page_bounds(items.len(), view)]
        .iter()
        .map(Card::from_item)
        .collect();

    RenderedPage {
        cards,
        controls: pagination(items.len(), view),
        total: items.len(),
    }
}

/// Render the view: filter the full list by the active query, then paginate.
pub fn render_view(items: &[Item], view: &ViewState) -> RenderedPage {
    if view.is_filtered() {
        render(&filter_by_name(&view.filter, items), view)
    } else {
        render(items, view)
    }
}

/// Index range of the current page, clipped to `len`.
pub fn page_bounds(len: usize, view: &ViewState) -> Range<usize> {
    let start = view
        .current_page
        .saturating_sub(1)
        .saturating_mul(view.page_size)
        .min(len);
    let end = start.saturating_add(view.page_size).min(len);
    start..end
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// One control per page, with the current page flagged.
pub fn pagination(total: usize, view: &ViewState) -> Vec<PageControl> {
    (1..=total_pages(total, view.page_size))
        .map(|number| PageControl {
            number,
            current: number == view.current_page,
        })
        .collect()
}

/// Items whose name contains `query`, ignoring case, in their original order.
pub fn filter_by_name(query: &str, items: &[Item]) -> Vec<Item> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Make remote text safe to draw: drops terminal escape sequences and
/// control characters, folding line breaks and tabs into spaces.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => {
                // CSI: ESC [ params... final byte in @..~
                if chars.next_if_eq(&'[').is_some() {
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
            }
            '\n' | '\r' | '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}
