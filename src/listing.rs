// src/listing.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::filter::{self, FilterState};
use crate::item::Item;

/// How the item listing is laid out. Rendering only; never touches data.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::List => "List",
        }
    }
}

/// Owns the full record set together with the filter and view state, and
/// keeps the filtered sequence in sync with both inputs.
#[derive(Debug, Clone, Default)]
pub struct ItemListing {
    items: Vec<Item>,
    filter: FilterState,
    view: ViewMode,
    // Positions into `items`, recomputed on every items/filter change.
    visible: Vec<usize>,
    // Position into `visible`.
    selected: Option<usize>,
}

impl ItemListing {
    pub fn new(items: Vec<Item>, filter: FilterState, view: ViewMode) -> Self {
        let mut listing = Self {
            items,
            filter,
            view,
            visible: Vec::new(),
            selected: None,
        };
        listing.recompute();
        listing
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(FilterState::default());
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn toggle_view(&mut self) {
        self.set_view(self.view.toggle());
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.visible.iter().map(move |&idx| &self.items[idx])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.items.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected
            .and_then(|pos| self.visible.get(pos))
            .map(|&idx| &self.items[idx])
    }

    #[cfg(test)]
    pub fn select(&mut self, pos: Option<usize>) {
        self.selected = match pos {
            Some(p) if p < self.visible.len() => Some(p),
            Some(_) => self.visible.len().checked_sub(1),
            None => None,
        };
    }

    pub fn select_next(&mut self) {
        if self.visible.is_empty() {
            self.selected = None;
            return;
        }
        let i = match self.selected {
            Some(i) if i >= self.visible.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_previous(&mut self) {
        if self.visible.is_empty() {
            self.selected = None;
            return;
        }
        let i = match self.selected {
            Some(0) => self.visible.len() - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.selected = Some(i);
    }

    /// Moves the selection by `delta` positions, stopping at either end.
    /// Used for row jumps in the grid.
    pub fn select_offset(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let last = self.visible.len() as isize - 1;
        self.selected = Some((current + delta).clamp(0, last) as usize);
    }

    /// Distinct brands over the full record set in first-seen order, with
    /// counts. Brands differing only in case are grouped.
    pub fn brand_counts(&self) -> Vec<(String, usize)> {
        brand_counts(&self.items)
    }

    fn recompute(&mut self) {
        self.visible = filter::apply_indices(&self.items, &self.filter);
        self.selected = match self.selected {
            _ if self.visible.is_empty() => None,
            Some(pos) => Some(pos.min(self.visible.len() - 1)),
            None => Some(0),
        };
        debug!(
            "Listing recomputed: {} of {} items visible",
            self.visible.len(),
            self.items.len()
        );
    }
}

pub fn brand_counts(items: &[Item]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for item in items {
        let key = item.brand.trim().to_lowercase();
        match positions.get(&key) {
            Some(&pos) => order[pos].1 += 1,
            None => {
                positions.insert(key, order.len());
                order.push((item.brand.trim().to_string(), 1));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BrandSet, PriceRange};
    use crate::item::sample;

    fn listing() -> ItemListing {
        ItemListing::new(
            vec![
                sample("a", "Nike", 50.0),
                sample("b", "Zara", 150.0),
                sample("c", "nike", 75.0),
                sample("d", "Adidas", 20.0),
            ],
            FilterState::default(),
            ViewMode::default(),
        )
    }

    fn visible_ids(listing: &ItemListing) -> Vec<&str> {
        listing.visible_items().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn defaults_to_grid_with_everything_visible() {
        let listing = listing();
        assert_eq!(listing.view(), ViewMode::Grid);
        assert_eq!(visible_ids(&listing), ["a", "b", "c", "d"]);
        assert_eq!(listing.selected(), Some(0));
    }

    #[test]
    fn set_filter_recomputes() {
        let mut listing = listing();
        listing.set_filter(FilterState::new(BrandSet::new(["NIKE"]), PriceRange::UNBOUNDED));
        assert_eq!(visible_ids(&listing), ["a", "c"]);
        listing.set_filter(FilterState::new(
            BrandSet::default(),
            PriceRange::new(100.0, 200.0).unwrap(),
        ));
        assert_eq!(visible_ids(&listing), ["b"]);
        listing.clear_filter();
        assert_eq!(listing.visible_len(), 4);
    }

    #[test]
    fn set_items_recomputes_with_current_filter() {
        let mut listing = listing();
        listing.set_filter(FilterState::new(BrandSet::new(["Zara"]), PriceRange::UNBOUNDED));
        listing.set_items(vec![
            sample("x", "Zara", 10.0),
            sample("y", "H&M", 10.0),
            sample("z", "Zara", 30.0),
        ]);
        assert_eq!(visible_ids(&listing), ["x", "z"]);
    }

    #[test]
    fn toggling_view_leaves_data_alone() {
        let mut listing = listing();
        let filter = FilterState::new(BrandSet::new(["Nike"]), PriceRange::UNBOUNDED);
        listing.set_filter(filter.clone());
        listing.toggle_view();
        assert_eq!(listing.view(), ViewMode::List);
        assert_eq!(listing.filter(), &filter);
        assert_eq!(visible_ids(&listing), ["a", "c"]);
        listing.toggle_view();
        assert_eq!(listing.view(), ViewMode::Grid);
    }

    #[test]
    fn selection_is_clamped_after_narrowing() {
        let mut listing = listing();
        listing.select(Some(3));
        listing.set_filter(FilterState::new(BrandSet::new(["Nike"]), PriceRange::UNBOUNDED));
        assert_eq!(listing.selected(), Some(1));
        assert_eq!(listing.selected_item().map(|i| i.id.as_str()), Some("c"));

        listing.set_filter(FilterState::new(BrandSet::new(["Gucci"]), PriceRange::UNBOUNDED));
        assert_eq!(listing.selected(), None);
        assert!(listing.selected_item().is_none());
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut listing = listing();
        listing.select_previous();
        assert_eq!(listing.selected(), Some(3));
        listing.select_next();
        assert_eq!(listing.selected(), Some(0));
    }

    #[test]
    fn offset_stops_at_edges() {
        let mut listing = listing();
        listing.select_offset(3);
        assert_eq!(listing.selected(), Some(3));
        listing.select_offset(3);
        assert_eq!(listing.selected(), Some(3));
        listing.select_offset(-10);
        assert_eq!(listing.selected(), Some(0));
    }

    #[test]
    fn empty_listing_has_no_selection() {
        let mut listing = ItemListing::default();
        listing.select_next();
        listing.select_offset(2);
        assert_eq!(listing.selected(), None);
        assert_eq!(listing.visible_len(), 0);
    }

    #[test]
    fn brand_counts_group_case_insensitively() {
        let listing = listing();
        assert_eq!(
            listing.brand_counts(),
            vec![
                ("Nike".to_string(), 2),
                ("Zara".to_string(), 1),
                ("Adidas".to_string(), 1),
            ]
        );
    }
}
