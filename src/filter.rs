// src/filter.rs

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::item::Item;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Price range is inverted: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },
    #[error("Price bound must not be negative: {0}")]
    NegativeBound(f64),
    #[error("Price bound is not a number")]
    NotANumber,
    #[error("Invalid price '{input}': expected a number")]
    InvalidNumber { input: String },
}

/// A single filter dimension. A filter state is the conjunction of its
/// dimensions, so every implementation must be pure.
pub trait ItemFilter {
    fn matches(&self, item: &Item) -> bool;
}

fn normalize_brand(brand: &str) -> String {
    brand.trim().to_lowercase()
}

/// Brands to include. Empty means no brand restriction.
///
/// Matching is case-insensitive. Surrounding whitespace is trimmed from the
/// user's entries only; an item's brand is compared as recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandSet {
    names: Vec<String>,
    keys: HashSet<String>,
}

impl BrandSet {
    pub fn new<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for brand in brands {
            let name = brand.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if set.keys.insert(normalize_brand(name)) {
                set.names.push(name.to_string());
            }
        }
        set
    }

    /// Parses comma-separated user input, e.g. `"Nike, Adidas,"`.
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(','))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, brand: &str) -> bool {
        self.keys.contains(&brand.to_lowercase())
    }
}

impl ItemFilter for BrandSet {
    fn matches(&self, item: &Item) -> bool {
        self.is_empty() || self.contains(&item.brand)
    }
}

/// Inclusive price bounds with `0 <= min <= max`. `max` may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub const UNBOUNDED: PriceRange = PriceRange {
        min: 0.0,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Result<Self, FilterError> {
        for bound in [min, max] {
            if bound.is_nan() {
                return Err(FilterError::NotANumber);
            }
            if bound < 0.0 {
                return Err(FilterError::NegativeBound(bound));
            }
        }
        if min > max {
            return Err(FilterError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Builds a range from form input. A blank bound falls back to the
    /// unbounded default for that side.
    pub fn parse(min: &str, max: &str) -> Result<Self, FilterError> {
        let min = parse_bound(min)?.unwrap_or(Self::UNBOUNDED.min);
        let max = parse_bound(max)?.unwrap_or(Self::UNBOUNDED.max);
        Self::new(min, max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min == 0.0 && self.max.is_infinite()
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.max.is_infinite() {
            write!(f, "{}–∞", self.min)
        } else {
            write!(f, "{}–{}", self.min, self.max)
        }
    }
}

impl ItemFilter for PriceRange {
    fn matches(&self, item: &Item) -> bool {
        self.contains(item.price)
    }
}

fn parse_bound(input: &str) -> Result<Option<f64>, FilterError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FilterError::InvalidNumber {
            input: input.to_string(),
        })
}

/// The user's brand/price restriction. Replaced as a whole on every edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    brands: BrandSet,
    price: PriceRange,
}

impl FilterState {
    pub fn new(brands: BrandSet, price: PriceRange) -> Self {
        Self { brands, price }
    }

    /// Builds a filter state from the three text fields of the filter form.
    pub fn from_input(brands: &str, min: &str, max: &str) -> Result<Self, FilterError> {
        Ok(Self::new(BrandSet::parse(brands), PriceRange::parse(min, max)?))
    }

    pub fn brands(&self) -> &BrandSet {
        &self.brands
    }

    pub fn price(&self) -> PriceRange {
        self.price
    }

    #[cfg(test)]
    pub fn is_unrestricted(&self) -> bool {
        self.brands.is_empty() && self.price.is_unbounded()
    }

    /// `"Nike, Adidas"` or `"All brands"`.
    pub fn brand_summary(&self) -> String {
        if self.brands.is_empty() {
            "All brands".to_string()
        } else {
            self.brands.names().join(", ")
        }
    }
}

impl ItemFilter for FilterState {
    fn matches(&self, item: &Item) -> bool {
        self.brands.matches(item) && self.price.matches(item)
    }
}

/// Stable filter: the result is a subsequence of `items` in input order.
pub fn apply<'a, F: ItemFilter + ?Sized>(items: &'a [Item], filter: &F) -> Vec<&'a Item> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Same as [`apply`] but yields positions into `items`.
pub fn apply_indices<F: ItemFilter + ?Sized>(items: &[Item], filter: &F) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::sample;

    fn catalog() -> Vec<Item> {
        vec![
            sample("it-0", "Nike", 50.0),
            sample("it-1", "Zara", 150.0),
            sample("it-2", "Adidas", 100.0),
            sample("it-3", "Nike", 0.0),
            sample("it-4", "H&M", 999.0),
        ]
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn nike_under_hundred() {
        let items = vec![sample("a", "Nike", 50.0), sample("b", "Zara", 150.0)];
        let filter = FilterState::new(
            BrandSet::new(["Nike"]),
            PriceRange::new(0.0, 100.0).unwrap(),
        );
        assert_eq!(ids(&apply(&items, &filter)), vec!["a"]);
    }

    #[test]
    fn no_brands_keeps_everything_in_order() {
        let items = vec![sample("a", "Nike", 50.0), sample("b", "Zara", 150.0)];
        let filter = FilterState::new(BrandSet::default(), PriceRange::new(0.0, 1000.0).unwrap());
        assert_eq!(ids(&apply(&items, &filter)), vec!["a", "b"]);
    }

    #[test]
    fn result_is_a_subsequence() {
        let items = catalog();
        let filter = FilterState::from_input("nike, adidas", "0", "120").unwrap();
        let result = apply_indices(&items, &filter);
        assert_eq!(result, vec![0, 2, 3]);
        assert!(result.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_brand_set_depends_only_on_price() {
        let items = catalog();
        let price = PriceRange::new(50.0, 150.0).unwrap();
        let filter = FilterState::new(BrandSet::default(), price);
        assert_eq!(apply(&items, &filter), apply(&items, &price));
    }

    #[test]
    fn absent_brands_yield_nothing() {
        let items = catalog();
        let filter = FilterState::new(BrandSet::new(["Gucci", "Prada"]), PriceRange::UNBOUNDED);
        assert!(apply(&items, &filter).is_empty());
    }

    #[test]
    fn unbounded_price_depends_only_on_brands() {
        let items = catalog();
        let brands = BrandSet::new(["Nike", "H&M"]);
        let filter = FilterState::new(brands.clone(), PriceRange::UNBOUNDED);
        assert_eq!(apply(&items, &filter), apply(&items, &brands));
        assert_eq!(ids(&apply(&items, &filter)), vec!["it-0", "it-3", "it-4"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = catalog();
        let filter = FilterState::from_input("Nike,Zara", "", "200").unwrap();
        let once: Vec<Item> = apply(&items, &filter).into_iter().cloned().collect();
        let twice: Vec<Item> = apply(&once, &filter).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_item_set_is_not_an_error() {
        let filter = FilterState::from_input("Nike", "10", "20").unwrap();
        assert!(apply(&[], &filter).is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let items = catalog();
        let filter = FilterState::new(BrandSet::default(), PriceRange::new(0.0, 100.0).unwrap());
        assert_eq!(ids(&apply(&items, &filter)), vec!["it-0", "it-2", "it-3"]);
    }

    #[test]
    fn brand_matching_ignores_case_and_input_whitespace() {
        let brands = BrandSet::parse("  nIKe , ");
        assert_eq!(brands.names(), ["nIKe"]);
        assert!(brands.contains("Nike"));
        assert!(brands.contains("NIKE"));
        assert!(!brands.contains("Nikes"));
    }

    #[test]
    fn item_brand_is_compared_as_recorded() {
        let brands = BrandSet::parse("Nike");
        assert!(!brands.contains(" Nike"));
        let mut padded = sample("p", " Nike", 10.0);
        assert!(!brands.matches(&padded));
        padded.brand = "nike".to_string();
        assert!(brands.matches(&padded));
    }

    #[test]
    fn duplicate_brands_collapse() {
        let brands = BrandSet::parse("Nike, nike,Adidas");
        assert_eq!(brands.names(), ["Nike", "Adidas"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            PriceRange::new(100.0, 10.0),
            Err(FilterError::InvertedRange { min: 100.0, max: 10.0 })
        );
        assert!(FilterState::from_input("", "100", "10").is_err());
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        assert_eq!(PriceRange::new(-1.0, 10.0), Err(FilterError::NegativeBound(-1.0)));
        assert_eq!(PriceRange::new(f64::NAN, 10.0), Err(FilterError::NotANumber));
        assert_eq!(
            PriceRange::parse("ten", ""),
            Err(FilterError::InvalidNumber { input: "ten".to_string() })
        );
    }

    #[test]
    fn blank_bounds_fall_back_to_unbounded() {
        let range = PriceRange::parse(" ", "").unwrap();
        assert!(range.is_unbounded());
        let range = PriceRange::parse("", "80").unwrap();
        assert_eq!(range.min(), 0.0);
        assert_eq!(range.max(), 80.0);
    }

    #[test]
    fn default_state_is_unrestricted() {
        let filter = FilterState::default();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.brand_summary(), "All brands");
        assert_eq!(apply(&catalog(), &filter).len(), 5);
    }

    #[test]
    fn range_display() {
        assert_eq!(PriceRange::UNBOUNDED.to_string(), "0–∞");
        assert_eq!(PriceRange::new(5.0, 20.5).unwrap().to_string(), "5–20.5");
    }
}
