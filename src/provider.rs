// src/provider.rs

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{Config, DataSource};
use crate::errors::DashError;
use crate::item::Item;
#[cfg(feature = "mock_data")]
use crate::item::Condition;

/// Source of item records. Where the records come from (network, fixture,
/// placeholder data) is the provider's business; the dashboard only sees
/// the returned sequence.
pub trait ItemProvider {
    fn name(&self) -> &str;
    fn fetch_items(&self) -> Result<Vec<Item>, DashError>;
}

/// Builds the provider selected by `data.source`, with an optional fixture
/// path override from the command line.
pub fn from_config(
    config: &Config,
    fixture_override: Option<&Path>,
) -> Result<Box<dyn ItemProvider>, DashError> {
    if let Some(path) = fixture_override {
        return Ok(Box::new(FixtureProvider::new(path)));
    }
    match config.data.source {
        DataSource::Fixture => {
            let path = config.data.fixture_path.as_deref().ok_or_else(|| {
                DashError::ComponentInitError {
                    component: "ItemProvider".to_string(),
                    message: "data.source is 'fixture' but data.fixture_path is not set".to_string(),
                }
            })?;
            let expanded = shellexpand::tilde(path);
            Ok(Box::new(FixtureProvider::new(Path::new(expanded.as_ref()))))
        }
        #[cfg(feature = "mock_data")]
        DataSource::Mock => Ok(Box::new(MockProvider::new(config.data.mock_count))),
        #[cfg(not(feature = "mock_data"))]
        DataSource::Mock => Err(DashError::ComponentInitError {
            component: "ItemProvider".to_string(),
            message: "mock data source requires the 'mock_data' feature".to_string(),
        }),
    }
}

/// Reads a JSON or YAML array of items from disk.
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ItemProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    fn fetch_items(&self) -> Result<Vec<Item>, DashError> {
        info!("Loading items from fixture {}", self.path.display());
        let raw = fs::read_to_string(&self.path)?;
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let items: Vec<Item> = match extension.as_deref() {
            Some("json") => serde_json::from_str(&raw)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
            _ => return Err(DashError::UnsupportedFixture(self.path.clone())),
        };
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .map(|item| {
                if !seen.insert(item.id.clone()) {
                    return Err(DashError::DuplicateItem { id: item.id });
                }
                sanitize(item)
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Fixture yielded {} items", items.len());
        Ok(items)
    }
}

/// Rejects records the filter cannot reason about and strips terminal
/// escape sequences from display text.
fn sanitize(mut item: Item) -> Result<Item, DashError> {
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(DashError::InvalidItem {
            id: item.id,
            reason: format!("price must be a finite non-negative number, got {}", item.price),
        });
    }
    for field in [
        &mut item.title,
        &mut item.brand,
        &mut item.location,
        &mut item.time,
    ] {
        let clean = strip_ansi_escapes::strip_str(field.as_str());
        if clean != *field {
            warn!("Stripped escape sequences from item '{}'", item.id);
            *field = clean;
        }
    }
    for tag in item.tags.iter_mut() {
        *tag = strip_ansi_escapes::strip_str(tag.as_str());
    }
    Ok(item)
}

#[cfg(feature = "mock_data")]
const MOCK_TITLES: [&str; 4] = ["Air Force 1", "Ultraboost Light", "Overshirt", "Slim Chinos"];
#[cfg(feature = "mock_data")]
const MOCK_BRANDS: [&str; 4] = ["Nike", "Adidas", "Zara", "H&M"];
#[cfg(feature = "mock_data")]
const MOCK_LOCATIONS: [&str; 4] = ["Paris", "Berlin", "Warsaw", "Madrid"];
#[cfg(feature = "mock_data")]
const MOCK_TAGS: [&str; 3] = ["summer", "sale", "popular"];

/// Placeholder catalog. Values are derived from the item index so the same
/// count always produces the same items.
#[cfg(feature = "mock_data")]
pub struct MockProvider {
    count: usize,
}

#[cfg(feature = "mock_data")]
impl MockProvider {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    fn item(i: usize) -> Item {
        Item {
            id: format!("it-{}", i),
            title: format!("{} {}", MOCK_TITLES[i % 4], i + 1),
            brand: MOCK_BRANDS[i % 4].to_string(),
            // Spread over 20..=200 without repeating in short runs.
            price: (20 + (i * 37) % 181) as f64,
            image: "/placeholder.svg".to_string(),
            condition: Condition::VeryGood,
            location: MOCK_LOCATIONS[i % 4].to_string(),
            seller: 3.0 + ((i * 7) % 3) as f32,
            time: format!("{}m ago", (i * 13) % 60),
            url: "https://www.vinted.de/".to_string(),
            tags: MOCK_TAGS[..(i % 3) + 1]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

#[cfg(feature = "mock_data")]
impl ItemProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_items(&self) -> Result<Vec<Item>, DashError> {
        Ok((0..self.count).map(Self::item).collect())
    }
}

/// In-memory provider for tests.
#[cfg(test)]
pub(crate) struct StaticProvider(pub Vec<Item>);

#[cfg(test)]
impl ItemProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_items(&self) -> Result<Vec<Item>, DashError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Condition;
    use std::io::Write;

    fn fixture(ext: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(ext)
            .tempfile()
            .unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_json_fixture_in_order() {
        let file = fixture(
            ".json",
            r#"[
                {"id":"a","title":"Air Force 1","brand":"Nike","price":50,"condition":"very_good","tags":["sale"]},
                {"id":"b","title":"Overshirt","brand":"Zara","price":150,"condition":"good"}
            ]"#,
        );
        let items = FixtureProvider::new(file.path()).fetch_items().unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(items[0].tags, ["sale"]);
    }

    #[test]
    fn loads_yaml_fixture() {
        let file = fixture(
            ".yaml",
            "- id: a\n  title: Slim Chinos\n  brand: H&M\n  price: 19.5\n  condition: satisfactory\n",
        );
        let items = FixtureProvider::new(file.path()).fetch_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].condition, Condition::Satisfactory);
    }

    #[test]
    fn rejects_negative_price() {
        let file = fixture(
            ".json",
            r#"[{"id":"bad","title":"x","brand":"Nike","price":-3,"condition":"good"}]"#,
        );
        let err = FixtureProvider::new(file.path()).fetch_items().unwrap_err();
        assert!(matches!(err, DashError::InvalidItem { ref id, .. } if id == "bad"));
    }

    #[test]
    fn rejects_infinite_price() {
        let file = fixture(
            ".yaml",
            "- id: a\n  title: x\n  brand: Nike\n  price: .inf\n  condition: good\n",
        );
        let err = FixtureProvider::new(file.path()).fetch_items().unwrap_err();
        assert!(matches!(err, DashError::InvalidItem { ref id, .. } if id == "a"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let file = fixture(
            ".yaml",
            "- id: a\n  title: x\n  brand: Nike\n  price: 5\n  condition: good\n\
             - id: a\n  title: y\n  brand: Zara\n  price: 7\n  condition: good\n",
        );
        let err = FixtureProvider::new(file.path()).fetch_items().unwrap_err();
        assert!(matches!(err, DashError::DuplicateItem { ref id } if id == "a"));
    }

    #[test]
    fn strips_escape_sequences() {
        let file = fixture(
            ".json",
            r#"[{"id":"a","title":"\u001b[31mRed\u001b[0m","brand":"Nike","price":1,"condition":"good"}]"#,
        );
        let items = FixtureProvider::new(file.path()).fetch_items().unwrap();
        assert_eq!(items[0].title, "Red");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = fixture(".csv", "id,title\n");
        let err = FixtureProvider::new(file.path()).fetch_items().unwrap_err();
        assert!(matches!(err, DashError::UnsupportedFixture(_)));
    }

    #[test]
    fn fixture_source_without_path_fails() {
        let mut config = Config::default();
        config.data.source = DataSource::Fixture;
        config.data.fixture_path = None;
        assert!(from_config(&config, None).is_err());
    }

    #[test]
    fn cli_fixture_overrides_configured_source() {
        let file = fixture(".json", "[]");
        let provider = from_config(&Config::default(), Some(file.path())).unwrap();
        assert_eq!(provider.name(), "fixture");
        assert!(provider.fetch_items().unwrap().is_empty());
    }

    #[cfg(feature = "mock_data")]
    #[test]
    fn mock_catalog_is_deterministic() {
        let provider = MockProvider::new(24);
        let first = provider.fetch_items().unwrap();
        let second = provider.fetch_items().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 24);
        assert_eq!(first[0].title, "Air Force 1 1");
        assert_eq!(first[5].brand, "Adidas");
        assert_eq!(first[2].tags, ["summer", "sale", "popular"]);
        assert!(first.iter().all(|i| (20.0..=200.0).contains(&i.price)));
    }
}
