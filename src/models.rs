use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A record type served by one of the remote collections.
///
/// Ties the Rust type to its collection path, the shape of its list
/// response, and the checks a decoded value must pass before it is shown.
pub trait Record: DeserializeOwned + Clone + Send + 'static {
    /// Collection path segment, e.g. `products` in `GET /products/{id}`
    const COLLECTION: &'static str;

    /// Shape of the list response body
    type Envelope: DeserializeOwned;

    fn id(&self) -> u64;

    /// Rejects values that decoded but are unusable
    fn validate(&self) -> Result<(), String>;

    fn into_listing(envelope: Self::Envelope) -> Listing<Self>;
}

/// One page of records as returned by the source, order preserved
#[derive(Clone, Debug, PartialEq)]
pub struct Listing<R> {
    pub items: Vec<R>,
    /// Total records on the server, when the source reports it
    pub total: Option<u64>,
}

// ============================================================================
// Characters
// ============================================================================

/// Life status of a character
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

impl CharacterStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CharacterStatus::Alive => "Alive",
            CharacterStatus::Dead => "Dead",
            CharacterStatus::Unknown => "unknown",
        }
    }
}

/// Named reference to a location resource (not resolved locally)
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LocationRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A character from the Rick and Morty API
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    /// Sub-type; the API sends an empty string when there is none
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    pub created: DateTime<Utc>,
    pub origin: LocationRef,
    pub location: LocationRef,
}

impl Character {
    pub fn kind_label(&self) -> Option<&str> {
        let kind = self.kind.trim();
        if kind.is_empty() {
            None
        } else {
            Some(kind)
        }
    }

    pub fn episode_count(&self) -> usize {
        self.episode.len()
    }
}

/// Paging metadata of the character list endpoint
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PageInfo {
    pub count: u64,
    pub pages: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Envelope of `GET /character`
#[derive(Clone, Debug, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

impl Record for Character {
    const COLLECTION: &'static str = "character";
    type Envelope = CharacterPage;

    fn id(&self) -> u64 {
        self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.id == 0 {
            return Err("character id must be positive".to_string());
        }
        if self.name.trim().is_empty() {
            return Err(format!("character {} has no name", self.id));
        }
        if self.image.trim().is_empty() {
            return Err(format!("character {} has no image", self.id));
        }
        Ok(())
    }

    fn into_listing(envelope: CharacterPage) -> Listing<Self> {
        Listing {
            items: envelope.results,
            total: Some(envelope.info.count),
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// Average score and number of votes
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// A product from the Fake Store API
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub image: String,
    pub rating: Rating,
}

impl Product {
    /// Price as displayed, e.g. `$109.95`
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    type Envelope = Vec<Product>;

    fn id(&self) -> u64 {
        self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.id == 0 {
            return Err("product id must be positive".to_string());
        }
        if self.title.trim().is_empty() {
            return Err(format!("product {} has no title", self.id));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("product {} has invalid price {}", self.id, self.price));
        }
        if !self.rating.rate.is_finite() || !(0.0..=5.0).contains(&self.rating.rate) {
            return Err(format!(
                "product {} has rating {} outside 0..=5",
                self.id, self.rating.rate
            ));
        }
        Ok(())
    }

    fn into_listing(envelope: Vec<Product>) -> Listing<Self> {
        Listing {
            items: envelope,
            total: None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_character_status_wire_values() {
        let alive: Character = serde_json::from_value(character_json(1, "Rick", "Alive")).unwrap();
        let dead: Character = serde_json::from_value(character_json(2, "Bird", "Dead")).unwrap();
        let unknown: Character =
            serde_json::from_value(character_json(3, "Abradolf", "unknown")).unwrap();
        let odd: Character = serde_json::from_value(character_json(4, "Odd", "Frozen")).unwrap();

        assert_eq!(alive.status, CharacterStatus::Alive);
        assert_eq!(dead.status, CharacterStatus::Dead);
        assert_eq!(unknown.status, CharacterStatus::Unknown);
        assert_eq!(odd.status, CharacterStatus::Unknown);
    }

    #[test]
    fn test_character_optional_subtype() {
        let mut value = character_json(1, "Rick", "Alive");
        let plain: Character = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(plain.kind_label(), None);

        value["type"] = "Parasite".into();
        let typed: Character = serde_json::from_value(value).unwrap();
        assert_eq!(typed.kind_label(), Some("Parasite"));
        assert_eq!(typed.episode_count(), 2);
    }

    #[test]
    fn test_character_missing_field_fails() {
        let mut value = character_json(1, "Rick", "Alive");
        value.as_object_mut().unwrap().remove("origin");
        assert!(serde_json::from_value::<Character>(value).is_err());
    }

    #[test]
    fn test_character_validation() {
        assert!(character(1, "Rick").validate().is_ok());
        assert!(character(0, "Rick").validate().is_err());
        assert!(character(1, "  ").validate().is_err());
    }

    #[test]
    fn test_character_page_listing_keeps_order_and_total() {
        let page: CharacterPage = serde_json::from_value(serde_json::json!({
            "info": { "count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null },
            "results": [character_json(2, "Morty", "Alive"), character_json(1, "Rick", "Alive")]
        }))
        .unwrap();

        let listing = Character::into_listing(page);
        assert_eq!(listing.total, Some(826));
        let ids: Vec<u64> = listing.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_product_validation() {
        assert!(product(1, "Backpack", 109.95).validate().is_ok());
        assert!(product(1, "Backpack", -1.0).validate().is_err());
        assert!(product(1, "", 10.0).validate().is_err());

        let mut rated = product(1, "Backpack", 10.0);
        rated.rating.rate = 7.5;
        assert!(rated.validate().is_err());
    }

    #[test]
    fn test_product_price_label() {
        assert_eq!(product(1, "Backpack", 109.95).price_label(), "$109.95");
        assert_eq!(product(2, "Shirt", 22.3).price_label(), "$22.30");
    }
}
