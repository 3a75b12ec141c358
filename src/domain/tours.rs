use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::category::{CategoryStyle, TourCategory};

/// Rating shown when a tour has not been rated yet
pub const DEFAULT_DISPLAY_RATING: f64 = 5.0;

/// Tour difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "moderate" => Some(Self::Moderate),
            "challenging" => Some(Self::Challenging),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Challenging => "Challenging",
        }
    }
}

/// Unknown difficulty labels are read as "no difficulty" instead of failing
/// the whole tour.
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Difficulty::parse))
}

/// Tour entity
///
/// `price`, `duration` and `rating` are optional everywhere; use the
/// `*_or_*` accessors instead of unwrapping them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TourCategory,
    #[serde(default)]
    pub price: Option<Decimal>, // USD per person
    #[serde(default)]
    pub duration: Option<u32>, // days
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Upper bound on travellers. Distinct from `group_size`.
    #[serde(default)]
    pub max_group_size: Option<u32>,
    /// Free-text group size label (e.g. "2-12 people"). Distinct from `max_group_size`.
    #[serde(default)]
    pub group_size: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub best_season: Option<String>,
}

impl Tour {
    pub fn new(id: Uuid, name: impl Into<String>, category: TourCategory) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            price: None,
            duration: None,
            difficulty: None,
            rating: None,
            max_group_size: None,
            group_size: None,
            highlights: Vec::new(),
            image_url: None,
            best_season: None,
        }
    }

    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    pub fn duration_or_zero(&self) -> u32 {
        self.duration.unwrap_or(0)
    }

    /// Rating used for ordering; unrated tours sort as 0.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.filter(|r| r.is_finite()).unwrap_or(0.0)
    }

    /// Rating shown on cards; unrated tours display the default.
    pub fn rating_or_default(&self) -> f64 {
        self.rating
            .filter(|r| r.is_finite())
            .unwrap_or(DEFAULT_DISPLAY_RATING)
    }

    /// Relative link to the tour detail page
    pub fn link(&self) -> String {
        format!("/tours/{}", self.id)
    }
}

/// Tour as rendered on a listing card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourCard {
    #[serde(flatten)]
    pub tour: Tour,
    pub link: String,
    pub display_price: Decimal,
    pub display_rating: f64,
    pub style: CategoryStyle,
}

impl From<Tour> for TourCard {
    fn from(tour: Tour) -> Self {
        Self {
            link: tour.link(),
            display_price: tour.price_or_zero(),
            display_rating: tour.rating_or_default(),
            style: tour.category.style(),
            tour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_tour_deserializes_with_fallbacks() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000007",
            "name": "Paro Valley Day Hike",
            "category": "Adventure"
        }"#;
        let tour: Tour = serde_json::from_str(json).unwrap();

        assert_eq!(tour.price, None);
        assert_eq!(tour.price_or_zero(), Decimal::ZERO);
        assert_eq!(tour.duration_or_zero(), 0);
        assert_eq!(tour.rating_or_default(), DEFAULT_DISPLAY_RATING);
        assert_eq!(tour.rating_or_zero(), 0.0);
        assert!(tour.highlights.is_empty());
    }

    #[test]
    fn numeric_price_and_camel_case_fields_deserialize() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Thimphu Tshechu",
            "category": "Festival",
            "price": 2450,
            "duration": 6,
            "difficulty": "moderate",
            "maxGroupSize": 12,
            "groupSize": "2-12 people",
            "bestSeason": "Autumn"
        }"#;
        let tour: Tour = serde_json::from_str(json).unwrap();

        assert_eq!(tour.price_or_zero(), Decimal::from(2450));
        assert_eq!(tour.difficulty, Some(Difficulty::Moderate));
        assert_eq!(tour.max_group_size, Some(12));
        assert_eq!(tour.group_size.as_deref(), Some("2-12 people"));
    }

    #[test]
    fn unknown_difficulty_is_absent() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000002",
            "name": "Snowman Trek",
            "category": "Trekking",
            "difficulty": "Extreme"
        }"#;
        let tour: Tour = serde_json::from_str(json).unwrap();
        assert_eq!(tour.difficulty, None);
    }

    #[test]
    fn card_carries_link_and_display_fallbacks() {
        let id = Uuid::from_u128(9);
        let card = TourCard::from(Tour::new(id, "Punakha Dzong", TourCategory::Cultural));

        assert_eq!(card.link, format!("/tours/{}", id));
        assert_eq!(card.display_price, Decimal::ZERO);
        assert_eq!(card.display_rating, 5.0);
        assert_eq!(card.style.icon, "landmark");
    }
}
