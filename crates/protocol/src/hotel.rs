//! Hotels, rooms, and the search filters applied to them.
//!
//! The catalog itself lives in [`crate::catalog`]; this module defines the
//! types and the pure filtering, sorting and suggestion logic used by the
//! hotel list and the destination field.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Lowest selectable value of the max-price filter.
pub const MIN_PRICE_FILTER: u32 = 100;

/// Highest (and default) value of the max-price filter.
pub const MAX_PRICE_FILTER: u32 = 10_000;

/// Step of the max-price filter.
pub const PRICE_FILTER_STEP: u32 = 50;

/// Selectable minimum-rating steps, `0.0` meaning "any".
pub const RATING_STEPS: [f32; 4] = [0.0, 4.5, 4.7, 4.9];

/// Selectable guest counts.
pub const GUEST_OPTIONS: [u8; 8] = [1, 2, 3, 4, 5, 6, 8, 10];

/// Default number of guests in the search and booking forms.
pub const DEFAULT_GUESTS: u8 = 2;

/// Maximum number of destination suggestions.
pub const MAX_SUGGESTIONS: usize = 6;

/// A bookable room type within a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier, unique within the hotel.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Price per night in dollars.
    pub price: u32,
    /// Maximum number of guests.
    pub capacity: u8,
}

/// A hotel in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Catalog identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Location label, also used by the location filter.
    pub location: String,
    /// Marketing description.
    pub description: String,
    /// Lowest nightly price across rooms.
    pub price_from: u32,
    /// Average guest rating (0-5).
    pub rating: f32,
    /// Number of reviews.
    pub review_count: u32,
    /// Amenity labels.
    pub amenities: Vec<String>,
    /// Room types.
    pub rooms: Vec<Room>,
}

impl Hotel {
    /// Looks up a room by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::RoomNotFound`] if the hotel has no such room.
    pub fn room(&self, room_id: u32) -> Result<&Room> {
        self.rooms
            .iter()
            .find(|r| r.id == room_id)
            .ok_or(ProtocolError::RoomNotFound {
                hotel: self.id,
                room: room_id,
            })
    }

    /// Returns `true` if the name or location contains `query`, ignoring case.
    ///
    /// An empty query matches every hotel.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.location.to_lowercase().contains(&needle)
    }

    /// Star glyphs for the rounded rating, e.g. `★★★★★`.
    #[must_use]
    pub fn stars(&self) -> String {
        "★".repeat(self.rating.round().clamp(0.0, 5.0) as usize)
    }
}

/// Sort order of the hotel list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Highest rating first.
    #[default]
    Rating,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most reviewed first.
    Reviews,
}

impl SortOrder {
    /// All orders, in cycling order.
    pub const ALL: [Self; 4] = [Self::Rating, Self::PriceAsc, Self::PriceDesc, Self::Reviews];

    /// The next order in the cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Rating => Self::PriceAsc,
            Self::PriceAsc => Self::PriceDesc,
            Self::PriceDesc => Self::Reviews,
            Self::Reviews => Self::Rating,
        }
    }

    /// Translation key of the order's label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Rating => "sort_rating",
            Self::PriceAsc => "sort_price_asc",
            Self::PriceDesc => "sort_price_desc",
            Self::Reviews => "sort_reviews",
        }
    }
}

/// The filters and sort order of the hotel list.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::{HotelQuery, SortOrder, catalog};
///
/// let hotels = catalog::hotels();
/// let query = HotelQuery {
///     sort: SortOrder::PriceAsc,
///     ..HotelQuery::default()
/// };
/// let results = query.apply(&hotels);
/// assert_eq!(results.len(), hotels.len());
/// assert!(results.windows(2).all(|w| w[0].price_from <= w[1].price_from));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HotelQuery {
    /// Free-text query on name or location.
    pub text: String,
    /// Exact location, or `None` for all locations.
    pub location: Option<String>,
    /// Inclusive upper bound on `price_from`.
    pub max_price: u32,
    /// Inclusive lower bound on the rating.
    pub min_rating: f32,
    /// Sort order of the results.
    pub sort: SortOrder,
}

impl Default for HotelQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            location: None,
            max_price: MAX_PRICE_FILTER,
            min_rating: 0.0,
            sort: SortOrder::default(),
        }
    }
}

impl HotelQuery {
    /// Creates a query with the given free text and default filters.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the hotel passes every filter.
    #[must_use]
    pub fn matches(&self, hotel: &Hotel) -> bool {
        hotel.matches_query(&self.text)
            && self.location.as_ref().is_none_or(|loc| hotel.location == *loc)
            && hotel.price_from <= self.max_price
            && hotel.rating >= self.min_rating
    }

    /// Filters and sorts the hotels. Sorting is stable.
    #[must_use]
    pub fn apply<'a>(&self, hotels: &'a [Hotel]) -> Vec<&'a Hotel> {
        let mut results: Vec<&Hotel> = hotels.iter().filter(|h| self.matches(h)).collect();
        match self.sort {
            SortOrder::Rating => results.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::PriceAsc => results.sort_by_key(|h| h.price_from),
            SortOrder::PriceDesc => results.sort_by(|a, b| b.price_from.cmp(&a.price_from)),
            SortOrder::Reviews => results.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        }
        results
    }

    /// Raises the max-price filter by one step, up to [`MAX_PRICE_FILTER`].
    pub fn raise_max_price(&mut self) {
        self.max_price = (self.max_price + PRICE_FILTER_STEP).min(MAX_PRICE_FILTER);
    }

    /// Lowers the max-price filter by one step, down to [`MIN_PRICE_FILTER`].
    pub fn lower_max_price(&mut self) {
        self.max_price = self
            .max_price
            .saturating_sub(PRICE_FILTER_STEP)
            .max(MIN_PRICE_FILTER);
    }

    /// Advances the minimum rating to the next of [`RATING_STEPS`], wrapping.
    pub fn cycle_min_rating(&mut self) {
        let idx = RATING_STEPS
            .iter()
            .position(|r| (*r - self.min_rating).abs() < f32::EPSILON)
            .map_or(0, |i| (i + 1) % RATING_STEPS.len());
        self.min_rating = RATING_STEPS[idx];
    }

    /// Advances the location filter through `All` then each location, wrapping.
    pub fn cycle_location(&mut self, locations: &[String]) {
        self.location = match &self.location {
            None => locations.first().cloned(),
            Some(current) => locations
                .iter()
                .position(|l| l == current)
                .and_then(|i| locations.get(i + 1))
                .cloned(),
        };
    }
}

/// Destination suggestions for a partial query.
///
/// Candidates are every location followed by every name; those containing the
/// query (ignoring case) are kept, up to [`MAX_SUGGESTIONS`]. A blank query
/// yields nothing.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::{catalog, hotel::suggestions};
///
/// let hotels = catalog::hotels();
/// assert!(suggestions(&hotels, "  ").is_empty());
/// assert!(suggestions(&hotels, "paris").iter().all(|s| s.to_lowercase().contains("paris")));
/// ```
#[must_use]
pub fn suggestions(hotels: &[Hotel], query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    hotels
        .iter()
        .map(|h| h.location.as_str())
        .chain(hotels.iter().map(|h| h.name.as_str()))
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

/// Distinct hotel locations, in catalog order.
#[must_use]
pub fn locations(hotels: &[Hotel]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for hotel in hotels {
        if !seen.contains(&hotel.location) {
            seen.push(hotel.location.clone());
        }
    }
    seen
}

/// The guest option following `current`, wrapping to the first.
#[must_use]
pub fn next_guest_option(current: u8) -> u8 {
    GUEST_OPTIONS
        .iter()
        .copied()
        .find(|&n| n > current)
        .unwrap_or(GUEST_OPTIONS[0])
}

/// The guest option preceding `current`, wrapping to the last.
#[must_use]
pub fn prev_guest_option(current: u8) -> u8 {
    GUEST_OPTIONS
        .iter()
        .rev()
        .copied()
        .find(|&n| n < current)
        .unwrap_or(GUEST_OPTIONS[GUEST_OPTIONS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(id: u32, name: &str, location: &str, price: u32, rating: f32, reviews: u32) -> Hotel {
        Hotel {
            id,
            name: name.to_string(),
            location: location.to_string(),
            description: String::new(),
            price_from: price,
            rating,
            review_count: reviews,
            amenities: Vec::new(),
            rooms: vec![Room {
                id: 1,
                name: "Standard".to_string(),
                price,
                capacity: 2,
            }],
        }
    }

    fn sample() -> Vec<Hotel> {
        vec![
            hotel(1, "Le Grand", "Paris, France", 900, 4.8, 1200),
            hotel(2, "Azure Atoll", "Maldives", 2500, 4.9, 800),
            hotel(3, "Alpine Lodge", "Swiss Alps, Switzerland", 700, 4.6, 2100),
            hotel(4, "Skyline", "New York, USA", 650, 4.5, 3000),
        ]
    }

    fn ids(results: &[&Hotel]) -> Vec<u32> {
        results.iter().map(|h| h.id).collect()
    }

    #[test]
    fn query_matches_name_or_location_ignoring_case() {
        let hotels = sample();
        assert_eq!(ids(&HotelQuery::with_text("PARIS").apply(&hotels)), vec![1]);
        assert_eq!(ids(&HotelQuery::with_text("lodge").apply(&hotels)), vec![3]);
        assert_eq!(HotelQuery::with_text("").apply(&hotels).len(), 4);
    }

    #[test]
    fn filters_combine() {
        let hotels = sample();
        let query = HotelQuery {
            max_price: 900,
            min_rating: 4.6,
            ..HotelQuery::default()
        };
        assert_eq!(ids(&query.apply(&hotels)), vec![1, 3]);

        let query = HotelQuery {
            location: Some("Maldives".to_string()),
            ..HotelQuery::default()
        };
        assert_eq!(ids(&query.apply(&hotels)), vec![2]);
    }

    #[test]
    fn sort_orders() {
        let hotels = sample();
        let mut query = HotelQuery::default();
        assert_eq!(ids(&query.apply(&hotels)), vec![2, 1, 3, 4]);
        query.sort = SortOrder::PriceAsc;
        assert_eq!(ids(&query.apply(&hotels)), vec![4, 3, 1, 2]);
        query.sort = SortOrder::PriceDesc;
        assert_eq!(ids(&query.apply(&hotels)), vec![2, 1, 3, 4]);
        query.sort = SortOrder::Reviews;
        assert_eq!(ids(&query.apply(&hotels)), vec![4, 3, 1, 2]);
    }

    #[test]
    fn sort_order_cycles_through_all() {
        let mut order = SortOrder::default();
        for expected in SortOrder::ALL.iter().skip(1).chain(SortOrder::ALL.iter().take(1)) {
            order = order.next();
            assert_eq!(order, *expected);
        }
    }

    #[test]
    fn sort_order_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SortOrder::PriceAsc).unwrap(),
            "\"price-asc\""
        );
    }

    #[test]
    fn max_price_is_clamped() {
        let mut query = HotelQuery::default();
        query.raise_max_price();
        assert_eq!(query.max_price, MAX_PRICE_FILTER);
        query.max_price = 120;
        query.lower_max_price();
        assert_eq!(query.max_price, MIN_PRICE_FILTER);
    }

    #[test]
    fn rating_filter_cycles_and_wraps() {
        let mut query = HotelQuery::default();
        query.cycle_min_rating();
        assert_eq!(query.min_rating, 4.5);
        query.cycle_min_rating();
        query.cycle_min_rating();
        assert_eq!(query.min_rating, 4.9);
        query.cycle_min_rating();
        assert_eq!(query.min_rating, 0.0);
    }

    #[test]
    fn location_filter_cycles_through_all() {
        let hotels = sample();
        let locs = locations(&hotels);
        let mut query = HotelQuery::default();
        query.cycle_location(&locs);
        assert_eq!(query.location.as_deref(), Some("Paris, France"));
        for _ in 1..locs.len() {
            query.cycle_location(&locs);
        }
        assert_eq!(query.location.as_deref(), Some("New York, USA"));
        query.cycle_location(&locs);
        assert_eq!(query.location, None);
    }

    #[test]
    fn suggestions_list_locations_before_names() {
        let hotels = sample();
        assert_eq!(suggestions(&hotels, "a"), vec![
            "Paris, France",
            "Maldives",
            "Swiss Alps, Switzerland",
            "New York, USA",
            "Le Grand",
            "Azure Atoll",
        ]);
    }

    #[test]
    fn suggestions_are_empty_for_blank_query() {
        assert!(suggestions(&sample(), "").is_empty());
    }

    #[test]
    fn room_lookup() {
        let h = hotel(7, "X", "Y", 100, 4.0, 1);
        assert_eq!(h.room(1).unwrap().name, "Standard");
        assert_eq!(
            h.room(5).unwrap_err(),
            ProtocolError::RoomNotFound { hotel: 7, room: 5 }
        );
    }

    #[test]
    fn stars_round_the_rating() {
        assert_eq!(hotel(1, "A", "B", 1, 4.6, 1).stars(), "★★★★★");
        assert_eq!(hotel(1, "A", "B", 1, 4.4, 1).stars(), "★★★★");
    }

    #[test]
    fn guest_options_wrap() {
        assert_eq!(next_guest_option(2), 3);
        assert_eq!(next_guest_option(6), 8);
        assert_eq!(next_guest_option(10), 1);
        assert_eq!(prev_guest_option(1), 10);
        assert_eq!(prev_guest_option(8), 6);
    }
}
