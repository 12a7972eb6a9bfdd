//! Built-in hotel catalog.
//!
//! The demo has no backend, so the hotels and their rooms are compiled in.
//!
//! # Examples
//!
//! ```
//! use beiramar_protocol::catalog;
//!
//! let hotels = catalog::hotels();
//! assert_eq!(hotels.len(), 6);
//! assert!(catalog::find(1).is_ok());
//! ```

use crate::error::{ProtocolError, Result};
use crate::hotel::{Hotel, Room};

/// Builder for catalog entries, to keep the table below readable.
struct HotelBuilder {
    hotel: Hotel,
}

impl HotelBuilder {
    fn new(id: u32, name: &str, location: &str) -> Self {
        Self {
            hotel: Hotel {
                id,
                name: name.to_string(),
                location: location.to_string(),
                description: String::new(),
                price_from: 0,
                rating: 0.0,
                review_count: 0,
                amenities: Vec::new(),
                rooms: Vec::new(),
            },
        }
    }

    fn description(mut self, description: &str) -> Self {
        self.hotel.description = description.to_string();
        self
    }

    fn rating(mut self, rating: f32, review_count: u32) -> Self {
        self.hotel.rating = rating;
        self.hotel.review_count = review_count;
        self
    }

    fn amenities(mut self, amenities: &[&str]) -> Self {
        self.hotel.amenities = amenities.iter().map(|a| (*a).to_string()).collect();
        self
    }

    fn room(mut self, name: &str, price: u32, capacity: u8) -> Self {
        let id = self.hotel.rooms.len() as u32 + 1;
        self.hotel.rooms.push(Room {
            id,
            name: name.to_string(),
            price,
            capacity,
        });
        self
    }

    /// Finishes the entry; `price_from` is the cheapest room.
    fn build(mut self) -> Hotel {
        self.hotel.price_from = self
            .hotel
            .rooms
            .iter()
            .map(|r| r.price)
            .min()
            .unwrap_or_default();
        self.hotel
    }
}

/// Returns every hotel of the catalog, in catalog order.
#[must_use]
pub fn hotels() -> Vec<Hotel> {
    vec![
        HotelBuilder::new(1, "Le Palais Lumière", "Paris, France")
            .description(
                "A Belle Époque palace steps from the Seine, with gilded salons, a Michelin-starred \
                 restaurant and views over the rooftops of the Left Bank.",
            )
            .rating(4.9, 2847)
            .amenities(&["Spa", "Fine Dining", "Concierge", "Butler Service", "Bar", "Wi-Fi"])
            .room("Deluxe Room", 890, 2)
            .room("Eiffel Suite", 1650, 3)
            .room("Royal Penthouse", 4200, 4)
            .build(),
        HotelBuilder::new(2, "Azure Atoll Resort", "Maldives")
            .description(
                "Overwater villas on a private atoll, a house reef for snorkelling at the doorstep \
                 and sunsets over the Indian Ocean.",
            )
            .rating(4.8, 1923)
            .amenities(&["Private Beach", "Infinity Pool", "Diving", "Spa", "Yoga"])
            .room("Beach Villa", 1200, 2)
            .room("Overwater Villa", 2100, 3)
            .room("Ocean Residence", 5800, 6)
            .build(),
        HotelBuilder::new(3, "Chalet Edelweiss", "Swiss Alps, Switzerland")
            .description(
                "A ski-in, ski-out alpine lodge of larch and stone, with a heated outdoor pool \
                 facing the Matterhorn.",
            )
            .rating(4.7, 1456)
            .amenities(&["Ski Access", "Heated Pool", "Sauna", "Fireplace", "Restaurant"])
            .room("Alpine Room", 680, 2)
            .room("Family Chalet", 1450, 5)
            .build(),
        HotelBuilder::new(4, "The Meridian Tower", "New York, USA")
            .description(
                "A glass tower above Central Park South, with a rooftop bar, a 24-hour gym and \
                 floor-to-ceiling skyline views.",
            )
            .rating(4.6, 3312)
            .amenities(&["Rooftop Bar", "Gym", "Business Center", "Wi-Fi", "Valet"])
            .room("City Room", 540, 2)
            .room("Park View Suite", 1180, 3)
            .room("Skyline Loft", 2600, 4)
            .build(),
        HotelBuilder::new(5, "Maison du Marais", "Paris, France")
            .description(
                "A boutique townhouse hotel in the Marais, with a hidden courtyard garden and \
                 a wine cellar in the old vaults.",
            )
            .rating(4.5, 874)
            .amenities(&["Garden", "Wine Cellar", "Breakfast", "Wi-Fi"])
            .room("Classic Room", 420, 2)
            .room("Courtyard Suite", 760, 3)
            .build(),
        HotelBuilder::new(6, "Coral Lagoon Hideaway", "Maldives")
            .description(
                "Thatched villas hidden in a palm grove, each with its own plunge pool and a \
                 path down to the lagoon.",
            )
            .rating(4.9, 1104)
            .amenities(&["Plunge Pool", "Snorkelling", "Spa", "Sunset Cruise"])
            .room("Garden Villa", 980, 2)
            .room("Lagoon Villa", 1890, 4)
            .build(),
    ]
}

/// Looks up a hotel by identifier.
///
/// # Errors
///
/// Returns [`ProtocolError::HotelNotFound`] for an unknown identifier.
pub fn find(id: u32) -> Result<Hotel> {
    hotels()
        .into_iter()
        .find(|h| h.id == id)
        .ok_or(ProtocolError::HotelNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel::locations;

    #[test]
    fn ids_are_unique() {
        let hotels = hotels();
        let mut ids: Vec<u32> = hotels.iter().map(|h| h.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), hotels.len());
    }

    #[test]
    fn price_from_is_cheapest_room() {
        for hotel in hotels() {
            let cheapest = hotel.rooms.iter().map(|r| r.price).min().unwrap();
            assert_eq!(hotel.price_from, cheapest, "{}", hotel.name);
        }
    }

    #[test]
    fn every_hotel_has_rooms() {
        assert!(hotels().iter().all(|h| !h.rooms.is_empty()));
    }

    #[test]
    fn four_distinct_locations() {
        assert_eq!(locations(&hotels()), vec![
            "Paris, France",
            "Maldives",
            "Swiss Alps, Switzerland",
            "New York, USA",
        ]);
    }

    #[test]
    fn find_unknown_hotel_fails() {
        assert_eq!(find(99).unwrap_err(), ProtocolError::HotelNotFound(99));
    }
}
