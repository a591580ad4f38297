use serde::{Deserialize, Serialize};

pub const MAX_ADULTS: u32 = 10;
pub const MAX_CHILDREN: u32 = 10;
pub const MAX_ROOMS: u32 = 8;

/// Guest and room counts from the search form. Every mutation keeps the
/// counts inside their bounds, and never lets rooms outnumber adults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCounter")]
pub struct GuestCounter {
    adults: u32,
    children: u32,
    rooms: u32,
}

/// Wire shape; always clamped through [`GuestCounter::new`].
#[derive(Deserialize)]
struct RawCounter {
    #[serde(default)]
    adults: u32,
    #[serde(default)]
    children: u32,
    #[serde(default)]
    rooms: u32,
}

impl From<RawCounter> for GuestCounter {
    fn from(raw: RawCounter) -> Self {
        Self::new(raw.adults, raw.children, raw.rooms)
    }
}

impl Default for GuestCounter {
    fn default() -> Self {
        Self { adults: 2, children: 0, rooms: 1 }
    }
}

impl GuestCounter {
    /// Out-of-range values are clamped.
    pub fn new(adults: u32, children: u32, rooms: u32) -> Self {
        let adults = adults.clamp(1, MAX_ADULTS);
        Self {
            adults,
            children: children.min(MAX_CHILDREN),
            rooms: rooms.clamp(1, MAX_ROOMS.min(adults)),
        }
    }

    pub fn adults(&self) -> u32 { self.adults }
    pub fn children(&self) -> u32 { self.children }
    pub fn rooms(&self) -> u32 { self.rooms }

    pub fn add_adult(&mut self) { self.adults = (self.adults + 1).min(MAX_ADULTS); }

    pub fn remove_adult(&mut self) {
        self.adults = self.adults.saturating_sub(1).max(1);
        self.rooms = self.rooms.min(self.adults);
    }

    pub fn add_child(&mut self) { self.children = (self.children + 1).min(MAX_CHILDREN); }

    pub fn remove_child(&mut self) { self.children = self.children.saturating_sub(1); }

    pub fn add_room(&mut self) { self.rooms = (self.rooms + 1).min(MAX_ROOMS).min(self.adults); }

    pub fn remove_room(&mut self) { self.rooms = self.rooms.saturating_sub(1).max(1); }

    pub fn total_guests(&self) -> u32 { self.adults + self.children }

    /// Upstream `guests` parameter: guests per room (rounded up), once per
    /// room, joined by `|`. Two rooms for three guests gives `"2|2"`.
    pub fn query_param(&self) -> String {
        let per_room = self.total_guests().div_ceil(self.rooms);
        vec![per_room.to_string(); self.rooms as usize].join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_stay_in_bounds() {
        let mut g = GuestCounter::new(1, 0, 1);
        g.remove_adult();
        g.remove_child();
        g.remove_room();
        assert_eq!((g.adults(), g.children(), g.rooms()), (1, 0, 1));

        g.add_room();
        assert_eq!(g.rooms(), 1, "rooms cannot exceed adults");
        for _ in 0..20 {
            g.add_adult();
            g.add_child();
            g.add_room();
        }
        assert_eq!((g.adults(), g.children(), g.rooms()), (MAX_ADULTS, MAX_CHILDREN, MAX_ROOMS));
    }

    #[test]
    fn removing_adults_shrinks_rooms() {
        let mut g = GuestCounter::new(3, 0, 3);
        g.remove_adult();
        assert_eq!(g.rooms(), 2);
    }

    #[test]
    fn new_clamps() {
        assert_eq!(GuestCounter::new(0, 50, 9), GuestCounter::new(1, MAX_CHILDREN, 1));
    }

    #[test]
    fn deserializing_clamps_like_new() {
        let g: GuestCounter = serde_json::from_str(r#"{"adults":1,"children":0,"rooms":0}"#).unwrap();
        assert_eq!(g.rooms(), 1);
        assert_eq!(g.query_param(), "1");

        let g: GuestCounter = serde_json::from_str(r#"{"adults":1,"children":0,"rooms":8}"#).unwrap();
        assert_eq!(g.rooms(), 1, "rooms cannot exceed adults");

        let g: GuestCounter = serde_json::from_str(r#"{"adults":3,"children":1,"rooms":2}"#).unwrap();
        assert_eq!(g, GuestCounter::new(3, 1, 2));
        assert_eq!(serde_json::from_str::<GuestCounter>(&serde_json::to_string(&g).unwrap()).unwrap(), g);
    }

    #[test]
    fn guests_query_param() {
        assert_eq!(GuestCounter::default().query_param(), "2");
        assert_eq!(GuestCounter::new(2, 1, 2).query_param(), "2|2");
        assert_eq!(GuestCounter::new(4, 0, 2).query_param(), "2|2");
        assert_eq!(GuestCounter::new(3, 0, 3).query_param(), "1|1|1");
    }
}
