// models/src/config.rs

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Ward and room allocation configuration: the set of valid ward numbers and
/// the rooms registered under each ward. Supplied externally at service start
/// and treated as read-only by the core.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct WardConfig {
    pub ward_numbers: BTreeSet<u8>,
    pub rooms_by_ward: BTreeMap<u8, BTreeSet<u16>>,
}

impl WardConfig {
    pub fn contains_ward(&self, ward: u8) -> bool {
        self.ward_numbers.contains(&ward)
    }

    pub fn ward_has_room(&self, ward: u8, room: u16) -> bool {
        self.rooms_by_ward
            .get(&ward)
            .is_some_and(|rooms| rooms.contains(&room))
    }
}

impl Default for WardConfig {
    /// Wards 1 through 5, each with rooms `w0`..`w9`.
    fn default() -> Self {
        let ward_numbers: BTreeSet<u8> = (1..=5).collect();
        let rooms_by_ward = ward_numbers
            .iter()
            .map(|&ward| {
                let rooms = (0..10).map(|r| ward as u16 * 10 + r).collect();
                (ward, rooms)
            })
            .collect();
        Self {
            ward_numbers,
            rooms_by_ward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WardConfig;

    #[test]
    fn should_register_ten_rooms_per_default_ward() {
        let config = WardConfig::default();
        for ward in 1..=5u8 {
            assert!(config.contains_ward(ward));
            let rooms = &config.rooms_by_ward[&ward];
            assert_eq!(rooms.len(), 10);
            assert!(rooms.contains(&(ward as u16 * 10)));
            assert!(rooms.contains(&(ward as u16 * 10 + 9)));
        }
    }

    #[test]
    fn should_not_claim_rooms_for_unknown_ward() {
        let config = WardConfig::default();
        assert!(!config.contains_ward(9));
        assert!(!config.ward_has_room(9, 91));
        assert!(!config.ward_has_room(2, 31));
    }
}
