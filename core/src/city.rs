use serde::{Deserialize, Serialize};

/// Longitude/latitude pair as published in the bulk city list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

/// One record of the bulk city dataset. Never mutated after parsing.
///
/// The serialized shape is a compatibility contract with API clients:
/// `{"id": ..., "name": ..., "country": ..., "coord": {"lon": ..., "lat": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub coord: Coord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hurzuf() -> City {
        City {
            id: 707860,
            name: "Hurzuf".into(),
            country: "UA".into(),
            coord: Coord { lon: 34.283333, lat: 44.549999 },
        }
    }

    #[test]
    fn serializes_to_flat_wire_shape() {
        let json = serde_json::to_string(&hurzuf()).unwrap();
        assert_eq!(
            json,
            r#"{"id":707860,"name":"Hurzuf","country":"UA","coord":{"lon":34.283333,"lat":44.549999}}"#
        );
    }

    #[test]
    fn deserializes_from_bulk_list_entry() {
        let json = r#"{
            "id": 707860,
            "name": "Hurzuf",
            "country": "UA",
            "coord": {
                "lon": 34.283333,
                "lat": 44.549999
            }
        }"#;
        let city: City = serde_json::from_str(json).unwrap();
        assert_eq!(city, hurzuf());
    }

    #[test]
    fn lists_serialize_as_json_arrays() {
        let cities = vec![hurzuf()];
        let json = serde_json::to_string(&cities).unwrap();
        assert!(json.starts_with('['));
        let back: Vec<City> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cities);
    }
}
