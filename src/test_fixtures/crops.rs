use rstest::fixture;

use crate::repository::models::crop::Crop;
use crate::test_fixtures::time;

pub fn crop(id: i32, name: &str, season: &str, yield_per_acre: f64) -> Crop {
    Crop {
        id,
        name: name.to_string(),
        season: season.to_string(),
        yield_per_acre,
        added_by: 1,
        created_at: time(),
    }
}

#[fixture]
pub fn registry() -> Vec<Crop> {
    vec![
        crop(1, "Wheat", "Rabi", 3000.0),
        crop(2, "Rice", "Kharif", 2000.0),
        crop(3, "Wheat", "Rabi", 1000.0),
        crop(4, "Mustard", "rabi", 500.0),
    ]
}
