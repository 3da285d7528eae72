//! Acceptable soil-moisture ranges, in percent, per crop and soil.
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// Lower bound used when a crop/soil pair is not in the table.
pub const DEFAULT_MIN_THRESHOLD: i32 = 0;
/// Upper bound used when a crop/soil pair is not in the table.
pub const DEFAULT_MAX_THRESHOLD: i32 = 100;

pub const CROPS: [&str; 5] = ["Wheat", "Rice", "Maize", "Cotton", "Sugarcane"];
pub const SOILS: [&str; 4] = ["Sandy", "Loamy", "Clay", "Silt"];

// (crop, soil, min, max)
const TABLE: [(&str, &str, i32, i32); 20] = [
    ("Wheat", "Sandy", 30, 50),
    ("Wheat", "Loamy", 40, 60),
    ("Wheat", "Clay", 50, 70),
    ("Wheat", "Silt", 45, 65),
    ("Rice", "Sandy", 60, 80),
    ("Rice", "Loamy", 70, 90),
    ("Rice", "Clay", 75, 95),
    ("Rice", "Silt", 70, 90),
    ("Maize", "Sandy", 35, 55),
    ("Maize", "Loamy", 45, 65),
    ("Maize", "Clay", 55, 75),
    ("Maize", "Silt", 50, 70),
    ("Cotton", "Sandy", 25, 45),
    ("Cotton", "Loamy", 35, 55),
    ("Cotton", "Clay", 45, 65),
    ("Cotton", "Silt", 40, 60),
    ("Sugarcane", "Sandy", 50, 70),
    ("Sugarcane", "Loamy", 60, 80),
    ("Sugarcane", "Clay", 65, 85),
    ("Sugarcane", "Silt", 60, 80),
];

lazy_static! {
    static ref INDEX: HashMap<(String, String), (i32, i32)> = TABLE
        .iter()
        .map(|(crop, soil, min, max)| ((normalize(crop), normalize(soil)), (*min, *max)))
        .collect();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Threshold {
    pub min: i32,
    pub max: i32,
}

impl Threshold {
    pub fn contains(&self, moisture_level: i32) -> bool {
        (self.min..=self.max).contains(&moisture_level)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub crop_type: &'static str,
    pub soil_type: &'static str,
    pub min: i32,
    pub max: i32,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn lookup(crop: &str, soil: &str) -> Option<(i32, i32)> {
    INDEX.get(&(normalize(crop), normalize(soil))).copied()
}

pub fn min_threshold(crop: &str, soil: &str) -> i32 {
    lookup(crop, soil).map_or(DEFAULT_MIN_THRESHOLD, |(min, _)| min)
}

pub fn max_threshold(crop: &str, soil: &str) -> i32 {
    lookup(crop, soil).map_or(DEFAULT_MAX_THRESHOLD, |(_, max)| max)
}

pub fn threshold(crop: &str, soil: &str) -> Threshold {
    Threshold {
        min: min_threshold(crop, soil),
        max: max_threshold(crop, soil),
    }
}

/// Every table entry, in table order.
pub fn catalog() -> Vec<CatalogEntry> {
    TABLE
        .iter()
        .map(|&(crop_type, soil_type, min, max)| CatalogEntry {
            crop_type,
            soil_type,
            min,
            max,
        })
        .collect()
}
