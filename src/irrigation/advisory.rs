//! Static agronomy tips per crop and soil.
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Advice {
    pub crop_type: String,
    pub soil_type: String,
    pub tips: Vec<&'static str>,
}

/// Tips for a crop/soil pair; unknown pairs get an empty list.
pub fn advice(crop: &str, soil: &str) -> Advice {
    Advice {
        crop_type: crop.trim().to_string(),
        soil_type: soil.trim().to_string(),
        tips: tips(crop, soil).to_vec(),
    }
}

pub fn tips(crop: &str, soil: &str) -> &'static [&'static str] {
    match (
        crop.trim().to_lowercase().as_str(),
        soil.trim().to_lowercase().as_str(),
    ) {
        // Wheat
        ("wheat", "sandy") => &[
            "Irrigate lightly and often; sandy soil drains within a day.",
            "Add farmyard manure before sowing to hold moisture.",
            "Give the first irrigation at crown root initiation, about 21 days after sowing.",
        ],
        ("wheat", "loamy") => &[
            "Four to six irrigations cover the season in loam.",
            "Prioritise water at crown root initiation, flowering, and grain filling.",
        ],
        ("wheat", "clay") => &[
            "Space irrigations widely; clay holds water and waterlogging yellows wheat.",
            "Open drainage furrows before winter rains.",
        ],
        ("wheat", "silt") => &[
            "Break surface crust after irrigation so seedlings emerge evenly.",
            "Irrigate at tillering and heading.",
        ],

        // Rice
        ("rice", "sandy") => &[
            "Sandy fields lose standing water fast; puddle thoroughly before transplanting.",
            "Consider alternate wetting and drying only with a reliable water supply.",
        ],
        ("rice", "loamy") => &[
            "Keep 2-5 cm of standing water during tillering.",
            "Drain the field 10 days before harvest.",
        ],
        ("rice", "clay") => &[
            "Clay suits paddy; maintain shallow flooding through panicle initiation.",
            "Level the field so water depth is uniform.",
        ],
        ("rice", "silt") => &[
            "Puddle to reduce percolation losses.",
            "Apply zinc if leaves show bronzing.",
        ],

        // Maize
        ("maize", "sandy") => &[
            "Irrigate every 5-7 days in hot weather.",
            "Mulch between rows to cut evaporation.",
        ],
        ("maize", "loamy") => &[
            "Tasseling and silking are the critical stages; never let the field dry then.",
            "Ridge sowing improves water use.",
        ],
        ("maize", "clay") => &[
            "Sow on ridges; maize roots suffer in waterlogged clay.",
            "Avoid irrigating just before expected rain.",
        ],
        ("maize", "silt") => &[
            "Irrigate at knee height, tasseling, and grain filling.",
        ],

        // Cotton
        ("cotton", "sandy") => &[
            "Use short, frequent irrigations during flowering.",
            "Drip irrigation saves water on sandy ground.",
        ],
        ("cotton", "loamy") => &[
            "Delay the first irrigation until 30-35 days after sowing to deepen roots.",
            "Stop irrigating once 60% of bolls have opened.",
        ],
        ("cotton", "clay") => &[
            "Bed planting avoids standing water around stems.",
            "Watch for cracking; irrigate before cracks widen.",
        ],
        ("cotton", "silt") => &[
            "Irrigate at square formation and peak flowering.",
        ],

        // Sugarcane
        ("sugarcane", "sandy") => &[
            "Trash mulching holds moisture between irrigations.",
            "Irrigate every 7-10 days in summer.",
        ],
        ("sugarcane", "loamy") => &[
            "Furrow irrigation suits loam; keep the tillering phase well watered.",
            "Withhold water for three weeks before harvest to raise sucrose.",
        ],
        ("sugarcane", "clay") => &[
            "Lengthen the interval between irrigations to avoid waterlogging.",
            "Earth up after the monsoon to improve drainage.",
        ],
        ("sugarcane", "silt") => &[
            "Skip-furrow irrigation reduces water use without cutting yield.",
        ],

        _ => &[],
    }
}
