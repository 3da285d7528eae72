use serde::Serialize;
use std::collections::BTreeMap;

use crate::repository::models::irrigation_event::IrrigationEvent;

/// Chart data for one crop type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CropHistory {
    pub crop_type: String,
    pub events: usize,
    pub average_moisture: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total_events: usize,
    pub by_crop: Vec<CropHistory>,
}

/// Groups events by crop type, sorted by name.
pub fn summarize(events: &[IrrigationEvent]) -> HistorySummary {
    let mut groups: BTreeMap<&str, (usize, i64)> = BTreeMap::new();
    for event in events {
        let entry = groups.entry(event.crop_type.as_str()).or_default();
        entry.0 += 1;
        entry.1 += i64::from(event.moisture_level);
    }

    HistorySummary {
        total_events: events.len(),
        by_crop: groups
            .into_iter()
            .map(|(crop_type, (count, total))| CropHistory {
                crop_type: crop_type.to_string(),
                events: count,
                average_moisture: total as f64 / count as f64,
            })
            .collect(),
    }
}
