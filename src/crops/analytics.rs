//! Aggregates behind the registry charts.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::repository::models::crop::Crop;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AnalyticsFilter {
    /// Exact season, ignoring case.
    pub season: Option<String>,
    /// Substring of the crop name, ignoring case.
    pub name: Option<String>,
}

impl AnalyticsFilter {
    fn matches(&self, crop: &Crop) -> bool {
        let season_ok = match non_blank(&self.season) {
            Some(season) => crop.season.eq_ignore_ascii_case(season),
            None => true,
        };
        let name_ok = match non_blank(&self.name) {
            Some(name) => crop.name.to_lowercase().contains(&name.to_lowercase()),
            None => true,
        };

        season_ok && name_ok
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YieldTotal {
    pub label: String,
    pub total_yield: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CropAnalytics {
    pub crops: Vec<Crop>,
    pub total_crops: usize,
    pub average_yield: f64,
    pub total_yield: f64,
    /// Bar chart data.
    pub yield_by_crop: Vec<YieldTotal>,
    /// Pie chart data.
    pub yield_by_season: Vec<YieldTotal>,
}

pub fn analyze(crops: Vec<Crop>, filter: &AnalyticsFilter) -> CropAnalytics {
    let crops: Vec<Crop> = crops.into_iter().filter(|c| filter.matches(c)).collect();

    let total_yield: f64 = crops.iter().map(|c| c.yield_per_acre).sum();
    let average_yield = if crops.is_empty() {
        0.0
    } else {
        total_yield / crops.len() as f64
    };

    CropAnalytics {
        total_crops: crops.len(),
        average_yield,
        total_yield,
        yield_by_crop: totals(&crops, |c| &c.name),
        yield_by_season: totals(&crops, |c| &c.season),
        crops,
    }
}

fn totals<F>(crops: &[Crop], label: F) -> Vec<YieldTotal>
where
    F: Fn(&Crop) -> &String,
{
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for crop in crops {
        *groups.entry(label(crop).as_str()).or_default() += crop.yield_per_acre;
    }

    groups
        .into_iter()
        .map(|(label, total_yield)| YieldTotal {
            label: label.to_string(),
            total_yield,
        })
        .collect()
}
