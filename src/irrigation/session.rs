use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::irrigation::thresholds::{self, Threshold};

/// Progress value at which a cycle is finished.
pub const FULL_PROGRESS: u8 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum IrrigationError {
    #[error("{crop} on {soil} soil was already irrigated this session")]
    AlreadyIrrigated { crop: String, soil: String },
    #[error("an irrigation cycle is already running")]
    CycleInProgress,
    #[error("moisture level {moisture_level} is outside {min}-{max}")]
    OutOfRange {
        moisture_level: i32,
        min: i32,
        max: i32,
    },
}

/// What a stop request does to the completed-set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopPolicy {
    /// The stopped key goes back to Idle and can be started again.
    #[default]
    ReturnToIdle,
    /// The stopped key is treated as irrigated until reset.
    MarkComplete,
}

impl FromStr for StopPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "idle" | "return_to_idle" => Ok(StopPolicy::ReturnToIdle),
            "complete" | "mark_complete" => Ok(StopPolicy::MarkComplete),
            other => Err(format!("unknown stop policy: {}", other)),
        }
    }
}

/// Composite crop/soil key. Names are compared case-insensitively.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct CropSoil {
    pub crop_type: String,
    pub soil_type: String,
}

impl CropSoil {
    pub fn new(crop_type: &str, soil_type: &str) -> Self {
        Self {
            crop_type: title_case(crop_type),
            soil_type: title_case(soil_type),
        }
    }

    pub fn threshold(&self) -> Threshold {
        thresholds::threshold(&self.crop_type, &self.soil_type)
    }
}

impl fmt::Display for CropSoil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.crop_type, self.soil_type)
    }
}

fn title_case(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CycleState {
    Idle,
    Active { run: u64, moisture_level: i32 },
    Complete,
}

#[derive(Debug)]
pub struct Cycle {
    pub state: CycleState,
    pub progress: u8,
    pub last_error: Option<String>,
    stop: Option<oneshot::Sender<()>>,
}

impl Default for Cycle {
    fn default() -> Self {
        Self {
            state: CycleState::Idle,
            progress: 0,
            last_error: None,
            stop: None,
        }
    }
}

impl Cycle {
    fn cancel(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The task may already have exited.
            let _ = stop.send(());
        }
    }
}

/// Serializable snapshot of one key's cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CycleStatus {
    pub crop_type: String,
    pub soil_type: String,
    #[serde(flatten)]
    pub state: CycleState,
    pub progress: u8,
    pub min_threshold: i32,
    pub max_threshold: i32,
    pub last_error: Option<String>,
}

/// A started cycle, handed to the ticking task.
#[derive(Debug)]
pub struct Run {
    pub id: u64,
    pub stop: oneshot::Receiver<()>,
}

/// Result of one progress tick.
#[derive(Debug, PartialEq)]
pub enum Tick {
    Progress(u8),
    /// The cycle reached full progress with the moisture level given at start.
    Completed { moisture_level: i32 },
    /// The run was stopped, reset, or replaced; the task should exit.
    Stale,
}

/// Irrigation state for one login session. Only the owning session sees it.
#[derive(Debug)]
pub struct IrrigationSession {
    pub id: Uuid,
    pub username: String,
    cycles: HashMap<CropSoil, Cycle>,
    next_run: u64,
}

impl IrrigationSession {
    pub fn new(id: Uuid, username: String) -> Self {
        Self {
            id,
            username,
            cycles: HashMap::new(),
            next_run: 1,
        }
    }

    pub fn is_completed(&self, key: &CropSoil) -> bool {
        self.cycles
            .get(key)
            .map_or(false, |cycle| cycle.state == CycleState::Complete)
    }

    pub fn active_key(&self) -> Option<&CropSoil> {
        self.cycles
            .iter()
            .find(|(_, cycle)| matches!(cycle.state, CycleState::Active { .. }))
            .map(|(key, _)| key)
    }

    /// Idle -> Active. Blocked keys, a running cycle, or an out-of-range reading leave
    /// the session untouched.
    pub fn begin(&mut self, key: &CropSoil, moisture_level: i32) -> Result<Run, IrrigationError> {
        if self.is_completed(key) {
            return Err(IrrigationError::AlreadyIrrigated {
                crop: key.crop_type.clone(),
                soil: key.soil_type.clone(),
            });
        }

        if self.active_key().is_some() {
            return Err(IrrigationError::CycleInProgress);
        }

        let threshold = key.threshold();
        if !threshold.contains(moisture_level) {
            return Err(IrrigationError::OutOfRange {
                moisture_level,
                min: threshold.min,
                max: threshold.max,
            });
        }

        let id = self.next_run;
        self.next_run += 1;

        let (stop_tx, stop_rx) = oneshot::channel();
        let cycle = self.cycles.entry(key.clone()).or_default();
        cycle.state = CycleState::Active {
            run: id,
            moisture_level,
        };
        cycle.progress = 0;
        cycle.last_error = None;
        cycle.stop = Some(stop_tx);

        Ok(Run { id, stop: stop_rx })
    }

    /// Advances the run by one unit. Reaching full progress moves the key to Complete.
    pub fn advance(&mut self, key: &CropSoil, run: u64) -> Tick {
        let cycle = match self.cycles.get_mut(key) {
            Some(cycle) => cycle,
            None => return Tick::Stale,
        };

        let moisture_level = match cycle.state {
            CycleState::Active {
                run: active_run,
                moisture_level,
            } if active_run == run => moisture_level,
            _ => return Tick::Stale,
        };

        cycle.progress = (cycle.progress + 1).min(FULL_PROGRESS);
        if cycle.progress < FULL_PROGRESS {
            return Tick::Progress(cycle.progress);
        }

        cycle.state = CycleState::Complete;
        cycle.stop = None;

        Tick::Completed { moisture_level }
    }

    /// Active -> Idle (or Complete under `MarkComplete`). Other states are left as they are.
    pub fn stop(&mut self, key: &CropSoil, policy: StopPolicy) {
        let cycle = match self.cycles.get_mut(key) {
            Some(cycle) => cycle,
            None => return,
        };

        if !matches!(cycle.state, CycleState::Active { .. }) {
            return;
        }

        cycle.cancel();
        cycle.state = match policy {
            StopPolicy::ReturnToIdle => CycleState::Idle,
            StopPolicy::MarkComplete => CycleState::Complete,
        };
    }

    /// Any state -> Idle with zero progress. A running task for the key is cancelled.
    pub fn reset(&mut self, key: &CropSoil) {
        if let Some(mut cycle) = self.cycles.remove(key) {
            cycle.cancel();
        }
    }

    /// Cancels every running task; used when the session ends.
    pub fn stop_all(&mut self) {
        for cycle in self.cycles.values_mut() {
            if matches!(cycle.state, CycleState::Active { .. }) {
                cycle.cancel();
                cycle.state = CycleState::Idle;
            }
        }
    }

    /// Records a failure to persist the completion record. The key stays Complete.
    pub fn record_failure(&mut self, key: &CropSoil, message: String) {
        if let Some(cycle) = self.cycles.get_mut(key) {
            cycle.last_error = Some(message);
        }
    }

    pub fn status(&self, key: &CropSoil) -> CycleStatus {
        let threshold = key.threshold();
        let (state, progress, last_error) = match self.cycles.get(key) {
            Some(cycle) => (cycle.state, cycle.progress, cycle.last_error.clone()),
            None => (CycleState::Idle, 0, None),
        };

        CycleStatus {
            crop_type: key.crop_type.clone(),
            soil_type: key.soil_type.clone(),
            state,
            progress,
            min_threshold: threshold.min,
            max_threshold: threshold.max,
            last_error,
        }
    }

    pub fn statuses(&self) -> Vec<CycleStatus> {
        let mut statuses: Vec<CycleStatus> =
            self.cycles.keys().map(|key| self.status(key)).collect();
        statuses.sort_by(|a, b| {
            (&a.crop_type, &a.soil_type).cmp(&(&b.crop_type, &b.soil_type))
        });

        statuses
    }
}
