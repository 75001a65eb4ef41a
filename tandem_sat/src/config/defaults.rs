//! Default configuration values.

use super::{CcMin, PhaseSaving};

pub const VAR_DECAY: f64 = 0.95;
pub const CLAUSE_DECAY: f64 = 0.999;
pub const RANDOM_VAR_FREQ: f64 = 0.0;
pub const RANDOM_SEED: u64 = 91648253;
pub const CCMIN_MODE: CcMin = CcMin::Deep;
pub const PHASE_SAVING: PhaseSaving = PhaseSaving::Full;
pub const GARBAGE_FRAC: f64 = 0.20;
pub const MIN_LEARNTS_LIM: u32 = 0;
pub const RESTART_FIRST: u32 = 100;
pub const RESTART_INC: f64 = 2.0;
pub const LUBY_RESTART: bool = true;
pub const LEARNTSIZE_FACTOR: f64 = 1.0 / 3.0;
pub const LEARNTSIZE_INC: f64 = 1.1;
pub const LEARNTSIZE_ADJUST_START: f64 = 100.0;
pub const LEARNTSIZE_ADJUST_INC: f64 = 1.5;

/// Thresholds and rescale factors for activity overflow.
pub const VAR_ACTIVITY_CAP: f64 = 1e100;
pub const VAR_ACTIVITY_RESCALE: f64 = 1e-100;
pub const CLAUSE_ACTIVITY_CAP: f32 = 1e20;
pub const CLAUSE_ACTIVITY_RESCALE: f32 = 1e-20;
