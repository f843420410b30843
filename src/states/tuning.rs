//! States domain: per-actor tunables and their RON loader.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use thiserror::Error;

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/state_tuning.ron";

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StateTuning {
    pub gravity: f32,
    pub run_accel: f32,
    /// Fraction of `run_accel` available while airborne
    pub air_mult: f32,
    pub max_run: f32,
    /// Ground speed while in the Moving state
    pub speed: f32,
    pub jump_velocity: f32,
    pub dash_time: f32,
    pub dash_speed: f32,
    pub climb_accel: f32,
    pub climb_up_speed: f32,
    pub climb_down_speed: f32,
    pub climb_slip_speed: f32,
    pub hook_pull_speed: f32,
    /// Absolute world distance at which a hook counts as arrived
    pub hook_arrive_distance: f32,
    /// How far ahead of the actor a hook lands
    pub hook_range: f32,
    pub stamina_max: f32,
    /// Stamina regained per second on ticks without stamina use
    pub stamina_regen: f32,
    pub air_supply_max: f32,
    /// Air supply lost per second while airborne
    pub air_drain: f32,
}

impl Default for StateTuning {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            run_accel: 3000.0,
            air_mult: 0.8,
            max_run: 300.0,
            speed: 300.0,
            jump_velocity: 600.0,
            dash_time: 0.5,
            dash_speed: 300.0,
            climb_accel: 5.0,
            climb_up_speed: 50.0,
            climb_down_speed: 50.0,
            climb_slip_speed: 0.1,
            hook_pull_speed: 400.0,
            hook_arrive_distance: 10.0,
            hook_range: 160.0,
            stamina_max: 100.0,
            stamina_regen: 1.0,
            air_supply_max: 100.0,
            air_drain: 60.0,
        }
    }
}

impl StateTuning {
    /// Horizontal velocity change available per second while airborne.
    pub fn air_accel(&self) -> f32 {
        self.air_mult * self.run_accel
    }
}

#[derive(Debug, Error)]
pub enum TuningLoadError {
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. Fields left out keep their defaults.
pub fn parse_tuning(contents: &str, file: &str) -> Result<StateTuning, TuningLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|source| TuningLoadError::Parse {
            file: file.to_string(),
            source,
        })
}

pub fn load_tuning(path: &Path) -> Result<StateTuning, TuningLoadError> {
    let file = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| TuningLoadError::Io {
        file: file.clone(),
        source,
    })?;
    parse_tuning(&contents, &file)
}

/// Startup system: replace the default tuning with the file contents when present.
pub(crate) fn load_tuning_from_disk(mut tuning: ResMut<StateTuning>) {
    match load_tuning(Path::new(TUNING_PATH)) {
        Ok(loaded) => {
            info!(
                "Loaded state tuning: gravity={}, dash_speed={}, hook_pull_speed={}",
                loaded.gravity, loaded.dash_speed, loaded.hook_pull_speed
            );
            *tuning = loaded;
        }
        Err(e) => {
            warn!("{}; using default state tuning", e);
        }
    }
}
