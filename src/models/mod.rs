pub mod config;
pub mod wave_type;

pub use config::{AppConfig, RenderDefaults};
pub use wave_type::{GrainEffect, WavePreset, WaveType};
