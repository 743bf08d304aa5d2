//! ASCII donut renderer
//!
//! Samples a rotating torus, projects it with a perspective divide, resolves
//! overlapping samples with a depth buffer and maps surface luminance onto a
//! fixed glyph ramp for terminal display.

pub mod animation;
pub mod config;
pub mod grid;
pub mod sampler;
pub mod scene;
pub mod terminal;

pub use animation::Animator;
pub use config::{AppConfig, ConfigError, TorusConfig};
pub use grid::{Grid, ScreenCell};
pub use sampler::{sample, FrameSampler};
pub use scene::RotationState;
pub use terminal::TerminalDisplay;

/// Glyphs ordered from dimmest to brightest surface
pub const GLYPH_RAMP: [char; 12] = ['.', ',', '-', '~', ':', ';', '=', '!', '*', '#', '$', '@'];

/// Default screen size (width and height)
pub const DEFAULT_SCREEN_SIZE: usize = 20;

/// Largest accepted screen size; terminal coordinates are 16-bit
pub const MAX_SCREEN_SIZE: usize = u16::MAX as usize;

/// Character written for cells with no surviving sample
pub const BLANK: char = ' ';
