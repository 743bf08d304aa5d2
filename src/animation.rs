//! Fixed-interval animation loop

use crate::config::{AnimationSettings, TorusConfig};
use crate::grid::Grid;
use crate::sampler::FrameSampler;
use crate::scene::RotationState;
use crate::terminal::TerminalDisplay;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Owns the rotation state and drives the sampler once per tick
#[derive(Debug, Clone)]
pub struct Animator {
    sampler: FrameSampler,
    state: RotationState,
    delta_a: f64,
    delta_b: f64,
    interval: Duration,
}

impl Animator {
    pub fn new(config: TorusConfig, settings: &AnimationSettings) -> Self {
        Self {
            sampler: FrameSampler::new(config),
            state: RotationState::from_settings(settings),
            delta_a: settings.delta_a,
            delta_b: settings.delta_b,
            interval: Duration::from_millis(settings.frame_interval_ms),
        }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Render the current angles, then advance them
    pub fn tick(&mut self) -> Grid {
        let started = Instant::now();
        let grid = self.sampler.sample(self.state);

        tracing::trace!(
            a = self.state.a,
            b = self.state.b,
            occupied = grid.occupied_count(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Frame sampled"
        );

        self.state = self.state.advanced_by(self.delta_a, self.delta_b);
        grid
    }

    /// Paint frames until `limit` is reached (forever when `None`).
    ///
    /// A closed output pipe ends the loop normally. Returns the number of
    /// frames displayed.
    pub fn run<W: Write>(&mut self, display: &mut TerminalDisplay<W>, limit: Option<u64>) -> io::Result<u64> {
        let mut frames = 0u64;

        loop {
            if limit.is_some_and(|max| frames >= max) {
                break;
            }

            let grid = self.tick();
            if let Err(e) = display.render(&grid) {
                if e.kind() == io::ErrorKind::BrokenPipe {
                    tracing::debug!(frames, "Output closed, stopping");
                    break;
                }
                return Err(e);
            }
            frames += 1;

            if frames % 100 == 0 {
                tracing::debug!(frames, a = self.state.a, b = self.state.b, "Animation progress");
            }

            if !self.interval.is_zero() && limit.map_or(true, |max| frames < max) {
                std::thread::sleep(self.interval);
            }
        }

        Ok(frames)
    }

    /// Write `frames` consecutive frames to `dir/frame_XXX.txt`
    pub fn dump(&mut self, dir: &Path, frames: u64) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for frame in 0..frames {
            let grid = self.tick();
            let path = dir.join(format!("frame_{:03}.txt", frame));
            fs::write(&path, grid.to_ascii())?;
            tracing::info!(path = %path.display(), "Wrote frame");
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GLYPH_RAMP;

    fn animator(size: usize) -> Animator {
        let settings = AnimationSettings {
            frame_interval_ms: 0,
            ..AnimationSettings::default()
        };
        Animator::new(TorusConfig::new(size).unwrap(), &settings)
    }

    #[test]
    fn test_tick_advances_state() {
        let mut anim = animator(10);
        assert_eq!(anim.state(), RotationState::new(1.0, 1.0));

        anim.tick();
        let state = anim.state();
        assert!((state.a - 1.14).abs() < 1e-12);
        assert!((state.b - 1.06).abs() < 1e-12);
    }

    #[test]
    fn test_first_tick_renders_initial_angles() {
        let mut anim = animator(20);
        let config = TorusConfig::new(20).unwrap();
        let expected = crate::sampler::sample(&config, RotationState::default());
        assert_eq!(anim.tick(), expected);
    }

    #[test]
    fn test_run_stops_at_limit() {
        let mut anim = animator(8);
        let mut display = TerminalDisplay::new(Vec::new());

        let frames = anim.run(&mut display, Some(3)).unwrap();
        assert_eq!(frames, 3);

        let out = String::from_utf8(display.into_inner().unwrap()).unwrap();
        assert_eq!(out.matches("\x1b[1;1H").count(), 3);
        assert!(out.chars().any(|c| GLYPH_RAMP.contains(&c)));
    }

    #[test]
    fn test_run_zero_limit_renders_nothing() {
        let mut anim = animator(8);
        let mut display = TerminalDisplay::new(Vec::new());

        assert_eq!(anim.run(&mut display, Some(0)).unwrap(), 0);
        assert!(display.into_inner().unwrap().is_empty());
        assert_eq!(anim.state(), RotationState::default());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_broken_pipe_ends_loop() {
        let mut anim = animator(4);
        let mut display = TerminalDisplay::new(ClosedPipe);

        assert_eq!(anim.run(&mut display, None).unwrap(), 0);
    }

    #[test]
    fn test_dump_writes_frame_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut anim = animator(12);

        let paths = anim.dump(dir.path(), 2).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("frame_000.txt"));
        assert!(paths[1].ends_with("frame_001.txt"));

        let first = std::fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(first.lines().count(), 12);
        assert!(first.lines().all(|line| line.chars().count() == 12));
        assert_ne!(first, std::fs::read_to_string(&paths[1]).unwrap());
    }

    #[test]
    fn test_dump_zero_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut anim = animator(4);

        assert!(anim.dump(dir.path(), 0).unwrap().is_empty());
        assert_eq!(anim.state(), RotationState::default());
    }

    #[test]
    fn test_dump_huge_count_stops_at_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the second frame file should go makes that write fail
        std::fs::create_dir(dir.path().join("frame_001.txt")).unwrap();
        let mut anim = animator(4);

        assert!(anim.dump(dir.path(), u64::MAX).is_err());
        assert!(dir.path().join("frame_000.txt").is_file());
    }
}
