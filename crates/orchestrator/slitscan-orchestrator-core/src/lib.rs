//! slitscan-orchestrator
//!
//! Drives one slit-scan cycle at a time: take a capture frame, filter it by
//! depth, bucket it into a grid at the active mode's resolution, push the grid
//! into the history and composite the history back into one point cloud.
//!
//! Rendering and export read [`SlitScan::composite`]; hosts steer the pipeline
//! with the setters or with serialized [`Command`]s.

pub mod config;
pub mod inputs;
pub mod outputs;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use slitscan_capture::{
    CaptureFrame, DepthPixelFrame, DepthWindow, FrameSource, RgbPixelFrame, SampleBounds,
};
use slitscan_spacetime::{
    GradientCompositor, GradientMode, PointBatch, Resolution, TemporalBuffer, VoxelGrid,
};

pub use crate::config::{ConfigError, SlitScanConfig};
pub use crate::inputs::Command;
pub use crate::outputs::{CycleReport, CycleStatus, SkipReason};

#[derive(Debug)]
pub struct SlitScan {
    config: SlitScanConfig,
    compositor: GradientCompositor,
    history: TemporalBuffer<PointBatch>,
    composite: PointBatch,
    rng: StdRng,
    paused: bool,
    cycle: u64,
}

impl SlitScan {
    /// Build a pipeline from a validated config.
    pub fn new(config: SlitScanConfig) -> Result<Self> {
        config.validate().context("invalid slit-scan config")?;
        let history = TemporalBuffer::new(config.scan_frames)?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mode = config.initial_mode;
        log::info!(
            "slit-scan ready: mode {} ({}), resolution {}, {} frames",
            mode.index(),
            mode.name(),
            mode.resolution(),
            config.scan_frames
        );
        Ok(Self {
            compositor: GradientCompositor::new(mode),
            history,
            composite: PointBatch::new(),
            rng,
            paused: false,
            cycle: 0,
            config,
        })
    }

    /// Current settings, including toggles and window nudges applied since
    /// construction.
    pub fn config(&self) -> &SlitScanConfig {
        &self.config
    }

    /// Select a gradient by index; see [`GradientMode::from_index`].
    pub fn set_mode(&mut self, index: i32) {
        self.set_gradient(GradientMode::from_index(index));
    }

    /// Switch gradient. History and the held composite are dropped since their
    /// grids were built at the previous resolution.
    pub fn set_gradient(&mut self, mode: GradientMode) {
        self.compositor = GradientCompositor::new(mode);
        self.history.clear();
        self.composite = PointBatch::new();
        log::info!(
            "gradient mode {} ({}), resolution {}",
            mode.index(),
            mode.name(),
            mode.resolution()
        );
    }

    /// Change the history length. Surplus frames go on the next push.
    pub fn set_scan_frames(&mut self, frames: usize) -> Result<()> {
        self.history
            .set_capacity(frames)
            .with_context(|| format!("cannot hold {frames} frames"))?;
        self.config.scan_frames = frames;
        Ok(())
    }

    pub fn mode(&self) -> GradientMode {
        self.compositor.mode()
    }

    pub fn mode_name(&self) -> &'static str {
        self.compositor.mode().name()
    }

    pub fn resolution(&self) -> Resolution {
        self.compositor.resolution()
    }

    pub fn frames_held(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &TemporalBuffer<PointBatch> {
        &self.history
    }

    /// Latest composite: positions with index-aligned colors.
    pub fn composite(&self) -> &PointBatch {
        &self.composite
    }

    pub fn depth_window(&self) -> DepthWindow {
        self.config.depth_window
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn slit_scan_enabled(&self) -> bool {
        self.config.slit_scan
    }

    pub fn debug_info(&self) -> bool {
        self.config.debug_info
    }

    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SetMode { index } => self.set_mode(index),
            Command::SetGradient { mode } => self.set_gradient(mode),
            Command::SetScanFrames { frames } => self.set_scan_frames(frames)?,
            Command::TogglePause => {
                self.paused = !self.paused;
                log::debug!("paused: {}", self.paused);
            }
            Command::ToggleSlitScan => {
                self.config.slit_scan = !self.config.slit_scan;
                log::info!("slit-scan: {}", self.config.slit_scan);
            }
            Command::ToggleDebug => {
                self.config.debug_info = !self.config.debug_info;
            }
            Command::NudgeNear { delta } => {
                let near = self.config.depth_window.nudge_near(delta);
                log::debug!("near threshold {near}");
            }
            Command::NudgeFar { delta } => {
                let far = self.config.depth_window.nudge_far(delta);
                log::debug!("far threshold {far}");
            }
        }
        Ok(())
    }

    /// Convert a color-camera frame with the configured projection, window and
    /// pixel step.
    pub fn capture_rgb(&self, frame: &RgbPixelFrame) -> Result<CaptureFrame> {
        Ok(frame.samples(
            &self.config.projection(),
            self.config.depth_window,
            self.config.pixel_step,
        )?)
    }

    /// Convert a depth-camera frame with the configured window and pixel step.
    pub fn capture_depth(&self, frame: &DepthPixelFrame) -> Result<CaptureFrame> {
        Ok(frame.samples(self.config.depth_window, self.config.pixel_step)?)
    }

    /// Run one cycle against `source`. Paused pipelines do not poll.
    pub fn update<S: FrameSource + ?Sized>(&mut self, source: &mut S) -> Result<CycleReport> {
        if self.paused {
            return Ok(self.skip(SkipReason::Paused));
        }
        match source.poll_frame() {
            Some(frame) => self.process_frame(frame),
            None => Ok(self.skip(SkipReason::NoFrame)),
        }
    }

    /// Run one cycle on an already captured frame.
    pub fn process_frame(&mut self, frame: CaptureFrame) -> Result<CycleReport> {
        if self.paused {
            return Ok(self.skip(SkipReason::Paused));
        }
        self.cycle += 1;

        let window = self.config.depth_window;
        let mut tracker = SampleBounds::new();
        let kept = frame.into_iter().filter(|s| window.contains(s.position.z));

        if !self.config.slit_scan {
            let mut raw = PointBatch::new();
            for s in kept {
                tracker.observe(s.position);
                raw.push(s.position, s.color);
            }
            self.composite = raw;
            return Ok(self.report(
                CycleStatus::Passthrough {
                    points: self.composite.len(),
                },
                &tracker,
            ));
        }

        let mut grid: VoxelGrid<PointBatch> =
            VoxelGrid::new(self.resolution(), self.config.bounds)?;
        for s in kept {
            tracker.observe(s.position);
            grid.append_sample(s.position, s.color);
        }
        if self.config.debug_info {
            log::debug!(
                "cycle {}: {} samples in {} of {} cells",
                self.cycle,
                grid.sample_count(),
                grid.occupied_cells(),
                self.resolution().cell_count()
            );
            for cell in self.resolution().cells() {
                if let Ok(hits) = grid.cell(cell) {
                    if !hits.is_empty() {
                        log::trace!("cycle {}: cell {cell} hits {}", self.cycle, hits.len());
                    }
                }
            }
        }
        let evicted = self.history.push(grid);
        self.composite_history(evicted, tracker)
    }

    /// Recomposite the held history without a new frame, e.g. to resample the
    /// random gradient.
    pub fn refresh(&mut self) -> Result<CycleReport> {
        self.cycle += 1;
        self.composite_history(0, SampleBounds::new())
    }

    fn composite_history(&mut self, evicted: usize, tracker: SampleBounds) -> Result<CycleReport> {
        if self.history.is_empty() {
            return Ok(self.report(
                CycleStatus::Skipped {
                    reason: SkipReason::EmptyHistory,
                },
                &tracker,
            ));
        }
        let mut out = PointBatch::new();
        let stats = self
            .compositor
            .composite_into(&self.history, &mut out, &mut self.rng)
            .with_context(|| format!("compositing cycle {}", self.cycle))?;
        self.composite = out;
        Ok(self.report(
            CycleStatus::Composited {
                points: self.composite.len(),
                frames_held: self.history.len(),
                evicted,
                stats,
            },
            &tracker,
        ))
    }

    fn skip(&mut self, reason: SkipReason) -> CycleReport {
        self.cycle += 1;
        log::trace!("cycle {} skipped: {reason:?}", self.cycle);
        self.report(CycleStatus::Skipped { reason }, &SampleBounds::new())
    }

    fn report(&self, status: CycleStatus, tracker: &SampleBounds) -> CycleReport {
        let sample_bounds = if self.config.debug_info {
            log::debug!("{tracker}");
            tracker.bounds()
        } else {
            None
        };
        CycleReport {
            cycle: self.cycle,
            mode: self.mode(),
            status,
            sample_bounds,
        }
    }
}
