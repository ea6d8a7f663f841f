use serde_json::to_string_pretty;
use slitscan_capture::{CaptureFrame, FrameSource, RgbPixelFrame};
use slitscan_orchestrator::{Command, SlitScan, SlitScanConfig};
use slitscan_spacetime::Rgba;

/// Color camera stand-in: a bright bar that slides across a dark frame.
struct SlidingBar {
    scan: SlitScanConfig,
    width: usize,
    height: usize,
    tick: usize,
}

impl SlidingBar {
    fn pixels(&self) -> Vec<Rgba> {
        let bar = self.tick % self.width;
        (0..self.width * self.height)
            .map(|i| {
                if i % self.width == bar {
                    Rgba::WHITE
                } else {
                    Rgba::rgb(40, 40, 40)
                }
            })
            .collect()
    }
}

impl FrameSource for SlidingBar {
    fn poll_frame(&mut self) -> Option<CaptureFrame> {
        self.tick += 1;
        let frame = RgbPixelFrame::new(self.width, self.height, self.pixels()).ok()?;
        frame
            .samples(
                &self.scan.projection(),
                self.scan.depth_window,
                self.scan.pixel_step,
            )
            .ok()
    }
}

fn main() -> anyhow::Result<()> {
    let config = SlitScanConfig {
        scan_frames: 30,
        pixel_step: 2,
        rng_seed: Some(1),
        ..Default::default()
    };
    let mut source = SlidingBar {
        scan: config.clone(),
        width: 64,
        height: 48,
        tick: 0,
    };
    let mut scan = SlitScan::new(config)?;
    scan.apply(Command::SetMode { index: 1 })?;

    let mut last = None;
    for _ in 0..45 {
        last = Some(scan.update(&mut source)?);
    }

    println!(
        "{} at {}: {} frames held, {} points",
        scan.mode_name(),
        scan.resolution(),
        scan.frames_held(),
        scan.composite().len()
    );
    if let Some(report) = last {
        println!("Last cycle:\n{}", to_string_pretty(&report)?);
    }
    Ok(())
}
