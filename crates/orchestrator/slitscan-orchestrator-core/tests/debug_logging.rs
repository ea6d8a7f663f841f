use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};
use slitscan_capture::{CaptureFrame, Sample};
use slitscan_orchestrator::{Command, SlitScan, SlitScanConfig};
use slitscan_spacetime::{Rgba, Vec3};

struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Log for Recorder {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder {
    lines: Mutex::new(Vec::new()),
};

fn take_lines() -> Vec<String> {
    std::mem::take(&mut *RECORDER.lines.lock().unwrap())
}

fn frame() -> CaptureFrame {
    [-300.0, 0.0, 300.0]
        .into_iter()
        .map(|x| Sample::new(Vec3::new(x, 0.0, 1500.0), Rgba::WHITE))
        .collect()
}

/// it should only log per-cell hit counts while debug info is enabled
#[test]
fn per_cell_hits_follow_the_debug_toggle() {
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut scan = SlitScan::new(SlitScanConfig {
        rng_seed: Some(1),
        ..Default::default()
    })
    .unwrap();
    take_lines();

    scan.process_frame(frame()).unwrap();
    let quiet = take_lines();
    assert!(!quiet.iter().any(|l| l.contains("hits")), "{quiet:?}");

    scan.apply(Command::ToggleDebug).unwrap();
    scan.process_frame(frame()).unwrap();
    let loud = take_lines();
    let hits = loud.iter().filter(|l| l.contains("hits")).count();
    assert_eq!(hits, 2, "{loud:?}");
    assert!(loud.iter().any(|l| l.starts_with("Boundaries:")));
}
