use slitscan_capture::{CaptureFrame, DepthWindow, QueuedSource, RgbPixelFrame, Sample};
use slitscan_orchestrator::{Command, CycleStatus, SkipReason, SlitScan, SlitScanConfig};
use slitscan_spacetime::{Bounds, GradientMode, Rgba, Vec3};

fn config() -> SlitScanConfig {
    SlitScanConfig {
        scan_frames: 4,
        bounds: Bounds::new(Vec3::new(-10.0, -10.0, 0.0), Vec3::new(10.0, 10.0, 100.0)),
        depth_window: DepthWindow::new(0.0, 100.0),
        rng_seed: Some(7),
        ..Default::default()
    }
}

/// One sample per entry of `xs`, colored by `tag`, mid-depth.
fn frame(xs: &[f64], tag: u8) -> CaptureFrame {
    xs.iter()
        .map(|&x| Sample::new(Vec3::new(x, 0.0, 50.0), Rgba::rgb(tag, 0, 0)))
        .collect()
}

/// it should reject configs that cannot hold a frame
#[test]
fn new_rejects_invalid_config() {
    let err = SlitScan::new(SlitScanConfig {
        scan_frames: 0,
        ..Default::default()
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("scan_frames"));
}

/// it should show the newest frame in most-recent mode
#[test]
fn most_recent_shows_latest_frame() {
    let mut scan = SlitScan::new(config()).unwrap();
    assert_eq!(scan.mode(), GradientMode::MostRecent);

    scan.process_frame(frame(&[-5.0, 5.0], 1)).unwrap();
    let report = scan.process_frame(frame(&[0.0], 2)).unwrap();
    match report.status {
        CycleStatus::Composited {
            points,
            frames_held,
            evicted,
            ..
        } => {
            assert_eq!(points, 1);
            assert_eq!(frames_held, 2);
            assert_eq!(evicted, 0);
        }
        other => panic!("unexpected status {other:?}"),
    }
    assert_eq!(scan.composite().colors(), &[Rgba::rgb(2, 0, 0)]);
}

/// it should show the oldest held frame in oldest mode and evict past capacity
#[test]
fn oldest_mode_tracks_eviction() {
    let mut scan = SlitScan::new(config()).unwrap();
    scan.apply(Command::SetMode { index: 9 }).unwrap();
    assert_eq!(scan.mode_name(), "oldest");

    for tag in 1..=6u8 {
        scan.process_frame(frame(&[1.0], tag)).unwrap();
    }
    assert_eq!(scan.frames_held(), 4);
    assert_eq!(scan.composite().colors(), &[Rgba::rgb(3, 0, 0)]);
}

/// it should clear history on a mode switch and composite nothing until the next push
#[test]
fn mode_switch_clears_history() {
    let mut scan = SlitScan::new(config()).unwrap();
    for tag in 1..=3u8 {
        scan.process_frame(frame(&[1.0], tag)).unwrap();
    }
    assert_eq!(scan.frames_held(), 3);

    scan.set_mode(1);
    assert_eq!(scan.mode(), GradientMode::LeftRight);
    assert_eq!(scan.resolution().x, 500);
    assert_eq!(scan.frames_held(), 0);
    assert!(scan.composite().is_empty());

    let report = scan.refresh().unwrap();
    assert_eq!(report.skip_reason(), Some(SkipReason::EmptyHistory));
    assert!(scan.composite().is_empty());
}

/// it should fall back to most-recent for unknown mode indices
#[test]
fn unknown_mode_index_selects_most_recent() {
    let mut scan = SlitScan::new(config()).unwrap();
    scan.set_mode(7);
    assert_eq!(scan.mode(), GradientMode::Spherical);
    scan.set_mode(42);
    assert_eq!(scan.mode(), GradientMode::MostRecent);
    scan.set_mode(-1);
    assert_eq!(scan.mode(), GradientMode::MostRecent);
}

/// it should leave the composite alone while paused and not poll the source
#[test]
fn paused_cycles_skip_without_polling() {
    let mut scan = SlitScan::new(config()).unwrap();
    let mut source = QueuedSource::new();
    source.enqueue(frame(&[1.0], 1));
    source.enqueue(frame(&[1.0], 2));

    scan.update(&mut source).unwrap();
    scan.apply(Command::TogglePause).unwrap();
    let report = scan.update(&mut source).unwrap();
    assert_eq!(report.skip_reason(), Some(SkipReason::Paused));
    assert_eq!(source.pending(), 1);
    assert_eq!(scan.composite().colors(), &[Rgba::rgb(1, 0, 0)]);

    scan.apply(Command::TogglePause).unwrap();
    scan.update(&mut source).unwrap();
    assert_eq!(scan.composite().colors(), &[Rgba::rgb(2, 0, 0)]);

    let report = scan.update(&mut source).unwrap();
    assert_eq!(report.skip_reason(), Some(SkipReason::NoFrame));
    assert_eq!(scan.frames_held(), 2);
}

/// it should pass filtered samples straight through with slit-scan off
#[test]
fn passthrough_when_slit_scan_disabled() {
    let mut scan = SlitScan::new(config()).unwrap();
    scan.apply(Command::ToggleSlitScan).unwrap();
    assert!(!scan.slit_scan_enabled());

    let mut f = frame(&[-1.0, 1.0], 5);
    f.push(Sample::new(Vec3::new(0.0, 0.0, 500.0), Rgba::WHITE));
    let report = scan.process_frame(f).unwrap();
    assert_eq!(report.status, CycleStatus::Passthrough { points: 2 });
    assert_eq!(scan.frames_held(), 0);
    assert_eq!(scan.composite().len(), 2);
}

/// it should drop samples outside the nudged depth window before bucketing
#[test]
fn nudged_window_filters_samples() {
    let mut scan = SlitScan::new(config()).unwrap();
    for _ in 0..6 {
        scan.apply(Command::NudgeFar { delta: -10.0 }).unwrap();
    }
    assert_eq!(scan.depth_window().far, 40.0);

    let report = scan.process_frame(frame(&[0.0], 1)).unwrap();
    assert_eq!(report.points(), Some(0));
    assert_eq!(scan.frames_held(), 1);
}

/// it should shrink history lazily on the next push
#[test]
fn scan_frames_shrink_on_next_push() {
    let mut scan = SlitScan::new(config()).unwrap();
    for tag in 1..=4u8 {
        scan.process_frame(frame(&[1.0], tag)).unwrap();
    }
    scan.apply(Command::SetScanFrames { frames: 2 }).unwrap();
    assert_eq!(scan.frames_held(), 4);
    assert_eq!(scan.config().scan_frames, 2);

    let report = scan.process_frame(frame(&[1.0], 5)).unwrap();
    assert!(matches!(
        report.status,
        CycleStatus::Composited {
            frames_held: 2,
            evicted: 3,
            ..
        }
    ));
    assert!(scan.set_scan_frames(0).is_err());
    assert_eq!(scan.config().scan_frames, 2);
}

/// it should report sample bounds only with debug info on
#[test]
fn debug_info_adds_sample_bounds() {
    let mut scan = SlitScan::new(config()).unwrap();
    let quiet = scan.process_frame(frame(&[-2.0, 3.0], 1)).unwrap();
    assert_eq!(quiet.sample_bounds, None);

    scan.apply(Command::ToggleDebug).unwrap();
    let loud = scan.process_frame(frame(&[-2.0, 3.0], 1)).unwrap();
    assert_eq!(
        loud.sample_bounds,
        Some(Bounds::new(
            Vec3::new(-2.0, 0.0, 50.0),
            Vec3::new(3.0, 0.0, 50.0)
        ))
    );
    assert!(loud.cycle > quiet.cycle);
}

/// it should sweep history across x in left-right mode
#[test]
fn left_right_sweep_reaches_older_frames() {
    let mut scan = SlitScan::new(config()).unwrap();
    scan.set_gradient(GradientMode::LeftRight);
    // one sample at each end of the x range, per frame
    for tag in 1..=4u8 {
        scan.process_frame(frame(&[-9.99, 9.99], tag)).unwrap();
    }
    let colors: Vec<u8> = scan.composite().colors().iter().map(|c| c.r()).collect();
    // left edge shows the newest frame, right edge an older one
    assert_eq!(colors.first(), Some(&4));
    assert_eq!(colors.last(), Some(&2));
}

/// it should convert color-camera pixels with the configured projection
#[test]
fn rgb_capture_uses_configured_projection() {
    let scan = SlitScan::new(SlitScanConfig {
        depth_window: DepthWindow::new(0.0, 1500.0),
        ..Default::default()
    })
    .unwrap();
    let pixels = RgbPixelFrame::new(2, 1, vec![Rgba::WHITE, Rgba::BLACK]).unwrap();
    let cap = scan.capture_rgb(&pixels).unwrap();
    assert_eq!(cap.len(), 1);
    assert_eq!(cap.samples()[0].position, Vec3::new(-400.0, -400.0, 1000.0));
}

/// it should accept commands and configs as json
#[test]
fn json_commands_and_config() {
    let cfg = config();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: SlitScanConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);

    let mut scan = SlitScan::new(back).unwrap();
    let cmd: Command = serde_json::from_str(r#"{"type":"set_mode","index":7}"#).unwrap();
    scan.apply(cmd).unwrap();
    assert_eq!(scan.mode(), GradientMode::Spherical);

    let report = scan.process_frame(frame(&[0.0], 1)).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["status"]["status"], "composited");
    assert_eq!(value["mode"], "spherical");
}

/// 50x50 samples spread over the x/y extent of `config()`, mid-depth.
fn sheet(tag: u8) -> CaptureFrame {
    let coord = |i: usize| -10.0 + 0.2 + 0.4 * i as f64;
    (0..50 * 50)
        .map(|i| {
            Sample::new(
                Vec3::new(coord(i % 50), coord(i / 50), 50.0),
                Rgba::rgb(tag, 0, 0),
            )
        })
        .collect()
}

/// it should keep every sample exactly once and only show held frames, in every mode
#[test]
fn every_mode_composites_held_frames_only() {
    for mode in GradientMode::ALL {
        let mut scan = SlitScan::new(SlitScanConfig {
            scan_frames: 5,
            initial_mode: mode,
            ..config()
        })
        .unwrap();
        for tag in 1..=7u8 {
            scan.process_frame(sheet(tag)).unwrap();
        }
        let out = scan.composite();
        assert_eq!(out.len(), 2500, "{mode}");
        assert!(!out.is_empty());
        assert_eq!(out.positions().len(), out.colors().len());
        assert!(
            out.colors().iter().all(|c| (3..=7).contains(&c.r())),
            "{mode} showed an evicted frame"
        );
        if mode == GradientMode::MostRecent {
            assert!(out.colors().iter().all(|c| c.r() == 7));
        }
    }
}
