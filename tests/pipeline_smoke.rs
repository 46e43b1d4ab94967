//! End-to-end scenario runs against the in-memory sink.

use emberfall::{
    FlightParams, InMemorySink, RasterImage, ScenarioConfig, SpriteSources, composite,
    render_scenario,
};

fn solid(w: u32, h: u32, v: u8) -> RasterImage {
    RasterImage::filled(w, h, [v, v, v])
}

/// Synthetic sprites that survive their cut-out policies: solid mid-gray is
/// foreground for perry (thresh 40), both wing policies, and the inverted
/// fireball policy.
fn test_sources() -> SpriteSources {
    SpriteSources {
        character: solid(60, 60, 200),
        closed_wings: solid(50, 50, 200),
        open_wings: solid(50, 50, 200),
        fireball: solid(40, 40, 200),
    }
}

fn test_config(seed: u64) -> ScenarioConfig {
    ScenarioConfig {
        character: "perry".to_owned(),
        canvas_size: 200,
        sprite_width: 40,
        stars: 10,
        buildings: 8,
        fireballs: 2,
        flight: FlightParams {
            base_x: 60,
            base_y: 120,
            frames: 8,
            climb_px: 10,
            wobble_px: 2,
            drift_px: 10,
        },
        seed,
    }
}

#[test]
fn scenario_emits_the_expected_frame_sequence() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let cfg = test_config(42);
    let mut sink = InMemorySink::new();
    let fire = render_scenario(&cfg, &test_sources(), &mut sink).unwrap();

    // 8 flight frames, 2 impacts of (landing + 7 shakes), 1 closing frame.
    assert_eq!(sink.frames().len(), 8 + 2 * 8 + 1);

    let cfg_seen = sink.config().unwrap();
    assert_eq!(cfg_seen.width, 200);
    assert_eq!(cfg_seen.height, 200);

    let indices: Vec<u64> = sink.frames().iter().map(|&(i, _)| i).collect();
    assert!(indices.windows(2).all(|w| w[1] == w[0] + 1));
    assert_eq!(indices[0], 0);

    for (_, frame) in sink.frames() {
        assert_eq!(frame.width(), 200);
        assert_eq!(frame.height(), 200);
    }

    // The closing frame is the returned fire image, red channel only.
    let (_, last) = sink.frames().last().unwrap();
    assert_eq!(last.as_bytes(), fire.as_bytes());
    for chunk in fire.as_bytes().chunks_exact(3) {
        assert_eq!(chunk[1], 0);
        assert_eq!(chunk[2], 0);
    }
}

#[test]
fn same_seed_reproduces_every_frame() {
    let cfg = test_config(7);
    let mut a = InMemorySink::new();
    let mut b = InMemorySink::new();
    render_scenario(&cfg, &test_sources(), &mut a).unwrap();
    render_scenario(&cfg, &test_sources(), &mut b).unwrap();

    assert_eq!(a.frames().len(), b.frames().len());
    for ((ia, fa), (ib, fb)) in a.frames().iter().zip(b.frames()) {
        assert_eq!(ia, ib);
        assert_eq!(fa.as_bytes(), fb.as_bytes());
    }
}

#[test]
fn different_seeds_produce_different_cities() {
    let mut a = InMemorySink::new();
    let mut b = InMemorySink::new();
    render_scenario(&test_config(1), &test_sources(), &mut a).unwrap();
    render_scenario(&test_config(2), &test_sources(), &mut b).unwrap();
    let (_, fa) = &a.frames()[0];
    let (_, fb) = &b.frames()[0];
    assert_ne!(fa.as_bytes(), fb.as_bytes());
}

#[test]
fn unknown_character_aborts_before_any_frame() {
    let cfg = ScenarioConfig {
        character: "thanos".to_owned(),
        ..test_config(0)
    };
    let mut sink = InMemorySink::new();
    let err = render_scenario(&cfg, &test_sources(), &mut sink).unwrap_err();
    assert!(err.to_string().contains("config error:"));
    assert!(sink.frames().is_empty());
    assert!(sink.config().is_none());
}

#[test]
fn all_black_sprite_is_fully_transparent_at_full_scale() {
    // A 400x400 pure-black sprite over a 1000x1000 canvas at (300, 600)
    // copies nothing: every pixel fails the all-channels-nonzero test.
    let mut canvas = RasterImage::filled(1000, 1000, [5, 5, 40]);
    let before = canvas.clone();
    composite::overlay(&mut canvas, &RasterImage::new(400, 400), (300, 600)).unwrap();
    assert_eq!(canvas.as_bytes(), before.as_bytes());
}
