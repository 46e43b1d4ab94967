//! The fixed choreography: cut-outs, character build, city generation,
//! flight, fireballs, destruction. Single-threaded and blocking; frame N+1
//! is never produced before frame N has been handed to the sink.

use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;

use crate::anim::{CharacterSprite, FlightFrames, FlightParams, ImpactFrames};
use crate::assets::policy_for;
use crate::composite::overlay_pair;
use crate::destroy::destroy;
use crate::error::{EmberfallError, EmberfallResult};
use crate::mask::cutout;
use crate::raster::{RasterImage, resize_to_width};
use crate::scene::generate_scene;
use crate::sink::{FrameSink, SinkConfig};

/// Raw (not yet cut out) sprite images for one scenario run.
#[derive(Clone, Debug)]
pub struct SpriteSources {
    pub character: RasterImage,
    pub closed_wings: RasterImage,
    pub open_wings: RasterImage,
    pub fireball: RasterImage,
}

/// Everything a scenario run needs besides the sprite images themselves.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Which character flies; must be a recognized asset name.
    pub character: String,
    pub canvas_size: u32,
    /// Character and wing sprites are resized to this width before the
    /// flight.
    pub sprite_width: u32,
    pub stars: u32,
    pub buildings: u32,
    pub fireballs: u32,
    pub flight: FlightParams,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            character: "groot".to_owned(),
            canvas_size: 1000,
            sprite_width: 400,
            stars: 100,
            buildings: 30,
            fireballs: 10,
            flight: FlightParams::default(),
            seed: 0,
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> EmberfallResult<()> {
        if self.canvas_size == 0 {
            return Err(EmberfallError::config("canvas_size must be > 0"));
        }
        if self.sprite_width == 0 {
            return Err(EmberfallError::config("sprite_width must be > 0"));
        }
        // Unknown characters fail here, before any rendering.
        policy_for(&self.character)?;
        Ok(())
    }
}

/// Run the full scenario, streaming every frame into `sink` in order, and
/// return the closing fire image (which is also pushed as the last frame).
#[tracing::instrument(skip_all, fields(character = %cfg.character, seed = cfg.seed))]
pub fn render_scenario(
    cfg: &ScenarioConfig,
    sources: &SpriteSources,
    sink: &mut dyn FrameSink,
) -> EmberfallResult<RasterImage> {
    cfg.validate()?;

    let sprite = build_character(cfg, sources)?;
    let fireball = build_fireball(cfg, sources)?;

    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let (canvas, stats) = generate_scene(cfg.canvas_size, cfg.stars, cfg.buildings, &mut rng)?;
    tracing::debug!(
        stars = stats.stars,
        buildings_drawn = stats.buildings_drawn,
        buildings_skipped = stats.buildings_skipped,
        wires = stats.wires,
        "city generated"
    );

    sink.begin(SinkConfig {
        width: cfg.canvas_size,
        height: cfg.canvas_size,
    })?;

    let mut idx = 0u64;
    let mut flight = FlightFrames::new(&canvas, &sprite, cfg.flight, &mut rng)?;
    for frame in flight.by_ref() {
        sink.push_frame(idx, &frame?)?;
        idx += 1;
    }
    let mut canvas = flight.into_final().unwrap_or(canvas);
    tracing::debug!(frames = idx, "flight complete");

    for _ in 0..cfg.fireballs {
        let impact = ImpactFrames::new(&mut canvas, &fireball, &mut rng)?;
        for frame in impact {
            sink.push_frame(idx, &frame?)?;
            idx += 1;
        }
    }
    tracing::debug!(fireballs = cfg.fireballs, "impacts complete");

    let fire = destroy(&canvas)?;
    sink.push_frame(idx, &fire)?;
    sink.end()?;
    Ok(fire)
}

/// Cut out the character and both wing states, resize them to a common
/// width, and merge the character onto each wing image.
fn build_character(
    cfg: &ScenarioConfig,
    sources: &SpriteSources,
) -> EmberfallResult<CharacterSprite> {
    let character = cutout(&sources.character, policy_for(&cfg.character)?)?;
    let closed = cutout(&sources.closed_wings, policy_for("closed_wings")?)?;
    let open = cutout(&sources.open_wings, policy_for("open_wings")?)?;

    let character = resize_to_width(&character, cfg.sprite_width)?;
    let mut closed = resize_to_width(&closed, cfg.sprite_width)?;
    let mut open = resize_to_width(&open, cfg.sprite_width)?;

    overlay_pair(&mut closed, &mut open, &character, (0, 0))?;
    CharacterSprite::new(closed, open)
}

fn build_fireball(
    cfg: &ScenarioConfig,
    sources: &SpriteSources,
) -> EmberfallResult<RasterImage> {
    let fireball = cutout(&sources.fireball, policy_for("fireball")?)?;
    resize_to_width(&fireball, (cfg.canvas_size / 5).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_the_reference_scenario() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.canvas_size, 1000);
        assert_eq!(cfg.sprite_width, 400);
        assert_eq!(cfg.stars, 100);
        assert_eq!(cfg.buildings, 30);
        assert_eq!(cfg.fireballs, 10);
        assert_eq!(cfg.flight.frames, 8);
        cfg.validate().unwrap();
    }

    #[test]
    fn config_parses_from_partial_json() {
        let cfg: ScenarioConfig =
            serde_json::from_str(r#"{"character": "perry", "canvas_size": 500, "seed": 9}"#)
                .unwrap();
        assert_eq!(cfg.character, "perry");
        assert_eq!(cfg.canvas_size, 500);
        assert_eq!(cfg.seed, 9);
        // Everything else falls back to defaults.
        assert_eq!(cfg.stars, 100);
    }

    #[test]
    fn unknown_character_fails_validation() {
        let cfg = ScenarioConfig {
            character: "loki".to_owned(),
            ..ScenarioConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("config error:"));
    }

    #[test]
    fn zero_canvas_fails_validation() {
        let cfg = ScenarioConfig {
            canvas_size: 0,
            ..ScenarioConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
