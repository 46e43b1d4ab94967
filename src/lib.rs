//! Emberfall renders a short procedurally generated animated scene: a
//! cut-out character flies over a random city skyline, fireballs fall and
//! shake the scene, and the final frame is converted into an "on fire"
//! edge map.
//!
//! The pipeline is a fixed choreography, not a scripting engine:
//!
//! - cut out sprites ([`mask::cutout`])
//! - build the winged character ([`composite::overlay_pair`])
//! - generate the city ([`scene::generate_scene`])
//! - sequence flight and impact frames ([`anim`])
//! - produce the closing fire image ([`destroy::destroy`])
//!
//! Frames stream into a [`sink::FrameSink`]; pacing and presentation are the
//! sink's concern. All randomness flows through a seeded rng, so a scenario
//! is reproducible byte for byte.
#![forbid(unsafe_code)]

pub mod anim;
pub mod assets;
pub mod composite;
pub mod destroy;
pub mod error;
pub mod mask;
pub mod pipeline;
pub mod raster;
pub mod scene;
pub mod sink;

pub use anim::{CharacterSprite, FlightFrames, FlightParams, ImpactFrames, WingPhase};
pub use error::{EmberfallError, EmberfallResult};
pub use mask::ThresholdPolicy;
pub use pipeline::{ScenarioConfig, SpriteSources, render_scenario};
pub use raster::{Mask, RasterImage};
pub use scene::{SceneObject, SceneStats};
pub use sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
