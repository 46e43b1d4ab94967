use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use emberfall::{
    PngSequenceSink, ScenarioConfig, SpriteSources, assets, pipeline, raster::RasterImage,
};

#[derive(Parser, Debug)]
#[command(name = "emberfall", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the default scenario for a named character.
    Render(RenderArgs),
    /// Render a scenario described by a JSON config file.
    Scenario(ScenarioArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Character to fly: groot, hulk, perry, or joseph.
    #[arg(long)]
    character: String,

    /// Directory holding the sprite images (<name>.png).
    #[arg(long)]
    assets: PathBuf,

    /// Output directory for the PNG frame sequence.
    #[arg(long)]
    out: PathBuf,

    /// Canvas side length in pixels.
    #[arg(long, default_value_t = 1000)]
    size: u32,

    /// Seed for the scene and animation randomness.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of falling fireballs.
    #[arg(long, default_value_t = 10)]
    fireballs: u32,
}

#[derive(Parser, Debug)]
struct ScenarioArgs {
    /// Scenario config JSON.
    #[arg(long = "config")]
    config_path: PathBuf,

    /// Directory holding the sprite images (<name>.png).
    #[arg(long)]
    assets: PathBuf,

    /// Output directory for the PNG frame sequence.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Scenario(args) => cmd_scenario(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = ScenarioConfig {
        character: args.character,
        canvas_size: args.size,
        seed: args.seed,
        fireballs: args.fireballs,
        ..ScenarioConfig::default()
    };
    run_scenario(&cfg, &args.assets, &args.out)
}

fn cmd_scenario(args: ScenarioArgs) -> anyhow::Result<()> {
    let cfg = read_config_json(&args.config_path)?;
    run_scenario(&cfg, &args.assets, &args.out)
}

fn read_config_json(path: &Path) -> anyhow::Result<ScenarioConfig> {
    let f = File::open(path).with_context(|| format!("open scenario '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: ScenarioConfig =
        serde_json::from_reader(r).with_context(|| "parse scenario JSON")?;
    Ok(cfg)
}

fn run_scenario(cfg: &ScenarioConfig, asset_dir: &Path, out_dir: &Path) -> anyhow::Result<()> {
    cfg.validate()?;

    let sources = load_sources(cfg, asset_dir)?;
    let mut sink = PngSequenceSink::new(out_dir);
    let fire = pipeline::render_scenario(cfg, &sources, &mut sink)?;

    let fire_path = out_dir.join("fire.png");
    fire.to_rgb_image()
        .save(&fire_path)
        .with_context(|| format!("write '{}'", fire_path.display()))?;

    println!("rendered scenario to {}", out_dir.display());
    Ok(())
}

fn load_sources(cfg: &ScenarioConfig, asset_dir: &Path) -> anyhow::Result<SpriteSources> {
    let load = |name: &str| -> anyhow::Result<RasterImage> {
        Ok(assets::load_sprite(&asset_dir.join(format!("{name}.png")))?)
    };
    Ok(SpriteSources {
        character: load(&cfg.character)?,
        closed_wings: load("closed_wings")?,
        open_wings: load("open_wings")?,
        fireball: load("fireball")?,
    })
}
