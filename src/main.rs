//! # Treasure Demo Entry Point
//!
//! Builds weapons from the standard catalog (plus any JSON content given on
//! the command line) and prints one stats line per weapon.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use treasure::generation::utils::create_rng;
use treasure::{
    catalog, derived, round_to, GenerationConfig, Generator, ItemGenerator, MaterialCatalog,
    ObjectInstance, SpecRegistry, TreasureResult, WeaponGenerator,
};

/// Command line arguments for the treasure demo.
#[derive(Parser, Debug)]
#[command(name = "treasure")]
#[command(about = "Procedurally assembles weapons from weighted spec trees")]
#[command(version)]
struct Args {
    /// Random seed for generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Build this weapon type instead of drawing one at random
    #[arg(short, long)]
    weapon: Option<String>,

    /// Number of weapons to build
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Force every part that declares materials to use this material
    #[arg(short, long)]
    material: Option<String>,

    /// JSON file with extra spec declarations
    #[arg(long)]
    specs: Option<PathBuf>,

    /// JSON file with extra materials
    #[arg(long)]
    materials: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn run(args: &Args) -> TreasureResult<()> {
    info!("Starting treasure v{}", treasure::VERSION);

    let registry = load_registry(args)?;
    let materials = load_materials(args)?;

    let mut config = GenerationConfig::new(args.seed.unwrap_or_else(rand::random));
    if let Some(material) = &args.material {
        config = config.with_override_material(material.clone());
    }
    info!("Using seed {}", config.seed);
    let mut rng = create_rng(&config);

    let generator: Box<dyn Generator<ObjectInstance> + '_> = match &args.weapon {
        Some(weapon) => Box::new(ItemGenerator::new(&registry, &materials, weapon.clone())),
        None => Box::new(WeaponGenerator::new(&registry, &materials)),
    };

    for _ in 0..args.count {
        let weapon = generator.generate(&config, &mut rng)?;
        generator.validate(&weapon, &config)?;
        println!("{}", stats_line(&weapon, &config));
    }
    Ok(())
}

fn load_registry(args: &Args) -> TreasureResult<SpecRegistry> {
    let mut builder = catalog::standard_builder();
    if let Some(path) = &args.specs {
        info!("Loading specs from {}", path.display());
        builder = builder.declare_json(&std::fs::read_to_string(path)?)?;
    }
    builder.build()
}

fn load_materials(args: &Args) -> TreasureResult<MaterialCatalog> {
    let mut materials = catalog::standard_materials();
    if let Some(path) = &args.materials {
        info!("Loading materials from {}", path.display());
        materials.extend(MaterialCatalog::from_json_file(path)?);
    }
    Ok(materials)
}

fn stats_line(weapon: &ObjectInstance, config: &GenerationConfig) -> String {
    let material = weapon
        .nominal_material()
        .map_or("unknown material", |m| m.name.as_str());
    let damage = weapon.damage_rating().rounded(2);
    let speed = derived::speed(weapon, config.default_base_speed)
        .map_or_else(|| "-".to_string(), |s| round_to(s, 2).to_string());

    format!(
        "{} {} | crush {} pierce {} slice {} | weight {} | reach {} | speed {}",
        material,
        weapon.label(),
        damage.0[0],
        damage.0[1],
        damage.0[2],
        round_to(weapon.weight(), 2),
        round_to(weapon.reach(), 2),
        speed
    )
}
