//! Terra - renders a noise terrain preview from `terra.json5`.

mod preview;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use terra_core::chunk::ChunkGeneratorKind;
use terra_core::config::TerraConfig;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Config file used when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "terra.json5";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config_path = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = TerraConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let seed = config.seed().unwrap_or_else(|| {
        let seed = rand::random();
        log::info!("No seed configured, picked {seed}");
        seed
    });
    log::info!(
        "Seed {seed}, {} noise, {} terrain",
        config.kernel,
        config.terrain.shape.name()
    );

    let start = Instant::now();
    let generator = ChunkGeneratorKind::from_config(&config, seed)
        .with_context(|| format!("building the {:?} generator", config.generator))?;
    log::info!("Generator ready in {:?}", start.elapsed());

    let start = Instant::now();
    let preview = preview::Preview::generate(&generator, &config.preview);
    tracing::info!(
        chunks = preview.chunk_count(),
        elapsed = ?start.elapsed(),
        "Generated preview chunks"
    );

    print!("{}", preview.render(config.terrain.sea_level));
    Ok(())
}
