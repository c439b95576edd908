use crate::chunk::{BlockKind, CHUNK_WIDTH, Chunk, ChunkGenerator};
use crate::config::TerrainSettings;
use crate::worldgen::{HeightSampler, WorldgenError};
use terra_utils::noise::KernelType;

/// Depth of the dirt layer under grass and of the sand layer on beaches.
const SURFACE_DEPTH: i32 = 3;

/// Columns whose top is at most this far above sea level become beaches.
const BEACH_HEIGHT: i32 = 1;

/// A chunk generator driven by a [`HeightSampler`].
///
/// Stages run in order: stone up to the column height with water filling up to sea
/// level, then grass/dirt or sand on top, then cave carving.
#[derive(Debug, Clone)]
pub struct NoiseChunkGenerator {
    sampler: HeightSampler,
}

impl NoiseChunkGenerator {
    /// Creates a new `NoiseChunkGenerator`.
    pub fn new(
        seed: u64,
        kernel_type: KernelType,
        settings: &TerrainSettings,
    ) -> Result<Self, WorldgenError> {
        let sampler = HeightSampler::new(seed, kernel_type, settings)?;
        log::debug!("Noise generator ready (caves: {})", sampler.has_caves());
        Ok(Self { sampler })
    }

    /// The sampler behind this generator.
    #[must_use]
    pub const fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }
}

impl ChunkGenerator for NoiseChunkGenerator {
    fn min_y(&self) -> i32 {
        self.sampler.settings().min_y
    }

    fn max_y(&self) -> i32 {
        self.sampler.settings().max_y
    }

    fn fill_from_noise(&self, chunk: &mut Chunk) {
        let pos = chunk.pos();
        let min_y = self.min_y();
        let max_y = self.max_y();
        let sea_level = self.sampler.settings().sea_level;

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let height = self.sampler.column_height(pos.block_x(x), pos.block_z(z));
                chunk.set_terrain_height(x, z, height);

                chunk.set_block(x, min_y, z, BlockKind::Bedrock);
                for y in (min_y + 1)..=height {
                    chunk.set_block(x, y, z, BlockKind::Stone);
                }
                for y in (height + 1).max(min_y + 1)..=sea_level.min(max_y) {
                    chunk.set_block(x, y, z, BlockKind::Water);
                }
            }
        }
    }

    fn build_surface(&self, chunk: &mut Chunk) {
        let sea_level = self.sampler.settings().sea_level;

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let height = chunk.terrain_height(x, z);
                let beach = height <= sea_level + BEACH_HEIGHT;

                for depth in 0..SURFACE_DEPTH {
                    let y = height - depth;
                    if chunk.block(x, y, z) != BlockKind::Stone {
                        continue;
                    }
                    let block = match (beach, depth) {
                        (true, _) => BlockKind::Sand,
                        (false, 0) => BlockKind::Grass,
                        (false, _) => BlockKind::Dirt,
                    };
                    chunk.set_block(x, y, z, block);
                }
            }
        }
    }

    fn apply_carvers(&self, chunk: &mut Chunk) {
        if !self.sampler.has_caves() {
            return;
        }
        let pos = chunk.pos();
        let min_y = self.min_y();
        let sea_level = self.sampler.settings().sea_level;

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let height = chunk.terrain_height(x, z);
                // Carving under the sea would leave water floating over air
                if height <= sea_level {
                    continue;
                }
                let block_x = pos.block_x(x);
                let block_z = pos.block_z(z);
                for y in (min_y + 1)..=height {
                    if chunk.block(x, y, z).is_solid() && self.sampler.is_cave(block_x, y, block_z)
                    {
                        chunk.set_block(x, y, z, BlockKind::Air);
                    }
                }
            }
        }
    }
}
