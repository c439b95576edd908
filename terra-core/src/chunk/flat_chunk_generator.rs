use crate::chunk::{BlockKind, CHUNK_WIDTH, Chunk, ChunkGenerator};

/// A chunk generator that generates a flat world.
///
/// Every column is bedrock, two layers of dirt and a grass block, stacked on the
/// bottom layer. No noise is sampled.
#[derive(Debug, Clone, Copy)]
pub struct FlatChunkGenerator {
    min_y: i32,
    max_y: i32,
}

/// Layers from the bottom up.
const LAYERS: [BlockKind; 4] = [
    BlockKind::Bedrock,
    BlockKind::Dirt,
    BlockKind::Dirt,
    BlockKind::Grass,
];

impl FlatChunkGenerator {
    /// Creates a new `FlatChunkGenerator` for the given height range.
    #[must_use]
    pub fn new(min_y: i32, max_y: i32) -> Self {
        log::debug!("Flat generator covering y {min_y}..={max_y}");
        Self { min_y, max_y }
    }
}

impl ChunkGenerator for FlatChunkGenerator {
    fn min_y(&self) -> i32 {
        self.min_y
    }

    fn max_y(&self) -> i32 {
        self.max_y
    }

    fn fill_from_noise(&self, chunk: &mut Chunk) {
        let top = (self.min_y + LAYERS.len() as i32 - 1).min(self.max_y);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                for (y, block) in (self.min_y..=self.max_y).zip(LAYERS) {
                    chunk.set_block(x, y, z, block);
                }
                chunk.set_terrain_height(x, z, top);
            }
        }
    }

    fn build_surface(&self, _chunk: &mut Chunk) {}

    fn apply_carvers(&self, _chunk: &mut Chunk) {}
}
