//! Chunk storage and generation.

pub mod flat_chunk_generator;
pub mod noise_chunk_generator;

use enum_dispatch::enum_dispatch;

use crate::chunk::flat_chunk_generator::FlatChunkGenerator;
use crate::chunk::noise_chunk_generator::NoiseChunkGenerator;
use crate::config::{GeneratorType, TerraConfig};
use crate::worldgen::WorldgenError;

/// Width and depth of a chunk in blocks.
pub const CHUNK_WIDTH: usize = 16;

/// Columns per chunk.
const COLUMNS: usize = CHUNK_WIDTH * CHUNK_WIDTH;

/// Position of a chunk in chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    /// Chunk x coordinate.
    pub x: i32,
    /// Chunk z coordinate.
    pub z: i32,
}

impl ChunkPos {
    /// Creates a new `ChunkPos`.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World x of the block at local column `local_x`.
    #[must_use]
    pub const fn block_x(self, local_x: usize) -> i32 {
        self.x.wrapping_mul(CHUNK_WIDTH as i32).wrapping_add(local_x as i32)
    }

    /// World z of the block at local column `local_z`.
    #[must_use]
    pub const fn block_z(self, local_z: usize) -> i32 {
        self.z.wrapping_mul(CHUNK_WIDTH as i32).wrapping_add(local_z as i32)
    }
}

/// The blocks terra places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BlockKind {
    /// Empty space.
    #[default]
    Air,
    /// Unbreakable floor.
    Bedrock,
    /// Terrain body.
    Stone,
    /// Layer under the grass.
    Dirt,
    /// Top of dry land.
    Grass,
    /// Beaches and sea floor.
    Sand,
    /// Fills space below sea level.
    Water,
}

impl BlockKind {
    /// Stable numeric id, used for hashing chunk contents.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Whether the block is neither air nor water.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Air | Self::Water)
    }
}

/// A generated 16x16 column of blocks between `min_y` and `max_y` inclusive.
///
/// Blocks are stored y-major, then z, then x.
#[derive(Debug, Clone)]
pub struct Chunk {
    pos: ChunkPos,
    min_y: i32,
    height: usize,
    blocks: Box<[BlockKind]>,
    /// Terrain height per column as decided by the generator, before carving.
    heights: [i32; COLUMNS],
}

impl Chunk {
    /// Creates an all-air chunk.
    ///
    /// `max_y` must not be below `min_y`.
    #[must_use]
    pub fn new(pos: ChunkPos, min_y: i32, max_y: i32) -> Self {
        let height = (i64::from(max_y) - i64::from(min_y) + 1).max(1) as usize;
        Self {
            pos,
            min_y,
            height,
            blocks: vec![BlockKind::Air; COLUMNS * height].into_boxed_slice(),
            heights: [min_y; COLUMNS],
        }
    }

    /// The position of this chunk.
    #[must_use]
    pub const fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Lowest block layer.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Highest block layer.
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.min_y + self.height as i32 - 1
    }

    fn index(&self, x: usize, y: i32, z: usize) -> Option<usize> {
        if x >= CHUNK_WIDTH || z >= CHUNK_WIDTH || y < self.min_y || y > self.max_y() {
            return None;
        }
        let local_y = (y - self.min_y) as usize;
        Some((local_y * CHUNK_WIDTH + z) * CHUNK_WIDTH + x)
    }

    /// The block at local column `(x, z)` and world height `y`. Air outside the chunk.
    #[must_use]
    pub fn block(&self, x: usize, y: i32, z: usize) -> BlockKind {
        self.index(x, y, z)
            .map_or(BlockKind::Air, |index| self.blocks[index])
    }

    /// Sets a block. Positions outside the chunk are ignored.
    pub fn set_block(&mut self, x: usize, y: i32, z: usize, block: BlockKind) {
        if let Some(index) = self.index(x, y, z) {
            self.blocks[index] = block;
        }
    }

    /// Terrain height of a column, as recorded by the generator.
    #[must_use]
    pub fn terrain_height(&self, x: usize, z: usize) -> i32 {
        self.heights[z * CHUNK_WIDTH + x]
    }

    /// Records the terrain height of a column.
    pub fn set_terrain_height(&mut self, x: usize, z: usize, height: i32) {
        self.heights[z * CHUNK_WIDTH + x] = height;
    }

    /// The highest non-air block of a column and its height.
    #[must_use]
    pub fn top_block(&self, x: usize, z: usize) -> Option<(i32, BlockKind)> {
        (self.min_y..=self.max_y())
            .rev()
            .map(|y| (y, self.block(x, y, z)))
            .find(|(_, block)| *block != BlockKind::Air)
    }

    /// All blocks in storage order: y, then z, then x.
    #[must_use]
    pub fn blocks(&self) -> &[BlockKind] {
        &self.blocks
    }
}

/// Generates chunks in fixed stages.
///
/// Generators are immutable after construction and may be shared across threads.
#[enum_dispatch]
pub trait ChunkGenerator: Send + Sync {
    /// Lowest block layer of generated chunks.
    fn min_y(&self) -> i32;

    /// Highest block layer of generated chunks.
    fn max_y(&self) -> i32;

    /// Places the terrain body and records column heights.
    fn fill_from_noise(&self, chunk: &mut Chunk);

    /// Replaces the top of each column with surface blocks.
    fn build_surface(&self, chunk: &mut Chunk);

    /// Carves caves out of the terrain.
    fn apply_carvers(&self, chunk: &mut Chunk);

    /// Runs every stage on a fresh chunk at `pos`.
    fn generate(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new(pos, self.min_y(), self.max_y());
        self.fill_from_noise(&mut chunk);
        self.build_surface(&mut chunk);
        self.apply_carvers(&mut chunk);
        chunk
    }
}

/// A chunk generator chosen at runtime.
#[enum_dispatch(ChunkGenerator)]
pub enum ChunkGeneratorKind {
    /// Fixed layers.
    Flat(FlatChunkGenerator),
    /// Noise-driven terrain.
    Noise(NoiseChunkGenerator),
}

impl ChunkGeneratorKind {
    /// Builds the generator selected by `config` for the given seed.
    pub fn from_config(config: &TerraConfig, seed: u64) -> Result<Self, WorldgenError> {
        let terrain = &config.terrain;
        Ok(match config.generator {
            GeneratorType::Flat => FlatChunkGenerator::new(terrain.min_y, terrain.max_y).into(),
            GeneratorType::Noise => NoiseChunkGenerator::new(seed, config.kernel, terrain)?.into(),
        })
    }
}
