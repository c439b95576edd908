//! ASCII rendering of a square of generated chunks.

use terra_core::chunk::{BlockKind, CHUNK_WIDTH, ChunkGenerator, ChunkPos};
use terra_core::config::PreviewConfig;

/// Top block of every column in the preview square, row-major with z as the row.
pub struct Preview {
    side: usize,
    columns: Vec<Option<(i32, BlockKind)>>,
    chunk_count: usize,
}

impl Preview {
    /// Generates every chunk within `config.radius` of the center chunk.
    pub fn generate<G: ChunkGenerator>(generator: &G, config: &PreviewConfig) -> Self {
        let radius = config.radius.max(0);
        let chunks_per_side = (2 * radius + 1) as usize;
        let side = chunks_per_side * CHUNK_WIDTH;
        let mut columns = vec![None; side * side];

        for (chunk_row, dz) in (-radius..=radius).enumerate() {
            for (chunk_col, dx) in (-radius..=radius).enumerate() {
                let pos = ChunkPos::new(config.center_chunk_x + dx, config.center_chunk_z + dz);
                let chunk = generator.generate(pos);
                log::debug!("Generated chunk ({}, {})", pos.x, pos.z);

                for z in 0..CHUNK_WIDTH {
                    let row = chunk_row * CHUNK_WIDTH + z;
                    for x in 0..CHUNK_WIDTH {
                        let col = chunk_col * CHUNK_WIDTH + x;
                        columns[row * side + col] = chunk.top_block(x, z);
                    }
                }
            }
        }

        Self {
            side,
            columns,
            chunk_count: chunks_per_side * chunks_per_side,
        }
    }

    /// Number of chunks generated.
    pub const fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// One character per column, one line per row of columns.
    pub fn render(&self, sea_level: i32) -> String {
        let mut out = String::with_capacity((self.side + 1) * self.side);
        for row in self.columns.chunks(self.side) {
            for column in row {
                out.push(glyph(*column, sea_level));
            }
            out.push('\n');
        }
        out
    }
}

/// Water, beach and stone get fixed glyphs; grass is shaded by height above sea level.
fn glyph(column: Option<(i32, BlockKind)>, sea_level: i32) -> char {
    let Some((height, block)) = column else {
        return ' ';
    };
    match block {
        BlockKind::Water => '~',
        BlockKind::Sand => '.',
        BlockKind::Bedrock => '_',
        BlockKind::Stone => '#',
        BlockKind::Air => ' ',
        BlockKind::Dirt | BlockKind::Grass => match height - sea_level {
            ..4 => ',',
            4..12 => ':',
            12..20 => '+',
            _ => '^',
        },
    }
}
