//! Tile index maps
//!
//! A [`TileIndexMap`] is a dense grid of atlas tile indices. Storage is
//! row-major and zero-based: the cell at `(column, row)` lives at offset
//! `column + column_count * row`. The value [`EMPTY_TILE`] (0) marks a cell
//! with nothing to draw.
//!
//! Maps are immutable once built; loading them from disk is the resource
//! loader's concern.

use thiserror::Error;

/// Sentinel tile index for "no tile here"
pub const EMPTY_TILE: u32 = 0;

/// Tile index map errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileIndexMapError {
    /// Grid coordinates outside the map
    #[error("Tile coordinates ({column}, {row}) outside {column_count}x{line_count} map")]
    OutOfRange {
        /// Requested column
        column: u32,
        /// Requested row
        row: u32,
        /// Map width in tiles
        column_count: u32,
        /// Map height in tiles
        line_count: u32,
    },

    /// Linear offset outside the map
    #[error("Tile offset {offset} outside map of {count} tiles")]
    OffsetOutOfRange {
        /// Requested offset
        offset: usize,
        /// Number of tiles in the map
        count: usize,
    },

    /// Index data does not match the declared dimensions
    #[error("Tile index data has {actual} entries, expected {expected}")]
    SizeMismatch {
        /// `column_count * line_count`
        expected: usize,
        /// Length of the supplied data
        actual: usize,
    },
}

/// Immutable dense grid of tile indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIndexMap {
    name: String,
    column_count: u32,
    line_count: u32,
    tile_indexes: Vec<u32>,
}

impl TileIndexMap {
    /// Build a map from row-major index data
    ///
    /// # Errors
    /// [`TileIndexMapError::SizeMismatch`] if `tile_indexes.len()` differs from
    /// `column_count * line_count`.
    pub fn new(
        name: impl Into<String>,
        column_count: u32,
        line_count: u32,
        tile_indexes: Vec<u32>,
    ) -> Result<Self, TileIndexMapError> {
        let expected = column_count as usize * line_count as usize;
        if tile_indexes.len() != expected {
            return Err(TileIndexMapError::SizeMismatch {
                expected,
                actual: tile_indexes.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            column_count,
            line_count,
            tile_indexes,
        })
    }

    /// Build a map from a list of equally long rows
    pub fn from_rows(name: impl Into<String>, rows: &[&[u32]]) -> Result<Self, TileIndexMapError> {
        let column_count = rows.first().map_or(0, |row| row.len());
        let line_count = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != column_count) {
            return Err(TileIndexMapError::SizeMismatch {
                expected: column_count,
                actual: row.len(),
            });
        }

        let tile_indexes = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self::new(name, to_u32(column_count), to_u32(line_count), tile_indexes)
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Map width in tiles
    pub const fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Map height in tiles
    pub const fn line_count(&self) -> u32 {
        self.line_count
    }

    /// `column_count * line_count`
    pub fn tile_indexes_count(&self) -> usize {
        self.tile_indexes.len()
    }

    /// Row-major tile index data
    pub fn tile_indexes(&self) -> &[u32] {
        &self.tile_indexes
    }

    /// Tile index stored at `(column, row)`
    pub fn tile_index(&self, column: u32, row: u32) -> Result<u32, TileIndexMapError> {
        let offset = self.offset_of(column, row)?;
        Ok(self.tile_indexes[offset])
    }

    /// Linear offset of `(column, row)`
    pub fn offset_of(&self, column: u32, row: u32) -> Result<usize, TileIndexMapError> {
        if column >= self.column_count || row >= self.line_count {
            return Err(TileIndexMapError::OutOfRange {
                column,
                row,
                column_count: self.column_count,
                line_count: self.line_count,
            });
        }
        Ok(column as usize + self.column_count as usize * row as usize)
    }

    /// Grid coordinates `(column, row)` of a linear offset
    pub fn coordinates_of(&self, offset: usize) -> Result<(u32, u32), TileIndexMapError> {
        if offset >= self.tile_indexes.len() {
            return Err(TileIndexMapError::OffsetOutOfRange {
                offset,
                count: self.tile_indexes.len(),
            });
        }
        let columns = self.column_count as usize;
        Ok((to_u32(offset % columns), to_u32(offset / columns)))
    }

    /// Number of cells holding a tile
    pub fn non_empty_count(&self) -> usize {
        self.tile_indexes.iter().filter(|&&index| index != EMPTY_TILE).count()
    }

    /// Whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.non_empty_count() == 0
    }

    /// Largest tile index used by the map
    pub fn max_tile_index(&self) -> Option<u32> {
        self.tile_indexes.iter().copied().max()
    }
}

// Dimensions are constructed from u32 values, so the conversion back cannot fail.
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> TileIndexMap {
        // 4 columns, 3 lines
        TileIndexMap::new("sample", 4, 3, (0..12).collect()).unwrap()
    }

    #[test]
    fn test_row_major_addressing() {
        let map = sample_map();

        for row in 0..map.line_count() {
            for column in 0..map.column_count() {
                assert_eq!(map.tile_index(column, row).unwrap(), column + 4 * row);
            }
        }
    }

    #[test]
    fn test_out_of_range_addressing_is_reported() {
        let map = sample_map();

        assert_eq!(
            map.tile_index(4, 0),
            Err(TileIndexMapError::OutOfRange {
                column: 4,
                row: 0,
                column_count: 4,
                line_count: 3,
            })
        );
        assert!(map.tile_index(0, 3).is_err());
        assert!(map.tile_index(u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let result = TileIndexMap::new("bad", 4, 3, vec![0; 11]);
        assert_eq!(
            result,
            Err(TileIndexMapError::SizeMismatch {
                expected: 12,
                actual: 11,
            })
        );
    }

    #[test]
    fn test_from_rows() {
        let map = TileIndexMap::from_rows("rows", &[&[1, 0, 2], &[0, 0, 3]]).unwrap();

        assert_eq!(map.column_count(), 3);
        assert_eq!(map.line_count(), 2);
        assert_eq!(map.tile_index(2, 1).unwrap(), 3);
        assert_eq!(map.non_empty_count(), 3);
        assert_eq!(map.max_tile_index(), Some(3));

        assert!(TileIndexMap::from_rows("ragged", &[&[1, 2], &[3]]).is_err());
    }

    #[test]
    fn test_coordinates_invert_offsets() {
        let map = sample_map();

        assert_eq!(map.coordinates_of(5).unwrap(), (1, 1));
        assert_eq!(map.offset_of(1, 1).unwrap(), 5);
        assert!(matches!(
            map.coordinates_of(12),
            Err(TileIndexMapError::OffsetOutOfRange { offset: 12, count: 12 })
        ));
    }

    #[test]
    fn test_empty_map() {
        let map = TileIndexMap::new("void", 3, 3, vec![EMPTY_TILE; 9]).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.tile_indexes_count(), 9);
    }
}
