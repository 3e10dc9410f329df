//! Row and dictionary addressing: [`ChunkId`]/[`RowId`]/[`PosList`] identify
//! rows, [`ValueId`] indexes into a dictionary.

/// Index of a chunk within a table's chunk list.
pub type ChunkId = usize;

/// A non-negative index into a dictionary column's `dictionary` vector. The
/// maximum representable value of the storage width in use is reserved as
/// [`INVALID_VALUE_ID`]; see [`crate::attribute_vector`] for the
/// width-relative sentinel.
pub type ValueId = u32;

/// Sentinel used when a `ValueId` is carried in a `u32`-wide slot with no
/// narrower width in play (e.g. as a function return value before it is
/// narrowed into an attribute vector). Smaller widths use their own
/// type's maximum, handled by [`crate::attribute_vector::is_invalid`].
pub const INVALID_VALUE_ID: ValueId = u32::MAX;

/// Identifies a single row within a table: which chunk, and the row's
/// offset within that chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: usize,
}

impl RowId {
    pub fn new(chunk_id: ChunkId, chunk_offset: usize) -> Self {
        Self {
            chunk_id,
            chunk_offset,
        }
    }
}

/// An ordered sequence of [`RowId`]s, all referring to the same logical base
/// table. Duplicates are permitted; order defines the row order of the
/// enclosing result.
pub type PosList = Vec<RowId>;
