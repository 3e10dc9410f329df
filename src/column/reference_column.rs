//! [`ReferenceColumn`]: a non-owning column that resolves values by
//! dereferencing a shared position list into a base table. This is the
//! pipeline's currency — operators pass reference columns downstream instead
//! of copying data.

use std::sync::Arc;

use crate::ids::PosList;
use crate::table::Table;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct ReferenceColumn {
    referenced_table: Arc<Table>,
    referenced_column_id: usize,
    pos_list: Arc<PosList>,
}

impl ReferenceColumn {
    pub fn new(referenced_table: Arc<Table>, referenced_column_id: usize, pos_list: Arc<PosList>) -> Self {
        Self {
            referenced_table,
            referenced_column_id,
            pos_list,
        }
    }

    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    pub fn referenced_column_id(&self) -> usize {
        self.referenced_column_id
    }

    pub fn pos_list(&self) -> &Arc<PosList> {
        &self.pos_list
    }

    pub fn element_at(&self, i: usize) -> Value {
        let row_id = self.pos_list[i];
        self.referenced_table
            .chunk(row_id.chunk_id)
            .column(self.referenced_column_id)
            .element_at(row_id.chunk_offset)
    }

    pub fn size(&self) -> usize {
        self.pos_list.len()
    }
}
