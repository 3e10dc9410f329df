//! [`GetTable`]: the zero-input leaf operator that looks a base table up in
//! the registry. Every scan in a query plan starts from one of these.

use std::sync::Arc;

use crate::error::Result;
use crate::operator::{Memo, Operator};
use crate::registry::Registry;
use crate::table::Table;

pub struct GetTable {
    name: String,
    memo: Memo,
}

impl GetTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            memo: Memo::new(),
        }
    }
}

impl Operator for GetTable {
    fn execute(&self) -> Result<Arc<Table>> {
        self.memo.execute(|| Registry::get(&self.name))
    }

    fn output(&self) -> Result<Arc<Table>> {
        self.memo.output()
    }
}
