//! The operator framework: a query is a tree of [`Operator`] nodes, each
//! consuming 0-2 input tables and producing one output table on `execute`.
//!
//! Grounded on `physical_plan::PhysicalOperator`'s `next()`-pull trait, but
//! reshaped to a one-shot push/memoize model — this engine's `execute()`
//! materializes a whole table per call rather than yielding tuples one at a
//! time, so a `next()`-style iterator has no home here.

pub mod get_table;
pub mod print;
pub mod table_scan;

use std::cell::RefCell;
use std::sync::Arc;

pub use get_table::GetTable;
pub use print::Print;
pub use table_scan::{ScanType, TableScan};

use crate::error::{Error, Result};
use crate::table::Table;

/// A node in a query plan. `execute` runs the operator exactly once; any
/// later call fails [`Error::DoubleExecute`] rather than re-running or
/// silently returning the cached table, matching the "rebuilt per query"
/// lifecycle spec.md assumes for operator trees.
pub trait Operator {
    fn execute(&self) -> Result<Arc<Table>>;

    /// The table memoized by a prior `execute()`. Fails
    /// [`Error::PrematureAccess`] if `execute` has not run yet. Concrete
    /// operators with inputs call this on their child operator(s) — it is
    /// `input_table_left`/`input_table_right` from spec.md §4.6, named
    /// `output` here so it reads the same whether called by a parent
    /// operator or by an external driver.
    fn output(&self) -> Result<Arc<Table>>;
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Pending,
    Done(Arc<Table>),
}

/// The one-shot memoization cell each concrete operator embeds. Centralizes
/// the `Pending`/`Done` bookkeeping so `GetTable`/`Print`/`TableScan` only
/// need to supply the closure that actually computes their output.
#[derive(Debug, Default)]
pub(crate) struct Memo(RefCell<State>);

impl Memo {
    pub(crate) fn new() -> Self {
        Self(RefCell::new(State::Pending))
    }

    /// Runs `f` and memoizes its result. Fails `DoubleExecute` if this memo
    /// already holds a result — `f` is not invoked in that case.
    pub(crate) fn execute(&self, f: impl FnOnce() -> Result<Arc<Table>>) -> Result<Arc<Table>> {
        if matches!(*self.0.borrow(), State::Done(_)) {
            return Err(Error::DoubleExecute);
        }
        let table = f()?;
        *self.0.borrow_mut() = State::Done(Arc::clone(&table));
        Ok(table)
    }

    pub(crate) fn output(&self) -> Result<Arc<Table>> {
        match &*self.0.borrow() {
            State::Done(table) => Ok(Arc::clone(table)),
            State::Pending => Err(Error::PrematureAccess),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Probe(Memo);

    impl Operator for Probe {
        fn execute(&self) -> Result<Arc<Table>> {
            self.0.execute(|| Ok(Arc::new(Table::new(0))))
        }

        fn output(&self) -> Result<Arc<Table>> {
            self.0.output()
        }
    }

    #[test]
    fn premature_access_before_execute() {
        let op = Probe(Memo::new());
        assert_eq!(op.output(), Err(Error::PrematureAccess));
    }

    #[test]
    fn double_execute_fails_on_rerun() {
        let op = Probe(Memo::new());
        op.execute().unwrap();
        assert_eq!(op.execute(), Err(Error::DoubleExecute));
        assert!(op.output().is_ok());
    }
}
