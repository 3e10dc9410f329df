//! End-to-end pipeline test: register a base table, scan it through two
//! composed `TableScan`s, and print the result. Exercises the same path a
//! caller driving the engine from outside the crate would use, and installs
//! a `tracing` subscriber so `RUST_LOG=trace cargo test` surfaces the
//! per-chunk branch/short-circuit instrumentation `table_scan` emits.

use columnstore::operator::{GetTable, Operator, Print, ScanType, TableScan};
use columnstore::registry::Registry;
use columnstore::table::Table;
use columnstore::value::Value;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn scan_then_scan_then_print_round_trips_through_the_registry() {
    init_tracing();
    Registry::reset();

    let mut table = Table::new(2);
    table.add_column("id", "int").unwrap();
    table.add_column("name", "string").unwrap();
    for (id, name) in [(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")] {
        table.append(&[Value::Int32(id), Value::Utf8(name.to_string())]).unwrap();
    }
    table.compress_chunk(0).unwrap();
    Registry::add("people", table).unwrap();

    let get = Box::new(GetTable::new("people"));
    let over_two = Box::new(TableScan::new(get, 0, ScanType::Gt, Value::Int32(2)));
    let under_five = TableScan::new(over_two, 0, ScanType::Lt, Value::Int32(5));

    let mut out = Vec::new();
    let print = Print::new(Box::new(under_five), &mut out);
    let result = print.execute().unwrap();

    assert_eq!(result.row_count(), 2);
    let ids: Vec<i32> = (0..result.row_count())
        .map(|i| result.chunk(0).column(0).element_at(i).as_i32().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4]);

    Registry::reset();
}
