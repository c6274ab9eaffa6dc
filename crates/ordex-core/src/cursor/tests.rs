use crate::{
    codec::{KeyBuf, SortCodec, ValueCodec},
    cursor::{MixedOrderCursor, RowCursor, UnidirectionalCursor},
    error::ErrorClass,
    obs,
    ordering::{SortColumn, SortOrdering},
    range::{ColumnSelector, IndexKeyRange, RangeBound},
    row::{Row, RowShape},
    store::{MemoryScan, MemoryStore},
    value::{Value, ValueType},
};

fn asc(field: usize) -> SortColumn {
    SortColumn::asc(field, ValueType::Int)
}

fn desc(field: usize) -> SortColumn {
    SortColumn::desc(field, ValueType::Int)
}

fn int_row(values: &[i64]) -> Row {
    Row::new(values.iter().map(|&v| Value::Int(v)).collect())
}

fn int_shape(width: usize) -> RowShape {
    RowShape::new(vec![ValueType::Int; width])
}

/// Index every row under the ordering's plain segment encoding, the way
/// an index maintainer would.
fn seed(store: &MemoryStore, ordering: &SortOrdering, rows: &[Row]) {
    for row in rows {
        let mut key = KeyBuf::new();
        for column in ordering.columns() {
            let value = ValueCodec
                .value_at(row, column.field)
                .expect("fixture row should cover the ordering");
            ValueCodec
                .append_value(&mut key, value, column)
                .expect("fixture segment should encode");
        }

        let record = ValueCodec
            .encode_row(row)
            .expect("fixture row should encode");
        store
            .insert(key.into_bytes(), record)
            .expect("fixture record should fit the store");
    }
}

fn unidirectional(
    store: &MemoryStore,
    ordering: SortOrdering,
    shape: RowShape,
    range: IndexKeyRange<Row>,
) -> UnidirectionalCursor<ValueCodec, MemoryScan> {
    UnidirectionalCursor::new(ValueCodec, store.scan(), ordering, shape, range)
        .expect("cursor should construct")
}

fn mixed_order(
    store: &MemoryStore,
    ordering: SortOrdering,
    shape: RowShape,
    range: IndexKeyRange<Row>,
) -> MixedOrderCursor<ValueCodec, MemoryScan> {
    MixedOrderCursor::new(ValueCodec, store.scan(), ordering, shape, range)
        .expect("cursor should construct")
}

fn drain(cursor: &mut impl RowCursor<Row = Row>) -> Vec<Row> {
    let mut rows = Vec::new();
    while let Some(row) = cursor.next().expect("cursor next should succeed") {
        rows.push(row);
    }

    rows
}

fn int_range(
    bound_columns: usize,
    lo: &[i64],
    lo_inclusive: bool,
    hi: &[i64],
    hi_inclusive: bool,
) -> IndexKeyRange<Row> {
    let selector = ColumnSelector::leading(bound_columns);

    IndexKeyRange::new(
        bound_columns,
        RangeBound::new(int_row(lo), selector, lo_inclusive),
        RangeBound::new(int_row(hi), selector, hi_inclusive),
    )
    .expect("range should build")
}

#[test]
fn full_scan_yields_every_row_in_declared_order() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[3]), int_row(&[1]), int_row(&[2])]);

    let mut cursor = unidirectional(&store, ordering, int_shape(1), IndexKeyRange::unbounded());
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[1]), int_row(&[2]), int_row(&[3])]
    );
    // Exhaustion is sticky.
    assert_eq!(cursor.next().expect("drained cursor should stay quiet"), None);
}

#[test]
fn descending_ordering_walks_the_store_backward() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![desc(0)]);
    seed(&store, &ordering, &[int_row(&[1]), int_row(&[3]), int_row(&[2])]);

    let mut cursor = unidirectional(&store, ordering, int_shape(1), IndexKeyRange::unbounded());
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[3]), int_row(&[2]), int_row(&[1])]
    );
}

#[test]
fn bounded_range_respects_inclusive_and_exclusive_edges() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    let rows: Vec<Row> = (1..=6).map(|v| int_row(&[v])).collect();
    seed(&store, &ordering, &rows);

    let range = int_range(1, &[2], true, &[5], false);
    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[2]), int_row(&[3]), int_row(&[4])]
    );
}

#[test]
fn exclusive_lower_edge_starts_past_the_edge_subtree() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    let rows: Vec<Row> = (1..=6).map(|v| int_row(&[v])).collect();
    seed(&store, &ordering, &rows);

    let range = int_range(1, &[2], false, &[5], true);
    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[3]), int_row(&[4]), int_row(&[5])]
    );
}

#[test]
fn point_range_isolates_one_key() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[1]), int_row(&[3]), int_row(&[9])]);

    let range = int_range(1, &[3], true, &[3], true);
    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    cursor.open().expect("cursor should open");

    assert_eq!(drain(&mut cursor), vec![int_row(&[3])]);
}

#[test]
fn empty_range_opens_exhausted_and_close_is_final() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[1]), int_row(&[9])]);

    let range = int_range(1, &[4], true, &[5], true);
    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    cursor.open().expect("empty ranges still open");
    assert_eq!(cursor.next().expect("exhausted cursor should stay quiet"), None);

    cursor.close();
    let err = cursor
        .next()
        .expect_err("next after an explicit close should fail");
    assert_eq!(err.class, ErrorClass::InvariantViolation);
}

#[test]
fn inclusive_null_lower_edge_admits_the_null_row() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    let rows = vec![
        Row::new(vec![Value::Null]),
        int_row(&[1]),
        int_row(&[2]),
        int_row(&[3]),
        int_row(&[5]),
    ];
    seed(&store, &ordering, &rows);

    let selector = ColumnSelector::leading(1);
    let range = IndexKeyRange::new(
        1,
        RangeBound::inclusive(Row::new(vec![Value::Null]), selector),
        RangeBound::inclusive(int_row(&[3]), selector),
    )
    .expect("range should build");

    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![
            Row::new(vec![Value::Null]),
            int_row(&[1]),
            int_row(&[2]),
            int_row(&[3]),
        ]
    );
}

#[test]
fn exclusive_null_upper_edge_reads_to_the_end() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    let rows = vec![
        Row::new(vec![Value::Null]),
        int_row(&[1]),
        int_row(&[2]),
        int_row(&[5]),
    ];
    seed(&store, &ordering, &rows);

    let selector = ColumnSelector::leading(1);
    let range = IndexKeyRange::new(
        1,
        RangeBound::inclusive(int_row(&[2]), selector),
        RangeBound::exclusive(Row::new(vec![Value::Null]), selector),
    )
    .expect("range should build");

    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    cursor.open().expect("cursor should open");

    assert_eq!(drain(&mut cursor), vec![int_row(&[2]), int_row(&[5])]);
}

#[test]
fn inclusive_null_upper_edge_over_a_value_fails_at_open() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[1])]);

    let selector = ColumnSelector::leading(1);
    let range = IndexKeyRange::new(
        1,
        RangeBound::inclusive(int_row(&[1]), selector),
        RangeBound::inclusive(Row::new(vec![Value::Null]), selector),
    )
    .expect("range should build");

    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    let err = cursor.open().expect_err("the bound pair is unsatisfiable");
    assert_eq!(err.class, ErrorClass::InvalidBound);
}

#[test]
fn fixed_prefix_pins_equality_columns() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), asc(1)]);
    let rows = vec![
        int_row(&[1, 99]),
        int_row(&[2, 10]),
        int_row(&[2, 20]),
        int_row(&[2, 30]),
        int_row(&[2, 40]),
        int_row(&[3, 0]),
    ];
    seed(&store, &ordering, &rows);

    let range = int_range(2, &[2, 10], true, &[2, 30], true);
    let mut cursor = unidirectional(&store, ordering, int_shape(2), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[2, 10]), int_row(&[2, 20]), int_row(&[2, 30])]
    );
}

#[test]
fn per_column_range_rejects_an_unequal_prefix() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), asc(1)]);
    seed(&store, &ordering, &[int_row(&[1, 1])]);

    let range = int_range(2, &[1, 10], true, &[2, 30], true);
    let mut cursor = unidirectional(&store, ordering, int_shape(2), range);

    let err = cursor
        .open()
        .expect_err("prefix columns must bind one value");
    assert_eq!(err.class, ErrorClass::InvalidBound);
}

#[test]
fn range_wider_than_the_ordering_fails_at_open() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[1, 1])]);

    let range = int_range(2, &[1, 10], true, &[1, 30], true);

    let mut linear = unidirectional(&store, ordering.clone(), int_shape(2), range.clone());
    let err = linear.open().expect_err("two bound columns need two ordering columns");
    assert_eq!(err.class, ErrorClass::InvalidBound);

    let mut nested = mixed_order(&store, ordering, int_shape(2), range);
    let err = nested.open().expect_err("two bound columns need two ordering columns");
    assert_eq!(err.class, ErrorClass::InvalidBound);
}

#[test]
fn lexicographic_range_orders_bound_columns_as_a_tuple() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), asc(1)]);
    let rows = vec![
        int_row(&[1, 4]),
        int_row(&[1, 5]),
        int_row(&[1, 9]),
        int_row(&[2, 2]),
        int_row(&[2, 3]),
        int_row(&[2, 4]),
    ];
    seed(&store, &ordering, &rows);

    let selector = ColumnSelector::leading(2);
    let range = IndexKeyRange::lexicographic(
        2,
        RangeBound::inclusive(int_row(&[1, 5]), selector),
        RangeBound::inclusive(int_row(&[2, 3]), selector),
    )
    .expect("range should build");

    let mut cursor = unidirectional(&store, ordering, int_shape(2), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![
            int_row(&[1, 5]),
            int_row(&[1, 9]),
            int_row(&[2, 2]),
            int_row(&[2, 3]),
        ]
    );
}

#[test]
fn lexicographic_end_gap_leaves_the_tuple_tail_open() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), asc(1)]);
    let rows = vec![
        int_row(&[1, 4]),
        int_row(&[1, 5]),
        int_row(&[2, 3]),
        int_row(&[2, 9]),
        int_row(&[3, 0]),
    ];
    seed(&store, &ordering, &rows);

    // The end bound fills only the leading column, so every (2, *) tuple
    // stays inside the range.
    let range = IndexKeyRange::lexicographic(
        2,
        RangeBound::inclusive(int_row(&[1, 5]), ColumnSelector::leading(2)),
        RangeBound::inclusive(int_row(&[2, 0]), ColumnSelector::leading(1)),
    )
    .expect("range should build");

    let mut cursor = unidirectional(&store, ordering, int_shape(2), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[1, 5]), int_row(&[2, 3]), int_row(&[2, 9])]
    );
}

#[test]
fn descending_lexicographic_range_walks_backward() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![desc(0), desc(1)]);
    let rows = vec![
        int_row(&[1, 4]),
        int_row(&[1, 5]),
        int_row(&[1, 9]),
        int_row(&[2, 2]),
        int_row(&[2, 3]),
        int_row(&[2, 4]),
    ];
    seed(&store, &ordering, &rows);

    let selector = ColumnSelector::leading(2);
    let range = IndexKeyRange::lexicographic(
        2,
        RangeBound::inclusive(int_row(&[1, 5]), selector),
        RangeBound::inclusive(int_row(&[2, 3]), selector),
    )
    .expect("range should build");

    let mut cursor = unidirectional(&store, ordering, int_shape(2), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![
            int_row(&[2, 3]),
            int_row(&[2, 2]),
            int_row(&[1, 9]),
            int_row(&[1, 5]),
        ]
    );
}

#[test]
fn use_before_open_and_reopen_are_invariant_errors() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[1])]);

    let mut cursor = unidirectional(&store, ordering, int_shape(1), IndexKeyRange::unbounded());

    let err = cursor.next().expect_err("next before open should fail");
    assert_eq!(err.class, ErrorClass::InvariantViolation);

    cursor.open().expect("cursor should open");
    let err = cursor.open().expect_err("reopen should fail");
    assert_eq!(err.class, ErrorClass::InvariantViolation);
}

#[test]
fn jump_repositions_a_scan_in_flight() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    let rows: Vec<Row> = (1..=9).map(|v| int_row(&[v])).collect();
    seed(&store, &ordering, &rows);

    let mut cursor = unidirectional(
        &store,
        ordering,
        int_shape(1),
        IndexKeyRange::unbounded(),
    );
    cursor.open().expect("cursor should open");
    assert_eq!(
        cursor.next().expect("cursor next should succeed"),
        Some(int_row(&[1]))
    );

    cursor
        .jump(&int_row(&[5]), ColumnSelector::leading(1))
        .expect("jump should reposition");

    assert_eq!(
        drain(&mut cursor),
        (5..=9).map(|v| int_row(&[v])).collect::<Vec<_>>()
    );
}

#[test]
fn jump_with_a_partial_selector_lands_at_the_column_start() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), asc(1)]);
    let rows = vec![
        int_row(&[1, 7]),
        int_row(&[2, 9]),
        int_row(&[3, 4]),
        int_row(&[3, 8]),
        int_row(&[4, 0]),
    ];
    seed(&store, &ordering, &rows);

    let mut cursor = unidirectional(
        &store,
        ordering,
        int_shape(2),
        IndexKeyRange::unbounded(),
    );
    cursor.open().expect("cursor should open");
    assert_eq!(
        cursor.next().expect("cursor next should succeed"),
        Some(int_row(&[1, 7]))
    );

    // Only the leading column is filled; the second reads as open, so the
    // jump lands on the first (3, *) row.
    cursor
        .jump(&int_row(&[3, 999]), ColumnSelector::single(0))
        .expect("jump should reposition");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[3, 4]), int_row(&[3, 8]), int_row(&[4, 0])]
    );
}

#[test]
fn descending_jump_lands_at_or_below_the_target() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![desc(0)]);
    let rows: Vec<Row> = (1..=9).map(|v| int_row(&[v])).collect();
    seed(&store, &ordering, &rows);

    let mut cursor = unidirectional(
        &store,
        ordering,
        int_shape(1),
        IndexKeyRange::unbounded(),
    );
    cursor.open().expect("cursor should open");
    assert_eq!(
        cursor.next().expect("cursor next should succeed"),
        Some(int_row(&[9]))
    );

    cursor
        .jump(&int_row(&[5]), ColumnSelector::leading(1))
        .expect("jump should reposition");

    assert_eq!(
        drain(&mut cursor),
        (1..=5).rev().map(|v| int_row(&[v])).collect::<Vec<_>>()
    );
}

#[test]
fn jump_past_the_end_exhausts_the_cursor() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    let rows: Vec<Row> = (1..=9).map(|v| int_row(&[v])).collect();
    seed(&store, &ordering, &rows);

    let range = int_range(1, &[1], true, &[5], true);
    let mut cursor = unidirectional(&store, ordering, int_shape(1), range);
    cursor.open().expect("cursor should open");

    cursor
        .jump(&int_row(&[8]), ColumnSelector::leading(1))
        .expect("jump past the end is not an error");
    assert_eq!(cursor.next().expect("exhausted cursor should stay quiet"), None);
}

#[test]
fn jump_requires_an_open_cursor() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[1])]);

    let mut cursor = unidirectional(&store, ordering, int_shape(1), IndexKeyRange::unbounded());

    let err = cursor
        .jump(&int_row(&[1]), ColumnSelector::leading(1))
        .expect_err("jump before open should fail");
    assert_eq!(err.class, ErrorClass::InvariantViolation);
}

#[test]
fn mixed_order_cursor_interleaves_column_directions() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), desc(1)]);
    let rows = vec![int_row(&[1, 3]), int_row(&[1, 5]), int_row(&[2, 1])];
    seed(&store, &ordering, &rows);

    let mut cursor = mixed_order(&store, ordering, int_shape(2), IndexKeyRange::unbounded());
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![int_row(&[1, 5]), int_row(&[1, 3]), int_row(&[2, 1])]
    );
}

#[test]
fn mixed_order_cursor_bounds_the_last_bound_column() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), desc(1)]);
    let rows = vec![
        int_row(&[0, 9]),
        int_row(&[1, 3]),
        int_row(&[1, 5]),
        int_row(&[2, 1]),
    ];
    seed(&store, &ordering, &rows);

    let range = int_range(1, &[1], true, &[1], true);
    let mut cursor = mixed_order(&store, ordering, int_shape(2), range);
    cursor.open().expect("cursor should open");

    assert_eq!(drain(&mut cursor), vec![int_row(&[1, 5]), int_row(&[1, 3])]);
}

#[test]
fn mixed_order_cursor_pins_equality_columns_and_backtracks() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), desc(1), asc(2)]);
    let rows = vec![
        int_row(&[1, 7, 0]),
        int_row(&[2, 1, 4]),
        int_row(&[2, 5, 2]),
        int_row(&[2, 5, 6]),
        int_row(&[2, 9, 1]),
        int_row(&[3, 0, 0]),
    ];
    seed(&store, &ordering, &rows);

    let range = int_range(2, &[2, 1], true, &[2, 9], true);
    let mut cursor = mixed_order(&store, ordering, int_shape(3), range);
    cursor.open().expect("cursor should open");

    assert_eq!(
        drain(&mut cursor),
        vec![
            int_row(&[2, 9, 1]),
            int_row(&[2, 5, 2]),
            int_row(&[2, 5, 6]),
            int_row(&[2, 1, 4]),
        ]
    );
}

#[test]
fn mixed_order_cursor_on_a_uniform_ordering_matches_the_linear_walk() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), asc(1)]);
    let rows = vec![int_row(&[1, 2]), int_row(&[1, 9]), int_row(&[2, 0])];
    seed(&store, &ordering, &rows);

    let mut nested = mixed_order(
        &store,
        ordering.clone(),
        int_shape(2),
        IndexKeyRange::unbounded(),
    );
    nested.open().expect("cursor should open");

    let mut linear = unidirectional(&store, ordering, int_shape(2), IndexKeyRange::unbounded());
    linear.open().expect("cursor should open");

    assert_eq!(drain(&mut nested), drain(&mut linear));
}

#[test]
fn mixed_order_cursor_rejects_lexicographic_ranges() {
    let store = MemoryStore::new();
    let selector = ColumnSelector::leading(2);
    let range = IndexKeyRange::lexicographic(
        2,
        RangeBound::inclusive(int_row(&[1, 5]), selector),
        RangeBound::inclusive(int_row(&[2, 3]), selector),
    )
    .expect("range should build");

    let err = MixedOrderCursor::new(
        ValueCodec,
        store.scan(),
        SortOrdering::new(vec![asc(0), desc(1)]),
        int_shape(2),
        range,
    )
    .err()
    .expect("lexicographic ranges need a single interval");
    assert_eq!(err.class, ErrorClass::Unsupported);
}

#[test]
fn unidirectional_cursor_rejects_mixed_orderings() {
    let store = MemoryStore::new();

    let err = UnidirectionalCursor::<ValueCodec, MemoryScan>::new(
        ValueCodec,
        store.scan(),
        SortOrdering::new(vec![asc(0), desc(1)]),
        int_shape(2),
        IndexKeyRange::unbounded(),
    )
    .err()
    .expect("mixed directions need the nested cursor");
    assert_eq!(err.class, ErrorClass::Unsupported);
}

#[test]
fn mixed_order_cursor_has_no_jump() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), desc(1)]);
    seed(&store, &ordering, &[int_row(&[1, 3])]);

    let mut cursor = mixed_order(&store, ordering, int_shape(2), IndexKeyRange::unbounded());
    cursor.open().expect("cursor should open");

    let err = cursor
        .jump(&int_row(&[1, 3]), ColumnSelector::leading(2))
        .expect_err("nested traversal has no linear reposition");
    assert_eq!(err.class, ErrorClass::Unsupported);
}

#[test]
fn close_is_idempotent_on_every_state() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0)]);
    seed(&store, &ordering, &[int_row(&[1]), int_row(&[2])]);

    // Never opened.
    let mut unopened =
        unidirectional(&store, ordering.clone(), int_shape(1), IndexKeyRange::unbounded());
    unopened.close();
    unopened.close();

    // Open, then closed twice.
    let mut open =
        unidirectional(&store, ordering.clone(), int_shape(1), IndexKeyRange::unbounded());
    open.open().expect("cursor should open");
    open.close();
    open.close();

    // Drained to exhaustion, which already released the traversal.
    let mut drained = unidirectional(&store, ordering, int_shape(1), IndexKeyRange::unbounded());
    drained.open().expect("cursor should open");
    drain(&mut drained);
    drained.close();
    drained.close();
}

#[test]
fn cursor_lifecycle_updates_thread_metrics() {
    let store = MemoryStore::new();
    let ordering = SortOrdering::new(vec![asc(0), desc(1)]);
    let rows = vec![int_row(&[1, 3]), int_row(&[1, 5]), int_row(&[2, 1])];
    seed(&store, &ordering, &rows);

    obs::metrics_reset();

    // Plain segment keys carry no direction, so the same index serves
    // both orderings.
    let mut linear = unidirectional(
        &store,
        SortOrdering::new(vec![asc(0), asc(1)]),
        int_shape(2),
        IndexKeyRange::unbounded(),
    );
    linear.open().expect("cursor should open");
    assert_eq!(drain(&mut linear).len(), 3);

    let mut nested = mixed_order(&store, ordering, int_shape(2), IndexKeyRange::unbounded());
    nested.open().expect("cursor should open");
    assert_eq!(drain(&mut nested).len(), 3);

    let metrics = obs::metrics_snapshot();
    assert_eq!(metrics.unidirectional_cursors_opened, 1);
    assert_eq!(metrics.mixed_order_cursors_opened, 1);
    assert_eq!(metrics.cursors_closed, 2);
    assert_eq!(metrics.rows_returned, 6);
}
