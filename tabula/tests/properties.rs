use std::num::NonZeroUsize;

use proptest::prelude::*;
use tabula::model::{Record, Value};
use tabula::pipeline::{ActiveSort, Comparison, SortDirection, filter, filter_view, paginate, sort};
use tabula::Column;

fn columns() -> Vec<Column> {
    vec![Column::new("name", "Name"), Column::new("score", "Score")]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-50i64..50).prop_map(Value::Int),
        "[a-dA-D ]{0,4}".prop_map(Value::String),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(("[a-cA-C]{0,3}", value_strategy()), 0..40).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(i, (name, score))| {
                Record::new()
                    .set("id", i as i64)
                    .set("name", name)
                    .set("score", score)
            })
            .collect()
    })
}

fn comparison_strategy() -> impl Strategy<Value = Comparison> {
    prop_oneof![Just(Comparison::Numeric), Just(Comparison::Lexical)]
}

proptest! {
    #[test]
    fn filter_is_idempotent(rows in rows_strategy(), query in "[a-cA-C ]{0,2}") {
        let cols = columns();
        let once = filter(&rows, &cols, &query);
        let twice = filter_view(&rows, once.iter().copied(), &cols, &query);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_preserves_source_order(rows in rows_strategy(), query in "[a-c]{0,2}") {
        let kept = filter(&rows, &columns(), &query);
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sort_is_stable_in_both_directions(
        rows in rows_strategy(),
        comparison in comparison_strategy(),
        descending in any::<bool>(),
    ) {
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        let active = ActiveSort::new("score", direction, comparison);
        let view: Vec<usize> = (0..rows.len()).collect();
        let sorted = sort(&rows, view, Some(&active));

        prop_assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            let a = &rows[pair[0]].get("score");
            let b = &rows[pair[1]].get("score");
            if a == b {
                prop_assert!(pair[0] < pair[1], "tie out of input order: {:?}", pair);
            }
        }
    }

    #[test]
    fn ascending_reversed_equals_descending_without_ties(
        scores in prop::collection::hash_set(-1000i64..1000, 0..30),
        comparison in comparison_strategy(),
    ) {
        let rows: Vec<Record> = scores
            .into_iter()
            .map(|s| Record::new().set("score", s))
            .collect();
        let view: Vec<usize> = (0..rows.len()).collect();

        let asc = ActiveSort::new("score", SortDirection::Ascending, comparison);
        let desc = ActiveSort::new("score", SortDirection::Descending, comparison);
        let mut reversed = sort(&rows, view.clone(), Some(&asc));
        reversed.reverse();
        prop_assert_eq!(reversed, sort(&rows, view, Some(&desc)));
    }

    #[test]
    fn pages_cover_sorted_rows(len in 0usize..200, page_size in 1usize..25) {
        let page_size = NonZeroUsize::new(page_size).unwrap();
        let total = paginate(len, 0, page_size).total_pages;
        let mut covered = Vec::new();
        for index in 0..total {
            let page = paginate(len, index, page_size);
            prop_assert_eq!(page.total_pages, total);
            covered.extend(page.range);
        }
        prop_assert_eq!(covered, (0..len).collect::<Vec<_>>());
        prop_assert!(paginate(len, total, page_size).is_empty());
    }
}
