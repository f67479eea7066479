use bitqueens::bitboard::Wide256;
use bitqueens::error::QueensError;
use bitqueens::kernel::Scalar;
use bitqueens::parallel::{build_pool, partition, solve_partitioned};
use bitqueens::{BoardSize, SearchContext, Solution, TraceOptions, symmetry};
use proptest::prelude::*;

fn raw_solutions(board_size: usize) -> Vec<Solution> {
    let board = BoardSize::new(board_size, 16).unwrap();
    let mut ctx = SearchContext::new(Scalar::<Wide256>::new(), board, usize::MAX).unwrap();
    ctx.search_half();
    ctx.into_parts().1
}

proptest! {
    #[test]
    fn test_partition_covers_starting_rows(board_size in 4usize..=16, workers in 1usize..=16) {
        let rows = board_size.div_ceil(2);
        let ranges = partition(rows, workers);
        prop_assert_eq!(ranges.len(), workers);

        let mut next = 0;
        for r in &ranges {
            prop_assert_eq!(r.start, next);
            prop_assert!(r.end >= r.start);
            next = r.end;
        }
        prop_assert_eq!(next, rows);

        let lens: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
        let max = *lens.iter().max().unwrap();
        let min = *lens.iter().min().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert!(lens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_mirror_is_involution(rows in Just((0u8..8).collect::<Vec<_>>()).prop_shuffle()) {
        let s = Solution::from_rows(&rows);
        prop_assert_eq!(s.mirror().mirror(), s.clone());
        prop_assert_eq!(s.mirror().is_valid(), s.is_valid());
    }
}

#[test]
fn test_expansion_is_complete_and_distinct() {
    for n in 4..=10 {
        let raw = raw_solutions(n);
        let expanded = symmetry::expand(&raw, n).unwrap();
        assert_eq!(expanded.len() as u64, bitqueens::KNOWN_SOLUTION_COUNTS[n], "N={n}");

        let mut unique = expanded.clone();
        unique.sort_by(|a, b| a.rows().cmp(b.rows()));
        unique.dedup();
        assert_eq!(unique.len(), expanded.len(), "duplicate after expansion at N={n}");
    }
}

#[test]
fn test_odd_middle_row_solutions_appear_once() {
    let raw = raw_solutions(7);
    let middle: Vec<&Solution> = raw.iter().filter(|s| s.first_row() == 3).collect();
    assert!(!middle.is_empty());
    let expanded = symmetry::expand(&raw, 7).unwrap();
    for s in middle {
        assert_eq!(expanded.iter().filter(|e| *e == s).count(), 1);
        // its mirror was found by the search itself
        assert!(raw.contains(&s.mirror()));
    }
}

#[test]
fn test_expand_rejects_bad_size() {
    assert!(matches!(
        symmetry::expand(&[], 2),
        Err(QueensError::UnsupportedMirrorSize(2))
    ));
}

#[test]
fn test_partitioned_counters_match_for_many_worker_counts() {
    let pool = build_pool(4).unwrap();
    for n in [6, 9, 11] {
        let board = BoardSize::new(n, 16).unwrap();
        let mut single = SearchContext::new(Scalar::<Wide256>::new(), board, 0).unwrap();
        single.search_half();
        for workers in 1..=n {
            let outcome = solve_partitioned(
                &pool,
                Scalar::<Wide256>::new(),
                board,
                workers,
                12,
                TraceOptions::default(),
            )
            .unwrap();
            assert_eq!(outcome.counters, single.counters(), "N={n}, {workers} workers");
        }
    }
}
