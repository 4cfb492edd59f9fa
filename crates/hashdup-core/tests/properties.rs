use std::collections::HashMap;

use hashdup_core::{PivotStrategy, RecordStore, aggregate, find_duplicates, is_sorted};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

const STRATEGIES: [PivotStrategy; 2] = [PivotStrategy::Last, PivotStrategy::MedianOfThree];

/// Random records drawn from a small value space so that repeats are common.
fn random_records(rng: &mut StdRng, n: usize, width: usize, distinct: u32) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(n * width);
    for _ in 0..n {
        let value = rng.gen_range(0..distinct);
        let bytes = value.to_be_bytes();
        for k in 0..width {
            buffer.push(bytes[k % bytes.len()] ^ (k as u8));
        }
    }
    buffer
}

fn occurrence_counts(buffer: &[u8], width: usize) -> HashMap<Vec<u8>, usize> {
    let mut counts = HashMap::new();
    for record in buffer.chunks_exact(width) {
        *counts.entry(record.to_vec()).or_insert(0) += 1;
    }
    counts
}

fn sorted_records(buffer: &[u8], width: usize) -> Vec<Vec<u8>> {
    let mut records: Vec<Vec<u8>> = buffer.chunks_exact(width).map(<[u8]>::to_vec).collect();
    records.sort_unstable();
    records
}

#[test]
fn test_sort_is_ordered_permutation() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for strategy in STRATEGIES {
        let sorter = PivotStrategy::create_sorter(strategy);
        for (n, width, distinct) in [(0, 4, 1), (1, 4, 1), (2, 1, 2), (500, 4, 50), (2000, 8, 5000)] {
            let input = random_records(&mut rng, n, width, distinct);
            let mut store = RecordStore::new(input.clone(), width)?;
            sorter.sort(&mut store);

            assert!(is_sorted(&store), "{} n={n} w={width}", sorter.name());
            let output: Vec<Vec<u8>> = store.iter().map(<[u8]>::to_vec).collect();
            assert_eq!(output, sorted_records(&input, width));
        }
    }
    Ok(())
}

#[test]
fn test_sort_is_idempotent() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    for strategy in STRATEGIES {
        let sorter = PivotStrategy::create_sorter(strategy);
        let mut store = RecordStore::new(random_records(&mut rng, 300, 3, 40), 3)?;
        sorter.sort(&mut store);
        let once = store.as_bytes().to_vec();
        sorter.sort(&mut store);
        assert_eq!(store.as_bytes(), &once[..]);
    }
    Ok(())
}

#[test]
fn test_sort_worst_case_inputs() -> anyhow::Result<()> {
    let width = 2;
    let ascending: Vec<u8> = (0u16..1024).flat_map(u16::to_be_bytes).collect();
    let descending: Vec<u8> = (0u16..1024).rev().flat_map(u16::to_be_bytes).collect();
    let all_equal = vec![0xAB; 1024 * width];

    for strategy in STRATEGIES {
        let sorter = PivotStrategy::create_sorter(strategy);
        for input in [&ascending, &descending, &all_equal] {
            let mut store = RecordStore::new(input.clone(), width)?;
            sorter.sort(&mut store);
            assert!(is_sorted(&store), "{}", sorter.name());
        }
    }
    Ok(())
}

#[test]
fn test_duplicate_count_law() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    for strategy in STRATEGIES {
        let sorter = PivotStrategy::create_sorter(strategy);
        for (n, width, distinct) in [(100, 1, 10), (1000, 4, 300), (1000, 16, 2000)] {
            let input = random_records(&mut rng, n, width, distinct);
            let expected = occurrence_counts(&input, width);

            let mut store = RecordStore::new(input, width)?;
            let table = find_duplicates(&mut store, sorter.as_ref())?;

            // every reported value occurs k >= 2 times and is reported as k - 1
            for entry in &table {
                let k = expected[&entry.value.to_vec()];
                assert!(k >= 2);
                assert_eq!(entry.count, k - 1);
                assert_eq!(entry.occurrences(), k);
            }
            // and every value occurring twice or more is reported
            let duplicated = expected.values().filter(|&&k| k >= 2).count();
            assert_eq!(table.len(), duplicated);

            // discovery order over a sorted store is ascending
            assert!(table.entries().windows(2).all(|w| w[0].value < w[1].value));
        }
    }
    Ok(())
}

#[test]
fn test_concrete_scenarios() -> anyhow::Result<()> {
    let cases: [(&[u8], &[(&str, usize)]); 4] = [
        (&[0x05, 0x01, 0x05, 0x02], &[("05", 1)]),
        (&[0x03, 0x03, 0x03], &[("03", 2)]),
        (&[0x01, 0x02, 0x03], &[]),
        (&[], &[]),
    ];

    for (input, expected) in cases {
        let mut store = RecordStore::new(input.to_vec(), 1)?;
        PivotStrategy::create_sorter(PivotStrategy::Last).sort(&mut store);
        let table = aggregate(&store)?;
        let got: Vec<(String, usize)> = table
            .iter()
            .map(|e| (e.hex().to_string(), e.count))
            .collect();
        let expected: Vec<(String, usize)> =
            expected.iter().map(|&(h, c)| (h.to_owned(), c)).collect();
        assert_eq!(got, expected);
    }
    Ok(())
}
