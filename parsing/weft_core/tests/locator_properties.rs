use proptest::prelude::*;
use weft_core::{Location, SourceLocator};

/// Line and column of every offset, computed the slow way
fn naive_locations(source: &str) -> Vec<Location> {
    let mut locations = Vec::new();
    let (mut line, mut column) = (1, 1);
    for c in source.chars() {
        locations.push(Location::new(line, column));
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    locations.push(Location::new(line, column));
    locations
}

fn source_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b'), Just('\n')], 0..64)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn sequential_scan_matches_naive(source in source_strategy()) {
        let locator = SourceLocator::new(&source);
        let expected = naive_locations(&source);
        for (index, location) in expected.iter().enumerate() {
            prop_assert_eq!(locator.locate(index).unwrap(), *location);
        }
    }

    #[test]
    fn lookup_agrees_with_scan(source in source_strategy(), indices in proptest::collection::vec(0usize..65, 1..16)) {
        let scanned = SourceLocator::new(&source);
        let expected = naive_locations(&source);
        scanned.locate(source.len()).unwrap();
        for index in indices {
            let index = index.min(source.len());
            prop_assert_eq!(scanned.locate(index).unwrap(), expected[index]);
            prop_assert_eq!(SourceLocator::new(&source).scan_to(index).unwrap(), expected[index]);
        }
    }

    #[test]
    fn past_the_end_is_an_error(source in source_strategy(), extra in 1usize..8) {
        let locator = SourceLocator::new(&source);
        prop_assert!(locator.locate(source.len() + extra).is_err());
    }
}
