use crate::model::{Record, RecordCollection};

/// Keep the records whose name contains `query`, ignoring case, in their original order.
///
/// An empty query returns the input unchanged. Records with an empty name never match a
/// non-empty query.
pub fn filter_by_name(collection: &[Record], query: &str) -> RecordCollection {
    if query.is_empty() {
        return collection.to_vec();
    }
    let needle = query.to_lowercase();
    collection
        .iter()
        .filter(|r| !r.name.is_empty() && r.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::strategies::arb_records;

    fn fixture() -> RecordCollection {
        vec![
            Record::new("A Diner", Some("Diner")),
            Record::new("B Cafe", Some("Cafe")),
            Record::new("A Bakery", Some("Bakery")),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn matches_case_insensitively_in_order() {
        let filtered = filter_by_name(&fixture(), "a");
        assert_eq!(names(&filtered), vec!["A Diner", "A Bakery"]);

        let filtered = filter_by_name(&fixture(), "CAFE");
        assert_eq!(names(&filtered), vec!["B Cafe"]);
    }

    #[test]
    fn empty_query_returns_input() {
        assert_eq!(filter_by_name(&fixture(), ""), fixture());
    }

    #[test]
    fn filtering_is_idempotent() {
        for query in ["a", "diner", "zzz", "e"] {
            let once = filter_by_name(&fixture(), query);
            let twice = filter_by_name(&once, query);
            assert_eq!(once, twice, "query {query:?}");
            let lowered = query.to_lowercase();
            assert!(once.iter().all(|r| r.name.to_lowercase().contains(&lowered)));
        }
    }

    #[test]
    fn nameless_records_are_excluded() {
        let mut data = fixture();
        data.push(Record::new("", Some("Cafe")));
        assert_eq!(filter_by_name(&data, "b").len(), 2);
    }

    proptest! {
        #[test]
        fn matches_contain_query_and_refilter_is_stable(
            data in arb_records(30),
            query in "[a-zA-Z ]{0,3}",
        ) {
            let once = filter_by_name(&data, &query);
            let lowered = query.to_lowercase();
            prop_assert!(once.iter().all(|r| r.name.to_lowercase().contains(&lowered)));
            prop_assert!(once.iter().all(|r| data.contains(r)));
            prop_assert_eq!(filter_by_name(&once, &query), once);
        }

        #[test]
        fn empty_query_keeps_everything(data in arb_records(30)) {
            prop_assert_eq!(filter_by_name(&data, ""), data);
        }
    }
}
