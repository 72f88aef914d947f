use crate::query::breakdowns::BrowserRecord;

/// Label of the synthetic bucket that absorbs the tail of a ranking.
pub const OTHERS_LABEL: &str = "Others";

/// Collapse a ranked browser list into at most `max_results` entries.
///
/// Lists already within the cutoff come back unchanged. Longer lists keep
/// their first `max_results - 1` entries in the given order and end with one
/// "Others" entry summing the sessions of everything after them. The input
/// ranking is trusted as-is and never re-sorted. A cutoff of 0 is treated as 1.
pub fn summarize_top_browsers(
    ranked: Vec<BrowserRecord>,
    max_results: usize,
) -> Vec<BrowserRecord> {
    let max_results = max_results.max(1);
    if ranked.len() <= max_results {
        return ranked;
    }

    let mut kept = ranked;
    let tail = kept.split_off(max_results - 1);
    let sessions = tail
        .iter()
        .fold(0u64, |sum, record| sum.saturating_add(record.sessions));
    kept.push(BrowserRecord {
        browser: OTHERS_LABEL.to_string(),
        sessions,
    });
    kept
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn ranked_browsers() -> impl Strategy<Value = Vec<BrowserRecord>> {
        prop::collection::vec(0u64..1_000_000, 0..40).prop_map(|mut sessions| {
            sessions.sort_unstable_by(|a, b| b.cmp(a));
            sessions
                .into_iter()
                .enumerate()
                .map(|(i, sessions)| BrowserRecord {
                    browser: format!("browser-{i}"),
                    sessions,
                })
                .collect()
        })
    }

    proptest! {
        /// At or under the cutoff, summarizing is the identity.
        #[test]
        fn prop_identity_within_cutoff(ranked in ranked_browsers(), extra in 0usize..5) {
            let cutoff = ranked.len().max(1) + extra;
            prop_assert_eq!(summarize_top_browsers(ranked.clone(), cutoff), ranked);
        }

        /// Over the cutoff: exactly `max_results` entries, the head preserved,
        /// and "Others" holding the sum of the tail.
        #[test]
        fn prop_length_and_sum(ranked in ranked_browsers(), max_results in 1usize..20) {
            prop_assume!(ranked.len() > max_results);
            let out = summarize_top_browsers(ranked.clone(), max_results);

            prop_assert_eq!(out.len(), max_results);
            prop_assert_eq!(&out[..max_results - 1], &ranked[..max_results - 1]);

            let others = out.last().unwrap();
            prop_assert_eq!(others.browser.as_str(), OTHERS_LABEL);
            let tail_sum: u64 = ranked[max_results - 1..].iter().map(|b| b.sessions).sum();
            prop_assert_eq!(others.sessions, tail_sum);
        }

        /// No sessions are lost or invented.
        #[test]
        fn prop_total_preserved(ranked in ranked_browsers(), max_results in 1usize..20) {
            let before: u64 = ranked.iter().map(|b| b.sessions).sum();
            let after: u64 = summarize_top_browsers(ranked, max_results)
                .iter()
                .map(|b| b.sessions)
                .sum();
            prop_assert_eq!(before, after);
        }
    }
}
