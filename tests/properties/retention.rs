//! Property tests for the version retention rule.

use proptest::prelude::*;

use gae_deploy::{RetentionPolicy, VersionRecord};

/// Newest-first listing with unique ids; roughly one in four versions serves
/// traffic.
fn listing() -> impl Strategy<Value = Vec<VersionRecord>> {
    proptest::collection::vec(prop_oneof![3 => Just(0.0), 1 => 0.01f64..=1.0], 0..16).prop_map(|splits| {
        splits
            .into_iter()
            .enumerate()
            .map(|(i, split)| VersionRecord::new(format!("v{i}"), split))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a version is deleted iff it is outside the window, is not the
    /// deployed version, and serves no traffic.
    #[test]
    fn property_deleted_iff_stale(
        versions in listing(),
        keep in 1usize..8,
        deployed_index in proptest::option::of(0usize..20),
    ) {
        let deployed = deployed_index.map(|i| format!("v{i}"));
        let policy = RetentionPolicy::new(keep);

        let deleted = policy.select_for_deletion(&versions, deployed.as_deref());

        for (position, version) in versions.iter().enumerate() {
            let stale = position >= keep
                && deployed.as_deref() != Some(version.id.as_str())
                && version.traffic_split == 0.0;
            prop_assert_eq!(deleted.contains(&version.id), stale, "version {}", version.id);
        }
    }

    /// PROPERTY: deletions keep listing order and never exceed the listing.
    #[test]
    fn property_deletions_are_an_ordered_subset(
        versions in listing(),
        keep in 1usize..8,
    ) {
        let deleted = RetentionPolicy::new(keep).select_for_deletion(&versions, None);

        let ids: Vec<&str> = versions.iter().map(|v| v.id.as_str()).collect();
        let positions: Vec<usize> = deleted
            .iter()
            .map(|id| ids.iter().position(|candidate| candidate == id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(deleted.len() <= versions.len().saturating_sub(keep));
    }
}
