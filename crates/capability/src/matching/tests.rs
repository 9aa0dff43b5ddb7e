use proptest::prelude::*;
use rstest::rstest;

use super::*;

fn versions(raw: &[u32]) -> Vec<CapabilityVersion> {
	raw.iter().copied().map(CapabilityVersion::of).collect()
}

#[rstest]
#[case::exact(&[13, 14, 15], 14, Some(14))]
#[case::falls_back_lower(&[13, 15], 14, Some(13))]
#[case::ignores_newer(&[13, 15], 13, Some(13))]
#[case::future_host(&[13, 14], 20, Some(14))]
#[case::all_too_new(&[14, 15], 13, None)]
#[case::empty(&[], 13, None)]
fn greedy_choice(#[case] available: &[u32], #[case] host: u32, #[case] expected: Option<u32>) {
	let chosen = GreedyMatch.choose(&versions(available), CapabilityVersion::of(host));
	assert_eq!(chosen.map(CapabilityVersion::get), expected);
}

#[test]
fn available_versions_render_sorted_and_deduplicated() {
	let available = AvailableVersions::new(versions(&[15, 13, 14, 13]));
	assert_eq!(available.to_string(), "13, 14, 15");
	assert_eq!(AvailableVersions::default().to_string(), "none");
}

proptest! {
	#[test]
	fn greedy_picks_max_compatible(raw in proptest::collection::btree_set(1u32..40, 0..8), host in 1u32..45) {
		let available = versions(&raw.iter().copied().collect::<Vec<_>>());
		let host = CapabilityVersion::of(host);
		let expected = available.iter().copied().filter(|v| *v <= host).max();

		prop_assert_eq!(GreedyMatch.choose(&available, host), expected);
	}
}
