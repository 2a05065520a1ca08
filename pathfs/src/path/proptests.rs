//! Property-based tests for the lexical path model.

use super::normalize::{join_segments, normalize};
use super::Path;
use proptest::prelude::*;

// Raw strings biased towards separators and relative markers.
fn raw_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("/".to_string()),
            Just("//".to_string()),
            Just(".".to_string()),
            Just("..".to_string()),
            "[a-z0-9_.-]{1,8}",
        ],
        0..10,
    )
    .prop_map(|parts| parts.concat())
}

fn relative_segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,8}(/[a-z0-9_-]{1,8}){0,3}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // normalize(normalize(s)) == normalize(s)
    #[test]
    fn normalization_idempotent(raw in raw_path_strategy()) {
        let once = normalize(&raw).into_owned();
        let twice = normalize(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    // Normalized strings never contain doubled separators or a trailing one
    #[test]
    fn normalized_has_no_redundant_separators(raw in raw_path_strategy()) {
        let normalized = normalize(&raw);
        prop_assert!(!normalized.contains("//"));
        prop_assert!(normalized == "/" || !normalized.ends_with('/'));
    }

    // parse(p.to_string()) == p
    #[test]
    fn display_round_trip(raw in raw_path_strategy()) {
        let path = Path::parse(&raw).unwrap();
        let reparsed = Path::parse(&path.to_string()).unwrap();
        prop_assert_eq!(path, reparsed);
    }

    // Names plus separators account for the whole string minus the root marker
    #[test]
    fn segment_lengths_cover_string(raw in raw_path_strategy()) {
        let path = Path::parse(&raw).unwrap();
        let count = path.name_count();
        let names_len: usize = path.names().map(|n| n.as_str().len()).sum();
        let separators = count.saturating_sub(1);
        let root_marker = usize::from(path.is_absolute());
        prop_assert_eq!(names_len + separators, path.as_str().len() - root_marker);
    }

    // name(count) always fails
    #[test]
    fn name_past_end_fails(raw in raw_path_strategy()) {
        let path = Path::parse(&raw).unwrap();
        prop_assert!(path.name(path.name_count()).is_err());
    }

    // Names never contain a separator and are never empty unless the path is
    #[test]
    fn names_are_separator_free(raw in raw_path_strategy()) {
        let path = Path::parse(&raw).unwrap();
        for name in path.names() {
            prop_assert!(!name.as_str().contains('/'));
            prop_assert!(!name.as_str().is_empty() || path.is_empty());
        }
    }

    // parent + file_name rebuilds the path
    #[test]
    fn parent_and_file_name_rebuild_path(raw in raw_path_strategy()) {
        let path = Path::parse(&raw).unwrap();
        if let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) {
            let rebuilt = parent.resolve(&file_name).unwrap();
            prop_assert_eq!(rebuilt, path);
        }
    }

    // Parent has exactly one name fewer
    #[test]
    fn parent_drops_one_name(raw in raw_path_strategy()) {
        let path = Path::parse(&raw).unwrap();
        if let Some(parent) = path.parent() {
            prop_assert_eq!(parent.name_count() + 1, path.name_count());
        }
    }

    // Segment construction agrees with a resolve chain for relative segments
    #[test]
    fn segments_agree_with_resolve_chain(
        first in raw_path_strategy(),
        more in prop::collection::vec(relative_segment_strategy(), 0..4),
    ) {
        let refs: Vec<&str> = more.iter().map(String::as_str).collect();
        let built = Path::from_segments(&first, &refs).unwrap();

        let mut chained = Path::parse(&first).unwrap();
        for segment in &more {
            chained = chained.resolve(&Path::parse(segment).unwrap()).unwrap();
        }
        prop_assert_eq!(built, chained);
    }

    // join is the normalized segment join
    #[test]
    fn join_matches_segment_join(base in raw_path_strategy(), other in raw_path_strategy()) {
        let joined = Path::parse(&base).unwrap().join(&other).unwrap();
        let expected = normalize(&join_segments(&normalize(&base), &[other.as_str()])).into_owned();
        prop_assert_eq!(joined.as_str(), expected.as_str());
    }

    // Resolving an absolute path always yields that path
    #[test]
    fn resolve_absolute_replaces(base in raw_path_strategy(), other in relative_segment_strategy()) {
        let absolute = Path::parse(&format!("/{other}")).unwrap();
        let resolved = Path::parse(&base).unwrap().resolve(&absolute).unwrap();
        prop_assert_eq!(resolved, absolute);
    }
}
