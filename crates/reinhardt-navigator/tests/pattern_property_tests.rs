//! Property-based tests for route pattern matching
//!
//! Uses proptest to verify properties that should hold for all valid inputs.

#[cfg(not(target_arch = "wasm32"))]
mod property_tests {
	use proptest::prelude::*;
	use reinhardt_navigator::{Route, RouterContext};

	fn noop(_cxt: &RouterContext) {}

	/// Builds `/{p0}/{p1}/...` and a matching path from the given values.
	fn pattern_and_path(values: &[String]) -> (String, String) {
		let pattern: String = (0..values.len()).map(|i| format!("/{{p{i}}}")).collect();
		let path: String = values.iter().map(|v| format!("/{v}")).collect();
		(pattern, path)
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(100))]

		/// Property: N placeholders yield N params, named and ordered as declared
		#[test]
		fn prop_placeholder_count_and_order(
			values in prop::collection::vec("[a-z0-9]{1,8}", 1..6)
		) {
			let (pattern, path) = pattern_and_path(&values);
			let route = Route::new(&pattern, noop).unwrap();

			let params = route.params(&path).unwrap();
			prop_assert_eq!(params.len(), values.len());

			let names: Vec<_> = params.names().map(str::to_string).collect();
			let expected: Vec<_> = (0..values.len()).map(|i| format!("p{i}")).collect();
			prop_assert_eq!(names, expected);
		}

		/// Property: a single placeholder captures the whole tail, slashes included
		#[test]
		fn prop_single_placeholder_captures_tail(
			tail in "[a-z0-9/]{0,40}"
		) {
			let route = Route::new("/files/{path}", noop).unwrap();
			let params = route.params(&format!("/files/{tail}")).unwrap();

			prop_assert_eq!(params.get("path"), Some(tail.as_str()));
		}

		/// Property: matching ignores ASCII case
		#[test]
		fn prop_match_is_case_insensitive(
			literal in "[a-z]{1,12}"
		) {
			let route = Route::new(&format!("/{literal}"), noop).unwrap();

			let upper = format!("/{}", literal.to_uppercase());
			prop_assert!(route.test(&upper));
		}

		/// Property: the match is anchored at the end, so any prefix still matches
		#[test]
		fn prop_prefix_still_matches(
			prefix in "(/[b-z]{1,6}){0,3}"
		) {
			let route = Route::new("/a/{id}", noop).unwrap();
			let path = format!("{prefix}/a/5");

			prop_assert!(route.test(&path));
			let params = route.params(&path).unwrap();
			prop_assert_eq!(params.get("id"), Some("5"));
		}

		/// Property: literal regex metacharacters match only themselves
		#[test]
		fn prop_literals_are_escaped(
			value in "[a-z]{1,8}"
		) {
			let route = Route::new("/v1.0/{name}", noop).unwrap();

			let dotted = format!("/v1.0/{value}");
			let undotted = format!("/v1x0/{value}");
			prop_assert!(route.test(&dotted));
			prop_assert!(!route.test(&undotted));
		}
	}
}
