// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Property tests for namespace construction

use olkit_namespace::{build_namespace, sanitize_project_name, NamespaceBuilder};
use proptest::prelude::*;

#[test]
fn test_documented_examples() {
    assert_eq!(
        build_namespace("My-Project!", "dev", None, false).unwrap(),
        "my_project_.dev"
    );
    assert_eq!(
        build_namespace("analytics", "staging", Some("company"), false).unwrap(),
        "company.analytics.staging"
    );
}

#[test]
fn test_hostname_segment_is_last_and_dot_free() {
    let without = build_namespace("ol_poc", "prod", Some("company"), false).unwrap();
    let with = build_namespace("ol_poc", "prod", Some("company"), true).unwrap();

    let suffix = with
        .strip_prefix(&format!("{}.", without))
        .expect("hostname should be appended after the base namespace");
    assert!(!suffix.is_empty());
    assert!(!suffix.contains('.'));
}

#[test]
fn test_builder_matches_function() {
    let from_builder = NamespaceBuilder::new("Data Pipeline", "uat")
        .include_hostname(false)
        .build()
        .unwrap();
    assert_eq!(
        from_builder,
        build_namespace("Data Pipeline", "uat", None, false).unwrap()
    );
}

proptest! {
    #[test]
    fn prop_without_hostname_is_sanitized_project_dot_env(
        project in ".{0,24}",
        environment in "[a-z]{1,8}",
    ) {
        let ns = build_namespace(&project, &environment, None, false).unwrap();
        prop_assert_eq!(ns, format!("{}.{}", sanitize_project_name(&project), environment));
    }

    #[test]
    fn prop_prefix_is_prepended(
        project in "[A-Za-z0-9_ -]{1,16}",
        environment in "[a-z]{1,8}",
        prefix in "[a-z]{1,8}",
    ) {
        let base = build_namespace(&project, &environment, None, false).unwrap();
        let prefixed = build_namespace(&project, &environment, Some(&prefix), false).unwrap();
        prop_assert_eq!(prefixed, format!("{}.{}", prefix, base));
    }

    #[test]
    fn prop_sanitized_project_is_lowercase_alnum_or_underscore(project in ".{0,32}") {
        let sanitized = sanitize_project_name(&project);
        prop_assert_eq!(sanitized.chars().count(), project.chars().count());
        prop_assert!(sanitized
            .chars()
            .all(|c| c == '_' || c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
