use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::application::ports::Classifier;
use crate::domain::value_objects::{LandmarkCategory, LandmarkSet};

/// `role="..."` with the value captured up to the next double quote.
/// The value class is byte-oriented so invalid UTF-8 still matches.
static ROLE_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"role="((?-u:[^"])*)""#).expect("role pattern is valid"));

/// Landmark detection by scanning for `role` attributes in the raw markup.
///
/// The scan is purely textual: no HTML parsing, no decoding. Attributes
/// inside comments or scripts count the same as real ones, and single-quoted
/// or unquoted values are not recognised. Each category is reported at most
/// once per document.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAttributeClassifier;

impl RoleAttributeClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for RoleAttributeClassifier {
    fn classify(&self, content: &[u8]) -> LandmarkSet {
        let mut landmarks = LandmarkSet::new();
        for captures in ROLE_ATTRIBUTE.captures_iter(content) {
            if let Some(value) = captures.get(1) {
                landmarks.insert(LandmarkCategory::from_role(value.as_bytes()));
            }
        }
        landmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(html: &str) -> LandmarkSet {
        RoleAttributeClassifier::new().classify(html.as_bytes())
    }

    #[test]
    fn test_main_landmark() {
        let set = classify(r#"<div role="main">x</div>"#);
        assert!(set.contains(LandmarkCategory::Main));
        assert_eq!(set.len(), 1);
        assert!(set.has_landmark());
    }

    #[test]
    fn test_no_roles() {
        let set = classify("<html><body><p>plain</p></body></html>");
        assert!(set.is_empty());
    }

    #[test]
    fn test_named_and_unknown_roles() {
        let set = classify(r#"<nav role="main"></nav><span role="bogus"></span>"#);
        assert!(set.contains(LandmarkCategory::Main));
        assert!(set.contains(LandmarkCategory::Other));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unknown_role_only_is_not_a_landmark() {
        let set = classify(r#"<button role="button">"#);
        assert!(set.contains(LandmarkCategory::Other));
        assert!(!set.has_landmark());
    }

    #[test]
    fn test_every_named_role_is_recognised() {
        for category in LandmarkCategory::ALL {
            if !category.is_landmark() {
                continue;
            }
            let html = format!(r#"<div role="{}">"#, category.as_str());
            assert!(classify(&html).contains(category), "{}", category);
        }
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let set = classify(r#"<div role="Main"></div><div ROLE="main"></div>"#);
        assert!(!set.contains(LandmarkCategory::Main));
        assert!(set.contains(LandmarkCategory::Other));
    }

    #[test]
    fn test_two_attributes_on_one_line_are_separate() {
        let set = classify(r#"<header role="banner"><nav role="navigation">"#);
        assert!(set.contains(LandmarkCategory::Banner));
        assert!(set.contains(LandmarkCategory::Navigation));
        assert!(!set.contains(LandmarkCategory::Other));
    }

    #[test]
    fn test_repeated_role_counts_once() {
        let set = classify(r#"<div role="form"></div><div role="form"></div>"#);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_value_is_other() {
        assert!(classify(r#"<div role="">"#).contains(LandmarkCategory::Other));
    }

    #[test]
    fn test_binary_input_does_not_fail() {
        let mut content = vec![0xff, 0xfe, 0x00];
        content.extend_from_slice(b"role=\"search\"");
        content.extend_from_slice(&[0xc3, 0x28]);
        let set = RoleAttributeClassifier.classify(&content);
        assert!(set.contains(LandmarkCategory::Search));

        let set = RoleAttributeClassifier.classify(b"role=\"\xff\xfe\"");
        assert!(set.contains(LandmarkCategory::Other));
    }
}
