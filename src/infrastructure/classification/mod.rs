mod role_attribute_classifier;

pub use role_attribute_classifier::RoleAttributeClassifier;
