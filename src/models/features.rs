use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One feature returned by an attribute layer query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Feature {
    /// Build a feature from attribute pairs. Convenience for tests and
    /// in-process service implementations.
    pub fn with_attributes<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// String attribute accessor; non-string values are not coerced.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }
}

/// Ordered query result from one attribute layer. An empty set means the
/// point matched no feature on that layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Result of the elevation lookup: the queried point with its z value in
/// meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationResult {
    /// Elevation in meters above datum.
    pub z: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_attribute_access() {
        let feature = Feature::with_attributes([
            ("instName", json!("Columbia County")),
            ("OBJECTID", json!(7)),
        ]);
        assert_eq!(feature.attribute_str("instName"), Some("Columbia County"));
        assert_eq!(feature.attribute("OBJECTID"), Some(&json!(7)));
        assert_eq!(feature.attribute_str("OBJECTID"), None);
        assert_eq!(feature.attribute_str("missing"), None);
    }

    #[test]
    fn test_empty_feature_set_is_no_match() {
        let set = FeatureSet::empty();
        assert!(set.is_empty());
        assert!(set.first().is_none());
    }
}
