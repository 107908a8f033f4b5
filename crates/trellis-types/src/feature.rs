use serde::{Deserialize, Serialize};

/// Installed extension (module or theme) as seen on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInfo {
    /// Extension identifier, usually its directory name
    pub id: String,
    /// Location relative to the content root, e.g. `modules/Blog`
    pub sub_path: String,
}

/// A feature exposed by an extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDescriptor {
    pub id: String,
    /// Display name
    pub name: String,
    pub extension: ExtensionInfo,
}

impl FeatureDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sub_path: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            name: name.into(),
            extension: ExtensionInfo {
                id: id.clone(),
                sub_path: sub_path.into(),
            },
            id,
        }
    }

    /// Whether this feature's extension path occurs inside `base_path`
    pub fn owns_path(&self, base_path: &str) -> bool {
        base_path.contains(self.extension.sub_path.as_str())
    }
}

/// Name of the first feature in `features` owning `base_path`
///
/// Enumeration order decides ties.
pub fn find_owning_feature<'a>(
    features: &'a [FeatureDescriptor],
    base_path: &str,
) -> Option<&'a FeatureDescriptor> {
    features.iter().find(|feature| feature.owns_path(base_path))
}
