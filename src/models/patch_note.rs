//! Patch notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{key_of, lenient, lenient_vec, parse_date, ContentType, Select};

select_key! {
    PatchType {
        Major => "major", "Major Update";
        Bugfix => "bugfix", "Bug Fix";
        Balance => "balance", "Balance";
        NewContent => "newcontent", "New Content";
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceChange {
    #[serde(default, deserialize_with = "lenient")]
    pub character: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewFeature {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// Metadata of a `patch-notes` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatchNoteMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub patch_type: Option<Select<PatchType>>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub balance_changes: Vec<BalanceChange>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub bug_fixes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub new_features: Vec<NewFeature>,
    #[serde(default, deserialize_with = "lenient")]
    pub download_size: Option<String>,
}

impl PatchNoteMetadata {
    pub fn patch_type_key(&self) -> Option<PatchType> {
        key_of(&self.patch_type)
    }

    pub fn released(&self) -> Option<DateTime<Utc>> {
        self.release_date.as_deref().and_then(parse_date)
    }
}

impl ContentType for PatchNoteMetadata {
    const OBJECT_TYPE: &'static str = "patch-notes";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bug_fixes_drop_non_strings() {
        let meta: PatchNoteMetadata = serde_json::from_value(json!({
            "release_date": "2024-05-10",
            "patch_type": { "key": "newcontent", "value": "New Content" },
            "bug_fixes": ["Fixed door clipping", 42, "Fixed audio desync"]
        }))
        .unwrap();
        assert_eq!(meta.bug_fixes.len(), 2);
        assert_eq!(meta.patch_type_key(), Some(PatchType::NewContent));
        assert!(meta.released().is_some());
    }
}
