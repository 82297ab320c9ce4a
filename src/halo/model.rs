use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentOwner {
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectRef {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentSpec {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub owner: Option<CommentOwner>,
    #[serde(default, rename = "subjectRef")]
    pub subject_ref: Option<SubjectRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: CommentSpec,
}

impl Comment {
    pub fn id(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.spec
            .owner
            .as_ref()
            .and_then(|owner| owner.display_name.as_deref())
    }

    /// Name of the post this comment hangs off.
    pub fn subject_name(&self) -> Option<&str> {
        self.spec
            .subject_ref
            .as_ref()
            .and_then(|subject| subject.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Comment>,
}

/// Halo sends `null` for empty collections on some versions.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
