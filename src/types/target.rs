//! Identifier types for pointer targets and pointer sources

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Create a new id from anything string-like
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(Arc::from(id.as_ref()))
            }

            /// Borrow the id as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(Arc::from(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

string_id!(
    /// Stable identifier of an interactive UI element.
    ///
    /// The core never validates that a target exists; ids are opaque handles
    /// owned by the UI layer.
    TargetId
);

string_id!(
    /// Identifier of an independent pointer source (one controller ray).
    SourceId
);

/// An interactive element as seen by the focus registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    /// Enclosing element, if this is a sub-button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TargetId>,
    /// Sub-elements shown only while this target holds focus
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TargetId>,
}

impl Target {
    /// Create a leaf target with no parent and no children
    pub fn new(id: impl Into<TargetId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a target that expands into the given children
    pub fn with_children<I, T>(id: impl Into<TargetId>, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        Self {
            id: id.into(),
            parent: None,
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the enclosing element
    pub fn parent(mut self, parent: impl Into<TargetId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
