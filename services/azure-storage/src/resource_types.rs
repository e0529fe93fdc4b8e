use std::fmt;

/// A resource type an account SAS can grant access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// `s`, service level APIs.
    Service,
    /// `c`, container level APIs.
    Container,
    /// `o`, object level APIs.
    Object,
}

impl ResourceType {
    /// Look up a resource type by its wire code.
    pub fn from_code(code: char) -> Option<ResourceType> {
        match code {
            's' => Some(ResourceType::Service),
            'c' => Some(ResourceType::Container),
            'o' => Some(ResourceType::Object),
            _ => None,
        }
    }

    /// Wire code of this resource type.
    pub fn code(&self) -> char {
        match self {
            ResourceType::Service => 's',
            ResourceType::Container => 'c',
            ResourceType::Object => 'o',
        }
    }
}

/// Signed resource types (`srt`) of an account SAS, in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedResourceTypes(Vec<ResourceType>);

impl SignedResourceTypes {
    /// Parse resource types, dropping unknown characters.
    pub fn parse(resource_types: &str) -> Self {
        Self(
            resource_types
                .chars()
                .filter_map(ResourceType::from_code)
                .collect(),
        )
    }

    /// Whether no resource type has been parsed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `resource_type` is granted.
    pub fn contains(&self, resource_type: ResourceType) -> bool {
        self.0.contains(&resource_type)
    }

    /// The resource types in the order given.
    pub fn as_slice(&self) -> &[ResourceType] {
        &self.0
    }
}

impl fmt::Display for SignedResourceTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for resource_type in &self.0 {
            write!(f, "{}", resource_type.code())?;
        }
        Ok(())
    }
}
