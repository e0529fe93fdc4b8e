use std::fmt;

use crate::version::{SignedVersion, VersionRequirement};

/// A single signed permission (`sp`) flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `r`
    Read,
    /// `a`
    Add,
    /// `c`
    Create,
    /// `w`
    Write,
    /// `d`
    Delete,
    /// `x`
    DeleteVersion,
    /// `y`
    PermanentDelete,
    /// `l`
    List,
    /// `t`
    Tags,
    /// `m`
    Move,
    /// `e`
    Execute,
    /// `o`
    Ownership,
    /// `p`
    Permissions,
}

/// Static description of a permission flag.
#[derive(Debug, Clone, Copy)]
pub struct PermissionSpec {
    /// The flag described.
    pub permission: Permission,
    /// Wire code of the flag.
    pub code: char,
    /// Human readable name.
    pub name: &'static str,
    /// What the flag grants.
    pub description: &'static str,
    /// First version the flag is accepted in.
    pub requirement: VersionRequirement,
}

const NUM_PERMISSIONS: usize = 13;

/// Permission table in canonical order, `racwdxyltmeop`.
///
/// A flag's index in this table is its position in the rendered value.
///
/// - [Permissions for a directory, container, or blob](https://learn.microsoft.com/en-us/rest/api/storageservices/create-service-sas#permissions-for-a-directory-container-or-blob)
pub static PERMISSIONS: [PermissionSpec; NUM_PERMISSIONS] = [
    PermissionSpec {
        permission: Permission::Read,
        code: 'r',
        name: "Read",
        description: "Read the content, block list, properties, and metadata of any blob in the container or directory.",
        requirement: VersionRequirement::All,
    },
    PermissionSpec {
        permission: Permission::Add,
        code: 'a',
        name: "Add",
        description: "Add a block to an append blob.",
        requirement: VersionRequirement::All,
    },
    PermissionSpec {
        permission: Permission::Create,
        code: 'c',
        name: "Create",
        description: "Write a new blob, snapshot a blob, or copy a blob to a new blob.",
        requirement: VersionRequirement::All,
    },
    PermissionSpec {
        permission: Permission::Write,
        code: 'w',
        name: "Write",
        description: "Create or write content, properties, metadata, or block list.",
        requirement: VersionRequirement::All,
    },
    PermissionSpec {
        permission: Permission::Delete,
        code: 'd',
        name: "Delete",
        description: "Delete a blob.",
        requirement: VersionRequirement::All,
    },
    PermissionSpec {
        permission: Permission::DeleteVersion,
        code: 'x',
        name: "Delete version",
        description: "Delete a blob version.",
        requirement: VersionRequirement::Since(SignedVersion::V2019_12_12),
    },
    PermissionSpec {
        permission: Permission::PermanentDelete,
        code: 'y',
        name: "Permanent delete",
        description: "Permanently delete a blob snapshot or version.",
        requirement: VersionRequirement::Since(SignedVersion::V2020_02_10),
    },
    PermissionSpec {
        permission: Permission::List,
        code: 'l',
        name: "List",
        description: "List blobs non-recursively.",
        requirement: VersionRequirement::All,
    },
    PermissionSpec {
        permission: Permission::Tags,
        code: 't',
        name: "Tags",
        description: "Read or write the tags on a blob.",
        requirement: VersionRequirement::Since(SignedVersion::V2019_12_12),
    },
    PermissionSpec {
        permission: Permission::Move,
        code: 'm',
        name: "Move",
        description: "Move a blob or a directory and its contents to a new location.",
        requirement: VersionRequirement::Since(SignedVersion::V2020_02_10),
    },
    PermissionSpec {
        permission: Permission::Execute,
        code: 'e',
        name: "Execute",
        description: "Get the system properties and, if the hierarchical namespace is enabled, the POSIX ACL of a blob.",
        requirement: VersionRequirement::Since(SignedVersion::V2020_02_10),
    },
    PermissionSpec {
        permission: Permission::Ownership,
        code: 'o',
        name: "Ownership",
        description: "Set the owner or the owning group when the hierarchical namespace is enabled.",
        requirement: VersionRequirement::Since(SignedVersion::V2020_02_10),
    },
    PermissionSpec {
        permission: Permission::Permissions,
        code: 'p',
        name: "Permissions",
        description: "Set permissions and POSIX ACLs on directories and blobs when the hierarchical namespace is enabled.",
        requirement: VersionRequirement::Since(SignedVersion::V2020_02_10),
    },
];

impl Permission {
    /// Look up a permission by its wire code, case-insensitively.
    pub fn from_code(code: char) -> Option<Permission> {
        let code = code.to_ascii_lowercase();
        PERMISSIONS
            .iter()
            .find(|spec| spec.code == code)
            .map(|spec| spec.permission)
    }

    /// The static description of this permission.
    pub fn spec(&self) -> &'static PermissionSpec {
        &PERMISSIONS[self.index()]
    }

    /// Wire code of this permission.
    pub fn code(&self) -> char {
        self.spec().code
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Signed permissions (`sp`) of an account SAS.
///
/// Flags are kept in canonical slots, so the rendered value never depends on
/// input order. Flags newer than the signed version are left out when
/// rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedPermissions {
    version: SignedVersion,
    /// Set once any known flag has been parsed, even if the version later
    /// filters every flag out.
    has_values: bool,
    permissions: [Option<Permission>; NUM_PERMISSIONS],
}

impl SignedPermissions {
    /// Parse permissions for the given signed version.
    ///
    /// Unknown characters are dropped, duplicates collapse into their slot.
    pub fn parse(version: SignedVersion, permissions: &str) -> Self {
        let mut sp = SignedPermissions {
            version,
            has_values: false,
            permissions: [None; NUM_PERMISSIONS],
        };

        for permission in permissions.trim().chars().filter_map(Permission::from_code) {
            sp.permissions[permission.index()] = Some(permission);
            sp.has_values = true;
        }

        sp
    }

    /// The signed version permissions are rendered for.
    pub fn version(&self) -> SignedVersion {
        self.version
    }

    /// Whether any known flag was supplied.
    ///
    /// Decides if `sp` goes into the query, independent of whether the
    /// rendered value ends up empty.
    pub fn has_values(&self) -> bool {
        self.has_values
    }

    /// Check whether `permission` will be granted by the rendered value.
    pub fn contains(&self, permission: Permission) -> bool {
        self.iter().any(|p| p == permission)
    }

    /// Iterate over the granted permissions in canonical order, version
    /// filtered.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions
            .iter()
            .flatten()
            .copied()
            .filter(|p| p.spec().requirement.is_satisfied_by(self.version))
    }
}

impl fmt::Display for SignedPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for permission in self.iter() {
            write!(f, "{}", permission.code())?;
        }
        Ok(())
    }
}
