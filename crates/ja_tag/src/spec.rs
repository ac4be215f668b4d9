use core::fmt;

use crate::TagError;

/// Separator between descriptor components.
pub const SEPARATOR: char = ',';

/// The only supported option component.
pub const OMIT_EMPTY: &str = "omitempty";

/// Marker of the client generated id descriptor.
pub const CLIENT_ID: &str = "client-id";

const PRIMARY: &str = "primary";
const ATTRIBUTE: &str = "attr";
const RELATION: &str = "relation";

// -----------------------------------------------------------------------------
// Role

/// What a field contributes to its resource node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The resource id; the descriptor name is the resource type.
    Primary,
    /// A client generated id.
    ClientId,
    /// An entry of `attributes`.
    Attribute,
    /// An entry of `relationships`.
    Relation,
}

impl Role {
    /// The first descriptor component selecting this role.
    #[inline]
    pub const fn marker(self) -> &'static str {
        match self {
            Role::Primary => PRIMARY,
            Role::ClientId => CLIENT_ID,
            Role::Attribute => ATTRIBUTE,
            Role::Relation => RELATION,
        }
    }

    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            PRIMARY => Some(Role::Primary),
            CLIENT_ID => Some(Role::ClientId),
            ATTRIBUTE => Some(Role::Attribute),
            RELATION => Some(Role::Relation),
            _ => None,
        }
    }

    // (min, max, human readable) component count.
    const fn arity(self) -> (usize, usize, &'static str) {
        match self {
            Role::Primary => (2, 2, "exactly 2"),
            Role::ClientId => (1, 1, "exactly 1"),
            Role::Attribute | Role::Relation => (2, 3, "2 or 3"),
        }
    }
}

impl fmt::Display for Role {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

// -----------------------------------------------------------------------------
// FieldSpec

/// A parsed field descriptor.
///
/// For [`Role::Primary`] the `name` is the resource type, for
/// [`Role::ClientId`] it is empty, otherwise it is the wire name of the
/// attribute or relationship.
///
/// # Examples
///
/// ```
/// use ja_tag::{FieldSpec, Role, TagError};
///
/// let spec = FieldSpec::parse("primary,people").unwrap();
/// assert_eq!(spec, FieldSpec::primary("people"));
///
/// let spec = FieldSpec::parse("relation,comments,omitempty").unwrap();
/// assert_eq!(spec.role, Role::Relation);
/// assert!(spec.omit_empty);
///
/// assert!(matches!(FieldSpec::parse("client-id,x"), Err(TagError::Arity { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec<'a> {
    pub role: Role,
    pub name: &'a str,
    pub omit_empty: bool,
}

impl<'a> FieldSpec<'a> {
    /// `primary,<resource_type>`
    #[inline]
    pub const fn primary(resource_type: &'a str) -> Self {
        Self {
            role: Role::Primary,
            name: resource_type,
            omit_empty: false,
        }
    }

    /// `client-id`
    #[inline]
    pub const fn client_id() -> Self {
        Self {
            role: Role::ClientId,
            name: "",
            omit_empty: false,
        }
    }

    /// `attr,<name>[,omitempty]`
    #[inline]
    pub const fn attribute(name: &'a str, omit_empty: bool) -> Self {
        Self {
            role: Role::Attribute,
            name,
            omit_empty,
        }
    }

    /// `relation,<name>[,omitempty]`
    #[inline]
    pub const fn relation(name: &'a str, omit_empty: bool) -> Self {
        Self {
            role: Role::Relation,
            name,
            omit_empty,
        }
    }

    /// Parses a resource field descriptor.
    pub fn parse(descriptor: &'a str) -> Result<Self, TagError> {
        if descriptor.is_empty() {
            return Err(TagError::Empty);
        }

        let count = descriptor.split(SEPARATOR).count();
        let mut parts = descriptor.split(SEPARATOR);

        let marker = parts.next().unwrap_or_default();
        let role =
            Role::from_marker(marker).ok_or_else(|| TagError::UnknownRole(marker.into()))?;

        let (min, max, expected) = role.arity();
        if count < min || count > max {
            return Err(TagError::Arity {
                role,
                expected,
                found: count,
            });
        }

        let name = parts.next().unwrap_or_default();
        if role != Role::ClientId && name.is_empty() {
            return Err(TagError::EmptyName(role));
        }

        let omit_empty = parse_option(parts.next())?;

        Ok(Self {
            role,
            name,
            omit_empty,
        })
    }

    /// Parses a meta field descriptor, `<name>[,omitempty]`.
    ///
    /// Any non-empty first component is accepted as the wire name, the
    /// result always has [`Role::Attribute`].
    pub fn parse_meta(descriptor: &'a str) -> Result<Self, TagError> {
        if descriptor.is_empty() {
            return Err(TagError::Empty);
        }

        let count = descriptor.split(SEPARATOR).count();
        if count > 2 {
            return Err(TagError::Arity {
                role: Role::Attribute,
                expected: "1 or 2",
                found: count,
            });
        }

        let mut parts = descriptor.split(SEPARATOR);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(TagError::EmptyName(Role::Attribute));
        }

        let omit_empty = parse_option(parts.next())?;

        Ok(Self::attribute(name, omit_empty))
    }
}

fn parse_option(option: Option<&str>) -> Result<bool, TagError> {
    match option {
        None => Ok(false),
        Some(OMIT_EMPTY) => Ok(true),
        Some(_) => Err(TagError::UnknownOption),
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldSpec, Role};
    use crate::TagError;
    use alloc::string::ToString;

    #[test]
    fn parse_valid() {
        assert_eq!(
            FieldSpec::parse("primary,people"),
            Ok(FieldSpec::primary("people"))
        );
        assert_eq!(FieldSpec::parse("client-id"), Ok(FieldSpec::client_id()));
        assert_eq!(
            FieldSpec::parse("attr,name"),
            Ok(FieldSpec::attribute("name", false))
        );
        assert_eq!(
            FieldSpec::parse("attr,name,omitempty"),
            Ok(FieldSpec::attribute("name", true))
        );
        assert_eq!(
            FieldSpec::parse("relation,pet"),
            Ok(FieldSpec::relation("pet", false))
        );
        assert_eq!(
            FieldSpec::parse("relation,pets,omitempty"),
            Ok(FieldSpec::relation("pets", true))
        );
    }

    #[test]
    fn parse_arity() {
        let cases = [
            ("primary", Role::Primary, 1),
            ("primary,people,omitempty", Role::Primary, 3),
            ("client-id,cid", Role::ClientId, 2),
            ("attr", Role::Attribute, 1),
            ("attr,name,omitempty,extra", Role::Attribute, 4),
            ("relation", Role::Relation, 1),
        ];

        for (descriptor, role, found) in cases {
            match FieldSpec::parse(descriptor) {
                Err(TagError::Arity {
                    role: r, found: f, ..
                }) => {
                    assert_eq!(r, role, "{descriptor}");
                    assert_eq!(f, found, "{descriptor}");
                }
                other => panic!("{descriptor}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn parse_rejects() {
        assert_eq!(FieldSpec::parse(""), Err(TagError::Empty));
        assert_eq!(
            FieldSpec::parse("attribute,name"),
            Err(TagError::UnknownRole("attribute".to_string()))
        );
        assert_eq!(
            FieldSpec::parse("attr,name,omitzero"),
            Err(TagError::UnknownOption)
        );
        assert_eq!(
            FieldSpec::parse("attr,"),
            Err(TagError::EmptyName(Role::Attribute))
        );
        assert_eq!(
            FieldSpec::parse("primary,"),
            Err(TagError::EmptyName(Role::Primary))
        );
    }

    #[test]
    fn parse_meta() {
        assert_eq!(
            FieldSpec::parse_meta("total"),
            Ok(FieldSpec::attribute("total", false))
        );
        assert_eq!(
            FieldSpec::parse_meta("total,omitempty"),
            Ok(FieldSpec::attribute("total", true))
        );
        // Markers are plain names for meta objects.
        assert_eq!(
            FieldSpec::parse_meta("primary"),
            Ok(FieldSpec::attribute("primary", false))
        );

        assert_eq!(FieldSpec::parse_meta(""), Err(TagError::Empty));
        assert_eq!(
            FieldSpec::parse_meta("total,always"),
            Err(TagError::UnknownOption)
        );
        assert!(matches!(
            FieldSpec::parse_meta("total,omitempty,x"),
            Err(TagError::Arity { found: 3, .. })
        ));
        assert_eq!(
            FieldSpec::parse_meta(",omitempty"),
            Err(TagError::EmptyName(Role::Attribute))
        );
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Primary.to_string(), "primary");
        assert_eq!(Role::ClientId.to_string(), "client-id");
        assert_eq!(Role::Attribute.to_string(), "attr");
        assert_eq!(Role::Relation.to_string(), "relation");
    }
}
