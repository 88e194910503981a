use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use serde::{Serialize, Serializer};

use super::{EntityKind, kind::UnknownKindError};

/// A record type with a system-assigned identity.
pub trait Entity: Sized {
    /// The kind tag of this record type.
    const KIND: EntityKind;

    /// The record's identifier.
    fn id(&self) -> Id<Self>;

    /// The canonical reference to this record's detail view.
    fn reference(&self) -> Reference {
        self.id().reference()
    }
}

/// A typed record identifier.
///
/// The type parameter prevents an identifier of one kind of record from
/// being used to look up another kind.
pub struct Id<T> {
    raw: i64,
    kind: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wraps a raw database identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self {
            raw,
            kind: PhantomData,
        }
    }

    /// The raw database identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.raw
    }
}

impl<T: Entity> Id<T> {
    /// The canonical reference for the record with this identifier.
    #[must_use]
    pub const fn reference(self) -> Reference {
        Reference::new(T::KIND, self.raw)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.raw)
    }
}

/// An addressable link to one record, rendered as `/<kind>/<id>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    kind: EntityKind,
    id: i64,
}

impl Reference {
    /// Creates a reference to the record of `kind` with the raw identifier.
    #[must_use]
    pub const fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// The kind of the referenced record.
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        self.kind
    }

    /// The raw identifier of the referenced record.
    #[must_use]
    pub const fn id(self) -> i64 {
        self.id
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}/", self.kind, self.id)
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when a string is not a valid record reference.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReferenceError {
    /// The reference does not have exactly two path segments.
    #[error("invalid reference '{0}': expected '/<kind>/<id>/'")]
    Malformed(String),
    /// The first segment is not a record kind.
    #[error(transparent)]
    Kind(#[from] UnknownKindError),
    /// The second segment is not an integer.
    #[error("invalid record id '{0}'")]
    Id(String),
}

impl FromStr for Reference {
    type Err = ReferenceError;

    /// Parses `/course/1/`; the leading and trailing slashes are optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.trim().trim_matches('/').split('/').collect();
        let [kind, id] = segments.as_slice() else {
            return Err(ReferenceError::Malformed(s.to_string()));
        };
        let kind: EntityKind = kind.parse()?;
        let id: i64 = id
            .parse()
            .map_err(|_| ReferenceError::Id((*id).to_string()))?;
        Ok(Self { kind, id })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn reference_renders_as_path() {
        let reference = Reference::new(EntityKind::Course, 12);
        assert_eq!(reference.to_string(), "/course/12/");
    }

    #[test_case("/section/3/"; "canonical")]
    #[test_case("section/3"; "without slashes")]
    #[test_case("/sections/3"; "plural kind")]
    fn parses_reference(input: &str) {
        let reference: Reference = input.parse().unwrap();
        assert_eq!(reference, Reference::new(EntityKind::Section, 3));
    }

    #[test]
    fn rejects_malformed_reference() {
        assert_eq!(
            "/section/".parse::<Reference>().unwrap_err(),
            ReferenceError::Malformed("/section/".to_string())
        );
        assert_eq!(
            "/section/abc/".parse::<Reference>().unwrap_err(),
            ReferenceError::Id("abc".to_string())
        );
        assert!(matches!(
            "/professor/1/".parse::<Reference>().unwrap_err(),
            ReferenceError::Kind(_)
        ));
    }

    #[test]
    fn ids_compare_by_raw_value() {
        let a: Id<()> = Id::new(1);
        let b: Id<()> = Id::new(2);
        assert!(a < b);
        assert_eq!(a, Id::new(1));
        assert_eq!(format!("{a:?}"), "Id(1)");
    }
}
