use crate::{ir::Error, util::unique_ordered_map::UniqueOrderedMap};

/// The shape of a value, without nullability. Adding a variant here is
/// intentionally loud: every dispatch over kinds matches exhaustively.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum TypeKind {
    Bool,
    Double,
    Date,
    String,
    GeoPoint,
    Tuple(Vec<Type>),
    Struct(StructType),
    // The result type of comparator expressions, which do not produce a
    // first-class runtime value.
    Any,
}

/// A shape plus a nullability flag. Nullability is part of the type, not a
/// separate runtime tag; structural equality compares both.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Type {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl Type {
    pub fn new(kind: TypeKind, nullable: bool) -> Self {
        Type { kind, nullable }
    }

    pub fn boolean(nullable: bool) -> Self {
        Type::new(TypeKind::Bool, nullable)
    }

    pub fn double(nullable: bool) -> Self {
        Type::new(TypeKind::Double, nullable)
    }

    pub fn date(nullable: bool) -> Self {
        Type::new(TypeKind::Date, nullable)
    }

    pub fn string(nullable: bool) -> Self {
        Type::new(TypeKind::String, nullable)
    }

    pub fn geo_point(nullable: bool) -> Self {
        Type::new(TypeKind::GeoPoint, nullable)
    }

    pub fn tuple(elements: Vec<Type>, nullable: bool) -> Self {
        Type::new(TypeKind::Tuple(elements), nullable)
    }

    pub fn any() -> Self {
        Type::new(TypeKind::Any, false)
    }

    /// Returns a type identical to this one except for its nullability
    /// flag. The receiver is unchanged.
    pub fn with_nullable(&self, nullable: bool) -> Type {
        Type {
            kind: self.kind.clone(),
            nullable,
        }
    }

    /// Value-compatible comparison: shapes must match, the two types' own
    /// nullability flags are ignored.
    pub fn same_shape(&self, other: &Type) -> bool {
        self.kind == other.kind
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match &self.kind {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Type]> {
        match &self.kind {
            TypeKind::Tuple(elements) => Some(elements),
            _ => None,
        }
    }
}

/// A named record layout: field order and field-name uniqueness are both
/// semantic, so fields live in an insertion-ordered unique-key map.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct StructType {
    pub name: String,
    fields: UniqueOrderedMap<String, Type>,
}

impl StructType {
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (String, Type)>,
    ) -> Result<Self, Error> {
        Ok(StructType {
            name: name.into(),
            fields: UniqueOrderedMap::from_entries(fields)?,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Type)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
