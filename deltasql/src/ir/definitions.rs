use crate::ir::{
    types::{StructType, Type, TypeKind},
    Error,
};
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use std::sync::Arc;

lazy_static! {
    // Shared result type for nodes that do not produce a first-class
    // runtime value (comparators).
    static ref TYPE_ANY: Type = Type::any();
}

// Day number of 1970-01-01 in chrono's proleptic Gregorian day count.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Source-location metadata attached by the frontend. Carried by every
/// node so internal errors can name the construction site.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Origin {
    #[default]
    Unknown,
    Source(SourcePosition),
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl Origin {
    pub fn at(line: u32, column: u32) -> Self {
        Origin::Source(SourcePosition { line, column })
    }
}

/// The character encoding of a string literal. Always passed explicitly;
/// there is no ambient default.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Charset {
    Utf8,
    Ascii,
    Latin1,
    Utf16,
}

impl Charset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Ascii => "us-ascii",
            Charset::Latin1 => "iso-8859-1",
            Charset::Utf16 => "utf-16",
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// An expression node. Nodes are immutable once constructed; passes that
/// need a changed node build a replacement instead. Sub-expressions are
/// shared behind [`Arc`], so the program forms a DAG and a finished graph
/// can be read by concurrent passes without locking.
#[derive(PartialEq, Debug, Clone)]
pub enum Expression {
    Literal(Literal),
    Comparator(Comparator),
}

impl Expression {
    pub fn origin(&self) -> &Origin {
        match self {
            Expression::Literal(l) => l.origin(),
            Expression::Comparator(c) => c.origin(),
        }
    }

    pub fn result_type(&self) -> &Type {
        match self {
            Expression::Literal(l) => l.ty(),
            Expression::Comparator(c) => c.result_type(),
        }
    }
}

impl From<Literal> for Expression {
    fn from(l: Literal) -> Self {
        Expression::Literal(l)
    }
}

impl From<Comparator> for Expression {
    fn from(c: Comparator) -> Self {
        Expression::Comparator(c)
    }
}

/// A compile-time-known constant of a specific kind, possibly null. A
/// literal is null exactly when its payload is absent.
#[derive(PartialEq, Debug, Clone)]
pub enum Literal {
    Bool(BoolLiteral),
    Double(DoubleLiteral),
    Date(DateLiteral),
    String(StringLiteral),
    GeoPoint(GeoPointLiteral),
}

impl Literal {
    pub fn origin(&self) -> &Origin {
        match self {
            Literal::Bool(l) => &l.origin,
            Literal::Double(l) => &l.origin,
            Literal::Date(l) => &l.origin,
            Literal::String(l) => &l.origin,
            Literal::GeoPoint(l) => &l.origin,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Literal::Bool(l) => &l.ty,
            Literal::Double(l) => &l.ty,
            Literal::Date(l) => &l.ty,
            Literal::String(l) => &l.ty,
            Literal::GeoPoint(l) => &l.ty,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Literal::Bool(l) => l.value.is_none(),
            Literal::Double(l) => l.value.is_none(),
            Literal::Date(l) => l.value.is_none(),
            Literal::String(l) => l.value.is_none(),
            Literal::GeoPoint(l) => l.value.is_none(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Bool(_) => BoolLiteral::KIND,
            Literal::Double(_) => DoubleLiteral::KIND,
            Literal::Date(_) => DateLiteral::KIND,
            Literal::String(_) => StringLiteral::KIND,
            Literal::GeoPoint(_) => GeoPointLiteral::KIND,
        }
    }

    /// True iff both literals are the same kind with the same null-state
    /// and, when both non-null, the same payload. Object identity and the
    /// two types' nullability flags play no part.
    pub fn same_value(&self, other: &Literal) -> bool {
        use Literal::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.value == b.value,
            (Double(a), Double(b)) => match (a.value, b.value) {
                // Bit comparison so a NaN literal is equal to itself.
                (Some(x), Some(y)) => x.to_bits() == y.to_bits(),
                (None, None) => true,
                _ => false,
            },
            (Date(a), Date(b)) => a.value == b.value,
            (String(a), String(b)) => match (&a.value, &b.value) {
                // The encoding tag is part of the payload: equal character
                // sequences under different encodings emit differently.
                (Some(x), Some(y)) => x == y && a.charset == b.charset,
                (None, None) => true,
                _ => false,
            },
            (GeoPoint(a), GeoPoint(b)) => a.value == b.value,
            (Bool(_), _) | (Double(_), _) | (Date(_), _) | (String(_), _) | (GeoPoint(_), _) => {
                false
            }
        }
    }

    /// Returns a new literal of the same kind whose type has the given
    /// nullability. Forcing a null payload into a non-nullable type is an
    /// internal error; making the type nullable never nulls the payload.
    pub fn get_with_nullable(&self, nullable: bool) -> Result<Literal, Error> {
        if self.is_null() && !nullable {
            return Err(Error::NullWithNonNullableType {
                kind: self.kind_name(),
                origin: *self.origin(),
            });
        }
        Ok(match self {
            Literal::Bool(l) => Literal::Bool(BoolLiteral {
                ty: l.ty.with_nullable(nullable),
                ..l.clone()
            }),
            Literal::Double(l) => Literal::Double(DoubleLiteral {
                ty: l.ty.with_nullable(nullable),
                ..l.clone()
            }),
            Literal::Date(l) => Literal::Date(DateLiteral {
                ty: l.ty.with_nullable(nullable),
                ..l.clone()
            }),
            Literal::String(l) => Literal::String(StringLiteral {
                ty: l.ty.with_nullable(nullable),
                ..l.clone()
            }),
            Literal::GeoPoint(l) => Literal::GeoPoint(GeoPointLiteral {
                ty: l.ty.with_nullable(nullable),
                ..l.clone()
            }),
        })
    }
}

// A literal constructor checks two things: the target type has the shape
// of the literal's kind, and an absent payload is only accepted when the
// target type is nullable.
fn check_literal_type(
    kind: &'static str,
    expected: fn(&TypeKind) -> bool,
    ty: &Type,
    payload_present: bool,
    origin: Origin,
) -> Result<(), Error> {
    if !expected(&ty.kind) {
        return Err(Error::LiteralTypeMismatch {
            kind,
            ty: ty.clone(),
            origin,
        });
    }
    if !payload_present && !ty.nullable {
        return Err(Error::NullWithNonNullableType { kind, origin });
    }
    Ok(())
}

#[derive(PartialEq, Debug, Clone)]
pub struct BoolLiteral {
    origin: Origin,
    ty: Type,
    value: Option<bool>,
}

impl BoolLiteral {
    pub(crate) const KIND: &'static str = "bool";

    pub fn new(origin: Origin, ty: Type, value: Option<bool>) -> Result<Self, Error> {
        check_literal_type(
            Self::KIND,
            |k| matches!(k, TypeKind::Bool),
            &ty,
            value.is_some(),
            origin,
        )?;
        Ok(BoolLiteral { origin, ty, value })
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> Option<bool> {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct DoubleLiteral {
    origin: Origin,
    ty: Type,
    value: Option<f64>,
}

impl DoubleLiteral {
    pub(crate) const KIND: &'static str = "double";

    pub fn new(origin: Origin, ty: Type, value: Option<f64>) -> Result<Self, Error> {
        check_literal_type(
            Self::KIND,
            |k| matches!(k, TypeKind::Double),
            &ty,
            value.is_some(),
            origin,
        )?;
        Ok(DoubleLiteral { origin, ty, value })
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

/// A calendar date held as a day count relative to 1970-01-01.
#[derive(PartialEq, Debug, Clone)]
pub struct DateLiteral {
    origin: Origin,
    ty: Type,
    value: Option<i32>,
}

impl DateLiteral {
    pub(crate) const KIND: &'static str = "date";

    pub fn new(origin: Origin, ty: Type, value: Option<i32>) -> Result<Self, Error> {
        check_literal_type(
            Self::KIND,
            |k| matches!(k, TypeKind::Date),
            &ty,
            value.is_some(),
            origin,
        )?;
        Ok(DateLiteral { origin, ty, value })
    }

    /// Builds a date literal from calendar text such as `"2020-01-01"`.
    /// The frontend validates dates before lowering, so malformed text
    /// here is an internal error.
    pub fn from_text(origin: Origin, text: &str, nullable: bool) -> Result<Self, Error> {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
            Error::InvalidCalendarDate {
                text: text.to_string(),
                origin,
            }
        })?;
        let days = date.num_days_from_ce() - EPOCH_DAYS_FROM_CE;
        DateLiteral::new(origin, Type::date(nullable), Some(days))
    }

    /// A NULL date.
    pub fn null(origin: Origin) -> Self {
        DateLiteral {
            origin,
            ty: Type::date(true),
            value: None,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn days_since_epoch(&self) -> Option<i32> {
        self.value
    }

    /// The calendar view of the payload. `None` when the literal is null
    /// or the day count falls outside the representable calendar range.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let days = self.value?;
        NaiveDate::from_num_days_from_ce_opt(EPOCH_DAYS_FROM_CE.checked_add(days)?)
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

/// A character sequence plus its encoding tag.
#[derive(PartialEq, Debug, Clone)]
pub struct StringLiteral {
    origin: Origin,
    ty: Type,
    value: Option<String>,
    charset: Charset,
}

impl StringLiteral {
    pub(crate) const KIND: &'static str = "string";

    pub fn new(
        origin: Origin,
        ty: Type,
        value: Option<String>,
        charset: Charset,
    ) -> Result<Self, Error> {
        check_literal_type(
            Self::KIND,
            |k| matches!(k, TypeKind::String),
            &ty,
            value.is_some(),
            origin,
        )?;
        Ok(StringLiteral {
            origin,
            ty,
            value,
            charset,
        })
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

/// A geographic point built from two coordinate sub-expressions. The
/// coordinates live in one combined option, so a point with only one
/// coordinate present is not a representable state.
#[derive(PartialEq, Debug, Clone)]
pub struct GeoPointLiteral {
    origin: Origin,
    ty: Type,
    value: Option<(Arc<Expression>, Arc<Expression>)>,
}

impl GeoPointLiteral {
    pub(crate) const KIND: &'static str = "geopoint";

    pub fn new(
        origin: Origin,
        ty: Type,
        value: Option<(Arc<Expression>, Arc<Expression>)>,
    ) -> Result<Self, Error> {
        check_literal_type(
            Self::KIND,
            |k| matches!(k, TypeKind::GeoPoint),
            &ty,
            value.is_some(),
            origin,
        )?;
        Ok(GeoPointLiteral { origin, ty, value })
    }

    /// A NULL geo-point.
    pub fn null(origin: Origin) -> Self {
        GeoPointLiteral {
            origin,
            ty: Type::geo_point(true),
            value: None,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The left and right coordinate expressions, in visitation order.
    pub fn coordinates(&self) -> Option<(&Arc<Expression>, &Arc<Expression>)> {
        self.value.as_ref().map(|(l, r)| (l, r))
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

/// A sort-key descriptor for ORDER BY lowering. Comparators chain: the
/// anchor names the row tuple type and each link adds one sort key, least
/// significant last. Passes read the chain directly rather than
/// traversing it, so comparators are leaves of the visitor protocol.
#[derive(PartialEq, Debug, Clone)]
pub enum Comparator {
    NoComparator(NoComparator),
    FieldComparator(FieldComparator),
}

/// The chain anchor: orders nothing, carries the tuple type.
#[derive(PartialEq, Debug, Clone)]
pub struct NoComparator {
    origin: Origin,
    tuple_type: Type,
}

/// One sort key appended to an existing chain.
#[derive(PartialEq, Debug, Clone)]
pub struct FieldComparator {
    origin: Origin,
    source: Box<Comparator>,
    field: usize,
    direction: SortDirection,
}

impl NoComparator {
    pub fn new(origin: Origin, tuple_type: Type) -> Result<Self, Error> {
        if tuple_type.as_tuple().is_none() {
            return Err(Error::NonTupleComparator {
                ty: tuple_type,
                origin,
            });
        }
        Ok(NoComparator { origin, tuple_type })
    }
}

impl FieldComparator {
    pub fn new(
        origin: Origin,
        source: Comparator,
        field: usize,
        direction: SortDirection,
    ) -> Result<Self, Error> {
        let arity = match source.tuple_type().as_tuple() {
            Some(elements) => elements.len(),
            None => unreachable!("comparator chains anchor at a tuple type"),
        };
        if field >= arity {
            return Err(Error::SortFieldOutOfRange {
                field,
                ty: source.tuple_type().clone(),
                origin,
            });
        }
        Ok(FieldComparator {
            origin,
            source: Box::new(source),
            field,
            direction,
        })
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn source(&self) -> &Comparator {
        &self.source
    }
}

impl Comparator {
    pub fn origin(&self) -> &Origin {
        match self {
            Comparator::NoComparator(c) => &c.origin,
            Comparator::FieldComparator(c) => &c.origin,
        }
    }

    /// The type of the tuple whose rows are being compared, found at the
    /// chain anchor.
    pub fn tuple_type(&self) -> &Type {
        match self {
            Comparator::NoComparator(c) => &c.tuple_type,
            Comparator::FieldComparator(c) => c.source.tuple_type(),
        }
    }

    /// Comparators do not produce a first-class runtime value.
    pub fn result_type(&self) -> &'static Type {
        &TYPE_ANY
    }

    /// The ordered sort keys, most significant first. Consumed by the
    /// code generator to emit row-ordering functions.
    pub fn sort_fields(&self) -> Vec<(usize, SortDirection)> {
        match self {
            Comparator::NoComparator(_) => Vec::new(),
            Comparator::FieldComparator(c) => {
                let mut fields = c.source.sort_fields();
                fields.push((c.field, c.direction));
                fields
            }
        }
    }
}

impl From<NoComparator> for Comparator {
    fn from(c: NoComparator) -> Self {
        Comparator::NoComparator(c)
    }
}

impl From<FieldComparator> for Comparator {
    fn from(c: FieldComparator) -> Self {
        Comparator::FieldComparator(c)
    }
}

/// A declaration-only node binding a name to a struct layout. It has no
/// runtime value; the backend reads it to emit type definitions.
#[derive(PartialEq, Debug, Clone)]
pub struct StructItem {
    origin: Origin,
    ty: Type,
}

impl StructItem {
    pub fn new(origin: Origin, declaration: StructType) -> Self {
        StructItem {
            origin,
            ty: Type::new(TypeKind::Struct(declaration), false),
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn struct_type(&self) -> &StructType {
        match self.ty.as_struct() {
            Some(s) => s,
            None => unreachable!("struct items always carry a struct type"),
        }
    }

    /// Structural comparison of the declared layouts; origins are not
    /// part of a declaration's identity.
    pub fn same_fields(&self, other: &StructItem) -> bool {
        self.struct_type() == other.struct_type()
    }
}
