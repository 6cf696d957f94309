use crate::ir::{
    definitions::{
        BoolLiteral, Comparator, DateLiteral, DoubleLiteral, Expression, GeoPointLiteral, Literal,
        StringLiteral, StructItem,
    },
    types::{StructType, Type, TypeKind},
};
use itertools::Itertools;

/// Canonical text rendering. The code generator emits literal text from
/// these forms verbatim, so they are stable: a null literal is
/// `(<type>)null`, a non-null literal renders its payload
/// kind-specifically.
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

// Escape double quotes and control characters, then wrap in double quotes.
fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn null_of(ty: &Type) -> String {
    format!("({})null", ty.pretty_print())
}

impl PrettyPrint for Type {
    fn pretty_print(&self) -> String {
        if self.nullable {
            format!("{}?", self.kind.pretty_print())
        } else {
            self.kind.pretty_print()
        }
    }
}

impl PrettyPrint for TypeKind {
    fn pretty_print(&self) -> String {
        match self {
            TypeKind::Bool => "bool".to_string(),
            TypeKind::Double => "double".to_string(),
            TypeKind::Date => "date".to_string(),
            TypeKind::String => "string".to_string(),
            TypeKind::GeoPoint => "geopoint".to_string(),
            TypeKind::Tuple(elements) => format!(
                "tuple({})",
                elements.iter().map(|t| t.pretty_print()).join(", ")
            ),
            TypeKind::Struct(s) => s.pretty_print(),
            TypeKind::Any => "any".to_string(),
        }
    }
}

impl PrettyPrint for StructType {
    fn pretty_print(&self) -> String {
        format!(
            "struct {} {{{}}}",
            self.name,
            self.fields()
                .map(|(name, ty)| format!("{}: {}", name, ty.pretty_print()))
                .join(", ")
        )
    }
}

impl PrettyPrint for Expression {
    fn pretty_print(&self) -> String {
        match self {
            Expression::Literal(l) => l.pretty_print(),
            Expression::Comparator(c) => c.pretty_print(),
        }
    }
}

impl PrettyPrint for Literal {
    fn pretty_print(&self) -> String {
        match self {
            Literal::Bool(l) => l.pretty_print(),
            Literal::Double(l) => l.pretty_print(),
            Literal::Date(l) => l.pretty_print(),
            Literal::String(l) => l.pretty_print(),
            Literal::GeoPoint(l) => l.pretty_print(),
        }
    }
}

impl PrettyPrint for BoolLiteral {
    fn pretty_print(&self) -> String {
        match self.value() {
            Some(true) => "true".to_string(),
            Some(false) => "false".to_string(),
            None => null_of(self.ty()),
        }
    }
}

impl PrettyPrint for DoubleLiteral {
    fn pretty_print(&self) -> String {
        match self.value() {
            // Debug formatting keeps the decimal point on round values.
            Some(v) => format!("{v:?}"),
            None => null_of(self.ty()),
        }
    }
}

impl PrettyPrint for DateLiteral {
    fn pretty_print(&self) -> String {
        match self.days_since_epoch() {
            Some(days) => match self.calendar_date() {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                // Day counts outside the calendar range render raw.
                None => days.to_string(),
            },
            None => null_of(self.ty()),
        }
    }
}

impl PrettyPrint for StringLiteral {
    fn pretty_print(&self) -> String {
        match self.value() {
            Some(s) => double_quote(s),
            None => null_of(self.ty()),
        }
    }
}

impl PrettyPrint for GeoPointLiteral {
    fn pretty_print(&self) -> String {
        match self.coordinates() {
            Some((left, right)) => format!(
                "{}({}, {})",
                self.ty().pretty_print(),
                left.pretty_print(),
                right.pretty_print()
            ),
            None => null_of(self.ty()),
        }
    }
}

impl PrettyPrint for Comparator {
    fn pretty_print(&self) -> String {
        match self {
            Comparator::NoComparator(_) => {
                format!("comparator({})", self.tuple_type().pretty_print())
            }
            Comparator::FieldComparator(c) => format!(
                "{}.field({} {})",
                c.source().pretty_print(),
                c.field(),
                c.direction().as_str()
            ),
        }
    }
}

impl PrettyPrint for StructItem {
    fn pretty_print(&self) -> String {
        self.struct_type().pretty_print()
    }
}
