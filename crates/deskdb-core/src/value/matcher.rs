use crate::value::Value;
use std::borrow::Cow;

///
/// CONSTANTS
///

// Largest magnitude for which every i64 converts to f64 without rounding.
const F64_SAFE_I64: i64 = 1i64 << 53;

impl Value {
    ///
    /// MATCHING
    ///

    /// Type-dispatched field predicate: does this stored value match `search`?
    ///
    /// Dispatch is on the kind of the stored value:
    /// - text: case-insensitive substring; an empty needle never matches
    /// - bool / int: equality
    /// - float: exact numeric equality
    /// - list / set: any member matches under these same rules
    /// - null: matches a null or empty-string search value
    /// - opaque: never matches
    #[must_use]
    pub fn matches(&self, search: &Self) -> bool {
        match self {
            Self::Text(text) => Self::text_matches(text, search),
            Self::Bool(b) => matches!(search, Self::Bool(s) if s == b),
            Self::Int(n) => Self::int_matches(*n, search),
            Self::Float(x) => Self::float_matches(*x, search),
            Self::List(items) | Self::Set(items) => items.iter().any(|item| item.matches(search)),
            Self::Null => search.is_blank(),
            Self::Opaque(_) => false,
        }
    }

    fn fold_ci(s: &str) -> Cow<'_, str> {
        if s.is_ascii() {
            if s.bytes().any(|b| b.is_ascii_uppercase()) {
                return Cow::Owned(s.to_ascii_lowercase());
            }
            return Cow::Borrowed(s);
        }
        // NOTE: Unicode fallback uses simple lowercase mapping, not full casefold.
        Cow::Owned(s.to_lowercase())
    }

    // Scalar search values are matched by their display text so a coerced
    // `2016` still finds timestamps containing "2016".
    fn text_needle(search: &Self) -> Option<Cow<'_, str>> {
        match search {
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Int(_) | Self::Float(_) | Self::Bool(_) => Some(Cow::Owned(search.to_string())),
            Self::Null | Self::List(_) | Self::Set(_) | Self::Opaque(_) => None,
        }
    }

    fn text_matches(text: &str, search: &Self) -> bool {
        let Some(needle) = Self::text_needle(search) else {
            return false;
        };
        if needle.is_empty() {
            return false;
        }

        Self::fold_ci(text).contains(Self::fold_ci(&needle).as_ref())
    }

    #[allow(clippy::float_cmp)]
    fn int_matches(n: i64, search: &Self) -> bool {
        match search {
            Self::Int(s) => n == *s,
            Self::Float(s) => exact_f64(n).is_some_and(|n| n == *s),
            _ => false,
        }
    }

    #[allow(clippy::float_cmp)]
    fn float_matches(x: f64, search: &Self) -> bool {
        match search {
            Self::Float(s) => x == *s,
            Self::Int(s) => exact_f64(*s).is_some_and(|s| s == x),
            _ => false,
        }
    }
}

// Convert an integer to f64 only when the conversion is lossless.
#[allow(clippy::cast_precision_loss)]
fn exact_f64(n: i64) -> Option<f64> {
    if n >= -F64_SAFE_I64 && n <= F64_SAFE_I64 {
        Some(n as f64)
    } else {
        None
    }
}
