//! Declarative request schemas.
//!
//! # Design
//! A request type lists its query parameters once, as a static slice of
//! `ParamField` entries. Each entry pairs the wire name with an accessor and
//! the validation rule for that field, so the marshaler and the validator
//! can never disagree about which fields exist. Both walk the same slice;
//! neither inspects the type at runtime.

use std::fmt;

/// Semantic type a rule expects for its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Integer,
}

/// Borrowed view of a single field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue<'_> {
    /// Whether this is the type's zero value, i.e. the field is unset.
    pub fn is_zero(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.is_empty(),
            ParamValue::Int(i) => *i == 0,
            // Bitwise, so -0.0 counts as set.
            ParamValue::Float(f) => f.to_bits() == 0,
            ParamValue::Bool(b) => !*b,
        }
    }

    /// Numeric view used by range checks. Strings are never coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Str(_) | ParamValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for ParamValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(v) => f.write_str(&format_float(*v)),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Render a float in `%g` style with the shortest round-trip digits.
///
/// Decimal exponents below -4 or at least 6 switch to exponent form with a
/// signed, two-digit-minimum exponent (`1e+06`, `1.5e-07`).
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{v:e}");
    let (mantissa, exp) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return v.to_string(),
    };
    if (-4..6).contains(&exp) {
        return v.to_string();
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

/// Constraints attached to one field.
///
/// Every constraint is optional. A rule built with [`ValidationRule::string`]
/// and nothing else accepts any string.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRule {
    pub kind: ParamType,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Named format such as `"email"`. Names with no known pattern are ignored.
    pub format: Option<&'static str>,
    /// Allowed values, compared against the rendered value. Empty means any.
    pub allowed: &'static [&'static str],
}

impl ValidationRule {
    const fn of(kind: ParamType) -> Self {
        Self {
            kind,
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            format: None,
            allowed: &[],
        }
    }

    pub const fn string() -> Self {
        Self::of(ParamType::String)
    }

    pub const fn number() -> Self {
        Self::of(ParamType::Number)
    }

    pub const fn integer() -> Self {
        Self::of(ParamType::Integer)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub const fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub const fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub const fn format(mut self, name: &'static str) -> Self {
        self.format = Some(name);
        self
    }

    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = values;
        self
    }
}

/// One declared query parameter of a request type `T`.
pub struct ParamField<T: 'static> {
    pub name: &'static str,
    pub value: for<'a> fn(&'a T) -> ParamValue<'a>,
    pub rule: ValidationRule,
}

impl<T: 'static> fmt::Debug for ParamField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamField")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .finish()
    }
}

/// A request type whose query parameters are declared statically.
pub trait RequestSchema: Sized + 'static {
    /// Declared fields in wire order.
    const FIELDS: &'static [ParamField<Self>];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values() {
        assert!(ParamValue::Str("").is_zero());
        assert!(!ParamValue::Str("x").is_zero());
        assert!(ParamValue::Int(0).is_zero());
        assert!(!ParamValue::Int(-1).is_zero());
        assert!(ParamValue::Float(0.0).is_zero());
        assert!(!ParamValue::Float(-0.0).is_zero());
        assert!(ParamValue::Bool(false).is_zero());
        assert!(!ParamValue::Bool(true).is_zero());
    }

    #[test]
    fn display_uses_default_rendering() {
        assert_eq!(ParamValue::Str("large").to_string(), "large");
        assert_eq!(ParamValue::Int(15).to_string(), "15");
        assert_eq!(ParamValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn floats_switch_to_exponent_form_at_the_edges() {
        assert_eq!(format_float(123456.0), "123456");
        assert_eq!(format_float(1e6), "1e+06");
        assert_eq!(format_float(1e21), "1e+21");
        assert_eq!(format_float(1.5e10), "1.5e+10");
        assert_eq!(format_float(-2.25e8), "-2.25e+08");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1e-7), "1e-07");
        assert_eq!(format_float(1.5e-300), "1.5e-300");
        assert_eq!(format_float(-0.0), "-0");
        assert_eq!(format_float(f64::INFINITY), "+Inf");
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(ParamValue::Float(1e21).to_string(), "1e+21");
    }

    #[test]
    fn rule_builders_compose_in_const_context() {
        const RULE: ValidationRule = ValidationRule::integer().required().min(1.0).max(15.0);
        assert_eq!(RULE.kind, ParamType::Integer);
        assert!(RULE.required);
        assert_eq!(RULE.min, Some(1.0));
        assert_eq!(RULE.max, Some(15.0));
        assert!(RULE.allowed.is_empty());
    }

    #[test]
    fn bare_string_rule_is_permissive() {
        let rule = ValidationRule::string();
        assert!(!rule.required);
        assert!(rule.min_length.is_none());
        assert!(rule.max_length.is_none());
        assert!(rule.format.is_none());
        assert!(rule.allowed.is_empty());
    }
}
