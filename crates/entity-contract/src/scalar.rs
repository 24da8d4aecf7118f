//! Typed leaves: scalars and enumerations.

use entity_pack::PackValue;

use crate::Identifier;

/// A field type stored as a single [`PackValue`] leaf.
pub trait Scalar: Sized {
    /// Shape named in errors when coercion fails.
    const EXPECTED: &'static str;

    fn from_value(value: &PackValue) -> Option<Self>;
    fn to_value(&self) -> PackValue;
}

/// Numeric fields accept any integer or float on the wire and convert with
/// `as` semantics: floats truncate toward zero and saturate, integers wrap
/// into narrower widths.
macro_rules! numeric_scalar {
    ($($ty:ty),*) => {$(
        impl Scalar for $ty {
            const EXPECTED: &'static str = "number";

            fn from_value(value: &PackValue) -> Option<Self> {
                match *value {
                    PackValue::Integer(i) => Some(i as $ty),
                    PackValue::UInteger(u) => Some(u as $ty),
                    PackValue::Float(f) => Some(f as $ty),
                    _ => None,
                }
            }

            fn to_value(&self) -> PackValue {
                PackValue::from(*self)
            }
        }
    )*};
}

numeric_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Scalar for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &PackValue) -> Option<Self> {
        value.as_bool()
    }

    fn to_value(&self) -> PackValue {
        PackValue::Bool(*self)
    }
}

impl Scalar for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &PackValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn to_value(&self) -> PackValue {
        PackValue::Str(self.clone())
    }
}

impl Scalar for Vec<u8> {
    const EXPECTED: &'static str = "bytes";

    /// Accepts `Bytes` and the base64 data-URI strings JSON carries them as.
    fn from_value(value: &PackValue) -> Option<Self> {
        value.to_bytes()
    }

    fn to_value(&self) -> PackValue {
        PackValue::Bytes(self.clone())
    }
}

impl Scalar for Identifier {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &PackValue) -> Option<Self> {
        value.as_str().map(Identifier::from)
    }

    fn to_value(&self) -> PackValue {
        PackValue::Str(self.as_str().to_owned())
    }
}

/// Untyped pass-through.
impl Scalar for PackValue {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &PackValue) -> Option<Self> {
        Some(value.clone())
    }

    fn to_value(&self) -> PackValue {
        self.clone()
    }
}

/// Enumeration carried on the wire as its raw representation.
pub trait WireEnum: Sized {
    type Raw: Scalar;

    /// `None` for a raw value with no matching case.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
    fn to_raw(&self) -> Self::Raw;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generic_number_coerces_to_any_width() {
        let wire = PackValue::Integer(42);
        assert_eq!(i32::from_value(&wire), Some(42));
        assert_eq!(u8::from_value(&wire), Some(42));
        assert_eq!(f64::from_value(&wire), Some(42.0));
        assert_eq!(f32::from_value(&wire), Some(42.0));
        assert_eq!(i64::from_value(&PackValue::Float(42.9)), Some(42));
        assert_eq!(u64::from_value(&PackValue::UInteger(u64::MAX)), Some(u64::MAX));
    }

    #[test]
    fn out_of_range_numbers_convert_without_failing() {
        assert_eq!(u8::from_value(&PackValue::Integer(300)), Some(44));
        assert_eq!(i8::from_value(&PackValue::Integer(-129)), Some(127));
        assert_eq!(u32::from_value(&PackValue::Integer(-1)), Some(u32::MAX));
        assert_eq!(i64::from_value(&PackValue::UInteger(u64::MAX)), Some(-1));
        assert_eq!(i32::from_value(&PackValue::Float(1e20)), Some(i32::MAX));
        assert_eq!(i32::from_value(&PackValue::Float(-1e20)), Some(i32::MIN));
        assert_eq!(u16::from_value(&PackValue::Float(-3.7)), Some(0));
        assert_eq!(i32::from_value(&PackValue::Float(f64::NAN)), Some(0));
        assert_eq!(
            f32::from_value(&PackValue::Float(1e300)),
            Some(f32::INFINITY)
        );
    }

    #[test]
    fn non_numeric_input_fails() {
        for raw in [
            PackValue::Str("x".into()),
            PackValue::Str("42".into()),
            PackValue::Bool(true),
            PackValue::Null,
            PackValue::Array(vec![]),
        ] {
            assert_eq!(i32::from_value(&raw), None, "{raw:?}");
            assert_eq!(f64::from_value(&raw), None, "{raw:?}");
        }
    }

    #[test]
    fn strict_non_numeric_scalars() {
        assert_eq!(bool::from_value(&PackValue::Integer(1)), None);
        assert_eq!(String::from_value(&PackValue::Bytes(vec![b'a'])), None);
        assert_eq!(Vec::<u8>::from_value(&PackValue::Str("a".into())), None);
        assert_eq!(
            Vec::<u8>::from_value(&PackValue::Str("data:application/octet-stream;base64,AAEC".into())),
            Some(vec![0, 1, 2])
        );
        assert_eq!(
            String::from_value(&PackValue::Str("data:application/octet-stream;base64,AAEC".into())),
            Some("data:application/octet-stream;base64,AAEC".to_owned())
        );
        assert_eq!(
            Identifier::from_value(&PackValue::Str("id-1".into())),
            Some(Identifier::new("id-1"))
        );
    }

    proptest! {
        #[test]
        fn any_integer_reaches_float_fields(i in any::<i64>()) {
            prop_assert_eq!(f64::from_value(&PackValue::Integer(i)), Some(i as f64));
        }

        #[test]
        fn any_float_reaches_integer_fields(f in any::<f64>()) {
            prop_assert_eq!(i32::from_value(&PackValue::Float(f)), Some(f as i32));
        }

        #[test]
        fn i32_round_trips(i in any::<i32>()) {
            prop_assert_eq!(i32::from_value(&i.to_value()), Some(i));
        }
    }
}
