////////////////////////////////////////////////////////////////////////////////
// This file is part of "Ad Astra", an embeddable scripting programming       //
// language platform.                                                         //
//                                                                            //
// This work is proprietary software with source-available code.              //
//                                                                            //
// To copy, use, distribute, or contribute to this work, you must agree to    //
// the terms of the General License Agreement:                                //
//                                                                            //
// https://github.com/Eliah-Lakhin/ad-astra/blob/master/EULA.md               //
//                                                                            //
// The agreement grants a Basic Commercial License, allowing you to use       //
// this work in non-commercial and limited commercial products with a total   //
// gross revenue cap. To remove this commercial limit for one of your         //
// products, you must acquire a Full Commercial License.                      //
//                                                                            //
// If you contribute to the source code, documentation, or related materials, //
// you must grant me an exclusive license to these contributions.             //
// Contributions are governed by the "Contributions" section of the General   //
// License Agreement.                                                         //
//                                                                            //
// Copying the work in parts is strictly forbidden, except as permitted       //
// under the General License Agreement.                                       //
//                                                                            //
// If you do not or cannot agree to the terms of this Agreement,              //
// do not use this work.                                                      //
//                                                                            //
// This work is provided "as is", without any warranties, express or implied, //
// except where such disclaimers are legally invalid.                         //
//                                                                            //
// Copyright (c) 2024 Ilya Lakhin (Илья Александрович Лахин).                 //
// All rights reserved.                                                       //
////////////////////////////////////////////////////////////////////////////////

use std::{
    any::type_name,
    cell::{Ref, RefMut},
    fmt::{Debug, Display, Formatter},
    rc::Rc,
};

use cast::Error as CastError;

use crate::runtime::{Function, Object, RuntimeError, RuntimeResult};

/// An owned handle to a value of the host's dynamic type system.
///
/// The Value carries no static type information. The scalar converters
/// interpret it through the host coercion rules implemented by the
/// [to_boolean](Self::to_boolean), [to_number](Self::to_number),
/// [to_int32](Self::to_int32), [to_int64](Self::to_int64) and [Display]
/// (ToString) functions. Every coercion is total.
///
/// Cloning a Value is cheap: strings and objects are reference counted.
#[derive(Clone, Default)]
pub enum Value {
    /// The empty value. Missing call arguments are undefined.
    #[default]
    Undefined,

    /// The null value.
    Null,

    /// A boolean value.
    Boolean(bool),

    /// An IEEE-754 double precision number.
    Number(f64),

    /// A text string.
    String(Rc<str>),

    /// A wrapped native instance.
    Object(Object),

    /// A callable host value.
    Function(Function),
}

impl Debug for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("undefined"),
            Self::Null => formatter.write_str("null"),
            Self::Boolean(boolean) => Debug::fmt(boolean, formatter),
            Self::Number(number) => format_number(*number, formatter),
            Self::String(string) => Debug::fmt(string, formatter),
            Self::Object(object) => Debug::fmt(object, formatter),
            Self::Function(function) => Debug::fmt(function, formatter),
        }
    }
}

// ToString.
impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => Ok(()),
            Self::Null => formatter.write_str("null"),
            Self::Boolean(boolean) => Display::fmt(boolean, formatter),
            Self::Number(number) => format_number(*number, formatter),
            Self::String(string) => formatter.write_str(string),

            Self::Object(object) => {
                formatter.write_fmt(format_args!("[object {}]", object.short_name()))
            }

            Self::Function(..) => formatter.write_str("function () { [native code] }"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) => true,
            (Self::Null, Self::Null) => true,
            (Self::Boolean(this), Self::Boolean(other)) => this == other,
            (Self::Number(this), Self::Number(other)) => this == other,
            (Self::String(this), Self::String(other)) => this == other,
            (Self::Object(this), Self::Object(other)) => this.ptr_eq(other),
            (Self::Function(this), Self::Function(other)) => this.ptr_eq(other),
            _ => false,
        }
    }
}

impl From<()> for Value {
    #[inline(always)]
    fn from(_: ()) -> Self {
        Self::Undefined
    }
}

impl From<bool> for Value {
    #[inline(always)]
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Value {
    #[inline(always)]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    #[inline(always)]
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl<'a> From<&'a str> for Value {
    #[inline(always)]
    fn from(value: &'a str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Value {
    #[inline(always)]
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Object> for Value {
    #[inline(always)]
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Function> for Value {
    #[inline(always)]
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl Value {
    /// Wraps a native instance into a new object value.
    #[inline(always)]
    pub fn wrap<C: 'static>(instance: C) -> Self {
        Self::Object(Object::new(instance))
    }

    /// Returns true if the value is undefined.
    #[inline(always)]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if the value is undefined or null.
    #[inline(always)]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns the host name of the value's kind: `undefined`, `null`,
    /// `boolean`, `number`, `string`, `object` or `function`.
    #[inline(always)]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean(..) => "boolean",
            Self::Number(..) => "number",
            Self::String(..) => "string",
            Self::Object(..) => "object",
            Self::Function(..) => "function",
        }
    }

    /// Returns the wrapped object if the value is an object.
    #[inline(always)]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// ToBoolean coercion: undefined, null, zero, NaN and the empty string
    /// are false, everything else is true.
    pub fn to_boolean(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Boolean(boolean) => *boolean,
            Self::Number(number) => !(*number == 0.0 || number.is_nan()),
            Self::String(string) => !string.is_empty(),
            Self::Object(..) | Self::Function(..) => true,
        }
    }

    /// ToNumber coercion.
    ///
    /// Undefined and null coerce to zero. Strings are trimmed and parsed as
    /// decimal floats; `Infinity`, `-Infinity`, `NaN` and hexadecimal `0x..`
    /// literals are recognized, the empty string is zero, and any other text
    /// is NaN. Objects and functions are NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined | Self::Null => 0.0,
            Self::Boolean(false) => 0.0,
            Self::Boolean(true) => 1.0,
            Self::Number(number) => *number,
            Self::String(string) => parse_number(string),
            Self::Object(..) | Self::Function(..) => f64::NAN,
        }
    }

    /// ToInt32 coercion: [ToNumber](Self::to_number), then truncation toward
    /// zero wrapped modulo 2^32 into the `i32` range. Non-finite numbers are
    /// zero.
    pub fn to_int32(&self) -> i32 {
        let number = self.to_number();

        if !number.is_finite() {
            return 0;
        }

        number.trunc().rem_euclid(4_294_967_296.0) as u32 as i32
    }

    /// ToUint32 coercion. Reinterprets the bits of [ToInt32](Self::to_int32).
    #[inline(always)]
    pub fn to_uint32(&self) -> u32 {
        self.to_int32() as u32
    }

    /// ToInt64 coercion: [ToNumber](Self::to_number), then truncation toward
    /// zero saturated at the `i64` bounds. Non-finite numbers are zero.
    pub fn to_int64(&self) -> i64 {
        match cast::i64(self.to_number().trunc()) {
            Ok(number) => number,
            Err(CastError::Overflow) => i64::MAX,
            Err(CastError::Underflow) => i64::MIN,
            Err(CastError::Infinite | CastError::NaN) => 0,
        }
    }

    /// Borrows the native instance of type `C` for read.
    ///
    /// Fails with [RuntimeError::ReceiverNotObject] if the value is not an
    /// object, otherwise behaves as [Object::borrow_ref].
    #[inline]
    pub fn unwrap_ref<C: 'static>(&self) -> RuntimeResult<Ref<'_, C>> {
        match self {
            Self::Object(object) => object.borrow_ref::<C>(),

            other => Err(RuntimeError::ReceiverNotObject {
                expected: type_name::<C>(),
                actual: other.kind(),
            }),
        }
    }

    /// Borrows the native instance of type `C` for write.
    ///
    /// Fails with [RuntimeError::ReceiverNotObject] if the value is not an
    /// object, otherwise behaves as [Object::borrow_mut].
    #[inline]
    pub fn unwrap_mut<C: 'static>(&self) -> RuntimeResult<RefMut<'_, C>> {
        match self {
            Self::Object(object) => object.borrow_mut::<C>(),

            other => Err(RuntimeError::ReceiverNotObject {
                expected: type_name::<C>(),
                actual: other.kind(),
            }),
        }
    }
}

fn format_number(number: f64, formatter: &mut Formatter<'_>) -> std::fmt::Result {
    if number.is_nan() {
        return formatter.write_str("NaN");
    }

    if number.is_infinite() {
        return match number > 0.0 {
            true => formatter.write_str("Infinity"),
            false => formatter.write_str("-Infinity"),
        };
    }

    // Negative zero prints as zero.
    if number == 0.0 {
        return formatter.write_str("0");
    }

    let magnitude = number.abs();

    if (1e-6..1e21).contains(&magnitude) {
        return Display::fmt(&number, formatter);
    }

    let scientific = format!("{number:e}");

    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            formatter.write_fmt(format_args!("{mantissa}e+{exponent}"))
        }

        _ => formatter.write_str(&scientific),
    }
}

fn parse_number(string: &str) -> f64 {
    let string = string.trim();

    match string {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => (),
    }

    if let Some(digits) = string
        .strip_prefix("0x")
        .or_else(|| string.strip_prefix("0X"))
    {
        if digits.is_empty() {
            return f64::NAN;
        }

        return digits
            .chars()
            .try_fold(0.0, |number: f64, digit| {
                Some(number * 16.0 + f64::from(digit.to_digit(16)?))
            })
            .unwrap_or(f64::NAN);
    }

    // Rust float syntax also accepts "inf" and "nan" spellings.
    let alphabetic = string
        .bytes()
        .any(|byte| byte.is_ascii_alphabetic() && byte != b'e' && byte != b'E');

    if alphabetic {
        return f64::NAN;
    }

    string.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use crate::runtime::Value;

    #[test]
    fn test_to_boolean() {
        assert!(!Value::Undefined.to_boolean());
        assert!(!Value::Null.to_boolean());
        assert!(!Value::from(0).to_boolean());
        assert!(!Value::from(-0.0).to_boolean());
        assert!(!Value::from(f64::NAN).to_boolean());
        assert!(!Value::from("").to_boolean());
        assert!(Value::from("false").to_boolean());
        assert!(Value::from(0.5).to_boolean());
        assert!(Value::wrap(()).to_boolean());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::Undefined.to_number(), 0.0);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert_eq!(Value::from("  12.5 ").to_number(), 12.5);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("0x1F").to_number(), 31.0);
        assert_eq!(Value::from("0xFFFFFFFFFFFFFFFFFF").to_number(), 4_722_366_482_869_645e6);
        assert!(Value::from("0x").to_number().is_nan());
        assert!(Value::from("0x1G").to_number().is_nan());
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
        assert_eq!(Value::from("-Infinity").to_number(), f64::NEG_INFINITY);
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("NaN").to_number().is_nan());
        assert!(Value::from("12abc").to_number().is_nan());
        assert!(Value::wrap(()).to_number().is_nan());
    }

    #[test]
    fn test_to_integers() {
        assert_eq!(Value::from(-7.9).to_int32(), -7);
        assert_eq!(Value::from(4_294_967_297.0).to_int32(), 1);
        assert_eq!(Value::from(2_147_483_648.0).to_int32(), i32::MIN);
        assert_eq!(Value::from(-1.0).to_uint32(), u32::MAX);
        assert_eq!(Value::from(f64::INFINITY).to_int32(), 0);
        assert_eq!(Value::from(f64::NAN).to_int32(), 0);

        assert_eq!(Value::from(8_589_934_592.0).to_int64(), 8_589_934_592);
        assert_eq!(Value::from(1e300).to_int64(), i64::MAX);
        assert_eq!(Value::from(-1e300).to_int64(), i64::MIN);
        assert_eq!(Value::from(f64::NEG_INFINITY).to_int64(), 0);
    }

    #[test]
    fn test_to_string() {
        struct Counter;

        assert_eq!(Value::Undefined.to_string(), "");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(-2.5e30).to_string(), "-2.5e+30");
        assert_eq!(Value::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::from(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Value::from(0.000001).to_string(), "0.000001");
        assert_eq!(Value::wrap(Counter).to_string(), "[object Counter]");
    }
}
