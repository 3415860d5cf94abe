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

use std::fmt::{Display, Formatter};

/// A type description of a native parameter or return value, as seen from
/// the dynamic side of the bridge.
///
/// Every scalar converter provides a TypeHint so that a
/// [Signature](crate::runtime::Signature) can describe a bound method without
/// calling it.
///
/// The [Display] implementation prints the host family of the type (e.g.,
/// `number` for both `u8` and `f64`). The alternate form (`{:#}`) prints the
/// native type name instead.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeHint {
    /// Any dynamic value, passed through without conversion.
    Dynamic,

    /// The undefined value (the output of void methods).
    Undefined,

    /// A boolean value.
    Boolean,

    /// A number value converted from or into the named native numeric type.
    Number(&'static str),

    /// A string value converted from or into the named native text type.
    String(&'static str),

    /// An object wrapping a native instance of the named type.
    Object(&'static str),

    /// A callable host value.
    Function,

    /// A nullable value: null and undefined map to None.
    Option(Box<TypeHint>),
}

impl Default for TypeHint {
    #[inline(always)]
    fn default() -> Self {
        Self::Dynamic
    }
}

impl Display for TypeHint {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let alternate = formatter.alternate();

        match self {
            Self::Dynamic => formatter.write_str("?"),
            Self::Undefined => formatter.write_str("undefined"),
            Self::Boolean => formatter.write_str("bool"),

            Self::Number(name) => match alternate {
                true => formatter.write_str(name),
                false => formatter.write_str("number"),
            },

            Self::String(name) => match alternate {
                true => formatter.write_str(name),
                false => formatter.write_str("string"),
            },

            Self::Object(name) => formatter.write_str(short_type_name(name)),
            Self::Function => formatter.write_str("fn"),

            Self::Option(inner) => match alternate {
                true => formatter.write_fmt(format_args!("Option<{inner:#}>")),
                false => formatter.write_fmt(format_args!("{inner}?")),
            },
        }
    }
}

impl TypeHint {
    /// Returns a [TypeHint] for a value that is passed through as is.
    #[inline(always)]
    pub fn dynamic() -> Self {
        Self::Dynamic
    }

    /// Wraps this hint into a nullable [Option](Self::Option) hint.
    #[inline(always)]
    pub fn optional(self) -> Self {
        Self::Option(Box::new(self))
    }

    /// Returns true if the underlying type cannot be determined statically.
    #[inline(always)]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// Returns true if the hint describes the undefined output of a void
    /// method.
    #[inline(always)]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if the underlying type is converted through the host
    /// number (e.g., `u8`, `isize`, `f32`).
    #[inline(always)]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns true if the underlying type is converted through the host
    /// string.
    #[inline(always)]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }
}

// Strips the module path from a `std::any::type_name` result.
pub(crate) fn short_type_name(name: &'static str) -> &'static str {
    let generic = name.find('<').unwrap_or(name.len());

    match name[..generic].rfind("::") {
        Some(index) => &name[(index + 2)..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::TypeHint;

    #[test]
    fn test_hint_display() {
        assert_eq!(TypeHint::Number("u8").to_string(), "number");
        assert_eq!(format!("{:#}", TypeHint::Number("u8")), "u8");
        assert_eq!(TypeHint::String("&str").optional().to_string(), "string?");

        assert_eq!(
            format!("{:#}", TypeHint::String("&str").optional()),
            "Option<&str>",
        );

        assert_eq!(
            TypeHint::Object("my_crate::module::Counter").to_string(),
            "Counter",
        );
    }
}
