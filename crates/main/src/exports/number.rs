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

use crate::{
    exports::utils::owned_adjust,
    runtime::{Downcast, Env, TypeHint, Upcast, Value},
};

// The integer types share one coercion path selector: the types narrower
// than 64 bits go through ToInt32, the rest go through ToInt64.
pub(crate) trait Integer: Sized {
    const BITS: u32;

    fn from_int32(number: i32) -> Self;

    fn from_int64(number: i64) -> Self;
}

#[inline(always)]
pub(crate) fn coerce_integer<T: Integer>(value: &Value) -> T {
    match T::BITS < 64 {
        true => T::from_int32(value.to_int32()),
        false => T::from_int64(value.to_int64()),
    }
}

macro_rules! impl_integer {
    ($($ty:ident => $upcast:expr;)+) => {
        $(
            impl Integer for $ty {
                const BITS: u32 = $ty::BITS;

                #[inline(always)]
                fn from_int32(number: i32) -> Self {
                    number as $ty
                }

                #[inline(always)]
                fn from_int64(number: i64) -> Self {
                    number as $ty
                }
            }

            impl Downcast for $ty {
                type Staged = Self;

                #[inline(always)]
                fn stage(value: &Value) -> Self::Staged {
                    coerce_integer::<$ty>(value)
                }

                #[inline(always)]
                fn hint() -> TypeHint {
                    TypeHint::Number(stringify!($ty))
                }
            }

            owned_adjust!($ty);

            impl Upcast for $ty {
                #[inline(always)]
                fn upcast(env: &Env, this: Self) -> Value {
                    let convert: fn($ty) -> f64 = $upcast;

                    env.number(convert(this))
                }

                #[inline(always)]
                fn hint() -> TypeHint {
                    TypeHint::Number(stringify!($ty))
                }
            }
        )+
    };
}

impl_integer! {
    i8 => f64::from;
    i16 => f64::from;
    i32 => f64::from;
    i64 => cast::f64;
    isize => cast::f64;
    u8 => f64::from;
    u16 => f64::from;
    u32 => f64::from;
    u64 => cast::f64;
    usize => cast::f64;
}

impl Downcast for f64 {
    type Staged = Self;

    #[inline(always)]
    fn stage(value: &Value) -> Self::Staged {
        value.to_number()
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::Number("f64")
    }
}

impl Downcast for f32 {
    type Staged = Self;

    #[inline(always)]
    fn stage(value: &Value) -> Self::Staged {
        value.to_number() as f32
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::Number("f32")
    }
}

owned_adjust!(f32, f64);

impl Upcast for f64 {
    #[inline(always)]
    fn upcast(env: &Env, this: Self) -> Value {
        env.number(this)
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::Number("f64")
    }
}

impl Upcast for f32 {
    #[inline(always)]
    fn upcast(env: &Env, this: Self) -> Value {
        env.number(f64::from(this))
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::Number("f32")
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        exports::number::coerce_integer,
        runtime::Value,
    };

    #[test]
    fn test_width_selection() {
        let large = Value::from(8_589_934_593.0);

        assert_eq!(coerce_integer::<i32>(&large), 1);
        assert_eq!(coerce_integer::<u32>(&large), 1);
        assert_eq!(coerce_integer::<i64>(&large), 8_589_934_593);
        assert_eq!(coerce_integer::<u64>(&large), 8_589_934_593);

        let negative = Value::from(-1);

        assert_eq!(coerce_integer::<u8>(&negative), u8::MAX);
        assert_eq!(coerce_integer::<u16>(&negative), u16::MAX);
        assert_eq!(coerce_integer::<u64>(&negative), u64::MAX);

        #[cfg(target_pointer_width = "64")]
        assert_eq!(coerce_integer::<usize>(&large), 8_589_934_593);

        #[cfg(target_pointer_width = "32")]
        assert_eq!(coerce_integer::<usize>(&large), 1);
    }
}
