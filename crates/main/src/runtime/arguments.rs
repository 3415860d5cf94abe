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

use crate::runtime::{Adjust, CallInfo, Downcast, TypeHint};

/// The highest number of positional parameters a bound method may have.
pub const MAX_ARITY: usize = 12;

/// A static parameter list of a bound method.
///
/// The trait is implemented for tuples of up to [MAX_ARITY] elements, where
/// each element implements [Downcast]. The tuple field indices `0..N` are the
/// positions of the call arguments. The [stage](Self::stage) and
/// [adjust](AdjustArguments::adjust) functions expand into a single tuple
/// expression, so the parameter at position `i` is paired with the argument
/// at position `i` at compile time, without iterating over the parameters at
/// runtime.
///
/// Staging consumes exactly the first [ARITY](Self::ARITY) arguments of the
/// call and ignores the rest. If the call provides fewer arguments, the
/// missing ones are staged from the undefined value.
pub trait Arguments: Sized {
    /// The number of parameters.
    const ARITY: usize;

    /// The tuple of the parameters' staging values.
    type Staged: 'static;

    /// Stages every argument of the call with the corresponding parameter's
    /// [Downcast] implementation.
    fn stage(info: &CallInfo) -> Self::Staged;

    /// Returns the type hints of the parameters in order.
    fn hints() -> Vec<TypeHint>;
}

/// The second phase of the [Arguments] conversion, which produces the
/// parameter values from the staged tuple.
pub trait AdjustArguments<'a>: Arguments {
    fn adjust(staged: &'a mut Self::Staged) -> Self;
}

macro_rules! impl_arguments {
    ($arity:expr; $($arg:ident $index:tt),*) => {
        impl<$($arg: Downcast),*> Arguments for ($($arg,)*) {
            const ARITY: usize = $arity;

            type Staged = ($($arg::Staged,)*);

            #[allow(unused_variables)]
            #[inline(always)]
            fn stage(info: &CallInfo) -> Self::Staged {
                ($($arg::stage(info.argument($index)),)*)
            }

            #[inline(always)]
            fn hints() -> Vec<TypeHint> {
                vec![$($arg::hint()),*]
            }
        }

        impl<'a, $($arg: Adjust<'a>),*> AdjustArguments<'a> for ($($arg,)*) {
            #[allow(unused_variables, clippy::unused_unit)]
            #[inline(always)]
            fn adjust(staged: &'a mut Self::Staged) -> Self {
                ($($arg::adjust(&mut staged.$index),)*)
            }
        }
    };
}

impl_arguments!(0;);
impl_arguments!(1; A0 0);
impl_arguments!(2; A0 0, A1 1);
impl_arguments!(3; A0 0, A1 1, A2 2);
impl_arguments!(4; A0 0, A1 1, A2 2, A3 3);
impl_arguments!(5; A0 0, A1 1, A2 2, A3 3, A4 4);
impl_arguments!(6; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_arguments!(7; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_arguments!(8; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);
impl_arguments!(9; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8);
impl_arguments!(10; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9);
impl_arguments!(11; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9, A10 10);
impl_arguments!(12; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9, A10 10, A11 11);

#[cfg(test)]
mod tests {
    use crate::runtime::{AdjustArguments, Arguments, CallInfo, TypeHint, Value};

    #[test]
    fn test_positional_staging() {
        let info = CallInfo::new(
            Value::Undefined,
            vec![Value::from(7), Value::from("abc"), Value::from(true)],
        );

        let mut staged = <(i32, &str)>::stage(&info);
        let (number, string) = <(i32, &str)>::adjust(&mut staged);

        assert_eq!(number, 7);
        assert_eq!(string, "abc");

        let mut staged = <(bool, f64, String, bool)>::stage(&info);
        let (first, second, third, fourth) = <(bool, f64, String, bool)>::adjust(&mut staged);

        assert!(first);
        assert!(second.is_nan());
        assert_eq!(third, "true");
        assert!(!fourth);

        assert_eq!(<()>::ARITY, 0);
        assert_eq!(<(u8, u16, u32)>::ARITY, 3);

        assert_eq!(
            <(u8, Option<&str>)>::hints(),
            vec![
                TypeHint::Number("u8"),
                TypeHint::String("&str").optional(),
            ],
        );
    }
}
