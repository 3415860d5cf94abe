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

use crate::runtime::{Env, TypeHint, Value};

/// A trait that casts host values into Rust data.
///
/// By implementing the Downcast trait on a Rust type, you make this type
/// eligible to be a parameter of bound methods. The dispatch layer converts
/// each positional call argument into the corresponding parameter through
/// this trait.
///
/// The conversion happens in two phases. First, the [stage](Self::stage)
/// function coerces the dynamic [Value] into an owned staging value of the
/// [Staged](Self::Staged) type. The staging value is stored in the scope of
/// the dispatch callback. Then the [Adjust] trait produces the actual
/// parameter from the staging value. Owned types move the staged value out,
/// and borrowed views (such as `&str` or `&CStr`) borrow it, so the borrow
/// checker ties the lifetime of the view to the single method call.
///
/// The conversion is total: any Value can be staged for any type, and the
/// host coercion rules decide the result.
///
/// ```
/// use method_bridge::runtime::{Adjust, Downcast, Value};
///
/// let mut staged = <&str>::stage(&Value::from(42));
/// let view = <&str>::adjust(&mut staged);
///
/// assert_eq!(view, "42");
/// ```
///
/// The opposite operation of transforming Rust data into host values is
/// provided through the separate [Upcast] trait.
pub trait Downcast: Sized {
    /// An owned value that holds the coerced data for the duration of the
    /// call.
    type Staged: 'static;

    /// Coerces a dynamic value into the staging representation.
    fn stage(value: &Value) -> Self::Staged;

    /// Returns a rough description of the parameter type.
    fn hint() -> TypeHint;
}

/// The second phase of the [Downcast] conversion.
///
/// Produces the parameter value from the staging storage. The `'a` lifetime
/// is the lifetime of the staging storage borrow, so types that borrow from
/// the staged value implement `Adjust<'a>` for `&'a T` only.
pub trait Adjust<'a>: Downcast + 'a {
    fn adjust(staged: &'a mut Self::Staged) -> Self;
}

/// A trait that casts Rust data into host values.
///
/// By implementing the Upcast trait on a Rust type, you make this type
/// eligible to be the return type of bound methods. The dispatch layer
/// converts the method result through this trait, passing the [Env] that the
/// host provided for the call.
///
/// ```
/// use method_bridge::runtime::{Env, Upcast, Value};
///
/// let env = Env::new();
///
/// assert_eq!(<u8>::upcast(&env, 200), Value::Number(200.0));
/// assert_eq!(<Option<bool>>::upcast(&env, None), Value::Null);
/// ```
///
/// The `()` type intentionally does not implement Upcast: methods without a
/// return value are bound as void methods that produce the undefined value.
///
/// Fieldless enums implement Upcast through their underlying integer
/// representation using the derive macro:
///
/// ```
/// use method_bridge::runtime::{Env, Upcast, Value};
///
/// #[derive(Upcast)]
/// #[repr(u8)]
/// enum Mode {
///     Read = 1,
///     Write = 2,
/// }
///
/// assert_eq!(Mode::upcast(&Env::new(), Mode::Write), Value::Number(2.0));
/// ```
pub trait Upcast: Sized {
    /// Converts the Rust value into a host value.
    fn upcast(env: &Env, this: Self) -> Value;

    /// Returns a rough description of the returned type.
    fn hint() -> TypeHint;
}
