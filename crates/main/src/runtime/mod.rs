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

//! The argument-marshalling and method-dispatch bridge between the dynamic
//! host values and the statically typed native methods.
//!
//! The module consists of three layers:
//!
//! - The scalar converters: the [Downcast] and [Adjust] traits that convert
//!   a host [Value] into a native parameter, and the [Upcast] trait that
//!   converts a native result back into a host Value.
//! - The [Arguments] parameter lists that pair every positional call
//!   argument with the corresponding method parameter at compile time.
//! - The [Method] dispatch trait and the [class_method](crate::class_method)
//!   macro that adapt a native method into a [PropertyDescriptor] with the
//!   fixed [Callback] signature.
//!
//! The [Value], [Env], [Object], [Function], [CallInfo] and [Class] types
//! form a minimal reference host that the bridge is built against.

mod arguments;
mod call;
mod class;
mod coercion;
mod descriptor;
mod env;
mod error;
mod function;
pub(crate) mod hints;
mod invoke;
mod object;
mod origin;
mod value;

// This module is hidden.
//
// You should never use it directly, as its API is not part of the official
// public API of the crate.
#[doc(hidden)]
pub mod __intrinsics;

#[cfg(feature = "derive")]
pub use method_bridge_export::Upcast;

pub use crate::runtime::{
    arguments::{AdjustArguments, Arguments, MAX_ARITY},
    call::CallInfo,
    class::{ArityPolicy, Class},
    coercion::{Adjust, Downcast, Upcast},
    descriptor::{Callback, PropertyAttributes, PropertyDescriptor},
    env::Env,
    error::{RuntimeError, RuntimeResult},
    function::Function,
    hints::TypeHint,
    invoke::{
        Exclusive,
        Method,
        MethodShape,
        Plain,
        ReceiverKind,
        Returns,
        Shared,
        Signature,
        Void,
        WithEnv,
    },
    object::Object,
    origin::{RustCode, RustOrigin},
    value::Value,
};
