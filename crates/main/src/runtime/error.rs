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
    error::Error as StdError,
    fmt::{Display, Formatter},
    result::Result as StdResult,
};

use compact_str::CompactString;

use crate::runtime::RustOrigin;

/// A result of a bridge API call, which can either be a normal value or a
/// [RuntimeError].
pub type RuntimeResult<T> = StdResult<T, RuntimeError>;

/// Represents any error that may occur while the host calls a bound native
/// method.
///
/// Type coercions never fail: every dynamic value converts into every
/// supported native type. The errors below come from the instance unwrap
/// facility, from host callback invocation and from the
/// [Class](crate::runtime::Class) registration table.
///
/// This object implements the [Debug] and [Display] traits. The Display
/// implementation provides a brief description of the underlying error.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum RuntimeError {
    /// The receiver of the call is not an object value, so there is no
    /// native instance to call the method on.
    ReceiverNotObject {
        /// The name of the native type the method expects.
        expected: &'static str,

        /// The kind of the dynamic value that was provided as a receiver.
        actual: &'static str,
    },

    /// The receiver object wraps a native instance of a different type.
    ReceiverMismatch {
        /// The name of the native type the method expects.
        expected: &'static str,

        /// The name of the native type the object actually wraps.
        actual: &'static str,
    },

    /// The wrapped instance is already borrowed by an outer call in a way
    /// that conflicts with the requested access.
    InstanceBusy {
        /// The name of the native type of the instance.
        class: &'static str,

        /// True if the rejected access was exclusive.
        exclusive: bool,
    },

    /// A [Function](crate::runtime::Function) parameter was staged from a
    /// value that is not callable, and the method tried to call it.
    NotCallable {
        /// The kind of the dynamic value that was provided.
        actual: &'static str,
    },

    /// The number of call arguments differs from the method's arity.
    ///
    /// Reported only by the tables with the
    /// [strict](crate::runtime::ArityPolicy::Strict) arity policy.
    ArityMismatch {
        /// The name of the called property.
        property: CompactString,

        /// The binding site of the property.
        origin: &'static RustOrigin,

        /// The number of the method's parameters.
        parameters: usize,

        /// The number of the provided arguments.
        arguments: usize,
    },

    /// The called property is not registered in the class.
    UnknownProperty {
        /// The name of the class.
        class: CompactString,

        /// The requested property name.
        property: CompactString,

        /// The closest registered property name, if any.
        suggestion: Option<CompactString>,
    },

    /// Two property descriptors with the same name were registered in one
    /// class.
    DuplicateProperty {
        /// The name of the class.
        class: CompactString,

        /// The name of the property.
        property: CompactString,

        /// The binding site of the first registered descriptor.
        first: &'static RustOrigin,

        /// The binding site of the rejected descriptor.
        second: &'static RustOrigin,
    },
}

impl Display for RuntimeError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReceiverNotObject { expected, actual } => formatter.write_fmt(format_args!(
                "expected a receiver object of type \"{expected}\", but {actual} value \
                provided",
            )),

            Self::ReceiverMismatch { expected, actual } => formatter.write_fmt(format_args!(
                "expected a receiver object of type \"{expected}\", but the object of type \
                \"{actual}\" provided",
            )),

            Self::InstanceBusy { class, exclusive } => match exclusive {
                true => formatter.write_fmt(format_args!(
                    "cannot access \"{class}\" instance for write while it is being accessed",
                )),

                false => formatter.write_fmt(format_args!(
                    "cannot access \"{class}\" instance for read while it is being written",
                )),
            },

            Self::NotCallable { actual } => {
                formatter.write_fmt(format_args!("{actual} value is not a function"))
            }

            Self::ArityMismatch {
                property,
                origin,
                parameters,
                arguments,
            } => formatter.write_fmt(format_args!(
                "property \"{property}\" ({origin}) expects {parameters} arguments, but \
                {arguments} provided",
            )),

            Self::UnknownProperty {
                class,
                property,
                suggestion,
            } => {
                formatter.write_fmt(format_args!(
                    "unknown property \"{property}\" of class \"{class}\"",
                ))?;

                if let Some(suggestion) = suggestion {
                    formatter.write_fmt(format_args!(", did you mean \"{suggestion}\"?"))?;
                }

                Ok(())
            }

            Self::DuplicateProperty {
                class,
                property,
                first,
                second,
            } => formatter.write_fmt(format_args!(
                "property \"{property}\" of class \"{class}\" bound in {second} is \
                already bound in {first}",
            )),
        }
    }
}

impl StdError for RuntimeError {}

impl RuntimeError {
    /// Returns the binding site that caused this error, if the error relates
    /// to a particular registration.
    #[inline]
    pub fn origin(&self) -> Option<&'static RustOrigin> {
        match self {
            Self::ArityMismatch { origin, .. } => Some(*origin),
            Self::DuplicateProperty { second, .. } => Some(*second),
            _ => None,
        }
    }
}
