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
    any::Any,
    fmt::{Debug, Display, Formatter},
    ops::{BitOr, BitOrAssign},
    rc::Rc,
};

use compact_str::CompactString;

use crate::runtime::{CallInfo, Env, RuntimeResult, RustOrigin, Signature, Value};

/// The fixed signature of a host-callable property.
pub type Callback = fn(&Env, &CallInfo) -> RuntimeResult<Value>;

/// A set of host property attribute flags.
///
/// The flags combine with the `|` operator:
///
/// ```
/// use method_bridge::runtime::PropertyAttributes;
///
/// let attributes = PropertyAttributes::WRITABLE | PropertyAttributes::ENUMERABLE;
///
/// assert!(attributes.contains(PropertyAttributes::ENUMERABLE));
/// assert!(!attributes.contains(PropertyAttributes::STATIC));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PropertyAttributes(u32);

impl Debug for PropertyAttributes {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        static NAMES: [(PropertyAttributes, &str); 4] = [
            (PropertyAttributes::WRITABLE, "WRITABLE"),
            (PropertyAttributes::ENUMERABLE, "ENUMERABLE"),
            (PropertyAttributes::CONFIGURABLE, "CONFIGURABLE"),
            (PropertyAttributes::STATIC, "STATIC"),
        ];

        if self.is_default() {
            return formatter.write_str("DEFAULT");
        }

        let mut is_first = true;

        for (flag, name) in &NAMES {
            if !self.contains(*flag) {
                continue;
            }

            match is_first {
                true => is_first = false,
                false => formatter.write_str(" | ")?,
            }

            formatter.write_str(name)?;
        }

        Ok(())
    }
}

impl BitOr for PropertyAttributes {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PropertyAttributes {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl PropertyAttributes {
    /// No flags: a read-only, non-enumerable, non-configurable instance
    /// property.
    pub const DEFAULT: Self = Self(0);

    pub const WRITABLE: Self = Self(1 << 0);

    pub const ENUMERABLE: Self = Self(1 << 1);

    pub const CONFIGURABLE: Self = Self(1 << 2);

    /// The property belongs to the class rather than to its instances.
    pub const STATIC: Self = Self(1 << 10);

    /// Returns the raw bits of the flag set.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every flag of `other` is set in this flag set.
    #[inline(always)]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no flags are set.
    #[inline(always)]
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }
}

/// A registration record of a host-callable property.
///
/// The descriptor pairs the property name with a [Callback] of the fixed
/// signature, the property [attributes](PropertyAttributes), the optional
/// opaque data passed to every call through [CallInfo::data], the
/// [Signature] of the bound method, and the [RustOrigin] of the binding site.
///
/// The descriptors of native methods are created by the
/// [class_method](crate::class_method) macro. Hand-written callbacks use the
/// [method](Self::method) constructor directly.
///
/// The descriptor is configured by the consuming builder functions before it
/// is registered in a [Class](crate::runtime::Class), and it is never mutated
/// afterward.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: CompactString,
    callback: Callback,
    attributes: PropertyAttributes,
    data: Option<Rc<dyn Any>>,
    signature: Signature,
    origin: &'static RustOrigin,
}

impl Debug for PropertyDescriptor {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("data", &self.data.is_some())
            .field("signature", &format_args!("{}", self.signature))
            .field("origin", &self.origin)
            .finish()
    }
}

impl Display for PropertyDescriptor {
    #[inline(always)]
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.signature.display(&self.name), formatter)
    }
}

impl PropertyDescriptor {
    /// Creates a method property descriptor.
    #[inline]
    pub fn method(
        name: impl Into<CompactString>,
        callback: Callback,
        attributes: PropertyAttributes,
        signature: Signature,
        origin: &'static RustOrigin,
    ) -> Self {
        Self {
            name: name.into(),
            callback,
            attributes,
            data: None,
            signature,
            origin,
        }
    }

    /// Replaces the attribute flags.
    #[inline(always)]
    pub fn with_attributes(mut self, attributes: PropertyAttributes) -> Self {
        self.attributes = attributes;

        self
    }

    /// Attaches opaque data that every call of this property receives through
    /// [CallInfo::data].
    #[inline(always)]
    pub fn with_data<T: 'static>(mut self, data: T) -> Self {
        self.data = Some(Rc::new(data));

        self
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn callback(&self) -> Callback {
        self.callback
    }

    #[inline(always)]
    pub fn attributes(&self) -> PropertyAttributes {
        self.attributes
    }

    #[inline(always)]
    pub fn data(&self) -> Option<&Rc<dyn Any>> {
        self.data.as_ref()
    }

    #[inline(always)]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The binding site of the property.
    #[inline(always)]
    pub fn origin(&self) -> &'static RustOrigin {
        self.origin
    }

    /// The number of positional parameters of the bound method.
    #[inline(always)]
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    /// Calls the property callback directly.
    ///
    /// Unlike [Class::invoke](crate::runtime::Class::invoke), this function
    /// does not attach the descriptor's data to the `info`.
    #[inline(always)]
    pub fn call(&self, env: &Env, info: &CallInfo) -> RuntimeResult<Value> {
        (self.callback)(env, info)
    }
}

/// Binds a native method to a host property.
///
/// The macro takes the property name, the path of a method, and optionally
/// the [PropertyAttributes] (`DEFAULT` when omitted), and returns a
/// [PropertyDescriptor](crate::runtime::PropertyDescriptor).
///
/// The method may take its receiver as `&self` or `&mut self`, may take the
/// [Env](crate::runtime::Env) handle as the first parameter after the
/// receiver, may have up to [MAX_ARITY](crate::runtime::MAX_ARITY) positional
/// parameters of the [Downcast](crate::runtime::Downcast) types, and may
/// return a value of an [Upcast](crate::runtime::Upcast) type or nothing.
///
/// ```
/// use method_bridge::{
///     class_method,
///     runtime::{CallInfo, Env, Value},
/// };
///
/// struct Greeter {
///     greetings: usize,
/// }
///
/// impl Greeter {
///     fn greet(&mut self, name: &str, excited: bool) -> String {
///         self.greetings += 1;
///
///         match excited {
///             true => format!("Hello, {name}!"),
///             false => format!("Hello, {name}."),
///         }
///     }
/// }
///
/// let descriptor = class_method!("greet", Greeter::greet);
///
/// let env = Env::new();
/// let greeter = Value::wrap(Greeter { greetings: 0 });
///
/// let result = descriptor
///     .call(
///         &env,
///         &CallInfo::new(greeter.clone(), vec![Value::from("world"), Value::from(1)]),
///     )
///     .unwrap();
///
/// assert_eq!(result, Value::from("Hello, world!"));
/// assert_eq!(greeter.unwrap_ref::<Greeter>().unwrap().greetings, 1);
/// assert_eq!(descriptor.to_string(), "Greeter::greet(&mut self, string, bool) -> string");
/// ```
#[macro_export]
macro_rules! class_method {
    ($name:expr, $method:expr $(,)?) => {
        $crate::class_method!(
            $name,
            $method,
            $crate::runtime::PropertyAttributes::DEFAULT,
        )
    };

    ($name:expr, $method:expr, $attributes:expr $(,)?) => {
        $crate::runtime::PropertyDescriptor::method(
            $name,
            |env, info| {
                let mut staged = $crate::runtime::__intrinsics::stage($method, info);

                $crate::runtime::__intrinsics::forward($method, env, info, &mut staged)
            },
            $attributes,
            $crate::runtime::__intrinsics::signature($method),
            {
                static ORIGIN: $crate::runtime::RustOrigin = $crate::runtime::RustOrigin {
                    package: ::std::option::Option::Some((
                        ::std::env!("CARGO_PKG_NAME"),
                        ::std::env!("CARGO_PKG_VERSION"),
                    )),
                    code: ::std::option::Option::Some($crate::runtime::RustCode {
                        module: ::std::module_path!(),
                        line: ::std::line!(),
                        column: ::std::column!(),
                    }),
                };

                &ORIGIN
            },
        )
    };
}
