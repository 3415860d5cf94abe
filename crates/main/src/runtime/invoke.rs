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

use crate::runtime::{
    hints::short_type_name,
    CallInfo,
    Downcast,
    Env,
    RuntimeResult,
    TypeHint,
    Upcast,
    Value,
};

/// A marker of methods that take the receiver by shared reference (`&self`).
pub struct Shared;

/// A marker of methods that take the receiver by exclusive reference
/// (`&mut self`).
pub struct Exclusive;

/// A marker of methods that take positional parameters only.
pub struct Plain;

/// A marker of methods that take the [Env] handle as the first parameter
/// after the receiver.
pub struct WithEnv;

/// A marker of methods that return a value.
pub struct Returns;

/// A marker of methods that return nothing.
pub struct Void;

/// One of the four invocation shapes of a bound method.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MethodShape {
    /// `fn(&self, A0, A1, ..) -> R`
    Value,

    /// `fn(&self, A0, A1, ..)`
    Void,

    /// `fn(&self, &Env, A0, A1, ..) -> R`
    EnvValue,

    /// `fn(&self, &Env, A0, A1, ..)`
    EnvVoid,
}

impl MethodShape {
    /// Returns true if the method takes the [Env] handle.
    #[inline(always)]
    pub fn takes_env(self) -> bool {
        matches!(self, Self::EnvValue | Self::EnvVoid)
    }

    /// Returns true if the method returns a value.
    #[inline(always)]
    pub fn returns_value(self) -> bool {
        matches!(self, Self::Value | Self::EnvValue)
    }
}

/// The kind of the method's receiver.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ReceiverKind {
    /// `&self`
    Shared,

    /// `&mut self`
    Exclusive,
}

/// A native method that can be bound to a host property.
///
/// The trait is implemented for every function item or method path of the
/// form `fn(&C, [&Env,] A0, .., AN) [-> R]` and
/// `fn(&mut C, [&Env,] A0, .., AN) [-> R]`, where `C` is the receiver type,
/// every `Ai` implements [Downcast], `R` implements [Upcast], and N is at most
/// [MAX_ARITY](crate::runtime::MAX_ARITY).
///
/// The `Marker` parameter is a tuple of the [Shared]/[Exclusive],
/// [Plain]/[WithEnv] and [Returns]/[Void] markers. For any given method only
/// one marker combination fits, so the implementation is selected by the
/// trait resolution at the binding site, and the user never spells the
/// markers explicitly. The [class_method](crate::class_method) macro is the
/// intended way to bind methods.
///
/// The [call](Self::call) function unwraps the receiver from the
/// [CallInfo::this] value, passes the converted arguments, and converts the
/// result. Void methods produce the undefined value.
pub trait Method<C, Args, Marker>: Copy + 'static {
    /// The invocation shape of the method.
    const SHAPE: MethodShape;

    /// The receiver kind of the method.
    const RECEIVER: ReceiverKind;

    /// Returns a rough description of the method's result.
    fn output() -> TypeHint;

    /// Invokes the method on the receiver of the `info` with the already
    /// converted `args`.
    fn call(self, env: &Env, info: &CallInfo, args: Args) -> RuntimeResult<Value>;
}

macro_rules! impl_method {
    ($($arg:ident $index:tt),*) => {
        impl_method!(@returns [Shared unwrap_ref &] [Plain Value] [] [] env; $($arg $index),*);
        impl_method!(@returns [Exclusive unwrap_mut &mut] [Plain Value] [] [] env; $($arg $index),*);
        impl_method!(@returns [Shared unwrap_ref &] [WithEnv EnvValue] [&Env,] [env,] env; $($arg $index),*);
        impl_method!(@returns [Exclusive unwrap_mut &mut] [WithEnv EnvValue] [&Env,] [env,] env; $($arg $index),*);
        impl_method!(@void [Shared unwrap_ref &] [Plain Void] [] [] env; $($arg $index),*);
        impl_method!(@void [Exclusive unwrap_mut &mut] [Plain Void] [] [] env; $($arg $index),*);
        impl_method!(@void [Shared unwrap_ref &] [WithEnv EnvVoid] [&Env,] [env,] env; $($arg $index),*);
        impl_method!(@void [Exclusive unwrap_mut &mut] [WithEnv EnvVoid] [&Env,] [env,] env; $($arg $index),*);
    };

    (
        @returns
        [$receiver:ident $unwrap:ident $($borrow:tt)+]
        [$prefix:ident $shape:ident]
        [$($env_ty:tt)*]
        [$($env_arg:tt)*] $env:ident;
        $($arg:ident $index:tt),*
    ) => {
        impl<F, C, R, $($arg),*> Method<C, ($($arg,)*), ($receiver, $prefix, Returns)> for F
        where
            F: Fn($($borrow)+ C, $($env_ty)* $($arg),*) -> R + Copy + 'static,
            C: 'static,
            R: Upcast,
            $($arg: Downcast,)*
        {
            const SHAPE: MethodShape = MethodShape::$shape;
            const RECEIVER: ReceiverKind = ReceiverKind::$receiver;

            #[inline(always)]
            fn output() -> TypeHint {
                R::hint()
            }

            #[allow(unused_mut, unused_variables)]
            #[inline(always)]
            fn call(self, $env: &Env, info: &CallInfo, args: ($($arg,)*)) -> RuntimeResult<Value> {
                let mut instance = info.this().$unwrap::<C>()?;

                let result = self($($borrow)+ *instance, $($env_arg)* $(args.$index),*);

                Ok(R::upcast($env, result))
            }
        }
    };

    (
        @void
        [$receiver:ident $unwrap:ident $($borrow:tt)+]
        [$prefix:ident $shape:ident]
        [$($env_ty:tt)*]
        [$($env_arg:tt)*] $env:ident;
        $($arg:ident $index:tt),*
    ) => {
        impl<F, C, $($arg),*> Method<C, ($($arg,)*), ($receiver, $prefix, Void)> for F
        where
            F: Fn($($borrow)+ C, $($env_ty)* $($arg),*) + Copy + 'static,
            C: 'static,
            $($arg: Downcast,)*
        {
            const SHAPE: MethodShape = MethodShape::$shape;
            const RECEIVER: ReceiverKind = ReceiverKind::$receiver;

            #[inline(always)]
            fn output() -> TypeHint {
                TypeHint::Undefined
            }

            #[allow(unused_mut, unused_variables)]
            #[inline(always)]
            fn call(self, $env: &Env, info: &CallInfo, args: ($($arg,)*)) -> RuntimeResult<Value> {
                let mut instance = info.this().$unwrap::<C>()?;

                self($($borrow)+ *instance, $($env_arg)* $(args.$index),*);

                Ok($env.undefined())
            }
        }
    };
}

impl_method!();
impl_method!(A0 0);
impl_method!(A0 0, A1 1);
impl_method!(A0 0, A1 1, A2 2);
impl_method!(A0 0, A1 1, A2 2, A3 3);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9, A10 10);
impl_method!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9, A10 10, A11 11);

/// An introspectable summary of a bound [Method].
///
/// The [Display] implementation of this object renders a canonical view of
/// the method's signature, such as `fn(&mut Counter, number, string) -> number`.
/// The [display](Self::display) function renders the signature with the
/// property name instead: `Counter::add(&mut self, number, string) -> number`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The full Rust name of the receiver type.
    pub receiver: &'static str,

    /// The receiver kind.
    pub receiver_kind: ReceiverKind,

    /// The invocation shape.
    pub shape: MethodShape,

    /// The positional parameters, excluding the receiver and the [Env]
    /// handle.
    pub inputs: Vec<TypeHint>,

    /// The type of the method's result. Void methods have the
    /// [Undefined](TypeHint::Undefined) output.
    pub output: TypeHint,
}

impl Display for Signature {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let receiver = short_type_name(self.receiver);

        formatter.write_str("fn(")?;

        match self.receiver_kind {
            ReceiverKind::Shared => formatter.write_fmt(format_args!("&{receiver}"))?,
            ReceiverKind::Exclusive => formatter.write_fmt(format_args!("&mut {receiver}"))?,
        }

        self.fmt_tail(formatter)
    }
}

impl Signature {
    /// The number of positional parameters.
    #[inline(always)]
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// Returns a displayable view of the signature as a method named `name`
    /// of the receiver type.
    #[inline(always)]
    pub fn display<'a>(&'a self, name: &'a str) -> impl Display + 'a {
        struct DisplaySignature<'a> {
            signature: &'a Signature,
            name: &'a str,
        }

        impl<'a> Display for DisplaySignature<'a> {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                let signature = self.signature;

                formatter.write_fmt(format_args!(
                    "{}::{}(",
                    short_type_name(signature.receiver),
                    self.name,
                ))?;

                match signature.receiver_kind {
                    ReceiverKind::Shared => formatter.write_str("&self")?,
                    ReceiverKind::Exclusive => formatter.write_str("&mut self")?,
                }

                signature.fmt_tail(formatter)
            }
        }

        DisplaySignature {
            signature: self,
            name,
        }
    }

    fn fmt_tail(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.shape.takes_env() {
            formatter.write_str(", env")?;
        }

        for input in &self.inputs {
            formatter.write_str(", ")?;
            Display::fmt(input, formatter)?;
        }

        formatter.write_str(")")?;

        if self.shape.returns_value() {
            formatter.write_str(" -> ")?;
            Display::fmt(&self.output, formatter)?;
        }

        Ok(())
    }
}
