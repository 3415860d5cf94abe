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
    fmt::{Debug, Formatter},
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::runtime::{Function, RuntimeResult, Value};

static NEXT_ENV_ID: AtomicUsize = AtomicUsize::new(1);

/// A handle of the active host environment.
///
/// The dispatch layer threads the Env through every call by reference. A
/// bound method that declares `&Env` as its first parameter after the
/// receiver receives the very same reference that was passed to the
/// dispatch.
///
/// The Env is neither [Clone] nor [Copy]: every instance has its own
/// [id](Self::id).
pub struct Env {
    id: usize,
}

impl Default for Env {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Env {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_fmt(format_args!("Env({})", self.id))
    }
}

impl Env {
    /// Creates a new environment with a unique id.
    #[inline]
    pub fn new() -> Self {
        Self {
            id: NEXT_ENV_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns the unique id of this environment.
    #[inline(always)]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns true if `other` is this very environment instance.
    #[inline(always)]
    pub fn is_same(&self, other: &Env) -> bool {
        std::ptr::eq(self, other)
    }

    #[inline(always)]
    pub fn undefined(&self) -> Value {
        Value::Undefined
    }

    #[inline(always)]
    pub fn null(&self) -> Value {
        Value::Null
    }

    #[inline(always)]
    pub fn boolean(&self, value: bool) -> Value {
        Value::Boolean(value)
    }

    #[inline(always)]
    pub fn number(&self, value: f64) -> Value {
        Value::Number(value)
    }

    #[inline(always)]
    pub fn string(&self, value: impl Into<Rc<str>>) -> Value {
        Value::String(value.into())
    }

    #[inline(always)]
    pub fn function(
        &self,
        function: impl Fn(&Env, &[Value]) -> RuntimeResult<Value> + 'static,
    ) -> Value {
        Value::Function(Function::new(function))
    }
}
