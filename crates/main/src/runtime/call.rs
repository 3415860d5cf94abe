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
    fmt::{Debug, Formatter},
    ops::Index,
    rc::Rc,
};

use crate::runtime::Value;

/// A per-invocation record of a host call.
///
/// The CallInfo exposes the receiver ([this](Self::this)), the ordered call
/// arguments, and the optional opaque data attached to the called property.
/// The number of arguments is determined by the actual call and may differ
/// from the arity of the bound method.
///
/// Indexing past the end of the argument list yields the undefined value:
///
/// ```
/// use method_bridge::runtime::{CallInfo, Value};
///
/// let info = CallInfo::new(Value::Undefined, vec![Value::from(7)]);
///
/// assert_eq!(info[0], Value::from(7));
/// assert!(info[3].is_undefined());
/// ```
pub struct CallInfo {
    this: Value,
    arguments: Vec<Value>,
    data: Option<Rc<dyn Any>>,
    undefined: Value,
}

impl Debug for CallInfo {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CallInfo")
            .field("this", &self.this)
            .field("arguments", &self.arguments)
            .field("data", &self.data.is_some())
            .finish()
    }
}

impl Index<usize> for CallInfo {
    type Output = Value;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        self.argument(index)
    }
}

impl CallInfo {
    /// Creates a call record with the receiver and the call arguments.
    #[inline(always)]
    pub fn new(this: Value, arguments: Vec<Value>) -> Self {
        Self {
            this,
            arguments,
            data: None,
            undefined: Value::Undefined,
        }
    }

    /// Attaches the opaque data of the called property.
    #[inline(always)]
    pub fn with_data(mut self, data: Option<Rc<dyn Any>>) -> Self {
        self.data = data;

        self
    }

    /// The receiver of the call.
    #[inline(always)]
    pub fn this(&self) -> &Value {
        &self.this
    }

    /// All provided call arguments in order.
    #[inline(always)]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// The number of provided call arguments.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Returns the argument at `index`, or the undefined value if the call
    /// provides fewer arguments.
    #[inline(always)]
    pub fn argument(&self, index: usize) -> &Value {
        self.arguments.get(index).unwrap_or(&self.undefined)
    }

    /// Returns the opaque data attached to the called property if it is of
    /// type `T`.
    #[inline]
    pub fn data<T: 'static>(&self) -> Option<&T> {
        self.data.as_ref()?.downcast_ref::<T>()
    }
}
