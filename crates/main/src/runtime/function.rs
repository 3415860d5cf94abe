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
};

use crate::runtime::{Env, RuntimeError, RuntimeResult, Value};

type HostFn = dyn Fn(&Env, &[Value]) -> RuntimeResult<Value>;

/// A callable host value.
///
/// Native methods receive host callbacks through parameters of this type.
/// Downcasting a value that is not a function never fails; the resulting
/// Function reports [RuntimeError::NotCallable] when invoked.
///
/// Cloning a Function is cheap and preserves its identity:
///
/// ```
/// use method_bridge::runtime::{Env, Function, Value};
///
/// let env = Env::new();
/// let double = Function::new(|_env, args| Ok(Value::from(args[0].to_number() * 2.0)));
///
/// assert_eq!(double.call(&env, &[Value::from(4)]).unwrap(), Value::from(8));
/// assert!(double.ptr_eq(&double.clone()));
/// ```
#[derive(Clone)]
pub struct Function(Rc<HostFn>);

impl Debug for Function {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Function")
    }
}

impl Function {
    #[inline]
    pub fn new(function: impl Fn(&Env, &[Value]) -> RuntimeResult<Value> + 'static) -> Self {
        Self(Rc::new(function))
    }

    // A placeholder for non-callable values that fails on invocation.
    pub(crate) fn not_callable(actual: &'static str) -> Self {
        Self::new(move |_, _| Err(RuntimeError::NotCallable { actual }))
    }

    /// Calls the function with positional `arguments`.
    #[inline(always)]
    pub fn call(&self, env: &Env, arguments: &[Value]) -> RuntimeResult<Value> {
        (self.0)(env, arguments)
    }

    /// Returns true if both handles point to the same function.
    #[inline(always)]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{Adjust, Downcast, Env, Function, RuntimeError, Value};

    #[test]
    fn test_non_callable_staging() {
        let env = Env::new();

        let mut staged = Function::stage(&Value::from("abc"));
        let function = Function::adjust(&mut staged);

        let Err(error) = function.call(&env, &[]) else {
            panic!("string value invoked");
        };

        assert!(matches!(error, RuntimeError::NotCallable { actual: "string" }));
        assert_eq!(error.to_string(), "string value is not a function");

        let callback = env.function(|_, args| Ok(Value::from(args.len() as f64)));
        let mut staged = Function::stage(&callback);

        assert_eq!(
            Function::adjust(&mut staged).call(&env, &[Value::Null, Value::Null]).unwrap(),
            Value::from(2),
        );
    }
}
