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

use std::ffi::{CStr, CString};

use crate::{
    exports::utils::owned_adjust,
    runtime::{Adjust, Downcast, Env, TypeHint, Upcast, Value},
};

impl Downcast for String {
    type Staged = Self;

    #[inline(always)]
    fn stage(value: &Value) -> Self::Staged {
        value.to_string()
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("String")
    }
}

owned_adjust!(String);

impl<'r> Downcast for &'r str {
    type Staged = String;

    #[inline(always)]
    fn stage(value: &Value) -> Self::Staged {
        value.to_string()
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("&str")
    }
}

impl<'a> Adjust<'a> for &'a str {
    #[inline(always)]
    fn adjust(staged: &'a mut Self::Staged) -> Self {
        staged.as_str()
    }
}

impl<'r> Downcast for &'r [u8] {
    type Staged = String;

    #[inline(always)]
    fn stage(value: &Value) -> Self::Staged {
        value.to_string()
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("&[u8]")
    }
}

impl<'a> Adjust<'a> for &'a [u8] {
    #[inline(always)]
    fn adjust(staged: &'a mut Self::Staged) -> Self {
        staged.as_bytes()
    }
}

// A C consumer stops reading at the first NUL byte, so the staged text ends
// there.
fn stage_c_string(value: &Value) -> CString {
    let mut bytes = value.to_string().into_bytes();

    if let Some(position) = bytes.iter().position(|byte| *byte == 0) {
        bytes.truncate(position);
    }

    CString::new(bytes).unwrap_or_default()
}

impl<'r> Downcast for &'r CStr {
    type Staged = CString;

    #[inline(always)]
    fn stage(value: &Value) -> Self::Staged {
        stage_c_string(value)
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("&CStr")
    }
}

impl<'a> Adjust<'a> for &'a CStr {
    #[inline(always)]
    fn adjust(staged: &'a mut Self::Staged) -> Self {
        staged.as_c_str()
    }
}

// Raw text pointers. The `c_char` type is an alias of one of these two types
// depending on the platform. The pointer is valid until the dispatch callback
// drops the staged string, that is, for the duration of the method call.
macro_rules! impl_c_pointer {
    ($($byte:ty => $name:expr;)+) => {
        $(
            impl Downcast for *const $byte {
                type Staged = CString;

                #[inline(always)]
                fn stage(value: &Value) -> Self::Staged {
                    stage_c_string(value)
                }

                #[inline(always)]
                fn hint() -> TypeHint {
                    TypeHint::String($name)
                }
            }

            impl<'a> Adjust<'a> for *const $byte {
                #[inline(always)]
                fn adjust(staged: &'a mut Self::Staged) -> Self {
                    staged.as_ptr() as *const $byte
                }
            }
        )+
    };
}

impl_c_pointer! {
    i8 => "*const i8";
    u8 => "*const u8";
}

impl Upcast for String {
    #[inline(always)]
    fn upcast(env: &Env, this: Self) -> Value {
        env.string(this)
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("String")
    }
}

impl<'r> Upcast for &'r str {
    #[inline(always)]
    fn upcast(env: &Env, this: Self) -> Value {
        env.string(this)
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("&str")
    }
}

impl<'r> Upcast for &'r CStr {
    #[inline(always)]
    fn upcast(env: &Env, this: Self) -> Value {
        env.string(&*this.to_string_lossy())
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("&CStr")
    }
}

impl Upcast for char {
    #[inline(always)]
    fn upcast(env: &Env, this: Self) -> Value {
        let mut buffer = [0; 4];

        env.string(&*this.encode_utf8(&mut buffer))
    }

    #[inline(always)]
    fn hint() -> TypeHint {
        TypeHint::String("char")
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use crate::runtime::{Adjust, Downcast, Value};

    #[test]
    fn test_c_views() {
        let value = Value::from("abc\0def");

        let mut staged = <&CStr>::stage(&value);
        assert_eq!(<&CStr>::adjust(&mut staged).to_bytes(), b"abc");

        let mut staged = <*const u8>::stage(&value);
        let pointer = <*const u8>::adjust(&mut staged);

        // Safety: the pointer refers to the staged string that is still alive.
        let text = unsafe { CStr::from_ptr(pointer as *const _) };

        assert_eq!(text.to_bytes(), b"abc");

        let mut staged = <&[u8]>::stage(&Value::Null);
        assert_eq!(<&[u8]>::adjust(&mut staged), b"null");
    }
}
