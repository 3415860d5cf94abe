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

//! # Method Bridge Macros Crate
//!
//! This is a helper crate for the main `method-bridge` crate.
//!
//! The `Upcast` derive macro in this crate implements the
//! `Upcast` trait for fieldless enums, so the methods bound to the host can
//! return enum values. The enum is converted through its underlying integer
//! representation.

mod export;
mod utils;

use proc_macro::TokenStream;
use syn::parse_macro_input;

use crate::export::UpcastEnum;

/// Implements the `Upcast` trait for a fieldless enum.
///
/// The enum value converts into the host number equal to the variant's
/// discriminant. The discriminant type is the integer type of the
/// `#[repr(..)]` attribute, the C `int` for `#[repr(C)]`, and `isize` when
/// the attribute is absent.
///
/// ```ignore
/// #[derive(Upcast)]
/// #[repr(u8)]
/// enum Mode {
///     Read = 1,
///     Write = 2,
/// }
/// ```
///
/// There is no opposite conversion: host numbers cannot be downcast into
/// enums.
#[proc_macro_derive(Upcast)]
pub fn upcast(input: TokenStream) -> TokenStream {
    let output = parse_macro_input!(input as UpcastEnum);
    output.into()
}
