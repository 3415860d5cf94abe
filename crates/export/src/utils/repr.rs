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

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::{parenthesized, spanned::Spanned, token::Paren, Attribute, Error, Result};

const INTEGERS: [&str; 10] = [
    "u8", "u16", "u32", "u64", "usize", "i8", "i16", "i32", "i64", "isize",
];

// The integer representation of a fieldless enum.
#[derive(Default)]
pub struct ReprMeta {
    int: Option<Ident>,
    c: Option<Span>,
}

impl ReprMeta {
    // The declared integer type, or the C int for `#[repr(C)]`, or `isize`.
    pub fn int_type(&self, span: Span) -> TokenStream {
        if let Some(int) = &self.int {
            return quote_spanned!(int.span()=> #int);
        }

        if let Some(span) = self.c {
            return quote_spanned!(span=> ::std::os::raw::c_int);
        }

        quote_spanned!(span=> isize)
    }

    pub fn enrich(&mut self, attribute: &Attribute) -> Result<()> {
        if !attribute.path().is_ident("repr") {
            return Ok(());
        }

        attribute.parse_nested_meta(|meta| {
            // align(N) and packed(N) arguments.
            if meta.input.peek(Paren) {
                let content;
                parenthesized!(content in meta.input);
                let _ = content.parse::<TokenStream>()?;

                return Ok(());
            }

            if meta.path.is_ident("C") {
                self.c = Some(meta.path.span());
                return Ok(());
            }

            let Some(ident) = meta.path.get_ident() else {
                return Ok(());
            };

            let name = ident.to_string();

            if name == "u128" || name == "i128" {
                return Err(Error::new(
                    ident.span(),
                    "128-bit enum representations cannot be converted into host numbers.",
                ));
            }

            if !INTEGERS.contains(&name.as_str()) {
                return Ok(());
            }

            if let Some(previous) = &self.int {
                return Err(Error::new(
                    ident.span(),
                    format!("Conflicting enum representation. Already declared as {previous}."),
                ));
            }

            self.int = Some(ident.clone());

            Ok(())
        })
    }
}
