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

use proc_macro2::TokenStream;
use quote::quote_spanned;
use syn::{
    parse::{Parse, ParseStream},
    spanned::Spanned,
    Data,
    DeriveInput,
    Error,
    Fields,
    Result,
};

use crate::utils::{Facade, ReprMeta};

pub struct UpcastEnum(TokenStream);

impl Parse for UpcastEnum {
    fn parse(input: ParseStream) -> Result<Self> {
        let item = input.parse::<DeriveInput>()?;

        let data = match &item.data {
            Data::Enum(data) => data,

            Data::Struct(data) => {
                return Err(Error::new(
                    data.struct_token.span,
                    "Upcast derive supports fieldless enums only.",
                ));
            }

            Data::Union(data) => {
                return Err(Error::new(
                    data.union_token.span,
                    "Upcast derive supports fieldless enums only.",
                ));
            }
        };

        if !item.generics.params.is_empty() {
            return Err(Error::new(
                item.generics.span(),
                "Generic enums cannot derive Upcast.",
            ));
        }

        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(Error::new(
                    variant.fields.span(),
                    "Enum variants with fields cannot be converted through \
                    the underlying integer representation.",
                ));
            }
        }

        let mut repr = ReprMeta::default();

        for attribute in &item.attrs {
            repr.enrich(attribute)?;
        }

        let span = item.ident.span();
        let ident = &item.ident;
        let runtime = ident.face_runtime();
        let int = repr.int_type(span);

        Ok(Self(quote_spanned!(span=>
            impl #runtime::Upcast for #ident {
                #[inline(always)]
                fn upcast(env: &#runtime::Env, this: Self) -> #runtime::Value {
                    <#int as #runtime::Upcast>::upcast(env, this as #int)
                }

                #[inline(always)]
                fn hint() -> #runtime::TypeHint {
                    <#int as #runtime::Upcast>::hint()
                }
            }
        )))
    }
}

impl From<UpcastEnum> for proc_macro::TokenStream {
    #[inline(always)]
    fn from(value: UpcastEnum) -> Self {
        value.0.into()
    }
}
