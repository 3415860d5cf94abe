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

static NIL_RUST_ORIGIN: RustOrigin = RustOrigin {
    package: None,
    code: None,
};

/// A pointer to a specific location in the Rust source code.
///
/// The [class_method](crate::class_method) macro creates a static instance of
/// RustOrigin for every binding site, so each
/// [PropertyDescriptor](crate::runtime::PropertyDescriptor) can tell where its
/// method was bound. The runtime errors use these references to point the
/// reader to the offending registration.
///
/// Typically, you don't need to create this object manually. You would
/// generally work with `&'static RustOrigin` references.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RustOrigin {
    /// The name and version of the crate to which the Rust file belongs.
    pub package: Option<(&'static str, &'static str)>,

    /// The actual reference to the Rust file within the crate.
    pub code: Option<RustCode>,
}

impl Display for RustOrigin {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.code, &self.package) {
            (Some(code), _) => Display::fmt(code, formatter),
            (None, Some((name, _))) => formatter.write_str(name),
            (None, None) => formatter.write_str("[?]"),
        }
    }
}

impl RustOrigin {
    /// Returns a RustOrigin that does not point to any Rust code.
    #[inline(always)]
    pub fn nil() -> &'static Self {
        &NIL_RUST_ORIGIN
    }

    #[inline(always)]
    pub fn is_nil(&self) -> bool {
        self.package.is_none() && self.code.is_none()
    }
}

/// A location in the Rust source code: `module [line:column]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RustCode {
    /// The path of the Rust module.
    pub module: &'static str,

    /// A one-based line number within the module file.
    pub line: u32,

    /// A one-based column number within a line of the module file.
    pub column: u32,
}

impl Display for RustCode {
    #[inline(always)]
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_fmt(format_args!(
            "{} [{}:{}]",
            self.module, self.line, self.column
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RustCode, RustOrigin};

    #[test]
    fn test_origin_display() {
        let origin = RustOrigin {
            package: Some(("method-bridge", "0.1.0")),
            code: Some(RustCode {
                module: "method_bridge::tests",
                line: 12,
                column: 5,
            }),
        };

        assert_eq!(origin.to_string(), "method_bridge::tests [12:5]");
        assert_eq!(RustOrigin::nil().to_string(), "[?]");
        assert_eq!(RustOrigin::default(), *RustOrigin::nil());
        assert!(RustOrigin::nil().is_nil());
        assert!(!origin.is_nil());
        assert!(*RustOrigin::nil() < origin);
    }
}
