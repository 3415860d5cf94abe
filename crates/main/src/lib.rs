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

//! # Method Bridge
//!
//! A generic argument-marshalling and method-dispatch bridge between a
//! dynamically typed host environment and statically typed native object
//! methods.
//!
//! Given an incoming host call (a receiver object plus a vector of dynamic
//! arguments) and a native Rust method, the bridge converts every argument
//! into the exact parameter type of the method, invokes the method on the
//! wrapped instance, and converts the result back into a dynamic value.
//!
//! ```
//! use method_bridge::{
//!     class_method,
//!     runtime::{Class, Env, Upcast, Value},
//! };
//!
//! #[derive(Upcast)]
//! #[repr(u8)]
//! enum Level {
//!     Low = 1,
//!     High = 2,
//! }
//!
//! struct Thermostat {
//!     target: f64,
//! }
//!
//! impl Thermostat {
//!     fn set(&mut self, target: f64) {
//!         self.target = target;
//!     }
//!
//!     fn level(&self) -> Level {
//!         match self.target > 20.0 {
//!             true => Level::High,
//!             false => Level::Low,
//!         }
//!     }
//! }
//!
//! let class = Class::new("Thermostat")
//!     .define([
//!         class_method!("set", Thermostat::set),
//!         class_method!("level", Thermostat::level),
//!     ])
//!     .unwrap();
//!
//! let env = Env::new();
//! let thermostat = class.wrap(Thermostat { target: 18.0 });
//!
//! let result = class.invoke(&env, thermostat.clone(), "set", vec![Value::from("22.5")]);
//!
//! assert_eq!(result.unwrap(), Value::Undefined);
//!
//! assert_eq!(
//!     class.invoke(&env, thermostat, "level", vec![]).unwrap(),
//!     Value::from(2),
//! );
//! ```
//!
//! The [runtime] module documents the conversion rules and the dispatch
//! machinery.

extern crate self as method_bridge;

mod exports;
pub mod runtime;
