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
    cmp::Ordering,
    collections::hash_map::Entry,
    fmt::{Debug, Formatter},
};

use ahash::AHashMap;
use compact_str::CompactString;
use log::{debug, trace, warn};
use strsim::normalized_damerau_levenshtein;

use crate::runtime::{CallInfo, Env, PropertyDescriptor, RuntimeError, RuntimeResult, Value};

pub(crate) static BRIDGE_LOG: &'static str = "method-bridge";

// The lowest closeness of a registered name to be suggested for an unknown
// one.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// A policy for calls whose argument count differs from the arity of the
/// called method.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ArityPolicy {
    /// Missing arguments are undefined, extra arguments are ignored.
    #[default]
    Lenient,

    /// The call is rejected with [RuntimeError::ArityMismatch] before the
    /// method runs.
    Strict,
}

/// A minimal class registration table.
///
/// The Class maps property names to [PropertyDescriptor]s and dispatches the
/// host calls by name:
///
/// ```
/// use method_bridge::{
///     class_method,
///     runtime::{Class, Env, Value},
/// };
///
/// #[derive(Default)]
/// struct Counter {
///     value: i64,
/// }
///
/// impl Counter {
///     fn add(&mut self, delta: i64) -> i64 {
///         self.value += delta;
///         self.value
///     }
///
///     fn get(&self) -> i64 {
///         self.value
///     }
/// }
///
/// let class = Class::new("Counter")
///     .define([
///         class_method!("add", Counter::add),
///         class_method!("get", Counter::get),
///     ])
///     .unwrap();
///
/// let env = Env::new();
/// let counter = class.wrap(Counter::default());
///
/// class.invoke(&env, counter.clone(), "add", vec![Value::from(5)]).unwrap();
///
/// assert_eq!(
///     class.invoke(&env, counter, "get", vec![]).unwrap(),
///     Value::from(5),
/// );
/// ```
pub struct Class {
    name: CompactString,
    properties: AHashMap<CompactString, PropertyDescriptor>,
    arity: ArityPolicy,
}

impl Debug for Class {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names = self.properties.keys().collect::<Vec<_>>();

        names.sort();

        formatter
            .debug_struct("Class")
            .field("name", &self.name)
            .field("properties", &names)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Class {
    /// Creates an empty class with the [lenient](ArityPolicy::Lenient) arity
    /// policy.
    #[inline]
    pub fn new(name: impl Into<CompactString>) -> Self {
        let name = name.into();

        debug!(target: BRIDGE_LOG, "Class {name:?} defined.");

        Self {
            name,
            properties: AHashMap::new(),
            arity: ArityPolicy::default(),
        }
    }

    /// Sets the arity policy of the class.
    #[inline(always)]
    pub fn with_arity(mut self, policy: ArityPolicy) -> Self {
        self.arity = policy;

        self
    }

    /// Registers the property descriptors.
    ///
    /// Fails with [RuntimeError::DuplicateProperty] if a name is already
    /// registered in this class.
    pub fn define(
        mut self,
        descriptors: impl IntoIterator<Item = PropertyDescriptor>,
    ) -> RuntimeResult<Self> {
        for descriptor in descriptors {
            match self.properties.entry(CompactString::from(descriptor.name())) {
                Entry::Occupied(entry) => {
                    return Err(RuntimeError::DuplicateProperty {
                        class: self.name.clone(),
                        property: entry.key().clone(),
                        first: entry.get().origin(),
                        second: descriptor.origin(),
                    });
                }

                Entry::Vacant(entry) => {
                    debug!(
                        target: BRIDGE_LOG,
                        "Property {}::{} registered in {}.",
                        self.name,
                        entry.key(),
                        descriptor.origin(),
                    );

                    let _ = entry.insert(descriptor);
                }
            }
        }

        Ok(self)
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn arity_policy(&self) -> ArityPolicy {
        self.arity
    }

    /// Returns the descriptor of the property `name`.
    #[inline(always)]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    /// Iterates over the registered descriptors in unspecified order.
    #[inline(always)]
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> + '_ {
        self.properties.values()
    }

    /// Wraps a native instance into a new object value that can be the
    /// receiver of this class's methods.
    #[inline(always)]
    pub fn wrap<C: 'static>(&self, instance: C) -> Value {
        Value::wrap(instance)
    }

    /// Calls the property `name` on the `receiver`.
    ///
    /// The call receives the property's opaque data. Under the
    /// [strict](ArityPolicy::Strict) policy, the number of `arguments` must
    /// match the arity of the bound method.
    pub fn invoke(
        &self,
        env: &Env,
        receiver: Value,
        name: &str,
        arguments: Vec<Value>,
    ) -> RuntimeResult<Value> {
        let Some(descriptor) = self.properties.get(name) else {
            let suggestion = self.suggest(name);

            warn!(
                target: BRIDGE_LOG,
                "Unknown property {}::{name} requested.", self.name,
            );

            return Err(RuntimeError::UnknownProperty {
                class: self.name.clone(),
                property: CompactString::from(name),
                suggestion,
            });
        };

        if self.arity == ArityPolicy::Strict && arguments.len() != descriptor.arity() {
            warn!(
                target: BRIDGE_LOG,
                "Property {}::{name} called with {} arguments, expected {}.",
                self.name,
                arguments.len(),
                descriptor.arity(),
            );

            return Err(RuntimeError::ArityMismatch {
                property: CompactString::from(name),
                origin: descriptor.origin(),
                parameters: descriptor.arity(),
                arguments: arguments.len(),
            });
        }

        trace!(
            target: BRIDGE_LOG,
            "Dispatch {}::{name} with {} arguments.",
            self.name,
            arguments.len(),
        );

        let info = CallInfo::new(receiver, arguments).with_data(descriptor.data().cloned());

        descriptor.call(env, &info)
    }

    fn suggest(&self, name: &str) -> Option<CompactString> {
        self.properties
            .keys()
            .map(|candidate| (normalized_damerau_levenshtein(name, candidate), candidate))
            .filter(|(closeness, _)| *closeness >= SUGGESTION_THRESHOLD)
            .max_by(|(a_closeness, a_name), (b_closeness, b_name)| {
                match a_closeness.total_cmp(b_closeness) {
                    Ordering::Equal => b_name.cmp(a_name),
                    ordering => ordering,
                }
            })
            .map(|(_, candidate)| candidate.clone())
    }
}
