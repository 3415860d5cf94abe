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

use method_bridge::{
    class_method,
    runtime::{
        ArityPolicy,
        CallInfo,
        Class,
        Env,
        MethodShape,
        PropertyAttributes,
        PropertyDescriptor,
        ReceiverKind,
        RuntimeError,
        RuntimeResult,
        RustOrigin,
        Signature,
        TypeHint,
        Value,
    },
};

#[derive(Default)]
struct Counter {
    value: i64,
}

impl Counter {
    fn add(&mut self, delta: i64) -> i64 {
        self.value += delta;
        self.value
    }

    fn get(&self) -> i64 {
        self.value
    }

    fn reset(&mut self) {
        self.value = 0;
    }
}

fn counter_class(policy: ArityPolicy) -> Class {
    Class::new("Counter")
        .with_arity(policy)
        .define([
            class_method!("add", Counter::add),
            class_method!("get", Counter::get),
            class_method!(
                "reset",
                Counter::reset,
                PropertyAttributes::WRITABLE | PropertyAttributes::CONFIGURABLE,
            ),
        ])
        .unwrap()
}

fn scale(_env: &Env, info: &CallInfo) -> RuntimeResult<Value> {
    let factor = info.data::<f64>().copied().unwrap_or(1.0);

    Ok(Value::from(info.argument(0).to_number() * factor))
}

#[test]
fn test_lenient_dispatch() {
    let class = counter_class(ArityPolicy::Lenient);
    let env = Env::new();
    let counter = class.wrap(Counter::default());

    assert_eq!(
        class
            .invoke(&env, counter.clone(), "add", vec![Value::from(3), Value::from(100)])
            .unwrap(),
        Value::from(3),
    );

    assert_eq!(
        class.invoke(&env, counter.clone(), "add", vec![]).unwrap(),
        Value::from(3),
    );

    assert_eq!(
        class
            .invoke(&env, counter.clone(), "get", vec![Value::Null])
            .unwrap(),
        Value::from(3),
    );

    assert_eq!(
        class.invoke(&env, counter.clone(), "reset", vec![]).unwrap(),
        Value::Undefined,
    );

    assert_eq!(class.invoke(&env, counter, "get", vec![]).unwrap(), Value::from(0));
}

#[test]
fn test_strict_arity() {
    let class = counter_class(ArityPolicy::Strict);
    let env = Env::new();
    let counter = class.wrap(Counter::default());

    assert!(matches!(
        class.invoke(&env, counter.clone(), "add", vec![]),
        Err(RuntimeError::ArityMismatch {
            parameters: 1,
            arguments: 0,
            ..
        }),
    ));

    assert!(matches!(
        class.invoke(&env, counter.clone(), "get", vec![Value::from(1)]),
        Err(RuntimeError::ArityMismatch {
            parameters: 0,
            arguments: 1,
            ..
        }),
    ));

    // Rejected calls never reach the method.
    assert_eq!(counter.unwrap_ref::<Counter>().unwrap().value, 0);

    assert_eq!(
        class
            .invoke(&env, counter, "add", vec![Value::from(2)])
            .unwrap(),
        Value::from(2),
    );
}

#[test]
fn test_unknown_property() {
    let class = counter_class(ArityPolicy::Lenient);
    let env = Env::new();
    let counter = class.wrap(Counter::default());

    let Err(error) = class.invoke(&env, counter.clone(), "gett", vec![]) else {
        panic!("unknown property dispatched");
    };

    match &error {
        RuntimeError::UnknownProperty {
            class,
            property,
            suggestion,
        } => {
            assert_eq!(class.as_str(), "Counter");
            assert_eq!(property.as_str(), "gett");
            assert_eq!(suggestion.as_deref(), Some("get"));
        }

        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(
        error.to_string(),
        "unknown property \"gett\" of class \"Counter\", did you mean \"get\"?",
    );

    assert!(matches!(
        class.invoke(&env, counter, "xyzzy", vec![]),
        Err(RuntimeError::UnknownProperty {
            suggestion: None,
            ..
        }),
    ));
}

#[test]
fn test_duplicate_property() {
    let result = Class::new("Counter").define([
        class_method!("get", Counter::get),
        class_method!("get", Counter::add),
    ]);

    let Err(RuntimeError::DuplicateProperty {
        property,
        first,
        second,
        ..
    }) = result
    else {
        panic!("duplicate property registered");
    };

    assert_eq!(property.as_str(), "get");
    assert_ne!(first, second);
}

#[test]
fn test_attributes() {
    let class = counter_class(ArityPolicy::Lenient);

    let reset = class.property("reset").unwrap();
    let get = class.property("get").unwrap();

    assert!(reset.attributes().contains(PropertyAttributes::WRITABLE));
    assert!(reset.attributes().contains(PropertyAttributes::CONFIGURABLE));
    assert!(!reset.attributes().contains(PropertyAttributes::ENUMERABLE));
    assert_eq!(get.attributes(), PropertyAttributes::DEFAULT);

    let get = class_method!("get", Counter::get)
        .with_attributes(PropertyAttributes::ENUMERABLE | PropertyAttributes::STATIC);

    assert_eq!(get.attributes().bits(), 0b10 | (1 << 10));
    assert_eq!(format!("{:?}", get.attributes()), "ENUMERABLE | STATIC");

    assert_eq!(class.properties().count(), 3);
}

#[test]
fn test_hand_written_callback() {
    let descriptor = PropertyDescriptor::method(
        "scale",
        scale,
        PropertyAttributes::DEFAULT,
        Signature {
            receiver: "Counter",
            receiver_kind: ReceiverKind::Shared,
            shape: MethodShape::Value,
            inputs: vec![TypeHint::Number("f64")],
            output: TypeHint::Number("f64"),
        },
        RustOrigin::nil(),
    )
    .with_data(2.5f64);

    let class = Class::new("Counter").define([descriptor]).unwrap();
    let env = Env::new();

    assert_eq!(
        class
            .invoke(&env, Value::Undefined, "scale", vec![Value::from(4)])
            .unwrap(),
        Value::from(10.0),
    );

    let property = class.property("scale").unwrap();

    // Direct calls do not attach the property data.
    assert_eq!(
        property
            .call(&env, &CallInfo::new(Value::Undefined, vec![Value::from(4)]))
            .unwrap(),
        Value::from(4.0),
    );

    assert_eq!(property.to_string(), "Counter::scale(&self, number) -> number");
}
