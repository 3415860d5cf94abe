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

use std::ffi::CStr;

use method_bridge::{
    class_method,
    runtime::{
        Adjust,
        CallInfo,
        Downcast,
        Env,
        Function,
        MethodShape,
        PropertyDescriptor,
        ReceiverKind,
        RuntimeError,
        TypeHint,
        Upcast,
        Value,
    },
};

#[derive(Default)]
struct Recorder {
    calls: usize,
    numbers: Vec<i64>,
    text: String,
    flag: Option<bool>,
    env: Option<usize>,
}

#[derive(Upcast)]
#[repr(u8)]
enum Status {
    Idle = 0,
    Ready = 2,
}

#[derive(Upcast)]
enum Signed {
    Negative = -3,
}

impl Recorder {
    fn answer(&self) -> i32 {
        42
    }

    fn one(&mut self, a: i64) -> i64 {
        self.numbers.push(a);
        a
    }

    fn two(&mut self, a: i32, b: &str) {
        self.numbers.push(i64::from(a));
        self.text = String::from(b);
    }

    fn three(&mut self, a: u8, b: u16, c: u32) -> f64 {
        f64::from(a) + f64::from(b) + f64::from(c)
    }

    fn five(&mut self, a: i64, b: i64, c: i64, d: i64, e: i64) -> i64 {
        self.numbers.extend([a, b, c, d, e]);
        a + b + c + d + e
    }

    #[allow(clippy::too_many_arguments)]
    fn twelve(
        &self,
        a: u8,
        b: u8,
        c: u8,
        d: u8,
        e: u8,
        f: u8,
        g: u8,
        h: u8,
        i: u8,
        j: u8,
        k: u8,
        l: u8,
    ) -> u32 {
        [a, b, c, d, e, f, g, h, i, j, k, l]
            .into_iter()
            .map(u32::from)
            .sum()
    }

    fn touch(&mut self) {
        self.calls += 1;
    }

    fn defaults(&mut self, flag: bool, number: f64, text: String) -> String {
        format!("{flag}|{number}|{text}|")
    }

    fn status(&self, ready: bool) -> Status {
        match ready {
            true => Status::Ready,
            false => Status::Idle,
        }
    }

    fn signed(&self) -> Signed {
        Signed::Negative
    }

    fn env_value(&self, env: &Env, a: i32) -> Value {
        env.number(f64::from(a) * 2.0)
    }

    fn env_void(&mut self, env: &Env) {
        self.env = Some(env as *const Env as usize);
    }

    fn optional(&mut self, flag: Option<bool>, text: Option<&str>) -> Option<String> {
        self.flag = flag;
        text.map(str::to_uppercase)
    }

    fn c_text(&self, text: &CStr, bytes: &[u8]) -> usize {
        text.to_bytes().len() * 100 + bytes.len()
    }

    fn passthrough(&self, value: Value) -> Value {
        value
    }

    fn widths(&self, narrow: i32, wide: i64, platform: usize) -> String {
        format!("{narrow}|{wide}|{platform}")
    }

    fn apply(&self, env: &Env, callback: Function, a: i32) -> Value {
        match callback.call(env, &[env.number(f64::from(a)), env.string("x")]) {
            Ok(result) => result,
            Err(error) => env.string(error.to_string()),
        }
    }

    fn keep(&mut self, callback: Option<Function>) -> Option<Function> {
        self.calls += 1;
        callback
    }
}

fn round_trip<T>(value: T) -> T
where
    T: Upcast + Downcast + for<'a> Adjust<'a>,
{
    let value = T::upcast(&Env::new(), value);
    let mut staged = T::stage(&value);

    T::adjust(&mut staged)
}

fn call(descriptor: &PropertyDescriptor, receiver: &Value, arguments: Vec<Value>) -> Value {
    descriptor
        .call(&Env::new(), &CallInfo::new(receiver.clone(), arguments))
        .unwrap()
}

fn numbers(receiver: &Value) -> Vec<i64> {
    receiver.unwrap_ref::<Recorder>().unwrap().numbers.clone()
}

#[test]
fn test_zero_arity_constant() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("answer", Recorder::answer);

    assert_eq!(call(&descriptor, &recorder, vec![]), Value::from(42));
    assert_eq!(descriptor.arity(), 0);
}

#[test]
fn test_two_arity_void() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("two", Recorder::two);

    let result = call(
        &descriptor,
        &recorder,
        vec![Value::from(7), Value::from("abc")],
    );

    assert_eq!(result, Value::Undefined);
    assert_eq!(numbers(&recorder), vec![7]);
    assert_eq!(recorder.unwrap_ref::<Recorder>().unwrap().text, "abc");
}

#[test]
fn test_extra_arguments_ignored() {
    let recorder = Value::wrap(Recorder::default());

    let one = class_method!("one", Recorder::one);
    let three = class_method!("three", Recorder::three);
    let five = class_method!("five", Recorder::five);
    let twelve = class_method!("twelve", Recorder::twelve);

    let arguments = (1..=14).map(|number| Value::from(number)).collect::<Vec<_>>();

    assert_eq!(call(&one, &recorder, arguments.clone()), Value::from(1));
    assert_eq!(call(&three, &recorder, arguments.clone()), Value::from(6));
    assert_eq!(call(&five, &recorder, arguments.clone()), Value::from(15));
    assert_eq!(call(&twelve, &recorder, arguments), Value::from(78));

    assert_eq!(numbers(&recorder), vec![1, 1, 2, 3, 4, 5]);
}

#[test]
fn test_missing_arguments_defaulted() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("defaults", Recorder::defaults);

    assert_eq!(
        call(&descriptor, &recorder, vec![]),
        Value::from("false|0||"),
    );

    assert_eq!(
        call(&descriptor, &recorder, vec![Value::from(true)]),
        Value::from("true|0||"),
    );

    let five = class_method!("five", Recorder::five);

    assert_eq!(
        call(&five, &recorder, vec![Value::from(10), Value::from(20)]),
        Value::from(30),
    );

    assert_eq!(numbers(&recorder), vec![10, 20, 0, 0, 0]);
}

#[test]
fn test_void_yields_undefined() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("touch", Recorder::touch);

    for _ in 0..3 {
        assert_eq!(call(&descriptor, &recorder, vec![Value::from(1)]), Value::Undefined);
    }

    assert_eq!(recorder.unwrap_ref::<Recorder>().unwrap().calls, 3);
    assert_eq!(descriptor.signature().shape, MethodShape::Void);
    assert_eq!(descriptor.signature().output, TypeHint::Undefined);
}

#[test]
fn test_enum_results() {
    let recorder = Value::wrap(Recorder::default());
    let status = class_method!("status", Recorder::status);
    let signed = class_method!("signed", Recorder::signed);

    assert_eq!(call(&status, &recorder, vec![Value::from(true)]), Value::from(2));
    assert_eq!(call(&status, &recorder, vec![]), Value::from(0));
    assert_eq!(call(&signed, &recorder, vec![]), Value::from(-3));

    assert_eq!(status.signature().output, TypeHint::Number("u8"));
    assert_eq!(signed.signature().output, TypeHint::Number("isize"));
    assert_eq!(Status::upcast(&Env::new(), Status::Idle), Value::from(0));
}

#[test]
fn test_env_identity() {
    let recorder = Value::wrap(Recorder::default());
    let env_void = class_method!("env_void", Recorder::env_void);
    let env_value = class_method!("env_value", Recorder::env_value);

    let env = Env::new();
    let info = CallInfo::new(recorder.clone(), vec![Value::from(21)]);

    assert_eq!(env_void.call(&env, &info).unwrap(), Value::Undefined);
    assert_eq!(env_value.call(&env, &info).unwrap(), Value::from(42));

    assert_eq!(
        recorder.unwrap_ref::<Recorder>().unwrap().env,
        Some(&env as *const Env as usize),
    );

    assert_eq!(env_void.signature().shape, MethodShape::EnvVoid);
    assert_eq!(env_void.arity(), 0);
    assert_eq!(env_value.signature().shape, MethodShape::EnvValue);
    assert_eq!(env_value.arity(), 1);
}

#[test]
fn test_optional_parameters() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("optional", Recorder::optional);

    assert_eq!(
        call(&descriptor, &recorder, vec![Value::Null, Value::Undefined]),
        Value::Null,
    );

    assert_eq!(recorder.unwrap_ref::<Recorder>().unwrap().flag, None);

    assert_eq!(
        call(&descriptor, &recorder, vec![Value::from(0), Value::from("abc")]),
        Value::from("ABC"),
    );

    assert_eq!(recorder.unwrap_ref::<Recorder>().unwrap().flag, Some(false));
}

#[test]
fn test_borrowed_views() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("c_text", Recorder::c_text);

    assert_eq!(
        call(
            &descriptor,
            &recorder,
            vec![Value::from("ab\0cd"), Value::from("ab\0cd")],
        ),
        Value::from(205),
    );
}

#[test]
fn test_dynamic_passthrough() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("passthrough", Recorder::passthrough);

    assert_eq!(
        call(&descriptor, &recorder, vec![recorder.clone()]),
        recorder,
    );

    assert_eq!(descriptor.signature().inputs, vec![TypeHint::Dynamic]);
}

#[test]
fn test_integer_widths() {
    let recorder = Value::wrap(Recorder::default());
    let descriptor = class_method!("widths", Recorder::widths);

    let large = Value::from(4_294_967_298.0);
    let result = call(&descriptor, &recorder, vec![large.clone(), large.clone(), large]);

    #[cfg(target_pointer_width = "64")]
    assert_eq!(result, Value::from("2|4294967298|4294967298"));

    #[cfg(target_pointer_width = "32")]
    assert_eq!(result, Value::from("2|4294967298|2"));
}

#[test]
fn test_receiver_failures() {
    let descriptor = class_method!("answer", Recorder::answer);
    let env = Env::new();

    assert!(matches!(
        descriptor.call(&env, &CallInfo::new(Value::from(1), vec![])),
        Err(RuntimeError::ReceiverNotObject {
            actual: "number",
            ..
        }),
    ));

    assert!(matches!(
        descriptor.call(&env, &CallInfo::new(Value::wrap(String::new()), vec![])),
        Err(RuntimeError::ReceiverMismatch { .. }),
    ));

    let recorder = Value::wrap(Recorder::default());
    let touch = class_method!("touch", Recorder::touch);

    let _guard = recorder.unwrap_ref::<Recorder>().unwrap();

    assert!(matches!(
        touch.call(&env, &CallInfo::new(recorder.clone(), vec![])),
        Err(RuntimeError::InstanceBusy {
            exclusive: true,
            ..
        }),
    ));

    // Shared receivers may coexist with an outer shared borrow.
    assert_eq!(
        descriptor
            .call(&env, &CallInfo::new(recorder.clone(), vec![]))
            .unwrap(),
        Value::from(42),
    );
}

#[test]
fn test_signatures() {
    let two = class_method!("two", Recorder::two);
    let answer = class_method!("answer", Recorder::answer);
    let env_value = class_method!("env_value", Recorder::env_value);

    assert_eq!(two.signature().receiver_kind, ReceiverKind::Exclusive);
    assert_eq!(answer.signature().receiver_kind, ReceiverKind::Shared);

    assert_eq!(two.to_string(), "Recorder::two(&mut self, number, string)");
    assert_eq!(answer.to_string(), "Recorder::answer(&self) -> number");
    assert_eq!(
        env_value.to_string(),
        "Recorder::env_value(&self, env, number) -> ?",
    );

    assert_eq!(two.signature().to_string(), "fn(&mut Recorder, number, string)");

    assert_eq!(
        two.signature().inputs,
        vec![TypeHint::Number("i32"), TypeHint::String("&str")],
    );

    let origin = two.origin();

    assert_eq!(origin.package.map(|(name, _)| name), Some("method-bridge"));
    assert!(origin.code.is_some());
}

#[test]
fn test_host_callbacks() {
    let recorder = Value::wrap(Recorder::default());
    let apply = class_method!("apply", Recorder::apply);
    let keep = class_method!("keep", Recorder::keep);
    let env = Env::new();

    let callback = env.function(|_env, args| {
        Ok(Value::from(format!("{}{}", args[0].to_number() + 1.0, args[1])))
    });

    let info = CallInfo::new(recorder.clone(), vec![callback.clone(), Value::from(4)]);

    assert_eq!(apply.call(&env, &info).unwrap(), Value::from("5x"));
    assert_eq!(apply.signature().inputs, vec![TypeHint::Function, TypeHint::Number("i32")]);
    assert_eq!(apply.to_string(), "Recorder::apply(&self, env, fn, number) -> ?");

    assert_eq!(
        call(&apply, &recorder, vec![Value::from(1), Value::from(4)]),
        Value::from("number value is not a function"),
    );

    assert!(matches!(
        Function::new(|_, _| Ok(Value::Null)).call(&env, &[]),
        Ok(Value::Null),
    ));

    assert_eq!(call(&keep, &recorder, vec![callback.clone()]), callback);
    assert_eq!(call(&keep, &recorder, vec![Value::Null]), Value::Null);
    assert_eq!(callback.kind(), "function");
    assert_eq!(callback.to_string(), "function () { [native code] }");
    assert!(callback.to_boolean());
}

#[test]
fn test_round_trip() {
    assert!(round_trip(true));
    assert!(!round_trip(false));

    assert_eq!(round_trip(i8::MIN), i8::MIN);
    assert_eq!(round_trip(i8::MAX), i8::MAX);
    assert_eq!(round_trip(u8::MAX), u8::MAX);
    assert_eq!(round_trip(i16::MIN), i16::MIN);
    assert_eq!(round_trip(u16::MAX), u16::MAX);
    assert_eq!(round_trip(i32::MIN), i32::MIN);
    assert_eq!(round_trip(i32::MAX), i32::MAX);
    assert_eq!(round_trip(u32::MAX), u32::MAX);

    let exact = 1i64 << 53;

    assert_eq!(round_trip(exact), exact);
    assert_eq!(round_trip(-exact), -exact);
    assert_eq!(round_trip(exact as u64), exact as u64);

    #[cfg(target_pointer_width = "64")]
    {
        assert_eq!(round_trip(exact as isize), exact as isize);
        assert_eq!(round_trip(-exact as isize), -exact as isize);
        assert_eq!(round_trip(exact as usize), exact as usize);
    }

    #[cfg(target_pointer_width = "32")]
    {
        assert_eq!(round_trip(isize::MIN), isize::MIN);
        assert_eq!(round_trip(usize::MAX), usize::MAX);
    }

    assert_eq!(round_trip(f64::MAX), f64::MAX);
    assert_eq!(round_trip(f64::MIN_POSITIVE), f64::MIN_POSITIVE);
    assert_eq!(round_trip(f64::NEG_INFINITY), f64::NEG_INFINITY);
    assert!(round_trip(-0.0f64).is_sign_negative());
    assert!(round_trip(f64::NAN).is_nan());
    assert_eq!(round_trip(f32::MAX), f32::MAX);
    assert_eq!(round_trip(0.1f32), 0.1f32);
    assert!(round_trip(-0.0f32).is_sign_negative());

    assert_eq!(round_trip(String::new()), "");
    assert_eq!(round_trip(String::from("a\0b")), "a\0b");
    assert_eq!(round_trip(String::from("Привет")), "Привет");

    let recorder = Value::wrap(Recorder::default());

    assert_eq!(round_trip(Value::Null), Value::Null);
    assert_eq!(round_trip(recorder.clone()), recorder);

    assert_eq!(round_trip(None::<i32>), None);
    assert_eq!(round_trip(Some(-5i32)), Some(-5));
    assert_eq!(round_trip(Some(false)), Some(false));
    assert_eq!(round_trip(None::<String>), None);

    let function = Function::new(|env, _| Ok(env.undefined()));

    assert!(round_trip(function.clone()).ptr_eq(&function));
}
