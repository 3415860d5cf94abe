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

use std::any::type_name;

use crate::runtime::{
    AdjustArguments,
    Arguments,
    CallInfo,
    Env,
    Method,
    RuntimeResult,
    Signature,
    Value,
};

/// Stages the call arguments for the `method` parameters.
#[inline(always)]
pub fn stage<C, Args, Marker, M>(_method: M, info: &CallInfo) -> Args::Staged
where
    M: Method<C, Args, Marker>,
    Args: Arguments,
{
    Args::stage(info)
}

/// Adjusts the staged arguments and invokes the `method`.
///
/// The `staged` storage must outlive the call, as the borrowed parameters
/// refer to it.
#[inline(always)]
pub fn forward<'a, C, Args, Marker, M>(
    method: M,
    env: &Env,
    info: &CallInfo,
    staged: &'a mut Args::Staged,
) -> RuntimeResult<Value>
where
    M: Method<C, Args, Marker>,
    Args: AdjustArguments<'a>,
{
    method.call(env, info, Args::adjust(staged))
}

/// Builds the [Signature] of the `method`.
#[inline]
pub fn signature<C, Args, Marker, M>(_method: M) -> Signature
where
    M: Method<C, Args, Marker>,
    Args: Arguments,
{
    Signature {
        receiver: type_name::<C>(),
        receiver_kind: M::RECEIVER,
        shape: M::SHAPE,
        inputs: Args::hints(),
        output: M::output(),
    }
}
