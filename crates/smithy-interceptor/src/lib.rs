// SPDX-License-Identifier: Apache-2.0
//! Ordered lifecycle hooks around one operation invocation:
//! a front-to-back interceptor list firing at 19 fixed points, with two
//! error policies — `modify_*` hooks short-circuit, `before`/`after_*`
//! hooks all run and only the last error is rethrown.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod error;
mod interceptor;
mod pipeline;

pub use context::InterceptorContext;
pub use error::{HookResult, InterceptorError};
pub use interceptor::Interceptor;
pub use pipeline::InterceptorPipeline;
