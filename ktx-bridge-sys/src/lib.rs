// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! Low-level bindings to [KhronosGroup/KTX-Software](https://github.com/KhronosGroup/KTX-Software).
//!
//! Besides the C API itself, this crate provides:
//! - [`ktxTexture_CreateFromStream`], a public export of libKTX's (otherwise private) stream-based
//!   texture constructor;
//! - [`stream::RustKtxStream`], a `ktxStream` that reads from / writes to Rust I/O objects.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

#[cfg(feature = "run-bindgen")]
mod ffi {
    #![allow(clippy::all)]
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}
#[cfg(not(feature = "run-bindgen"))]
mod ffi;
pub use ffi::*;

mod shim;
pub use shim::ktxTexture_CreateFromStream;

pub mod stream;
