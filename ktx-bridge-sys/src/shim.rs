// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! Public re-export of libKTX's private stream constructor.

use crate::{ktxStream, ktxTexture, ktxTextureCreateFlags, KTX_error_code};

/// Creates a `ktxTexture1` or `ktxTexture2` (depending on the container's version) from `pStream`.
///
/// This is libKTX's own `ktxTexture_createFromStream`, unchanged: all three arguments are forwarded
/// as-is, in order, and its result code is returned verbatim. On success, `*newTex` receives a new
/// texture that the caller owns and must destroy through its vtable.
///
/// # Safety
/// Exactly the requirements of `ktxTexture_createFromStream`:
/// `pStream` must point to a valid, constructed `ktxStream`,
/// and `newTex` must be valid for writing a single pointer.
#[no_mangle]
pub unsafe extern "system" fn ktxTexture_CreateFromStream(
    pStream: *mut ktxStream,
    createFlags: ktxTextureCreateFlags,
    newTex: *mut *mut ktxTexture,
) -> KTX_error_code {
    crate::ktxTexture_createFromStream(pStream, createFlags, newTex)
}
