// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! A high-level Rust wrapper over [KhronosGroup/KTX-Software](https://github.com/KhronosGroup/KTX-Software),
//! centered on loading [Khronos Textures (KTX)](https://www.khronos.org/ktx/) from Rust streams.
//!
//! ```rust,ignore
//! let stream = RustKtxStream::new(Box::new(std::fs::File::open("texture.ktx2")?))?;
//! let source = StreamSource::new(Arc::new(Mutex::new(stream)), TextureCreateFlags::LOAD_IMAGE_DATA);
//! let texture = Texture::new(source)?;
//! ```

pub use ktx_bridge_sys as sys;

pub mod enums;
pub use enums::*;

pub mod texture;
pub use texture::{Ktx1, Ktx2, Texture, TextureSource};
#[cfg(feature = "write")]
pub use texture::TextureSink;

pub mod stream {
    //! Rust-backed `ktxStream`s (re-exported from [`crate::sys::stream`]).
    pub use crate::sys::stream::{RWSeekable, RustKtxStream};
}
pub use stream::{RWSeekable, RustKtxStream};

#[cfg(feature = "write")]
pub mod sinks;
pub mod sources;
pub use sources::{CommonCreateInfo, Ktx1CreateInfo, Ktx2CreateInfo, MemorySource, StreamSource};
