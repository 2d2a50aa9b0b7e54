// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! [`crate::texture::TextureSource`] implementations for reading (or creating) [`Texture`]s from.

use crate::{
    enums::{CreateStorage, TextureCreateFlags},
    stream::{RWSeekable, RustKtxStream},
    sys,
    texture::{Texture, TextureSource},
    KtxError,
};
use std::{
    io::{Seek, SeekFrom},
    sync::{Arc, Mutex, MutexGuard},
};

/// [`Texture`] creation info common to KTX1 and KTX2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonCreateInfo {
    pub create_storage: CreateStorage,
    pub base_width: u32,
    pub base_height: u32,
    pub base_depth: u32,
    pub num_dimensions: u32,
    pub num_levels: u32,
    pub num_layers: u32,
    pub num_faces: u32,
    pub is_array: bool,
    pub generate_mipmaps: bool,
}

impl Default for CommonCreateInfo {
    fn default() -> Self {
        CommonCreateInfo {
            create_storage: CreateStorage::AllocStorage,
            base_width: 1,
            base_height: 1,
            base_depth: 1,
            num_dimensions: 1,
            num_levels: 1,
            num_layers: 1,
            num_faces: 1,
            is_array: false,
            generate_mipmaps: false,
        }
    }
}

impl CommonCreateInfo {
    fn to_sys(
        &self,
        gl_internal_format: u32,
        vk_format: u32,
        dfd: *mut u32,
    ) -> sys::ktxTextureCreateInfo {
        sys::ktxTextureCreateInfo {
            glInternalformat: gl_internal_format,
            vkFormat: vk_format,
            pDfd: dfd,
            baseWidth: self.base_width,
            baseHeight: self.base_height,
            baseDepth: self.base_depth,
            numDimensions: self.num_dimensions,
            numLevels: self.num_levels,
            numLayers: self.num_layers,
            numFaces: self.num_faces,
            isArray: self.is_array,
            generateMipmaps: self.generate_mipmaps,
        }
    }
}

/// [`Texture`] creation info for KTX1 textures ([`crate::texture::Ktx1`]).
/// This is also a [`TextureSource`], which creates a new KTX1 texture according to `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ktx1CreateInfo {
    pub gl_internal_format: u32,
    pub common: CommonCreateInfo,
}

impl Default for Ktx1CreateInfo {
    fn default() -> Self {
        Ktx1CreateInfo {
            gl_internal_format: 0x8058, // GL_RGBA8
            common: Default::default(),
        }
    }
}

impl<'a> TextureSource<'a> for Ktx1CreateInfo {
    fn create_texture(self) -> Result<Texture<'a>, KtxError> {
        let mut sys_create_info = self
            .common
            .to_sys(self.gl_internal_format, 0, std::ptr::null_mut());

        let mut handle: *mut sys::ktxTexture1 = std::ptr::null_mut();
        // SAFETY: both pointers are valid for the duration of the call
        let err = unsafe {
            sys::ktxTexture1_Create(
                &mut sys_create_info,
                self.common.create_storage as u32,
                &mut handle,
            )
        };
        Texture::from_created(self, err, handle as *mut sys::ktxTexture)
    }
}

/// [`Texture`] creation info for KTX2 textures ([`crate::texture::Ktx2`]).
/// This is also a [`TextureSource`], which creates a new KTX2 texture according to `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ktx2CreateInfo {
    pub vk_format: u32,
    pub dfd: Option<Vec<u32>>,
    pub common: CommonCreateInfo,
}

impl Default for Ktx2CreateInfo {
    fn default() -> Self {
        Ktx2CreateInfo {
            vk_format: 37, // VK_R8G8B8A8_UNORM
            dfd: None,
            common: Default::default(),
        }
    }
}

impl<'a> TextureSource<'a> for Ktx2CreateInfo {
    fn create_texture(mut self) -> Result<Texture<'a>, KtxError> {
        // SAFETY: the contents of the Vec will not change or move around memory
        // - libKTX does not modify the given DFD pointer
        //   (but then, why no `const` in the C API pointer?)
        // - The Vec is moved into the Texture together with `self`, which never touches it again
        let dfd_ptr = match &mut self.dfd {
            Some(dfd_data) => dfd_data.as_mut_ptr(),
            None => std::ptr::null_mut(),
        };
        let mut sys_create_info = self.common.to_sys(0, self.vk_format, dfd_ptr);

        let mut handle: *mut sys::ktxTexture2 = std::ptr::null_mut();
        // SAFETY: both pointers are valid for the duration of the call
        let err = unsafe {
            sys::ktxTexture2_Create(
                &mut sys_create_info,
                self.common.create_storage as u32,
                &mut handle,
            )
        };
        Texture::from_created(self, err, handle as *mut sys::ktxTexture)
    }
}

/// Locks a shared stream, recovering it if another thread panicked while holding it.
///
/// The stream itself holds no invariants a panic could break; at worst its position is off.
pub(crate) fn lock_stream<'s, 'a, T: RWSeekable + ?Sized + 'a>(
    stream: &'s Mutex<RustKtxStream<'a, T>>,
) -> MutexGuard<'s, RustKtxStream<'a, T>> {
    stream.lock().unwrap_or_else(|poisoned| {
        log::warn!("Recovering poisoned RustKtxStream lock");
        poisoned.into_inner()
    })
}

/// [`TextureSource`] for reading a texture from a [`RustKtxStream`].
///
/// This goes through [`sys::ktxTexture_CreateFromStream`], so libKTX decides whether the stream
/// holds a KTX1 or a KTX2.
///
/// The stream stays locked whenever libKTX reads from it, including lazy loads through
/// [`Texture::load_image_data`]. Those first seek back to where the image data starts, so other
/// users of the same stream may move it freely in between.
#[derive(Debug)]
pub struct StreamSource<'a, T: RWSeekable + ?Sized + 'a> {
    stream: Arc<Mutex<RustKtxStream<'a, T>>>,
    texture_create_flags: TextureCreateFlags,
    data_position: Option<u64>,
}

impl<'a, T: RWSeekable + ?Sized + 'a> StreamSource<'a, T> {
    /// Creates a new stream texture source from the given [`RustKtxStream`] and texture creation flags.
    pub fn new(
        inner: Arc<Mutex<RustKtxStream<'a, T>>>,
        texture_create_flags: TextureCreateFlags,
    ) -> Self {
        StreamSource {
            stream: inner,
            texture_create_flags,
            data_position: None,
        }
    }

    /// Destroys `self`, giving back the inner [`RustKtxStream`] that was passed on construction.
    pub fn into_inner(self) -> Arc<Mutex<RustKtxStream<'a, T>>> {
        self.stream
    }
}

impl<'a, T: RWSeekable + ?Sized + 'a> TextureSource<'a> for StreamSource<'a, T> {
    fn create_texture(mut self) -> Result<Texture<'a>, KtxError> {
        let mut handle: *mut sys::ktxTexture = std::ptr::null_mut();
        let err = {
            let mut stream = lock_stream(&self.stream);
            log::trace!(
                "Creating texture from {:?} with flags {:?}",
                *stream,
                self.texture_create_flags
            );
            // SAFETY: the `ktxStream` is live while `stream` is locked, and `handle` is a valid slot
            let err = unsafe {
                sys::ktxTexture_CreateFromStream(
                    stream.ktx_stream(),
                    self.texture_create_flags.bits(),
                    &mut handle,
                )
            };
            // KTX1 image data is read from wherever creation left the stream
            self.data_position = stream.inner_mut().stream_position().ok();
            err
        };
        Texture::from_created(self, err, handle)
    }

    fn with_data_access(
        &self,
        load: &mut dyn FnMut() -> sys::ktx_error_code_e,
    ) -> sys::ktx_error_code_e {
        let mut stream = lock_stream(&self.stream);
        if let Some(position) = self.data_position {
            if let Err(err) = stream.inner_mut().seek(SeekFrom::Start(position)) {
                log::error!("Could not seek {:?} back to image data: {}", *stream, err);
                return sys::ktx_error_code_e_KTX_FILE_SEEK_ERROR;
            }
        }
        log::trace!("Loading image data from {:?}", *stream);
        load()
    }
}

/// [`TextureSource`] for reading a texture from an in-memory KTX1 or KTX2 file.
///
/// The bytes are borrowed (not copied) for as long as the created [`Texture`] lives.
#[derive(Debug, Clone)]
pub struct MemorySource<'a> {
    bytes: &'a [u8],
    texture_create_flags: TextureCreateFlags,
}

impl<'a> MemorySource<'a> {
    /// Creates a new memory texture source over `bytes`, with the given texture creation flags.
    pub fn new(bytes: &'a [u8], texture_create_flags: TextureCreateFlags) -> Self {
        MemorySource {
            bytes,
            texture_create_flags,
        }
    }
}

impl<'a> TextureSource<'a> for MemorySource<'a> {
    fn create_texture(self) -> Result<Texture<'a>, KtxError> {
        let mut handle: *mut sys::ktxTexture = std::ptr::null_mut();
        // SAFETY: `self.bytes` outlives the created texture, and `handle` is a valid slot
        let err = unsafe {
            sys::ktxTexture_CreateFromMemory(
                self.bytes.as_ptr(),
                self.bytes.len(),
                self.texture_create_flags.bits(),
                &mut handle,
            )
        };
        Texture::from_created(self, err, handle)
    }
}
