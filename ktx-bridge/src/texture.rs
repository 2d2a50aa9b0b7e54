// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! Core types involving KTX [`Texture`]s.

use crate::{
    enums::{ktx_result, Orientations, SuperCompressionScheme, TranscodeFlags, TranscodeFormat},
    sys, KtxError,
};
use std::{convert::TryInto, marker::PhantomData, ptr::NonNull};

/// A source of [`Texture`]s.
pub trait TextureSource<'a> {
    /// Attempts to create a new texture by consuming `self`.
    fn create_texture(self) -> Result<Texture<'a>, KtxError>;

    /// Runs `load`, a libKTX call that may read image data back from this source.
    ///
    /// Sources backed by shared streams hold their lock (and restore the position image data
    /// starts at) for the duration of the call. The default just runs `load`.
    fn with_data_access(
        &self,
        load: &mut dyn FnMut() -> sys::ktx_error_code_e,
    ) -> sys::ktx_error_code_e {
        load()
    }
}

/// A sink of [`Texture`]s, e.g. something they can be written to.
#[cfg(feature = "write")]
pub trait TextureSink {
    /// Attempts to write `texture` to `self`.
    fn write_texture(&mut self, texture: &Texture) -> Result<(), KtxError>;
}

/// A KTX (1 or 2) texture.
///
/// This owns a [`sys::ktxTexture`] handle, and keeps alive the [`TextureSource`] it was created from
/// (libKTX may keep reading from it, e.g. in [`Self::load_image_data`]).
pub struct Texture<'a> {
    pub(crate) source: Box<dyn TextureSource<'a> + 'a>,
    pub(crate) handle: NonNull<sys::ktxTexture>,
    pub(crate) handle_phantom: PhantomData<&'a sys::ktxTexture>,
}

impl<'a> Texture<'a> {
    /// Attempts to create a new texture, consuming the given [`TextureSource`].
    pub fn new<S>(source: S) -> Result<Self, KtxError>
    where
        S: TextureSource<'a>,
    {
        source.create_texture()
    }

    /// Takes ownership of a texture freshly created by libKTX.
    ///
    /// Creation is successful only if libKTX reported `KTX_SUCCESS` *and* wrote a non-null handle.
    pub(crate) fn from_created<S>(
        source: S,
        errcode: sys::ktx_error_code_e,
        handle: *mut sys::ktxTexture,
    ) -> Result<Self, KtxError>
    where
        S: TextureSource<'a> + 'a,
    {
        ktx_result(errcode, ())?;
        match NonNull::new(handle) {
            Some(handle) => {
                log::debug!("Created ktxTexture at {:p}", handle);
                Ok(Texture {
                    source: Box::new(source),
                    handle,
                    handle_phantom: PhantomData,
                })
            }
            None => {
                log::warn!("libKTX reported success but returned no texture");
                Err(KtxError::InvalidOperation)
            }
        }
    }

    /// Attempts to write the texture (in its native format, either KTX1 or KTX2) to `sink`.
    #[cfg(feature = "write")]
    pub fn write_to<T: TextureSink>(&self, sink: &mut T) -> Result<(), KtxError> {
        sink.write_texture(self)
    }

    /// Returns the pointer to the (C-allocated) underlying [`sys::ktxTexture`].
    ///
    /// **SAFETY**: Pointers are harmless. Dereferencing them is not!
    pub fn handle(&self) -> *mut sys::ktxTexture {
        self.handle.as_ptr()
    }

    fn raw(&self) -> &sys::ktxTexture {
        // SAFETY: `self.handle` is a live texture owned by `self`
        unsafe { self.handle.as_ref() }
    }

    fn vtbl(&self) -> &sys::ktxTexture_vtbl {
        // SAFETY: every libKTX texture has a static vtable
        unsafe { &*self.raw().vtbl }
    }

    /// Runs a libKTX call that may lazily load image data from the source.
    fn with_source_data(
        &self,
        mut call: impl FnMut() -> sys::ktx_error_code_e,
    ) -> Result<(), KtxError> {
        let err = self.source.with_data_access(&mut call);
        ktx_result(err, ())
    }

    /// Returns the total size of image data, in bytes.
    pub fn data_size(&self) -> usize {
        // SAFETY: Safe if `self.handle` is sane.
        unsafe { sys::ktxTexture_GetDataSize(self.handle()) as usize }
    }

    /// Returns a read-only view on the image data.
    ///
    /// The view is empty if the data was never loaded (see [`Self::load_image_data`]).
    pub fn data(&self) -> &[u8] {
        // SAFETY: Safe if `self.handle` is sane.
        let data = unsafe { sys::ktxTexture_GetData(self.handle()) };
        if data.is_null() {
            return &[];
        }
        // SAFETY: libKTX owns `data_size()` bytes at `data` for as long as the texture lives
        unsafe { std::slice::from_raw_parts(data, self.data_size()) }
    }

    /// Returns a read-write view on the image data.
    ///
    /// The view is empty if the data was never loaded (see [`Self::load_image_data`]).
    pub fn data_mut(&mut self) -> &mut [u8] {
        // SAFETY: Safe if `self.handle` is sane.
        let data = unsafe { sys::ktxTexture_GetData(self.handle()) };
        if data.is_null() {
            return &mut [];
        }
        // SAFETY: as in `data()`, and `&mut self` guarantees exclusivity
        unsafe { std::slice::from_raw_parts_mut(data, self.data_size()) }
    }

    /// Returns the pitch (in bytes) of an image row at the specified image level.
    /// This is rounded up to 1 if needed.
    pub fn row_pitch(&self, level: u32) -> usize {
        // SAFETY: Safe if `self.handle` is sane.
        //         `level` is not used for indexing internally; no bounds-checking required.
        unsafe { sys::ktxTexture_GetRowPitch(self.handle(), level) as usize }
    }

    /// Returns the size (in bytes) of an element of the image.
    pub fn element_size(&self) -> usize {
        // SAFETY: Safe if `self.handle` is sane.
        unsafe { sys::ktxTexture_GetElementSize(self.handle()) as usize }
    }

    /// Returns whether this texture is an array texture or not.
    pub fn is_array(&self) -> bool {
        self.raw().isArray
    }

    /// Returns whether this texture is a cubemap or not.
    pub fn is_cubemap(&self) -> bool {
        self.raw().isCubemap
    }

    /// Returns whether this texture is compressed or not.
    pub fn is_compressed(&self) -> bool {
        self.raw().isCompressed
    }

    /// Returns the width (in texels) of this texture's base level.
    pub fn base_width(&self) -> u32 {
        self.raw().baseWidth
    }

    /// Returns the height (in texels) of this texture's base level.
    pub fn base_height(&self) -> u32 {
        self.raw().baseHeight
    }

    /// Returns the depth (in texels) of this texture's base level.
    pub fn base_depth(&self) -> u32 {
        self.raw().baseDepth
    }

    /// Returns the number of dimensions in this texture (1, 2 or 3).
    pub fn num_dimensions(&self) -> u32 {
        self.raw().numDimensions
    }

    /// Returns the number of mipmap levels in this texture.
    ///
    /// This must be 1 if pre-upload mipmap generation was enabled by the library.
    pub fn num_levels(&self) -> u32 {
        self.raw().numLevels
    }

    /// Returns the number of array layers in this texture.
    pub fn num_layers(&self) -> u32 {
        self.raw().numLayers
    }

    /// Returns the number of faces in this texture. It is 1 for standard images, and 6 for cubemaps.
    pub fn num_faces(&self) -> u32 {
        self.raw().numFaces
    }

    /// Returns the logical orientation of this texture in all possible directions (X, Y and Z).
    ///
    /// Fails with [`KtxError::FileDataError`] if the container holds an orientation libKTX should have rejected.
    pub fn orientation(&self) -> Result<Orientations, KtxError> {
        let c_orientation = self.raw().orientation;
        let invalid = |_: &'static str| KtxError::FileDataError;
        Ok(Orientations {
            x: c_orientation.x.try_into().map_err(invalid)?,
            y: c_orientation.y.try_into().map_err(invalid)?,
            z: c_orientation.z.try_into().map_err(invalid)?,
        })
    }

    /// Attempts to return the offset (in bytes) into [`Self::data`] for the image
    /// at the given mip level, array layer, and slice.
    /// `slice` is either a cubemap's face or a 3D texture's depth slice.
    pub fn get_image_offset(&self, level: u32, layer: u32, slice: u32) -> Result<usize, KtxError> {
        let get_image_offset_fn = self.vtbl().GetImageOffset.ok_or(KtxError::InvalidValue)?;
        let mut offset: sys::ktx_size_t = 0;
        // SAFETY: Safe if `self.handle` is sane.
        let err = unsafe { get_image_offset_fn(self.handle(), level, layer, slice, &mut offset) };
        ktx_result(err, offset)
    }

    /// Attempts to return the size (in bytes) of the uncompressed image data.
    pub fn get_data_size_uncompressed(&self) -> Result<usize, KtxError> {
        let get_data_size_fn = self
            .vtbl()
            .GetDataSizeUncompressed
            .ok_or(KtxError::InvalidValue)?;
        // SAFETY: Safe if `self.handle` is sane.
        Ok(unsafe { get_data_size_fn(self.handle()) })
    }

    /// Attempts to return the size (in bytes) of a certain mip level.
    pub fn get_image_size(&self, level: u32) -> Result<usize, KtxError> {
        let get_image_size_fn = self.vtbl().GetImageSize.ok_or(KtxError::InvalidValue)?;
        // SAFETY: Safe if `self.handle` is sane.
        Ok(unsafe { get_image_size_fn(self.handle(), level) })
    }

    /// Attempts to [re]load this image's data to its internal buffer.
    /// Also see [`Self::data()`].
    ///
    /// Creating the image with [`crate::TextureCreateFlags::LOAD_IMAGE_DATA`] performs this step automatically on load.
    ///
    /// If the texture was read from a shared stream, the stream is locked during the load;
    /// this blocks while someone else holds that lock.
    pub fn load_image_data(&mut self) -> Result<(), KtxError> {
        let load_image_data_fn = self.vtbl().LoadImageData.ok_or(KtxError::InvalidValue)?;
        let handle = self.handle();
        // SAFETY: Safe if `self.handle` is sane; a null buffer makes libKTX allocate its own.
        self.with_source_data(|| unsafe { load_image_data_fn(handle, std::ptr::null_mut(), 0) })
    }

    /// Attempts to iterate all mip levels of the image, and all faces of cubemaps.
    /// This calls
    /// ```rust,ignore
    /// callback(miplevel: i32, face: i32, width: i32, height: i32, depth: i32, pixel_data: &[u8]) -> Result<(), KtxError>
    /// ```
    /// for each level/face. The image data passed to the callback is immutable.
    /// Note that image data should already have been loaded (see [`Self::load_image_data()`]).
    pub fn iterate_levels<F>(&self, mut callback: F) -> Result<(), KtxError>
    where
        F: FnMut(i32, i32, i32, i32, i32, &[u8]) -> Result<(), KtxError>,
    {
        unsafe extern "system" fn c_iterator_fn<F>(
            mip: i32,
            face: i32,
            width: i32,
            height: i32,
            depth: i32,
            pixels_size: u64,
            pixels: *mut std::ffi::c_void,
            closure_ptr: *mut std::ffi::c_void,
        ) -> sys::ktx_error_code_e
        where
            F: FnMut(i32, i32, i32, i32, i32, &[u8]) -> Result<(), KtxError>,
        {
            let closure = closure_ptr as *mut F;
            let pixels_slice =
                std::slice::from_raw_parts(pixels as *const u8, pixels_size as usize);
            match (*closure)(mip, face, width, height, depth, pixels_slice) {
                Ok(_) => sys::ktx_error_code_e_KTX_SUCCESS,
                Err(err) => err.code(),
            }
        }

        if self.raw().pData.is_null() {
            // Data was not loaded
            return Err(KtxError::InvalidValue);
        }
        let iterate_levels_fn = self.vtbl().IterateLevels.ok_or(KtxError::InvalidValue)?;
        let closure_ptr = &mut callback as *mut F as *mut std::ffi::c_void;
        // SAFETY: Safe if `self.handle` is sane; `callback` outlives the call.
        let err =
            unsafe { iterate_levels_fn(self.handle(), Some(c_iterator_fn::<F>), closure_ptr) };
        ktx_result(err, ())
    }

    /// Attempts to iterate all mip levels of the image, and all faces of cubemaps.
    /// This calls
    /// ```rust,ignore
    /// callback(miplevel: i32, face: i32, width: i32, height: i32, depth: i32, pixel_data: &mut [u8]) -> Result<(), KtxError>
    /// ```
    /// for each level/face. The image data passed to the callback is mutable.
    /// Note that image data should already have been loaded (see [`Self::load_image_data()`]).
    pub fn iterate_levels_mut<F>(&mut self, mut callback: F) -> Result<(), KtxError>
    where
        F: FnMut(i32, i32, i32, i32, i32, &mut [u8]) -> Result<(), KtxError>,
    {
        unsafe extern "system" fn c_iterator_fn<F>(
            mip: i32,
            face: i32,
            width: i32,
            height: i32,
            depth: i32,
            pixels_size: u64,
            pixels: *mut std::ffi::c_void,
            closure_ptr: *mut std::ffi::c_void,
        ) -> sys::ktx_error_code_e
        where
            F: FnMut(i32, i32, i32, i32, i32, &mut [u8]) -> Result<(), KtxError>,
        {
            let closure = closure_ptr as *mut F;
            let pixels_slice =
                std::slice::from_raw_parts_mut(pixels as *mut u8, pixels_size as usize);
            match (*closure)(mip, face, width, height, depth, pixels_slice) {
                Ok(_) => sys::ktx_error_code_e_KTX_SUCCESS,
                Err(err) => err.code(),
            }
        }

        if self.raw().pData.is_null() {
            // Data was not loaded
            return Err(KtxError::InvalidValue);
        }
        let iterate_levels_fn = self.vtbl().IterateLevels.ok_or(KtxError::InvalidValue)?;
        let closure_ptr = &mut callback as *mut F as *mut std::ffi::c_void;
        // SAFETY: Safe if `self.handle` is sane; `callback` outlives the call.
        let err =
            unsafe { iterate_levels_fn(self.handle(), Some(c_iterator_fn::<F>), closure_ptr) };
        ktx_result(err, ())
    }

    /// If this [`Texture`] really is a KTX1, returns KTX1-specific functionalities for it.
    pub fn ktx1<'b>(&'b mut self) -> Option<Ktx1<'b, 'a>> {
        if self.raw().classId == sys::class_id_ktxTexture1_c {
            Some(Ktx1 { texture: self })
        } else {
            None
        }
    }

    /// If this [`Texture`] really is a KTX2, returns KTX2-specific functionalities for it.
    pub fn ktx2<'b>(&'b mut self) -> Option<Ktx2<'b, 'a>> {
        if self.raw().classId == sys::class_id_ktxTexture2_c {
            Some(Ktx2 { texture: self })
        } else {
            None
        }
    }
}

impl<'a> Drop for Texture<'a> {
    fn drop(&mut self) {
        log::debug!("Destroying ktxTexture at {:p}", self.handle);
        if let Some(destroy_fn) = self.vtbl().Destroy {
            // SAFETY: `self.handle` is owned by `self`, and never used again after this
            unsafe { destroy_fn(self.handle()) };
        }
    }
}

/// KTX1-specific [`Texture`] functionality.
pub struct Ktx1<'a, 'b: 'a> {
    texture: &'a mut Texture<'b>,
}

impl<'a, 'b: 'a> Ktx1<'a, 'b> {
    /// Returns a pointer to the underlying (C-allocated) [`sys::ktxTexture1`].
    ///
    /// **SAFETY**: Pointers are harmless. Dereferencing them is not!
    pub fn handle(&self) -> *mut sys::ktxTexture1 {
        self.texture.handle() as *mut sys::ktxTexture1
    }

    fn raw(&self) -> &sys::ktxTexture1 {
        // SAFETY: `classId` was checked to be `ktxTexture1_c` on construction
        unsafe { &*self.handle() }
    }

    /// Returns the OpenGL format of the texture's data (e.g. `GL_RGBA`).
    ///
    /// Also see [`Self::gl_internal_format`], [`Self::gl_base_internal_format`].
    pub fn gl_format(&self) -> u32 {
        self.raw().glFormat
    }

    /// Returns the OpenGL internal format of the texture's data (e.g. `GL_RGBA8`).
    ///
    /// Also see [`Self::gl_format`], [`Self::gl_base_internal_format`].
    pub fn gl_internal_format(&self) -> u32 {
        self.raw().glInternalformat
    }

    /// Returns the OpenGL base internal format of the texture's data (e.g. `GL_RGBA`).
    ///
    /// Also see [`Self::gl_format`], [`Self::gl_internal_format`].
    pub fn gl_base_internal_format(&self) -> u32 {
        self.raw().glBaseInternalformat
    }

    /// Returns the OpenGL datatype of the texture's data (e.g. `GL_UNSIGNED_BYTE`).
    pub fn gl_type(&self) -> u32 {
        self.raw().glType
    }

    /// Will this KTX1 need transcoding?
    pub fn needs_transcoding(&self) -> bool {
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX1
        unsafe { sys::ktxTexture1_NeedsTranscoding(self.handle()) }
    }
}

/// KTX2-specific [`Texture`] functionality.
pub struct Ktx2<'a, 'b: 'a> {
    texture: &'a mut Texture<'b>,
}

impl<'a, 'b: 'a> Ktx2<'a, 'b> {
    /// Returns a pointer to the underlying (C-allocated) [`sys::ktxTexture2`].
    ///
    /// **SAFETY**: Pointers are harmless. Dereferencing them is not!
    pub fn handle(&self) -> *mut sys::ktxTexture2 {
        self.texture.handle() as *mut sys::ktxTexture2
    }

    fn raw(&self) -> &sys::ktxTexture2 {
        // SAFETY: `classId` was checked to be `ktxTexture2_c` on construction
        unsafe { &*self.handle() }
    }

    /// Returns the Vulkan format of the texture's data (e.g. `VK_R8G8B8A8_UNORM`).
    pub fn vk_format(&self) -> u32 {
        self.raw().vkFormat
    }

    /// Returns the supercompression scheme in use for this texture's data.
    pub fn supercompression_scheme(&self) -> SuperCompressionScheme {
        self.raw().supercompressionScheme.into()
    }

    /// Is this a video texture?
    pub fn is_video(&self) -> bool {
        self.raw().isVideo
    }

    /// Returns the duration of the video texture (if [`Self::is_video`]).
    pub fn duration(&self) -> u32 {
        self.raw().duration
    }

    /// Returns the timescale of the video texture (if [`Self::is_video`]).
    pub fn timescale(&self) -> u32 {
        self.raw().timescale
    }

    /// Returns the loop count of the video texture (if [`Self::is_video`]).
    pub fn loop_count(&self) -> u32 {
        self.raw().loopcount
    }

    /// Will this KTX2 need transcoding?
    pub fn needs_transcoding(&self) -> bool {
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX2
        unsafe { sys::ktxTexture2_NeedsTranscoding(self.handle()) }
    }

    /// Returns the number of components of the KTX2 and the size in bytes of each components.
    pub fn component_info(&self) -> (u32, u32) {
        let mut num_components: u32 = 0;
        let mut component_size: u32 = 0;
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX2
        unsafe {
            sys::ktxTexture2_GetComponentInfo(
                self.handle(),
                &mut num_components,
                &mut component_size,
            );
        }
        (num_components, component_size)
    }

    /// Returns the number of components of the KTX2, also considering compression.
    ///
    /// **This may differ from values returned by [`Self::component_info`]:**
    /// - For uncompressed formats: this is the number of image components, as from [`Self::component_info`].
    /// - For block-compressed formats: 1 or 2, according to the DFD color model.
    /// - For Basis Universal-compressed textures: obtained by parsing channel IDs before any encoding and deflation.
    pub fn num_components(&self) -> u32 {
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX2
        unsafe { sys::ktxTexture2_GetNumComponents(self.handle()) }
    }

    /// Compresses the KTX2 texture's data with ZStandard compression.
    /// `level` is 1-22; lower is faster (hence, worse compression).
    /// Values over 20 may consume significant memory.
    #[cfg(feature = "write")]
    pub fn deflate_zstd(&mut self, level: u32) -> Result<(), KtxError> {
        let handle = self.handle();
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX2
        self.texture
            .with_source_data(|| unsafe { sys::ktxTexture2_DeflateZstd(handle, level) })
    }

    /// Returns the Opto-Electrical Transfer Function (OETF) of this KTX2, as a `KHR_DF_TRANSFER_*` value
    /// (e.g. 1 for linear, 2 for sRGB).
    pub fn oetf(&self) -> u32 {
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX2
        unsafe { sys::ktxTexture2_GetOETF(self.handle()) }
    }

    /// Does this KTX2 have premultiplied alpha?
    pub fn premultiplied_alpha(&self) -> bool {
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX2
        unsafe { sys::ktxTexture2_GetPremultipliedAlpha(self.handle()) }
    }

    /// Transcodes a Basis Universal (ETC1S/BasisLZ or UASTC) KTX2 to `format`.
    ///
    /// Any supercompression is undone first. On success, the texture's format, DFD and image data
    /// all change. Fails with [`KtxError::InvalidOperation`] if the texture is not in a transcodable format.
    pub fn transcode_basis(
        &mut self,
        format: TranscodeFormat,
        flags: TranscodeFlags,
    ) -> Result<(), KtxError> {
        let handle = self.handle();
        // SAFETY: Safe if `self.texture.handle` is sane + actually a KTX2
        self.texture.with_source_data(|| unsafe {
            sys::ktxTexture2_TranscodeBasis(handle, format as u32, flags.bits())
        })
    }
}
