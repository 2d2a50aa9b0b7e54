// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! Enums, flags and the error type shared by the whole crate.

use crate::sys;
use bitflags::bitflags;
use std::{
    convert::{TryFrom, TryInto},
    error::Error,
    ffi::CStr,
    fmt::{Display, Formatter},
};

/// Whether [`crate::sources::Ktx1CreateInfo`] / [`crate::sources::Ktx2CreateInfo`]
/// should allocate storage for image data on creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum CreateStorage {
    NoStorage = sys::ktxTextureCreateStorageEnum_KTX_TEXTURE_CREATE_NO_STORAGE,
    AllocStorage = sys::ktxTextureCreateStorageEnum_KTX_TEXTURE_CREATE_ALLOC_STORAGE,
}

bitflags! {
    /// Flags for loading textures from streams or memory.
    /// These are passed to libKTX unchanged.
    #[derive(Default)]
    pub struct TextureCreateFlags: u32 {
        /// Load the images' data on creation (instead of when [`crate::Texture::load_image_data`] is called).
        const LOAD_IMAGE_DATA =
            sys::ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_LOAD_IMAGE_DATA_BIT;
        /// Load the raw key-value data instead of creating a hash list from it.
        const RAW_KVDATA = sys::ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_RAW_KVDATA_BIT;
        /// Skip loading any key-value data.
        const SKIP_KVDATA = sys::ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_SKIP_KVDATA_BIT;
    }
}

/// Every non-success libKTX error code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum KtxError {
    FileDataError = sys::ktx_error_code_e_KTX_FILE_DATA_ERROR,
    FileIsPipe = sys::ktx_error_code_e_KTX_FILE_ISPIPE,
    FileOpenFailed = sys::ktx_error_code_e_KTX_FILE_OPEN_FAILED,
    FileOverflow = sys::ktx_error_code_e_KTX_FILE_OVERFLOW,
    FileReadError = sys::ktx_error_code_e_KTX_FILE_READ_ERROR,
    FileSeekError = sys::ktx_error_code_e_KTX_FILE_SEEK_ERROR,
    FileUnexpectedEof = sys::ktx_error_code_e_KTX_FILE_UNEXPECTED_EOF,
    FileWriteError = sys::ktx_error_code_e_KTX_FILE_WRITE_ERROR,
    GlError = sys::ktx_error_code_e_KTX_GL_ERROR,
    InvalidOperation = sys::ktx_error_code_e_KTX_INVALID_OPERATION,
    InvalidValue = sys::ktx_error_code_e_KTX_INVALID_VALUE,
    NotFound = sys::ktx_error_code_e_KTX_NOT_FOUND,
    OutOfMemory = sys::ktx_error_code_e_KTX_OUT_OF_MEMORY,
    TranscodeFailed = sys::ktx_error_code_e_KTX_TRANSCODE_FAILED,
    UnknownFileFormat = sys::ktx_error_code_e_KTX_UNKNOWN_FILE_FORMAT,
    UnsupportedTextureType = sys::ktx_error_code_e_KTX_UNSUPPORTED_TEXTURE_TYPE,
    UnsupportedFeature = sys::ktx_error_code_e_KTX_UNSUPPORTED_FEATURE,
    LibraryNotLinked = sys::ktx_error_code_e_KTX_LIBRARY_NOT_LINKED,
}

impl KtxError {
    /// Returns the raw libKTX error code for this error.
    pub fn code(self) -> sys::ktx_error_code_e {
        self as u32
    }
}

impl TryFrom<u32> for KtxError {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            sys::ktx_error_code_e_KTX_FILE_DATA_ERROR => Self::FileDataError,
            sys::ktx_error_code_e_KTX_FILE_ISPIPE => Self::FileIsPipe,
            sys::ktx_error_code_e_KTX_FILE_OPEN_FAILED => Self::FileOpenFailed,
            sys::ktx_error_code_e_KTX_FILE_OVERFLOW => Self::FileOverflow,
            sys::ktx_error_code_e_KTX_FILE_READ_ERROR => Self::FileReadError,
            sys::ktx_error_code_e_KTX_FILE_SEEK_ERROR => Self::FileSeekError,
            sys::ktx_error_code_e_KTX_FILE_UNEXPECTED_EOF => Self::FileUnexpectedEof,
            sys::ktx_error_code_e_KTX_FILE_WRITE_ERROR => Self::FileWriteError,
            sys::ktx_error_code_e_KTX_GL_ERROR => Self::GlError,
            sys::ktx_error_code_e_KTX_INVALID_OPERATION => Self::InvalidOperation,
            sys::ktx_error_code_e_KTX_INVALID_VALUE => Self::InvalidValue,
            sys::ktx_error_code_e_KTX_NOT_FOUND => Self::NotFound,
            sys::ktx_error_code_e_KTX_OUT_OF_MEMORY => Self::OutOfMemory,
            sys::ktx_error_code_e_KTX_TRANSCODE_FAILED => Self::TranscodeFailed,
            sys::ktx_error_code_e_KTX_UNKNOWN_FILE_FORMAT => Self::UnknownFileFormat,
            sys::ktx_error_code_e_KTX_UNSUPPORTED_TEXTURE_TYPE => Self::UnsupportedTextureType,
            sys::ktx_error_code_e_KTX_UNSUPPORTED_FEATURE => Self::UnsupportedFeature,
            sys::ktx_error_code_e_KTX_LIBRARY_NOT_LINKED => Self::LibraryNotLinked,
            _ => return Err("Not a KTX_ error variant"),
        })
    }
}

impl Display for KtxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // SAFETY: Safe - this just accessess a C array of strings under the hood
        let c_str = unsafe { CStr::from_ptr(sys::ktxErrorString(self.code())) };
        match c_str.to_str() {
            Ok(msg) => write!(f, "{}", msg),
            _ => Err(std::fmt::Error),
        }
    }
}

impl Error for KtxError {}

/// Turns a libKTX error code into a `Result`, yielding `value` on `KTX_SUCCESS`.
pub(crate) fn ktx_result<T>(errcode: sys::ktx_error_code_e, value: T) -> Result<T, KtxError> {
    if errcode == sys::ktx_error_code_e_KTX_SUCCESS {
        return Ok(value);
    }
    Err(errcode.try_into().unwrap_or_else(|_| {
        log::warn!("libKTX returned unknown error code {}", errcode);
        KtxError::InvalidOperation
    }))
}

/// Logical orientation of a texture along the X axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum OrientationX {
    Left = sys::ktxOrientationX_KTX_ORIENT_X_LEFT,
    Right = sys::ktxOrientationX_KTX_ORIENT_X_RIGHT,
}

impl TryFrom<sys::ktxOrientationX> for OrientationX {
    type Error = &'static str;

    fn try_from(value: sys::ktxOrientationX) -> Result<Self, Self::Error> {
        match value {
            sys::ktxOrientationX_KTX_ORIENT_X_LEFT => Ok(Self::Left),
            sys::ktxOrientationX_KTX_ORIENT_X_RIGHT => Ok(Self::Right),
            _ => Err("Not a KTX_ORIENT_X variant"),
        }
    }
}

/// Logical orientation of a texture along the Y axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum OrientationY {
    Up = sys::ktxOrientationY_KTX_ORIENT_Y_UP,
    Down = sys::ktxOrientationY_KTX_ORIENT_Y_DOWN,
}

impl TryFrom<sys::ktxOrientationY> for OrientationY {
    type Error = &'static str;

    fn try_from(value: sys::ktxOrientationY) -> Result<Self, Self::Error> {
        match value {
            sys::ktxOrientationY_KTX_ORIENT_Y_UP => Ok(Self::Up),
            sys::ktxOrientationY_KTX_ORIENT_Y_DOWN => Ok(Self::Down),
            _ => Err("Not a KTX_ORIENT_Y variant"),
        }
    }
}

/// Logical orientation of a texture along the Z axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum OrientationZ {
    In = sys::ktxOrientationZ_KTX_ORIENT_Z_IN,
    Out = sys::ktxOrientationZ_KTX_ORIENT_Z_OUT,
}

impl TryFrom<sys::ktxOrientationZ> for OrientationZ {
    type Error = &'static str;

    fn try_from(value: sys::ktxOrientationZ) -> Result<Self, Self::Error> {
        match value {
            sys::ktxOrientationZ_KTX_ORIENT_Z_IN => Ok(Self::In),
            sys::ktxOrientationZ_KTX_ORIENT_Z_OUT => Ok(Self::Out),
            _ => Err("Not a KTX_ORIENT_Z variant"),
        }
    }
}

/// Orientation of a texture in all three directions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Orientations {
    pub x: OrientationX,
    pub y: OrientationY,
    pub z: OrientationZ,
}

/// Supercompression applied to a KTX2's image data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SuperCompressionScheme {
    None,
    BasisLz,
    Zstd,
    /// A scheme this crate does not know about.
    Other(u32),
}

impl From<sys::ktxSupercmpScheme> for SuperCompressionScheme {
    fn from(value: sys::ktxSupercmpScheme) -> Self {
        match value {
            sys::ktxSupercmpScheme_KTX_SS_NONE => Self::None,
            sys::ktxSupercmpScheme_KTX_SS_BASIS_LZ => Self::BasisLz,
            sys::ktxSupercmpScheme_KTX_SS_ZSTD => Self::Zstd,
            other => Self::Other(other),
        }
    }
}

/// Target formats for [`crate::Ktx2::transcode_basis`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum TranscodeFormat {
    Etc1Rgb = sys::ktx_transcode_fmt_e_KTX_TTF_ETC1_RGB,
    Etc2Rgba = sys::ktx_transcode_fmt_e_KTX_TTF_ETC2_RGBA,
    Bc1Rgb = sys::ktx_transcode_fmt_e_KTX_TTF_BC1_RGB,
    Bc3Rgba = sys::ktx_transcode_fmt_e_KTX_TTF_BC3_RGBA,
    Bc4R = sys::ktx_transcode_fmt_e_KTX_TTF_BC4_R,
    Bc5Rg = sys::ktx_transcode_fmt_e_KTX_TTF_BC5_RG,
    Bc7Rgba = sys::ktx_transcode_fmt_e_KTX_TTF_BC7_RGBA,
    Pvrtc14Rgb = sys::ktx_transcode_fmt_e_KTX_TTF_PVRTC1_4_RGB,
    Pvrtc14Rgba = sys::ktx_transcode_fmt_e_KTX_TTF_PVRTC1_4_RGBA,
    Astc4x4Rgba = sys::ktx_transcode_fmt_e_KTX_TTF_ASTC_4x4_RGBA,
    Pvrtc24Rgb = sys::ktx_transcode_fmt_e_KTX_TTF_PVRTC2_4_RGB,
    Pvrtc24Rgba = sys::ktx_transcode_fmt_e_KTX_TTF_PVRTC2_4_RGBA,
    Etc2EacR11 = sys::ktx_transcode_fmt_e_KTX_TTF_ETC2_EAC_R11,
    Etc2EacRg11 = sys::ktx_transcode_fmt_e_KTX_TTF_ETC2_EAC_RG11,
    Rgba32 = sys::ktx_transcode_fmt_e_KTX_TTF_RGBA32,
    Rgb565 = sys::ktx_transcode_fmt_e_KTX_TTF_RGB565,
    Bgr565 = sys::ktx_transcode_fmt_e_KTX_TTF_BGR565,
    Rgba4444 = sys::ktx_transcode_fmt_e_KTX_TTF_RGBA4444,
    /// ETC1 or ETC2, picked by libKTX according to whether the texture has alpha.
    Etc = sys::ktx_transcode_fmt_e_KTX_TTF_ETC,
    /// BC1 or BC3, picked by libKTX according to whether the texture has alpha.
    Bc1Or3 = sys::ktx_transcode_fmt_e_KTX_TTF_BC1_OR_3,
    NoSelection = sys::ktx_transcode_fmt_e_KTX_TTF_NOSELECTION,
}

bitflags! {
    /// Flags for [`crate::Ktx2::transcode_basis`].
    #[derive(Default)]
    pub struct TranscodeFlags: u32 {
        /// PVRTC1: decode non-power-of-2 ETC1S textures to the next larger power of 2.
        const PVRTC_DECODE_TO_NEXT_POW2 =
            sys::ktx_transcode_flag_bits_e_KTX_TF_PVRTC_DECODE_TO_NEXT_POW2;
        /// Transcode the alpha slice into opaque formats (e.g. BC1) instead of the color slice.
        const TRANSCODE_ALPHA_DATA_TO_OPAQUE_FORMATS =
            sys::ktx_transcode_flag_bits_e_KTX_TF_TRANSCODE_ALPHA_DATA_TO_OPAQUE_FORMATS;
        /// Slower, higher quality transcoding where supported.
        const HIGH_QUALITY =
            sys::ktx_transcode_flag_bits_e_KTX_TF_HIGH_QUALITY;
    }
}
