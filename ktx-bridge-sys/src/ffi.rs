// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! Checked-in declarations for the subset of `ktx.h` (KTX-Software v4.0) used by this workspace.
//!
//! Names follow what bindgen generates for the same header, so that enabling the `run-bindgen`
//! feature swaps this module for the generated bindings without touching any other code.
//! Public libKTX entry points are `KTX_APIENTRY`, hence `extern "system"`.

use std::os::raw::{c_char, c_int, c_uint, c_void};

pub type ktx_uint8_t = u8;
pub type ktx_bool_t = bool;
pub type ktx_uint32_t = u32;
pub type ktx_int32_t = i32;
pub type ktx_uint64_t = u64;
pub type ktx_size_t = usize;
pub type ktx_off_t = i64;

pub type ktx_error_code_e = c_uint;
pub const ktx_error_code_e_KTX_SUCCESS: ktx_error_code_e = 0;
pub const ktx_error_code_e_KTX_FILE_DATA_ERROR: ktx_error_code_e = 1;
pub const ktx_error_code_e_KTX_FILE_ISPIPE: ktx_error_code_e = 2;
pub const ktx_error_code_e_KTX_FILE_OPEN_FAILED: ktx_error_code_e = 3;
pub const ktx_error_code_e_KTX_FILE_OVERFLOW: ktx_error_code_e = 4;
pub const ktx_error_code_e_KTX_FILE_READ_ERROR: ktx_error_code_e = 5;
pub const ktx_error_code_e_KTX_FILE_SEEK_ERROR: ktx_error_code_e = 6;
pub const ktx_error_code_e_KTX_FILE_UNEXPECTED_EOF: ktx_error_code_e = 7;
pub const ktx_error_code_e_KTX_FILE_WRITE_ERROR: ktx_error_code_e = 8;
pub const ktx_error_code_e_KTX_GL_ERROR: ktx_error_code_e = 9;
pub const ktx_error_code_e_KTX_INVALID_OPERATION: ktx_error_code_e = 10;
pub const ktx_error_code_e_KTX_INVALID_VALUE: ktx_error_code_e = 11;
pub const ktx_error_code_e_KTX_NOT_FOUND: ktx_error_code_e = 12;
pub const ktx_error_code_e_KTX_OUT_OF_MEMORY: ktx_error_code_e = 13;
pub const ktx_error_code_e_KTX_TRANSCODE_FAILED: ktx_error_code_e = 14;
pub const ktx_error_code_e_KTX_UNKNOWN_FILE_FORMAT: ktx_error_code_e = 15;
pub const ktx_error_code_e_KTX_UNSUPPORTED_TEXTURE_TYPE: ktx_error_code_e = 16;
pub const ktx_error_code_e_KTX_UNSUPPORTED_FEATURE: ktx_error_code_e = 17;
pub const ktx_error_code_e_KTX_LIBRARY_NOT_LINKED: ktx_error_code_e = 18;
pub use self::ktx_error_code_e as KTX_error_code;

pub type ktxTextureCreateFlags = ktx_uint32_t;
pub type ktxTextureCreateFlagBits = c_uint;
pub const ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_NO_FLAGS: ktxTextureCreateFlagBits = 0;
pub const ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_LOAD_IMAGE_DATA_BIT: ktxTextureCreateFlagBits =
    1;
pub const ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_RAW_KVDATA_BIT: ktxTextureCreateFlagBits = 2;
pub const ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_SKIP_KVDATA_BIT: ktxTextureCreateFlagBits = 4;

pub type ktxTextureCreateStorageEnum = c_uint;
pub const ktxTextureCreateStorageEnum_KTX_TEXTURE_CREATE_NO_STORAGE: ktxTextureCreateStorageEnum =
    0;
pub const ktxTextureCreateStorageEnum_KTX_TEXTURE_CREATE_ALLOC_STORAGE:
    ktxTextureCreateStorageEnum = 1;

pub type class_id = c_uint;
pub const class_id_ktxTexture1_c: class_id = 1;
pub const class_id_ktxTexture2_c: class_id = 2;

pub type ktxOrientationX = c_uint;
pub const ktxOrientationX_KTX_ORIENT_X_LEFT: ktxOrientationX = 108; // 'l'
pub const ktxOrientationX_KTX_ORIENT_X_RIGHT: ktxOrientationX = 114; // 'r'
pub type ktxOrientationY = c_uint;
pub const ktxOrientationY_KTX_ORIENT_Y_UP: ktxOrientationY = 117; // 'u'
pub const ktxOrientationY_KTX_ORIENT_Y_DOWN: ktxOrientationY = 100; // 'd'
pub type ktxOrientationZ = c_uint;
pub const ktxOrientationZ_KTX_ORIENT_Z_IN: ktxOrientationZ = 105; // 'i'
pub const ktxOrientationZ_KTX_ORIENT_Z_OUT: ktxOrientationZ = 111; // 'o'

pub type ktxSupercmpScheme = c_uint;
pub const ktxSupercmpScheme_KTX_SS_NONE: ktxSupercmpScheme = 0;
pub const ktxSupercmpScheme_KTX_SS_BASIS_LZ: ktxSupercmpScheme = 1;
pub const ktxSupercmpScheme_KTX_SS_ZSTD: ktxSupercmpScheme = 2;

pub type ktx_transcode_fmt_e = c_uint;
pub const ktx_transcode_fmt_e_KTX_TTF_ETC1_RGB: ktx_transcode_fmt_e = 0;
pub const ktx_transcode_fmt_e_KTX_TTF_ETC2_RGBA: ktx_transcode_fmt_e = 1;
pub const ktx_transcode_fmt_e_KTX_TTF_BC1_RGB: ktx_transcode_fmt_e = 2;
pub const ktx_transcode_fmt_e_KTX_TTF_BC3_RGBA: ktx_transcode_fmt_e = 3;
pub const ktx_transcode_fmt_e_KTX_TTF_BC4_R: ktx_transcode_fmt_e = 4;
pub const ktx_transcode_fmt_e_KTX_TTF_BC5_RG: ktx_transcode_fmt_e = 5;
pub const ktx_transcode_fmt_e_KTX_TTF_BC7_RGBA: ktx_transcode_fmt_e = 6;
pub const ktx_transcode_fmt_e_KTX_TTF_PVRTC1_4_RGB: ktx_transcode_fmt_e = 8;
pub const ktx_transcode_fmt_e_KTX_TTF_PVRTC1_4_RGBA: ktx_transcode_fmt_e = 9;
pub const ktx_transcode_fmt_e_KTX_TTF_ASTC_4x4_RGBA: ktx_transcode_fmt_e = 10;
pub const ktx_transcode_fmt_e_KTX_TTF_RGBA32: ktx_transcode_fmt_e = 13;
pub const ktx_transcode_fmt_e_KTX_TTF_RGB565: ktx_transcode_fmt_e = 14;
pub const ktx_transcode_fmt_e_KTX_TTF_BGR565: ktx_transcode_fmt_e = 15;
pub const ktx_transcode_fmt_e_KTX_TTF_RGBA4444: ktx_transcode_fmt_e = 16;
pub const ktx_transcode_fmt_e_KTX_TTF_PVRTC2_4_RGB: ktx_transcode_fmt_e = 18;
pub const ktx_transcode_fmt_e_KTX_TTF_PVRTC2_4_RGBA: ktx_transcode_fmt_e = 19;
pub const ktx_transcode_fmt_e_KTX_TTF_ETC2_EAC_R11: ktx_transcode_fmt_e = 20;
pub const ktx_transcode_fmt_e_KTX_TTF_ETC2_EAC_RG11: ktx_transcode_fmt_e = 21;
pub const ktx_transcode_fmt_e_KTX_TTF_ETC: ktx_transcode_fmt_e = 22;
pub const ktx_transcode_fmt_e_KTX_TTF_BC1_OR_3: ktx_transcode_fmt_e = 23;
pub const ktx_transcode_fmt_e_KTX_TTF_NOSELECTION: ktx_transcode_fmt_e = 0x7fff_ffff;

pub type ktx_transcode_flags = ktx_uint32_t;
pub type ktx_transcode_flag_bits_e = c_uint;
pub const ktx_transcode_flag_bits_e_KTX_TF_PVRTC_DECODE_TO_NEXT_POW2: ktx_transcode_flag_bits_e =
    2;
pub const ktx_transcode_flag_bits_e_KTX_TF_TRANSCODE_ALPHA_DATA_TO_OPAQUE_FORMATS:
    ktx_transcode_flag_bits_e = 4;
pub const ktx_transcode_flag_bits_e_KTX_TF_HIGH_QUALITY: ktx_transcode_flag_bits_e = 32;

pub type streamType_e = c_uint;
pub const streamType_e_eStreamTypeFile: streamType_e = 1;
pub const streamType_e_eStreamTypeMemory: streamType_e = 2;
pub const streamType_e_eStreamTypeCustom: streamType_e = 3;
pub use self::streamType_e as streamType;

pub type ktxHashList = *mut c_void;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct FILE {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxMem {
    _unused: [u8; 0],
}

// ---- ktxStream ----

pub type ktxStream_read = Option<
    unsafe extern "C" fn(
        str_: *mut ktxStream,
        dst: *mut c_void,
        count: ktx_size_t,
    ) -> KTX_error_code,
>;
pub type ktxStream_skip =
    Option<unsafe extern "C" fn(str_: *mut ktxStream, count: ktx_size_t) -> KTX_error_code>;
pub type ktxStream_write = Option<
    unsafe extern "C" fn(
        str_: *mut ktxStream,
        src: *const c_void,
        size: ktx_size_t,
        count: ktx_size_t,
    ) -> KTX_error_code,
>;
pub type ktxStream_getpos =
    Option<unsafe extern "C" fn(str_: *mut ktxStream, offset: *mut ktx_off_t) -> KTX_error_code>;
pub type ktxStream_setpos =
    Option<unsafe extern "C" fn(str_: *mut ktxStream, offset: ktx_off_t) -> KTX_error_code>;
pub type ktxStream_getsize =
    Option<unsafe extern "C" fn(str_: *mut ktxStream, size: *mut ktx_size_t) -> KTX_error_code>;
pub type ktxStream_destruct = Option<unsafe extern "C" fn(str_: *mut ktxStream)>;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxStream__bindgen_ty_1__bindgen_ty_1 {
    pub address: *mut c_void,
    pub allocatorAddress: *mut c_void,
    pub size: ktx_size_t,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub union ktxStream__bindgen_ty_1 {
    pub file: *mut FILE,
    pub mem: *mut ktxMem,
    pub custom_ptr: ktxStream__bindgen_ty_1__bindgen_ty_1,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct ktxStream {
    pub read: ktxStream_read,
    pub skip: ktxStream_skip,
    pub write: ktxStream_write,
    pub getpos: ktxStream_getpos,
    pub setpos: ktxStream_setpos,
    pub getsize: ktxStream_getsize,
    pub destruct: ktxStream_destruct,
    pub type_: streamType,
    pub data: ktxStream__bindgen_ty_1,
    pub readpos: ktx_off_t,
    pub closeOnDestruct: ktx_bool_t,
}

// ---- ktxTexture ----

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture_vvtbl {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture_protected {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture1_private {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture2_private {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture__bindgen_ty_1 {
    pub x: ktxOrientationX,
    pub y: ktxOrientationY,
    pub z: ktxOrientationZ,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture1__bindgen_ty_1 {
    pub x: ktxOrientationX,
    pub y: ktxOrientationY,
    pub z: ktxOrientationZ,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture2__bindgen_ty_1 {
    pub x: ktxOrientationX,
    pub y: ktxOrientationY,
    pub z: ktxOrientationZ,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture {
    pub classId: class_id,
    pub vtbl: *mut ktxTexture_vtbl,
    pub vvtbl: *mut ktxTexture_vvtbl,
    pub _protected: *mut ktxTexture_protected,
    pub isArray: ktx_bool_t,
    pub isCubemap: ktx_bool_t,
    pub isCompressed: ktx_bool_t,
    pub generateMipmaps: ktx_bool_t,
    pub baseWidth: ktx_uint32_t,
    pub baseHeight: ktx_uint32_t,
    pub baseDepth: ktx_uint32_t,
    pub numDimensions: ktx_uint32_t,
    pub numLevels: ktx_uint32_t,
    pub numLayers: ktx_uint32_t,
    pub numFaces: ktx_uint32_t,
    pub orientation: ktxTexture__bindgen_ty_1,
    pub kvDataHead: ktxHashList,
    pub kvDataLen: ktx_uint32_t,
    pub kvData: *mut ktx_uint8_t,
    pub dataSize: ktx_size_t,
    pub pData: *mut ktx_uint8_t,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture1 {
    pub classId: class_id,
    pub vtbl: *mut ktxTexture_vtbl,
    pub vvtbl: *mut ktxTexture_vvtbl,
    pub _protected: *mut ktxTexture_protected,
    pub isArray: ktx_bool_t,
    pub isCubemap: ktx_bool_t,
    pub isCompressed: ktx_bool_t,
    pub generateMipmaps: ktx_bool_t,
    pub baseWidth: ktx_uint32_t,
    pub baseHeight: ktx_uint32_t,
    pub baseDepth: ktx_uint32_t,
    pub numDimensions: ktx_uint32_t,
    pub numLevels: ktx_uint32_t,
    pub numLayers: ktx_uint32_t,
    pub numFaces: ktx_uint32_t,
    pub orientation: ktxTexture1__bindgen_ty_1,
    pub kvDataHead: ktxHashList,
    pub kvDataLen: ktx_uint32_t,
    pub kvData: *mut ktx_uint8_t,
    pub dataSize: ktx_size_t,
    pub pData: *mut ktx_uint8_t,
    pub glFormat: ktx_uint32_t,
    pub glInternalformat: ktx_uint32_t,
    pub glBaseInternalformat: ktx_uint32_t,
    pub glType: ktx_uint32_t,
    pub _private: *mut ktxTexture1_private,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture2 {
    pub classId: class_id,
    pub vtbl: *mut ktxTexture_vtbl,
    pub vvtbl: *mut ktxTexture_vvtbl,
    pub _protected: *mut ktxTexture_protected,
    pub isArray: ktx_bool_t,
    pub isCubemap: ktx_bool_t,
    pub isCompressed: ktx_bool_t,
    pub generateMipmaps: ktx_bool_t,
    pub baseWidth: ktx_uint32_t,
    pub baseHeight: ktx_uint32_t,
    pub baseDepth: ktx_uint32_t,
    pub numDimensions: ktx_uint32_t,
    pub numLevels: ktx_uint32_t,
    pub numLayers: ktx_uint32_t,
    pub numFaces: ktx_uint32_t,
    pub orientation: ktxTexture2__bindgen_ty_1,
    pub kvDataHead: ktxHashList,
    pub kvDataLen: ktx_uint32_t,
    pub kvData: *mut ktx_uint8_t,
    pub dataSize: ktx_size_t,
    pub pData: *mut ktx_uint8_t,
    pub vkFormat: ktx_uint32_t,
    pub pDfd: *mut ktx_uint32_t,
    pub supercompressionScheme: ktxSupercmpScheme,
    pub isVideo: ktx_bool_t,
    pub duration: ktx_uint32_t,
    pub timescale: ktx_uint32_t,
    pub loopcount: ktx_uint32_t,
    pub _private: *mut ktxTexture2_private,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTextureCreateInfo {
    pub glInternalformat: ktx_uint32_t,
    pub vkFormat: ktx_uint32_t,
    pub pDfd: *mut ktx_uint32_t,
    pub baseWidth: ktx_uint32_t,
    pub baseHeight: ktx_uint32_t,
    pub baseDepth: ktx_uint32_t,
    pub numDimensions: ktx_uint32_t,
    pub numLevels: ktx_uint32_t,
    pub numLayers: ktx_uint32_t,
    pub numFaces: ktx_uint32_t,
    pub isArray: ktx_bool_t,
    pub generateMipmaps: ktx_bool_t,
}

pub type PFNKTXITERCB = Option<
    unsafe extern "system" fn(
        miplevel: c_int,
        face: c_int,
        width: c_int,
        height: c_int,
        depth: c_int,
        faceLodSize: ktx_uint64_t,
        pixels: *mut c_void,
        userdata: *mut c_void,
    ) -> KTX_error_code,
>;

pub type PFNKTEXDESTROY = Option<unsafe extern "system" fn(This: *mut ktxTexture)>;
pub type PFNKTEXGETIMAGEOFFSET = Option<
    unsafe extern "system" fn(
        This: *mut ktxTexture,
        level: ktx_uint32_t,
        layer: ktx_uint32_t,
        faceSlice: ktx_uint32_t,
        pOffset: *mut ktx_size_t,
    ) -> KTX_error_code,
>;
pub type PFNKTEXGETDATASIZEUNCOMPRESSED =
    Option<unsafe extern "system" fn(This: *mut ktxTexture) -> ktx_size_t>;
pub type PFNKTEXGETIMAGESIZE =
    Option<unsafe extern "system" fn(This: *mut ktxTexture, level: ktx_uint32_t) -> ktx_size_t>;
pub type PFNKTEXITERATELEVELS = Option<
    unsafe extern "system" fn(
        This: *mut ktxTexture,
        iterCb: PFNKTXITERCB,
        userdata: *mut c_void,
    ) -> KTX_error_code,
>;
pub type PFNKTEXITERATELOADLEVELFACES = Option<
    unsafe extern "system" fn(
        This: *mut ktxTexture,
        iterCb: PFNKTXITERCB,
        userdata: *mut c_void,
    ) -> KTX_error_code,
>;
pub type PFNKTEXNEEDSTRANSCODING =
    Option<unsafe extern "system" fn(This: *mut ktxTexture) -> ktx_bool_t>;
pub type PFNKTEXLOADIMAGEDATA = Option<
    unsafe extern "system" fn(
        This: *mut ktxTexture,
        pBuffer: *mut ktx_uint8_t,
        bufSize: ktx_size_t,
    ) -> KTX_error_code,
>;
pub type PFNKTEXSETIMAGEFROMMEMORY = Option<
    unsafe extern "system" fn(
        This: *mut ktxTexture,
        level: ktx_uint32_t,
        layer: ktx_uint32_t,
        faceSlice: ktx_uint32_t,
        src: *const ktx_uint8_t,
        srcSize: ktx_size_t,
    ) -> KTX_error_code,
>;
pub type PFNKTEXSETIMAGEFROMSTDIOSTREAM = Option<
    unsafe extern "system" fn(
        This: *mut ktxTexture,
        level: ktx_uint32_t,
        layer: ktx_uint32_t,
        faceSlice: ktx_uint32_t,
        src: *mut FILE,
        srcSize: ktx_size_t,
    ) -> KTX_error_code,
>;
pub type PFNKTEXWRITETOSTDIOSTREAM =
    Option<unsafe extern "system" fn(This: *mut ktxTexture, dstsstr: *mut FILE) -> KTX_error_code>;
pub type PFNKTEXWRITETONAMEDFILE = Option<
    unsafe extern "system" fn(This: *mut ktxTexture, dstname: *const c_char) -> KTX_error_code,
>;
pub type PFNKTEXWRITETOMEMORY = Option<
    unsafe extern "system" fn(
        This: *mut ktxTexture,
        bytes: *mut *mut ktx_uint8_t,
        size: *mut ktx_size_t,
    ) -> KTX_error_code,
>;
pub type PFNKTEXWRITETOSTREAM = Option<
    unsafe extern "system" fn(This: *mut ktxTexture, dststr: *mut ktxStream) -> KTX_error_code,
>;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ktxTexture_vtbl {
    pub Destroy: PFNKTEXDESTROY,
    pub GetImageOffset: PFNKTEXGETIMAGEOFFSET,
    pub GetDataSizeUncompressed: PFNKTEXGETDATASIZEUNCOMPRESSED,
    pub GetImageSize: PFNKTEXGETIMAGESIZE,
    pub IterateLevels: PFNKTEXITERATELEVELS,
    pub IterateLoadLevelFaces: PFNKTEXITERATELOADLEVELFACES,
    pub NeedsTranscoding: PFNKTEXNEEDSTRANSCODING,
    pub LoadImageData: PFNKTEXLOADIMAGEDATA,
    pub SetImageFromMemory: PFNKTEXSETIMAGEFROMMEMORY,
    pub SetImageFromStdioStream: PFNKTEXSETIMAGEFROMSTDIOSTREAM,
    pub WriteToStdioStream: PFNKTEXWRITETOSTDIOSTREAM,
    pub WriteToNamedFile: PFNKTEXWRITETONAMEDFILE,
    pub WriteToMemory: PFNKTEXWRITETOMEMORY,
    pub WriteToStream: PFNKTEXWRITETOSTREAM,
}

// ---- Functions ----

extern "system" {
    pub fn ktxErrorString(error: KTX_error_code) -> *const c_char;

    pub fn ktxTexture1_Create(
        createInfo: *mut ktxTextureCreateInfo,
        storageAllocation: ktxTextureCreateStorageEnum,
        newTex: *mut *mut ktxTexture1,
    ) -> KTX_error_code;

    pub fn ktxTexture2_Create(
        createInfo: *mut ktxTextureCreateInfo,
        storageAllocation: ktxTextureCreateStorageEnum,
        newTex: *mut *mut ktxTexture2,
    ) -> KTX_error_code;

    pub fn ktxTexture_CreateFromMemory(
        bytes: *const ktx_uint8_t,
        size: ktx_size_t,
        createFlags: ktxTextureCreateFlags,
        newTex: *mut *mut ktxTexture,
    ) -> KTX_error_code;

    pub fn ktxTexture_GetData(This: *mut ktxTexture) -> *mut ktx_uint8_t;
    pub fn ktxTexture_GetDataSize(This: *mut ktxTexture) -> ktx_size_t;
    pub fn ktxTexture_GetElementSize(This: *mut ktxTexture) -> ktx_uint32_t;
    pub fn ktxTexture_GetRowPitch(This: *mut ktxTexture, level: ktx_uint32_t) -> ktx_uint32_t;

    pub fn ktxTexture1_NeedsTranscoding(This: *mut ktxTexture1) -> ktx_bool_t;
    pub fn ktxTexture2_NeedsTranscoding(This: *mut ktxTexture2) -> ktx_bool_t;

    pub fn ktxTexture2_GetNumComponents(This: *mut ktxTexture2) -> ktx_uint32_t;
    pub fn ktxTexture2_GetComponentInfo(
        This: *mut ktxTexture2,
        numComponents: *mut ktx_uint32_t,
        componentByteLength: *mut ktx_uint32_t,
    );

    pub fn ktxTexture2_GetOETF(This: *mut ktxTexture2) -> ktx_uint32_t;
    pub fn ktxTexture2_GetPremultipliedAlpha(This: *mut ktxTexture2) -> ktx_bool_t;

    pub fn ktxTexture2_TranscodeBasis(
        This: *mut ktxTexture2,
        fmt: ktx_transcode_fmt_e,
        transcodeFlags: ktx_transcode_flags,
    ) -> KTX_error_code;

    #[cfg(feature = "write")]
    pub fn ktxTexture2_DeflateZstd(This: *mut ktxTexture2, level: ktx_uint32_t) -> KTX_error_code;
}

extern "C" {
    /// libKTX's stream-based texture constructor, which `texture.h` keeps private.
    ///
    /// Re-exported publicly as [`crate::ktxTexture_CreateFromStream`].
    pub fn ktxTexture_createFromStream(
        pStream: *mut ktxStream,
        createFlags: ktxTextureCreateFlags,
        newTex: *mut *mut ktxTexture,
    ) -> KTX_error_code;
}
