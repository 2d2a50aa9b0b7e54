// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! `ktxTexture_CreateFromStream` must behave exactly like libKTX's `ktxTexture_createFromStream`.

use ktx_bridge_sys::{self as sys, stream::RustKtxStream};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

type CreateFn = unsafe fn(
    *mut sys::ktxStream,
    sys::ktxTextureCreateFlags,
    *mut *mut sys::ktxTexture,
) -> sys::KTX_error_code;

unsafe fn public_entry(
    stream: *mut sys::ktxStream,
    flags: sys::ktxTextureCreateFlags,
    new_tex: *mut *mut sys::ktxTexture,
) -> sys::KTX_error_code {
    sys::ktxTexture_CreateFromStream(stream, flags, new_tex)
}

unsafe fn internal_entry(
    stream: *mut sys::ktxStream,
    flags: sys::ktxTextureCreateFlags,
    new_tex: *mut *mut sys::ktxTexture,
) -> sys::KTX_error_code {
    sys::ktxTexture_createFromStream(stream, flags, new_tex)
}

/// A cursor that records every read it serves, as `(offset, len)`.
struct RecordingCursor {
    inner: Cursor<Vec<u8>>,
    reads: Vec<(u64, usize)>,
    writes: usize,
}

impl RecordingCursor {
    fn new(bytes: Vec<u8>) -> Self {
        RecordingCursor {
            inner: Cursor::new(bytes),
            reads: Vec::new(),
            writes: 0,
        }
    }
}

impl Read for RecordingCursor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let offset = self.inner.position();
        let n = self.inner.read(buf)?;
        self.reads.push((offset, n));
        Ok(n)
    }
}

impl Write for RecordingCursor {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writes += 1;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl Seek for RecordingCursor {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// What one call through an entry point did.
#[derive(Debug, PartialEq)]
struct Outcome {
    err: sys::KTX_error_code,
    created: Option<TextureSummary>,
    reads: Vec<(u64, usize)>,
    writes: usize,
    final_pos: u64,
}

#[derive(Debug, PartialEq)]
struct TextureSummary {
    class_id: sys::class_id,
    base_width: u32,
    base_height: u32,
    num_dimensions: u32,
    num_levels: u32,
    data_size: usize,
}

unsafe fn destroy(texture: *mut sys::ktxTexture) {
    if let Some(destroy_fn) = (*(*texture).vtbl).Destroy {
        destroy_fn(texture);
    }
}

fn run(create: CreateFn, bytes: &[u8], flags: sys::ktxTextureCreateFlags) -> Outcome {
    let mut stream = RustKtxStream::new(Box::new(RecordingCursor::new(bytes.to_vec())))
        .expect("a ktxStream over a RecordingCursor");

    let mut new_tex: *mut sys::ktxTexture = std::ptr::null_mut();
    let err = unsafe { create(stream.ktx_stream(), flags, &mut new_tex) };

    let created = if new_tex.is_null() {
        None
    } else {
        // SAFETY: libKTX handed us a live texture, which we own from now on
        unsafe {
            let summary = TextureSummary {
                class_id: (*new_tex).classId,
                base_width: (*new_tex).baseWidth,
                base_height: (*new_tex).baseHeight,
                num_dimensions: (*new_tex).numDimensions,
                num_levels: (*new_tex).numLevels,
                data_size: sys::ktxTexture_GetDataSize(new_tex),
            };
            destroy(new_tex);
            Some(summary)
        }
    };

    let final_pos = stream
        .inner_mut()
        .stream_position()
        .expect("the final stream position");
    let inner = stream.into_inner();
    Outcome {
        err,
        created,
        reads: inner.reads,
        writes: inner.writes,
        final_pos,
    }
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// The smallest useful KTX1: one 1x1 `GL_RGBA8` image, no key/value data.
fn minimal_ktx1() -> Vec<u8> {
    let mut bytes = vec![
        0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
    ];
    push_u32(&mut bytes, 0x0403_0201); // endianness
    push_u32(&mut bytes, 0x1401); // glType = GL_UNSIGNED_BYTE
    push_u32(&mut bytes, 1); // glTypeSize
    push_u32(&mut bytes, 0x1908); // glFormat = GL_RGBA
    push_u32(&mut bytes, 0x8058); // glInternalFormat = GL_RGBA8
    push_u32(&mut bytes, 0x1908); // glBaseInternalFormat = GL_RGBA
    push_u32(&mut bytes, 1); // pixelWidth
    push_u32(&mut bytes, 1); // pixelHeight
    push_u32(&mut bytes, 0); // pixelDepth
    push_u32(&mut bytes, 0); // numberOfArrayElements
    push_u32(&mut bytes, 1); // numberOfFaces
    push_u32(&mut bytes, 1); // numberOfMipmapLevels
    push_u32(&mut bytes, 0); // bytesOfKeyValueData
    push_u32(&mut bytes, 4); // imageSize
    bytes.extend_from_slice(&[0xFF, 0x00, 0x80, 0xFF]);
    bytes
}

#[test]
fn minimal_ktx1_without_flags() {
    let public = run(public_entry, &minimal_ktx1(), 0);
    let internal = run(internal_entry, &minimal_ktx1(), 0);

    assert_eq!(public.err, sys::ktx_error_code_e_KTX_SUCCESS);
    let created = public.created.as_ref().expect("a non-null texture");
    assert_eq!(created.class_id, sys::class_id_ktxTexture1_c);
    assert_eq!((created.base_width, created.base_height), (1, 1));
    assert_eq!(created.num_dimensions, 2);
    assert_eq!(public, internal);
}

#[test]
fn minimal_ktx1_loading_image_data() {
    let flags = sys::ktxTextureCreateFlagBits_KTX_TEXTURE_CREATE_LOAD_IMAGE_DATA_BIT;
    let public = run(public_entry, &minimal_ktx1(), flags);
    let internal = run(internal_entry, &minimal_ktx1(), flags);

    assert_eq!(public.err, sys::ktx_error_code_e_KTX_SUCCESS);
    assert_eq!(public.created.as_ref().map(|t| t.data_size), Some(4));
    assert_eq!(public, internal);
}

#[test]
fn unknown_format() {
    let garbage: Vec<u8> = (0..128u8).collect();
    let public = run(public_entry, &garbage, 0);
    let internal = run(internal_entry, &garbage, 0);

    assert_eq!(public.err, sys::ktx_error_code_e_KTX_UNKNOWN_FILE_FORMAT);
    assert!(public.created.is_none());
    assert_eq!(public, internal);
}

#[test]
fn truncated_header() {
    let mut truncated = minimal_ktx1();
    truncated.truncate(20);
    let public = run(public_entry, &truncated, 0);
    let internal = run(internal_entry, &truncated, 0);

    assert_ne!(public.err, sys::ktx_error_code_e_KTX_SUCCESS);
    assert!(public.created.is_none());
    assert_eq!(public, internal);
}

#[test]
fn empty_stream() {
    let public = run(public_entry, &[], 0);
    let internal = run(internal_entry, &[], 0);

    assert_ne!(public.err, sys::ktx_error_code_e_KTX_SUCCESS);
    assert!(public.created.is_none());
    assert_eq!(public.writes, 0);
    assert_eq!(public, internal);
}

#[test]
fn ktx1_layout_shares_the_base_header() {
    let stream = RustKtxStream::new(Box::new(Cursor::new(minimal_ktx1())))
        .expect("a ktxStream over a io::Cursor");
    let mut new_tex: *mut sys::ktxTexture = std::ptr::null_mut();
    let err = unsafe { sys::ktxTexture_CreateFromStream(stream.ktx_stream(), 0, &mut new_tex) };
    assert_eq!(err, sys::ktx_error_code_e_KTX_SUCCESS);
    assert!(!new_tex.is_null());

    // SAFETY: a KTX1 was created, so the handle is a live `ktxTexture1`
    unsafe {
        let base: &sys::ktxTexture = &*new_tex;
        let ktx1: &sys::ktxTexture1 = &*(new_tex as *const sys::ktxTexture1);
        let orientation: sys::ktxTexture1__bindgen_ty_1 = ktx1.orientation;
        assert_eq!(
            (orientation.x, orientation.y, orientation.z),
            (base.orientation.x, base.orientation.y, base.orientation.z)
        );
        assert_eq!(ktx1.baseWidth, base.baseWidth);
        assert_eq!(ktx1.glInternalformat, 0x8058);
        destroy(new_tex);
    }
}
