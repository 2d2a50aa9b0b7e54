// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

use ktx_bridge::{
    sys, KtxError, MemorySource, RustKtxStream, StreamSource, Texture, TextureCreateFlags,
};
use std::{
    io::{Cursor, Seek, SeekFrom},
    sync::{Arc, Mutex},
};

const RED: [u8; 4] = [0xFF, 0x00, 0x00, 0xFF];
const GREEN: [u8; 4] = [0x00, 0xFF, 0x00, 0xFF];

type SharedCursor = Arc<Mutex<RustKtxStream<'static, Cursor<Vec<u8>>>>>;

/// A 1x1 `GL_RGBA8` KTX1 holding a single red texel.
fn red_texel_ktx1() -> Vec<u8> {
    let mut bytes = b"\xABKTX 11\xBB\r\n\x1A\n".to_vec();
    let header: [u32; 13] = [
        0x0403_0201, // endianness
        0x1401,      // glType: GL_UNSIGNED_BYTE
        1,           // glTypeSize
        0x1908,      // glFormat: GL_RGBA
        0x8058,      // glInternalFormat: GL_RGBA8
        0x1908,      // glBaseInternalFormat: GL_RGBA
        1,           // pixelWidth
        1,           // pixelHeight
        0,           // pixelDepth
        0,           // numberOfArrayElements
        1,           // numberOfFaces
        1,           // numberOfMipmapLevels
        0,           // bytesOfKeyValueData
    ];
    for word in header.iter() {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes.extend_from_slice(&4u32.to_le_bytes()); // imageSize
    bytes.extend_from_slice(&RED);
    bytes
}

fn shared_stream(bytes: Vec<u8>) -> SharedCursor {
    let stream = RustKtxStream::new(Box::new(Cursor::new(bytes)))
        .expect("a ktxStream over a io::Cursor");
    Arc::new(Mutex::new(stream))
}

fn load(stream: &SharedCursor, flags: TextureCreateFlags) -> Texture<'static> {
    Texture::new(StreamSource::new(stream.clone(), flags)).expect("the red texel KTX1")
}

fn seek(stream: &SharedCursor, pos: SeekFrom) {
    stream
        .lock()
        .expect("Poisoned stream lock")
        .inner_mut()
        .seek(pos)
        .expect("seeking the io::Cursor");
}

#[test]
fn load_eagerly() {
    let stream = shared_stream(red_texel_ktx1());
    let mut texture = load(&stream, TextureCreateFlags::LOAD_IMAGE_DATA);
    assert_eq!(texture.data(), &RED[..]);
    assert_eq!(texture.get_image_offset(0, 0, 0), Ok(0));

    let ktx1 = texture.ktx1().expect("a KTX1 view");
    assert_eq!(ktx1.gl_format(), 0x1908);
    assert_eq!(ktx1.gl_base_internal_format(), 0x1908);
    assert_eq!(ktx1.gl_type(), 0x1401);
}

#[test]
fn load_lazily() {
    let stream = shared_stream(red_texel_ktx1());
    let mut texture = load(&stream, TextureCreateFlags::empty());
    assert!(texture.data().is_empty());
    assert_eq!(
        texture.iterate_levels(|_, _, _, _, _, _| Ok(())),
        Err(KtxError::InvalidValue)
    );

    texture.load_image_data().expect("loading the image data");
    assert_eq!(texture.data(), &RED[..]);
}

#[test]
fn lazy_load_after_another_source_moved_the_stream() {
    let stream = shared_stream(red_texel_ktx1());
    let mut lazy = load(&stream, TextureCreateFlags::empty());

    seek(&stream, SeekFrom::Start(0));
    let eager = load(&stream, TextureCreateFlags::LOAD_IMAGE_DATA);
    assert_eq!(eager.data(), &RED[..]);

    lazy.load_image_data().expect("loading the image data");
    assert_eq!(lazy.data(), &RED[..]);
}

#[test]
fn two_lazy_textures_on_one_stream() {
    let stream = shared_stream(red_texel_ktx1());
    let mut first = load(&stream, TextureCreateFlags::empty());
    seek(&stream, SeekFrom::Start(0));
    let mut second = load(&stream, TextureCreateFlags::empty());
    seek(&stream, SeekFrom::End(0));

    second.load_image_data().expect("loading the second texture");
    first.load_image_data().expect("loading the first texture");
    assert_eq!(first.data(), &RED[..]);
    assert_eq!(second.data(), &RED[..]);
}

#[test]
fn iterate_and_modify_levels() {
    let stream = shared_stream(red_texel_ktx1());
    let mut texture = load(&stream, TextureCreateFlags::LOAD_IMAGE_DATA);
    texture
        .iterate_levels_mut(|mip, face, width, height, depth, pixels| {
            assert_eq!((mip, face, width, height, depth), (0, 0, 1, 1, 1));
            pixels.copy_from_slice(&GREEN);
            Ok(())
        })
        .expect("iterating the only level");
    assert_eq!(texture.data(), &GREEN[..]);
}

#[test]
fn callback_errors_are_propagated() {
    let stream = shared_stream(red_texel_ktx1());
    let texture = load(&stream, TextureCreateFlags::LOAD_IMAGE_DATA);
    let result = texture.iterate_levels(|_, _, _, _, _, _| Err(KtxError::TranscodeFailed));
    assert_eq!(result, Err(KtxError::TranscodeFailed));
}

#[test]
fn garbage_is_an_unknown_format() {
    let source = StreamSource::new(shared_stream(vec![0x42; 128]), TextureCreateFlags::empty());
    assert_eq!(Texture::new(source).err(), Some(KtxError::UnknownFileFormat));
}

#[test]
fn truncated_stream_fails() {
    let mut bytes = red_texel_ktx1();
    bytes.truncate(30);
    let source = StreamSource::new(shared_stream(bytes), TextureCreateFlags::empty());
    assert!(Texture::new(source).is_err());
}

#[test]
fn stream_is_shared_between_sources() {
    let stream = shared_stream(red_texel_ktx1());
    let first = load(&stream, TextureCreateFlags::LOAD_IMAGE_DATA);
    seek(&stream, SeekFrom::Start(0));
    let second = load(&stream, TextureCreateFlags::LOAD_IMAGE_DATA);

    assert_eq!(first.data(), second.data());
    assert_ne!(first.handle(), second.handle());
    // Both textures keep their source, and so the stream, alive
    assert_eq!(Arc::strong_count(&stream), 3);
    drop(first);
    drop(second);
    assert_eq!(Arc::strong_count(&stream), 1);
}

#[test]
fn source_gives_back_stream() {
    let stream = shared_stream(red_texel_ktx1());
    let source = StreamSource::new(stream.clone(), TextureCreateFlags::empty());
    assert!(Arc::ptr_eq(&source.into_inner(), &stream));
}

#[test]
fn memory_and_stream_agree() {
    let bytes = red_texel_ktx1();
    let from_memory =
        Texture::new(MemorySource::new(&bytes, TextureCreateFlags::LOAD_IMAGE_DATA))
            .expect("the red texel KTX1 from memory");
    let from_stream = load(&shared_stream(bytes.clone()), TextureCreateFlags::LOAD_IMAGE_DATA);

    assert_eq!(from_memory.data(), from_stream.data());
    assert_eq!(from_memory.base_width(), from_stream.base_width());
    assert_eq!(from_memory.num_levels(), from_stream.num_levels());
}

#[test]
fn shim_matches_internal_entry_point() {
    let create = |public: bool| {
        let stream = RustKtxStream::new(Box::new(Cursor::new(red_texel_ktx1())))
            .expect("a ktxStream over a io::Cursor");
        let mut handle: *mut sys::ktxTexture = std::ptr::null_mut();
        // SAFETY: the stream is live for the call, `handle` is a valid slot
        let err = unsafe {
            if public {
                sys::ktxTexture_CreateFromStream(stream.ktx_stream(), 0, &mut handle)
            } else {
                sys::ktxTexture_createFromStream(stream.ktx_stream(), 0, &mut handle)
            }
        };
        assert!(!handle.is_null());
        // SAFETY: `handle` was just created by libKTX and is destroyed exactly once
        let summary = unsafe {
            let summary = ((*handle).classId, (*handle).baseWidth, (*handle).dataSize);
            if let Some(destroy) = (*(*handle).vtbl).Destroy {
                destroy(handle);
            }
            summary
        };
        (err, summary, stream.inner().position())
    };
    assert_eq!(create(true), create(false));
}
