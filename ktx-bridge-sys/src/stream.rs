// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

//! A `ktxStream` backed by Rust I/O.

use crate::*;
use std::{
    convert::TryFrom,
    ffi::c_void,
    fmt::Debug,
    io::{Read, Seek, SeekFrom, Write},
    marker::PhantomData,
    mem::ManuallyDrop,
};

/// Represents a Rust byte stream, i.e. something [`Read`], [`Write`] and [`Seek`].
pub trait RWSeekable: Read + Write + Seek {
    /// Upcasts self to a `RWSeekable` reference.
    ///
    /// This is required for getting a fat pointer to `self` to be stored behind the
    /// C-managed [`ktxStream`].
    fn as_mut_dyn(&mut self) -> &mut dyn RWSeekable;
}

impl<T: Read + Write + Seek> RWSeekable for T {
    fn as_mut_dyn(&mut self) -> &mut dyn RWSeekable {
        self
    }
}

impl<'a> Debug for dyn RWSeekable + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RWSeekable({:p})", self)
    }
}

/// A fat `dyn RWSeekable` pointer, itself stored on the heap.
///
/// C only gets to see a thin pointer to this cell (in `ktxStream.data.custom_ptr.address`);
/// the callbacks below read the fat pointer back out of it.
type DynCell<'a> = *mut (dyn RWSeekable + 'a);

/// A Rust-based `ktxStream`, for reading from / writing to [`RWSeekable`]s.
pub struct RustKtxStream<'a, T: RWSeekable + ?Sized + 'a> {
    inner_ptr: *mut T,
    dyn_cell: *mut DynCell<'a>,
    ktx_stream: *mut ktxStream,
    phantom: PhantomData<&'a mut T>,
}

impl<'a, T: RWSeekable + ?Sized + 'a> RustKtxStream<'a, T> {
    /// Attempts to create a new Rust-based `ktxStream`, wrapping the given `inner` [`RWSeekable`].
    pub fn new(inner: Box<T>) -> Result<Self, ktx_error_code_e> {
        let inner_ptr = Box::into_raw(inner);
        // SAFETY: Safe, we just destructed a Box
        let inner_dyn: DynCell<'a> = unsafe { (*inner_ptr).as_mut_dyn() };
        let dyn_cell = Box::into_raw(Box::new(inner_dyn));

        let ktx_stream = Box::into_raw(Box::new(ktxStream {
            read: Some(ktxRustStream_read),
            skip: Some(ktxRustStream_skip),
            write: Some(ktxRustStream_write),
            getpos: Some(ktxRustStream_getpos),
            setpos: Some(ktxRustStream_setpos),
            getsize: Some(ktxRustStream_getsize),
            destruct: Some(ktxRustStream_destruct),
            type_: streamType_e_eStreamTypeCustom,
            data: ktxStream__bindgen_ty_1 {
                custom_ptr: ktxStream__bindgen_ty_1__bindgen_ty_1 {
                    address: dyn_cell as *mut c_void,
                    allocatorAddress: std::ptr::null_mut(),
                    size: 0,
                },
            },
            readpos: 0,
            // Prevent the C API from messing with Rust structs
            closeOnDestruct: false,
        }));

        log::trace!("RustKtxStream: new ktxStream at {:p}", ktx_stream);

        Ok(Self {
            inner_ptr,
            dyn_cell,
            ktx_stream,
            phantom: PhantomData,
        })
    }

    /// Returns a handle to the underlying [`ktxStream`].
    ///
    /// ## Safety
    /// The returned handle is only for interaction with the C API, and is valid for as long as `self` is.
    pub fn ktx_stream(&self) -> *mut ktxStream {
        self.ktx_stream
    }

    /// Returns a reference to the inner [`RWSeekable`].
    pub fn inner(&self) -> &T {
        // SAFETY: `inner_ptr` came from `Box::into_raw()` and lives as long as `self`
        unsafe { &*self.inner_ptr }
    }

    /// Returns a mutable reference to the inner [`RWSeekable`].
    pub fn inner_mut(&mut self) -> &mut T {
        // SAFETY: `inner_ptr` came from `Box::into_raw()` and lives as long as `self`
        unsafe { &mut *self.inner_ptr }
    }

    /// Destroys self, giving back the boxed [`RWSeekable`] that was passed to [`Self::new`].
    pub fn into_inner(self) -> Box<T> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `self` is not dropped, so every pointer is reclaimed exactly once here
        unsafe {
            this.free_ktx_side();
            Box::from_raw(this.inner_ptr)
        }
    }

    /// Deallocates the `ktxStream` and the fat pointer cell it refers to.
    ///
    /// SAFETY: must be called at most once.
    unsafe fn free_ktx_side(&self) {
        let mut ktx_stream = Box::from_raw(self.ktx_stream);
        // Mark the C-land `ktxStream` as invalid, for whoever still holds a dangling handle
        ktx_stream.data.custom_ptr = ktxStream__bindgen_ty_1__bindgen_ty_1 {
            address: std::ptr::null_mut(),
            allocatorAddress: std::ptr::null_mut(),
            size: 0xBADDA7A,
        };
        std::mem::drop(ktx_stream);
        std::mem::drop(Box::from_raw(self.dyn_cell));
    }
}

impl<'a, T: RWSeekable + ?Sized + 'a> Drop for RustKtxStream<'a, T> {
    fn drop(&mut self) {
        log::trace!("RustKtxStream: drop ktxStream at {:p}", self.ktx_stream);
        // SAFETY: `into_inner()` skips this, so all pointers are still live and owned by `self`
        unsafe {
            self.free_ktx_side();
            std::mem::drop(Box::from_raw(self.inner_ptr));
        }
    }
}

impl<'a, T: RWSeekable + ?Sized + 'a> Debug for RustKtxStream<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RustKtxStream(inner={:p}, ktxStream={:p})",
            self.inner_ptr, self.ktx_stream
        )
    }
}

/// Get back a reference to the [`RWSeekable`] behind `ktxStream.data.custom_ptr`.
/// SAFETY: UB if `str` is not actually the `ktxStream` of a live [`RustKtxStream`].
unsafe fn inner_rwseekable<'a>(str: *mut ktxStream) -> &'a mut (dyn RWSeekable + 'a) {
    let dyn_cell = (*str).data.custom_ptr.address as *mut DynCell<'a>;
    &mut **dyn_cell
}

// Since `#[feature(seek_stream_len)]` is unstable...
fn stream_len(seek: &mut dyn RWSeekable) -> std::io::Result<u64> {
    let old_pos = seek.stream_position()?;
    let size = seek.seek(SeekFrom::End(0))?;
    seek.seek(SeekFrom::Start(old_pos))?;
    Ok(size)
}

#[no_mangle]
unsafe extern "C" fn ktxRustStream_read(
    str: *mut ktxStream,
    dst: *mut c_void,
    count: ktx_size_t,
) -> ktx_error_code_e {
    let inner = inner_rwseekable(str);
    let buf = std::slice::from_raw_parts_mut(dst as *mut u8, count as usize);
    match inner.read_exact(buf) {
        Ok(_) => ktx_error_code_e_KTX_SUCCESS,
        Err(err) => {
            log::error!("ktxRustStream_read: {}", err);
            ktx_error_code_e_KTX_FILE_READ_ERROR
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ktxRustStream_skip(
    str: *mut ktxStream,
    count: ktx_size_t,
) -> ktx_error_code_e {
    let inner = inner_rwseekable(str);
    let count = match i64::try_from(count) {
        Ok(count) => count,
        Err(_) => return ktx_error_code_e_KTX_FILE_OVERFLOW,
    };
    match inner.seek(SeekFrom::Current(count)) {
        Ok(_) => ktx_error_code_e_KTX_SUCCESS,
        Err(err) => {
            log::error!("ktxRustStream_skip: {}", err);
            ktx_error_code_e_KTX_FILE_SEEK_ERROR
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ktxRustStream_write(
    str: *mut ktxStream,
    src: *const c_void,
    size: ktx_size_t,
    count: ktx_size_t,
) -> ktx_error_code_e {
    let inner = inner_rwseekable(str);
    let len = match size.checked_mul(count) {
        Some(len) => len,
        None => return ktx_error_code_e_KTX_FILE_OVERFLOW,
    };
    let buf = std::slice::from_raw_parts(src as *const u8, len);
    match inner.write_all(buf) {
        Ok(_) => ktx_error_code_e_KTX_SUCCESS,
        Err(err) => {
            log::error!("ktxRustStream_write: {}", err);
            ktx_error_code_e_KTX_FILE_WRITE_ERROR
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ktxRustStream_getpos(
    str: *mut ktxStream,
    pos: *mut ktx_off_t,
) -> ktx_error_code_e {
    let inner = inner_rwseekable(str);
    match inner.stream_position() {
        Ok(cur) => match ktx_off_t::try_from(cur) {
            Ok(cur) => {
                *pos = cur;
                ktx_error_code_e_KTX_SUCCESS
            }
            Err(_) => ktx_error_code_e_KTX_FILE_OVERFLOW,
        },
        Err(err) => {
            log::error!("ktxRustStream_getpos: {}", err);
            ktx_error_code_e_KTX_FILE_SEEK_ERROR
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ktxRustStream_setpos(str: *mut ktxStream, off: ktx_off_t) -> ktx_error_code_e {
    let inner = inner_rwseekable(str);
    let off = match u64::try_from(off) {
        Ok(off) => off,
        Err(_) => return ktx_error_code_e_KTX_FILE_OVERFLOW,
    };
    match inner.seek(SeekFrom::Start(off)) {
        Ok(_) => ktx_error_code_e_KTX_SUCCESS,
        Err(err) => {
            log::error!("ktxRustStream_setpos: {}", err);
            ktx_error_code_e_KTX_FILE_SEEK_ERROR
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ktxRustStream_getsize(
    str: *mut ktxStream,
    size: *mut ktx_size_t,
) -> ktx_error_code_e {
    let inner = inner_rwseekable(str);
    match stream_len(inner) {
        Ok(len) => match ktx_size_t::try_from(len) {
            Ok(len) => {
                *size = len;
                ktx_error_code_e_KTX_SUCCESS
            }
            Err(_) => ktx_error_code_e_KTX_FILE_OVERFLOW,
        },
        Err(err) => {
            log::error!("ktxRustStream_getsize: {}", err);
            ktx_error_code_e_KTX_FILE_SEEK_ERROR
        }
    }
}

#[no_mangle]
unsafe extern "C" fn ktxRustStream_destruct(_str: *mut ktxStream) {
    // No-op; `RustKtxStream::drop()` will do all the work.
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn call<R>(stream: &RustKtxStream<Cursor<Vec<u8>>>, f: impl FnOnce(&ktxStream) -> R) -> R {
        // SAFETY: the handle is live for as long as `stream` is
        f(unsafe { &*stream.ktx_stream() })
    }

    #[test]
    fn reads_through_callbacks() {
        let stream = RustKtxStream::new(Box::new(Cursor::new(vec![1u8, 2, 3, 4, 5])))
            .expect("a ktxStream over a io::Cursor");
        let handle = stream.ktx_stream();

        let mut buf = [0u8; 3];
        let err = call(&stream, |s| unsafe {
            (s.read.unwrap())(handle, buf.as_mut_ptr() as *mut c_void, buf.len())
        });
        assert_eq!(err, ktx_error_code_e_KTX_SUCCESS);
        assert_eq!(buf, [1, 2, 3]);

        let mut pos: ktx_off_t = -1;
        let err = call(&stream, |s| unsafe { (s.getpos.unwrap())(handle, &mut pos) });
        assert_eq!(err, ktx_error_code_e_KTX_SUCCESS);
        assert_eq!(pos, 3);
    }

    #[test]
    fn short_read_is_a_read_error() {
        let stream = RustKtxStream::new(Box::new(Cursor::new(vec![1u8, 2])))
            .expect("a ktxStream over a io::Cursor");
        let handle = stream.ktx_stream();

        let mut buf = [0u8; 8];
        let err = call(&stream, |s| unsafe {
            (s.read.unwrap())(handle, buf.as_mut_ptr() as *mut c_void, buf.len())
        });
        assert_eq!(err, ktx_error_code_e_KTX_FILE_READ_ERROR);
    }

    #[test]
    fn getsize_keeps_position() {
        let stream = RustKtxStream::new(Box::new(Cursor::new(vec![0u8; 16])))
            .expect("a ktxStream over a io::Cursor");
        let handle = stream.ktx_stream();

        let err = call(&stream, |s| unsafe { (s.setpos.unwrap())(handle, 5) });
        assert_eq!(err, ktx_error_code_e_KTX_SUCCESS);
        let err = call(&stream, |s| unsafe { (s.skip.unwrap())(handle, 2) });
        assert_eq!(err, ktx_error_code_e_KTX_SUCCESS);

        let mut size: ktx_size_t = 0;
        let err = call(&stream, |s| unsafe { (s.getsize.unwrap())(handle, &mut size) });
        assert_eq!(err, ktx_error_code_e_KTX_SUCCESS);
        assert_eq!(size, 16);
        assert_eq!(stream.inner().position(), 7);
    }

    #[test]
    fn out_of_range_positions_overflow() {
        let stream = RustKtxStream::new(Box::new(Cursor::new(vec![0u8; 16])))
            .expect("a ktxStream over a io::Cursor");
        let handle = stream.ktx_stream();

        let err = call(&stream, |s| unsafe { (s.setpos.unwrap())(handle, -1) });
        assert_eq!(err, ktx_error_code_e_KTX_FILE_OVERFLOW);
        assert_eq!(stream.inner().position(), 0);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_skip_overflows() {
        let stream = RustKtxStream::new(Box::new(Cursor::new(vec![0u8; 16])))
            .expect("a ktxStream over a io::Cursor");
        let handle = stream.ktx_stream();

        let err = call(&stream, |s| unsafe { (s.skip.unwrap())(handle, ktx_size_t::MAX) });
        assert_eq!(err, ktx_error_code_e_KTX_FILE_OVERFLOW);
        assert_eq!(stream.inner().position(), 0);
    }

    #[test]
    fn writes_then_gives_back_inner() {
        let stream = RustKtxStream::new(Box::new(Cursor::new(Vec::new())))
            .expect("a ktxStream over a io::Cursor");
        let handle = stream.ktx_stream();

        let data = [0xABu16, 0xCD];
        let err = call(&stream, |s| unsafe {
            (s.write.unwrap())(handle, data.as_ptr() as *const c_void, 2, data.len())
        });
        assert_eq!(err, ktx_error_code_e_KTX_SUCCESS);

        let cursor = stream.into_inner();
        assert_eq!(cursor.get_ref().len(), 4);
    }

    #[test]
    fn is_a_custom_stream() {
        let stream = RustKtxStream::new(Box::new(Cursor::new(Vec::new())))
            .expect("a ktxStream over a io::Cursor");
        call(&stream, |s| {
            assert_eq!(s.type_, streamType_e_eStreamTypeCustom);
            assert!(!s.closeOnDestruct);
        });
    }
}
