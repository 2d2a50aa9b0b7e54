// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "test-images")]
mod test_images {
    use ktx_bridge::{RustKtxStream, StreamSource, Texture, TextureCreateFlags};
    use ktx_bridge_macros::ktx_file_tests;
    use std::{
        fs::File,
        sync::{Arc, Mutex},
    };

    fn from_stream(file: File) {
        let stream = RustKtxStream::new(Box::new(file)).expect("the Rust ktxStream");
        let source = StreamSource::new(
            Arc::new(Mutex::new(stream)),
            TextureCreateFlags::LOAD_IMAGE_DATA,
        );
        let texture = Texture::new(source).expect("the loaded KTX");
        assert!(texture.num_levels() >= 1);
        assert!(texture.data_size() > 0);
    }

    ktx_file_tests! {from_stream =>
        "../ktx-bridge-sys/build/KTX-Software/tests/testimages/*.ktx",
        "../ktx-bridge-sys/build/KTX-Software/tests/testimages/*.ktx2",
    }
}
