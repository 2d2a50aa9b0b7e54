// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

#[cfg(feature = "run-bindgen")]
use bindgen;
use cc;
use glob::glob;
use std::path::PathBuf;

// Source lists and defines are taken from `KTX-Software/CMakeLists.txt`

const SOURCE_DIR: &str = "build/KTX-Software";

const INCLUDE_DIRS: &[&str] = &[
    "build/KTX-Software/include",
    "build/KTX-Software/lib",
    "build/KTX-Software/lib/basisu/transcoder",
    "build/KTX-Software/lib/basisu/zstd",
    "build/KTX-Software/other_include",
    "build/KTX-Software/utils",
];

#[cfg(feature = "run-bindgen")]
const WRAPPER_HEADER: &str = "build/wrapper.h";

const C_SOURCE_FILES: &[&str] = &[
    "lib/basisu/zstd/zstd.c",
    "lib/checkheader.c",
    "lib/dfdutils/createdfd.c",
    "lib/dfdutils/colourspaces.c",
    "lib/dfdutils/interpretdfd.c",
    "lib/dfdutils/printdfd.c",
    "lib/dfdutils/queries.c",
    "lib/dfdutils/dfd2vk.c",
    "lib/dfdutils/vk2dfd.c",
    "lib/filestream.c",
    "lib/hashlist.c",
    "lib/info.c",
    "lib/memstream.c",
    "lib/strings.c",
    "lib/swap.c",
    "lib/texture.c",
    "lib/texture2.c",
    "lib/vkformat_check.c",
    "lib/vkformat_str.c",
    // KTX_FEATURE_KTX1
    "lib/texture1.c",
];

// KTX_FEATURE_WRITE
const C_WRITE_SOURCE_FILES: &[&str] = &["lib/writer1.c", "lib/writer2.c"];

const CXX_SOURCE_FILES: &[&str] = &[
    "lib/basis_transcode.cpp",
    "lib/basisu/transcoder/basisu_transcoder.cpp",
    "lib/etcunpack.cxx",
];

// Not open source; see the `nonfree-etc-unpack` feature
const CXX_NONFREE_SOURCE_FILES: &[&str] = &["lib/etcdec.cxx"];

fn feature_enabled(name: &str) -> bool {
    let var = format!("CARGO_FEATURE_{}", name.to_uppercase().replace('-', "_"));
    std::env::var_os(var).is_some()
}

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}

fn configure_build(mut build: cc::Build) -> cc::Build {
    build
        .includes(INCLUDE_DIRS)
        .warnings(false)
        .extra_warnings(false)
        //
        .define("LIBKTX", "1") // This one is important (compilation fails otherwise!)
        .define("BASISD_SUPPORT_FXT1", "0")
        .define("BASISD_SUPPORT_KTX2_ZSTD", "0") // ZSTD support is added by libktx itself
        .define("KTX_FEATURE_KTX1", "1")
        .define("KTX_FEATURE_KTX2", "1")
        .define("KTX_FEATURE_WRITE", flag(feature_enabled("write")))
        .define("KTX_FEATURE_GL_UPLOAD", "0")
        .define("KTX_FEATURE_VULKAN", "0")
        .define("KTX_OMIT_VULKAN", "1")
        .define(
            "SUPPORT_SOFTWARE_ETC_UNPACK",
            flag(feature_enabled("nonfree-etc-unpack")),
        );

    // Always linked statically; the shim needs libKTX's hidden symbols
    build.define("KHRONOS_STATIC", None);

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    match (target_os.as_str(), target_arch.as_str()) {
        ("windows", _) => {
            build.define("BASISU_NO_ITERATOR_DEBUG_LEVEL", "1");
        }
        ("linux", _) => {
            build.flag("-pthread");
        }
        (_, "wasm32" | "wasm64") => {
            build
                .define("BASISD_SUPPORT_ATC", "0")
                .define("BASISD_SUPPORT_PVRTC2", "0")
                .define("BASISD_SUPPORT_ASTC_HIGHER_OPAQUE_QUALITY", "0");
        }
        _ => (),
    }

    build
}

fn ktx_sources<'a>(rel_paths: &'a [&'a str]) -> impl Iterator<Item = PathBuf> + 'a {
    rel_paths
        .iter()
        .map(|f| [SOURCE_DIR, f].iter().collect::<PathBuf>())
}

fn c_sources() -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = ktx_sources(C_SOURCE_FILES).collect();
    if feature_enabled("write") {
        sources.extend(ktx_sources(C_WRITE_SOURCE_FILES));
    }
    sources
}

fn cxx_sources() -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = ktx_sources(CXX_SOURCE_FILES).collect();
    if feature_enabled("nonfree-etc-unpack") {
        sources.extend(ktx_sources(CXX_NONFREE_SOURCE_FILES));
    }
    sources
}

fn rerun_if_changed(paths: &[PathBuf]) {
    for path in paths {
        println!("cargo:rerun-if-changed={}", path.display());
    }
    // Headers are not listed anywhere, so pick them up by pattern
    for pattern in &[
        "build/KTX-Software/include/*.h",
        "build/KTX-Software/lib/*.h",
    ] {
        if let Ok(headers) = glob(pattern) {
            for header in headers.filter_map(Result::ok) {
                println!("cargo:rerun-if-changed={}", header.display());
            }
        }
    }
}

fn build_native() {
    println!("-- Build the native libKTX");

    let c_sources = c_sources();
    let cxx_sources = cxx_sources();

    configure_build(cc::Build::new())
        .cpp(false)
        .files(c_sources.iter())
        .compile("ktx_c");

    configure_build(cc::Build::new())
        .cpp(true)
        .files(cxx_sources.iter())
        .compile("ktx");

    rerun_if_changed(&c_sources);
    rerun_if_changed(&cxx_sources);
}

fn main() {
    println!("cargo:rerun-if-changed=build/build.rs");
    println!("cargo:rerun-if-changed=build/wrapper.h");

    if feature_enabled("docs-only") {
        println!("-- docs-only: not building libKTX");
        return;
    }

    build_native();

    println!("-- Link the native libKTX to the crate");
    println!("cargo:rustc-link-lib=static=ktx_c");
    println!("cargo:rustc-link-lib=static=ktx");

    #[cfg(feature = "run-bindgen")]
    {
        println!("-- Generate Rust bindings");

        let bindings = bindgen::Builder::default()
            .header(WRAPPER_HEADER)
            .clang_args(INCLUDE_DIRS.iter().map(|dir| format!("-I{}", dir)))
            //
            .opaque_type("FILE")
            .allowlist_function(r"ktx.*")
            .allowlist_type(r"[Kk][Tt][Xx].*")
            .allowlist_var(r"[Kk][Tt][Xx].*")
            // Defined in Rust by `shim.rs`
            .blocklist_function("ktxTexture_CreateFromStream")
            // Defined in Rust by `stream.rs`
            .blocklist_function(r"ktxRustStream_.*")
            //
            .clang_arg("-fparse-all-comments")
            .generate()
            .expect("generating the bindings");

        let mut out_path = PathBuf::from(std::env::var("OUT_DIR").unwrap());
        out_path.push("bindings.rs");
        bindings
            .write_to_file(out_path)
            .expect("writing the generated bindings to file");
    }

    println!("-- All done");
}
