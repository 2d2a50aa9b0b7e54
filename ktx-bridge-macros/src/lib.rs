// Copyright (C) 2021 Paolo Jovon <paolo.jovon@gmail.com>
// SPDX-License-Identifier: Apache-2.0

use glob::glob;
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use std::{
    collections::{BTreeSet, HashSet},
    path::{Path as FsPath, PathBuf},
};
use syn::{
    self,
    parse::{Parse, ParseStream, Result},
    parse_macro_input,
    punctuated::Punctuated,
    Ident, LitStr, Path, Token,
};

/// `"pattern"` or `!"pattern"`.
struct GlobPattern {
    excluded: bool,
    pattern: LitStr,
}

impl Parse for GlobPattern {
    fn parse(input: ParseStream) -> Result<Self> {
        let excluded = input.parse::<Option<Token![!]>>()?.is_some();
        let pattern = input.parse()?;
        Ok(GlobPattern { excluded, pattern })
    }
}

struct KtxFileTestsInput {
    test_fn: Path,
    patterns: Punctuated<GlobPattern, Token![,]>,
}

impl Parse for KtxFileTestsInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let test_fn = input.parse()?;
        input.parse::<Token![=>]>()?;
        let patterns = input.parse_terminated(GlobPattern::parse)?;
        Ok(KtxFileTestsInput { test_fn, patterns })
    }
}

/// Relative patterns are resolved against the manifest directory of the crate being tested.
fn resolve_pattern(pattern: &str) -> String {
    if FsPath::new(pattern).is_absolute() {
        return pattern.to_owned();
    }
    match std::env::var_os("CARGO_MANIFEST_DIR") {
        Some(dir) => PathBuf::from(dir).join(pattern).to_string_lossy().into_owned(),
        None => pattern.to_owned(),
    }
}

fn matching_files<'a>(patterns: impl Iterator<Item = &'a GlobPattern>) -> HashSet<PathBuf> {
    patterns
        .filter_map(|pattern| glob(&resolve_pattern(&pattern.pattern.value())).ok())
        .flat_map(|paths| paths.filter_map(|path| path.ok()))
        .filter(|path| path.is_file())
        .filter_map(|path| path.canonicalize().ok())
        .collect()
}

fn sanitize_ident(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' => ch.to_ascii_lowercase(),
            _ => '_',
        })
        .collect()
}

/// ```rust,ignore
/// ktx_file_tests!(test_fn => "glob", !"glob", ...);
/// ```
/// For each KTX file matching the given glob pattern[s] (at compile time!), generates a `#[test]` that invokes
/// ```rust,ignore
/// fn test_fn(file: std::fs::File);
/// ```
/// Patterns preceded by `!` exclude their matches. Relative patterns start from the tested crate's
/// `Cargo.toml` directory. Tests are named `<test_fn>__<file name>`, in file path order.
#[proc_macro]
pub fn ktx_file_tests(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as KtxFileTestsInput);

    let included = matching_files(input.patterns.iter().filter(|p| !p.excluded));
    let excluded = matching_files(input.patterns.iter().filter(|p| p.excluded));
    let test_files: BTreeSet<&PathBuf> = included.difference(&excluded).collect();

    let test_fn = &input.test_fn;
    let test_fn_name = match test_fn.segments.last() {
        Some(segment) => segment.ident.to_string(),
        None => {
            return syn::Error::new_spanned(test_fn, "expected a test function path")
                .to_compile_error()
                .into()
        }
    };

    let mut used_names = HashSet::new();
    let tests = test_files.into_iter().map(|path| {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_name = format!("{}__{}", test_fn_name, sanitize_ident(&file_name));
        let mut name = base_name.clone();
        let mut suffix = 1;
        while !used_names.insert(name.clone()) {
            suffix += 1;
            name = format!("{}_{}", base_name, suffix);
        }
        let fn_ident = Ident::new(&name, Span::call_site());
        let path_str = path.to_string_lossy().into_owned();

        quote! {
            #[test]
            #[allow(non_snake_case)]
            fn #fn_ident() {
                println!(">>> Test file: {} <<<", #path_str);
                match std::fs::File::open(#path_str) {
                    Ok(file) => #test_fn(file),
                    Err(err) => panic!("Error opening test file: {}: {}", #path_str, err),
                }
            }
        }
    });

    quote!(#(#tests)*).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(sanitize_ident("rgba-reference.ktx2"), "rgba_reference_ktx2");
        assert_eq!(sanitize_ident("Cube Map.KTX"), "cube_map_ktx");
    }

    #[test]
    fn absolute_patterns_are_kept() {
        let absolute = if cfg!(windows) { r"C:\textures\*.ktx" } else { "/textures/*.ktx" };
        assert_eq!(resolve_pattern(absolute), absolute);
    }
}
