//! A chess endgame tablebase, built by retrograde analysis: start from
//! checkmates and walk backwards to find every position from which the side
//! with the stronger material is guaranteed to force mate. For more
//! information, see
//!
//! - [README] explaining design and implementation goals
//! - [ARCHITECTURE] for an introduction into the codebase and design choices
//!
//! [README]: https://github.com/kirillbobyrev/zugzwang/blob/main/README.md
//! [ARCHITECTURE]: https://github.com/kirillbobyrev/zugzwang/wiki/ARCHITECTURE.md

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
// Performance is extremely important: both building and probing are
// dominated by the number of positions visited.
#![deny(clippy::perf)]

pub mod chess;
pub mod tablebase;

/// Prints information about the host system relevant to build performance.
pub fn print_system_info() {
    println!("word size: {}-bit", usize::BITS);
    println!(
        "available parallelism: {}",
        std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    );
}
