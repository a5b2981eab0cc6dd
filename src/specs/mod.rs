// src/specs/mod.rs
//! # Page specs
//!
//! Page-specific reading rules for saved episode pages. Each spec encodes *where the
//! ground truth lives in the HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML reading** via `core::html` helpers (case-insensitive tag blocks,
//!   class-matched divs with nesting, tag stripping, entity decoding).
//! - **Line-level slicing** of rendered page text into raw round fragments.
//!
//! ## What does **not** live here
//! - **Fetching.** Pages arrive already saved on disk.
//! - **Interpreting rounds.** Fragments go to `showdown::Pipeline` unparsed.
//! - **Persistence.** `store` / `file` own that.
//!
//! ## Typical call chain
//! ```text
//! cli extract → batch::extract_pages → specs::episode::parse_episode
//!                                      ↘ specs::showdowns::extract_blocks
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against inline fixtures; keep selectors resilient to
//! whitespace, attribute order, and harmless markup noise.
pub mod episode;
pub mod showdowns;
