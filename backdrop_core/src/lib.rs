// Copyright 2026 the Backdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout, motion and mask geometry for ambient page decorations.
//!
//! `backdrop_core` holds everything about the floating-squares decoration
//! that does not touch a browser: the shape layout, the per-frame motion
//! solver, the frame/event state machine that drives them, and the notched
//! outline used to mask testimonial images. It is `no_std` compatible (with
//! `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   ViewportSize ──► layout::generate() ──► Layout (clusters + pair arena)
//!                                              │
//!   PointerState ─┐                            ▼
//!   FrameTick ────┴──► MotionSolver::solve() ──► [PairFrame]
//!                                                    │
//!                                                    ▼
//!                                      Presenter::apply() (backend)
//! ```
//!
//! **[`layout`]**: Deterministic shape placement from the viewport size.
//! Device class picks the scale factor, corner radius, anchors and offset
//! catalog.
//!
//! **[`motion`]**: Ambient drift, pointer parallax, exponential smoothing
//! and the light-only bob, quantized to whole pixels.
//!
//! **[`bridge`]**: [`Bridge`](bridge::Bridge) owns the pointer state, the
//! current layout and the resize debounce, and forwards solver output to a
//! [`Presenter`](backend::Presenter).
//!
//! **[`mask`]**: Rounded-rectangle outline with a bottom-right notch for an
//! overlaid action button.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) hooks with a
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod bridge;
pub mod debounce;
pub mod layout;
pub mod mask;
pub mod motion;
pub mod time;
pub mod trace;
pub mod viewport;
