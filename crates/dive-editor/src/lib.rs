//! # dive-editor — Editor core for dive
//!
//! Sits on top of `dive-term` and turns a raw terminal into a screen editor:
//!
//! - **[`config`]** — product name, version, and the quit chord
//! - **[`position`]** — 0-indexed cursor `Position`
//! - **[`state`]** — `EditorState`: cursor, window size, and the raw-mode terminal
//! - **[`render`]** — builds one frame into an append buffer and flushes it
//! - **[`keymap`]** — reads a key and dispatches it
//! - **[`editor`]** — the render-then-read loop
//!
//! There is no text buffer yet. The renderer takes a [`render::RowRenderer`]
//! and the dispatcher a [`keymap::KeyHandler`], so a document model and a
//! command set can be plugged in without touching the frame or loop logic.

pub mod config;
pub mod editor;
pub mod keymap;
pub mod position;
pub mod render;
pub mod state;
