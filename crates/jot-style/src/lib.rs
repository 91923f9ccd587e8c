#![forbid(unsafe_code)]

//! Style vocabulary for jot notes.
//!
//! # Role in jot
//! `jot-style` is the shared data model for everything that decorates note
//! text: per-span font flags and per-line bullets. The history engine
//! snapshots these values before every change, and the host persists them
//! between sessions, so the types here are plain owned data with no
//! dependency on any editing surface.
//!
//! # This crate provides
//! - [`StyleFlags`] and [`StyleRange`] for one styled span.
//! - [`StyleSet`], the sorted, non-overlapping collection for a buffer.
//! - [`BulletLines`], the set of lines carrying a bullet.
//! - [`codec`] with lenient CSV serialization for saved sessions.
//!
//! # Offsets
//! All offsets and lengths are UTF-8 byte offsets into the note text.

/// Bullet-line state.
pub mod bullets;
/// Session CSV codecs for styles and bullets.
pub mod codec;
/// Single styled spans and their flags.
pub mod range;
/// Normalized style collections.
pub mod set;

pub use bullets::BulletLines;
pub use codec::{
    Decoded, SEPARATOR, decode_bullets, decode_styles, deserialize_bullets, deserialize_styles,
    serialize_bullets, serialize_styles,
};
pub use range::{StyleFlags, StyleRange};
pub use set::StyleSet;
