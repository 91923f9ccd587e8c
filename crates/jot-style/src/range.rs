#![forbid(unsafe_code)]

use bitflags::bitflags;

bitflags! {
    /// Font attributes carried by a styled span.
    ///
    /// The two low bits match the `fontStyle` bitmask used by saved sessions
    /// (`1 = bold`, `2 = italic`); underline and strikeout are stored as
    /// separate columns there.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold weight.
        const BOLD      = 0b0001;
        /// Italic slant.
        const ITALIC    = 0b0010;
        /// Single underline.
        const UNDERLINE = 0b0100;
        /// Strikethrough line.
        const STRIKEOUT = 0b1000;
    }
}

impl StyleFlags {
    /// Mask of the flags encoded in the session `fontStyle` column.
    pub const FONT_STYLE_MASK: Self = Self::BOLD.union(Self::ITALIC);

    /// The `fontStyle` bitmask (bold/italic only).
    #[must_use]
    pub const fn font_style_bits(self) -> u8 {
        self.intersection(Self::FONT_STYLE_MASK).bits()
    }

    /// Build flags from a `fontStyle` bitmask plus the two boolean columns.
    ///
    /// Unknown bits in `font_style` are ignored.
    #[must_use]
    pub const fn from_columns(font_style: u8, underline: bool, strikeout: bool) -> Self {
        let mut flags = Self::from_bits_truncate(font_style).intersection(Self::FONT_STYLE_MASK);
        if underline {
            flags = flags.union(Self::UNDERLINE);
        }
        if strikeout {
            flags = flags.union(Self::STRIKEOUT);
        }
        flags
    }
}

/// A contiguous span of note text sharing one set of [`StyleFlags`].
///
/// A range with no flags is semantically absent; [`StyleSet`](crate::StyleSet)
/// never stores one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleRange {
    /// First byte covered by the span.
    pub start: usize,
    /// Number of bytes covered.
    pub length: usize,
    /// Attributes applied to the span.
    pub flags: StyleFlags,
}

impl StyleRange {
    /// Create a range.
    #[must_use]
    pub const fn new(start: usize, length: usize, flags: StyleFlags) -> Self {
        Self {
            start,
            length,
            flags,
        }
    }

    /// One past the last covered byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    /// True when the range covers nothing or carries no flags.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        self.length == 0 || self.flags.is_empty()
    }

    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }

    #[must_use]
    pub const fn is_italic(&self) -> bool {
        self.flags.contains(StyleFlags::ITALIC)
    }

    #[must_use]
    pub const fn is_underline(&self) -> bool {
        self.flags.contains(StyleFlags::UNDERLINE)
    }

    #[must_use]
    pub const fn is_strikeout(&self) -> bool {
        self.flags.contains(StyleFlags::STRIKEOUT)
    }

    /// True if `offset` lies inside the range.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Size in bytes for memory accounting.
    #[must_use]
    pub const fn size_bytes() -> usize {
        std::mem::size_of::<Self>()
    }
}
