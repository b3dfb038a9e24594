#![forbid(unsafe_code)]

//! Color modes, variants, and palette derivation.
//!
//! A palette is the union of two disjoint halves: the neutrals owned by the
//! [`ColorMode`] (background, surface, text, muted, border) and the accents
//! owned by the [`ThemeVariant`] (primary, secondary, accent). Because the
//! halves never overlap, every `(mode, variant)` pair resolves to a complete
//! [`Palette`].

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returned when a persisted or host-supplied name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseThemeError {
    kind: &'static str,
    value: String,
}

/// Brightness axis of the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub const ALL: [ColorMode; 2] = [ColorMode::Light, ColorMode::Dark];

    /// Stable lowercase name, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Neutral half of the palette for this mode.
    #[must_use]
    pub const fn neutrals(self) -> Neutrals {
        match self {
            Self::Light => Neutrals {
                background: Rgb::from_hex(0xffffff),
                surface: Rgb::from_hex(0xf8fafc),
                text: Rgb::from_hex(0x0f172a),
                muted: Rgb::from_hex(0x64748b),
                border: Rgb::from_hex(0xe2e8f0),
            },
            Self::Dark => Neutrals {
                background: Rgb::from_hex(0x0f172a),
                surface: Rgb::from_hex(0x1e293b),
                text: Rgb::from_hex(0xf1f5f9),
                muted: Rgb::from_hex(0x94a3b8),
                border: Rgb::from_hex(0x334155),
            },
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseThemeError {
                kind: "color mode",
                value: other.to_owned(),
            }),
        }
    }
}

/// Named accent scheme, independent of brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThemeVariant {
    #[default]
    Modern,
    Elegant,
    Nature,
    Tech,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 4] = [
        ThemeVariant::Modern,
        ThemeVariant::Elegant,
        ThemeVariant::Nature,
        ThemeVariant::Tech,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Elegant => "elegant",
            Self::Nature => "nature",
            Self::Tech => "tech",
        }
    }

    /// Accent half of the palette for this variant.
    #[must_use]
    pub const fn accents(self) -> Accents {
        match self {
            Self::Modern => Accents {
                primary: Rgb::from_hex(0x0098ff),
                secondary: Rgb::from_hex(0x4f7db5),
                accent: Rgb::from_hex(0xd946ef),
            },
            Self::Elegant => Accents {
                primary: Rgb::from_hex(0x6366f1),
                secondary: Rgb::from_hex(0x3f3f46),
                accent: Rgb::from_hex(0xec4899),
            },
            Self::Nature => Accents {
                primary: Rgb::from_hex(0x059669),
                secondary: Rgb::from_hex(0x0d9488),
                accent: Rgb::from_hex(0xca8a04),
            },
            Self::Tech => Accents {
                primary: Rgb::from_hex(0x2563eb),
                secondary: Rgb::from_hex(0x1e293b),
                accent: Rgb::from_hex(0x7c3aed),
            },
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeVariant {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| ParseThemeError {
                kind: "theme variant",
                value: s.trim().to_owned(),
            })
    }
}

/// 24-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From `0xRRGGBB`.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// Formats as lowercase `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mode-owned half of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neutrals {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub border: Rgb,
}

/// Variant-owned half of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accents {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
}

/// The eight palette slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKey {
    Primary,
    Secondary,
    Accent,
    Background,
    Surface,
    Text,
    Muted,
    Border,
}

impl PaletteKey {
    pub const ALL: [PaletteKey; 8] = [
        PaletteKey::Primary,
        PaletteKey::Secondary,
        PaletteKey::Accent,
        PaletteKey::Background,
        PaletteKey::Surface,
        PaletteKey::Text,
        PaletteKey::Muted,
        PaletteKey::Border,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::Muted => "muted",
            Self::Border => "border",
        }
    }

    /// CSS custom property the slot is published under.
    #[must_use]
    pub const fn css_var(self) -> &'static str {
        match self {
            Self::Primary => "--color-primary",
            Self::Secondary => "--color-secondary",
            Self::Accent => "--color-accent",
            Self::Background => "--color-background",
            Self::Surface => "--color-surface",
            Self::Text => "--color-text",
            Self::Muted => "--color-muted",
            Self::Border => "--color-border",
        }
    }
}

/// Fully resolved colors for one `(mode, variant)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub border: Rgb,
}

impl Palette {
    /// Union of the two disjoint halves.
    #[must_use]
    pub const fn compose(neutrals: Neutrals, accents: Accents) -> Self {
        Self {
            primary: accents.primary,
            secondary: accents.secondary,
            accent: accents.accent,
            background: neutrals.background,
            surface: neutrals.surface,
            text: neutrals.text,
            muted: neutrals.muted,
            border: neutrals.border,
        }
    }

    #[must_use]
    pub const fn get(&self, key: PaletteKey) -> Rgb {
        match key {
            PaletteKey::Primary => self.primary,
            PaletteKey::Secondary => self.secondary,
            PaletteKey::Accent => self.accent,
            PaletteKey::Background => self.background,
            PaletteKey::Surface => self.surface,
            PaletteKey::Text => self.text,
            PaletteKey::Muted => self.muted,
            PaletteKey::Border => self.border,
        }
    }

    /// Slots in [`PaletteKey::ALL`] order.
    pub fn entries(&self) -> impl Iterator<Item = (PaletteKey, Rgb)> + '_ {
        PaletteKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

/// Resolve the palette for `mode` and `variant`. Pure.
#[must_use]
pub const fn palette(mode: ColorMode, variant: ThemeVariant) -> Palette {
    Palette::compose(mode.neutrals(), variant.accents())
}
