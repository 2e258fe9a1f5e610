//! Theming lookups: size tokens, margins, paper, fonts and accent colors.
//! Everything here is a pure table lookup with a fallback, never an error.

pub mod color;
pub mod font_size;
pub mod fonts;
pub mod margins;
pub mod paper;

pub use color::{text_color_for, Rgb, TextColor};
pub use font_size::{SectionKey, SizeToken};
pub use fonts::{resolve_font, FontChoice};
pub use margins::{MarginPreset, PageMargins};
pub use paper::PaperSize;
