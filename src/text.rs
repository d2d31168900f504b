/// Font selection shared by layout, measurement and rendering.
pub mod font;
/// The wrapping text layout engine and its configuration.
pub mod layout;

pub use font::FontHandle;
pub use layout::{
    GlyphFragment, GlyphPosition, LINE_TERMINATORS, LineBox, TextLayout, TextLayoutConfig,
    TextLayoutLine, WrapStyle,
};
