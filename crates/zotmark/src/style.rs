//! Inline `style` sniffing.
//!
//! The note editor encodes emphasis either with semantic tags or with inline
//! CSS on a `span`. The CSS is never parsed; the presence of a few tokens is
//! enough to pick the Markdown wrapper.

/// Formatting a `span` asks for through its `style` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleIntent {
    /// `background-color` or `highlight`; wins over everything else
    Highlight,
    BoldItalic,
    Bold,
    Italic,
    /// Styled, but with nothing we translate
    Plain,
}

impl StyleIntent {
    /// Classify a style declaration string.
    pub fn from_style(style: &str) -> Self {
        if style.contains("background-color") || style.contains("highlight") {
            return StyleIntent::Highlight;
        }

        let bold = style.contains("bold") || style.contains("font-weight");
        let italic = style.contains("italic") || style.contains("font-style");

        match (bold, italic) {
            (true, true) => StyleIntent::BoldItalic,
            (true, false) => StyleIntent::Bold,
            (false, true) => StyleIntent::Italic,
            (false, false) => StyleIntent::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            StyleIntent::from_style("font-weight:bold;font-style:italic"),
            StyleIntent::BoldItalic
        );
        assert_eq!(StyleIntent::from_style("font-weight:bold"), StyleIntent::Bold);
        assert_eq!(StyleIntent::from_style("font-style:italic"), StyleIntent::Italic);
    }

    #[test]
    fn test_property_name_alone_counts() {
        assert_eq!(StyleIntent::from_style("font-weight: 700"), StyleIntent::Bold);
        assert_eq!(StyleIntent::from_style("font-style: oblique"), StyleIntent::Italic);
    }

    #[test]
    fn test_highlight_takes_precedence() {
        assert_eq!(
            StyleIntent::from_style("background-color: #ffd40080; font-weight: bold"),
            StyleIntent::Highlight
        );
        assert_eq!(StyleIntent::from_style("highlight"), StyleIntent::Highlight);
    }

    #[test]
    fn test_unrecognized_style() {
        assert_eq!(StyleIntent::from_style("color: #ff2020"), StyleIntent::Plain);
        assert_eq!(StyleIntent::from_style("text-decoration: underline"), StyleIntent::Plain);
    }
}
