//! Composing and decomposing concrete face names.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Structured form of a concrete face name such as `LiberationSans-BoldItalic`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Family, e.g. `Liberation`.
    pub typeface: String,
    /// Sub-family, e.g. `Sans`, `Serif` or `Mono`. May be empty.
    pub variant: String,
    pub style: FontStyle,
    pub weight: FontWeight,
}

impl FontDescriptor {
    pub fn new(typeface: &str, variant: &str, style: FontStyle, weight: FontWeight) -> Self {
        FontDescriptor {
            typeface: typeface.to_string(),
            variant: variant.to_string(),
            style,
            weight,
        }
    }

    /// `Regular`, `Bold`, `Italic` or `BoldItalic`.
    pub fn suffix(&self) -> &'static str {
        match (self.weight, self.style) {
            (FontWeight::Bold, FontStyle::Italic) => "BoldItalic",
            (FontWeight::Bold, FontStyle::Normal) => "Bold",
            (FontWeight::Normal, FontStyle::Italic) => "Italic",
            (FontWeight::Normal, FontStyle::Normal) => "Regular",
        }
    }

    /// The concrete face name, also the face file stem.
    pub fn name(&self) -> String {
        format!("{}{}-{}", self.typeface, self.variant, self.suffix())
    }

    /// Split a concrete name back into its parts.
    ///
    /// The family/variant boundary is the last interior capital letter, so
    /// `LiberationSans` splits into `Liberation` and `Sans`.
    pub fn parse(name: &str) -> Option<FontDescriptor> {
        let (family, suffix) = name.rsplit_once('-')?;
        let (style, weight) = match suffix {
            "Regular" => (FontStyle::Normal, FontWeight::Normal),
            "Bold" => (FontStyle::Normal, FontWeight::Bold),
            "Italic" => (FontStyle::Italic, FontWeight::Normal),
            "BoldItalic" => (FontStyle::Italic, FontWeight::Bold),
            _ => return None,
        };
        if family.is_empty() {
            return None;
        }
        let split = family
            .char_indices()
            .skip(1)
            .filter(|(_, c)| c.is_ascii_uppercase())
            .map(|(i, _)| i)
            .last()
            .unwrap_or(family.len());
        let (typeface, variant) = family.split_at(split);
        Some(FontDescriptor::new(typeface, variant, style, weight))
    }

    /// Generic CSS family matching the variant.
    pub fn generic_family(&self) -> &'static str {
        match self.variant.as_str() {
            "Sans" => "sans-serif",
            "Mono" => "monospace",
            _ => "serif",
        }
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_bold_italic() {
        let d = FontDescriptor::new("Liberation", "Sans", FontStyle::Italic, FontWeight::Bold);
        assert_eq!(d.name(), "LiberationSans-BoldItalic");
        let d = FontDescriptor { weight: FontWeight::Normal, style: FontStyle::Normal, ..d };
        assert_eq!(d.to_string(), "LiberationSans-Regular");
    }

    #[test]
    fn parse_round_trips() {
        let names = [
            "LiberationSerif-Italic",
            "LiberationMono-Bold",
            "LiberationSans-BoldItalic",
            "Plain-Regular",
        ];
        for name in names {
            assert_eq!(FontDescriptor::parse(name).map(|d| d.name()).as_deref(), Some(name));
        }
        let d = FontDescriptor::parse("LiberationMono-Bold").unwrap();
        assert_eq!((d.typeface.as_str(), d.variant.as_str()), ("Liberation", "Mono"));
        assert_eq!(d.generic_family(), "monospace");
    }

    #[test]
    fn parse_rejects_other_names() {
        assert_eq!(FontDescriptor::parse("Times-Roman"), None);
        assert_eq!(FontDescriptor::parse("Helvetica"), None);
        assert_eq!(FontDescriptor::parse("-Bold"), None);
    }
}
