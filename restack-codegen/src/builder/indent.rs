//! Indentation of emitted code.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the given width.
    Spaces(u8),
    Tab,
}

impl Indent {
    /// Tab indentation, as `gofmt` writes it.
    pub const GO: Self = Self::Tab;
    /// Indentation for a configured width, tabs when unset.
    pub fn from_width(width: Option<u8>) -> Self {
        match width {
            None | Some(0) => Self::Tab,
            Some(width) => Self::Spaces(width),
        }
    }

    /// Push `level` indentation units onto `buffer`.
    pub fn write(&self, buffer: &mut String, level: usize) {
        match self {
            Self::Tab => buffer.extend(std::iter::repeat_n('\t', level)),
            Self::Spaces(width) => {
                buffer.extend(std::iter::repeat_n(' ', level * usize::from(*width)))
            }
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::GO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indented(indent: Indent, level: usize) -> String {
        let mut buffer = String::new();
        indent.write(&mut buffer, level);
        buffer
    }

    #[test]
    fn test_write_levels() {
        assert_eq!(indented(Indent::Tab, 2), "\t\t");
        assert_eq!(indented(Indent::Spaces(2), 3), "      ");
        assert_eq!(indented(Indent::Spaces(4), 0), "");
    }

    #[test]
    fn test_from_width() {
        assert_eq!(Indent::from_width(None), Indent::Tab);
        assert_eq!(Indent::from_width(Some(0)), Indent::Tab);
        assert_eq!(Indent::from_width(Some(2)), Indent::Spaces(2));
    }

    #[test]
    fn test_default() {
        assert_eq!(Indent::default(), Indent::GO);
    }
}
