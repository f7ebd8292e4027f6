use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::error::{ChartError, ChartResult};

/// Category → color mapping by first-occurrence index.
///
/// Domains larger than the palette cycle through it again, so category
/// `palette.len()` shares the first color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale {
    domain: IndexSet<String>,
    palette: Vec<Color>,
}

impl OrdinalScale {
    pub fn new<I, S>(domain: I, palette: &[Color]) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if palette.is_empty() {
            return Err(ChartError::InvalidScale {
                kind: "ordinal",
                reason: "palette must not be empty".to_owned(),
            });
        }
        Ok(Self {
            domain: domain.into_iter().map(Into::into).collect(),
            palette: palette.to_vec(),
        })
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.domain.get_index_of(category)
    }

    /// Color of `category`; categories outside the domain have none.
    #[must_use]
    pub fn map(&self, category: &str) -> Option<Color> {
        self.index_of(category)
            .map(|index| self.palette[index % self.palette.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::OrdinalScale;
    use crate::core::color::{Color, SCHEME_SET2};

    #[test]
    fn duplicate_categories_keep_first_index() {
        let scale = OrdinalScale::new(["AI", "Cloud", "AI", "Chips"], &SCHEME_SET2)
            .expect("ordinal scale");
        let domain: Vec<&str> = scale.domain().collect();
        assert_eq!(domain, ["AI", "Cloud", "Chips"]);
        assert_eq!(scale.map("Chips"), Some(SCHEME_SET2[2]));
        assert_eq!(scale.map("Quantum"), None);
    }

    #[test]
    fn domain_beyond_palette_cycles() {
        let palette = [Color::RED, Color::GREEN];
        let scale = OrdinalScale::new(["a", "b", "c", "d", "e"], &palette).expect("ordinal scale");
        assert_eq!(scale.map("c"), Some(Color::RED));
        assert_eq!(scale.map("d"), Some(Color::GREEN));
        assert_eq!(scale.map("e"), Some(Color::RED));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(OrdinalScale::new(["a"], &[]).is_err());
    }
}
