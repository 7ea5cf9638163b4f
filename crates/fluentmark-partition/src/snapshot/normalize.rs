use std::fmt;

use serde::Serialize;

use crate::partition::TypedRegion;

#[derive(Debug, Serialize)]
pub struct Snap {
    pub regions: Vec<RegionSnap>,
}

#[derive(Debug, Serialize)]
pub struct RegionSnap {
    pub kind: &'static str,
    pub span: (usize, usize),
    pub text: String,
}

/// Extracts text for `offset..end`, truncating to at most `max` bytes with a
/// "..." suffix if needed. Truncation never splits a character.
pub fn preview(text: &str, offset: usize, end: usize, max: usize) -> String {
    let mut s = text[offset..end].to_string();
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

pub fn normalize(text: &str, regions: &[TypedRegion]) -> Snap {
    let regions = regions
        .iter()
        .map(|r| RegionSnap {
            kind: r.content_type.name(),
            span: (r.offset, r.end()),
            text: preview(text, r.offset, r.end(), 60),
        })
        .collect();
    Snap { regions }
}

/// One line per region: `kind start..end "text"`.
impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in &self.regions {
            writeln!(
                f,
                "{} {}..{} {:?}",
                region.kind, region.span.0, region.span.1, region.text
            )?;
        }
        Ok(())
    }
}
