use crate::partition::TypedRegion;

/// Panics unless `regions` partition `range` of `text`: non-empty regions in
/// order, each starting where the previous one ended, on char boundaries,
/// with no two adjacent default regions.
pub fn check(text: &str, range: std::ops::Range<usize>, regions: &[TypedRegion]) {
    let mut expected = range.start;
    for pair in regions.windows(2) {
        assert!(
            !(pair[0].content_type.is_default() && pair[1].content_type.is_default()),
            "adjacent default regions: {:?}, {:?}",
            pair[0],
            pair[1]
        );
    }
    for r in regions {
        assert!(r.length > 0, "empty region: {r:?}");
        assert_eq!(r.offset, expected, "gap or overlap before {r:?}");
        assert!(
            text.is_char_boundary(r.offset) && text.is_char_boundary(r.end()),
            "region splits a character: {r:?}"
        );
        expected = r.end();
    }
    assert_eq!(
        expected, range.end,
        "regions end at {expected}, range ends at {}",
        range.end
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::ContentType;

    #[test]
    fn accepts_a_proper_partitioning() {
        check(
            "ab`c`",
            0..5,
            &[
                TypedRegion::new(0, 2, ContentType::Default),
                TypedRegion::new(2, 3, ContentType::CodeSpan),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "gap or overlap")]
    fn rejects_gaps() {
        check(
            "ab`c`",
            0..5,
            &[
                TypedRegion::new(0, 1, ContentType::Default),
                TypedRegion::new(2, 3, ContentType::CodeSpan),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "adjacent default regions")]
    fn rejects_adjacent_defaults() {
        check(
            "abcd",
            0..4,
            &[
                TypedRegion::new(0, 2, ContentType::Default),
                TypedRegion::new(2, 2, ContentType::Default),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "range ends at 5")]
    fn rejects_short_coverage() {
        check("ab`c`", 0..5, &[TypedRegion::new(0, 2, ContentType::Default)]);
    }
}
