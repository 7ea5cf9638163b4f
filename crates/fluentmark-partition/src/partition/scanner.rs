use crate::{
    partition::{ContentType, TypedRegion},
    rules::Rule,
    scanner::CharacterScanner,
};

/// A region together with the end of the text examined while producing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScannedRegion {
    pub region: TypedRegion,
    pub horizon: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Accumulating text no rule matched.
    ScanningDefault,
    /// A rule matched; its token is emitted once the pending default run is.
    InRuleMatch,
}

/// Tries each rule in order at every position. The first rule that matches
/// produces a token; characters no rule matches are gathered into default
/// regions that end where the next token begins.
pub struct PartitionScanner<'a> {
    rules: &'a [Rule<ContentType>],
    scanner: CharacterScanner<'a>,
    state: ScanState,
    /// Token matched right after a default run, emitted on the next call.
    queued: Option<ScannedRegion>,
}

impl<'a> PartitionScanner<'a> {
    pub fn new(rules: &'a [Rule<ContentType>], text: &'a str) -> Self {
        Self {
            rules,
            scanner: CharacterScanner::new(text),
            state: ScanState::ScanningDefault,
            queued: None,
        }
    }

    /// Restarts scanning at `offset` over `length` bytes.
    pub fn set_range(&mut self, offset: usize, length: usize) {
        self.scanner.set_range(offset, length);
        self.state = ScanState::ScanningDefault;
        self.queued = None;
    }

    /// Restarts scanning inside a known partition. When the partition is not
    /// default content and began before `offset`, scanning restarts at the
    /// partition start so the construct is recognized as a whole.
    pub fn set_partial_range(
        &mut self,
        offset: usize,
        length: usize,
        content_type: ContentType,
        partition_offset: usize,
    ) {
        if !content_type.is_default() && partition_offset < offset {
            self.set_range(partition_offset, length + (offset - partition_offset));
        } else {
            self.set_range(offset, length);
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Offset the next token would start at.
    pub fn offset(&self) -> usize {
        self.queued
            .map_or(self.scanner.offset(), |queued| queued.region.offset)
    }

    pub fn next_token(&mut self) -> Option<TypedRegion> {
        self.next_scanned().map(|scanned| scanned.region)
    }

    pub(crate) fn next_scanned(&mut self) -> Option<ScannedRegion> {
        if let Some(queued) = self.queued.take() {
            self.state = ScanState::InRuleMatch;
            return Some(queued);
        }

        // start and horizon of the default run being gathered
        let mut pending: Option<(usize, usize)> = None;
        loop {
            let start = self.scanner.offset();
            if self.scanner.at_eof() {
                self.state = ScanState::ScanningDefault;
                return pending.map(|(from, horizon)| ScannedRegion {
                    region: TypedRegion::new(from, start - from, ContentType::Default),
                    horizon,
                });
            }

            self.scanner.reset_horizon();
            let matched = self
                .rules
                .iter()
                .find_map(|rule| rule.evaluate(&mut self.scanner));
            if let Some(content_type) = matched
                && self.scanner.offset() > start
            {
                let token = ScannedRegion {
                    region: TypedRegion::new(start, self.scanner.offset() - start, content_type),
                    horizon: self.scanner.horizon(),
                };
                return match pending {
                    Some((from, horizon)) => {
                        self.queued = Some(token);
                        Some(ScannedRegion {
                            region: TypedRegion::new(from, start - from, ContentType::Default),
                            horizon,
                        })
                    }
                    None => {
                        self.state = ScanState::InRuleMatch;
                        Some(token)
                    }
                };
            }

            self.scanner.read();
            let horizon = self.scanner.horizon();
            pending = Some(match pending {
                Some((from, seen)) => (from, seen.max(horizon)),
                None => (start, horizon),
            });
            self.state = ScanState::ScanningDefault;
        }
    }
}

impl Iterator for PartitionScanner<'_> {
    type Item = TypedRegion;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CodeSpanRule, DelimitedRule};
    use pretty_assertions::assert_eq;

    fn rules() -> Vec<Rule<ContentType>> {
        vec![
            DelimitedRule::multi_line("<!--", "-->", ContentType::Comment)
                .with_escape('\\')
                .into(),
            CodeSpanRule::new(ContentType::CodeSpan).into(),
        ]
    }

    #[test]
    fn gathers_default_runs_between_tokens() {
        let rules = rules();
        let regions: Vec<_> = PartitionScanner::new(&rules, "a `b` <!--c--> d").collect();
        assert_eq!(
            regions,
            vec![
                TypedRegion::new(0, 2, ContentType::Default),
                TypedRegion::new(2, 3, ContentType::CodeSpan),
                TypedRegion::new(5, 1, ContentType::Default),
                TypedRegion::new(6, 8, ContentType::Comment),
                TypedRegion::new(14, 2, ContentType::Default),
            ]
        );
    }

    #[test]
    fn adjacent_tokens_have_no_default_between() {
        let rules = rules();
        let regions: Vec<_> = PartitionScanner::new(&rules, "`a``b`").collect();
        assert_eq!(
            regions,
            vec![
                TypedRegion::new(0, 3, ContentType::CodeSpan),
                TypedRegion::new(3, 3, ContentType::CodeSpan),
            ]
        );
    }

    #[test]
    fn empty_text_yields_nothing() {
        let rules = rules();
        assert_eq!(PartitionScanner::new(&rules, "").next_token(), None);
    }

    #[test]
    fn state_follows_emitted_tokens() {
        let rules = rules();
        let mut scanner = PartitionScanner::new(&rules, "x`y`");
        assert_eq!(scanner.state(), ScanState::ScanningDefault);
        assert_eq!(scanner.next_token().map(|r| r.content_type), Some(ContentType::Default));
        assert_eq!(scanner.offset(), 1);
        assert_eq!(scanner.next_token().map(|r| r.content_type), Some(ContentType::CodeSpan));
        assert_eq!(scanner.state(), ScanState::InRuleMatch);
        assert_eq!(scanner.next_token(), None);
    }

    #[test]
    fn set_range_limits_scanning() {
        let rules = rules();
        let mut scanner = PartitionScanner::new(&rules, "ab `c` de");
        scanner.set_range(3, 3);
        let regions: Vec<_> = scanner.collect();
        assert_eq!(regions, vec![TypedRegion::new(3, 3, ContentType::CodeSpan)]);
    }

    #[test]
    fn partial_range_restarts_at_partition_start() {
        let rules = rules();
        let text = "x <!-- long comment --> y";
        let mut scanner = PartitionScanner::new(&rules, text);
        scanner.set_partial_range(10, text.len() - 10, ContentType::Comment, 2);
        assert_eq!(scanner.next_token(), Some(TypedRegion::new(2, 21, ContentType::Comment)));

        scanner.set_partial_range(10, text.len() - 10, ContentType::Default, 2);
        assert_eq!(scanner.offset(), 10);
    }

    #[test]
    fn horizon_covers_failed_lookahead() {
        let rules = rules();
        let text = "<!-- open\n`a`";
        let mut scanner = PartitionScanner::new(&rules, text);
        let first = scanner.next_scanned().unwrap();
        // the unterminated comment looked to the end of the text
        assert_eq!(first.region, TypedRegion::new(0, 10, ContentType::Default));
        assert_eq!(first.horizon, text.len() + 1);
    }
}
