use std::sync::Arc;

use crate::{
    document::{Span, TextEdit},
    partition::{ContentType, Partitioner, TypedRegion, scanner::ScannedRegion},
};

/// The partitioning of one document, kept current across edits.
///
/// Alongside each region the lookahead horizon of the scan that produced it
/// is kept. After an edit at offset `d`, every region whose horizon stays at
/// or before `d` is provably unaffected, so re-scanning starts at the first
/// region whose horizon passes `d`. Scanning then continues past the edit
/// until it produces a token at the (shifted) start of an old token of the
/// same type, and the old regions from there on are reused.
#[derive(Debug)]
pub struct DocumentPartitioning {
    partitioner: Arc<Partitioner>,
    regions: Vec<TypedRegion>,
    horizons: Vec<usize>,
    computed: bool,
}

impl DocumentPartitioning {
    pub fn new(partitioner: Arc<Partitioner>) -> Self {
        Self {
            partitioner,
            regions: Vec::new(),
            horizons: Vec::new(),
            computed: false,
        }
    }

    pub fn partitioner(&self) -> &Arc<Partitioner> {
        &self.partitioner
    }

    /// Regions of `text`, computing them on first use.
    pub fn regions(&mut self, text: &str) -> &[TypedRegion] {
        if !self.computed {
            self.compute(text);
        }
        &self.regions
    }

    /// Regions computed so far, if any.
    pub fn current_regions(&self) -> Option<&[TypedRegion]> {
        self.computed.then_some(self.regions.as_slice())
    }

    /// The region containing `offset`. The end of the document belongs to the
    /// last region.
    pub fn region_at(&self, offset: usize) -> Option<&TypedRegion> {
        let index = self.regions.partition_point(|region| region.end() <= offset);
        self.regions
            .get(index)
            .or_else(|| self.regions.last().filter(|last| last.end() == offset))
    }

    /// Discards all regions and scans `text` from scratch.
    pub fn compute(&mut self, text: &str) {
        let scanned = self.partitioner.scan(text, 0, text.len());
        self.store(scanned);
        self.computed = true;
        log::debug!(
            "{}: full partition, {} regions",
            self.partitioner.partitioning_id(),
            self.regions.len()
        );
    }

    pub(crate) fn document_changed(&mut self, text: &str, edit: TextEdit) {
        if self.computed {
            self.repartition(text, edit);
        }
    }

    /// Updates the regions after `edit` turned the old text into `text`.
    /// Returns the span of `text` whose regions were re-scanned.
    pub fn repartition(&mut self, text: &str, edit: TextEdit) -> Span {
        if !self.computed {
            self.compute(text);
            return Span::new(0, text.len());
        }

        // horizons are not monotonic: a failed rule may look far ahead
        let first_dirty = self
            .horizons
            .iter()
            .position(|horizon| *horizon > edit.offset)
            .unwrap_or(self.horizons.len());
        let restart = self
            .regions
            .get(first_dirty)
            .map_or(edit.offset, |region| region.offset);

        // old tokens past the edit, in new coordinates
        let reusable: Vec<(usize, ContentType, usize)> = self
            .regions
            .iter()
            .enumerate()
            .skip(first_dirty)
            .filter(|(_, region)| {
                region.offset >= edit.old_end() && !region.content_type.is_default()
            })
            .map(|(index, region)| (edit.shift(region.offset), region.content_type, index))
            .collect();

        let mut scanner = self.partitioner.scanner(text);
        scanner.set_range(restart, text.len() - restart);

        let mut fresh: Vec<ScannedRegion> = Vec::new();
        let mut candidates = reusable.iter().peekable();
        let mut resync: Option<usize> = None;
        while let Some(scanned) = scanner.next_scanned() {
            let region = scanned.region;
            if region.offset >= edit.new_end() && !region.content_type.is_default() {
                while candidates.next_if(|(offset, _, _)| *offset < region.offset).is_some() {}
                if let Some(&&(offset, content_type, index)) = candidates.peek()
                    && offset == region.offset
                    && content_type == region.content_type
                {
                    resync = Some(index);
                    break;
                }
            }
            fresh.push(scanned);
        }

        let changed = Span::new(restart, fresh.last().map_or(restart, |last| last.region.end()));

        let mut tail: Vec<ScannedRegion> = match resync {
            Some(index) => self.regions[index..]
                .iter()
                .zip(&self.horizons[index..])
                .map(|(region, horizon)| ScannedRegion {
                    region: TypedRegion::new(edit.shift(region.offset), region.length, region.content_type),
                    horizon: edit.shift(*horizon),
                })
                .collect(),
            None => Vec::new(),
        };

        let mut merged: Vec<ScannedRegion> = self.regions[..first_dirty]
            .iter()
            .zip(&self.horizons[..first_dirty])
            .map(|(region, horizon)| ScannedRegion {
                region: *region,
                horizon: *horizon,
            })
            .collect();
        merged.append(&mut fresh);
        merged.append(&mut tail);
        self.store(merged);

        log::debug!(
            "{}: re-scanned {}..{} after edit at {} ({} regions, resync {})",
            self.partitioner.partitioning_id(),
            changed.start,
            changed.end,
            edit.offset,
            self.regions.len(),
            resync.is_some()
        );
        changed
    }

    fn store(&mut self, scanned: Vec<ScannedRegion>) {
        let mut regions = Vec::with_capacity(scanned.len());
        let mut horizons: Vec<usize> = Vec::with_capacity(scanned.len());
        for ScannedRegion { region, horizon } in scanned {
            if let Some(previous) = regions.last_mut().filter(|previous: &&mut TypedRegion| {
                previous.content_type.is_default()
                    && region.content_type.is_default()
                    && previous.end() == region.offset
            }) {
                previous.length += region.length;
                if let Some(last) = horizons.last_mut() {
                    *last = (*last).max(horizon);
                }
            } else {
                regions.push(region);
                horizons.push(horizon);
            }
        }
        self.regions = regions;
        self.horizons = horizons;
    }
}
