use fluentmark_partition::{
    ContentType, Document, PartitionError, PartitionerRegistry, PartitioningId, TypedRegion,
    snapshot,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn open(text: &str) -> Document {
    let _ = env_logger::builder().is_test(true).try_init();
    let registry = PartitionerRegistry::default();
    let mut document = Document::new(text);
    document.setup_partitioner(registry.markdown());
    document.setup_partitioner(registry.plantuml());
    document
}

/// The incremental regions of every partitioning must match a full scan.
fn assert_matches_full_scan(document: &mut Document) {
    let text = document.text().into_owned();
    let registry = PartitionerRegistry::default();
    for id in PartitioningId::ALL {
        let incremental: Vec<TypedRegion> = document.compute_partitioning(id).unwrap().to_vec();
        snapshot::invariants(&text, 0..text.len(), &incremental);
        assert_eq!(
            incremental,
            registry.get(id).partition_text(&text),
            "{id} diverged on {text:?}"
        );
    }
}

/// Small deterministic generator so the edit sequence is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

const FRAGMENTS: &[&str] = &[
    "`", "```", "~~~\n", "\n", "\n\n", "    ", "<!--", "-->", "$", "$$", "---\n", "\\", "'",
    "/'", "'/", "<div>\n", "digraph {", "}", "@startuml\n", "@enduml", "![x](a.puml)", "x",
];

#[test]
fn random_edits_match_full_scan() {
    let mut document = open(&fixture("sample.md"));
    assert_matches_full_scan(&mut document);

    let mut rng = Lcg(7);
    for _ in 0..300 {
        let len = document.len();
        let start = rng.next(len + 1);
        let deleted = if rng.next(3) == 0 { rng.next(8).min(len - start) } else { 0 };
        let inserted = FRAGMENTS[rng.next(FRAGMENTS.len())];
        document.replace(start..start + deleted, inserted).unwrap();
        assert_matches_full_scan(&mut document);
    }
}

#[test]
fn typing_a_document_character_by_character() {
    let target = fixture("sample.md");
    let mut document = open("");
    assert_matches_full_scan(&mut document);
    for (offset, c) in target.char_indices() {
        let mut buf = [0u8; 4];
        document.replace(offset..offset, c.encode_utf8(&mut buf)).unwrap();
        assert_matches_full_scan(&mut document);
    }
    assert_eq!(document.text(), target);
}

#[test]
fn deleting_a_document_from_the_front() {
    let mut document = open(&fixture("sample.md"));
    assert_matches_full_scan(&mut document);
    while !document.is_empty() {
        document.replace(0..1, "").unwrap();
        assert_matches_full_scan(&mut document);
    }
}

#[test]
fn closing_a_comment_swallows_tokens() {
    let mut document = open("<!-- open\n`a` and $b$\n");
    assert_eq!(
        document.compute_partitioning(PartitioningId::Markdown).unwrap().len(),
        5
    );

    let end = document.len();
    document.replace(end..end, "-->").unwrap();
    assert_eq!(
        document.compute_partitioning(PartitioningId::Markdown).unwrap(),
        &[TypedRegion::new(0, 25, ContentType::Comment)]
    );
}

#[test]
fn edits_outside_the_document_are_rejected() {
    let mut document = open("short");
    let version = document.version();
    let err = document.replace(3..9, "x").unwrap_err();
    assert!(matches!(err, PartitionError::BadLocation { .. }));
    assert_eq!(document.version(), version);
    assert_eq!(document.text(), "short");
}
