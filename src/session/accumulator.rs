//! Append-only corpus of extracted document text.

use serde::Serialize;

const START_MARKER_PREFIX: &str = "--- INICIO DO ARQUIVO: ";
const END_MARKER_PREFIX: &str = "--- FIM DO ARQUIVO: ";
const MARKER_SUFFIX: &str = " ---";

/// Start-of-document marker line for `document_id`.
pub fn start_marker(document_id: &str) -> String {
    format!("{START_MARKER_PREFIX}{document_id}{MARKER_SUFFIX}")
}

/// End-of-document marker line for `document_id`.
pub fn end_marker(document_id: &str) -> String {
    format!("{END_MARKER_PREFIX}{document_id}{MARKER_SUFFIX}")
}

/// Make an uploaded file name safe to embed in a marker line.
///
/// Control characters (line breaks included) become single spaces and
/// runs of dashes are shortened, so a name can never open or close a
/// marker of its own.
pub fn normalize_document_id(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let mut id = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    while id.contains("--") {
        id = id.replace("--", "-");
    }
    if id.is_empty() {
        "documento".to_string()
    } else {
        id
    }
}

/// Number of bytes the markers add around one document's text.
pub fn framing_len(document_id: &str) -> usize {
    // "\n\n" + start + "\n"  ...text...  "\n" + end + "\n"
    2 + start_marker(document_id).len() + 1 + 1 + end_marker(document_id).len() + 1
}

/// Read-only view of the accumulated state.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub accumulated_text: &'a str,
    pub ingested_documents: &'a [String],
}

impl Snapshot<'_> {
    pub fn is_empty(&self) -> bool {
        self.ingested_documents.is_empty()
    }
}

/// Running text plus the ordered identifiers that produced it.
///
/// Both fields change together inside `&mut self` methods, so there is
/// no observable state where one is updated and the other is not.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    text: String,
    documents: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame `text` with boundary markers and record `document_id`.
    /// Duplicate identifiers are kept.
    ///
    /// Returns the identifier as recorded, after normalization.
    pub fn append(&mut self, document_id: &str, text: &str) -> String {
        let document_id = normalize_document_id(document_id);
        let document_id = document_id.as_str();
        self.text.reserve(framing_len(document_id) + text.len());
        self.text.push_str("\n\n");
        self.text.push_str(&start_marker(document_id));
        self.text.push('\n');
        self.text.push_str(text);
        self.text.push('\n');
        self.text.push_str(&end_marker(document_id));
        self.text.push('\n');
        self.documents.push(document_id.to_string());
        document_id.to_string()
    }

    /// Clear everything. Idempotent.
    pub fn reset(&mut self) {
        self.text.clear();
        self.documents.clear();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            accumulated_text: &self.text,
            ingested_documents: &self.documents,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_start_markers(text: &str) -> usize {
        text.matches(START_MARKER_PREFIX).count()
    }

    #[test]
    fn new_accumulator_is_empty() {
        let acc = Accumulator::new();
        let snap = acc.snapshot();
        assert!(snap.is_empty());
        assert_eq!(snap.accumulated_text, "");
        assert!(snap.ingested_documents.is_empty());
    }

    #[test]
    fn append_frames_text_with_markers() {
        let mut acc = Accumulator::new();
        acc.append("Jan.pdf", "Card simples x3");

        assert_eq!(
            acc.snapshot().accumulated_text,
            "\n\n--- INICIO DO ARQUIVO: Jan.pdf ---\nCard simples x3\n--- FIM DO ARQUIVO: Jan.pdf ---\n"
        );
        assert_eq!(acc.snapshot().ingested_documents, ["Jan.pdf".to_string()]);
    }

    #[test]
    fn n_appends_yield_n_documents_and_markers_in_order() {
        let mut acc = Accumulator::new();
        let names = ["Jan.pdf", "Fev.pdf", "Mar.pdf", "Abr.pdf", "Mai.pdf"];
        for (i, name) in names.iter().enumerate() {
            acc.append(name, &format!("conteudo {i}"));
            assert_eq!(acc.len(), i + 1);
            assert_eq!(count_start_markers(acc.snapshot().accumulated_text), i + 1);
        }

        let snap = acc.snapshot();
        assert_eq!(snap.ingested_documents, names.map(String::from));
        let positions: Vec<usize> = names
            .iter()
            .map(|n| snap.accumulated_text.find(&start_marker(n)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn duplicate_identifiers_are_kept() {
        let mut acc = Accumulator::new();
        acc.append("Jan.pdf", "primeira");
        acc.append("Jan.pdf", "segunda");

        let snap = acc.snapshot();
        assert_eq!(snap.ingested_documents.len(), 2);
        assert_eq!(count_start_markers(snap.accumulated_text), 2);
        assert!(snap.accumulated_text.find("primeira") < snap.accumulated_text.find("segunda"));
    }

    #[test]
    fn empty_text_still_counts_as_a_document() {
        let mut acc = Accumulator::new();
        acc.append("vazio.pdf", "");
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.snapshot().accumulated_text.len(), framing_len("vazio.pdf"));
    }

    #[test]
    fn framing_len_matches_append_growth() {
        let mut acc = Accumulator::new();
        acc.append("Jan.pdf", "Card simples x3");
        let before = acc.snapshot().accumulated_text.len();
        acc.append("Feb.pdf", "Video campanha x1");
        let growth = acc.snapshot().accumulated_text.len() - before;
        assert_eq!(growth, framing_len("Feb.pdf") + "Video campanha x1".len());
    }

    #[test]
    fn reset_clears_both_fields() {
        let mut acc = Accumulator::new();
        acc.append("Jan.pdf", "a");
        acc.append("Feb.pdf", "b");

        acc.reset();
        let snap = acc.snapshot();
        assert_eq!(snap.accumulated_text, "");
        assert!(snap.ingested_documents.is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut once = Accumulator::new();
        once.append("Jan.pdf", "a");
        once.reset();

        let mut twice = Accumulator::new();
        twice.append("Jan.pdf", "a");
        twice.reset();
        twice.reset();

        assert_eq!(once.snapshot().accumulated_text, twice.snapshot().accumulated_text);
        assert_eq!(once.snapshot().ingested_documents, twice.snapshot().ingested_documents);
    }

    #[test]
    fn append_after_reset_starts_fresh() {
        let mut acc = Accumulator::new();
        acc.append("Jan.pdf", "old");
        acc.reset();
        acc.append("Feb.pdf", "new");

        let snap = acc.snapshot();
        assert_eq!(snap.ingested_documents, ["Feb.pdf".to_string()]);
        assert!(!snap.accumulated_text.contains("old"));
    }

    #[test]
    fn hostile_names_cannot_forge_markers() {
        let mut acc = Accumulator::new();
        let recorded = acc.append("Jan.pdf\r\n--- INICIO DO ARQUIVO: Fake.pdf ---", "texto");
        acc.append("Feb.pdf", "outro");

        let snap = acc.snapshot();
        assert_eq!(recorded, "Jan.pdf - INICIO DO ARQUIVO: Fake.pdf -");
        assert_eq!(snap.ingested_documents[0], recorded);
        assert_eq!(count_start_markers(snap.accumulated_text), snap.ingested_documents.len());
        assert_eq!(
            snap.accumulated_text.matches(END_MARKER_PREFIX).count(),
            snap.ingested_documents.len()
        );
        assert!(snap.accumulated_text.contains(&start_marker(&recorded)));
    }

    #[test]
    fn normalization_keeps_ordinary_names() {
        assert_eq!(normalize_document_id("Relatório Março.pdf"), "Relatório Março.pdf");
        assert_eq!(normalize_document_id("a\tb.pdf"), "a b.pdf");
        assert_eq!(normalize_document_id(" \n "), "documento");
    }
}
