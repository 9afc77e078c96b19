//! Builds the single outbound generation request.

use crate::session::accumulator::Snapshot;

/// Separates the rubric from the corpus.
pub const CORPUS_DELIMITER: &str = "\n\nDADOS DOS RELATÓRIOS MENSAIS PARA ANÁLISE:\n";

/// `template + delimiter + corpus`. Pure; no state or network access.
pub fn compile(instruction_template: &str, snapshot: &Snapshot<'_>) -> String {
    let mut request = String::with_capacity(
        instruction_template.len() + CORPUS_DELIMITER.len() + snapshot.accumulated_text.len(),
    );
    request.push_str(instruction_template);
    request.push_str(CORPUS_DELIMITER);
    request.push_str(snapshot.accumulated_text);
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::accumulator::Accumulator;

    #[test]
    fn compiles_template_delimiter_and_corpus() {
        let mut acc = Accumulator::new();
        acc.append("Jan.pdf", "Card simples x3");

        let request = compile("RUBRIC", &acc.snapshot());
        assert!(request.starts_with("RUBRIC\n\nDADOS DOS RELATÓRIOS MENSAIS PARA ANÁLISE:\n"));
        assert!(request.ends_with(acc.snapshot().accumulated_text));
        assert_eq!(
            request.len(),
            "RUBRIC".len() + CORPUS_DELIMITER.len() + acc.snapshot().accumulated_text.len()
        );
    }

    #[test]
    fn empty_corpus_still_compiles() {
        let acc = Accumulator::new();
        assert_eq!(compile("RUBRIC", &acc.snapshot()), format!("RUBRIC{CORPUS_DELIMITER}"));
    }

    #[test]
    fn compilation_is_deterministic() {
        let mut acc = Accumulator::new();
        acc.append("Jan.pdf", "a");
        acc.append("Jan.pdf", "b");
        let first = compile("T", &acc.snapshot());
        let second = compile("T", &acc.snapshot());
        assert_eq!(first, second);
    }
}
