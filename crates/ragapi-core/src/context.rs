//! Context formatting for retrieved documents

/// Separator placed between consecutive documents in the formatted context.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Join document texts into a single context string, preserving order.
///
/// An empty slice yields an empty string.
pub fn format_docs<S: AsRef<str>>(docs: &[S]) -> String {
    docs.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_blank_line() {
        assert_eq!(format_docs(&["doc1 text", "doc2 text"]), "doc1 text\n\ndoc2 text");
    }

    #[test]
    fn empty_input_is_empty_context() {
        let docs: Vec<String> = Vec::new();
        assert_eq!(format_docs(&docs), "");
    }

    #[test]
    fn single_document_has_no_separator() {
        assert_eq!(format_docs(&["only".to_string()]), "only");
    }

    #[test]
    fn preserves_input_order() {
        let docs = ["c", "a", "b"];
        assert_eq!(format_docs(&docs), "c\n\na\n\nb");
    }
}
