//! TikZ block scanning.
//!
//! Finds complete `\begin{tikzpicture}` .. `\end{tikzpicture}` spans in a
//! text buffer with a two-state scan: seek an opening delimiter, then seek
//! the first closing delimiter after it. Matching is non-greedy and spans
//! newlines. Nested environments are not supported: a nested opening
//! delimiter closes at the first closing delimiter, not the matching one.

/// Opening delimiter of a TikZ picture environment.
pub const BLOCK_OPEN: &str = r"\begin{tikzpicture}";

/// Closing delimiter of a TikZ picture environment.
pub const BLOCK_CLOSE: &str = r"\end{tikzpicture}";

/// Extract every complete TikZ block from `text`, in order of appearance.
///
/// Each returned slice is the exact span from an opening delimiter to the
/// first subsequent closing delimiter, both inclusive. An opening delimiter
/// with no closing delimiter after it yields nothing. A buffer with no
/// blocks yields an empty vector; there is no failure mode.
///
/// # Examples
///
/// ```
/// use tikzex::scan::extract_blocks;
///
/// let text = r"intro \begin{tikzpicture}\draw (0,0) -- (1,1);\end{tikzpicture} outro";
/// let blocks = extract_blocks(text);
/// assert_eq!(blocks.len(), 1);
/// assert!(blocks[0].starts_with(r"\begin{tikzpicture}"));
/// assert!(blocks[0].ends_with(r"\end{tikzpicture}"));
/// ```
pub fn extract_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(open) = text[cursor..].find(BLOCK_OPEN) {
        let start = cursor + open;
        let body = start + BLOCK_OPEN.len();

        match text[body..].find(BLOCK_CLOSE) {
            Some(close) => {
                let end = body + close + BLOCK_CLOSE.len();
                blocks.push(&text[start..end]);
                cursor = end;
            }
            // Unmatched opening delimiter: nothing more to extract.
            None => break,
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let text = "before\n\\begin{tikzpicture}\n\\draw (0,0) -- (1,1);\n\\end{tikzpicture}\nafter";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0],
            "\\begin{tikzpicture}\n\\draw (0,0) -- (1,1);\n\\end{tikzpicture}"
        );
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let text = "\\begin{tikzpicture}A\\end{tikzpicture} mid \\begin{tikzpicture}B\\end{tikzpicture}";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains('A'));
        assert!(blocks[1].contains('B'));
    }

    #[test]
    fn test_block_with_options() {
        let text = "\\begin{tikzpicture}[scale=2]\n\\draw (0,0) circle (1);\n\\end{tikzpicture}";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("[scale=2]"));
    }

    #[test]
    fn test_multiline_content_preserved_exactly() {
        let text = "x\\begin{tikzpicture}\n  \\node at (0,0) {Hello};\n\n  \\node at (1,1) {World};\n\\end{tikzpicture}y";
        let blocks = extract_blocks(text);
        assert_eq!(
            blocks[0],
            "\\begin{tikzpicture}\n  \\node at (0,0) {Hello};\n\n  \\node at (1,1) {World};\n\\end{tikzpicture}"
        );
    }

    #[test]
    fn test_no_blocks() {
        assert!(extract_blocks("just some latex \\begin{document} text").is_empty());
        assert!(extract_blocks("").is_empty());
    }

    #[test]
    fn test_unmatched_open_yields_nothing() {
        let text = "\\begin{tikzpicture}\n\\draw (0,0);\nno closing delimiter here";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn test_close_without_open_ignored() {
        let text = "\\end{tikzpicture} then \\begin{tikzpicture}ok\\end{tikzpicture}";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], "\\begin{tikzpicture}ok\\end{tikzpicture}");
    }

    #[test]
    fn test_nested_open_closes_at_first_close() {
        // Known limitation: the inner opening delimiter does not nest.
        let text = "\\begin{tikzpicture}outer \\begin{tikzpicture}inner\\end{tikzpicture} trailing\\end{tikzpicture}";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0],
            "\\begin{tikzpicture}outer \\begin{tikzpicture}inner\\end{tikzpicture}"
        );
    }

    #[test]
    fn test_typo_in_environment_name_not_matched() {
        let text = "\\begin{tikzpictur}\n\\draw (0,0);\n\\end{tikzpictur}";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn test_many_blocks() {
        let mut text = String::new();
        for i in 0..25 {
            text.push_str(&format!(
                "\\begin{{tikzpicture}}\\node {{{}}};\\end{{tikzpicture}}\nfiller\n",
                i
            ));
        }
        let blocks = extract_blocks(&text);
        assert_eq!(blocks.len(), 25);
        assert!(blocks[7].contains("{7}"));
    }

    #[test]
    fn test_unicode_content() {
        let text = "\\begin{tikzpicture}\n\\node {café ∑ 数学};\n\\end{tikzpicture}";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("café ∑ 数学"));
    }
}
