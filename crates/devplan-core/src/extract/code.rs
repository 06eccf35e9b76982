//! Fenced code block scanning.

/// A fenced code block found in markdown text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock<'t> {
    /// First word of the info string, lowercased (`python`, `rust`, ...)
    pub language: Option<String>,
    /// Lines between the fences, without the final newline
    pub content: &'t str,
    /// 1-based line number of the opening fence within the scanned text
    pub line: usize,
    /// False when the text ended before a closing fence
    pub terminated: bool,
}

impl CodeBlock<'_> {
    /// Whether the block shows output or documentation rather than something
    /// to write or run.
    pub fn is_output(&self) -> bool {
        matches!(
            self.language.as_deref(),
            Some("console" | "text" | "txt" | "plain" | "output" | "markdown" | "md" | "diff" | "mermaid")
        )
    }
}

fn fence_marker(line: &str) -> Option<char> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some('`')
    } else if trimmed.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

fn is_closing_fence(line: &str, fence: char) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == fence)
}

struct OpenFence {
    fence: char,
    language: Option<String>,
    line: usize,
    body_start: usize,
}

/// Every fenced code block in `text`, in order.
///
/// A closing fence is a line holding only the opening fence's characters.
/// An unterminated fence runs to the end of the text.
pub fn code_blocks(text: &str) -> Vec<CodeBlock<'_>> {
    let mut blocks = Vec::new();
    let mut open: Option<OpenFence> = None;
    let mut offset = 0;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += line.len();

        match open.as_ref().map(|fence| fence.fence) {
            None => {
                if let Some(fence) = fence_marker(line) {
                    let info = line.trim().trim_start_matches(fence);
                    let language = info
                        .split_whitespace()
                        .next()
                        .map(|word| word.trim_matches(['{', '}']).to_lowercase())
                        .filter(|word| !word.is_empty());
                    open = Some(OpenFence {
                        fence,
                        language,
                        line: index + 1,
                        body_start: offset,
                    });
                }
            }
            Some(fence) if is_closing_fence(line, fence) => {
                if let Some(block) = open.take() {
                    blocks.push(CodeBlock {
                        language: block.language,
                        content: text[block.body_start..line_start].trim_end_matches(['\n', '\r']),
                        line: block.line,
                        terminated: true,
                    });
                }
            }
            Some(_) => {}
        }
    }

    if let Some(block) = open {
        blocks.push(CodeBlock {
            language: block.language,
            content: text[block.body_start.min(text.len())..].trim_end_matches(['\n', '\r']),
            line: block.line,
            terminated: false,
        });
    }

    blocks
}

/// `text` with every fenced code block (fences included) removed.
pub fn strip_code_blocks(text: &str) -> String {
    let mut prose = String::with_capacity(text.len());
    let mut open: Option<char> = None;

    for line in text.split_inclusive('\n') {
        match open {
            None => match fence_marker(line) {
                Some(fence) => open = Some(fence),
                None => prose.push_str(line),
            },
            Some(fence) => {
                if is_closing_fence(line, fence) {
                    open = None;
                }
            }
        }
    }

    prose
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Intro\n```python\nimport os\nprint(os.getcwd())\n```\nMiddle\n~~~\nplain\n~~~\n";

    #[test]
    fn test_code_blocks_found_in_order() {
        let blocks = code_blocks(SAMPLE);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language.as_deref(), Some("python"));
        assert_eq!(blocks[0].content, "import os\nprint(os.getcwd())");
        assert_eq!(blocks[0].line, 2);
        assert!(blocks[0].terminated);
        assert_eq!(blocks[1].language, None);
        assert_eq!(blocks[1].content, "plain");
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let blocks = code_blocks("```rust\nfn main() {}\n");
        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].terminated);
        assert_eq!(blocks[0].content, "fn main() {}");
    }

    #[test]
    fn test_strip_code_blocks_keeps_prose() {
        assert_eq!(strip_code_blocks(SAMPLE), "Intro\nMiddle\n");
    }

    #[test]
    fn test_output_languages() {
        let blocks = code_blocks("```text\n...\n```\n```bash\nls\n```\n");
        assert!(blocks[0].is_output());
        assert!(!blocks[1].is_output());
    }
}
