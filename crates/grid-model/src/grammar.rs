//! Lexical conventions of the block-structured grid file format.

/// Prefix that marks a comment line.
pub const COMMENT_PREFIX: &str = "--";

/// Lines starting with this character close a data block.
pub const BLOCK_TERMINATOR: char = '/';

/// Separator between category name and identifier inside a preamble comment.
pub const PREAMBLE_SEPARATOR: &str = " = ";

/// Block whose preamble declares the identifier dictionary.
pub const DEFAULT_BLOCK_NAME: &str = "SATNUM";

/// Value written for identifiers with no mapping.
pub const DEFAULT_SENTINEL: &str = "0";

pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX)
}

pub fn is_terminator(line: &str) -> bool {
    line.starts_with(BLOCK_TERMINATOR)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns the framed text of a `-- ... --` comment, or `None` if the line is
/// not framed on both sides.
///
/// The first three characters (`-- ` or `---`) and the trailing `--` are
/// removed.
pub fn framed_comment(line: &str) -> Option<&str> {
    if !is_comment(line) {
        return None;
    }
    let trimmed = line.trim();
    if !trimmed.ends_with(COMMENT_PREFIX) {
        return None;
    }
    let end = trimmed.len().saturating_sub(COMMENT_PREFIX.len());
    Some(trimmed.get(3..end).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_comment_strips_markers() {
        assert_eq!(framed_comment("-- 1 = Sand --\n"), Some("1 = Sand "));
        assert_eq!(framed_comment("--- 2 = Shale--"), Some(" 2 = Shale"));
    }

    #[test]
    fn framed_comment_ignores_trailing_whitespace() {
        assert_eq!(framed_comment("-- x --  \n"), Some("x "));
        assert_eq!(framed_comment("-- 1 = Sand --\t\r\n"), Some("1 = Sand "));
    }

    #[test]
    fn framed_comment_rejects_open_comments() {
        assert_eq!(framed_comment("-- just a note\n"), None);
        assert_eq!(framed_comment("SATNUM --"), None);
    }

    #[test]
    fn framed_comment_handles_bare_marker() {
        assert_eq!(framed_comment("--\n"), Some(""));
        assert_eq!(framed_comment("----\n"), Some(""));
    }

    #[test]
    fn classifies_lines() {
        assert!(is_comment("-- header"));
        assert!(is_terminator("/\n"));
        assert!(is_terminator("/ end of block"));
        assert!(is_blank("   \n"));
        assert!(!is_blank("1 2 3\n"));
    }
}
