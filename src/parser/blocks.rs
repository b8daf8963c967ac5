use unicode_normalization::UnicodeNormalization;

const FOLD_OPEN: &str = "{{{#!folding";
const SYNTAX_OPEN: &str = "{{{";
const BLOCK_CLOSE: &str = "}}}";
const TABLE_ROW: &str = "||";
const REDIRECTS: &[&str] = &["#redirect", "#넘겨주기"];

/// Multi-line region the scanner is currently inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockContext {
    #[default]
    None,
    Table,
    Syntax,
    Folding,
}

/// Structural category of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Blank,
    Comment,
    FoldStart,
    FoldBody,
    SyntaxStart,
    SyntaxBody,
    TableStart,
    TableBody,
    Directive,
    Redirect,
    Quote,
    Heading { level: usize, text: String },
    ListItem(String),
    Plain(String),
}

impl Block {
    /// Text that still has to go through the normalizer, if any.
    pub fn body_text(&self) -> Option<&str> {
        match self {
            Block::Plain(text) | Block::ListItem(text) => Some(text),
            _ => None,
        }
    }
}

/// Classify one raw line, updating `ctx` for block openers and closers.
pub fn classify_line(raw: &str, ctx: &mut BlockContext) -> Block {
    let line: String = raw.trim().nfc().collect();
    classify_trimmed(line.trim(), ctx)
}

fn classify_trimmed(line: &str, ctx: &mut BlockContext) -> Block {
    if line.starts_with("##") {
        return Block::Comment;
    }

    // ── Inside a block: only the closer matters ──
    match *ctx {
        BlockContext::Folding | BlockContext::Syntax => {
            let Some(end) = line.find(BLOCK_CLOSE) else {
                return if *ctx == BlockContext::Folding {
                    Block::FoldBody
                } else {
                    Block::SyntaxBody
                };
            };
            *ctx = BlockContext::None;
            return classify_trimmed(line[end + BLOCK_CLOSE.len()..].trim(), ctx);
        }
        BlockContext::Table => {
            if line.ends_with(TABLE_ROW) {
                *ctx = BlockContext::None;
            }
            return Block::TableBody;
        }
        BlockContext::None => {}
    }

    if line.is_empty() {
        return Block::Blank;
    }

    // [목차], [clearfix], [include(...)], [[분류:...]]
    if line.starts_with('[') && line.ends_with(']') {
        return Block::Directive;
    }

    if line.starts_with(FOLD_OPEN) {
        if !line.ends_with(BLOCK_CLOSE) {
            *ctx = BlockContext::Folding;
        }
        return Block::FoldStart;
    }

    // Bare {{{ is also used for unlabeled code blocks, not just {{{#!syntax.
    if line.starts_with(SYNTAX_OPEN) {
        if !line.ends_with(BLOCK_CLOSE) {
            *ctx = BlockContext::Syntax;
        }
        return Block::SyntaxStart;
    }

    if line.starts_with(TABLE_ROW) {
        if !line.ends_with(TABLE_ROW) {
            *ctx = BlockContext::Table;
        }
        return Block::TableStart;
    }

    if REDIRECTS.iter().any(|r| line.starts_with(r)) {
        return Block::Redirect;
    }

    if line.starts_with('>') {
        return Block::Quote;
    }

    if line.starts_with("==") && line.ends_with("==") {
        return parse_heading(line);
    }

    // the marker is left for the normalizer to strip
    if line.starts_with("* ") {
        return Block::ListItem(line.to_string());
    }

    Block::Plain(line.to_string())
}

fn parse_heading(line: &str) -> Block {
    let level = line.chars().take_while(|&c| c == '=').count();
    let text = line.trim_matches('=').trim();
    if text.is_empty() {
        return Block::Directive;
    }
    Block::Heading {
        level,
        text: text.to_string(),
    }
}
