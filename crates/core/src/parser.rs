/// Citation grammar, parsed by recursive descent with PEG-style ordered choice:
///
/// ```text
/// citation     = segment (";" segment)* EOF
/// segment      = item ("," item)*
/// item         = book locator? / locator
/// book         = INT? WORD ("."? WORD)* "."?
/// locator      = INT ":" INT verse_tail / INT (verse_tail | chapter_tail)
/// verse_tail   = "-" INT ":" INT / "-" INT / "ff" / ε
/// chapter_tail = "-" INT ":" INT / "-" INT / ε
/// ```
///
/// Whether a bare `INT` locator is a chapter or a verse is decided by its
/// position: after `;` or a book it is a chapter; after `,` it is a verse
/// only if the previous item ended on a verse. No catalog lookups happen here.
use crate::ast::{ChapterRangeEnd, ParseNode, Separator, VerseRangeEnd};
use crate::error::ReferenceError;
use crate::lexer::{Spanned, Token};

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

/// The `ff` suffix word, which never starts or continues a book name.
pub(crate) fn is_suffix_word(token: &Token) -> bool {
    matches!(token, Token::Word(w) if w.eq_ignore_ascii_case("ff"))
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Set once any item has named a book.
    seen_book: bool,
    /// Whether the previous item ended on a verse rather than a whole chapter.
    verse_mode: bool,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser {
            tokens,
            pos: 0,
            seen_book: false,
            verse_mode: false,
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn peek_at(&self, ahead: usize) -> &Token {
        &self.tokens[(self.pos + ahead).min(self.tokens.len() - 1)].token
    }

    fn cur_offset(&self) -> usize {
        self.cur().offset
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn err(&self, msg: impl Into<String>) -> ReferenceError {
        ReferenceError::syntax(self.cur_offset(), msg)
    }

    fn take_int(&mut self, what: &str) -> Result<(u32, usize), ReferenceError> {
        let offset = self.cur_offset();
        if let Token::Int(n) = *self.peek() {
            self.advance();
            Ok((n, offset))
        } else {
            Err(self.err(format!("expected {}, got {}", what, self.peek().describe())))
        }
    }

    fn skip_dot(&mut self) {
        if self.peek() == &Token::Dot {
            self.advance();
        }
    }

    // -- Grammar rules ------------------------------------------

    fn parse_citation(&mut self) -> Result<ParseNode, ReferenceError> {
        let mut segments = vec![self.parse_segment()?];
        while self.peek() == &Token::Semicolon {
            self.advance();
            segments.push(self.parse_segment()?);
        }
        if self.peek() != &Token::Eof {
            return Err(self.err(format!(
                "expected ',', ';' or end of input, got {}",
                self.peek().describe()
            )));
        }
        Ok(ParseNode::CompoundList {
            items: segments,
            separator: Separator::Semicolon,
        })
    }

    fn parse_segment(&mut self) -> Result<ParseNode, ReferenceError> {
        // The first item of a segment follows ';' (or starts the citation),
        // so a bare number there is always a chapter.
        let mut items = self.parse_item(false)?;
        while self.peek() == &Token::Comma {
            self.advance();
            let bare_is_verse = self.verse_mode;
            items.extend(self.parse_item(bare_is_verse)?);
        }
        Ok(ParseNode::CompoundList {
            items,
            separator: Separator::Comma,
        })
    }

    fn at_book_start(&self) -> bool {
        match self.peek() {
            Token::Word(_) => !is_suffix_word(self.peek()),
            // "1 John", "2Kgs"
            Token::Int(_) => {
                matches!(self.peek_at(1), Token::Word(_)) && !is_suffix_word(self.peek_at(1))
            }
            _ => false,
        }
    }

    fn parse_item(&mut self, bare_is_verse: bool) -> Result<Vec<ParseNode>, ReferenceError> {
        if self.at_book_start() {
            let (token, offset) = self.parse_book()?;
            self.seen_book = true;
            if matches!(self.peek(), Token::Int(_)) {
                let locator = self.parse_locator(false)?;
                return Ok(vec![
                    ParseNode::BookMention {
                        token,
                        offset,
                        whole: false,
                    },
                    locator,
                ]);
            }
            self.verse_mode = false;
            return Ok(vec![ParseNode::BookMention {
                token,
                offset,
                whole: true,
            }]);
        }

        if matches!(self.peek(), Token::Int(_)) {
            if !self.seen_book {
                return Err(self.err("citation must start with a book name"));
            }
            return Ok(vec![self.parse_locator(bare_is_verse)?]);
        }

        Err(self.err(format!(
            "expected book, chapter or verse, got {}",
            self.peek().describe()
        )))
    }

    fn parse_book(&mut self) -> Result<(String, usize), ReferenceError> {
        let offset = self.cur_offset();
        let mut words: Vec<String> = Vec::new();
        if let Token::Int(n) = *self.peek() {
            words.push(n.to_string());
            self.advance();
        }
        match self.peek().clone() {
            Token::Word(w) => {
                words.push(w);
                self.advance();
            }
            other => {
                return Err(self.err(format!("expected book name, got {}", other.describe())));
            }
        }
        // Multi-word names ("Song of Solomon"), each word optionally abbreviated.
        loop {
            self.skip_dot();
            match self.peek().clone() {
                Token::Word(w) if !is_suffix_word(self.peek()) => {
                    words.push(w);
                    self.advance();
                }
                _ => break,
            }
        }
        Ok((words.join(" "), offset))
    }

    fn parse_locator(&mut self, bare_is_verse: bool) -> Result<ParseNode, ReferenceError> {
        let (n, offset) = self.take_int("chapter or verse number")?;

        if self.peek() == &Token::Colon {
            self.advance();
            let (verse, _) = self.take_int("verse number after ':'")?;
            let end = self.parse_verse_tail()?;
            self.verse_mode = true;
            return Ok(ParseNode::ChapterVerseItem {
                chapter: Some(n),
                verse,
                end,
                offset,
            });
        }

        if bare_is_verse {
            let end = self.parse_verse_tail()?;
            self.verse_mode = true;
            return Ok(ParseNode::ChapterVerseItem {
                chapter: None,
                verse: n,
                end,
                offset,
            });
        }

        let end = self.parse_chapter_tail()?;
        self.verse_mode = matches!(end, Some(ChapterRangeEnd::ChapterVerse(..)));
        Ok(ParseNode::ChapterOnlyItem {
            chapter: n,
            end,
            offset,
        })
    }

    fn parse_verse_tail(&mut self) -> Result<Option<VerseRangeEnd>, ReferenceError> {
        if is_suffix_word(self.peek()) {
            self.advance();
            return Ok(Some(VerseRangeEnd::ChapterEnd));
        }
        if self.peek() != &Token::Dash {
            return Ok(None);
        }
        self.advance();
        let (n, _) = self.take_int("number after '-'")?;
        if self.peek() == &Token::Colon {
            self.advance();
            let (verse, _) = self.take_int("verse number after ':'")?;
            return Ok(Some(VerseRangeEnd::ChapterVerse(n, verse)));
        }
        Ok(Some(VerseRangeEnd::Verse(n)))
    }

    fn parse_chapter_tail(&mut self) -> Result<Option<ChapterRangeEnd>, ReferenceError> {
        if self.peek() != &Token::Dash {
            return Ok(None);
        }
        self.advance();
        let (n, _) = self.take_int("chapter number after '-'")?;
        if self.peek() == &Token::Colon {
            self.advance();
            let (verse, _) = self.take_int("verse number after ':'")?;
            return Ok(Some(ChapterRangeEnd::ChapterVerse(n, verse)));
        }
        Ok(Some(ChapterRangeEnd::Chapter(n)))
    }
}

/// Parse a token stream into a raw syntax tree.
///
/// Returns [`ReferenceError::EmptyReference`] when the stream holds no tokens
/// at all, and [`ReferenceError::Syntax`] for anything the grammar rejects.
pub fn parse(tokens: &[Spanned]) -> Result<ParseNode, ReferenceError> {
    if tokens.is_empty() || tokens[0].token == Token::Eof {
        return Err(ReferenceError::EmptyReference);
    }
    let tree = Parser::new(tokens).parse_citation()?;
    tracing::trace!(leaves = tree.leaves().len(), "parsed citation");
    Ok(tree)
}
