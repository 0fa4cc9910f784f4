use unicode_normalization::char::is_combining_mark;

use crate::error::ReferenceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Run of letters: book names, book-name words, and the `ff` suffix
    Word(String),
    /// Chapter or verse number
    Int(u32),
    /// `:`, or a `.` between two numbers (`Jn 3.16`)
    Colon,
    /// `-`, U+2013 EN DASH or U+2014 EM DASH
    Dash,
    Comma,
    Semicolon,
    /// Abbreviation point after a book name (`Gen.`)
    Dot,
    // End of input
    Eof,
}

impl Token {
    /// Short human description used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Int(n) => format!("number {}", n),
            Token::Colon => "':'".to_string(),
            Token::Dash => "'-'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::Dot => "'.'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    /// Byte offset of the token's first character in the citation.
    pub offset: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || is_combining_mark(c)
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, ReferenceError> {
    let mut tokens: Vec<Spanned> = Vec::new();
    let chars: Vec<(usize, char)> = src.char_indices().collect();
    let mut pos = 0usize;

    while pos < chars.len() {
        let (offset, c) = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        // Number
        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].1.is_ascii_digit() {
                pos += 1;
            }
            let s: String = chars[start..pos].iter().map(|&(_, ch)| ch).collect();
            let n: u32 = s.parse().map_err(|_| {
                ReferenceError::syntax(offset, format!("number '{}' is too large", s))
            })?;
            tokens.push(Spanned {
                token: Token::Int(n),
                offset,
            });
            continue;
        }

        // Word
        if is_word_char(c) {
            let start = pos;
            while pos < chars.len() && is_word_char(chars[pos].1) {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().map(|&(_, ch)| ch).collect();
            tokens.push(Spanned {
                token: Token::Word(word),
                offset,
            });
            continue;
        }

        let token = match c {
            ':' => Token::Colon,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '-' | '\u{2013}' | '\u{2014}' => Token::Dash,
            '.' => {
                // "3.16" -- a period between two numbers separates chapter and verse
                let after_int = matches!(tokens.last(), Some(Spanned { token: Token::Int(_), .. }));
                let before_digit = chars
                    .get(pos + 1)
                    .is_some_and(|&(_, next)| next.is_ascii_digit());
                if after_int && before_digit {
                    Token::Colon
                } else {
                    Token::Dot
                }
            }
            other => {
                return Err(ReferenceError::syntax(
                    offset,
                    format!("unexpected character '{}'", other),
                ));
            }
        };
        tokens.push(Spanned { token, offset });
        pos += 1;
    }

    tokens.push(Spanned {
        token: Token::Eof,
        offset: src.len(),
    });
    Ok(tokens)
}
