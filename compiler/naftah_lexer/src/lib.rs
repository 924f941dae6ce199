//! Naftah Lexer - tokenizer for Naftah source text.
//!
//! Built on `logos`. Whitespace and comments never reach the output.
//! Words are resolved against the keyword synonym table after matching,
//! numerals are folded to ASCII, and strings are unescaped.
//!
//! [`Lexer`] is a lazy iterator over `Result<Token, BugError>`; it is
//! `Clone`, so a consumer can restart from any point by keeping a copy.
//! [`lex`] collects the whole stream, failing on the first lexical error.

pub mod keywords;
pub mod numeral;
mod raw_token;

use logos::Logos;
use naftah_diagnostic::{invalid_escape, unrecognized_character, unterminated_string, BugError};
use naftah_ir::{LineIndex, Span, Token, TokenKind, TokenList};

use raw_token::RawToken;

/// Lazy token stream over one source text.
#[derive(Clone)]
pub struct Lexer<'src> {
    logos: logos::Lexer<'src, RawToken>,
    lines: LineIndex<'src>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            logos: RawToken::lexer(source),
            lines: LineIndex::new(source),
            finished: false,
        }
    }

    fn token(&self, kind: TokenKind, span: Span) -> Token {
        Token::new(kind, span, self.lines.position(span.start))
    }

    fn eof(&mut self) -> Token {
        self.finished = true;
        let end = u32::try_from(self.lines.source().len()).unwrap_or(u32::MAX);
        self.token(TokenKind::Eof, Span::new(end, end))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, BugError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let Some(result) = self.logos.next() else {
                return Some(Ok(self.eof()));
            };
            let span = Span::from_range(self.logos.span());
            let slice = self.logos.slice();
            let position = self.lines.position(span.start);

            let raw = match result {
                Ok(raw) => raw,
                Err(()) => {
                    self.finished = true;
                    let err = if slice.starts_with("#*") {
                        unterminated_comment()
                    } else {
                        unrecognized_character(slice)
                    };
                    return Some(Err(err.with_position(position)));
                }
            };

            match convert(raw, slice) {
                Ok(Some(kind)) => return Some(Ok(self.token(kind, span))),
                Ok(None) => {}
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err.with_position(position)));
                }
            }
        }
    }
}

#[cold]
fn unterminated_comment() -> BugError {
    BugError::new(
        naftah_diagnostic::ErrorKind::Lexical,
        "تعليق غير مغلق: '#*' بدون '*#'.",
    )
}

/// Lex a whole source text. The list always ends with `Eof`.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, BugError> {
    let tokens = Lexer::new(source).collect::<Result<TokenList, _>>()?;
    tracing::trace!(count = tokens.len(), "lexed");
    Ok(tokens)
}

/// Map a raw token to its final kind. `Ok(None)` marks trivia.
fn convert(raw: RawToken, slice: &str) -> Result<Option<TokenKind>, BugError> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment => return Ok(None),

        RawToken::Ident => keywords::lookup(slice).unwrap_or_else(|| TokenKind::Ident(slice.to_string())),
        RawToken::Number => TokenKind::Number(numeral::decimal_literal(slice)),
        RawToken::RadixNumber => TokenKind::Number(numeral::radix_literal(slice)?),
        RawToken::Str => TokenKind::Str(unescape(&slice[1..slice.len() - 1])?),
        RawToken::AngledStr => {
            TokenKind::Str(slice.trim_start_matches('«').trim_end_matches('»').to_string())
        }
        RawToken::UnterminatedStr => return Err(unterminated_string()),
        RawToken::Char => {
            let cooked = unescape(&slice[1..slice.len() - 1])?;
            TokenKind::Char(cooked.chars().next().unwrap_or('\0'))
        }

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::ElementPlus => TokenKind::ElementPlus,
        RawToken::ElementMinus => TokenKind::ElementMinus,
        RawToken::ElementStar => TokenKind::ElementStar,
        RawToken::ElementSlash => TokenKind::ElementSlash,
        RawToken::ElementPercent => TokenKind::ElementPercent,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::And,
        RawToken::PipePipe => TokenKind::Or,
        RawToken::Bang => TokenKind::Not,

        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,

        RawToken::Question => TokenKind::Question,
        RawToken::QuestionQuestion => TokenKind::QuestionQuestion,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::ColonEq => TokenKind::Assign,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Separator => TokenKind::Separator,
        RawToken::Colon => TokenKind::Colon,
        RawToken::PathSep => TokenKind::PathSep,
    };
    Ok(Some(kind))
}

/// Resolve backslash escapes in a straight-quoted literal body.
fn unescape(body: &str) -> Result<String, BugError> {
    if !body.contains('\\') {
        return Ok(body.to_string());
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(c @ ('"' | '\'' | '\\')) => out.push(c),
            Some(other) => return Err(invalid_escape(other)),
            None => return Err(invalid_escape(' ')),
        }
    }
    Ok(out)
}
