//! Raw token definition.
//!
//! Keywords are not listed here. Every word lexes as [`RawToken::Ident`] and
//! the synonym table in [`crate::keywords`] decides afterwards whether it is
//! a keyword, so one keyword kind can have any number of spellings without
//! one rule per spelling.

use logos::Logos;

/// Consume a `#* ... *#` block comment. An unclosed comment is an error.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    match lex.remainder().find("*#") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f\u{200F}\u{200E}]+")]
pub(crate) enum RawToken {
    #[regex(r"#[^*\n][^\n]*")]
    #[token("#")]
    LineComment,

    #[token("#*", block_comment)]
    BlockComment,

    // Identifiers: Arabic letters (incl. tatweel), Latin letters, `_`;
    // continued by diacritics and digits of either script.
    #[regex(r"[\u{0621}-\u{064A}\u{0671}-\u{06D3}\u{06FA}-\u{06FF}a-zA-Z_][\u{0621}-\u{065F}\u{0670}-\u{06D3}\u{06FA}-\u{06FF}a-zA-Z_0-9\u{0660}-\u{0669}\u{06F0}-\u{06F9}]*")]
    Ident,

    // Numbers in Western, Arabic-Indic or Extended Arabic-Indic digits.
    #[regex(r"[0-9\u{0660}-\u{0669}\u{06F0}-\u{06F9}]+([.\u{066B}][0-9\u{0660}-\u{0669}\u{06F0}-\u{06F9}]+)?")]
    Number,

    // `<digits>'<radix>'`. Digits above nine are Latin letters, so the
    // literal may start with one (`ff'16'`); the quotes keep it longer than
    // the identifier it begins with.
    #[regex(r"[0-9\u{0660}-\u{0669}\u{06F0}-\u{06F9}a-zA-Z][0-9\u{0660}-\u{0669}\u{06F0}-\u{06F9}a-zA-Z]*'[0-9\u{0660}-\u{0669}\u{06F0}-\u{06F9}]+'")]
    RadixNumber,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r"«[^»]*»")]
    AngledStr,

    #[token("\"")]
    UnterminatedStr,

    #[regex(r"'([^'\\\n]|\\.)'")]
    Char,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    StarStar,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<+>")]
    ElementPlus,
    #[token("<->")]
    ElementMinus,
    #[token("<*>")]
    ElementStar,
    #[token("</>")]
    ElementSlash,
    #[token("<%>")]
    ElementPercent,

    // Comparison and logic
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // Bitwise
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,

    // Punctuation
    #[token("?")]
    #[token("؟")]
    Question,
    #[token("??")]
    #[token("؟؟")]
    QuestionQuestion,
    #[token("->")]
    Arrow,
    #[token(":=")]
    ColonEq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    #[token(";")]
    #[token("،")]
    #[token("؛")]
    #[token("٬")]
    Separator,
    #[token(":")]
    Colon,
    #[token("::")]
    #[token(":::")]
    PathSep,
}
