//! Keyword synonym table.
//!
//! Each keyword kind is registered once with every spelling it accepts.
//! The table is a hash map from spelling to kind, built on first use and
//! shared read-only afterwards, so a lookup is a single set-membership check
//! whatever the number of synonyms.

use std::sync::OnceLock;

use naftah_ir::TokenKind;
use rustc_hash::FxHashMap;

macro_rules! synonyms {
    ($($kind:expr => [$($spelling:literal),+ $(,)?]),* $(,)?) => {
        vec![$(($kind, &[$($spelling),+] as &'static [&'static str])),*]
    };
}

/// Every keyword kind with its accepted spellings.
fn synonyms() -> Vec<(TokenKind, &'static [&'static str])> {
    synonyms![
        TokenKind::Var => ["متغير"],
        TokenKind::Const => ["ثابت"],
        TokenKind::Assign => ["تعيين"],
        TokenKind::Function => ["دالة"],
        TokenKind::If => ["إذا", "اذا"],
        TokenKind::Then => ["إذن", "اذن"],
        TokenKind::ElseIf => ["غير_ذلك_إذا", "غير_ذلك_اذا"],
        TokenKind::Else => ["غير_ذلك"],
        TokenKind::End => ["أنهي", "انهي"],
        TokenKind::For => ["كرر_حلقة"],
        TokenKind::To => ["إلى", "الى"],
        TokenKind::DownTo => ["تنازليا"],
        TokenKind::Step => ["خطوة"],
        TokenKind::Do => ["إفعل", "افعل"],
        TokenKind::In => ["في"],
        TokenKind::While => ["بينما"],
        TokenKind::Repeat => ["كرر"],
        TokenKind::Until => ["حتى"],
        TokenKind::Break => ["اكسر"],
        TokenKind::Continue => ["تابع"],
        TokenKind::Return => ["ارجع", "أرجع", "اعد", "أعد"],
        TokenKind::Try => ["حاول"],
        TokenKind::Ok => ["نجاح"],
        TokenKind::Err => ["فشل"],
        TokenKind::Some => ["بعض"],
        TokenKind::NoneArm => ["معدوم"],
        TokenKind::Case => ["اختر"],
        TokenKind::Among => ["من_بين"],
        TokenKind::True => ["صحيح"],
        TokenKind::False => ["خطأ", "خاطئ"],
        TokenKind::Null => ["لاشيء", "باطل", "فارغ"],
        TokenKind::NaN => ["ليس_رقم", "قيمة_غير_رقمية", "رقم_غير_صالح", "غير_عددي", "ليس_عددي"],
        TokenKind::Raw => ["خام"],
        TokenKind::Plus => ["زائد"],
        TokenKind::Minus => ["ناقص"],
        TokenKind::Star => ["ضارب"],
        TokenKind::Slash => ["قسمة"],
        TokenKind::Percent => ["باقي"],
        TokenKind::StarStar => ["أس"],
        TokenKind::PlusPlus => ["زد"],
        TokenKind::MinusMinus => ["نقص"],
        TokenKind::EqEq => ["يساوي"],
        TokenKind::NotEq => ["لا_يساوي"],
        TokenKind::Lt => ["أصغر_من"],
        TokenKind::LtEq => ["أصغر_أو_يساوي"],
        TokenKind::Gt => ["أكبر_من"],
        TokenKind::GtEq => ["أكبر_أو_يساوي"],
        TokenKind::And => ["و"],
        TokenKind::Or => ["أو"],
        TokenKind::Not => ["ليس"],
    ]
}

fn table() -> &'static FxHashMap<&'static str, TokenKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = FxHashMap::default();
        for (kind, spellings) in synonyms() {
            for spelling in spellings {
                map.insert(*spelling, kind.clone());
            }
        }
        map
    })
}

/// Keyword kind for a word, or `None` for an ordinary identifier.
#[inline]
pub fn lookup(word: &str) -> Option<TokenKind> {
    table().get(word).cloned()
}

/// Every spelling accepted for `kind`, for diagnostics and completion.
pub fn spellings_of(kind: &TokenKind) -> Vec<&'static str> {
    let mut spellings: Vec<_> = table()
        .iter()
        .filter(|(_, k)| *k == kind)
        .map(|(s, _)| *s)
        .collect();
    spellings.sort_unstable();
    spellings
}
