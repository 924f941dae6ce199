use std::fmt;

/// Declared type of a variable, parameter or function result.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeName {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Char,
    Str,
    List,
    Tuple,
    Set,
    Map,
    Any,
    Void,
}

impl TypeName {
    /// Resolve a type spelling. Several spellings are accepted for some types.
    pub fn from_spelling(text: &str) -> Option<TypeName> {
        let ty = match text {
            "عدد_قصير_جدا" | "بايت" => TypeName::Byte,
            "عدد_قصير" => TypeName::Short,
            "عدد_صحيح" | "عدد" => TypeName::Int,
            "عدد_طويل" => TypeName::Long,
            "عدد_عائم" => TypeName::Float,
            "عدد_عائم_طويل" => TypeName::Double,
            "منطقي" | "بوليان" => TypeName::Bool,
            "حرف" | "رمز" => TypeName::Char,
            "تسلسل_رموز" | "نص" => TypeName::Str,
            "قائمة" => TypeName::List,
            "تركيبة" => TypeName::Tuple,
            "مجموعة" => TypeName::Set,
            "مصفوفة_ترابطية" => TypeName::Map,
            "أي_نمط" => TypeName::Any,
            "عدم" | "فراغ" => TypeName::Void,
            _ => return None,
        };
        Some(ty)
    }

    pub const fn spelling(self) -> &'static str {
        match self {
            TypeName::Byte => "عدد_قصير_جدا",
            TypeName::Short => "عدد_قصير",
            TypeName::Int => "عدد_صحيح",
            TypeName::Long => "عدد_طويل",
            TypeName::Float => "عدد_عائم",
            TypeName::Double => "عدد_عائم_طويل",
            TypeName::Bool => "منطقي",
            TypeName::Char => "حرف",
            TypeName::Str => "تسلسل_رموز",
            TypeName::List => "قائمة",
            TypeName::Tuple => "تركيبة",
            TypeName::Set => "مجموعة",
            TypeName::Map => "مصفوفة_ترابطية",
            TypeName::Any => "أي_نمط",
            TypeName::Void => "عدم",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeName::Byte
                | TypeName::Short
                | TypeName::Int
                | TypeName::Long
                | TypeName::Float
                | TypeName::Double
        )
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}
