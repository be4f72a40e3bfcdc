// Used in both Token and the variable store

/// A variable name, normalized to Rm_Basic_Camel_Case.
/// The suffix decides what kind of value the variable holds.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Float(String),
    String(String),
    Integer(String),
}

impl Ident {
    /// Build from raw source text such as `my_var%`.
    pub fn new(raw: &str) -> Ident {
        let name = normalize(raw);
        if name.ends_with('$') {
            Ident::String(name)
        } else if name.ends_with('%') {
            Ident::Integer(name)
        } else {
            Ident::Float(name)
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Ident::Float(s) | Ident::String(s) | Ident::Integer(s) => s,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Ident::String(_))
    }

    /// Upper case form used for keyword and function lookups.
    pub fn upper(&self) -> String {
        self.name().to_ascii_uppercase()
    }
}

fn normalize(raw: &str) -> String {
    let mut s = String::with_capacity(raw.len());
    let mut word_start = true;
    for ch in raw.chars() {
        if ch == '_' {
            word_start = true;
            s.push(ch);
        } else if word_start {
            word_start = false;
            s.push(ch.to_ascii_uppercase());
        } else {
            s.push(ch.to_ascii_lowercase());
        }
    }
    s
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(
            Ident::new("rM_baSic_HAD_thiS_Weird_camel_case_tHING_GoInG_On$"),
            Ident::String("Rm_Basic_Had_This_Weird_Camel_Case_Thing_Going_On$".to_string())
        );
        assert_eq!(Ident::new("xpOs%"), Ident::Integer("Xpos%".to_string()));
        assert_eq!(Ident::new("meh"), Ident::Float("Meh".to_string()));
    }

    #[test]
    fn test_trailing_underscore() {
        assert_eq!(Ident::new("a_"), Ident::Float("A_".to_string()));
        assert_eq!(Ident::new("a__b"), Ident::Float("A__B".to_string()));
    }
}
