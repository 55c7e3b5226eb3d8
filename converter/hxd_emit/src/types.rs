//! Type-name resolution.
//!
//! A [`TypeResolver`] is built once per module from a fixed builtin
//! table plus one entry per dotted import (last segment → full path).
//! Resolution first tries the whole raw string against the table; a
//! string carrying `>` is then parsed into a small type-expression tree
//! (identifier, `<`, `>`, `,`, `->`) whose names are resolved
//! individually before re-rendering. Anything the grammar cannot
//! express is returned unchanged — resolution never fails.

use hxd_ir::ModuleInfo;
use rustc_hash::FxHashMap;

const BUILTINS: [(&str, &str); 7] = [
    ("String", "string"),
    ("Int", "integer"),
    ("Float", "number"),
    ("Bool", "boolean"),
    ("Array<Dynamic>", "Array<any>"),
    ("Dynamic", "any"),
    ("Void", "void"),
];

/// Per-module type replacement table.
pub struct TypeResolver {
    replacements: FxHashMap<String, String>,
}

impl TypeResolver {
    pub fn new(info: &ModuleInfo) -> Self {
        let mut replacements = FxHashMap::default();
        for (from, to) in BUILTINS {
            replacements.insert(from.to_string(), to.to_string());
        }
        for dependency in &info.dependencies {
            if let Some(dot) = dependency.rfind('.') {
                replacements.insert(dependency[dot + 1..].to_string(), dependency.clone());
            }
        }
        TypeResolver { replacements }
    }

    /// Resolve a raw type name.
    pub fn resolve(&self, raw: &str) -> String {
        if let Some(replacement) = self.replacements.get(raw) {
            return replacement.clone();
        }
        if !raw.contains('>') {
            return raw.to_string();
        }
        match parse_type(raw) {
            Some(expr) => self.render(&expr),
            None => raw.to_string(),
        }
    }

    /// Resolve an optional type name; an absent type is `any`.
    pub fn resolve_optional(&self, raw: Option<&str>) -> String {
        match raw {
            Some(ty) => self.resolve(ty),
            None => "any".to_string(),
        }
    }

    fn lookup(&self, name: &str) -> String {
        self.replacements
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    fn render(&self, expr: &TypeExpr) -> String {
        match expr {
            TypeExpr::Name(name) => self.lookup(name),
            TypeExpr::Generic { base, args } => {
                let rendered: Vec<String> = args.iter().map(|arg| self.render(arg)).collect();
                format!("{}<{}>", self.lookup(base), rendered.join(","))
            }
            TypeExpr::Function { params, ret } => {
                let ret = self.render(ret);
                if let [single] = params.as_slice() {
                    let param = self.render(single);
                    if param == "void" {
                        format!("() => {ret}")
                    } else {
                        // A one-parameter non-void callback keeps the
                        // source arrow form.
                        format!("{param}->{ret}")
                    }
                } else {
                    let list: Vec<String> = params
                        .iter()
                        .enumerate()
                        .map(|(i, param)| format!("arg{}: {}", i + 1, self.render(param)))
                        .collect();
                    format!("({}) => {ret}", list.join(", "))
                }
            }
        }
    }
}

/// Normalize an argument name toward camelCase.
///
/// The leading character is lowercased iff it is uppercase, the name is
/// not fully uppercase (an acronym), and the second character is not
/// also uppercase (an acronym-like prefix). `Value` becomes `value`;
/// `ID`, `URLPath` and single-letter names stay unchanged.
pub fn argument_name(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if !first.is_uppercase()
        || name.chars().all(char::is_uppercase)
        || chars.next().is_some_and(char::is_uppercase)
    {
        return name.to_string();
    }
    let mut lowered: String = first.to_lowercase().collect();
    lowered.push_str(&name[first.len_utf8()..]);
    lowered
}

#[derive(Debug, PartialEq)]
enum TypeExpr {
    Name(String),
    Generic { base: String, args: Vec<TypeExpr> },
    Function { params: Vec<TypeExpr>, ret: Box<TypeExpr> },
}

#[derive(Debug, PartialEq)]
enum Token {
    Ident(String),
    Lt,
    Gt,
    Comma,
    Arrow,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn tokenize(raw: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if let Some(after) = rest.strip_prefix("->") {
            tokens.push(Token::Arrow);
            rest = after;
            continue;
        }
        match c {
            '<' => {
                tokens.push(Token::Lt);
                rest = &rest[1..];
            }
            '>' => {
                tokens.push(Token::Gt);
                rest = &rest[1..];
            }
            ',' => {
                tokens.push(Token::Comma);
                rest = &rest[1..];
            }
            _ if is_name_char(c) => {
                let len: usize = rest
                    .chars()
                    .take_while(|c| is_name_char(*c))
                    .map(char::len_utf8)
                    .sum();
                tokens.push(Token::Ident(rest[..len].to_string()));
                rest = &rest[len..];
            }
            _ => return None,
        }
    }
    Some(tokens)
}

/// Parse a complete type expression; `None` when the text does not fit
/// the bounded grammar (the caller then keeps the raw string).
fn parse_type(raw: &str) -> Option<TypeExpr> {
    let mut parser = Parser {
        tokens: tokenize(raw)?,
        pos: 0,
    };
    let expr = parser.type_expr()?;
    (parser.pos == parser.tokens.len()).then_some(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn eat(&mut self, token: &Token) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<String> {
        match self.tokens.get(self.pos) {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Some(name)
            }
            _ => None,
        }
    }

    /// `type := atom (-> atom)*` — an arrow chain flattens into one
    /// function whose parameters are every atom but the last.
    fn type_expr(&mut self) -> Option<TypeExpr> {
        let mut parts = vec![self.atom()?];
        while self.eat(&Token::Arrow) {
            parts.push(self.atom()?);
        }
        if parts.len() == 1 {
            parts.pop()
        } else {
            let ret = parts.pop()?;
            Some(TypeExpr::Function {
                params: parts,
                ret: Box::new(ret),
            })
        }
    }

    /// `atom := ident (< type (, type)* >)?`
    fn atom(&mut self) -> Option<TypeExpr> {
        let base = self.ident()?;
        if !self.eat(&Token::Lt) {
            return Some(TypeExpr::Name(base));
        }
        let mut args = vec![self.type_expr()?];
        while self.eat(&Token::Comma) {
            args.push(self.type_expr()?);
        }
        if !self.eat(&Token::Gt) {
            return None;
        }
        Some(TypeExpr::Generic { base, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver(dependencies: &[&str]) -> TypeResolver {
        let mut info = ModuleInfo::new("T");
        for dependency in dependencies {
            info.push_dependency(*dependency);
        }
        TypeResolver::new(&info)
    }

    #[test]
    fn builtin_substitution() {
        let r = resolver(&[]);
        assert_eq!(r.resolve("String"), "string");
        assert_eq!(r.resolve("Array<Dynamic>"), "Array<any>");
        assert_eq!(r.resolve_optional(None), "any");
    }

    #[test]
    fn unknown_name_is_unchanged() {
        assert_eq!(resolver(&[]).resolve("Widget"), "Widget");
    }

    #[test]
    fn import_provides_a_replacement() {
        let r = resolver(&["js.html.Element"]);
        assert_eq!(r.resolve("Element"), "js.html.Element");
    }

    #[test]
    fn generic_arguments_resolve_individually() {
        let r = resolver(&[]);
        assert_eq!(r.resolve("Map<Int,String>"), "Map<integer,string>");
        assert_eq!(r.resolve("Array<Array<Bool>>"), "Array<Array<boolean>>");
    }

    #[test]
    fn void_arrow_becomes_a_zero_parameter_function() {
        assert_eq!(resolver(&[]).resolve("Void->Int"), "() => integer");
    }

    #[test]
    fn arrow_chain_synthesizes_positional_parameters() {
        assert_eq!(
            resolver(&[]).resolve("String->Int->Bool"),
            "(arg1: string, arg2: integer) => boolean"
        );
    }

    #[test]
    fn one_parameter_non_void_arrow_keeps_its_shape() {
        assert_eq!(resolver(&[]).resolve("String->Int"), "string->integer");
    }

    #[test]
    fn arrow_inside_a_generic_resolves() {
        assert_eq!(
            resolver(&[]).resolve("Array<Void->Int>"),
            "Array<() => integer>"
        );
    }

    #[test]
    fn unparseable_text_is_returned_raw() {
        assert_eq!(resolver(&[]).resolve("Array<{x:Int}>"), "Array<{x:Int}>");
    }

    #[test]
    fn argument_casing_heuristic() {
        assert_eq!(argument_name("Value"), "value");
        assert_eq!(argument_name("ID"), "ID");
        assert_eq!(argument_name("URLPath"), "URLPath");
        assert_eq!(argument_name("A"), "A");
        assert_eq!(argument_name("A1"), "a1");
        assert_eq!(argument_name("x"), "x");
        assert_eq!(argument_name(""), "");
    }
}
