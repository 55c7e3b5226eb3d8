//! Hand-rolled declaration matchers.
//!
//! Each matcher inspects the text at the cursor and either returns a
//! parsed head plus the number of bytes consumed, or `None` — in which
//! case the scanner tries the next matcher in its fixed priority order.
//! There is no backtracking across matchers and no error reporting:
//! text nothing matches is skipped one character at a time.
//!
//! Generic parameter lists are accepted through bounded character
//! classes (identifier characters plus `<`, `>`, `,`, `(`, `)`, `:`,
//! `-`), not a recursive grammar. The preprocessor has already deleted
//! whitespace inside angle brackets, so a generic list always reaches
//! these matchers as one unbroken run.

use hxd_ir::Argument;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Name class for interfaces, enums, typedef alias targets and class
/// generic interiors.
fn is_wide_name_char(c: char) -> bool {
    is_ident_continue(c) || matches!(c, '<' | '>' | ',' | '(' | ')' | ':' | '-')
}

/// Name class for typedef names.
fn is_typedef_name_char(c: char) -> bool {
    is_ident_continue(c) || matches!(c, '<' | '>' | ',')
}

/// Character class for type annotations (property types, return types,
/// argument types).
fn is_type_char(c: char) -> bool {
    is_ident_continue(c) || matches!(c, '<' | '>' | ',' | '-')
}

/// Name class for method names (may carry a generic parameter list).
fn is_method_name_char(c: char) -> bool {
    is_ident_continue(c) || matches!(c, '<' | '>' | ',' | ':' | '-')
}

/// Byte length of the leading run of characters satisfying `pred`.
fn run_len(s: &str, pred: fn(char) -> bool) -> usize {
    s.chars()
        .take_while(|c| pred(*c))
        .map(char::len_utf8)
        .sum()
}

/// Byte length of leading whitespace.
fn ws(s: &str) -> usize {
    s.chars()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum()
}

/// Match an identifier: `[a-zA-Z_][a-zA-Z0-9_]*`.
fn ident(s: &str) -> Option<usize> {
    if !s.chars().next().is_some_and(is_ident_start) {
        return None;
    }
    Some(run_len(s, is_ident_continue))
}

/// Match a name: identifier start, then a run of `pred` characters.
fn name(s: &str, pred: fn(char) -> bool) -> Option<usize> {
    if !s.chars().next().is_some_and(is_ident_start) {
        return None;
    }
    Some(run_len(s, pred))
}

/// Match a dotted path: `ident(.ident)*`.
fn dotted_path(s: &str) -> Option<usize> {
    let mut j = ident(s)?;
    while s[j..].starts_with('.') {
        match ident(&s[j + 1..]) {
            Some(l) => j += 1 + l,
            None => break,
        }
    }
    Some(j)
}

/// Match `kw` followed by at least one whitespace character; returns the
/// total consumed length.
fn keyword(s: &str, kw: &str) -> Option<usize> {
    let after = s.strip_prefix(kw)?;
    let w = ws(after);
    if w == 0 {
        return None;
    }
    Some(kw.len() + w)
}

/// Trailing `{` or `;` of a declaration head, after optional whitespace.
/// Returns `(opens_brace, consumed)`.
fn head_tail(s: &str) -> Option<(bool, usize)> {
    let w = ws(s);
    if s[w..].starts_with('{') {
        Some((true, w + 1))
    } else if s[w..].starts_with(';') {
        Some((false, w + 1))
    } else {
        None
    }
}

/// Optional generic suffix `<...>` after a class-like identifier.
///
/// The interior is a flat character-class run; when it contains `>` the
/// suffix extends to the last one, mirroring a greedy pattern over a
/// class that itself includes the angle brackets.
fn generic_suffix(s: &str) -> usize {
    if !s.starts_with('<') {
        return 0;
    }
    let run = &s[1..1 + run_len(&s[1..], is_wide_name_char)];
    match run.rfind('>') {
        Some(p) if p > 0 => 1 + p + 1,
        _ => 0,
    }
}

/// A heritage path: dotted segments of wide-name characters.
fn heritage_path(s: &str) -> Option<usize> {
    if !s.chars().next().is_some_and(is_ident_start) {
        return None;
    }
    let len = s
        .chars()
        .take_while(|c| is_wide_name_char(*c) || *c == '.')
        .map(char::len_utf8)
        .sum();
    Some(len)
}

// ---------------------------------------------------------------------------
// Declaration heads
// ---------------------------------------------------------------------------

pub struct PackageHead {
    pub path: Option<String>,
    pub len: usize,
}

/// `package a.b.c;` — the path is optional (`package;` is legal).
pub fn package(rest: &str) -> Option<PackageHead> {
    let mut j = keyword_or_bare(rest, "package")?;
    let mut path = None;
    if j > "package".len() {
        if let Some(plen) = dotted_path(&rest[j..]) {
            path = Some(rest[j..j + plen].to_string());
            j += plen;
        }
    }
    if !rest[j..].starts_with(';') {
        return None;
    }
    Some(PackageHead { path, len: j + 1 })
}

pub struct ImportHead {
    pub path: Option<String>,
    pub len: usize,
}

/// `import a.b.C;` — same shape as `package`.
pub fn import(rest: &str) -> Option<ImportHead> {
    let mut j = keyword_or_bare(rest, "import")?;
    let mut path = None;
    if j > "import".len() {
        if let Some(plen) = dotted_path(&rest[j..]) {
            path = Some(rest[j..j + plen].to_string());
            j += plen;
        }
    }
    if !rest[j..].starts_with(';') {
        return None;
    }
    Some(ImportHead { path, len: j + 1 })
}

/// `kw` followed by whitespace, or `kw` directly followed by the next
/// required character (used by package/import, where `package;` needs
/// no separating space).
fn keyword_or_bare(s: &str, kw: &str) -> Option<usize> {
    let after = s.strip_prefix(kw)?;
    Some(kw.len() + ws(after))
}

pub struct InterfaceHead {
    pub name: String,
    pub is_private: bool,
    pub extends: Vec<String>,
    pub opens_brace: bool,
    pub len: usize,
}

/// `[private] interface Name [extends A [extends B ...]] { | ;`
pub fn interface(rest: &str) -> Option<InterfaceHead> {
    let mut j = 0;
    let is_private = match keyword(rest, "private") {
        Some(l) => {
            j += l;
            true
        }
        None => false,
    };
    j += keyword(&rest[j..], "interface")?;
    let name_len = name(&rest[j..], is_wide_name_char)?;
    let decl_name = rest[j..j + name_len].to_string();
    j += name_len;

    let mut extends = Vec::new();
    loop {
        let Some((path, consumed)) = heritage_clause(&rest[j..], "extends") else {
            break;
        };
        extends.push(path);
        j += consumed;
    }

    let (opens_brace, tail) = head_tail(&rest[j..])?;
    Some(InterfaceHead {
        name: decl_name,
        is_private,
        extends,
        opens_brace,
        len: j + tail,
    })
}

/// One `\s+<kw>\s+<path>` clause; returns the path and consumed length.
fn heritage_clause(s: &str, kw: &str) -> Option<(String, usize)> {
    let w = ws(s);
    if w == 0 {
        return None;
    }
    let k = w + keyword(&s[w..], kw)?;
    let plen = heritage_path(&s[k..])?;
    if plen == 0 {
        return None;
    }
    Some((s[k..k + plen].to_string(), k + plen))
}

pub enum TypedefBody {
    /// `typedef Name = { ... }` — the `{` has been consumed.
    Struct,
    /// `typedef Name = Other;`
    Alias(String),
}

pub struct TypedefHead {
    pub name: String,
    pub is_private: bool,
    pub body: TypedefBody,
    pub len: usize,
}

/// `[private] typedef Name = { | Type;`
pub fn typedef(rest: &str) -> Option<TypedefHead> {
    let mut j = 0;
    let is_private = match keyword(rest, "private") {
        Some(l) => {
            j += l;
            true
        }
        None => false,
    };
    j += keyword(&rest[j..], "typedef")?;
    let name_len = name(&rest[j..], is_typedef_name_char)?;
    let decl_name = rest[j..j + name_len].to_string();
    j += name_len;

    j += ws(&rest[j..]);
    if !rest[j..].starts_with('=') {
        return None;
    }
    j += 1;
    j += ws(&rest[j..]);

    if rest[j..].starts_with('{') {
        return Some(TypedefHead {
            name: decl_name,
            is_private,
            body: TypedefBody::Struct,
            len: j + 1,
        });
    }

    let ty_len = name(&rest[j..], is_wide_name_char)?;
    let alias = rest[j..j + ty_len].to_string();
    j += ty_len;
    j += ws(&rest[j..]);
    if !rest[j..].starts_with(';') {
        return None;
    }
    Some(TypedefHead {
        name: decl_name,
        is_private,
        body: TypedefBody::Alias(alias),
        len: j + 1,
    })
}

pub struct ClassHead {
    pub name: String,
    pub is_extern: bool,
    pub is_private: bool,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub opens_brace: bool,
    pub len: usize,
}

/// `[extern] [private] class Name[<...>] [extends Base] [implements I ...] { | ;`
pub fn class(rest: &str) -> Option<ClassHead> {
    let mut j = 0;
    let is_extern = match keyword(rest, "extern") {
        Some(l) => {
            j += l;
            true
        }
        None => false,
    };
    let is_private = match keyword(&rest[j..], "private") {
        Some(l) => {
            j += l;
            true
        }
        None => false,
    };
    j += keyword(&rest[j..], "class")?;

    let id_len = ident(&rest[j..])?;
    let gen_len = generic_suffix(&rest[j + id_len..]);
    let decl_name = rest[j..j + id_len + gen_len].to_string();
    j += id_len + gen_len;

    let mut extends = None;
    if let Some((path, consumed)) = class_heritage(&rest[j..], "extends") {
        extends = Some(path);
        j += consumed;
    }

    let mut implements = Vec::new();
    while let Some((path, consumed)) = class_heritage(&rest[j..], "implements") {
        implements.push(path);
        j += consumed;
    }

    let (opens_brace, tail) = head_tail(&rest[j..])?;
    Some(ClassHead {
        name: decl_name,
        is_extern,
        is_private,
        extends,
        implements,
        opens_brace,
        len: j + tail,
    })
}

/// `\s+<kw>\s+a.b.Name[<...>]` — dotted identifier path plus optional
/// generic suffix, as allowed after `extends`/`implements` on classes.
fn class_heritage(s: &str, kw: &str) -> Option<(String, usize)> {
    let w = ws(s);
    if w == 0 {
        return None;
    }
    let k = w + keyword(&s[w..], kw)?;
    let plen = dotted_path(&s[k..])?;
    let gen_len = generic_suffix(&s[k + plen..]);
    Some((s[k..k + plen + gen_len].to_string(), k + plen + gen_len))
}

pub struct EnumHead {
    pub name: String,
    pub is_private: bool,
    pub opens_brace: bool,
    pub len: usize,
}

/// `[private] enum Name { | ;`
pub fn enum_head(rest: &str) -> Option<EnumHead> {
    let mut j = 0;
    let is_private = match keyword(rest, "private") {
        Some(l) => {
            j += l;
            true
        }
        None => false,
    };
    j += keyword(&rest[j..], "enum")?;
    let name_len = name(&rest[j..], is_wide_name_char)?;
    let decl_name = rest[j..j + name_len].to_string();
    j += name_len;

    let (opens_brace, tail) = head_tail(&rest[j..])?;
    Some(EnumHead {
        name: decl_name,
        is_private,
        opens_brace,
        len: j + tail,
    })
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// Modifier flags gathered in front of `function`/`var`.
///
/// Only `static` and `public` influence the model; the rest (plus
/// `@:meta` annotations on methods) are consumed and ignored.
#[derive(Default)]
pub struct Modifiers {
    pub is_static: bool,
    pub has_public: bool,
}

const METHOD_MODIFIERS: [&str; 6] = ["private", "static", "public", "override", "inline", "virtual"];
const PROPERTY_MODIFIERS: [&str; 6] = ["private", "static", "public", "override", "virtual", "inline"];

/// Consume a run of modifier keywords (each followed by whitespace).
/// `allow_meta` additionally accepts `@:token` annotations.
fn modifiers(rest: &str, set: &[&str], allow_meta: bool) -> (Modifiers, usize) {
    let mut flags = Modifiers::default();
    let mut j = 0;
    'outer: loop {
        for kw in set {
            if let Some(l) = keyword(&rest[j..], kw) {
                match *kw {
                    "static" => flags.is_static = true,
                    "public" => flags.has_public = true,
                    _ => {}
                }
                j += l;
                continue 'outer;
            }
        }
        if allow_meta && rest[j..].starts_with("@:") {
            let token = run_len(&rest[j..], |c| !c.is_whitespace());
            let w = ws(&rest[j + token..]);
            if token > 2 && w > 0 {
                j += token + w;
                continue;
            }
        }
        break;
    }
    (flags, j)
}

pub struct MethodHead {
    pub modifiers: Modifiers,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: Option<String>,
    pub opens_brace: bool,
    pub len: usize,
}

/// `[modifiers] function name(args)[: Ret] { | ;`
pub fn method(rest: &str) -> Option<MethodHead> {
    let (flags, mut j) = modifiers(rest, &METHOD_MODIFIERS, true);
    j += keyword(&rest[j..], "function")?;

    let name_len = name(&rest[j..], is_method_name_char)?;
    let method_name = rest[j..j + name_len].to_string();
    j += name_len;

    j += ws(&rest[j..]);
    if !rest[j..].starts_with('(') {
        return None;
    }
    j += 1;
    let args_len = rest[j..].find(')')?;
    let arguments = parse_arguments(&rest[j..j + args_len]);
    j += args_len + 1;

    let mut return_type = None;
    let before_return = j;
    let w = ws(&rest[j..]);
    if rest[j + w..].starts_with(':') {
        let t = j + w + 1;
        let t = t + ws(&rest[t..]);
        if let Some(ty_len) = name(&rest[t..], is_type_char) {
            return_type = Some(rest[t..t + ty_len].to_string());
            j = t + ty_len;
        } else {
            j = before_return;
        }
    }

    let (opens_brace, tail) = head_tail(&rest[j..])?;
    Some(MethodHead {
        modifiers: flags,
        name: method_name,
        arguments,
        return_type,
        opens_brace,
        len: j + tail,
    })
}

pub struct PropertyHead {
    pub modifiers: Modifiers,
    pub name: String,
    pub ty: Option<String>,
    pub default_value: Option<String>,
    pub len: usize,
}

/// `[modifiers] var name[(get, set)][: Type][= expr];`
///
/// The accessor list, if present, is consumed and discarded — a
/// declaration file has no use for `get`/`set` routing.
pub fn property(rest: &str) -> Option<PropertyHead> {
    let (flags, mut j) = modifiers(rest, &PROPERTY_MODIFIERS, false);
    j += keyword(&rest[j..], "var")?;

    let name_len = ident(&rest[j..])?;
    let prop_name = rest[j..j + name_len].to_string();
    j += name_len;

    // Accessor list.
    let w = ws(&rest[j..]);
    if rest[j + w..].starts_with('(') {
        if let Some(close) = rest[j + w + 1..].find(')') {
            j += w + 1 + close + 1;
        }
    }

    // Type annotation.
    let mut ty = None;
    let before_type = j;
    let w = ws(&rest[j..]);
    if rest[j + w..].starts_with(':') {
        let t = j + w + 1;
        let t = t + ws(&rest[t..]);
        if let Some(ty_len) = name(&rest[t..], is_type_char) {
            ty = Some(rest[t..t + ty_len].to_string());
            j = t + ty_len;
        } else {
            j = before_type;
        }
    }

    // Default value: a quoted literal, or anything up to the `;`.
    let mut default_value = None;
    let before_default = j;
    let w = ws(&rest[j..]);
    if rest[j + w..].starts_with('=') {
        let d = j + w + 1;
        let d = d + ws(&rest[d..]);
        if let Some(qlen) = quoted_string(&rest[d..]) {
            let after = d + qlen;
            let w2 = ws(&rest[after..]);
            if rest[after + w2..].starts_with(';') {
                default_value = Some(squeeze(&rest[d..after]));
                j = after;
            }
        }
        if default_value.is_none() {
            match rest[d..].find(';') {
                Some(dlen) if dlen > 0 => {
                    default_value = Some(squeeze(&rest[d..d + dlen]));
                    j = d + dlen;
                }
                _ => j = before_default,
            }
        }
    }

    let w = ws(&rest[j..]);
    if !rest[j + w..].starts_with(';') {
        return None;
    }
    Some(PropertyHead {
        modifiers: flags,
        name: prop_name,
        ty,
        default_value,
        len: j + w + 1,
    })
}

pub struct EnumValueHead {
    pub name: String,
    pub arguments: Option<Vec<Argument>>,
    pub len: usize,
}

/// `Name;` or `Name(args);` inside an open enum.
pub fn enum_value(rest: &str) -> Option<EnumValueHead> {
    let name_len = ident(rest)?;
    let value_name = rest[..name_len].to_string();
    let mut j = name_len;

    let mut arguments = None;
    let w = ws(&rest[j..]);
    if rest[j + w..].starts_with('(') {
        let open = j + w + 1;
        if let Some(close) = rest[open..].find(')') {
            arguments = Some(parse_arguments(&rest[open..open + close]));
            j = open + close + 1;
        }
    }

    let w = ws(&rest[j..]);
    if !rest[j + w..].starts_with(';') {
        return None;
    }
    Some(EnumValueHead {
        name: value_name,
        arguments,
        len: j + w + 1,
    })
}

// ---------------------------------------------------------------------------
// Skipped constructs
// ---------------------------------------------------------------------------

/// Length of a quoted string literal at the start of `rest`.
///
/// Double quotes use backslash escapes; single quotes use doubled `''`.
/// An unterminated literal does not match, so the scanner falls back to
/// single-character skipping.
pub fn quoted_string(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, '"')) => {
            let mut escaped = false;
            for (idx, c) in chars {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    return Some(idx + 1);
                }
            }
            None
        }
        Some((_, '\'')) => {
            let bytes = rest.as_bytes();
            let mut i = 1;
            while i < bytes.len() {
                if bytes[i] == b'\'' {
                    if bytes.get(i + 1) == Some(&b'\'') {
                        i += 2;
                    } else {
                        return Some(i + 1);
                    }
                } else {
                    i += 1;
                }
            }
            None
        }
        _ => None,
    }
}

/// A `#if` / `#else` / `#end` directive line, consumed through its
/// newline. Conditional branches are not evaluated — directive lines are
/// simply dropped and both branches scanned linearly.
pub fn preprocessor_line(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('#')?;
    if !(body.starts_with("if") || body.starts_with("else") || body.starts_with("end")) {
        return None;
    }
    rest.find('\n').map(|p| p + 1)
}

// ---------------------------------------------------------------------------
// Argument lists
// ---------------------------------------------------------------------------

fn squeeze(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse the interior of an argument list: `[?]name[: Type][= default]`
/// separated by commas. Whitespace is squeezed out first; unmatched
/// spans are skipped one character at a time, like the outer scanner.
pub fn parse_arguments(src: &str) -> Vec<Argument> {
    let mut input = squeeze(src);
    input.push(',');

    let mut arguments = Vec::new();
    let mut i = 0;
    while i < input.len() {
        match parse_one_argument(&input[i..]) {
            Some((arg, consumed)) => {
                arguments.push(arg);
                i += consumed;
            }
            None => {
                i += input[i..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    arguments
}

fn parse_one_argument(rest: &str) -> Option<(Argument, usize)> {
    let mut j = 0;
    let is_optional = rest.starts_with('?');
    if is_optional {
        j += 1;
    }

    let name_len = ident(&rest[j..])?;
    let arg_name = rest[j..j + name_len].to_string();
    j += name_len;

    if rest[j..].starts_with(':') {
        let tstart = j + 1;
        let full = name(&rest[tstart..], is_type_char)?;
        // The type class includes `,` and `>`, so the longest run can
        // overshoot the argument separator; back off until the rest of
        // the argument parses.
        let mut ty_len = full;
        while ty_len > 0 {
            let after = tstart + ty_len;
            if let Some((default_value, consumed)) = default_and_comma(&rest[after..]) {
                return Some((
                    Argument {
                        name: arg_name,
                        ty: Some(rest[tstart..tstart + ty_len].to_string()),
                        is_optional,
                        default_value,
                    },
                    after + consumed,
                ));
            }
            ty_len -= 1;
        }
        return None;
    }

    let (default_value, consumed) = default_and_comma(&rest[j..])?;
    Some((
        Argument {
            name: arg_name,
            ty: None,
            is_optional,
            default_value,
        },
        j + consumed,
    ))
}

/// `[= default],` — the trailing comma is mandatory (the caller appends
/// one to the squeezed input).
fn default_and_comma(rest: &str) -> Option<(Option<String>, usize)> {
    if rest.starts_with(',') {
        return Some((None, 1));
    }
    let value = rest.strip_prefix('=')?;
    let dlen = value.find(',')?;
    if dlen == 0 {
        return None;
    }
    Some((Some(value[..dlen].to_string()), 1 + dlen + 1))
}
