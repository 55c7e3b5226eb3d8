//! Declaration dumper.
//!
//! Pure function from a [`ModuleInfo`] to `.d.ts` text. Output is
//! grouped into `module` blocks: an optional outer block for the
//! declared package, then two blocks named for the module — the first
//! holding entries whose own name equals the module name, the second
//! holding everything else. Private entries and members are omitted
//! entirely.

use hxd_ir::{
    Argument, ClassDecl, DeclarationEntry, EnumDecl, InterfaceDecl, Member, ModuleInfo, TypedefDecl,
};

use crate::emitter::StringEmitter;
use crate::types::{argument_name, TypeResolver};

/// Render a module to declaration text.
pub fn render(info: &ModuleInfo) -> String {
    Dumper::new(info).run()
}

struct Dumper<'a> {
    info: &'a ModuleInfo,
    resolver: TypeResolver,
    out: StringEmitter,
}

impl<'a> Dumper<'a> {
    fn new(info: &'a ModuleInfo) -> Self {
        Dumper {
            info,
            resolver: TypeResolver::new(info),
            out: StringEmitter::with_capacity(1024),
        }
    }

    fn run(mut self) -> String {
        if let Some(package) = &self.info.package {
            self.out.line(&format!("module {package} {{"));
            self.out.blank();
            self.out.indent();
        }

        self.module_block(true);
        self.module_block(false);

        if self.info.package.is_some() {
            self.out.dedent();
            self.out.line("}");
            self.out.blank();
        }
        self.out.output()
    }

    /// One `module <name>` block; `primary` selects the entries whose
    /// own name equals the module name.
    fn module_block(&mut self, primary: bool) {
        let info = self.info;
        self.out.line(&format!("module {} {{", info.module_name));
        self.out.blank();
        self.out.indent();
        for entry in &info.entries {
            if (entry.name() == info.module_name) == primary {
                self.entry(entry);
            }
        }
        self.out.dedent();
        self.out.line("}");
        self.out.blank();
    }

    fn entry(&mut self, entry: &DeclarationEntry) {
        if entry.is_private() {
            return;
        }
        self.doc_comment(entry.comment());
        match entry {
            DeclarationEntry::Class(decl) => self.class(decl),
            DeclarationEntry::Interface(decl) => self.interface(decl),
            DeclarationEntry::Typedef(decl) => self.typedef(decl),
            DeclarationEntry::Enum(decl) => self.enumeration(decl),
        }
    }

    fn class(&mut self, decl: &ClassDecl) {
        self.out
            .line(&format!("class {}{} {{", decl.name, self.class_heritage(decl)));
        self.members(&decl.members);
        self.out.line("}");
        self.out.blank();
    }

    fn interface(&mut self, decl: &InterfaceDecl) {
        self.out.line(&format!(
            "interface {}{} {{",
            decl.name,
            self.interface_heritage(decl)
        ));
        self.members(&decl.members);
        self.out.line("}");
        self.out.blank();
    }

    fn typedef(&mut self, decl: &TypedefDecl) {
        // An alias typedef renders its target verbatim, unresolved.
        if let Some(alias) = &decl.alias {
            self.out
                .line(&format!("interface {} extends {alias} {{}}", decl.name));
            self.out.blank();
            return;
        }
        self.out.line(&format!("interface {} {{", decl.name));
        self.members(&decl.members);
        self.out.line("}");
        self.out.blank();
    }

    /// Argument-less cases form a flat tag block; payload cases become
    /// static factory functions in a companion module sharing the
    /// enum's name.
    fn enumeration(&mut self, decl: &EnumDecl) {
        self.out.line(&format!("enum {} {{", decl.name));
        self.out.indent();
        let last_plain = decl.values.iter().rposition(|v| v.arguments.is_none());
        for (i, value) in decl.values.iter().enumerate() {
            if value.arguments.is_none() {
                let comma = if last_plain.is_some_and(|last| i < last) {
                    ","
                } else {
                    ""
                };
                self.out.line(&format!("{}{comma}", value.name));
            }
        }
        self.out.dedent();
        self.out.line("}");
        self.out.blank();

        if decl.values.iter().all(|v| v.arguments.is_none()) {
            return;
        }
        self.out.line(&format!("module {} {{", decl.name));
        self.out.indent();
        for value in &decl.values {
            if let Some(arguments) = &value.arguments {
                self.out.line(&format!(
                    "static {}({}): {};",
                    value.name,
                    self.arguments(arguments),
                    decl.name
                ));
            }
        }
        self.out.dedent();
        self.out.line("}");
        self.out.blank();
    }

    fn members(&mut self, members: &[Member]) {
        self.out.indent();
        for member in members {
            self.member(member);
        }
        self.out.dedent();
    }

    fn member(&mut self, member: &Member) {
        if member.is_private() {
            return;
        }
        match member {
            Member::Property {
                name,
                ty,
                is_static,
                comment,
                ..
            } => {
                self.doc_comment(comment.as_deref());
                self.out.line(&format!(
                    "{}{name}: {};",
                    static_prefix(*is_static),
                    self.resolver.resolve_optional(ty.as_deref())
                ));
            }
            Member::Method {
                name,
                arguments,
                return_type,
                is_static,
                comment,
                ..
            } => {
                self.doc_comment(comment.as_deref());
                self.out.line(&format!(
                    "{}{name}({}): {};",
                    static_prefix(*is_static),
                    self.arguments(arguments),
                    self.resolver.resolve_optional(return_type.as_deref())
                ));
            }
        }
    }

    fn arguments(&self, arguments: &[Argument]) -> String {
        let rendered: Vec<String> = arguments
            .iter()
            .map(|arg| {
                let marker = if arg.is_optional || arg.default_value.is_some() {
                    "?"
                } else {
                    ""
                };
                format!(
                    "{}{marker}: {}",
                    argument_name(&arg.name),
                    self.resolver.resolve_optional(arg.ty.as_deref())
                )
            })
            .collect();
        rendered.join(", ")
    }

    /// Heritage clauses in fixed order: extends-class, then implements.
    fn class_heritage(&self, decl: &ClassDecl) -> String {
        let mut clauses = Vec::new();
        if let Some(base) = &decl.extends_class {
            clauses.push(format!("extends {}", self.resolver.resolve(base)));
        }
        if !decl.implements_interfaces.is_empty() {
            let list: Vec<String> = decl
                .implements_interfaces
                .iter()
                .map(|name| self.resolver.resolve(name))
                .collect();
            clauses.push(format!("implements {}", list.join(", ")));
        }
        join_clauses(&clauses)
    }

    fn interface_heritage(&self, decl: &InterfaceDecl) -> String {
        if decl.extends_interfaces.is_empty() {
            return String::new();
        }
        let list: Vec<String> = decl
            .extends_interfaces
            .iter()
            .map(|name| self.resolver.resolve(name))
            .collect();
        join_clauses(&[format!("extends {}", list.join(", "))])
    }

    fn doc_comment(&mut self, comment: Option<&str>) {
        let Some(text) = comment else {
            return;
        };
        if text.contains('\n') {
            self.out.line("/**");
            for line in text.lines() {
                let starred = format!(" * {line}");
                self.out.line(starred.trim_end());
            }
            self.out.line(" */");
        } else {
            self.out.line(&format!("/** {text} */"));
        }
    }
}

fn static_prefix(is_static: bool) -> &'static str {
    if is_static {
        "static "
    } else {
        ""
    }
}

fn join_clauses(clauses: &[String]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" {}", clauses.join(" "))
    }
}
