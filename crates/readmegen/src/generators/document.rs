//! The README document tree and its assembly from package data.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::{Badges, RenderConfig};
use crate::model::{ExampleDoc, FuncDoc, Package, SubPackage, TypeDoc, ValueDoc};
use crate::readme::ReadmeData;

static BODY_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("body pattern is valid"));

/// A README, as an ordered list of sections borrowing from the package data.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub sections: Vec<Section<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    Title(&'a str),
    Badges(Vec<Badge>),
    /// Package doc comment, still in comment form.
    Doc(&'a str),
    Constants(Vec<ValueEntry<'a>>),
    Variables(Vec<ValueEntry<'a>>),
    Functions(Vec<FuncEntry<'a>>),
    Types(Vec<TypeEntry<'a>>),
    SubPackages(Vec<SubPackageEntry<'a>>),
    Examples(Vec<ExampleEntry<'a>>),
    Credit,
}

impl Section<'_> {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Title(_) => "title",
            Section::Badges(_) => "badges",
            Section::Doc(_) => "doc",
            Section::Constants(_) => "constants",
            Section::Variables(_) => "variables",
            Section::Functions(_) => "functions",
            Section::Types(_) => "types",
            Section::SubPackages(_) => "sub packages",
            Section::Examples(_) => "examples",
            Section::Credit => "credit",
        }
    }
}

/// A badge image linking to a service page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub alt: &'static str,
    pub image: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEntry<'a> {
    pub doc: &'a str,
    pub decl: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncEntry<'a> {
    pub name: &'a str,
    pub recv: Option<&'a str>,
    /// Link to the declaration in the sources.
    pub link: Option<String>,
    pub decl: &'a str,
    pub doc: &'a str,
    pub examples: Vec<ExampleEntry<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry<'a> {
    pub name: &'a str,
    pub link: Option<String>,
    /// Declaration with any struct or interface body collapsed to `{ ... }`.
    pub decl: String,
    pub doc: &'a str,
    pub consts: Vec<ValueEntry<'a>>,
    pub vars: Vec<ValueEntry<'a>>,
    pub factories: Vec<FuncEntry<'a>>,
    pub methods: Vec<FuncEntry<'a>>,
    pub examples: Vec<ExampleEntry<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPackageEntry<'a> {
    pub path: &'a str,
    pub synopsis: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleEntry<'a> {
    pub name: &'a str,
    pub doc: &'a str,
    /// Complete program when available, else the example body.
    pub code: &'a str,
    pub output: &'a str,
}

impl<'a> ExampleEntry<'a> {
    fn new(example: &'a ExampleDoc) -> Self {
        let code = example
            .play
            .as_deref()
            .filter(|play| !play.is_empty())
            .unwrap_or(example.code.as_str());
        Self {
            name: &example.name,
            doc: &example.doc,
            code,
            output: &example.output,
        }
    }

    /// Example shown at the package level on behalf of a hidden symbol.
    fn promoted(example: &'a ExampleDoc, owner: &'a str, owner_doc: &'a str) -> Self {
        let mut entry = Self::new(example);
        if entry.name.is_empty() {
            entry.name = owner;
        }
        if entry.doc.is_empty() {
            entry.doc = owner_doc;
        }
        entry
    }
}

/// Builds the README document for prepared package data.
pub fn build_document(data: &ReadmeData) -> Document<'_> {
    let package = &data.package;
    let config = &data.config;
    let mut sections = Vec::new();

    let title = if config.title.is_empty() {
        package.name.as_str()
    } else {
        config.title.as_str()
    };
    sections.push(Section::Title(title));

    let badges = badges(&config.badges, &package.import_path);
    if !badges.is_empty() {
        sections.push(Section::Badges(badges));
    }

    if !package.doc.is_empty() {
        sections.push(Section::Doc(&package.doc));
    }

    if config.consts && !package.consts.is_empty() {
        sections.push(Section::Constants(values(&package.consts)));
    }
    if config.vars && !package.vars.is_empty() {
        sections.push(Section::Variables(values(&package.vars)));
    }

    if config.functions && !package.funcs.is_empty() {
        let funcs = package
            .funcs
            .iter()
            .map(|func| func_entry(func, config))
            .collect();
        sections.push(Section::Functions(funcs));
    }

    if config.types && !package.types.is_empty() {
        let types = package
            .types
            .iter()
            .map(|ty| type_entry(ty, config))
            .collect();
        sections.push(Section::Types(types));
    }

    if !config.skip_sub_packages && !data.sub_packages.is_empty() {
        sections.push(Section::SubPackages(sub_packages(&data.sub_packages)));
    }

    if !config.skip_examples {
        let examples = collect_examples(package, config);
        if !examples.is_empty() {
            sections.push(Section::Examples(examples));
        }
    }

    if config.credit {
        sections.push(Section::Credit);
    }

    debug!(
        "Assembled sections: {}",
        sections
            .iter()
            .map(Section::name)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Document { sections }
}

/// Badges enabled in `badges`, in display order.
pub fn badges(badges: &Badges, import_path: &str) -> Vec<Badge> {
    let full_name = import_path.strip_prefix("github.com/").unwrap_or(import_path);
    let mut out = Vec::new();

    if badges.travis_ci {
        out.push(Badge {
            alt: "Build Status",
            image: format!("https://travis-ci.org/{full_name}.svg?branch=master"),
            link: format!("https://travis-ci.org/{full_name}"),
        });
    }
    if badges.code_cov {
        out.push(Badge {
            alt: "codecov",
            image: format!("https://codecov.io/gh/{full_name}/branch/master/graph/badge.svg"),
            link: format!("https://codecov.io/gh/{full_name}"),
        });
    }
    if badges.golang_ci {
        out.push(Badge {
            alt: "golangci",
            image: format!("https://golangci.com/badges/{import_path}.svg"),
            link: format!("https://golangci.com/r/{import_path}"),
        });
    }
    if badges.go_doc {
        out.push(Badge {
            alt: "GoDoc",
            image: "https://img.shields.io/badge/pkg.go.dev-doc-blue".to_string(),
            link: format!("http://pkg.go.dev/{import_path}"),
        });
    }
    if badges.go_report_card {
        out.push(Badge {
            alt: "Go Report Card",
            image: format!("https://goreportcard.com/badge/{import_path}"),
            link: format!("https://goreportcard.com/report/{import_path}"),
        });
    }
    out
}

/// Replaces a `{...}` body in a declaration with `{ ... }`.
pub fn collapse_body(decl: &str) -> String {
    BODY_RX.replace_all(decl, "{ ... }").into_owned()
}

fn values(values: &[ValueDoc]) -> Vec<ValueEntry<'_>> {
    values
        .iter()
        .map(|value| ValueEntry {
            doc: &value.doc,
            decl: &value.decl,
        })
        .collect()
}

fn func_entry<'a>(func: &'a FuncDoc, config: &RenderConfig) -> FuncEntry<'a> {
    FuncEntry {
        name: &func.name,
        recv: func.recv.as_deref(),
        link: func.pos.as_ref().map(|pos| pos.link()),
        decl: &func.decl,
        doc: &func.doc,
        examples: inline_examples(&func.examples, config),
    }
}

fn type_entry<'a>(ty: &'a TypeDoc, config: &RenderConfig) -> TypeEntry<'a> {
    let funcs = |funcs: &'a [FuncDoc], shown: bool| -> Vec<FuncEntry<'a>> {
        if shown {
            funcs.iter().map(|func| func_entry(func, config)).collect()
        } else {
            Vec::new()
        }
    };

    TypeEntry {
        name: &ty.name,
        link: ty.pos.as_ref().map(|pos| pos.link()),
        decl: collapse_body(&ty.decl),
        doc: &ty.doc,
        consts: if config.consts { values(&ty.consts) } else { Vec::new() },
        vars: if config.vars { values(&ty.vars) } else { Vec::new() },
        factories: funcs(ty.funcs.as_slice(), config.show_factories()),
        methods: funcs(ty.methods.as_slice(), config.show_methods()),
        examples: inline_examples(&ty.examples, config),
    }
}

fn inline_examples<'a>(examples: &'a [ExampleDoc], config: &RenderConfig) -> Vec<ExampleEntry<'a>> {
    if config.skip_examples {
        return Vec::new();
    }
    examples.iter().map(ExampleEntry::new).collect()
}

fn sub_packages(sub_packages: &[SubPackage]) -> Vec<SubPackageEntry<'_>> {
    sub_packages
        .iter()
        .map(|sub| SubPackageEntry {
            path: &sub.path,
            synopsis: sub.package.synopsis(),
        })
        .collect()
}

/// Package examples plus the examples of every symbol left out of the README.
fn collect_examples<'a>(package: &'a Package, config: &RenderConfig) -> Vec<ExampleEntry<'a>> {
    let mut examples: Vec<ExampleEntry<'a>> =
        package.examples.iter().map(ExampleEntry::new).collect();

    let mut promote = |owner: &'a str, owner_doc: &'a str, owned: &'a [ExampleDoc]| {
        examples.extend(
            owned
                .iter()
                .map(|example| ExampleEntry::promoted(example, owner, owner_doc)),
        );
    };

    if !config.functions {
        for func in &package.funcs {
            promote(func.name.as_str(), func.doc.as_str(), func.examples.as_slice());
        }
    }

    for ty in &package.types {
        if !config.types {
            promote(ty.name.as_str(), ty.doc.as_str(), ty.examples.as_slice());
        }
        if !config.show_factories() {
            for func in &ty.funcs {
                promote(func.name.as_str(), func.doc.as_str(), func.examples.as_slice());
            }
        }
        if !config.show_methods() {
            for method in &ty.methods {
                promote(method.name.as_str(), method.doc.as_str(), method.examples.as_slice());
            }
        }
    }

    examples
}
