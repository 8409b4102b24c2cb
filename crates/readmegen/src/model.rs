use serde::{Deserialize, Serialize};

/// Documentation metadata for a single package, as produced by the doc extractor.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Package name. Empty when the directory is not a documentable package.
    pub name: String,
    /// Import path of the package.
    pub import_path: String,
    /// Name of the project the package belongs to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_name: String,
    /// Package doc comment.
    pub doc: String,
    /// One-line summary. Derived from `doc` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    /// Whether the package builds a command (`package main`).
    pub is_command: bool,
    /// Package-level constant declarations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consts: Vec<ValueDoc>,
    /// Package-level variable declarations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<ValueDoc>,
    /// Exported functions not associated with a type.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<FuncDoc>,
    /// Exported types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDoc>,
    /// Package-level runnable examples.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleDoc>,
    /// Names of child directories, relative to this package.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subdirectories: Vec<String>,
}

impl Package {
    /// Creates an empty package with the given name and import path.
    pub fn new(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_path: import_path.into(),
            ..Self::default()
        }
    }

    /// Returns `false` for directories that hold no package.
    pub fn is_documentable(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns the explicit synopsis or the first sentence of the doc comment.
    pub fn synopsis(&self) -> String {
        match &self.synopsis {
            Some(synopsis) => synopsis.clone(),
            None => synopsis(&self.doc),
        }
    }
}

/// A group of constant or variable declarations sharing one doc comment.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueDoc {
    /// Declared names.
    pub names: Vec<String>,
    /// Doc comment.
    pub doc: String,
    /// Declaration source text.
    pub decl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<SourcePos>,
}

/// An exported function or method.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuncDoc {
    pub name: String,
    pub doc: String,
    /// Signature source text, e.g. `func Func() error`.
    pub decl: String,
    /// Receiver type for methods, e.g. `*Client`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<SourcePos>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleDoc>,
}

impl FuncDoc {
    pub fn new(name: impl Into<String>, decl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: decl.into(),
            ..Self::default()
        }
    }
}

/// An exported type with its associated declarations.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDoc {
    pub name: String,
    pub doc: String,
    /// Type declaration source text.
    pub decl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<SourcePos>,
    /// Constants of this type.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consts: Vec<ValueDoc>,
    /// Variables of this type.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<ValueDoc>,
    /// Functions returning this type.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<FuncDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<FuncDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleDoc>,
}

impl TypeDoc {
    pub fn new(name: impl Into<String>, decl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: decl.into(),
            ..Self::default()
        }
    }
}

/// A runnable example.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleDoc {
    /// Example suffix name. Empty for the unnamed example of a symbol.
    pub name: String,
    pub doc: String,
    /// Body of the example function.
    pub code: String,
    /// Complete runnable program, preferred over `code` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play: Option<String>,
    /// Expected output.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output: String,
}

impl ExampleDoc {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Self::default()
        }
    }
}

/// Location of a declaration in the package sources.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePos {
    /// File name relative to the package directory.
    pub file: String,
    /// Browsable URL of the file, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// One-based line number.
    pub line: u32,
}

impl SourcePos {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            url: None,
            line,
        }
    }

    /// Link target for the declaration: the file URL (or `/<file>`) anchored at the line.
    pub fn link(&self) -> String {
        match &self.url {
            Some(url) if !url.is_empty() => format!("{}#L{}", url, self.line),
            _ => format!("/{}#L{}", self.file, self.line),
        }
    }
}

/// A fetched child package together with its path relative to the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPackage {
    /// Slash separated path relative to the root package.
    pub path: String,
    pub package: Package,
}

/// Computes the one-line summary of a doc comment: the first sentence of the
/// first paragraph, with whitespace collapsed.
///
/// Comments starting with a copyright or authorship notice have no synopsis.
pub fn synopsis(doc: &str) -> String {
    let paragraph = doc
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or_default();
    let collapsed = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
    let sentence = &collapsed[..first_sentence_len(&collapsed)];

    let lower = sentence.to_lowercase();
    const IGNORED_PREFIXES: [&str; 3] = ["copyright", "all rights", "author"];
    if IGNORED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return String::new();
    }
    sentence.to_string()
}

/// Length of the first sentence: up to a period followed by a space that is
/// not preceded by a single uppercase letter (so "U.S. law" is not split).
fn first_sentence_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let (mut ppp, mut pp, mut p) = (0u8, 0u8, 0u8);
    for (i, &q) in bytes.iter().enumerate() {
        if q == b' ' && p == b'.' && (!pp.is_ascii_uppercase() || ppp.is_ascii_uppercase()) {
            return i;
        }
        if pp == b'\xe3' && p == b'\x80' && q == b'\x82' {
            // ideographic full stop
            return i + 1;
        }
        ppp = pp;
        pp = p;
        p = q;
    }
    s.len()
}
