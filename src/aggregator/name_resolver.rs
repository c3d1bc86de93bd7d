//! Resolve code-table entries into short, de-duplicated labels.
//!
//! Labels follow the conventions of V8's own tick processor:
//! `(C++) `, `(lib) `, `(IC) `, `(bytecode) ~`, `(stub) `, `(builtin) `,
//! `(regexp) ` prefixes, `~` for unoptimized JS and bare names for
//! optimized JS. JavaScript source paths are shortened by replacing the
//! path prefix shared by every JS entry with `./`.

use crate::parser::schema::{CodeEntry, CodeKind, CodeType};
use crate::utils::config::{SHARED_PATH_REPLACEMENT, UNKNOWN_LABEL};
use log::debug;
use regex::Regex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Index of a label in a [`NameTable`]
pub type NameId = usize;

/// "a name token, a space, then a `/`-rooted path token"
static JS_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S* (/\S+/)").expect("valid JS path regex"));

/// Symbol following a `t`/`T` marker, cut before argument or template lists
static CPP_SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[tT] ([^(<]*)").expect("valid C++ symbol regex"));

/// Ordered, duplicate-free label table
///
/// A label's position is its [`NameId`]; positions never change once assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
    ids: HashMap<String, NameId>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `label`, assigning the next id on first sight
    pub fn intern(&mut self, label: String) -> NameId {
        match self.ids.entry(label) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = self.names.len();
                self.names.push(entry.key().clone());
                entry.insert(id);
                id
            }
        }
    }

    pub fn get(&self, id: NameId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn id_of(&self, label: &str) -> Option<NameId> {
        self.ids.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

/// Maps code entries to display labels for one log
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    shared_path: Option<String>,
}

impl NameResolver {
    /// Build a resolver, detecting the shared JS path of `code`
    pub fn new<'a, I>(code: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a CodeEntry>>,
    {
        let shared_path = find_shared_path(code);
        match &shared_path {
            Some(path) => debug!("Shortening JS paths with shared prefix '{}'", path),
            None => debug!("No shared JS path prefix found"),
        }
        Self { shared_path }
    }

    pub fn shared_path(&self) -> Option<&str> {
        self.shared_path.as_deref()
    }

    /// Resolve an entry (or a missing one) to its label
    pub fn resolve(&self, code: Option<&CodeEntry>) -> String {
        code_to_name(code, self.shared_path())
    }
}

/// Find the longest path prefix shared by all JS entries
///
/// Returns `None` when no JS entry carries a path or the paths have
/// nothing in common.
pub fn find_shared_path<'a, I>(code: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a CodeEntry>>,
{
    let mut shared: Option<String> = None;

    for entry in code.into_iter().flatten() {
        if entry.code_type != Some(CodeType::Js) {
            continue;
        }
        let Some(path) = JS_PATH_RE
            .captures(&entry.name)
            .and_then(|caps| caps.get(1))
        else {
            continue;
        };

        let next = match shared {
            Some(current) => common_prefix(&current, path.as_str()).to_string(),
            None => path.as_str().to_string(),
        };
        if next.is_empty() {
            return None;
        }
        shared = Some(next);
    }

    shared
}

/// Longest common leading substring of `a` and `b`, compared by character
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| {
            // One string is a prefix of the other
            a.char_indices()
                .nth(b.chars().count())
                .map(|(idx, _)| idx)
                .unwrap_or(a.len())
        });
    &a[..end]
}

/// Turn a code entry into its display label
///
/// **Public** - the labeling rules; first match wins
pub fn code_to_name(code: Option<&CodeEntry>, shared_path: Option<&str>) -> String {
    let Some(code) = code else {
        return UNKNOWN_LABEL.to_string();
    };
    let Some(code_type) = code.code_type else {
        return UNKNOWN_LABEL.to_string();
    };

    match code_type {
        CodeType::Cpp => {
            let name = CPP_SYMBOL_RE
                .captures(&code.name)
                .and_then(|caps| caps.get(1))
                .map_or(code.name.as_str(), |m| m.as_str());
            format!("(C++) {}", name)
        }
        CodeType::SharedLib => format!("(lib) {}", code.name),
        CodeType::Code => match code.kind {
            Some(kind) if kind.is_inline_cache() => format!("(IC) {}", code.name),
            Some(CodeKind::BytecodeHandler) => format!("(bytecode) ~{}", code.name),
            Some(CodeKind::Stub) => format!("(stub) {}", code.name),
            Some(CodeKind::Builtin) => format!("(builtin) {}", code.name),
            Some(CodeKind::RegExp) => format!("(regexp) {}", code.name),
            _ => UNKNOWN_LABEL.to_string(),
        },
        CodeType::Js => {
            let mut name = match shared_path {
                Some(path) if !path.is_empty() => {
                    code.name.replacen(path, SHARED_PATH_REPLACEMENT, 1)
                }
                _ => code.name.clone(),
            };
            if name.starts_with(' ') {
                name.insert_str(0, "(anonymous)");
            }
            match code.kind {
                Some(CodeKind::Builtin | CodeKind::Unopt) => format!("~{}", name),
                Some(CodeKind::Opt) => name,
                _ => UNKNOWN_LABEL.to_string(),
            }
        }
        CodeType::Other => UNKNOWN_LABEL.to_string(),
    }
}
