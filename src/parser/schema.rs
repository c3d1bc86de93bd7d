//! Input schema for V8 profiler logs.
//!
//! This module defines the structure of the preprocessed log documents we
//! read (`node --prof-process --preprocess` output). Only the fields the
//! converter consumes are modelled; everything else is ignored.

use serde::Deserialize;

/// Code object category reported by the profiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CodeType {
    #[serde(rename = "JS")]
    Js,
    #[serde(rename = "CPP")]
    Cpp,
    #[serde(rename = "SHARED_LIB")]
    SharedLib,
    #[serde(rename = "CODE")]
    Code,
    /// Any type string this converter does not know about
    #[serde(other)]
    Other,
}

/// Refinement of `CODE` and `JS` entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CodeKind {
    #[serde(rename = "LoadIC")]
    LoadIc,
    #[serde(rename = "StoreIC")]
    StoreIc,
    #[serde(rename = "KeyedStoreIC")]
    KeyedStoreIc,
    #[serde(rename = "KeyedLoadIC")]
    KeyedLoadIc,
    #[serde(rename = "LoadGlobalIC")]
    LoadGlobalIc,
    Handler,
    BytecodeHandler,
    Stub,
    Builtin,
    RegExp,
    Unopt,
    Opt,
    #[serde(other)]
    Other,
}

impl CodeKind {
    /// Whether this kind is one of the inline-cache flavours
    pub fn is_inline_cache(self) -> bool {
        matches!(
            self,
            CodeKind::LoadIc
                | CodeKind::StoreIc
                | CodeKind::KeyedStoreIc
                | CodeKind::KeyedLoadIc
                | CodeKind::LoadGlobalIc
                | CodeKind::Handler
        )
    }
}

/// One entry of the profiler's code table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeEntry {
    /// Raw name as emitted by V8 (may embed a source path)
    #[serde(default)]
    pub name: String,

    /// Code category; absent for entries V8 could not classify
    #[serde(default, rename = "type")]
    pub code_type: Option<CodeType>,

    /// Optional refinement of the category
    #[serde(default)]
    pub kind: Option<CodeKind>,
}

impl CodeEntry {
    pub fn new(name: impl Into<String>, code_type: CodeType) -> Self {
        Self {
            name: name.into(),
            code_type: Some(code_type),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: CodeKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// A single profiler sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Tick {
    /// Interleaved (code index, auxiliary value) pairs, leaf first
    #[serde(default)]
    pub s: Vec<i64>,
}

impl Tick {
    pub fn new(s: Vec<i64>) -> Self {
        Self { s }
    }
}

/// Parsed V8 log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Log {
    /// Code table; slots that could not be read stay `None` so indices are stable
    pub code: Vec<Option<CodeEntry>>,

    /// Samples in recording order
    pub ticks: Vec<Tick>,
}

impl Log {
    pub fn new(code: Vec<CodeEntry>, ticks: Vec<Tick>) -> Self {
        Self {
            code: code.into_iter().map(Some).collect(),
            ticks,
        }
    }

    /// Look up a code entry by a raw tick value.
    ///
    /// Negative and out-of-range indices yield `None`.
    pub fn code_entry(&self, index: i64) -> Option<&CodeEntry> {
        let index = usize::try_from(index).ok()?;
        self.code.get(index)?.as_ref()
    }
}
