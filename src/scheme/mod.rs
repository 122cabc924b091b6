//! Scheme token → parser table. Populated at startup, read-only afterwards and
//! shared freely between threads.

mod builtin;
mod error;

pub use error::{ParseNameError, SchemeErrorCode, UnknownSchemeError};

use crate::name::{split_scheme, FileName, NameError, NameErrorCode, NameParser};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

static GLOBAL_REGISTRY: Lazy<SchemeRegistry> = Lazy::new(SchemeRegistry::with_builtins);

#[derive(Debug)]
pub struct SchemeEntry {
    scheme: String,
    parser: NameParser,
    replaced_by: Option<String>,
    warned: AtomicBool,
}

impl SchemeEntry {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn parser(&self) -> NameParser {
        self.parser
    }

    pub fn default_port(&self) -> Option<u16> {
        self.parser.default_port()
    }

    pub fn is_deprecated(&self) -> bool {
        self.replaced_by.is_some()
    }

    /// Scheme new callers should use instead of this one.
    pub fn replacement(&self) -> Option<&str> {
        self.replaced_by.as_deref()
    }

    fn warn_if_deprecated(&self) {
        let Some(replacement) = self.replaced_by.as_deref() else {
            return;
        };
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!(
                scheme = %self.scheme,
                replacement,
                "deprecated scheme resolved"
            );
        }
    }
}

#[derive(Debug, Default)]
pub struct SchemeRegistry {
    entries: HashMap<String, SchemeEntry>,
    aliases: HashMap<String, String>,
    fallback_scheme: Option<String>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in scheme table and aliases.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in &builtin::BUILTIN_SCHEMES {
            registry.insert(
                builtin.scheme.to_string(),
                builtin.parser,
                builtin.replaced_by.map(str::to_string),
            );
        }
        for (alias, scheme) in builtin::BUILTIN_ALIASES {
            registry.aliases.insert(alias.to_string(), scheme.to_string());
        }
        registry
    }

    /// Process-wide built-in registry.
    pub fn global() -> &'static SchemeRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn register(&mut self, scheme: &str, parser: NameParser) -> Result<(), NameError> {
        let scheme = crate::name::validate_scheme(scheme)?;
        self.insert(scheme, parser, None);
        Ok(())
    }

    /// Registers a scheme kept only for compatibility. It parses exactly like
    /// any other entry; resolving it logs a single warning naming `replacement`.
    pub fn register_deprecated(
        &mut self,
        scheme: &str,
        parser: NameParser,
        replacement: &str,
    ) -> Result<(), ParseNameError> {
        let scheme = crate::name::validate_scheme(scheme)?;
        let replacement = self.canonical_scheme(replacement);
        if !self.entries.contains_key(&replacement) {
            return Err(UnknownSchemeError::new(replacement).into());
        }
        self.insert(scheme, parser, Some(replacement));
        Ok(())
    }

    /// Makes `alias` parse as `scheme`; names parsed through the alias carry
    /// the canonical scheme token.
    pub fn register_alias(&mut self, alias: &str, scheme: &str) -> Result<(), ParseNameError> {
        let alias = crate::name::validate_scheme(alias)?;
        let target = self.canonical_scheme(scheme);
        if !self.entries.contains_key(&target) {
            return Err(UnknownSchemeError::new(target).into());
        }
        debug!(alias = %alias, scheme = %target, "scheme alias registered");
        self.aliases.insert(alias, target);
        Ok(())
    }

    /// Scheme applied to identifiers that carry none. Only path-only parsers
    /// accept such input.
    pub fn set_fallback_scheme(&mut self, scheme: &str) -> Result<(), UnknownSchemeError> {
        let canonical = self.canonical_scheme(scheme);
        if !self.entries.contains_key(&canonical) {
            return Err(UnknownSchemeError::new(canonical));
        }
        self.fallback_scheme = Some(canonical);
        Ok(())
    }

    pub fn fallback_scheme(&self) -> Option<&str> {
        self.fallback_scheme.as_deref()
    }

    pub fn canonical_scheme(&self, raw: &str) -> String {
        let lowered = raw.trim().to_ascii_lowercase();
        self.aliases.get(&lowered).cloned().unwrap_or(lowered)
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.entries.contains_key(&self.canonical_scheme(scheme))
    }

    pub fn resolve(&self, scheme: &str) -> Result<&SchemeEntry, UnknownSchemeError> {
        let canonical = self.canonical_scheme(scheme);
        let entry = self
            .entries
            .get(&canonical)
            .ok_or_else(|| UnknownSchemeError::new(canonical))?;
        entry.warn_if_deprecated();
        Ok(entry)
    }

    pub fn default_port(&self, scheme: &str) -> Result<Option<u16>, UnknownSchemeError> {
        self.resolve(scheme).map(SchemeEntry::default_port)
    }

    /// Registered scheme tokens, sorted.
    pub fn schemes(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    pub fn parse_name(&self, raw: &str) -> Result<FileName, ParseNameError> {
        let trimmed = raw.trim();
        if let Some((scheme, rest)) = split_scheme(trimmed)? {
            let entry = self.resolve(&scheme)?;
            return Ok(entry.parser.parse_with_scheme(&entry.scheme, rest)?);
        }

        let Some(fallback) = self.fallback_scheme.as_deref() else {
            return Err(NameError::new(
                NameErrorCode::MissingScheme,
                format!("'{trimmed}' has no scheme"),
            )
            .into());
        };
        let entry = self.resolve(fallback)?;
        Ok(entry.parser.parse(trimmed, Some(fallback))?)
    }

    fn insert(&mut self, scheme: String, parser: NameParser, replaced_by: Option<String>) {
        debug!(
            scheme = %scheme,
            default_port = ?parser.default_port(),
            mode = ?parser.mode(),
            deprecated = replaced_by.is_some(),
            "scheme registered"
        );
        self.aliases.remove(&scheme);
        self.entries.insert(
            scheme.clone(),
            SchemeEntry {
                scheme,
                parser,
                replaced_by,
                warned: AtomicBool::new(false),
            },
        );
    }
}
