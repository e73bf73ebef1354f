use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Deduplicates short, highly repetitive strings (country codes, timezones,
/// admin codes) so every record shares one allocation per distinct value.
#[derive(Default)]
pub struct Interner {
    strings: FxHashMap<Box<[u8]>, Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared string for `bytes`, decoding it on first sight.
    pub fn intern(&mut self, bytes: &[u8]) -> Result<Rc<str>> {
        if let Some(s) = self.strings.get(bytes) {
            return Ok(Rc::clone(s));
        }
        let decoded = std::str::from_utf8(bytes).context("Interned value is not valid UTF-8")?;
        let s: Rc<str> = Rc::from(decoded);
        self.strings.insert(bytes.into(), Rc::clone(&s));
        Ok(s)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
