use std::collections::HashMap;

use itertools::Itertools;
use lazy_static::lazy_static;
use log::{debug, trace};
use serde::Serialize;

use crate::data::{ClassCode, ClassRow, UNKNOWN_NAME, USB_CLASS_NAMES};
use crate::i18n::{Identity, Translate};

/// Short and long display label for one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub short: String,
    pub long: String,
}

impl Labels {
    pub fn new(short: impl Into<String>, long: impl Into<String>) -> Self {
        Labels {
            short: short.into(),
            long: long.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableEntry<'a> {
    pub key: ClassCode,
    #[serde(flatten)]
    pub labels: &'a Labels,
}

#[derive(Debug)]
pub struct ClassTable {
    entries: HashMap<ClassCode, Labels>,
    unknown: Labels,
}

lazy_static! {
    static ref CLASS_TABLE: ClassTable = ClassTable::new(&Identity);
}

/// The process-wide table, with untranslated labels.
pub fn class_table() -> &'static ClassTable {
    &CLASS_TABLE
}

/// Classify against the process-wide table.
pub fn classify(class: u8, subclass: u8, protocol: u8) -> &'static Labels {
    CLASS_TABLE.classify(class, subclass, protocol)
}

impl ClassTable {
    pub fn new(translator: &dyn Translate) -> Self {
        Self::from_rows(USB_CLASS_NAMES, translator)
    }

    /// Build a table from arbitrary rows. A row whose key was already seen
    /// replaces the earlier one.
    pub fn from_rows(rows: &[ClassRow], translator: &dyn Translate) -> Self {
        let mut entries = HashMap::with_capacity(rows.len());
        for &(key, short, long) in rows {
            let labels = Labels::new(translator.translate(short), translator.translate(long));
            if let Some(previous) = entries.insert(key, labels) {
                debug!("Class table key {} redefined, dropping {:?}", key, previous.long);
            }
        }

        let unknown = translator.translate(UNKNOWN_NAME);
        ClassTable {
            entries,
            unknown: Labels::new(unknown.clone(), unknown),
        }
    }

    /// Resolve a concrete class triple to its display labels.
    ///
    /// Narrowing runs in three independent steps: the class must appear in the
    /// table at all, then the subclass is kept only if some entry of that class
    /// names it, then the protocol is kept only if the (class, subclass,
    /// protocol) key exists. Subclass narrowing ignores the protocol, so
    /// `(0x03, 0x02, 0x02)` resolves through `(0x03, -1, 0x02)`.
    pub fn classify(&self, class: u8, subclass: u8, protocol: u8) -> &Labels {
        let klasses: Vec<&ClassCode> = self.entries.keys().filter(|k| k.class == class).collect();
        if klasses.is_empty() {
            trace!("No table entry for class 0x{:02x}", class);
            return &self.unknown;
        }

        let effective_subclass = if klasses.iter().any(|k| k.subclass == Some(subclass)) {
            Some(subclass)
        } else {
            None
        };

        let candidate = ClassCode::new(class, effective_subclass, Some(protocol));
        let effective_protocol = if klasses.contains(&&candidate) {
            Some(protocol)
        } else {
            None
        };

        let key = ClassCode::new(class, effective_subclass, effective_protocol);
        if let Some(labels) = self.entries.get(&key) {
            trace!("0x{:02x}/0x{:02x}/0x{:02x} -> {}", class, subclass, protocol, key);
            return labels;
        }

        // Narrowing can land on a key with no row, e.g. (0x07, 0x01, -1)
        debug!(
            "0x{:02x}/0x{:02x}/0x{:02x} narrowed to missing key {}, using class entry",
            class, subclass, protocol, key
        );
        self.entries
            .get(&ClassCode::new(class, None, None))
            .unwrap_or(&self.unknown)
    }

    pub fn unknown(&self) -> &Labels {
        &self.unknown
    }

    pub fn get(&self, key: &ClassCode) -> Option<&Labels> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by key with wildcards first.
    pub fn entries(&self) -> Vec<TableEntry<'_>> {
        self.entries
            .iter()
            .sorted_by_key(|(key, _)| **key)
            .map(|(key, labels)| TableEntry { key: *key, labels })
            .collect()
    }
}
