//! Text lookup for table labels.
//!
//! Labels are written in English and passed through a [`Translate`]
//! implementation once, when a [`ClassTable`](crate::usb::ClassTable) is built.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;

pub trait Translate {
    fn translate(&self, msgid: &str) -> String;
}

/// Returns every msgid unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Translate for Identity {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, msgid: &str) -> String {
        self(msgid)
    }
}

/// A msgid -> translation map loaded from a flat JSON object.
/// Missing msgids translate to themselves.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let catalog = Self::from_json(&fs::read_to_string(path)?)?;
        debug!("Loaded {} translations from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translate for Catalog {
    fn translate(&self, msgid: &str) -> String {
        match self.messages.get(msgid) {
            Some(text) => text.clone(),
            None => msgid.to_string(),
        }
    }
}
