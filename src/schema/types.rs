// src/schema/types.rs

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// One data row of a sheet: normalized column key → raw cell text, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, keeping its original position if the header repeats it.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k.into(), v.into());
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The logical datasets published as spreadsheet tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dataset {
    Team,
    Webinars,
    Training,
    Trainers,
    Jobs,
    Practices,
    Industries,
}

impl Dataset {
    pub const ALL: [Dataset; 7] = [
        Dataset::Team,
        Dataset::Webinars,
        Dataset::Training,
        Dataset::Trainers,
        Dataset::Jobs,
        Dataset::Practices,
        Dataset::Industries,
    ];

    /// Name used by callers and as the cache key.
    pub fn logical_name(&self) -> &'static str {
        match self {
            Dataset::Team => "team",
            Dataset::Webinars => "webinars",
            Dataset::Training => "training",
            Dataset::Trainers => "trainers",
            Dataset::Jobs => "jobs",
            Dataset::Practices => "practices",
            Dataset::Industries => "industries",
        }
    }

    /// Tab name in the published spreadsheet.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Dataset::Team => "Team",
            Dataset::Webinars => "Webinars",
            Dataset::Training => "Training",
            Dataset::Trainers => "Trainers",
            Dataset::Jobs => "Jobs",
            Dataset::Practices => "Practices",
            Dataset::Industries => "Industries",
        }
    }

    /// Accepts either the logical or the tab name, ignoring case.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|ds| {
            ds.logical_name().eq_ignore_ascii_case(s) || ds.sheet_name().eq_ignore_ascii_case(s)
        })
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.logical_name())
    }
}
