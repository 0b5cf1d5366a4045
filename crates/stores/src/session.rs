use anyhow::{Context, Error};
use chrono::{DateTime, Utc};
use quoting::build_case::BuildCase;
use quoting::quote::Quote;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, Level};

use crate::kv::KeyValueStore;

pub const PARTS_CSV_KEY: &str = "parts_csv";
pub const CSV_META_KEY: &str = "csv_meta";
pub const QUOTE_KEY: &str = "quote";
pub const BUILD_CASE_KEY: &str = "build_case";
pub const SETTINGS_KEY: &str = "settings";

/// Where the cached parts list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CsvSourceMetadata {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub part_count: usize,
}

/// Typed access to the blobs that make up a session.
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
        }
    }

    pub fn load_parts_csv(&self) -> Result<Option<String>, Error> {
        self.store
            .get(PARTS_CSV_KEY)
            .context("Loading cached parts")
    }

    #[tracing::instrument(level = Level::DEBUG, skip(self, text))]
    pub fn save_parts_csv(&mut self, text: &str, metadata: &CsvSourceMetadata) -> Result<(), Error> {
        self.store
            .set(PARTS_CSV_KEY, text)
            .context("Saving cached parts")?;
        self.save_json(CSV_META_KEY, metadata)?;

        info!("Cached parts. source: {}, parts: {}", metadata.source, metadata.part_count);
        Ok(())
    }

    pub fn load_csv_metadata(&self) -> Result<Option<CsvSourceMetadata>, Error> {
        self.load_json(CSV_META_KEY)
    }

    pub fn clear_parts_cache(&mut self) -> Result<(), Error> {
        self.store.remove(PARTS_CSV_KEY)?;
        self.store.remove(CSV_META_KEY)?;

        info!("Cleared cached parts");
        Ok(())
    }

    pub fn load_quote(&self) -> Result<Quote, Error> {
        Ok(self
            .load_json(QUOTE_KEY)?
            .unwrap_or_default())
    }

    pub fn save_quote(&mut self, quote: &Quote) -> Result<(), Error> {
        self.save_json(QUOTE_KEY, quote)
    }

    pub fn load_build_case(&self) -> Result<BuildCase, Error> {
        Ok(self
            .load_json(BUILD_CASE_KEY)?
            .unwrap_or_default())
    }

    pub fn save_build_case(&mut self, build_case: &BuildCase) -> Result<(), Error> {
        self.save_json(BUILD_CASE_KEY, build_case)
    }

    /// The quote and build case are always cleared together.
    pub fn clear_quote(&mut self) -> Result<(), Error> {
        self.store.remove(QUOTE_KEY)?;
        self.store.remove(BUILD_CASE_KEY)?;
        Ok(())
    }

    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        let Some(value) = self.store.get(key)? else {
            return Ok(None);
        };

        let t = serde_json::from_str(&value).with_context(|| format!("Deserializing stored value. key: {}", key))?;
        Ok(Some(t))
    }

    pub fn save_json<T: Serialize>(&mut self, key: &str, t: &T) -> Result<(), Error> {
        let value = to_json(t).with_context(|| format!("Serializing value. key: {}", key))?;
        self.store.set(key, &value)?;
        Ok(())
    }
}

fn to_json<T: Serialize>(t: &T) -> Result<String, Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(vec![], formatter);
    t.serialize(&mut ser)?;

    let mut bytes = ser.into_inner();
    bytes.push(b'\n');

    Ok(String::from_utf8(bytes)?)
}
