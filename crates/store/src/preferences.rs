//! Interface preferences.

use beiramar_protocol::Language;
use tracing::{debug, warn};

use crate::error::Result;
use crate::kv::{read_json, write_json};
use crate::{LANGUAGE_KEY, Storage};

impl Storage {
    /// The stored interface language, if one was chosen.
    ///
    /// An unknown code reads as no choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be read.
    pub fn language(&self) -> Result<Option<Language>> {
        let code: Option<String> = read_json(self.kv(), LANGUAGE_KEY)?;
        Ok(code.and_then(|code| {
            let language = Language::from_code(&code);
            if language.is_none() {
                warn!(code = %code, "ignoring unknown stored language");
            }
            language
        }))
    }

    /// Stores the interface language.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    pub fn set_language(&self, language: Language) -> Result<()> {
        debug!(code = language.code(), "storing language");
        write_json(self.kv(), LANGUAGE_KEY, language.code())
    }
}
