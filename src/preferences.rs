//! User preferences as configuration metadata.
//!
//! Preferences are grouped category → group → setting for display. The core
//! only reads and writes single values through a [`SettingBinding`]; the
//! grouping is there for whoever renders it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::{Cache, keys};

/// Which widget edits the setting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    Text,
    Select,
    Multiselect,
    Switch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Switch(bool),
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingOption {
    pub title: String,
    pub value: String,
}

impl SettingOption {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingError {
    #[error("{setting}: expected a {expected:?} value")]
    WrongType {
        setting: String,
        expected: SettingType,
    },
    #[error("{setting}: {value:?} is not one of the options")]
    UnknownOption { setting: String, value: String },
}

/// Where a setting's value comes from and where a new one goes.
pub trait SettingBinding {
    /// Current value.
    fn source(&self) -> SettingValue;
    /// Commit a new, already validated value.
    fn action(&mut self, value: SettingValue);
}

/// A binding that keeps its value in the cache, falling back to a default.
#[derive(Debug, Clone)]
pub struct CachedBinding {
    cache: Cache,
    key: String,
    default: SettingValue,
}

impl CachedBinding {
    pub fn new(cache: Cache, name: &str, default: SettingValue) -> Self {
        Self {
            cache,
            key: keys::preference(name),
            default,
        }
    }
}

impl SettingBinding for CachedBinding {
    fn source(&self) -> SettingValue {
        self.cache
            .get(&self.key)
            .unwrap_or_else(|| self.default.clone())
    }

    fn action(&mut self, value: SettingValue) {
        self.cache.set(&self.key, &value);
    }
}

pub struct Setting {
    pub title: String,
    pub kind: SettingType,
    /// Choices for `Select` / `Multiselect`; ignored otherwise.
    pub options: Vec<SettingOption>,
    binding: Box<dyn SettingBinding>,
}

impl Setting {
    pub fn new(title: impl Into<String>, kind: SettingType, binding: impl SettingBinding + 'static) -> Self {
        Self {
            title: title.into(),
            kind,
            options: Vec::new(),
            binding: Box::new(binding),
        }
    }

    pub fn with_options(mut self, options: Vec<SettingOption>) -> Self {
        self.options = options;
        self
    }

    pub fn value(&self) -> SettingValue {
        self.binding.source()
    }

    /// Validate `value` against the widget type and options, then commit it.
    pub fn commit(&mut self, value: SettingValue) -> Result<(), SettingError> {
        self.check(&value)?;
        self.binding.action(value);
        Ok(())
    }

    fn check(&self, value: &SettingValue) -> Result<(), SettingError> {
        let wrong_type = || SettingError::WrongType {
            setting: self.title.clone(),
            expected: self.kind,
        };

        match (self.kind, value) {
            (SettingType::Switch, SettingValue::Switch(_)) => Ok(()),
            (SettingType::Text, SettingValue::Text(_)) => Ok(()),
            (SettingType::Select, SettingValue::Text(v)) => self.check_option(v),
            (SettingType::Multiselect, SettingValue::List(values)) => {
                values.iter().try_for_each(|v| self.check_option(v))
            }
            _ => Err(wrong_type()),
        }
    }

    fn check_option(&self, value: &str) -> Result<(), SettingError> {
        if self.options.iter().any(|o| o.value == value) {
            Ok(())
        } else {
            Err(SettingError::UnknownOption {
                setting: self.title.clone(),
                value: value.to_string(),
            })
        }
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct SettingGroup {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub settings: Vec<Setting>,
}

#[derive(Debug)]
pub struct SettingCategory {
    pub title: String,
    pub groups: Vec<SettingGroup>,
}

impl SettingCategory {
    /// Find a setting by title anywhere in the category.
    pub fn find_mut(&mut self, title: &str) -> Option<&mut Setting> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.settings.iter_mut())
            .find(|s| s.title == title)
    }

    pub fn find(&self, title: &str) -> Option<&Setting> {
        self.groups
            .iter()
            .flat_map(|g| g.settings.iter())
            .find(|s| s.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(cache: &Cache) -> SettingCategory {
        SettingCategory {
            title: "General".into(),
            groups: vec![SettingGroup {
                title: Some("Search".into()),
                desc: None,
                settings: vec![
                    Setting::new(
                        "Fuzzy search",
                        SettingType::Switch,
                        CachedBinding::new(cache.clone(), "fuzzy", SettingValue::Switch(true)),
                    ),
                    Setting::new(
                        "Sort by",
                        SettingType::Select,
                        CachedBinding::new(cache.clone(), "sort", SettingValue::Text("title".into())),
                    )
                    .with_options(vec![
                        SettingOption::new("Title", "title"),
                        SettingOption::new("Artist", "artist"),
                    ]),
                    Setting::new(
                        "Columns",
                        SettingType::Multiselect,
                        CachedBinding::new(cache.clone(), "columns", SettingValue::List(vec![])),
                    )
                    .with_options(vec![
                        SettingOption::new("Album", "album"),
                        SettingOption::new("Length", "length"),
                    ]),
                ],
            }],
        }
    }

    #[test]
    fn source_falls_back_to_default() {
        let cache = Cache::in_memory();
        let cat = category(&cache);
        assert_eq!(
            cat.find("Fuzzy search").unwrap().value(),
            SettingValue::Switch(true)
        );
    }

    #[test]
    fn commit_persists_through_the_cache() {
        let cache = Cache::in_memory();
        let mut cat = category(&cache);

        cat.find_mut("Sort by")
            .unwrap()
            .commit(SettingValue::Text("artist".into()))
            .unwrap();

        // A fresh tree over the same cache sees the stored value.
        let again = category(&cache);
        assert_eq!(
            again.find("Sort by").unwrap().value(),
            SettingValue::Text("artist".into())
        );
        assert!(cache.contains("pref:sort"));
    }

    #[test]
    fn commit_rejects_wrong_type_and_unknown_options() {
        let cache = Cache::in_memory();
        let mut cat = category(&cache);

        let fuzzy = cat.find_mut("Fuzzy search").unwrap();
        assert_eq!(
            fuzzy.commit(SettingValue::Text("yes".into())),
            Err(SettingError::WrongType {
                setting: "Fuzzy search".into(),
                expected: SettingType::Switch,
            })
        );

        let columns = cat.find_mut("Columns").unwrap();
        assert!(columns
            .commit(SettingValue::List(vec!["album".into(), "length".into()]))
            .is_ok());
        assert_eq!(
            columns.commit(SettingValue::List(vec!["bpm".into()])),
            Err(SettingError::UnknownOption {
                setting: "Columns".into(),
                value: "bpm".into(),
            })
        );
        assert_eq!(
            columns.value(),
            SettingValue::List(vec!["album".into(), "length".into()])
        );
    }

    #[test]
    fn values_serialize_untagged() {
        assert_eq!(serde_json::to_string(&SettingValue::Switch(false)).unwrap(), "false");
        let v: SettingValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(v, SettingValue::List(vec!["a".into(), "b".into()]));
    }
}
