use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use toml_edit::{DocumentMut, Item, Table, value};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] io::Error),
    #[error("Config file is not valid TOML: {0}")]
    Document(#[from] toml_edit::TomlError),
    #[error("Config file has invalid values: {0}")]
    Deserialize(#[from] toml::de::Error),
}

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, i64, bool);

impl ConfigSerializeDefault for IndexMap<String, String> {
    fn fix_config(self, name: &str, doc: &mut DocumentMut) {
        doc.entry(name).or_insert_with(|| {
            let mut table = Table::new();
            for (key, replacement) in self {
                table.insert(&key, value(replacement));
            }
            Item::Table(table)
        });
    }
}

macro_rules! gen_config {
    (
        $( $(#[doc = $doc:literal])* $name:ident: $type:ty = $default:expr),*
    ) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct RegistryConfig {
            $(
                $(#[doc = $doc])*
                pub $name: $type,
            )*
        }

        impl Default for RegistryConfig {
            fn default() -> Self {
                RegistryConfig {
                    $(
                        $name: $default,
                    )*
                }
            }
        }

        impl RegistryConfig {
            fn patch(str: &str) -> Result<String, ConfigError> {
                let mut doc = str.parse::<DocumentMut>()?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config(
                        $default,
                        stringify!($name),
                        &mut doc,
                    );
                )*

                Ok(doc.to_string())
            }
        }
    };
}

gen_config! {
    /// Registers every alias a second time as `prefix:alias`. Empty disables it.
    fallback_prefix: String = String::new(),
    show_usage_on_error: bool = true,
    /// 0 means unlimited.
    max_suggestions: i64 = 0,
    /// Alias prefix to replacement. `{}` in the replacement receives the rest
    /// of the line.
    command_aliases: IndexMap<String, String> = IndexMap::new()
}

impl RegistryConfig {
    /// Reads `config_file`, writes back any missing keys with their defaults,
    /// and returns the result. A missing file is created.
    pub fn load(config_file: impl AsRef<Path>) -> Result<RegistryConfig, ConfigError> {
        let config_file = config_file.as_ref();
        let str = match fs::read_to_string(config_file) {
            Ok(str) => str,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        let patched = Self::patch(&str)?;
        if str != patched {
            fs::write(config_file, &patched)?;
        }

        Ok(toml::from_str(&patched)?)
    }

    pub fn from_toml(str: &str) -> Result<RegistryConfig, ConfigError> {
        Ok(toml::from_str(&Self::patch(str)?)?)
    }
}
