use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use hocon::{Hocon, HoconLoader};

/// Reads settings from a HOCON file. Environment variables take precedence
/// over file entries of the same name.
#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let env = std::env::vars().collect::<HashMap<_, _>>();

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        Ok(Self { hocon, env })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(name) {
            return Some(Value::String(value.clone()));
        }

        match &self.hocon[name] {
            Hocon::Real(val) => Some(Value::Float(*val)),
            Hocon::Integer(val) => Some(Value::Integer(*val as usize)),
            Hocon::String(val) => Some(Value::String(val.clone())),
            Hocon::Boolean(val) => Some(Value::Boolean(*val)),
            _ => None,
        }
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        T::load(self)
    }
}

#[derive(Debug)]
pub enum Value {
    String(String),
    Integer(usize),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => val.parse::<bool>().ok(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => Some(*val),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(val) => Some(*val),
            Value::Integer(val) => Some(*val as f64),
            Value::String(val) => val.parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(val) => Some(val.to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

/// Implemented by settings structs that know how to read themselves out of
/// a loader.
pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_typed_values() {
        let path = write_config(
            "config_loader_typed.conf",
            "passes = 400\nfactor = 1.5\nverbose = true\nname = \"search\"\n",
        );

        let loader = ConfigLoader::new(&path).unwrap();

        assert_eq!(loader.get("passes").and_then(|v| v.as_usize()), Some(400));
        assert_eq!(loader.get("factor").and_then(|v| v.as_f64()), Some(1.5));
        assert_eq!(loader.get("verbose").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(
            loader.get("name").and_then(|v| v.as_string()),
            Some("search".to_string())
        );
    }

    #[test]
    fn test_missing_key_is_none() {
        let path = write_config("config_loader_missing.conf", "passes = 1\n");

        let loader = ConfigLoader::new(&path).unwrap();

        assert!(loader.get("no_such_key").is_none());
    }

    #[test]
    fn test_integer_coerces_to_float() {
        let path = write_config("config_loader_coerce.conf", "factor = 2\n");

        let loader = ConfigLoader::new(&path).unwrap();

        assert_eq!(loader.get("factor").and_then(|v| v.as_f64()), Some(2.0));
    }
}
