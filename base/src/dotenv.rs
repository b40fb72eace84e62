// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::Error;
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::debug;

pub(in crate::dotenv) static INIT: Once = Once::new();
pub(in crate::dotenv) static DEFAULT_FILENAME: &str = ".env";

#[derive(Debug, Default)]
pub struct Dotenv {
  vars: HashMap<String, String>,
}

impl Dotenv {
  pub fn new() -> Self {
    Self {
      vars: HashMap::new(),
    }
  }

  /// Загружает переменные окружения из файла .env
  ///
  /// # Аргументы
  /// * `filename` - Необязательный путь к файлу .env. Если передано None, используется ".env" по умолчанию.
  ///
  /// # Возвращает
  /// * `Result<(), Error>` - Ok(()) в случае успеха, Error в противном случае.
  pub fn load_from_file<P: AsRef<Path>>(&mut self, filename: Option<P>) -> Result<(), Error> {
    let path = filename.map_or_else(
      || PathBuf::from(DEFAULT_FILENAME),
      |p| p.as_ref().to_path_buf(),
    );

    if !path.exists() {
      return Err(Error::PathNotFound(path));
    }

    let file = File::open(&path)?;
    self.load_from_reader(BufReader::new(file))
  }

  pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> Result<(), Error> {
    for (line_num, line) in reader.lines().enumerate() {
      let line = line?;
      let trimmed = line.trim();

      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }

      match self.parse_line(trimmed) {
        Ok((key, value)) => {
          self.vars.insert(key, value);
        }
        Err(err) => {
          return Err(Error::Err(format!(
            "Error on line {}: {}",
            line_num + 1,
            err
          )));
        }
      }
    }

    Ok(())
  }

  fn parse_line(&self, line: &str) -> Result<(String, String), String> {
    let line = line.strip_prefix("export ").unwrap_or(line);
    let Some((key, value)) = line.split_once('=') else {
      return Err("Invalid format: missing '='".to_string());
    };

    let key = key.trim();
    if key.is_empty() {
      return Err("Empty key".to_string());
    }

    let value = value.trim().trim_matches('"').trim_matches('\'').to_string();

    Ok((key.to_string(), value))
  }

  /// Переменные, уже заданные в окружении процесса, не перезаписываются.
  pub fn set_env_vars(&self) {
    for (key, value) in &self.vars {
      if env::var_os(key).is_none() {
        env::set_var(key, value);
      }
    }
  }

  pub fn get(&self, key: &str) -> Option<&String> {
    self.vars.get(key)
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }
}

pub fn load() -> Result<(), Error> {
  let mut result = Ok(());
  INIT.call_once(|| {
    let mut config = Dotenv::new();
    match config.load_from_file::<&str>(None) {
      Ok(()) => {
        debug!("Loaded {} variables from {}", config.len(), DEFAULT_FILENAME);
        config.set_env_vars();
      }
      Err(err) => {
        result = Err(err);
      }
    }
  });
  result
}
