//! Runtime configuration, layered from defaults, a TOML file, `RECUPERA_*`
//! environment variables and finally the plain `PORT` variable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  /// Directory of public assets (stylesheets, images). The HTML pages are
  /// compiled into the binary and never read from here.
  pub static_root:       PathBuf,
  pub admin_username:    String,
  pub admin_password:    String,
  /// Mark the session cookie `Secure`; enable when served over HTTPS.
  pub cookie_secure:     bool,
  /// Absolute session lifetime, between 1 hour and [`MAX_SESSION_TTL_HOURS`].
  pub session_ttl_hours: u32,
}

/// One year.
pub const MAX_SESSION_TTL_HOURS: u32 = 24 * 365;

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 10000)?
      .set_default("store_path", "data.db")?
      .set_default("static_root", "public")?
      .set_default("cookie_secure", false)?
      .set_default("session_ttl_hours", 8)?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("RECUPERA"))
      .set_override_option("port", std::env::var("PORT").ok())?
      .build()?
      .try_deserialize::<Self>()?
      .validated()
  }

  fn validated(self) -> Result<Self, config::ConfigError> {
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours) {
      return Err(config::ConfigError::Message(format!(
        "session_ttl_hours must be between 1 and {MAX_SESSION_TTL_HOURS}, got {}",
        self.session_ttl_hours
      )));
    }
    Ok(self)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_values_and_defaults_are_merged() {
    let path = std::env::temp_dir()
      .join(format!("recupera-config-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "admin_username = \"ADMIN\"\nadmin_password = \"segredo\"\ncookie_secure = true\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.admin_username, "ADMIN");
    assert_eq!(cfg.admin_password, "segredo");
    assert!(cfg.cookie_secure);
    assert_eq!(cfg.session_ttl_hours, 8);
    assert_eq!(cfg.store_path, PathBuf::from("data.db"));
    assert_eq!(cfg.static_root, PathBuf::from("public"));
  }

  #[test]
  fn missing_credentials_fail_to_load() {
    let path = std::env::temp_dir()
      .join(format!("recupera-config-empty-{}.toml", std::process::id()));
    std::fs::write(&path, "host = \"127.0.0.1\"\n").unwrap();

    let result = ServerConfig::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
  }

  fn load_with_ttl(tag: &str, ttl: &str) -> Result<ServerConfig, config::ConfigError> {
    let path = std::env::temp_dir()
      .join(format!("recupera-config-ttl-{tag}-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      format!(
        "admin_username = \"ADMIN\"\nadmin_password = \"segredo\"\nsession_ttl_hours = {ttl}\n"
      ),
    )
    .unwrap();

    let result = ServerConfig::load(&path);
    std::fs::remove_file(&path).ok();
    result
  }

  #[test]
  fn session_ttl_out_of_range_fails_to_load() {
    assert!(load_with_ttl("zero", "0").is_err());
    assert!(load_with_ttl("negative", "-1").is_err());
    assert!(load_with_ttl("huge", "9223372036854775807").is_err());
    assert!(load_with_ttl("over", &(MAX_SESSION_TTL_HOURS + 1).to_string()).is_err());
  }

  #[test]
  fn session_ttl_bounds_are_accepted() {
    assert_eq!(load_with_ttl("one", "1").unwrap().session_ttl_hours, 1);
    assert_eq!(
      load_with_ttl("max", &MAX_SESSION_TTL_HOURS.to_string())
        .unwrap()
        .session_ttl_hours,
      MAX_SESSION_TTL_HOURS
    );
  }
}
