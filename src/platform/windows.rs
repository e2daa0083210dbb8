// newtab platform paths for Windows
// Config and data: %APPDATA%\newtab

use std::env;
use std::path::PathBuf;

use super::APP_DIR_NAME;

fn app_data() -> PathBuf {
    match env::var("APPDATA") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from(env::var("USERPROFILE").unwrap_or_else(|_| String::from("C:\\")))
            .join("AppData")
            .join("Roaming"),
    }
}

/// `%APPDATA%\newtab`
pub fn get_config_dir() -> PathBuf {
    app_data().join(APP_DIR_NAME)
}

/// `%APPDATA%\newtab`
pub fn get_data_dir() -> PathBuf {
    app_data().join(APP_DIR_NAME)
}
