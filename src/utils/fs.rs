use std::{
    io,
    path::PathBuf,
    sync::OnceLock,
};

static CONFIG_DIR: OnceLock<io::Result<PathBuf>> = OnceLock::new();

/// Returns the platform-appropriate configuration directory for Patter,
/// creating it if necessary.
///
/// - **Linux**: `$XDG_CONFIG_HOME/patter` if `XDG_CONFIG_HOME` is set,
///   otherwise `$HOME/.config/patter`
/// - **macOS**: `$HOME/Library/Application Support/patter`
/// - **Windows**: `%APPDATA%\patter`
pub fn get_os_config_dir() -> io::Result<PathBuf> {
    let dir = CONFIG_DIR.get_or_init(|| {
        let base_dir = compute_base_dir()?;

        if !base_dir.exists() {
            std::fs::create_dir_all(&base_dir)?;
        }

        Ok(base_dir)
    });

    match dir {
        Ok(path) => Ok(path.clone()),
        Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
    }
}

pub fn config_file() -> io::Result<PathBuf> {
    get_os_config_dir().map(|dir| dir.join("config.toml"))
}

pub fn device_id_file() -> io::Result<PathBuf> {
    get_os_config_dir().map(|dir| dir.join("device_id"))
}

fn compute_base_dir() -> io::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        use std::env;
        let config_home = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not determine config directory",
                )
            })?;

        return Ok(config_home.join("patter"));
    }

    #[cfg(target_os = "macos")]
    {
        use std::env;
        let home = env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;

        return Ok(home
            .join("Library")
            .join("Application Support")
            .join("patter"));
    }

    #[cfg(target_os = "windows")]
    {
        use std::env;
        let appdata = env::var_os("APPDATA")
            .map(PathBuf::from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "APPDATA not set"))?;

        return Ok(appdata.join("patter"));
    }

    #[allow(unreachable_code)]
    Err(io::Error::other("Unsupported platform"))
}
