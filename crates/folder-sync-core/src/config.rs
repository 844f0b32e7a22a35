use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;

/// One local root to inventory. `label` identifies the source in the report
/// and defaults to the path itself.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalFolder {
    pub path: String,
    pub label: Option<String>,
}

impl LocalFolder {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.path)
    }
}

/// One Mega account to inventory. `path` restricts the listing to a subtree
/// (case-insensitive prefix, stripped from logical names); empty means the
/// whole cloud drive.
#[derive(Debug, Clone, Deserialize)]
pub struct MegaAccount {
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub local_folders: Vec<LocalFolder>,
    pub mega_accounts: Vec<MegaAccount>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Remove folders whose path lies under another configured folder. Walking
/// both a root and one of its subtrees would record the nested items twice
/// under colliding logical names; the outermost root wins.
pub fn non_overlapping_folders(folders: Vec<LocalFolder>) -> Vec<LocalFolder> {
    let mut result: Vec<LocalFolder> = Vec::new();

    for folder in folders {
        let folder_path = Path::new(&folder.path);

        let already_covered = result
            .iter()
            .any(|kept| folder_path.starts_with(Path::new(&kept.path)));

        if !already_covered {
            result.retain(|kept| !Path::new(&kept.path).starts_with(folder_path));
            result.push(folder);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(path: &str) -> LocalFolder {
        LocalFolder {
            path: path.to_string(),
            label: None,
        }
    }

    fn paths(folders: &[LocalFolder]) -> Vec<&str> {
        folders.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_non_overlapping_no_overlap() {
        let result = non_overlapping_folders(vec![
            folder("/home/user/photos"),
            folder("/home/user/docs"),
            folder("/var/data"),
        ]);
        assert_eq!(result.len(), 3);
        assert!(paths(&result).contains(&"/home/user/photos"));
        assert!(paths(&result).contains(&"/home/user/docs"));
        assert!(paths(&result).contains(&"/var/data"));
    }

    #[test]
    fn test_non_overlapping_with_subdirectory() {
        let result = non_overlapping_folders(vec![
            folder("/home/user"),
            folder("/home/user/docs"),
            folder("/var/data"),
        ]);
        assert_eq!(result.len(), 2);
        assert!(paths(&result).contains(&"/home/user"));
        assert!(paths(&result).contains(&"/var/data"));
        // /home/user/docs is under /home/user and must be pruned
        assert!(!paths(&result).contains(&"/home/user/docs"));
    }

    #[test]
    fn test_non_overlapping_parent_listed_after_child() {
        let result =
            non_overlapping_folders(vec![folder("/home/user/docs"), folder("/home/user")]);
        assert_eq!(paths(&result), vec!["/home/user"]);
    }

    #[test]
    fn test_non_overlapping_keeps_labels() {
        let mut labeled = folder("/srv/music");
        labeled.label = Some("music".to_string());
        let result = non_overlapping_folders(vec![labeled, folder("/srv/music/flac")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].label(), "music");
    }
}
