use std::{
    fs,
    path::{Path, PathBuf},
};

use engine::ShoppingList;

use crate::error::Result;

/// Where a shopping list lives between commands.
pub trait ListStore {
    fn load(&self) -> Result<ShoppingList>;
    fn save(&self, list: &ShoppingList) -> Result<()>;
}

/// A list kept as a JSON array in a single file.
///
/// Saves replace the file in one rename, so a reader never sees a half
/// written list; concurrent writers are last-writer-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListStore for JsonFileStore {
    fn load(&self) -> Result<ShoppingList> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no list at {}, starting empty", self.path.display());
                return Ok(ShoppingList::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, list: &ShoppingList) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(list)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!("saved {} entries to {}", list.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use engine::{Engine, IncomingItem};
    use uuid::Uuid;

    use super::*;

    fn temp_store() -> JsonFileStore {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_lists");
        JsonFileStore::new(root.join(format!("list_{}.json", Uuid::new_v4())))
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let store = temp_store();
        let list = Engine::default().reconcile_list(
            &ShoppingList::new(),
            &[
                IncomingItem::new("Carotte", 500.0, "g"),
                IncomingItem::new("Lait", 1.0, "L").with_provenance("Crêpes"),
            ],
        );

        store.save(&list).unwrap();
        let loaded = store.load().unwrap();
        fs::remove_file(store.path()).unwrap();

        assert_eq!(loaded, list);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();
        let result = store.load();
        fs::remove_file(store.path()).unwrap();

        assert!(matches!(result, Err(crate::error::AppError::Json(_))));
    }
}
