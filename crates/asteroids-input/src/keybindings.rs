//! Keybinding files and conflict detection.

use crate::action_map::{Action, InputBinding, InputMap};
use asteroids_config::ControlScheme;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Errors from reading or writing a keybinding file.
#[derive(Debug, thiserror::Error)]
pub enum InputMapError {
    #[error("keybinding file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed keybinding file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize keybindings: {0}")]
    Serialize(#[from] ron::Error),
}

/// The same [`InputBinding`] drives more than one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub binding: InputBinding,
    /// Sorted list of the actions sharing `binding`.
    pub actions: Vec<Action>,
}

impl InputMap {
    /// Every binding used by more than one action (or twice by one action).
    #[must_use]
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        let mut seen: HashMap<InputBinding, Vec<Action>> = HashMap::new();

        for (action, bindings) in &self.bindings {
            for binding in bindings {
                seen.entry(*binding).or_default().push(*action);
            }
        }

        seen.into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(binding, mut actions)| {
                actions.sort();
                Conflict { binding, actions }
            })
            .collect()
    }

    /// Write the map to `path` as RON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), InputMapError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Read a map from a RON file.
    pub fn load(path: &Path) -> Result<Self, InputMapError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_ron(&contents)?)
    }

    /// Read a map from `path`, falling back to the preset for `scheme` if the
    /// file is missing or malformed. Conflicts are logged, not rejected.
    #[must_use]
    pub fn load_or_scheme(path: &Path, scheme: ControlScheme) -> Self {
        let map = match Self::load(path) {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    "Could not use keybinding file {}: {e}; using {scheme:?} preset",
                    path.display()
                );
                return Self::for_scheme(scheme);
            }
        };
        for conflict in map.detect_conflicts() {
            warn!(
                "{:?} is bound to several actions: {:?}",
                conflict.binding, conflict.actions
            );
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_presets_have_no_conflicts() {
        assert!(InputMap::mouse_look().detect_conflicts().is_empty());
        assert!(InputMap::classic().detect_conflicts().is_empty());
    }

    #[test]
    fn test_conflict_lists_both_actions() {
        let mut map = InputMap::mouse_look();
        map.set_bindings(Action::YawLeft, vec![InputBinding::Key(KeyCode::KeyW)]);
        let conflicts = map.detect_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].binding, InputBinding::Key(KeyCode::KeyW));
        assert_eq!(
            conflicts[0].actions,
            vec![Action::MoveForward, Action::YawLeft]
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bindings").join("input.ron");
        let mut map = InputMap::classic();
        map.set_bindings(Action::MoveUp, vec![InputBinding::Key(KeyCode::KeyR)]);
        map.save(&path).unwrap();
        assert_eq!(InputMap::load(&path).unwrap(), map);
    }

    #[test]
    fn test_missing_file_falls_back_to_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let map = InputMap::load_or_scheme(&dir.path().join("nope.ron"), ControlScheme::Classic);
        assert_eq!(map, InputMap::classic());
    }

    #[test]
    fn test_malformed_file_falls_back_to_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.ron");
        std::fs::write(&path, "(bindings: {MoveForward: [Key(\"NotAKey\")]})").unwrap();
        assert!(matches!(InputMap::load(&path), Err(InputMapError::Parse(_))));
        let map = InputMap::load_or_scheme(&path, ControlScheme::MouseLook);
        assert_eq!(map, InputMap::mouse_look());
    }
}
