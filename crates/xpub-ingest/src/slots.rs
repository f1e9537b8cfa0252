//! Configuration slot file layout.

use std::path::{Path, PathBuf};

use xpub_model::ConfigSlot;

/// Slot file paths under the configuration data directory, in fusion order.
/// A returned path may not exist; the fuser records that per slot.
pub fn slot_paths(data_dir: &Path) -> Vec<(ConfigSlot, PathBuf)> {
    ConfigSlot::ALL
        .iter()
        .map(|slot| (*slot, data_dir.join(slot.file_name())))
        .collect()
}
