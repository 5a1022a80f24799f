use log::warn;
use web_sys::Storage;

use insta_feed_core::Theme;

pub fn get_local_storage() -> Option<Storage> {
    match web_sys::window().map(|window| window.local_storage()) {
        Some(Ok(storage)) => storage,
        Some(Err(err)) => {
            warn!("local storage unavailable: {:?}", err);
            None
        }
        None => None,
    }
}

pub fn load_theme(storage: Option<&Storage>, key: &str) -> Option<String> {
    storage.and_then(|storage| storage.get_item(key).ok().flatten())
}

/// Writes are best effort: a full or disabled store only costs the
/// preference on the next visit.
pub fn store_theme(storage: Option<&Storage>, key: &str, theme: Theme) {
    match storage {
        Some(storage) => {
            if let Err(err) = storage.set_item(key, theme.as_str()) {
                warn!("could not persist theme: {:?}", err);
            }
        }
        None => warn!("no local storage, theme not persisted"),
    }
}
