//! LocalStorage access
//!
//! Missing storage, missing keys and malformed JSON all read as `None`.
//! Native builds have no storage; loads return `None` and saves are no-ops.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Raw string value for a key
#[cfg(target_arch = "wasm32")]
pub fn load_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_raw(_key: &str) -> Option<String> {
    None
}

/// Deserialize a JSON value stored under `key`
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = load_raw(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding malformed {}: {}", key, e);
            None
        }
    }
}

/// Serialize `value` as JSON under `key`; returns whether it was stored
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Cannot serialize {}: {}", key, e);
            return false;
        }
    };
    let Some(storage) = local_storage() else {
        return false;
    };
    match storage.set_item(key, &json) {
        Ok(()) => true,
        Err(_) => {
            log::warn!("LocalStorage rejected {}", key);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) -> bool {
    false
}

/// Remove a key
#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(_key: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_storage_is_empty() {
        assert_eq!(load_raw("press_runner_anything"), None);
        assert_eq!(load_json::<u32>("press_runner_anything"), None);
        assert!(!save_json("press_runner_anything", &5u32));
        remove("press_runner_anything");
    }
}
