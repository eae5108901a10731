//! Configuration infrastructure module

mod xdg;

pub use xdg::XdgConfigStore;

/// Create the default config store
pub fn create_config_store() -> XdgConfigStore {
    XdgConfigStore::new()
}
