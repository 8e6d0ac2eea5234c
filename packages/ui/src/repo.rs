//! Shared marketplace constructor for all platforms.
//!
//! Returns a [`marketplace::Marketplace`] backed by the platform's [`marketplace::KvStore`]:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`marketplace::LocalStorageStore`]
//! - **Desktop** (native): one JSON file per document via [`marketplace::FileStore`]

use std::sync::OnceLock;

use marketplace::{KvStore, MarketConfig, Marketplace};

const CONFIG_TOML: &str = include_str!("../assets/inspectnow.toml");

/// The embedded config, parsed once. Falls back to defaults if it does not parse.
pub fn market_config() -> &'static MarketConfig {
    static CONFIG: OnceLock<MarketConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        MarketConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
            tracing::warn!(error = %e, file = MarketConfig::filename(), "using default config");
            MarketConfig::default()
        })
    })
}

/// Create a platform-appropriate marketplace.
///
/// Every call opens the same underlying storage, so handles are cheap and
/// short-lived: views create one per read or write.
pub fn make_market() -> Marketplace<impl KvStore> {
    let config = market_config().clone();
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Marketplace::with_config(marketplace::LocalStorageStore::new(), config)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("inspectnow");
        Marketplace::with_config(marketplace::FileStore::new(base), config)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Marketplace::with_config(marketplace::MemoryStore::new(), config)
    }
}
