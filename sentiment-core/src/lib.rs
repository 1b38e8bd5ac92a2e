pub mod anim;
pub mod autosave;
pub mod bus;
pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod registry;
pub mod sentiment;
pub mod storage;
pub mod theme;
pub mod toast;

pub use autosave::AutoSave;
pub use bus::{EventBus, SubscriptionId, ThemeBus};
pub use config::PageConfig;
pub use error::{ConfigError, StorageError, ThemeParseError};
pub use registry::{ChartInstance, ChartRegistry};
pub use sentiment::{Rgba, Sentiment};
pub use storage::{KeyValueStore, MemoryStore};
pub use theme::{Theme, ThemeController};
pub use toast::ToastKind;
