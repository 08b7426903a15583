pub mod downloader;
pub mod hub;

pub use downloader::{DownloadError, DownloadResult, ModelDownloader};
pub use hub::{
    goemotions_ekman_manifest, HubError, HubResult, ModelFileSpec, ModelHub, ModelManifest,
};
