pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::Config;
pub use datasource::{
    Credentials, DatasetError, JsonFileDataset, MockObjectStore, MockPxSource, ObjectStore,
    ObjectSummary, PxMetadataSource, PxWebClient, PxWebError, S3ObjectStore, StorageError,
};
pub use domain::{
    compute_delta, gallery_events, Delta, DeltaSign, DeltaUnit, GalleryEvent, GalleryPhoto,
    TradeRow,
};
pub use engine::{enrich_rows, normalize_keys, KeyMatcher, NormalizedKey, SubstringMatcher};
pub use error::AppError;
