pub mod blob;
pub mod io;
pub mod resolver;
pub mod swatches;

pub use blob::{BLOB_URL_PREFIX, BlobStore};
pub use io::{AssetReader, FileAssetReader, MemoryAssetReader};
pub use resolver::TextureResolver;
pub use swatches::{TextureSwatch, extract_swatches};
