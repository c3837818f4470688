#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assets;
pub mod config;
pub mod errors;
pub mod interaction;
pub mod resources;
pub mod scene;
pub mod session;
pub mod utils;

pub use assets::{BlobStore, TextureResolver, TextureSwatch};
pub use config::{CameraConfig, ConfiguratorConfig, TilingProfile};
pub use errors::{AtelierError, Result};
pub use interaction::{FramingOutcome, LoadTicket, LoadedModel, SelectionPhase, SelectionState};
pub use resources::{BoundingBox, Material, Mesh, Texture};
pub use scene::{ArcRotateCamera, HighlightLayer, MaterialKey, MeshKey, Scene, TextureKey};
pub use session::{Configurator, LoadReport};
pub use utils::{ArcRotateControls, PointerInput};
