pub mod autoframe;
pub mod customize;
pub mod grouping;
pub mod selection;

pub use autoframe::{FramingOutcome, LoadTicket, LoadTracker, LoadedModel, frame_loaded_model};
pub use customize::{apply_color, apply_texture};
pub use grouping::{GroupIndex, group_key_of, selectable_meshes};
pub use selection::{SelectionPhase, SelectionState, selected_meshes, sync_highlights};
