pub mod gallery;
pub mod generate;
pub mod palettes;
pub mod panel;

pub use gallery::{__path_handle_gallery, __path_handle_generated_image};
pub use gallery::{handle_gallery, handle_generated_image};
pub use generate::{__path_handle_generate, __path_handle_generate_random};
pub use generate::{handle_generate, handle_generate_random, GenerateRequest, GenerateResponse};
pub use palettes::{__path_handle_palettes, __path_handle_wave_types};
pub use palettes::{handle_palettes, handle_wave_types, OptionInfo, WaveTypesResponse};
pub use panel::handle_panel;
