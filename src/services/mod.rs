pub mod gallery;
pub mod generator;
pub mod palette_store;

pub use gallery::{validate_filename, DirectoryGallery, GalleryItem, GalleryStore};
pub use generator::{
    GenerationParameters, GenerationRequest, Generated, GeneratorService, MAX_BANDS,
};
pub use palette_store::{PaletteInfo, PaletteStore};
