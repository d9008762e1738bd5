//! Grundriss-Eingabe: SVG-Dimensionen lesen, Raster-Uploads in SVG einbetten.

mod parser;
mod upload;

pub use parser::{extract_image_href, plan_dimensions, try_plan_dimensions, DEFAULT_PLAN_SIZE};
pub use upload::{
    plan_from_upload, validate_upload, wrap_raster, FloorPlan, ALLOWED_MIME_TYPES,
    MAX_UPLOAD_BYTES,
};

/// Fehler beim Verarbeiten eines Grundrisses.
#[derive(Debug, thiserror::Error)]
pub enum FloorPlanError {
    #[error("Dateityp nicht unterstützt: {0}")]
    UnsupportedType(String),
    #[error("Datei zu groß: {size} Bytes (maximal {max})")]
    TooLarge { size: usize, max: usize },
    #[error("Kein SVG-Dokument")]
    NotSvg,
    #[error("SVG ist kein gültiges UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("SVG nicht lesbar: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Bild nicht lesbar: {0}")]
    Image(#[from] image::ImageError),
    #[error("Bild nicht lesbar: {0}")]
    Io(#[from] std::io::Error),
}
