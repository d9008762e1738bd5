//! Upload-Validierung und Einbettung von Rasterbildern in ein SVG.

use std::io::Cursor;

use base64::Engine;
use glam::DVec2;
use image::ImageReader;

use super::parser::plan_dimensions;
use super::FloorPlanError;

/// Maximale Upload-Größe (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Erlaubte MIME-Typen für Grundriss-Uploads.
pub const ALLOWED_MIME_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Ein Grundriss als SVG samt Koordinatenfläche.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    pub svg: String,
    pub size: DVec2,
}

/// Prüft MIME-Typ und Größe eines Uploads.
pub fn validate_upload(mime: &str, len: usize) -> Result<(), FloorPlanError> {
    let mime = mime.trim().to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(FloorPlanError::UnsupportedType(mime));
    }
    if len > MAX_UPLOAD_BYTES {
        return Err(FloorPlanError::TooLarge {
            size: len,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Wandelt einen validierten Upload in einen SVG-Grundriss um.
///
/// SVG-Uploads werden unverändert übernommen, Rasterbilder eingebettet.
/// Unlesbare SVG-Inhalte erhalten die Standardfläche.
pub fn plan_from_upload(bytes: &[u8], mime: &str) -> Result<FloorPlan, FloorPlanError> {
    validate_upload(mime, bytes.len())?;

    if mime.trim().eq_ignore_ascii_case("image/svg+xml") {
        let text = std::str::from_utf8(bytes)?.trim();
        let size = plan_dimensions(text);
        return Ok(FloorPlan {
            svg: text.to_string(),
            size,
        });
    }

    wrap_raster(bytes)
}

/// Dekodiert die Pixelgröße eines Rasterbilds und bettet es als Data-URL ein.
pub fn wrap_raster(bytes: &[u8]) -> Result<FloorPlan, FloorPlanError> {
    let format = image::guess_format(bytes)?;
    let (width, height) =
        ImageReader::with_format(Cursor::new(bytes), format).into_dimensions()?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    let href = format!("data:{};base64,{}", format.to_mime_type(), encoded);
    let svg = format!(
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg"><image href="{href}" width="{width}" height="{height}"/></svg>"#
    );

    log::info!("Rasterbild {}x{} als SVG-Grundriss eingebettet", width, height);
    Ok(FloorPlan {
        svg,
        size: DVec2::new(f64::from(width), f64::from(height)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::{extract_image_href, DEFAULT_PLAN_SIZE};

    fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("PNG sollte kodierbar sein");
        out.into_inner()
    }

    #[test]
    fn test_validate_upload_rejects_type_and_size() {
        assert!(validate_upload("image/png", 1024).is_ok());
        assert!(matches!(
            validate_upload("application/pdf", 10),
            Err(FloorPlanError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_upload("image/png", MAX_UPLOAD_BYTES + 1),
            Err(FloorPlanError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_wrap_raster_uses_pixel_size() {
        let plan = wrap_raster(&tiny_png(7, 3)).expect("PNG sollte einbettbar sein");
        assert_eq!(plan.size, DVec2::new(7.0, 3.0));
        assert_eq!(plan_dimensions(&plan.svg), DVec2::new(7.0, 3.0));
        let href = extract_image_href(&plan.svg).expect("image-Element erwartet");
        assert!(href.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_svg_upload_is_passed_through() {
        let svg = br#"<svg viewBox="0 0 400 300"><rect width="10" height="10"/></svg>"#;
        let plan = plan_from_upload(svg, "image/svg+xml").expect("SVG sollte akzeptiert werden");
        assert_eq!(plan.size, DVec2::new(400.0, 300.0));
        assert!(plan.svg.starts_with("<svg"));
    }

    #[test]
    fn test_unreadable_svg_upload_uses_default_size() {
        for content in [&b"not an svg document"[..], b"<html><body/></html>"] {
            let plan = plan_from_upload(content, "image/svg+xml")
                .expect("Unlesbares SVG sollte trotzdem übernommen werden");
            assert_eq!(plan.size, DEFAULT_PLAN_SIZE);
        }
    }

    #[test]
    fn test_svg_upload_still_checks_size() {
        let oversized = vec![b' '; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            plan_from_upload(&oversized, "image/svg+xml"),
            Err(FloorPlanError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_garbage_raster_is_rejected() {
        assert!(plan_from_upload(b"definitely not an image", "image/png").is_err());
    }
}
