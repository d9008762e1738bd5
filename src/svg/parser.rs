//! Liest die Koordinatenfläche eines SVG-Grundrisses.

use glam::DVec2;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::FloorPlanError;

/// Fläche für Pläne ohne lesbare Größe.
pub const DEFAULT_PLAN_SIZE: DVec2 = DVec2::new(800.0, 600.0);

/// Koordinatenfläche des Plans; nicht lesbare Pläne liefern 800×600.
pub fn plan_dimensions(svg: &str) -> DVec2 {
    match try_plan_dimensions(svg) {
        Ok(size) => size,
        Err(e) => {
            log::warn!("SVG-Größe nicht lesbar, verwende Standardfläche: {}", e);
            DEFAULT_PLAN_SIZE
        }
    }
}

/// Koordinatenfläche: `viewBox`, sonst `width`/`height`, sonst 800×600.
///
/// Fehler nur, wenn kein `<svg>`-Wurzelelement gefunden wird.
pub fn try_plan_dimensions(svg: &str) -> Result<DVec2, FloorPlanError> {
    let root = read_root_attributes(svg)?;

    if let Some(size) = root.view_box.as_deref().and_then(parse_view_box) {
        return Ok(size);
    }

    let width = root.width.as_deref().and_then(parse_length);
    let height = root.height.as_deref().and_then(parse_length);
    match (width, height) {
        (Some(w), Some(h)) => Ok(DVec2::new(w, h)),
        (Some(w), None) => Ok(DVec2::new(w, DEFAULT_PLAN_SIZE.y)),
        (None, Some(h)) => Ok(DVec2::new(DEFAULT_PLAN_SIZE.x, h)),
        (None, None) => Ok(DEFAULT_PLAN_SIZE),
    }
}

/// Liefert das `href` des ersten `<image>`-Elements (eingebettete Raster-Pläne).
pub fn extract_image_href(svg: &str) -> Option<String> {
    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if local_name(e) == "image" {
                    return attribute(e, &["href", "xlink:href"]);
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

#[derive(Default)]
struct RootAttributes {
    view_box: Option<String>,
    width: Option<String>,
    height: Option<String>,
}

fn read_root_attributes(svg: &str) -> Result<RootAttributes, FloorPlanError> {
    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if local_name(e) != "svg" {
                    return Err(FloorPlanError::NotSvg);
                }
                return Ok(RootAttributes {
                    view_box: attribute(e, &["viewBox"]),
                    width: attribute(e, &["width"]),
                    height: attribute(e, &["height"]),
                });
            }
            Event::Eof => return Err(FloorPlanError::NotSvg),
            _ => {}
        }
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, keys: &[&str]) -> Option<String> {
    e.attributes().with_checks(false).flatten().find_map(|attr| {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if keys.contains(&key.as_str()) {
            attr.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

/// `"min-x min-y width height"` (Leerzeichen oder Kommas) → Breite/Höhe.
fn parse_view_box(value: &str) -> Option<DVec2> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [_, _, w, h] if *w > 0.0 && *h > 0.0 => Some(DVec2::new(*w, *h)),
        _ => None,
    }
}

/// `"800"`, `"800px"`, `"12.5pt"` → Zahl; Prozentangaben werden ignoriert.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.ends_with('%') {
        return None;
    }
    let number: f64 = value[..numeric_prefix_len(value)].parse().ok()?;
    (number.is_finite() && number > 0.0).then_some(number)
}

/// Länge des Zahlanteils; ein `e` zählt nur mit folgender Ziffer oder Vorzeichen
/// als Exponent (`"12em"` → `"12"`, `"1e3px"` → `"1e3"`).
fn numeric_prefix_len(value: &str) -> usize {
    let bytes = value.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        let c = bytes[end];
        let exponent = (c == b'e' || c == b'E')
            && bytes
                .get(end + 1)
                .is_some_and(|next| next.is_ascii_digit() || *next == b'-' || *next == b'+');
        let sign = (c == b'-' || c == b'+')
            && (end == 0 || matches!(bytes[end - 1], b'e' | b'E'));
        if c.is_ascii_digit() || c == b'.' || sign || exponent {
            end += 1;
        } else {
            break;
        }
    }
    end
}
