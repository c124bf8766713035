//! Typed model and parser for the TMS capabilities document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pixel geometry and file extension of the published tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileFormat {
    pub extension: String,
    pub width: u32,
    pub height: u32,
}

/// A single zoom level advertised by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSetEntry {
    /// Zoom level. Entries are kept in document order; the source is
    /// assumed to list them ascending.
    pub order: u32,
}

/// The tileset container and its declared profile.
///
/// The profile is kept as the raw attribute string so consumers can report
/// unsupported values verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSets {
    pub profile: String,
    pub entries: Vec<TileSetEntry>,
}

/// The document's bounding box in its native units (degrees or projected
/// meters, depending on the profile).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// The consumed subset of a `tilemapresource.xml` document.
///
/// Only the first occurrence of each block is honored; documents describing
/// multiple data sets are not supported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub tile_format: Option<TileFormat>,
    pub tile_sets: Option<TileSets>,
    pub bounding_box: Option<RawBounds>,
    /// Spatial reference text, captured for diagnostics but not used for
    /// any decision.
    pub srs: Option<String>,
}

impl Capabilities {
    /// Parse a capabilities document.
    ///
    /// Tag names are matched case-insensitively by substring, so namespace
    /// prefixes and vendor decorations are tolerated.
    pub fn from_xml(xml: &str) -> Result<Capabilities, CapabilitiesError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut buf = Vec::new();
        let mut doc = Capabilities::default();
        // Entries being collected for the first tilesets container.
        let mut open_tile_sets: Option<TileSets> = None;
        let mut in_srs = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let tag = lower(e.local_name().as_ref());
                    if tag.contains("tilesets") {
                        if doc.tile_sets.is_none() && open_tile_sets.is_none() {
                            open_tile_sets = Some(TileSets {
                                profile: attr(&e, "profile").unwrap_or_default(),
                                entries: Vec::new(),
                            });
                        }
                    } else if tag.contains("tileset") {
                        if let Some(sets) = open_tile_sets.as_mut() {
                            sets.entries.push(TileSetEntry {
                                order: required_u32(&e, &tag, "order")?,
                            });
                        }
                    } else if tag.contains("srs") {
                        in_srs = doc.srs.is_none();
                    } else {
                        parse_leaf(&mut doc, &e, &tag)?;
                    }
                }
                Ok(Event::Empty(e)) => {
                    let tag = lower(e.local_name().as_ref());
                    if tag.contains("tilesets") {
                        if doc.tile_sets.is_none() && open_tile_sets.is_none() {
                            doc.tile_sets = Some(TileSets {
                                profile: attr(&e, "profile").unwrap_or_default(),
                                entries: Vec::new(),
                            });
                        }
                    } else if tag.contains("tileset") {
                        if let Some(sets) = open_tile_sets.as_mut() {
                            sets.entries.push(TileSetEntry {
                                order: required_u32(&e, &tag, "order")?,
                            });
                        }
                    } else {
                        parse_leaf(&mut doc, &e, &tag)?;
                    }
                }
                Ok(Event::Text(t)) if in_srs => {
                    let text = t.unescape().map_err(|e| CapabilitiesError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    })?;
                    doc.srs = Some(text.into_owned());
                    in_srs = false;
                }
                Ok(Event::End(e)) => {
                    let tag = lower(e.local_name().as_ref());
                    if tag.contains("tilesets") {
                        if let Some(sets) = open_tile_sets.take() {
                            doc.tile_sets = Some(sets);
                        }
                    } else if tag.contains("srs") {
                        in_srs = false;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(CapabilitiesError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    });
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(doc)
    }
}

/// Handle the single-node blocks (tileformat, boundingbox).
fn parse_leaf(doc: &mut Capabilities, e: &BytesStart, tag: &str) -> Result<(), CapabilitiesError> {
    if tag.contains("tileformat") {
        if doc.tile_format.is_none() {
            doc.tile_format = Some(TileFormat {
                extension: required(e, tag, "extension")?,
                width: required_u32(e, tag, "width")?,
                height: required_u32(e, tag, "height")?,
            });
        }
    } else if tag.contains("boundingbox") && doc.bounding_box.is_none() {
        doc.bounding_box = Some(RawBounds {
            min_x: required_f64(e, tag, "minx")?,
            min_y: required_f64(e, tag, "miny")?,
            max_x: required_f64(e, tag, "maxx")?,
            max_y: required_f64(e, tag, "maxy")?,
        });
    }
    Ok(())
}

fn lower(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_lowercase()
}

/// Look up an attribute by case-insensitive name.
fn attr(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr
            .key
            .local_name()
            .as_ref()
            .eq_ignore_ascii_case(name.as_bytes())
        {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

fn required(e: &BytesStart, tag: &str, name: &str) -> Result<String, CapabilitiesError> {
    attr(e, name).ok_or_else(|| CapabilitiesError::MissingAttribute {
        tag: tag.to_string(),
        attribute: name.to_string(),
    })
}

fn required_u32(e: &BytesStart, tag: &str, name: &str) -> Result<u32, CapabilitiesError> {
    let value = required(e, tag, name)?;
    value
        .parse()
        .map_err(|_| CapabilitiesError::InvalidAttribute {
            tag: tag.to_string(),
            attribute: name.to_string(),
            value,
        })
}

fn required_f64(e: &BytesStart, tag: &str, name: &str) -> Result<f64, CapabilitiesError> {
    let value = required(e, tag, name)?;
    value
        .parse()
        .map_err(|_| CapabilitiesError::InvalidAttribute {
            tag: tag.to_string(),
            attribute: name.to_string(),
            value,
        })
}

#[derive(Debug, Error)]
pub enum CapabilitiesError {
    #[error("XML parsing error at position {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("<{tag}> is missing required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    #[error("<{tag}> attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        tag: String,
        attribute: String,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<TileMap version="1.0.0" tilemapservice="http://tms.osgeo.org/1.0.0">
  <Title>Example</Title>
  <SRS>EPSG:900913</SRS>
  <BoundingBox minx="-20037508.34" miny="-20037508.34" maxx="20037508.34" maxy="20037508.34"/>
  <Origin x="-20037508.34" y="-20037508.34"/>
  <TileFormat width="256" height="256" mime-type="image/png" extension="png"/>
  <TileSets profile="global-mercator">
    <TileSet href="0" units-per-pixel="156543.033928041" order="0"/>
    <TileSet href="1" units-per-pixel="78271.5169640205" order="1"/>
    <TileSet href="2" units-per-pixel="39135.7584820102" order="2"/>
  </TileSets>
</TileMap>"#;

    #[test]
    fn test_parse_sample_document() {
        let doc = Capabilities::from_xml(SAMPLE).unwrap();

        let format = doc.tile_format.unwrap();
        assert_eq!(format.extension, "png");
        assert_eq!(format.width, 256);
        assert_eq!(format.height, 256);

        let sets = doc.tile_sets.unwrap();
        assert_eq!(sets.profile, "global-mercator");
        assert_eq!(
            sets.entries.iter().map(|e| e.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );

        let bounds = doc.bounding_box.unwrap();
        assert!((bounds.min_x - (-20037508.34)).abs() < 0.01);
        assert!((bounds.max_y - 20037508.34).abs() < 0.01);

        assert_eq!(doc.srs.as_deref(), Some("EPSG:900913"));
    }

    #[test]
    fn test_tag_matching_is_case_insensitive_substring() {
        let xml = r#"<tilemap>
  <tms:tileformat width="512" height="512" extension="jpg"/>
  <TILESETS profile="geodetic"><tileset order="4"/></TILESETS>
</tilemap>"#;
        let doc = Capabilities::from_xml(xml).unwrap();

        let format = doc.tile_format.unwrap();
        assert_eq!(format.width, 512);
        assert_eq!(format.extension, "jpg");

        let sets = doc.tile_sets.unwrap();
        assert_eq!(sets.profile, "geodetic");
        assert_eq!(sets.entries, vec![TileSetEntry { order: 4 }]);
    }

    #[test]
    fn test_only_first_block_is_honored() {
        let xml = r#"<tilemap>
  <tileformat width="256" height="256" extension="png"/>
  <tileformat width="512" height="512" extension="jpg"/>
  <tilesets profile="mercator"><tileset order="1"/></tilesets>
  <tilesets profile="geodetic"><tileset order="9"/></tilesets>
</tilemap>"#;
        let doc = Capabilities::from_xml(xml).unwrap();

        assert_eq!(doc.tile_format.unwrap().extension, "png");
        let sets = doc.tile_sets.unwrap();
        assert_eq!(sets.profile, "mercator");
        assert_eq!(sets.entries, vec![TileSetEntry { order: 1 }]);
    }

    #[test]
    fn test_missing_blocks_are_none() {
        let doc = Capabilities::from_xml("<tilemap></tilemap>").unwrap();
        assert_eq!(doc, Capabilities::default());
    }

    #[test]
    fn test_missing_attribute_is_error() {
        let xml = r#"<tilemap><tileformat width="256" height="256"/></tilemap>"#;
        let err = Capabilities::from_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            CapabilitiesError::MissingAttribute { ref attribute, .. } if attribute == "extension"
        ));
    }

    #[test]
    fn test_invalid_attribute_is_error() {
        let xml = r#"<tilemap><tilesets profile="mercator"><tileset order="first"/></tilesets></tilemap>"#;
        let err = Capabilities::from_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            CapabilitiesError::InvalidAttribute { ref value, .. } if value == "first"
        ));
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let err = Capabilities::from_xml("<tilemap><unclosed").unwrap_err();
        assert!(matches!(err, CapabilitiesError::Xml { .. }));
    }

    #[test]
    fn test_unsorted_tileset_orders_kept_in_document_order() {
        let xml = r#"<tilemap>
  <tilesets profile="global-geodetic">
    <tileset order="5"/>
    <tileset order="2"/>
    <tileset order="8"/>
  </tilesets>
</tilemap>"#;
        let doc = Capabilities::from_xml(xml).unwrap();
        let orders: Vec<u32> = doc
            .tile_sets
            .unwrap()
            .entries
            .iter()
            .map(|e| e.order)
            .collect();
        assert_eq!(orders, vec![5, 2, 8]);
    }
}
