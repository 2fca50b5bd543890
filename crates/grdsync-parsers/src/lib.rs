//! Readers for the two input formats grdsync understands: GRD/GRDP resource
//! documents (only the `<part file="...">` references matter) and the
//! Greaselion rule list.

mod greaselion;

pub use greaselion::{parse_greaselion_rules, read_greaselion_message_paths, DEFAULT_GREASELION_BASE};

use grdsync_core::{FileSystem, GrdSyncError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// Read `path` and return the `file` attribute of every `<part>` element,
/// in document order. Duplicates are kept.
///
/// A missing document is a [`GrdSyncError::NotFound`]; callers treat it as a
/// broken tree, not as an empty one.
pub fn read_part_files(fs: &dyn FileSystem, path: &Path) -> Result<Vec<String>> {
    if !fs.exists(path) {
        return Err(GrdSyncError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let xml = fs
        .read_to_string(path)
        .map_err(|e| GrdSyncError::io(path, e))?;
    let parts = parse_part_files(&xml, path)?;
    tracing::trace!(event = "grd_parts_read", path = %path.display(), parts = parts.len());
    Ok(parts)
}

/// Extract part references from already loaded markup. `path` is only used
/// for error messages.
pub fn parse_part_files(xml: &str, path: &Path) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let xml_err = |message: String| GrdSyncError::Xml {
        path: path.to_path_buf(),
        message,
    };

    let mut buf = Vec::new();
    let mut out = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            // grit markup is matched the way an HTML DOM would: tag and
            // attribute names ignore ASCII case.
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref().eq_ignore_ascii_case(b"part") =>
            {
                let mut file: Option<String> = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|err| xml_err(format!("bad attribute: {err}")))?;
                    if attr.key.local_name().as_ref().eq_ignore_ascii_case(b"file") {
                        let value = attr
                            .unescape_value()
                            .map_err(|err| xml_err(format!("bad file attribute: {err}")))?;
                        file = Some(value.into_owned());
                    }
                }
                match file {
                    Some(f) => out.push(f),
                    None => {
                        return Err(xml_err(format!(
                            "<part> without a file attribute near byte {}",
                            reader.buffer_position()
                        )))
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(xml_err(format!(
                    "{e} (near byte {})",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}
