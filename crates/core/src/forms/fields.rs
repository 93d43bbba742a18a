//! Interactive form fields: extraction, mutation and persistence.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::document::{ObjectReader, ObjectStore};
use crate::dom::Document;
use crate::error::{PdfError, Result};
use crate::geometry::BoundingBox;
use crate::model::{PDFDict, PDFObjRef, PDFObject};

use super::text::{decode_text, encode_text, lookup_encoding};

/// Decoded state of one named form field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldRecord {
    pub value: Option<String>,
    pub rect: Option<BoundingBox>,
    pub label: Option<String>,
}

/// How field strings are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Show the field name in place of an empty value.
    pub replace_none_value: bool,
    /// WHATWG label of the primary encoding.
    pub encoding: String,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            replace_none_value: false,
            encoding: "utf-8".into(),
        }
    }
}

/// Where and what [`Document::save_field_values`] writes.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Target file; the source file is overwritten when `None`.
    pub output_path: Option<PathBuf>,
    /// Values to write instead of the cached field values.
    pub newvals: Option<IndexMap<String, String>>,
    /// Drop widget appearance streams so viewers rebuild them.
    pub use_appearances_writer: bool,
}

impl Document {
    /// Reads the AcroForm fields, caching the result until the document is
    /// closed.
    pub fn get_input_fields(
        &mut self,
        options: &FieldOptions,
    ) -> Result<&IndexMap<String, FieldRecord>> {
        self.ensure_open()?;
        if self.fields.is_none() {
            let fields = self.read_input_fields(options)?;
            self.fields = Some(fields);
        }
        self.fields.as_ref().ok_or(PdfError::NoInputFields)
    }

    fn read_input_fields(
        &mut self,
        options: &FieldOptions,
    ) -> Result<IndexMap<String, FieldRecord>> {
        let encoding = lookup_encoding(&options.encoding)?;
        let reader = ObjectReader::new(self.read_bytes()?)?;
        let acroform = match reader.catalog().get("AcroForm") {
            Some(obj) => reader.resolve(obj)?,
            None => return Err(PdfError::NoInputFields),
        };
        let acroform = acroform.as_dict().map_err(|_| PdfError::NoInputFields)?;
        let refs = match acroform.get("Fields") {
            Some(obj) => reader.resolve(obj)?.as_array().cloned().unwrap_or_default(),
            None => Vec::new(),
        };

        let decode = |obj: Option<&PDFObject>| -> Result<Option<String>> {
            let Some(obj) = obj else { return Ok(None) };
            let obj = reader.resolve(obj)?;
            Ok(match obj.as_string() {
                Ok(bytes) => Some(decode_text(bytes, encoding)),
                Err(_) => obj.as_name().ok().map(str::to_string),
            })
        };

        let mut fields = IndexMap::new();
        for field_ref in &refs {
            let field = match reader.resolve(field_ref) {
                Ok(field) => field,
                Err(PdfError::ObjectNotFound(objid)) => {
                    debug!(objid, "skipping dangling form field reference");
                    continue;
                }
                Err(err) => return Err(err),
            };
            let Ok(field) = field.as_dict() else {
                debug!("skipping form field that resolves to nothing");
                continue;
            };
            let Some(name) = decode(field.get("T"))? else {
                debug!("skipping form field without a name");
                continue;
            };
            let mut value = decode(field.get("V"))?;
            if options.replace_none_value && value.as_deref().is_none_or(str::is_empty) {
                value = Some(name.clone());
            }
            let rect = match field.get("Rect") {
                Some(obj) => {
                    let values = reader
                        .resolve(obj)?
                        .as_array()?
                        .iter()
                        .map(|v| reader.resolve(v).and_then(|v| v.as_num()))
                        .collect::<Result<Vec<f64>>>()?;
                    Some(BoundingBox::from_values(values)?)
                }
                None => None,
            };
            let label = decode(field.get("TU"))?;
            fields.insert(name, FieldRecord { value, rect, label });
        }
        info!(path = %self.path().display(), fields = fields.len(), "form fields read");
        Ok(fields)
    }

    /// Sets a cached field value, addressing the field by name or by a
    /// label that only one field carries.
    pub fn set_field_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.get_input_fields(&FieldOptions::default())?;
        let fields = self.fields.as_mut().ok_or(PdfError::NoInputFields)?;
        if let Some(record) = fields.get_mut(name) {
            record.value = Some(value.to_string());
            return Ok(());
        }

        let candidates: Vec<String> = fields
            .iter()
            .filter(|(_, record)| record.label.as_deref() == Some(name))
            .map(|(key, _)| key.clone())
            .collect();
        match candidates.as_slice() {
            [] => Err(PdfError::FieldNotFound(name.to_string())),
            [key] => {
                if let Some(record) = fields.get_mut(key) {
                    record.value = Some(value.to_string());
                }
                Ok(())
            }
            _ => Err(PdfError::AmbiguousField {
                label: name.to_string(),
                candidates,
            }),
        }
    }

    /// Writes field values into a rewritten copy of the file.
    ///
    /// A page whose widgets cannot be updated is logged and skipped.
    pub fn save_field_values(&mut self, options: &SaveOptions) -> Result<()> {
        let values: IndexMap<String, String> = match &options.newvals {
            Some(newvals) => newvals.clone(),
            None => self
                .get_input_fields(&FieldOptions::default())?
                .iter()
                .map(|(name, record)| (name.clone(), record.value.clone().unwrap_or_default()))
                .collect(),
        };

        let reader = ObjectReader::new(self.read_bytes()?)?;
        let pages = reader.page_refs()?;
        let mut store = ObjectStore::from_reader(&reader)?;
        drop(reader);

        set_need_appearances(&mut store)?;
        let mut updated = 0;
        for (index, page) in pages.iter().enumerate() {
            match update_page_fields(&mut store, *page, &values, options.use_appearances_writer) {
                Ok(count) => updated += count,
                Err(err) => warn!(page = index + 1, %err, "failed to update form fields on page"),
            }
        }

        let target = match &options.output_path {
            Some(path) => path.clone(),
            None => {
                self.release_handle();
                self.path().to_path_buf()
            }
        };
        store.save(&target)?;
        info!(path = %target.display(), updated, "form field values saved");
        Ok(())
    }
}

/// Forces `/NeedAppearances true` on the AcroForm dictionary.
fn set_need_appearances(store: &mut ObjectStore) -> Result<()> {
    let root = store.root().ok_or(PdfError::NoInputFields)?;
    let acroform_ref = {
        let catalog = store.get_mut(root.objid).ok_or(PdfError::ObjectNotFound(root.objid))?;
        match catalog.as_dict_mut()?.get_mut("AcroForm") {
            Some(PDFObject::Ref(r)) => *r,
            Some(PDFObject::Dict(acroform)) => {
                acroform.insert("NeedAppearances".into(), PDFObject::Bool(true));
                return Ok(());
            }
            _ => return Err(PdfError::NoInputFields),
        }
    };
    store
        .get_mut(acroform_ref.objid)
        .ok_or(PdfError::ObjectNotFound(acroform_ref.objid))?
        .as_dict_mut()?
        .insert("NeedAppearances".into(), PDFObject::Bool(true));
    Ok(())
}

struct WidgetUpdate {
    widget: u32,
    field: u32,
    value: String,
    button: bool,
}

/// Updates the widgets of one page, returning how many were written.
fn update_page_fields(
    store: &mut ObjectStore,
    page: PDFObjRef,
    values: &IndexMap<String, String>,
    strip_appearances: bool,
) -> Result<usize> {
    let updates = plan_page_updates(store, page, values)?;
    for update in &updates {
        let value = if update.button {
            PDFObject::Name(update.value.clone())
        } else {
            PDFObject::String(encode_text(&update.value))
        };
        store
            .get_mut(update.field)
            .ok_or(PdfError::ObjectNotFound(update.field))?
            .as_dict_mut()?
            .insert("V".into(), value);

        let state = update.button.then(|| appearance_state(store, update.widget, &update.value));
        let widget = store
            .get_mut(update.widget)
            .ok_or(PdfError::ObjectNotFound(update.widget))?
            .as_dict_mut()?;
        if let Some(state) = state {
            widget.insert("AS".into(), PDFObject::Name(state));
        }
        if strip_appearances {
            widget.shift_remove("AP");
        }
    }
    Ok(updates.len())
}

fn plan_page_updates(
    store: &ObjectStore,
    page: PDFObjRef,
    values: &IndexMap<String, String>,
) -> Result<Vec<WidgetUpdate>> {
    let page_obj = store.get(page.objid).ok_or(PdfError::ObjectNotFound(page.objid))?;
    let Some(annots) = page_obj.as_dict()?.get("Annots") else {
        return Ok(Vec::new());
    };
    let annots = store
        .resolve(annots)
        .ok_or(PdfError::SyntaxError("dangling /Annots reference".into()))?
        .as_array()?;

    let mut updates = Vec::new();
    for annot in annots {
        let PDFObject::Ref(widget_ref) = annot else {
            continue;
        };
        let Some(widget) = store.get(widget_ref.objid).and_then(|o| o.as_dict().ok()) else {
            continue;
        };
        if !matches!(widget.get("Subtype"), Some(PDFObject::Name(s)) if s == "Widget") {
            continue;
        }
        let (field_id, field) = match widget.get("T") {
            Some(_) => (widget_ref.objid, widget),
            None => match widget.get("Parent") {
                Some(PDFObject::Ref(parent)) => {
                    match store.get(parent.objid).and_then(|o| o.as_dict().ok()) {
                        Some(dict) => (parent.objid, dict),
                        None => continue,
                    }
                }
                _ => continue,
            },
        };
        let Some(name) = field_name(store, field) else {
            continue;
        };
        let Some(value) = values.get(&name) else {
            continue;
        };
        updates.push(WidgetUpdate {
            widget: widget_ref.objid,
            field: field_id,
            value: value.clone(),
            button: is_button(field),
        });
    }
    Ok(updates)
}

fn field_name(store: &ObjectStore, field: &PDFDict) -> Option<String> {
    let name = store.resolve(field.get("T")?)?;
    match name.as_string() {
        Ok(bytes) => Some(decode_text(bytes, encoding_rs::UTF_8)),
        Err(_) => name.as_name().ok().map(str::to_string),
    }
}

fn is_button(field: &PDFDict) -> bool {
    matches!(field.get("FT"), Some(PDFObject::Name(ft)) if ft == "Btn")
        || matches!(field.get("V"), Some(PDFObject::Name(_)))
}

/// The `/AS` state for a button set to `value`: the value itself when the
/// widget has a normal appearance of that name, `Off` otherwise.
fn appearance_state(store: &ObjectStore, widget: u32, value: &str) -> String {
    let has_state = store
        .get(widget)
        .and_then(|w| w.get("AP"))
        .and_then(|ap| store.resolve(ap))
        .and_then(|ap| ap.get("N"))
        .and_then(|n| store.resolve(n))
        .and_then(|n| n.as_dict().ok())
        .is_some_and(|n| n.contains_key(value));
    if has_state { value.to_string() } else { "Off".to_string() }
}
