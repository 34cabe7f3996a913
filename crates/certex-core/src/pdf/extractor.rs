//! PDF text and page image extraction using lopdf and pdf-extract.

use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage, imageops};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

// A4 in PDF points, used when a page carries no usable media box.
const DEFAULT_PAGE_SIZE: (f32, f32) = (595.0, 842.0);

/// PDF processor backed by lopdf (structure, images) and pdf-extract
/// (text layer).
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new extractor with no document loaded.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }

    /// Decode every raster image placed on a page, in resource order.
    fn extract_page_images(&self, page: u32) -> Result<Vec<DynamicImage>> {
        let doc = self.document()?;

        let pages = doc.get_pages();
        let page_id = pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let mut images = Vec::new();

        if let Some(resources) = page_resources(doc, *page_id) {
            if let Ok(xobjects) = resources.get(b"XObject") {
                if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
                    for (_name, obj_ref) in xobj_dict.iter() {
                        if let Ok((_, obj)) = doc.dereference(obj_ref) {
                            if let Some(img) = decode_image_object(doc, obj) {
                                images.push(img);
                            }
                        }
                    }
                }
            }
        }

        // Scanned certificates occasionally reference their scan from a
        // shared object rather than the page's XObject dictionary.
        if images.is_empty() {
            debug!("no XObject images on page {}, scanning all objects", page);
            for (_id, object) in doc.objects.iter() {
                if let Some(img) = decode_image_object(doc, object) {
                    images.push(img);
                }
            }
        }

        debug!("decoded {} images for page {}", images.len(), page);
        Ok(images)
    }

    /// Media box dimensions of a page in PDF points.
    fn page_size(&self, page: u32) -> Result<(f32, f32)> {
        let doc = self.document()?;
        let pages = doc.get_pages();
        let page_id = pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        Ok(media_box(doc, *page_id).unwrap_or(DEFAULT_PAGE_SIZE))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.document()?;
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        // pages are 1-indexed
        if page == 0 {
            return Err(PdfError::InvalidPage(page));
        }

        let full_text = self.extract_text()?;
        let lines: Vec<&str> = full_text.lines().collect();
        let page_count = self.page_count() as usize;

        if page_count == 0 {
            return Ok(String::new());
        }

        // pdf-extract exposes no page boundaries; approximate by an even
        // split of the line count.
        let lines_per_page = lines.len() / page_count;
        let start = ((page - 1) as usize) * lines_per_page;
        let end = (page as usize) * lines_per_page;

        Ok(lines[start.min(lines.len())..end.min(lines.len())].join("\n"))
    }

    fn render_page(&self, page: u32, scale: f32) -> Result<DynamicImage> {
        let (page_width, page_height) = self.page_size(page)?;

        let width = ((page_width * scale).ceil() as u32).max(1);
        let height = ((page_height * scale).ceil() as u32).max(1);

        // White fill: scanned pages can carry alpha, and the OCR engine
        // misreads transparent regions as dark pixels.
        let mut canvas: RgbaImage =
            ImageBuffer::from_pixel(width, height, Rgba([255, 255, 255, 255]));

        let images = self.extract_page_images(page)?;
        if images.is_empty() {
            warn!("page {} has no raster content, rendering blank canvas", page);
            return Ok(DynamicImage::ImageRgba8(canvas));
        }

        for img in images {
            // Full-bleed scans fill the page; fit each image inside the
            // canvas preserving its aspect ratio and center it.
            let scaled = img.resize(width, height, imageops::FilterType::Lanczos3);
            let x = (width.saturating_sub(scaled.width())) / 2;
            let y = (height.saturating_sub(scaled.height())) / 2;
            imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
        }

        Ok(DynamicImage::ImageRgba8(canvas))
    }
}

/// Decode a raster image XObject into a `DynamicImage`.
fn decode_image_object(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    let subtype = dict.get(b"Subtype").ok()?;
    if subtype.as_name().ok()? != b"Image" {
        return None;
    }

    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;

    trace!("found image object: {}x{}", width, height);

    let data = match stream.decompressed_content() {
        Ok(d) => d,
        Err(_) => stream.content.clone(),
    };

    if let Ok(filter) = dict.get(b"Filter") {
        let filter_name = match filter {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) if !arr.is_empty() => arr.first().and_then(|o| o.as_name().ok()),
            _ => None,
        };

        match filter_name {
            Some(b"DCTDecode") => {
                // JPEG scan, stored compressed
                trace!("decoding JPEG image");
                return image::load_from_memory_with_format(
                    &stream.content,
                    image::ImageFormat::Jpeg,
                )
                .ok();
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                trace!("unsupported image codec in PDF stream");
                return None;
            }
            _ => {}
        }
    }

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8) as u8;

    image_from_raw(&data, width, height, color_space, bits)
}

fn image_from_raw(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: u8,
) -> Option<DynamicImage> {
    if bits_per_component != 8 {
        trace!("unsupported bits per component: {}", bits_per_component);
        return None;
    }

    let expected_rgb = (width * height * 3) as usize;
    let expected_gray = (width * height) as usize;

    if color_space == b"DeviceRGB" || color_space == b"RGB" {
        if data.len() >= expected_rgb {
            let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
            for chunk in data[..expected_rgb].chunks(3) {
                rgba_data.extend_from_slice(chunk);
                rgba_data.push(255);
            }
            return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba_data)
                .map(DynamicImage::ImageRgba8);
        }
    } else if (color_space == b"DeviceGray" || color_space == b"G") && data.len() >= expected_gray {
        let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
        for &gray in data[..expected_gray].iter() {
            rgba_data.extend_from_slice(&[gray, gray, gray, 255]);
        }
        return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba_data)
            .map(DynamicImage::ImageRgba8);
    }

    trace!(
        "could not decode image: data_len={}, expected_rgb={}, expected_gray={}",
        data.len(),
        expected_rgb,
        expected_gray
    );
    None
}

/// Resources dictionary for a page, following parent inheritance.
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    inherited_entry(doc, page_id, b"Resources").and_then(|obj| match obj {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    })
}

/// Media box for a page, following parent inheritance.
fn media_box(doc: &Document, page_id: ObjectId) -> Option<(f32, f32)> {
    let Object::Array(rect) = inherited_entry(doc, page_id, b"MediaBox")? else {
        return None;
    };
    if rect.len() != 4 {
        return None;
    }

    let coord = |i: usize| -> Option<f32> {
        match &rect[i] {
            Object::Integer(v) => Some(*v as f32),
            Object::Real(v) => Some(*v),
            _ => None,
        }
    };

    let width = (coord(2)? - coord(0)?).abs();
    let height = (coord(3)? - coord(1)?).abs();
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some((width, height))
}

/// Look up a page-tree entry, walking up through Parent nodes.
fn inherited_entry(doc: &Document, node_id: ObjectId, key: &[u8]) -> Option<Object> {
    let node = doc.get_object(node_id).ok()?;
    let Object::Dictionary(dict) = node else {
        return None;
    };

    if let Ok(entry) = dict.get(key) {
        if let Ok((_, obj)) = doc.dereference(entry) {
            return Some(obj.clone());
        }
    }

    if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
        return inherited_entry(doc, *parent_id, key);
    }
    None
}
