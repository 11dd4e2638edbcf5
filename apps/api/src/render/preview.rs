//! Single-page PNG previews of a compiled resume.
//!
//! MuPDF rasterization is CPU-bound, so it runs inside
//! `tokio::task::spawn_blocking`. The document is opened once per call and
//! never shared between tasks.

use std::io::Cursor;

use image::{DynamicImage, RgbaImage};
use mupdf::{Colorspace, Document, Matrix, Pixmap};

use super::compile::DocumentCompiler;
use super::CompileError;
use crate::latex::Engine;

/// PDF user space is 72 units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// One rendered page plus the document's page count.
#[derive(Debug)]
pub struct PagePreview {
    pub png: Vec<u8>,
    pub page_count: usize,
}

/// Compiles `source`, then rasterizes page `page` (0-based) at `dpi`.
///
/// Compilation failures propagate unchanged.
pub async fn preview(
    compiler: &dyn DocumentCompiler,
    source: &str,
    engine: Engine,
    page: i64,
    dpi: u32,
) -> Result<PagePreview, CompileError> {
    let pdf = compiler.compile(source, engine).await?;
    rasterize_page(pdf, page, dpi).await
}

pub async fn rasterize_page(pdf: Vec<u8>, page: i64, dpi: u32) -> Result<PagePreview, CompileError> {
    tokio::task::spawn_blocking(move || rasterize_blocking(&pdf, page, dpi))
        .await
        .map_err(|e| CompileError::Join(e.to_string()))?
}

fn rasterize_blocking(pdf: &[u8], page: i64, dpi: u32) -> Result<PagePreview, CompileError> {
    let doc = Document::from_bytes(pdf, "application/pdf").map_err(mupdf_error)?;
    let page_count = doc.page_count().map_err(mupdf_error)?.max(0) as usize;

    let index = usize::try_from(page)
        .ok()
        .filter(|&i| i < page_count)
        .ok_or(CompileError::PageOutOfRange { page, page_count })?;

    let scale = dpi as f32 / POINTS_PER_INCH;
    let pixmap = doc
        .load_page(index as i32)
        .and_then(|p| {
            p.to_pixmap(
                &Matrix::new_scale(scale, scale),
                &Colorspace::device_rgb(),
                false,
                true,
            )
        })
        .map_err(mupdf_error)?;

    Ok(PagePreview {
        png: encode_png(&pixmap)?,
        page_count,
    })
}

fn mupdf_error(e: mupdf::Error) -> CompileError {
    CompileError::Rasterize(e.to_string())
}

/// Expands the pixmap's samples (RGB or RGBA) to RGBA and encodes PNG.
fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, CompileError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for px in samples.chunks_exact(n).take(width as usize * height as usize) {
        let alpha = if n >= 4 { px[3] } else { 255 };
        rgba.extend_from_slice(&[px[0], px[1], px[2], alpha]);
    }

    let img = RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| CompileError::Rasterize("pixmap size does not match its samples".to_string()))?;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| CompileError::Rasterize(e.to_string()))?;
    Ok(png)
}
