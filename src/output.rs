use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::ValueEnum;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

/// `<base>.<ext>`. The extension is appended, never substituted, so a base
/// name containing dots is kept intact.
pub fn output_path(base: &Path, format: OutputFormat) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

fn svg_to_pdf(svg: &str) -> anyhow::Result<Vec<u8>> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
        .map_err(|e| anyhow!("Could not parse figure SVG: {}", e))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| anyhow!("Could not convert figure to PDF: {:?}", e))
}

fn svg_to_png(svg: &str, dpi: f32, path: &Path) -> anyhow::Result<()> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = resvg::usvg::Tree::from_str(svg, &options)
        .map_err(|e| anyhow!("Could not parse figure SVG: {}", e))?;

    let scale = dpi / 72.0;
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| anyhow!("Invalid image size"))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow!("Could not allocate {}x{} image", size.width(), size.height()))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    debug!("Rasterized figure at {}x{}", size.width(), size.height());

    // The figure paints an opaque white background, so premultiplied and
    // straight alpha coincide.
    let (width, height) = (pixmap.width(), pixmap.height());
    let img = image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| anyhow!("Image buffer does not match {}x{}", width, height))?;
    image::DynamicImage::ImageRgba8(img)
        .to_rgb8()
        .save(path)
        .with_context(|| format!("Error saving image {}", path.display()))
}

/// Write the figure as `<base>.<ext>` and return the path written.
pub fn write_figure(
    svg: &str,
    base: &Path,
    format: OutputFormat,
    dpi: f32,
) -> anyhow::Result<PathBuf> {
    let path = output_path(base, format);
    info!("Saving to {:?}...", path);

    match format {
        OutputFormat::Png => svg_to_png(svg, dpi, &path)?,
        OutputFormat::Svg | OutputFormat::Pdf => {
            let bytes = match format {
                OutputFormat::Pdf => svg_to_pdf(svg)?,
                _ => svg.as_bytes().to_vec(),
            };
            let file = File::create(&path)
                .with_context(|| format!("Error creating file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(&bytes)
                .and_then(|_| writer.flush())
                .with_context(|| format!("Error writing {}", path.display()))?;
        }
    }
    Ok(path)
}
