use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;

use crate::math::color::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Ppm,
    Png,
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let extension = match self {
            ImageFormat::Ppm => "ppm",
            ImageFormat::Png => "png",
        };
        f.write_str(extension)
    }
}

/// Row-major grid of pixel colors, origin in the top left corner.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Plain ppm lines may not be longer than this.
    const PPM_LINE_LIMIT: usize = 70;

    pub fn with_color(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, Color::black())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[self.offset(x, y)]
    }

    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1))
    }

    /// Sets every pixel to `shade(x, y)`. Rows are shaded in parallel and the
    /// progress bar, when given, advances once per finished row.
    pub fn fill_with<F>(&mut self, shade: F, progressbar: Option<ProgressBar>)
    where
        F: Fn(usize, usize) -> Color + Sync,
    {
        if self.width == 0 {
            return;
        }
        let shade_row = |(y, row): (usize, &mut [Color])| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = shade(x, y);
            }
        };

        let rows = self.pixels.par_chunks_mut(self.width).enumerate();
        match progressbar {
            Some(pb) => rows.progress_with(pb).for_each(shade_row),
            None => rows.for_each(shade_row),
        }
    }

    /// Interleaved 8 bit RGB, row by row.
    pub fn as_u8_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(Color::as_scaled_values)
            .collect()
    }

    /// Plain ppm (P3): each row starts on a new line, long rows wrap before
    /// 70 columns and the text ends with a newline.
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n255\n", self.width, self.height);

        for row in self.rows() {
            let mut line = String::new();
            for value in row.iter().flat_map(Color::as_scaled_values) {
                let value = value.to_string();
                if !line.is_empty() && line.len() + 1 + value.len() > Self::PPM_LINE_LIMIT {
                    out.push_str(&line);
                    out.push('\n');
                    line.clear();
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&value);
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.to_ppm().as_bytes())?;
        writer.flush()
    }

    pub fn write_png<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.as_u8_rgb())?;
        png_writer.finish().map_err(io::Error::from)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ImageFormat) -> io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        match format {
            ImageFormat::Ppm => self.write_ppm(writer),
            ImageFormat::Png => self.write_png(writer),
        }
    }
}
