//! PNG output: the structure grid and one bar chart per reference.
//!
//! Drawing is done on a plain RGB raster. Nothing here renders glyphs, so
//! titles, axis labels and per-cell legends travel as PNG text chunks
//! alongside the image.
//!
//! Writing an image is best effort. Every save returns a [SaveOutcome]
//! instead of an error so a full disk or a missing directory never stops
//! the analysis.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::native::element::element_by_number;
use crate::report::Score;
use crate::toolkit::Depiction;

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
pub const SKY_BLUE: Rgb = [135, 206, 235];
pub const LIGHT_GREEN: Rgb = [144, 238, 144];

/// Bar colours, one per reference in dataset order.
pub const REFERENCE_COLOURS: [Rgb; 2] = [SKY_BLUE, LIGHT_GREEN];

pub fn reference_colour(index: usize) -> Rgb {
    REFERENCE_COLOURS[index % REFERENCE_COLOURS.len()]
}

pub const GRID_FILE_NAME: &str = "vkor_compounds.png";
pub const MOLS_PER_ROW: usize = 4;
const CELL: u32 = 250;

const CHART_WIDTH: u32 = 1200;
const CHART_HEIGHT: u32 = 600;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Failed { path: PathBuf, reason: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            SaveOutcome::Saved(path) | SaveOutcome::Failed { path, .. } => path,
        }
    }
}

/// An RGB raster, row-major, three bytes per pixel.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let data = background
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// set one pixel, silently clipping anything off the canvas
    pub fn put(&mut self, x: i64, y: i64, colour: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64
        {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        self.data[i..i + 3].copy_from_slice(&colour);
    }

    /// fill the half-open rectangle [x0, x1) x [y0, y1)
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, c: Rgb) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, c);
            }
        }
    }

    /// one-pixel outline of the same rectangle [Canvas::fill_rect] fills
    pub fn stroke_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, c: Rgb) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for x in x0..x1 {
            self.put(x, y0, c);
            self.put(x, y1 - 1, c);
        }
        for y in y0..y1 {
            self.put(x0, y, c);
            self.put(x1 - 1, y, c);
        }
    }

    /// Bresenham line
    pub fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, c: Rgb) {
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = (if x0 < x1 { 1 } else { -1 }, if y0 < y1 { 1 } else { -1 });
        let (mut x, mut y, mut e) = (x0, y0, dx + dy);
        loop {
            self.put(x, y, c);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * e;
            if e2 >= dy {
                e += dy;
                x += sx;
            }
            if e2 <= dx {
                e += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i64, cy: i64, r: i64, c: Rgb) {
        for y in -r..=r {
            for x in -r..=r {
                if x * x + y * y <= r * r {
                    self.put(cx + x, cy + y, c);
                }
            }
        }
    }
}

/// File name for the chart against `reference`:
/// `4-Hydroxycoumarin (Control)` becomes `similarity_to_4_hydroxycoumarin.png`.
pub fn chart_file_name(reference: &str) -> String {
    format!("similarity_to_{}.png", slug(reference))
}

fn slug(name: &str) -> String {
    let base = name.split(" (").next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Draw `scores` as vertical bars on a 0 to 1 axis, in the order given.
pub fn bar_chart(scores: &[Score], colour: Rgb) -> Canvas {
    let (left, right, top, bottom) = (80i64, 20i64, 40i64, 120i64);
    let (w, h) = (CHART_WIDTH as i64, CHART_HEIGHT as i64);
    let plot_h = h - top - bottom;
    let baseline = h - bottom;
    let mut canvas = Canvas::new(CHART_WIDTH, CHART_HEIGHT, WHITE);

    // axes and ticks every 0.2
    canvas.line(left, top, left, baseline, BLACK);
    canvas.line(left, baseline, w - right, baseline, BLACK);
    for i in 0..=5 {
        let y = baseline - plot_h * i / 5;
        canvas.line(left - 6, y, left, y, BLACK);
    }

    if scores.is_empty() {
        return canvas;
    }
    let slot = (w - left - right) / scores.len() as i64;
    let bar = (slot * 4 / 5).max(1);
    for (i, s) in scores.iter().enumerate() {
        let x0 = left + slot * i as i64 + (slot - bar) / 2;
        let height = (s.score.clamp(0.0, 1.0) * plot_h as f64).round() as i64;
        let y0 = baseline - height;
        canvas.fill_rect(x0, y0, x0 + bar, baseline, colour);
        canvas.stroke_rect(x0, y0, x0 + bar, baseline + 1, BLACK);
    }
    canvas
}

/// Lay out one depiction per cell, [MOLS_PER_ROW] to a row.
pub fn structure_grid(depictions: &[&Depiction]) -> Canvas {
    let n = depictions.len().max(1);
    let cols = n.min(MOLS_PER_ROW) as u32;
    let rows = n.div_ceil(MOLS_PER_ROW) as u32;
    let mut canvas = Canvas::new(cols * CELL, rows * CELL, WHITE);
    for (i, d) in depictions.iter().enumerate() {
        let ox = (i % MOLS_PER_ROW) as i64 * CELL as i64;
        let oy = (i / MOLS_PER_ROW) as i64 * CELL as i64;
        draw_molecule(&mut canvas, d, ox, oy);
    }
    canvas
}

fn draw_molecule(canvas: &mut Canvas, d: &Depiction, ox: i64, oy: i64) {
    // leave room at the bottom for the legend a viewer would draw
    let margin = 25.0;
    let span = CELL as f64 - 2.0 * margin;
    let to_px = |x: f64, y: f64| {
        (
            ox + (margin + x * span).round() as i64,
            oy + (margin + y * span * 0.85).round() as i64,
        )
    };
    let grey = [60, 60, 60];
    for b in &d.bonds {
        let (Some(a1), Some(a2)) = (d.atoms.get(b.begin), d.atoms.get(b.end))
        else {
            continue;
        };
        let (x0, y0) = to_px(a1.x, a1.y);
        let (x1, y1) = to_px(a2.x, a2.y);
        canvas.line(x0, y0, x1, y1, grey);

        let extra = match (b.aromatic, b.order) {
            (true, _) => 1,
            (false, o) => o.saturating_sub(1) as i64,
        };
        // parallel strokes for higher orders, perpendicular to the bond
        let (dx, dy) = ((x1 - x0) as f64, (y1 - y0) as f64);
        let len = dx.hypot(dy).max(1.0);
        let (px, py) = (-dy / len * 4.0, dx / len * 4.0);
        for k in 1..=extra {
            let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
            let (qx, qy) =
                ((px * sign).round() as i64, (py * sign).round() as i64);
            canvas.line(x0 + qx, y0 + qy, x1 + qx, y1 + qy, grey);
        }
    }
    for a in &d.atoms {
        if a.atomic_number == 6 {
            continue;
        }
        let (x, y) = to_px(a.x, a.y);
        let colour = element_by_number(a.atomic_number).map_or(BLACK, |e| e.rgb);
        canvas.fill_circle(x, y, 5, colour);
    }
}

fn write_png(
    path: &Path,
    canvas: &Canvas,
    text: &[(String, String)],
) -> Result<(), png::EncodingError> {
    let file = File::create(path)?;
    let mut encoder =
        png::Encoder::new(BufWriter::new(file), canvas.width, canvas.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    for (keyword, value) in text {
        encoder.add_text_chunk(keyword.clone(), value.clone())?;
    }
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&canvas.data)?;
    writer.finish()?;
    Ok(())
}

fn save(path: PathBuf, canvas: &Canvas, text: &[(String, String)]) -> SaveOutcome {
    match write_png(&path, canvas, text) {
        Ok(()) => {
            info!("wrote {}", path.display());
            SaveOutcome::Saved(path)
        }
        Err(e) => {
            warn!("failed to write {}: {e}", path.display());
            SaveOutcome::Failed {
                path,
                reason: e.to_string(),
            }
        }
    }
}

/// Write the bar chart of similarity to `reference` into `dir`.
pub fn save_similarity_chart(
    dir: &Path,
    reference: &str,
    scores: &[Score],
    colour: Rgb,
) -> SaveOutcome {
    let mut text = vec![
        ("Title".to_owned(), format!("Tanimoto Similarity to {reference}")),
        ("XLabel".to_owned(), "Compound".to_owned()),
        ("YLabel".to_owned(), "Similarity Score (0-1)".to_owned()),
    ];
    text.extend(
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("Bar {i}"), format!("{}: {:.3}", s.name, s.score))),
    );
    save(
        dir.join(chart_file_name(reference)),
        &bar_chart(scores, colour),
        &text,
    )
}

/// Write the grid of structures to `dir`/[GRID_FILE_NAME]. Each entry is a
/// legend and its depiction.
pub fn save_structure_grid(
    dir: &Path,
    molecules: &[(&str, Depiction)],
) -> SaveOutcome {
    let depictions: Vec<_> = molecules.iter().map(|(_, d)| d).collect();
    let mut text = vec![("Title".to_owned(), "Compound structures".to_owned())];
    text.extend(
        molecules
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (format!("Legend {i}"), name.to_string())),
    );
    save(dir.join(GRID_FILE_NAME), &structure_grid(&depictions), &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::NativeToolkit;
    use crate::toolkit::{Depictor, StructureParser};

    fn read_png(path: &Path) -> (u32, u32, Vec<(String, String)>) {
        let decoder = png::Decoder::new(File::open(path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        let text = info
            .uncompressed_latin1_text
            .iter()
            .map(|t| (t.keyword.clone(), t.text.clone()))
            .collect();
        (info.width, info.height, text)
    }

    #[test]
    fn file_names() {
        assert_eq!(
            chart_file_name("4-Hydroxycoumarin (Control)"),
            "similarity_to_4_hydroxycoumarin.png"
        );
        assert_eq!(chart_file_name("Quercetin"), "similarity_to_quercetin.png");
        assert_eq!(chart_file_name("Gallic Acid"), "similarity_to_gallic_acid.png");
    }

    #[test]
    fn colours_cycle() {
        assert_eq!(reference_colour(0), SKY_BLUE);
        assert_eq!(reference_colour(1), LIGHT_GREEN);
        assert_eq!(reference_colour(2), SKY_BLUE);
    }

    #[test]
    fn bars_filled_with_reference_colour() {
        let canvas = bar_chart(
            &[Score::new("a", 1.0), Score::new("b", 0.0)],
            LIGHT_GREEN,
        );
        // middle of the first (full height) bar
        let x = 80 + (1200 - 100) / 4;
        assert_eq!(canvas.pixel(x as u32, 300), Some(LIGHT_GREEN));
        // the second bar has no height, so the plot area stays white
        let x = 80 + 3 * (1200 - 100) / 4;
        assert_eq!(canvas.pixel(x as u32, 300), Some(WHITE));
    }

    #[test]
    fn save_chart() {
        let dir = tempfile::tempdir().unwrap();
        let got = save_similarity_chart(
            dir.path(),
            "Quercetin",
            &[Score::new("Quercetin", 1.0), Score::new("Catechol", 0.4)],
            SKY_BLUE,
        );
        let want = dir.path().join("similarity_to_quercetin.png");
        assert_eq!(got, SaveOutcome::Saved(want.clone()));
        let (w, h, text) = read_png(&want);
        assert_eq!((w, h), (CHART_WIDTH, CHART_HEIGHT));
        assert!(text.contains(&(
            "Title".to_owned(),
            "Tanimoto Similarity to Quercetin".to_owned()
        )));
        assert!(text.contains(&("Bar 1".to_owned(), "Catechol: 0.400".to_owned())));
    }

    #[test]
    fn save_grid() {
        let tk = NativeToolkit::default();
        let names = ["Phenol", "Ethanol", "Toluene", "Pyridine", "Furan"];
        let smiles = ["Oc1ccccc1", "CCO", "Cc1ccccc1", "c1ccncc1", "c1ccoc1"];
        let mols: Vec<_> = names
            .iter()
            .zip(smiles)
            .map(|(&n, s)| (n, tk.depict(&tk.parse(s).unwrap())))
            .collect();
        let dir = tempfile::tempdir().unwrap();
        let got = save_structure_grid(dir.path(), &mols);
        assert!(got.is_saved());
        let (w, h, text) = read_png(got.path());
        assert_eq!((w, h), (4 * CELL, 2 * CELL));
        assert!(text.contains(&("Legend 4".to_owned(), "Furan".to_owned())));
    }

    #[test]
    fn missing_directory_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not").join("here");
        let got =
            save_similarity_chart(&missing, "Quercetin", &[], LIGHT_GREEN);
        match got {
            SaveOutcome::Failed { path, reason } => {
                assert_eq!(path, missing.join("similarity_to_quercetin.png"));
                assert!(!reason.is_empty());
            }
            SaveOutcome::Saved(_) => panic!("wrote into a missing directory"),
        }
    }
}
