use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_skia::PathBuilder;
use title_art::AdvanceMetrics;
use ttf_parser::{GlyphId, OutlineBuilder};

/// Substrings of file paths that usually hold a full CJK glyph set.
/// Matched case-sensitively.
pub const CJK_FONT_HINTS: &[&str] = &[
    "yahei",
    "YaHei",
    "simhei",
    "SimHei",
    "simkai",
    "PingFang",
    "Heiti",
    "simsun",
    "SimSun",
    "NotoSansCJK",
    "NotoSerifCJK",
    "SourceHan",
    "wqy",
];

/// Files larger than this are assumed to cover CJK.
pub const LARGE_FONT_BYTES: u64 = 2 * 1024 * 1024;

/// Error loading a single font file
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read font {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse font {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

/// A parsed font file shared by every image one pipeline renders.
///
/// Holds the raw bytes; [`ResolvedFont::face`] borrows a parsed view for
/// measurement and outlines. Cloning is cheap.
#[derive(Clone)]
pub struct ResolvedFont {
    data: Arc<Vec<u8>>,
    index: u32,
    source: PathBuf,
    family: Option<String>,
}

impl fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("source", &self.source)
            .field("index", &self.index)
            .field("family", &self.family)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl ResolvedFont {
    pub fn from_file(path: &Path, index: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, index, path.to_path_buf())
    }

    /// Validate `data` as a font face and take ownership of it.
    pub fn from_bytes(data: Vec<u8>, index: u32, source: PathBuf) -> Result<Self, FontError> {
        let family = {
            let face = ttf_parser::Face::parse(&data, index).map_err(|e| FontError::Parse {
                path: source.clone(),
                reason: e.to_string(),
            })?;
            family_name(&face)
        };

        Ok(Self {
            data: Arc::new(data),
            index,
            source,
            family,
        })
    }

    /// Parsed view of the font for measuring and drawing.
    pub fn face(&self) -> Result<FontFace<'_>, FontError> {
        let face = ttf_parser::Face::parse(&self.data, self.index).map_err(|e| FontError::Parse {
            path: self.source.clone(),
            reason: e.to_string(),
        })?;
        Ok(FontFace { face })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }
}

fn family_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|name| name.to_string())
}

/// Borrowed, parsed font: glyph lookup, advances and outlines.
pub struct FontFace<'a> {
    face: ttf_parser::Face<'a>,
}

impl FontFace<'_> {
    /// Glyph for `ch`, or the `.notdef` glyph when the font lacks it.
    pub fn glyph_index(&self, ch: char) -> GlyphId {
        self.face.glyph_index(ch).unwrap_or(GlyphId(0))
    }

    /// Horizontal advance of `glyph` in whole pixels at `font_size` px/em.
    pub fn glyph_advance(&self, glyph: GlyphId, font_size: u32) -> u32 {
        let units = u32::from(self.face.glyph_hor_advance(glyph).unwrap_or(0));
        let per_em = u32::from(self.face.units_per_em()).max(1);
        (units * font_size + per_em / 2) / per_em
    }

    /// Outline of `glyph` scaled to `font_size` with its origin at
    /// (`x`, `baseline`) in canvas coordinates. `None` for blank glyphs.
    pub fn glyph_path(
        &self,
        glyph: GlyphId,
        font_size: u32,
        x: f32,
        baseline: f32,
    ) -> Option<tiny_skia::Path> {
        let per_em = f32::from(self.face.units_per_em().max(1));
        let mut sink = CanvasOutline {
            builder: PathBuilder::new(),
            scale: font_size as f32 / per_em,
            x,
            y: baseline,
        };
        self.face.outline_glyph(glyph, &mut sink)?;
        sink.builder.finish()
    }
}

impl AdvanceMetrics for FontFace<'_> {
    fn advance(&self, ch: char, font_size: u32) -> u32 {
        self.glyph_advance(self.glyph_index(ch), font_size)
    }
}

/// Maps font units (y up) onto canvas pixels (y down).
struct CanvasOutline {
    builder: PathBuilder,
    scale: f32,
    x: f32,
    y: f32,
}

impl CanvasOutline {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y - y * self.scale)
    }
}

impl OutlineBuilder for CanvasOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// A face inside a font file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontCandidate {
    pub path: PathBuf,
    pub index: u32,
}

impl FontCandidate {
    pub fn new(path: impl Into<PathBuf>, index: u32) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    fn load(&self) -> Option<ResolvedFont> {
        match ResolvedFont::from_file(&self.path, self.index) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::debug!(%e, "Skipping font candidate");
                None
            }
        }
    }

    fn has_cjk_hint(&self) -> bool {
        let path = self.path.to_string_lossy();
        CJK_FONT_HINTS.iter().any(|hint| path.contains(hint))
    }

    fn is_large(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|meta| meta.len() > LARGE_FONT_BYTES)
            .unwrap_or(false)
    }
}

/// One attempt in the font fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStrategy {
    /// The configured font file
    Custom,
    /// A system font whose path names a known CJK family
    CjkFamily,
    /// A system font file over [`LARGE_FONT_BYTES`]
    LargeFile,
    /// Any system font that parses
    FirstParsable,
}

impl FontStrategy {
    pub const ORDER: [FontStrategy; 4] = [
        FontStrategy::Custom,
        FontStrategy::CjkFamily,
        FontStrategy::LargeFile,
        FontStrategy::FirstParsable,
    ];
}

impl fmt::Display for FontStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontStrategy::Custom => "custom",
            FontStrategy::CjkFamily => "cjk-family",
            FontStrategy::LargeFile => "large-file",
            FontStrategy::FirstParsable => "first-parsable",
        };
        f.write_str(name)
    }
}

/// Finds the font titles are drawn with.
///
/// Strategies run in [`FontStrategy::ORDER`]; the first that yields a
/// parsable face wins. A file that fails to parse is skipped, never fatal.
#[derive(Debug, Clone)]
pub struct FontResolver {
    custom: Option<PathBuf>,
    candidates: Vec<FontCandidate>,
}

impl FontResolver {
    /// Resolver over the fonts installed on this system.
    pub fn new(custom: Option<PathBuf>) -> Self {
        Self::with_candidates(custom, system_candidates())
    }

    pub fn with_candidates(custom: Option<PathBuf>, candidates: Vec<FontCandidate>) -> Self {
        Self { custom, candidates }
    }

    pub fn candidates(&self) -> &[FontCandidate] {
        &self.candidates
    }

    pub fn resolve(&self) -> Option<ResolvedFont> {
        self.resolve_with_strategy().map(|(font, _)| font)
    }

    /// Like [`resolve`](Self::resolve), also reporting which strategy won.
    pub fn resolve_with_strategy(&self) -> Option<(ResolvedFont, FontStrategy)> {
        for strategy in FontStrategy::ORDER {
            if let Some(font) = self.attempt(strategy) {
                tracing::info!(
                    %strategy,
                    path = %font.source().display(),
                    family = font.family().unwrap_or("?"),
                    "Resolved font"
                );
                return Some((font, strategy));
            }
        }

        tracing::warn!(
            candidates = self.candidates.len(),
            "No usable font found"
        );
        None
    }

    fn attempt(&self, strategy: FontStrategy) -> Option<ResolvedFont> {
        match strategy {
            FontStrategy::Custom => {
                let path = self.custom.as_ref()?;
                if !path.is_file() {
                    tracing::warn!(path = %path.display(), "Configured font file not found");
                    return None;
                }
                FontCandidate::new(path.clone(), 0).load()
            }
            FontStrategy::CjkFamily => self
                .candidates
                .iter()
                .filter(|c| c.has_cjk_hint())
                .find_map(FontCandidate::load),
            FontStrategy::LargeFile => self
                .candidates
                .iter()
                .filter(|c| c.is_large())
                .find_map(FontCandidate::load),
            FontStrategy::FirstParsable => self.candidates.iter().find_map(FontCandidate::load),
        }
    }
}

/// Font faces discoverable on this system, in discovery order.
pub fn system_candidates() -> Vec<FontCandidate> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(font_count = db.len(), "Scanned system fonts");

    let mut seen = HashSet::new();
    db.faces()
        .filter_map(|face| match &face.source {
            fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
                Some(FontCandidate::new(path.clone(), face.index))
            }
            fontdb::Source::Binary(_) => None,
        })
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}
