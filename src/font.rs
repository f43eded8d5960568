use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// One of the PDF standard 14 faces. These never need to be embedded, which makes
/// them the fallback whenever a font asset cannot be loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

// AFM advance widths for the printable ASCII range (0x20..=0x7e), in 1/1000 em
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl BuiltinFont {
    const UNITS_PER_EM: f32 = 1000.0;
    const ASCENDER: i16 = 718;
    const DESCENDER: i16 = -207;

    fn base_font(&self) -> &'static [u8] {
        match self {
            BuiltinFont::Helvetica => b"Helvetica",
            BuiltinFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    fn advance(&self, ch: char) -> u16 {
        let table = match self {
            BuiltinFont::Helvetica => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match ch {
            ' '..='~' => table[ch as usize - 0x20],
            _ => 556,
        }
    }

    /// Map a character onto WinAnsiEncoding. Latin-1 code points share their values
    /// with WinAnsi; anything outside it becomes a question mark.
    fn encode(ch: char) -> u8 {
        match ch {
            '€' => 0x80,
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            _ => b'?',
        }
    }
}

enum FontKind {
    Embedded(OwnedFace),
    Builtin(BuiltinFont),
}

/// A font usable on pages. Fonts are either TTF / OTF faces which are embedded in their
/// entirety in the generated PDF (so large fonts may dramatically increase the size of the
/// generated PDF), or one of the built-in PDF faces which only needs to be named.
///
/// Typically, fonts are referred to throughout the crate by their [Id] within the
/// document, and not by any typed references
pub struct Font {
    kind: FontKind,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font {
            kind: FontKind::Embedded(face),
        })
    }

    /// Use one of the PDF standard faces
    pub fn builtin(font: BuiltinFont) -> Font {
        Font {
            kind: FontKind::Builtin(font),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.kind, FontKind::Embedded(_))
    }

    fn face(&self) -> Option<&Face<'_>> {
        match &self.kind {
            FontKind::Embedded(face) => Some(face.as_face_ref()),
            FontKind::Builtin(_) => None,
        }
    }

    fn units_per_em(&self) -> f32 {
        self.face()
            .map(|face| face.units_per_em() as f32)
            .unwrap_or(BuiltinFont::UNITS_PER_EM)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.units_per_em()
    }

    /// Obtain the full name of the font
    pub fn name(&self) -> String {
        match &self.kind {
            FontKind::Embedded(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| {
                    name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode()
                })
                .and_then(|name| name.to_string())
                .unwrap_or_else(|| "Embedded".to_string()),
            FontKind::Builtin(font) => String::from_utf8_lossy(font.base_font()).into_owned(),
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let ascender = self
            .face()
            .map(|face| face.ascender())
            .unwrap_or(BuiltinFont::ASCENDER);
        self.scaling(size) * ascender as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let descender = self
            .face()
            .map(|face| face.descender())
            .unwrap_or(BuiltinFont::DESCENDER);
        self.scaling(size) * descender as f32
    }

    /// The horizontal advance of a single character at the given size. Characters
    /// missing from an embedded face are measured as the glyph they will be drawn with.
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let units = match &self.kind {
            FontKind::Embedded(face) => {
                let face = face.as_face_ref();
                face.glyph_hor_advance(owned_ttf_parser::GlyphId(self.glyph_id_or_fallback(ch)))
                    .unwrap_or_default()
            }
            FontKind::Builtin(font) => font.advance(ch),
        };
        self.scaling(size) * units as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face()
            .and_then(|face| face.glyph_index(ch))
            .map(|i| i.0)
    }

    /// The glyph a character is drawn with: itself, the replacement character, a
    /// question mark, or `.notdef` as a last resort
    fn glyph_id_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Encode text into the byte string shown by the `Tj` operator: two-byte glyph ids
    /// for embedded (Identity-H) fonts, single WinAnsi bytes for built-in faces
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match &self.kind {
            FontKind::Embedded(_) => text
                .chars()
                .flat_map(|ch| self.glyph_id_or_fallback(ch).to_be_bytes())
                .collect(),
            FontKind::Builtin(_) => text.chars().map(BuiltinFont::encode).collect(),
        }
    }

    fn write_cid(
        face: &Face<'_>,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = Self::write_descriptor(face, refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let ids_augmented = glyphs_sizing(face, &glyph_ids(face));

        let scaling = 1000.0 / face.units_per_em() as f32;

        // the most popular width becomes the default
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for (_, (width, _)) in ids_augmented.values() {
            *widths_counts.entry(*width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&width, _)| width as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = ids_augmented
            .iter()
            .map(|(&cid, &(_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        if let Some(&(first_cid, first_width)) = id_widths.first() {
            let mut start_cid: u16 = first_cid;
            let mut current_widths: Vec<f32> = vec![first_width];
            for (cid, width) in id_widths.into_iter().skip(1) {
                if (cid - start_cid) as usize > current_widths.len() {
                    widths.consecutive(start_cid, current_widths.clone());
                    start_cid = cid;
                    current_widths.clear();
                }
                current_widths.push(width);
            }
            widths.consecutive(start_cid, current_widths);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        face: &Face<'_>,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let gids_augmented = glyphs_sizing(face, &glyph_ids(face));

        let max_width = gids_augmented
            .values()
            .map(|&(_, (w, _))| w)
            .max()
            .unwrap_or_default();
        let max_height = gids_augmented
            .values()
            .map(|&(_, (_, h))| h)
            .max()
            .unwrap_or_default();
        let sum_width: usize = gids_augmented.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / gids_augmented.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let font_data_id = refs.gen(RefType::FontData(font_index));
        let scaling = 1000.0 / face.units_per_em() as f32;

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(format!("F{font_index}").as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        // not exposed by the face tables, 80 is the customary value
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);
        descriptor.font_file2(font_data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        face: &Face<'_>,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let mut ids: Vec<(u16, char)> = glyph_ids(face).into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries sharing a high byte
        let mut cmap_blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current_block: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for &(id, ch) in ids.iter() {
            if (id >> 8) as u8 != high_byte || current_block.len() >= 100 {
                if !current_block.is_empty() {
                    cmap_blocks.push(std::mem::take(&mut current_block));
                }
                high_byte = (id >> 8) as u8;
            }
            current_block.push((id, ch));
        }
        if !current_block.is_empty() {
            cmap_blocks.push(current_block);
        }

        for block in cmap_blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                let ch: u32 = ch.into();
                map.push_str(&format!("<{id:04x}> <{ch:04x}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));

        match &self.kind {
            FontKind::Builtin(builtin) => {
                let mut font = writer.type1_font(font_id);
                font.base_font(Name(builtin.base_font()));
                font.encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontKind::Embedded(owned) => {
                let face = owned.as_face_ref();
                let cid_font_id = Self::write_cid(face, refs, font_index, writer);
                let to_unicode_id = Self::write_to_unicode(face, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
                font.finish();

                if let Some(data_id) = refs.get(RefType::FontData(font_index)) {
                    let data = owned.as_slice();
                    writer
                        .stream(data_id, data)
                        .pair(Name(b"Length1"), data.len() as i32);
                }
            }
        }
    }
}

fn glyph_ids(face: &Face<'_>) -> HashMap<u16, char> {
    let mut map: HashMap<u16, char> = HashMap::new();

    let Some(cmap) = face.tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }

    map
}

fn glyphs_sizing(face: &Face<'_>, ids: &HashMap<u16, char>) -> HashMap<u16, (char, (u16, i16))> {
    let mut ids_augmented: HashMap<u16, (char, (u16, i16))> = HashMap::new();
    for (&id, &ch) in ids.iter() {
        if let Some(gid) = face.glyph_index(ch) {
            if let Some(h_advance) = face.glyph_hor_advance(gid) {
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                ids_augmented.insert(id, (ch, (h_advance, height)));
            }
        }
    }
    ids_augmented
}
