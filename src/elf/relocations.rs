//! Relocation offset extraction.
//!
//! The data section of the objects we scan is referenced from code through
//! relocations against the section symbol, with the position inside the
//! section carried in the addend. Collecting those addends gives the set of
//! places where something interesting may start.

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use goblin::elf::sym::STT_SECTION;
use std::io::Cursor;

use super::image::ObjectImage;
use crate::error::{Result, ScanError};

/// Size of an `Elf64_Rela` record.
pub const RELA64_SIZE: usize = 24;

/// A decoded `Elf64_Rela` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rela64 {
    pub offset: u64,
    pub info: u64,
    pub addend: i64,
}

impl Rela64 {
    /// Symbol table index (high 32 bits of `r_info`).
    pub fn symbol(&self) -> u64 {
        self.info >> 32
    }

    /// Relocation type (low 32 bits of `r_info`).
    pub fn kind(&self) -> u32 {
        (self.info & 0xffff_ffff) as u32
    }
}

/// Decode a buffer of `Elf64_Rela` records.
///
/// The caller is responsible for checking that `data` is a whole number of
/// records; a trailing partial record is reported as an I/O error.
pub fn parse_rela64(data: &[u8], little_endian: bool) -> std::io::Result<Vec<Rela64>> {
    if little_endian {
        read_records::<LittleEndian>(data)
    } else {
        read_records::<BigEndian>(data)
    }
}

fn read_records<E: ByteOrder>(data: &[u8]) -> std::io::Result<Vec<Rela64>> {
    let mut records = Vec::with_capacity(data.len() / RELA64_SIZE);
    let mut cursor = Cursor::new(data);

    while (cursor.position() as usize) < data.len() {
        records.push(Rela64 {
            offset: cursor.read_u64::<E>()?,
            info: cursor.read_u64::<E>()?,
            addend: cursor.read_i64::<E>()?,
        });
    }

    Ok(records)
}

/// Collect the offsets into `target` referenced by the records in
/// `rela_section`.
///
/// Only relocations against a section symbol whose section is named
/// `target` count. Offsets are returned in record order, duplicates
/// included.
///
/// # Errors
///
/// Any failure here means the object is not laid out the way the scanner
/// expects and is fatal: a missing section, a relocation section whose
/// length is not a multiple of [`RELA64_SIZE`], or a symbol index past the
/// end of the symbol table.
pub fn relocation_offsets(
    image: &ObjectImage<'_>,
    rela_section: &str,
    target: &str,
) -> Result<Vec<i64>> {
    let rels = image.section_data(rela_section)?;
    if rels.len() % RELA64_SIZE != 0 {
        return Err(ScanError::MalformedRelocations {
            section: rela_section.to_string(),
            len: rels.len(),
        });
    }

    let records =
        parse_rela64(rels, image.is_little_endian()).map_err(|source| ScanError::Relocation {
            section: rela_section.to_string(),
            source,
        })?;

    let symbols = image.symbols();
    let mut offsets = Vec::new();

    for rela in records {
        let index = rela.symbol();
        // STN_UNDEF: the relocation has no symbol at all
        if index == 0 {
            continue;
        }

        let sym = usize::try_from(index - 1)
            .ok()
            .and_then(|i| symbols.get(i))
            .ok_or(ScanError::SymbolOutOfRange {
                index,
                count: symbols.len(),
            })?;

        if sym.kind != STT_SECTION || image.section_name(sym.section) != Some(target) {
            tracing::trace!(
                "skipping relocation type {} at {:#x} against symbol {}",
                rela.kind(),
                rela.offset,
                index
            );
            continue;
        }

        offsets.push(rela.addend);
    }

    tracing::debug!(
        "{} relocations in {} point into {}",
        offsets.len(),
        rela_section,
        target
    );

    Ok(offsets)
}
