use byteorder::{LittleEndian, ReadBytesExt};
use std::borrow::Cow;
use std::io::Cursor;

use thiserror::Error;

use super::names::section_name;
use crate::scan::Thresholds;

/// Archive header - 8 bytes, little-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub magic: i32,
    pub count: i32,
}

impl ArchiveHeader {
    pub const MAGIC: i32 = 0;
    pub const SIZE: usize = 8;

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let mut cursor = Cursor::new(data);
        Some(Self {
            magic: cursor.read_i32::<LittleEndian>().ok()?,
            count: cursor.read_i32::<LittleEndian>().ok()?,
        })
    }

    /// First byte past the entry table; no entry may start before it.
    pub fn table_end(&self) -> i64 {
        Self::SIZE as i64 + ArchiveEntry::SIZE as i64 * i64::from(self.count)
    }
}

/// Archive entry descriptor - 12 bytes, little-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub id: i32,
    pub length: i32,
    pub offset: i32,
}

impl ArchiveEntry {
    pub const SIZE: usize = 12;

    fn read(cursor: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        Ok(Self {
            id: cursor.read_i32::<LittleEndian>()?,
            length: cursor.read_i32::<LittleEndian>()?,
            offset: cursor.read_i32::<LittleEndian>()?,
        })
    }

    /// Output file name for this entry.
    pub fn name(&self) -> Cow<'static, str> {
        section_name(self.id)
    }

    /// The entry's bytes inside `payload`, if they lie within it.
    pub fn slice<'a>(&self, payload: &'a [u8]) -> Option<&'a [u8]> {
        let start = usize::try_from(self.offset).ok()?;
        let len = usize::try_from(self.length).ok()?;
        payload.get(start..start.checked_add(len)?)
    }
}

/// Why a payload was not taken as an archive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveRejection {
    #[error("{0} bytes is too small for an archive")]
    TooSmall(usize),

    #[error("header magic {0:#x} is not zero")]
    BadMagic(i32),

    #[error("entry count {0} out of range")]
    BadCount(i32),

    #[error("entry table cut short at entry {0}")]
    ShortEntryTable(usize),

    #[error("entry {index} starts at {offset:#x}, inside the entry table ending at {table_end:#x}")]
    OffsetInTable {
        index: usize,
        offset: i32,
        table_end: i64,
    },
}

/// Try to read `data` as an archive.
///
/// The payload must be at least `min_archive_size` bytes, start with a zero
/// magic and carry between one and `max_archive_entries` entries, none of
/// which may point back into the header or entry table. The first check
/// that fails rejects the whole payload.
pub fn parse_archive(
    data: &[u8],
    thresholds: &Thresholds,
) -> Result<Vec<ArchiveEntry>, ArchiveRejection> {
    if data.len() < thresholds.min_archive_size {
        return Err(ArchiveRejection::TooSmall(data.len()));
    }

    // min_archive_size below the header size still needs a full header
    let header =
        ArchiveHeader::from_bytes(data).ok_or(ArchiveRejection::TooSmall(data.len()))?;
    if header.magic != ArchiveHeader::MAGIC {
        return Err(ArchiveRejection::BadMagic(header.magic));
    }
    if header.count <= 0 || header.count > thresholds.max_archive_entries {
        return Err(ArchiveRejection::BadCount(header.count));
    }

    let table_end = header.table_end();
    let mut cursor = Cursor::new(&data[ArchiveHeader::SIZE..]);
    // the count is untrusted; never reserve more entries than the payload holds
    let room = (data.len() - ArchiveHeader::SIZE) / ArchiveEntry::SIZE;
    let mut entries = Vec::with_capacity((header.count as usize).min(room));

    for index in 0..header.count as usize {
        let entry = ArchiveEntry::read(&mut cursor)
            .map_err(|_| ArchiveRejection::ShortEntryTable(index))?;
        if i64::from(entry.offset) < table_end {
            return Err(ArchiveRejection::OffsetInTable {
                index,
                offset: entry.offset,
                table_end,
            });
        }
        entries.push(entry);
    }

    Ok(entries)
}
