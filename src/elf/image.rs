use goblin::elf::Elf;
use goblin::elf::section_header::SHT_NOBITS;

use crate::error::{Result, ScanError};

/// A section header reduced to what the scanner needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    pub name: String,
    pub offset: u64,
    pub size: u64,
    /// `SHT_NOBITS` sections occupy no bytes in the file.
    pub nobits: bool,
}

/// A symbol table entry reduced to its type and owning section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    /// `STT_*` value from the low nibble of `st_info`.
    pub kind: u8,
    /// Section header index the symbol belongs to (`st_shndx`).
    pub section: usize,
}

/// Parsed view of an ELF64 object file.
///
/// The section table and `.symtab` are decoded once with `goblin`; section
/// contents stay borrowed from the input buffer.
///
/// The symbol list does NOT contain the null symbol at index 0, so a
/// relocation's symbol index `n` refers to `symbols()[n - 1]`.
pub struct ObjectImage<'a> {
    data: &'a [u8],
    little_endian: bool,
    sections: Vec<SectionInfo>,
    symbols: Vec<SymbolInfo>,
}

impl<'a> ObjectImage<'a> {
    /// Parse an object file held in memory.
    ///
    /// # Errors
    ///
    /// Fails if the buffer is not an ELF file, or is a 32-bit ELF (relocation
    /// records are assumed to be `Elf64_Rela`).
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let elf = Elf::parse(data)?;
        if !elf.is_64 {
            return Err(ScanError::Unsupported("only ELF64 objects are supported"));
        }

        let sections = elf
            .section_headers
            .iter()
            .map(|sh| SectionInfo {
                name: elf.shdr_strtab.get_at(sh.sh_name).unwrap_or("").to_string(),
                offset: sh.sh_offset,
                size: sh.sh_size,
                nobits: sh.sh_type == SHT_NOBITS,
            })
            .collect();

        let symbols = elf
            .syms
            .iter()
            .skip(1)
            .map(|sym| SymbolInfo {
                kind: sym.st_type(),
                section: sym.st_shndx,
            })
            .collect();

        Ok(Self {
            data,
            little_endian: elf.little_endian,
            sections,
            symbols,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        data: &'a [u8],
        little_endian: bool,
        sections: Vec<SectionInfo>,
        symbols: Vec<SymbolInfo>,
    ) -> Self {
        Self {
            data,
            little_endian,
            sections,
            symbols,
        }
    }

    pub fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }

    pub fn symbols(&self) -> &[SymbolInfo] {
        &self.symbols
    }

    /// Name of the section at header index `index`, if there is one.
    pub fn section_name(&self, index: usize) -> Option<&str> {
        self.sections.get(index).map(|s| s.name.as_str())
    }

    /// Contents of the first section called `name`.
    ///
    /// # Errors
    ///
    /// Fails if no such section exists or its file range does not fit inside
    /// the input.
    pub fn section_data(&self, name: &str) -> Result<&'a [u8]> {
        let section = self
            .sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ScanError::MissingSection(name.to_string()))?;

        if section.nobits {
            return Ok(&[]);
        }

        let out_of_bounds = || ScanError::SectionOutOfBounds {
            name: name.to_string(),
            offset: section.offset,
            size: section.size,
        };
        let start = usize::try_from(section.offset).map_err(|_| out_of_bounds())?;
        let end = section
            .offset
            .checked_add(section.size)
            .and_then(|end| usize::try_from(end).ok())
            .ok_or_else(out_of_bounds)?;

        self.data.get(start..end).ok_or_else(out_of_bounds)
    }
}
