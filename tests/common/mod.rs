//! Helpers for synthesizing small ELF64 relocatable objects and packed
//! payloads.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

const SHT_PROGBITS: u32 = 1;
const SHT_SYMTAB: u32 = 2;
const SHT_STRTAB: u32 = 3;
const SHT_RELA: u32 = 4;
const STT_OBJECT: u8 = 1;
const STT_SECTION: u8 = 3;
const R_X86_64_64: u64 = 1;

/// Symbol index of the `.rodata` section symbol.
pub const RODATA_SYM: u64 = 1;
/// Symbol index of an ordinary object symbol defined in `.rodata`.
pub const OBJECT_SYM: u64 = 2;

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Incompressible bytes, so the packed size tracks the input size.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Netlist archive payload of `total` bytes holding `entries` back to back
/// after the table.
pub fn archive(entries: &[(i32, &[u8])], total: usize) -> Vec<u8> {
    let table_end = 8 + 12 * entries.len();
    let mut data = Vec::with_capacity(total);
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&(entries.len() as i32).to_le_bytes());

    let mut offset = table_end;
    for (id, body) in entries {
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&(body.len() as i32).to_le_bytes());
        data.extend_from_slice(&(offset as i32).to_le_bytes());
        offset += body.len();
    }
    for (_, body) in entries {
        data.extend_from_slice(body);
    }
    data.resize(total, 0);
    data
}

/// Builder for an object with `.rodata`, `.rela.rodata`, `.symtab`,
/// `.strtab` and `.shstrtab`.
pub struct ObjectBuilder {
    big_endian: bool,
    rodata: Vec<u8>,
    relocations: Vec<(u64, i64)>,
    rela_padding: usize,
    with_rela: bool,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self {
            big_endian: false,
            rodata: Vec::new(),
            relocations: Vec::new(),
            rela_padding: 0,
            with_rela: true,
        }
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    pub fn rodata(mut self, data: Vec<u8>) -> Self {
        self.rodata = data;
        self
    }

    /// Add a relocation against `symbol` with the given addend.
    pub fn relocation(mut self, symbol: u64, addend: i64) -> Self {
        self.relocations.push((symbol, addend));
        self
    }

    /// Append stray bytes to the relocation section.
    pub fn rela_padding(mut self, bytes: usize) -> Self {
        self.rela_padding = bytes;
        self
    }

    pub fn without_rela(mut self) -> Self {
        self.with_rela = false;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Out {
            big_endian: self.big_endian,
            bytes: vec![0u8; 64],
        };

        // section name table
        let mut shstrtab = vec![0u8];
        let mut name = |s: &str| {
            let at = shstrtab.len() as u32;
            shstrtab.extend_from_slice(s.as_bytes());
            shstrtab.push(0);
            at
        };
        let rodata_name = name(".rodata");
        let rela_name = name(".rela.rodata");
        let symtab_name = name(".symtab");
        let strtab_name = name(".strtab");
        let shstrtab_name = name(".shstrtab");

        let rodata_off = out.align(16);
        out.bytes.extend_from_slice(&self.rodata);

        let rela_off = out.align(8);
        let mut info_offset = 0u64;
        for &(symbol, addend) in &self.relocations {
            out.u64(info_offset);
            out.u64((symbol << 32) | R_X86_64_64);
            out.u64(addend as u64);
            info_offset += 8;
        }
        out.bytes.extend(std::iter::repeat_n(0u8, self.rela_padding));
        let rela_size = out.bytes.len() - rela_off;

        let strtab = b"\0fw_table\0".to_vec();

        let symtab_off = out.align(8);
        // null symbol
        out.symbol(0, 0, 0, 0);
        // .rodata section symbol
        out.symbol(0, STT_SECTION, 1, 0);
        // fw_table, an object inside .rodata
        out.symbol(1, STT_OBJECT, 1, 0x10);
        let symtab_size = out.bytes.len() - symtab_off;

        let strtab_off = out.bytes.len();
        out.bytes.extend_from_slice(&strtab);

        let shstrtab_off = out.bytes.len();
        out.bytes.extend_from_slice(&shstrtab);

        let shoff = out.align(8);
        let mut shnum = 0u16;
        let mut section = |out: &mut Out, header: [u64; 10]| {
            out.section_header(header);
            shnum += 1;
        };
        // name, type, flags, addr, offset, size, link, info, align, entsize
        section(&mut out, [0; 10]);
        section(
            &mut out,
            [
                u64::from(rodata_name),
                u64::from(SHT_PROGBITS),
                2,
                0,
                rodata_off as u64,
                self.rodata.len() as u64,
                0,
                0,
                16,
                0,
            ],
        );
        let symtab_index = if self.with_rela { 3 } else { 2 };
        if self.with_rela {
            section(
                &mut out,
                [
                    u64::from(rela_name),
                    u64::from(SHT_RELA),
                    0x40,
                    0,
                    rela_off as u64,
                    rela_size as u64,
                    symtab_index,
                    1,
                    8,
                    24,
                ],
            );
        }
        section(
            &mut out,
            [
                u64::from(symtab_name),
                u64::from(SHT_SYMTAB),
                0,
                0,
                symtab_off as u64,
                symtab_size as u64,
                symtab_index + 1,
                3,
                8,
                24,
            ],
        );
        section(
            &mut out,
            [
                u64::from(strtab_name),
                u64::from(SHT_STRTAB),
                0,
                0,
                strtab_off as u64,
                strtab.len() as u64,
                0,
                0,
                1,
                0,
            ],
        );
        section(
            &mut out,
            [
                u64::from(shstrtab_name),
                u64::from(SHT_STRTAB),
                0,
                0,
                shstrtab_off as u64,
                shstrtab.len() as u64,
                0,
                0,
                1,
                0,
            ],
        );

        out.header(shoff as u64, shnum, shnum - 1);
        out.bytes
    }
}

struct Out {
    big_endian: bool,
    bytes: Vec<u8>,
}

impl Out {
    fn align(&mut self, to: usize) -> usize {
        while self.bytes.len() % to != 0 {
            self.bytes.push(0);
        }
        self.bytes.len()
    }

    fn u16(&mut self, v: u16) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.bytes.extend_from_slice(&b);
    }

    fn u32(&mut self, v: u32) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.bytes.extend_from_slice(&b);
    }

    fn u64(&mut self, v: u64) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.bytes.extend_from_slice(&b);
    }

    fn symbol(&mut self, name: u32, kind: u8, shndx: u16, value: u64) {
        self.u32(name);
        self.bytes.push(kind); // STB_LOCAL
        self.bytes.push(0);
        self.u16(shndx);
        self.u64(value);
        self.u64(0);
    }

    fn section_header(&mut self, h: [u64; 10]) {
        self.u32(h[0] as u32);
        self.u32(h[1] as u32);
        self.u64(h[2]);
        self.u64(h[3]);
        self.u64(h[4]);
        self.u64(h[5]);
        self.u32(h[6] as u32);
        self.u32(h[7] as u32);
        self.u64(h[8]);
        self.u64(h[9]);
    }

    /// Write the ELF header into the reserved first 64 bytes.
    fn header(&mut self, shoff: u64, shnum: u16, shstrndx: u16) {
        let body = std::mem::take(&mut self.bytes);
        self.bytes.extend_from_slice(&[0x7f, b'E', b'L', b'F']);
        self.bytes.push(2); // ELFCLASS64
        self.bytes.push(if self.big_endian { 2 } else { 1 });
        self.bytes.push(1); // EV_CURRENT
        self.bytes.extend_from_slice(&[0; 9]);
        self.u16(1); // ET_REL
        self.u16(62); // EM_X86_64
        self.u32(1);
        self.u64(0); // e_entry
        self.u64(0); // e_phoff
        self.u64(shoff);
        self.u32(0); // e_flags
        self.u16(64); // e_ehsize
        self.u16(0); // e_phentsize
        self.u16(0); // e_phnum
        self.u16(64); // e_shentsize
        self.u16(shnum);
        self.u16(shstrndx);
        debug_assert_eq!(self.bytes.len(), 64);
        self.bytes.extend_from_slice(&body[64..]);
    }
}
