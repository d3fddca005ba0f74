use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use super::error::{OskError, Result};
use super::{MAGIC, VERSION_MAJOR, VERSION_MINOR};
use crate::types::{
    CompiledDeadKey, CompiledLayout, CompiledRow, CompiledSet, DeadKeyTable, InternTable, Klid,
    MultiClass, MultiRef, RowHeader, TableSet,
};

pub struct OskLoader;

impl OskLoader {
    /// Load a compiled table file from binary data.
    pub fn load(data: &[u8]) -> Result<CompiledSet> {
        let mut cursor = Cursor::new(data);

        let (layout_count, counts) = Self::read_header(&mut cursor)?;
        let tables = Self::read_tables(&mut cursor, counts)?;

        let mut layouts = Vec::with_capacity(layout_count);
        for _ in 0..layout_count {
            layouts.push(Self::read_layout(&mut cursor, &tables)?);
        }

        Ok(CompiledSet { tables, layouts })
    }

    /// Read the header; returns the layout count and the five table sizes.
    fn read_header(cursor: &mut Cursor<&[u8]>) -> Result<(usize, [usize; 5])> {
        if cursor.get_ref().len() < 18 {
            return Err(OskError::FileTooSmall(cursor.get_ref().len()));
        }

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(OskError::InvalidMagicCode(magic));
        }

        let major = cursor.read_u8()?;
        let minor = cursor.read_u8()?;
        if major != VERSION_MAJOR || minor > VERSION_MINOR {
            return Err(OskError::UnsupportedVersion { major, minor });
        }

        let layout_count = cursor.read_u16::<LittleEndian>()? as usize;
        let mut counts = [0usize; 5];
        for slot in counts.iter_mut() {
            *slot = cursor.read_u16::<LittleEndian>()? as usize;
        }
        Ok((layout_count, counts))
    }

    fn read_tables(cursor: &mut Cursor<&[u8]>, counts: [usize; 5]) -> Result<TableSet> {
        Ok(TableSet {
            chars: Self::read_array_table::<4>(cursor, counts[0])?,
            seq2: Self::read_array_table::<2>(cursor, counts[1])?,
            seq3: Self::read_array_table::<3>(cursor, counts[2])?,
            seq4: Self::read_array_table::<4>(cursor, counts[3])?,
            accents: Self::read_accent_table(cursor, counts[4])?,
        })
    }

    fn read_array_table<const N: usize>(
        cursor: &mut Cursor<&[u8]>,
        count: usize,
    ) -> Result<InternTable<[u16; N]>> {
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let mut value = [0u16; N];
            for unit in value.iter_mut() {
                *unit = cursor.read_u16::<LittleEndian>()?;
            }
            let uses = cursor.read_u32::<LittleEndian>()?;
            entries.push((value, uses));
        }
        Ok(InternTable::from_entries(entries))
    }

    fn read_accent_table(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<InternTable<u16>> {
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let value = cursor.read_u16::<LittleEndian>()?;
            let uses = cursor.read_u32::<LittleEndian>()?;
            entries.push((value, uses));
        }
        Ok(InternTable::from_entries(entries))
    }

    fn read_layout(cursor: &mut Cursor<&[u8]>, tables: &TableSet) -> Result<CompiledLayout> {
        let klid = Klid(cursor.read_u32::<LittleEndian>()?);
        let name = Self::read_string(cursor)?;
        let mut layout = CompiledLayout::new(klid, name);

        let row_count = cursor.read_u16::<LittleEndian>()? as usize;
        for _ in 0..row_count {
            let header = RowHeader::decode(cursor.read_u32::<LittleEndian>()?);
            let mut chars = [0u16; 4];
            for slot in chars.iter_mut() {
                *slot = cursor.read_u16::<LittleEndian>()?;
                if *slot as usize >= tables.chars.len() {
                    return Err(OskError::InvalidIndex(*slot as usize, tables.chars.len()));
                }
            }
            layout.rows.push(CompiledRow { header, chars });
        }

        for class in MultiClass::ALL {
            let limit = match class {
                MultiClass::Seq2 => tables.seq2.len(),
                MultiClass::Seq3 => tables.seq3.len(),
                MultiClass::Seq4 => tables.seq4.len(),
            };
            let count = cursor.read_u16::<LittleEndian>()? as usize;
            for _ in 0..count {
                let scss = cursor.read_u16::<LittleEndian>()?;
                let index = cursor.read_u16::<LittleEndian>()?;
                if index as usize >= limit {
                    return Err(OskError::InvalidIndex(index as usize, limit));
                }
                layout.push_multi_ref(class, MultiRef { scss, index });
            }
        }

        let dk_count = cursor.read_u16::<LittleEndian>()? as usize;
        for _ in 0..dk_count {
            let accent_index = cursor.read_u16::<LittleEndian>()?;
            if accent_index as usize >= tables.accents.len() {
                return Err(OskError::InvalidIndex(
                    accent_index as usize,
                    tables.accents.len(),
                ));
            }
            let accent = *tables.accents.get(accent_index as usize).unwrap();
            let mut table = DeadKeyTable::new(accent);
            let entry_count = cursor.read_u16::<LittleEndian>()? as usize;
            for _ in 0..entry_count {
                let scss = cursor.read_u16::<LittleEndian>()?;
                let composed = cursor.read_u16::<LittleEndian>()?;
                table.insert(scss, composed);
            }
            layout.dead_keys.push(CompiledDeadKey {
                accent_index,
                table,
            });
        }

        Ok(layout)
    }

    fn read_string(cursor: &mut Cursor<&[u8]>) -> Result<String> {
        let length = cursor.read_u16::<LittleEndian>()? as usize;
        let mut units = vec![0u16; length];
        for unit in units.iter_mut() {
            *unit = cursor.read_u16::<LittleEndian>()?;
        }
        String::from_utf16(&units).map_err(|_| OskError::InvalidUtf16(cursor.position() as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    /// Smallest well-formed file: only the reserved zero entry in every
    /// table, one layout with no rows and a single 2-unit sequence ref.
    fn file_with_seq2_ref(index: u16) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(MAGIC);
        data.push(VERSION_MAJOR);
        data.push(VERSION_MINOR);
        for count in [1u16, 1, 1, 1, 1, 1] {
            data.write_u16::<LittleEndian>(count).unwrap();
        }
        // chars, seq2, seq3, seq4: zero units plus use count.
        for units in [4usize, 2, 3, 4] {
            for _ in 0..units {
                data.write_u16::<LittleEndian>(0).unwrap();
            }
            data.write_u32::<LittleEndian>(0).unwrap();
        }
        // accents.
        data.write_u16::<LittleEndian>(0).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap();

        data.write_u32::<LittleEndian>(0x409).unwrap();
        data.write_u16::<LittleEndian>(0).unwrap(); // name
        data.write_u16::<LittleEndian>(0).unwrap(); // rows
        data.write_u16::<LittleEndian>(1).unwrap(); // seq2 refs
        data.write_u16::<LittleEndian>(0x1E60).unwrap();
        data.write_u16::<LittleEndian>(index).unwrap();
        data.write_u16::<LittleEndian>(0).unwrap(); // seq3 refs
        data.write_u16::<LittleEndian>(0).unwrap(); // seq4 refs
        data.write_u16::<LittleEndian>(0).unwrap(); // dead keys
        data
    }

    #[test]
    fn accepts_in_bounds_sequence_ref() {
        let set = OskLoader::load(&file_with_seq2_ref(0)).unwrap();
        assert_eq!(set.layouts[0].seq2_refs.len(), 1);
    }

    #[test]
    fn rejects_out_of_bounds_sequence_ref() {
        assert!(matches!(
            OskLoader::load(&file_with_seq2_ref(7)),
            Err(OskError::InvalidIndex(7, 1))
        ));
    }

    #[test]
    fn rejects_wrong_magic() {
        let data = b"KMKL\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        assert!(matches!(
            OskLoader::load(data),
            Err(OskError::InvalidMagicCode(_))
        ));
    }

    #[test]
    fn rejects_truncated_header() {
        assert!(matches!(
            OskLoader::load(b"OSKB"),
            Err(OskError::FileTooSmall(4))
        ));
    }

    #[test]
    fn rejects_future_version() {
        let mut data = Vec::new();
        data.extend_from_slice(b"OSKB");
        data.push(2);
        data.push(0);
        data.extend_from_slice(&[0u8; 12]);
        assert!(matches!(
            OskLoader::load(&data),
            Err(OskError::UnsupportedVersion { major: 2, minor: 0 })
        ));
    }
}
