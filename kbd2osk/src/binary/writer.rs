use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

use osk_core::osk::{MAGIC, VERSION_MAJOR, VERSION_MINOR};
use osk_core::{CompiledLayout, CompiledSet, InternTable, MultiClass, OskError, TableSet};

pub struct OskWriter<W: Write> {
    writer: W,
}

impl<W: Write> OskWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_osk_file(mut self, set: &CompiledSet) -> Result<(), OskError> {
        self.write_header(set)?;
        self.write_tables(&set.tables)?;
        for layout in &set.layouts {
            self.write_layout(layout)?;
        }
        Ok(())
    }

    fn write_header(&mut self, set: &CompiledSet) -> Result<(), OskError> {
        self.writer.write_all(MAGIC)?;
        self.writer.write_u8(VERSION_MAJOR)?;
        self.writer.write_u8(VERSION_MINOR)?;

        self.writer
            .write_u16::<LittleEndian>(set.layouts.len() as u16)?;
        self.writer
            .write_u16::<LittleEndian>(set.tables.chars.len() as u16)?;
        self.writer
            .write_u16::<LittleEndian>(set.tables.seq2.len() as u16)?;
        self.writer
            .write_u16::<LittleEndian>(set.tables.seq3.len() as u16)?;
        self.writer
            .write_u16::<LittleEndian>(set.tables.seq4.len() as u16)?;
        self.writer
            .write_u16::<LittleEndian>(set.tables.accents.len() as u16)?;

        Ok(())
    }

    fn write_tables(&mut self, tables: &TableSet) -> Result<(), OskError> {
        self.write_array_table(&tables.chars)?;
        self.write_array_table(&tables.seq2)?;
        self.write_array_table(&tables.seq3)?;
        self.write_array_table(&tables.seq4)?;
        for (&accent, uses) in tables.accents.iter() {
            self.writer.write_u16::<LittleEndian>(accent)?;
            self.writer.write_u32::<LittleEndian>(uses)?;
        }
        Ok(())
    }

    fn write_array_table<const N: usize>(
        &mut self,
        table: &InternTable<[u16; N]>,
    ) -> Result<(), OskError> {
        for (value, uses) in table.iter() {
            for &unit in value {
                self.writer.write_u16::<LittleEndian>(unit)?;
            }
            self.writer.write_u32::<LittleEndian>(uses)?;
        }
        Ok(())
    }

    fn write_layout(&mut self, layout: &CompiledLayout) -> Result<(), OskError> {
        self.writer.write_u32::<LittleEndian>(layout.klid.0)?;
        self.write_string(&layout.name)?;

        self.writer
            .write_u16::<LittleEndian>(layout.rows.len() as u16)?;
        for row in &layout.rows {
            self.writer.write_u32::<LittleEndian>(row.header.encode())?;
            for &index in &row.chars {
                self.writer.write_u16::<LittleEndian>(index)?;
            }
        }

        for class in MultiClass::ALL {
            let refs = layout.multi_refs(class);
            self.writer.write_u16::<LittleEndian>(refs.len() as u16)?;
            for mref in refs {
                self.writer.write_u16::<LittleEndian>(mref.scss)?;
                self.writer.write_u16::<LittleEndian>(mref.index)?;
            }
        }

        self.writer
            .write_u16::<LittleEndian>(layout.dead_keys.len() as u16)?;
        for dk in &layout.dead_keys {
            self.writer.write_u16::<LittleEndian>(dk.accent_index)?;
            self.writer
                .write_u16::<LittleEndian>(dk.table.len() as u16)?;
            for &(scss, composed) in dk.table.entries() {
                self.writer.write_u16::<LittleEndian>(scss)?;
                self.writer.write_u16::<LittleEndian>(composed)?;
            }
        }

        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<(), OskError> {
        let utf16: Vec<u16> = s.encode_utf16().collect();
        self.writer.write_u16::<LittleEndian>(utf16.len() as u16)?;
        for unit in utf16 {
            self.writer.write_u16::<LittleEndian>(unit)?;
        }
        Ok(())
    }
}
