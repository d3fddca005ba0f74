use osk_core::osk::OskLoader;
use osk_core::{InternTable, MultiClass, ShiftState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <osk_file>", args[0]);
        std::process::exit(1);
    }

    let file_data = std::fs::read(&args[1])?;
    let set = OskLoader::load(&file_data)?;

    println!("=== TABLES ===");
    dump_array_table("chars", &set.tables.chars);
    dump_array_table("seq2", &set.tables.seq2);
    dump_array_table("seq3", &set.tables.seq3);
    dump_array_table("seq4", &set.tables.seq4);

    println!("accents: {} entries", set.tables.accents.len());
    for (i, (&accent, uses)) in set.tables.accents.iter().enumerate() {
        println!("  [{}] U+{:04X} (uses={})", i, accent, uses);
    }

    println!("\n=== LAYOUTS ===");
    println!("{} layouts, widest has {} rows", set.layouts.len(), set.max_rows());
    for layout in &set.layouts {
        println!("Layout {} \"{}\"", layout.klid, layout.name);

        println!("  {} rows:", layout.rows.len());
        for row in &layout.rows {
            println!(
                "    sc={:#04x} equiv={:#03x} dead={:#018b} chars={:?}",
                row.header.sc, row.header.equiv_flags, row.header.dead_keys, row.chars
            );
        }

        for class in MultiClass::ALL {
            let refs = layout.multi_refs(class);
            if refs.is_empty() {
                continue;
            }
            println!("  {} {}-unit sequence refs:", refs.len(), class.len());
            for mref in refs {
                let (sc, state, caps) = unpack_scss(mref.scss);
                println!(
                    "    sc={:#04x} state={:?} caps={} -> [{}]",
                    sc, state, caps, mref.index
                );
            }
        }

        println!("  {} dead keys:", layout.dead_keys.len());
        for dk in &layout.dead_keys {
            let accent = set
                .tables
                .accents
                .get(dk.accent_index as usize)
                .copied()
                .unwrap_or(0);
            println!(
                "    accent [{}] U+{:04X}: {} compositions",
                dk.accent_index,
                accent,
                dk.table.len()
            );
            for &(scss, composed) in dk.table.entries() {
                let (sc, state, caps) = unpack_scss(scss);
                println!(
                    "      sc={:#04x} state={:?} caps={} -> U+{:04X}",
                    sc, state, caps, composed
                );
            }
        }
    }

    Ok(())
}

fn dump_array_table<const N: usize>(name: &str, table: &InternTable<[u16; N]>) {
    println!("{}: {} entries", name, table.len());
    for (i, (value, uses)) in table.iter().enumerate() {
        print!("  [{}]", i);
        for &unit in value {
            print!(" {:04X}", unit);
        }
        println!(" (uses={})", uses);
    }
}

fn unpack_scss(scss: u16) -> (u8, ShiftState, bool) {
    let sc = (scss >> 8) as u8;
    let state = ShiftState::from_bits(((scss >> 4) & 0x0F) as u8).unwrap_or(ShiftState::Base);
    let caps = scss & 0x0F != 0;
    (sc, state, caps)
}
