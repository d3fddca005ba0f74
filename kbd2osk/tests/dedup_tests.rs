mod common;

use common::*;
use kbd2osk::LayoutCompiler;
use pretty_assertions::assert_eq;

fn latin_layout(klid: &str) -> kbd2osk::fixture::LayoutFixture {
    layout(
        klid,
        "Latin",
        vec![
            key(
                0x41,
                0x1E,
                vec![
                    text(0, "a"),
                    text_caps(0, "A"),
                    text(1, "A"),
                    text_caps(1, "A"),
                ],
            ),
            key(0x42, 0x30, vec![text(0, "b"), text(6, "ab")]),
            decimal_key(),
        ],
    )
}

#[test]
fn test_equal_values_dedup_across_layouts() {
    let mut compiler = LayoutCompiler::new();
    compile_into(&mut compiler, &latin_layout("00000409")).unwrap();

    let chars_after_one = compiler.tables().chars.len();
    let seq2_after_one = compiler.tables().seq2.len();

    compile_into(&mut compiler, &latin_layout("00000807")).unwrap();
    let set = compiler.finish();

    // The second layout adds no new entries, only uses.
    assert_eq!(set.tables.chars.len(), chars_after_one);
    assert_eq!(set.tables.seq2.len(), seq2_after_one);

    assert_eq!(set.layouts.len(), 2);
    assert_eq!(set.layouts[0].rows, set.layouts[1].rows);
    assert_eq!(set.layouts[0].seq2_refs, set.layouts[1].seq2_refs);

    // Shared quad of the 'a' key is counted once per layout.
    let a_quad_index = set.layouts[0].rows[0].chars[0] as usize;
    assert_eq!(set.tables.chars.use_count(a_quad_index), 2);
}

#[test]
fn test_compilation_is_deterministic() {
    let fixtures = [latin_layout("00000409"), latin_layout("0000040C")];

    let mut first = LayoutCompiler::new();
    let mut second = LayoutCompiler::new();
    for fixture in &fixtures {
        compile_into(&mut first, fixture).unwrap();
        compile_into(&mut second, fixture).unwrap();
    }

    assert_eq!(first.finish(), second.finish());
}
