use kbd2osk::binary::OskWriter;
use kbd2osk::fixture::parse_fixtures;
use kbd2osk::LayoutCompiler;
use osk_core::osk::OskLoader;
use pretty_assertions::assert_eq;

fn compile_sample() -> osk_core::CompiledSet {
    let fixtures = parse_fixtures(
        r#"[{
            "klid": "0000040A",
            "name": "Sample",
            "keys": [
                {"vk": 65, "sc": 30, "outputs": [
                    {"state": 0, "text": "a"},
                    {"state": 1, "text": "A"},
                    {"state": 6, "text": "ab"}
                ]},
                {"vk": 222, "sc": 40, "outputs": [
                    {"state": 0, "dead": "´"}
                ]},
                {"vk": 110, "sc": 83, "outputs": [
                    {"state": 0, "text": "."}
                ]}
            ],
            "compositions": [
                {"accent": "´", "base": "a", "composed": "á"}
            ]
        }]"#,
    )
    .expect("invalid fixture JSON");

    let mut compiler = LayoutCompiler::new();
    for fixture in &fixtures {
        let desc = fixture.desc().unwrap();
        let mut resolver = fixture.resolver().unwrap();
        compiler.compile_layout(&desc, &mut resolver).unwrap();
    }
    compiler.finish()
}

#[test]
fn test_write_then_load_round_trips() {
    let set = compile_sample();
    assert_eq!(set.layouts.len(), 1);
    assert_eq!(set.layouts[0].dead_keys.len(), 1);
    assert!(!set.layouts[0].seq2_refs.is_empty());

    let mut buffer = Vec::new();
    let writer = OskWriter::new(&mut buffer);
    writer.write_osk_file(&set).expect("write failed");

    // Header invariants of the on-disk format.
    assert_eq!(&buffer[0..4], b"OSKB");
    assert_eq!(buffer[4], 1);
    assert_eq!(buffer[5], 0);

    let loaded = OskLoader::load(&buffer).expect("load failed");
    assert_eq!(set, loaded);
}

#[test]
fn test_loaded_indices_stay_in_bounds() {
    let set = compile_sample();
    let mut buffer = Vec::new();
    OskWriter::new(&mut buffer)
        .write_osk_file(&set)
        .expect("write failed");

    let loaded = OskLoader::load(&buffer).unwrap();
    for layout in &loaded.layouts {
        for row in &layout.rows {
            for &index in &row.chars {
                assert!(loaded.tables.chars.get(index as usize).is_some());
            }
        }
        for dk in &layout.dead_keys {
            assert!(loaded.tables.accents.get(dk.accent_index as usize).is_some());
        }
    }
}
