#![allow(dead_code)]

use kbd2osk::fixture::{CompositionFixture, KeyFixture, LayoutFixture, OutputFixture};
use kbd2osk::{CompileError, CompiledSet, LayoutCompiler};

/// Text output for one (state, caps=false) slot
pub fn text(state: u8, s: &str) -> OutputFixture {
    OutputFixture {
        state,
        caps: false,
        text: Some(s.to_string()),
        dead: None,
    }
}

/// Text output for one (state, caps=true) slot
pub fn text_caps(state: u8, s: &str) -> OutputFixture {
    OutputFixture {
        state,
        caps: true,
        text: Some(s.to_string()),
        dead: None,
    }
}

/// Dead-key output for one (state, caps=false) slot
pub fn dead(state: u8, accent: &str) -> OutputFixture {
    OutputFixture {
        state,
        caps: false,
        text: None,
        dead: Some(accent.to_string()),
    }
}

pub fn key(vk: u8, sc: u8, outputs: Vec<OutputFixture>) -> KeyFixture {
    KeyFixture { vk, sc, outputs }
}

/// Keypad decimal key (vk 0x6E), used as the flush key
pub fn decimal_key() -> KeyFixture {
    key(0x6E, 0x53, vec![text(0, ".")])
}

pub fn comp(accent: &str, base: &str, composed: &str) -> CompositionFixture {
    CompositionFixture {
        accent: accent.to_string(),
        base: base.to_string(),
        composed: composed.to_string(),
    }
}

pub fn layout(klid: &str, name: &str, keys: Vec<KeyFixture>) -> LayoutFixture {
    LayoutFixture {
        klid: klid.to_string(),
        name: name.to_string(),
        has_right_ctrl: false,
        keys,
        compositions: vec![],
    }
}

/// Compiles one fixture layout into a fresh table set
pub fn compile_one(fixture: &LayoutFixture) -> CompiledSet {
    let mut compiler = LayoutCompiler::new();
    compile_into(&mut compiler, fixture).expect("compilation failed");
    compiler.finish()
}

/// Compiles a fixture layout into an existing compiler
pub fn compile_into(
    compiler: &mut LayoutCompiler,
    fixture: &LayoutFixture,
) -> Result<(), CompileError> {
    let desc = fixture.desc()?;
    let mut resolver = fixture.resolver()?;
    compiler.compile_layout(&desc, &mut resolver)
}
