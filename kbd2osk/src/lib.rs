pub mod binary;
pub mod compiler;
pub mod deadkey;
pub mod fixture;
pub mod resolver;
pub mod rows;

pub use osk_core::*;

pub use compiler::{CompileError, LayoutCompiler};
pub use resolver::{CharacterResolver, LayoutDesc, Resolved};

use std::fs::{read_to_string, File};
use std::io::BufWriter;
use std::path::Path;

/// Compile every layout of a JSON fixture file into one shared table set.
///
/// A layout that violates the resolver protocol is skipped with a
/// diagnostic; the run continues and still emits the remaining layouts.
pub fn compile_fixture_file(input_path: &Path) -> Result<CompiledSet, CompileError> {
    let input = read_to_string(input_path)?;
    let fixtures = fixture::parse_fixtures(&input)?;

    let mut compiler = LayoutCompiler::new();
    for fx in &fixtures {
        let desc = fx.desc()?;
        let mut resolver = fx.resolver()?;
        match compiler.compile_layout(&desc, &mut resolver) {
            Ok(()) => {}
            Err(CompileError::ResolverProtocol(attempts)) => {
                log::warn!(
                    "skipping layout {} ({}): composition buffer did not settle after {} attempts",
                    desc.klid,
                    desc.name,
                    attempts
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(compiler.finish())
}

/// Compile a fixture file and write the result as a binary table file.
pub fn convert_fixtures_to_osk(input_path: &Path, output_path: &Path) -> Result<(), CompileError> {
    let set = compile_fixture_file(input_path)?;

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    let osk_writer = binary::OskWriter::new(writer);
    osk_writer.write_osk_file(&set)?;

    Ok(())
}
