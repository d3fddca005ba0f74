use thiserror::Error;

use osk_core::{CompiledDeadKey, CompiledLayout, CompiledRow, CompiledSet, MultiRef, TableSet};

use crate::deadkey;
use crate::resolver::{CharacterResolver, LayoutDesc};
use crate::rows;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resolver protocol violation: composition buffer did not settle after {0} attempts")]
    ResolverProtocol(usize),

    #[error("Invalid layout fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("Invalid fixture data: {0}")]
    InvalidFixture(String),

    #[error("Table format error: {0}")]
    Format(#[from] osk_core::OskError),
}

/// Compiles layouts one at a time into a shared, append-only table set.
///
/// The resolver is a single stateful resource, so compilation is strictly
/// sequential: each layout is fully resolved (rows and dead-key tables)
/// before any interning happens, giving one deterministic intern order.
pub struct LayoutCompiler {
    set: CompiledSet,
}

impl LayoutCompiler {
    pub fn new() -> Self {
        Self {
            set: CompiledSet::new(),
        }
    }

    pub fn tables(&self) -> &TableSet {
        &self.set.tables
    }

    pub fn layouts(&self) -> &[CompiledLayout] {
        &self.set.layouts
    }

    /// Compile one layout. On a resolver protocol violation nothing of the
    /// layout is interned and the shared tables are left untouched.
    pub fn compile_layout<R: CharacterResolver + ?Sized>(
        &mut self,
        desc: &LayoutDesc,
        resolver: &mut R,
    ) -> Result<(), CompileError> {
        log::info!("compiling layout {} ({})", desc.klid, desc.name);

        // Resolution phase: every row and every dead-key table, no interning.
        let resolved = rows::build_rows(desc, resolver)?;
        let mut dead_tables = Vec::with_capacity(resolved.pending_accents.len());
        for pending in &resolved.pending_accents {
            dead_tables.push(deadkey::discover(resolver, desc, pending)?);
        }

        // Encoding phase: pure, no resolver calls.
        let mut layout = CompiledLayout::new(desc.klid, desc.name.clone());
        for row in &resolved.rows {
            if !row.key().vk.is_renderable() || row.is_empty(desc.has_right_ctrl) {
                continue;
            }

            let header = row.header(desc.has_right_ctrl);
            let mut chars = [0u16; 4];
            for (slot, quad) in row.quads(desc.has_right_ctrl).iter().enumerate() {
                chars[slot] = self.set.tables.chars.intern(*quad) as u16;
            }
            layout.rows.push(CompiledRow { header, chars });

            for (scss, units) in row.sequences(desc.has_right_ctrl) {
                if let Some((class, index)) = self.set.tables.intern_multi(units) {
                    layout.push_multi_ref(
                        class,
                        MultiRef {
                            scss,
                            index: index as u16,
                        },
                    );
                }
            }
        }

        for table in dead_tables {
            let accent_index = self.set.tables.accents.intern(table.accent()) as u16;
            layout.dead_keys.push(CompiledDeadKey {
                accent_index,
                table,
            });
        }

        log::debug!(
            "layout {}: {} rows, {} dead keys",
            desc.klid,
            layout.rows.len(),
            layout.dead_keys.len()
        );
        self.set.layouts.push(layout);
        Ok(())
    }

    pub fn finish(self) -> CompiledSet {
        self.set
    }
}

impl Default for LayoutCompiler {
    fn default() -> Self {
        Self::new()
    }
}
