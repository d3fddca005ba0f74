//! Declarative layout fixtures.
//!
//! The real character-resolution service is a platform capability; fixtures
//! describe a layout's per-slot outputs and composition rules as data and
//! replay them through a [`CharacterResolver`] with a simulated composition
//! buffer. The `kbd2osk` binary and the test suite both compile from these.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use osk_core::{KeyId, Klid, ShiftState, Vk};

use crate::compiler::CompileError;
use crate::resolver::{CharacterResolver, LayoutDesc, Resolved};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFixture {
    /// KLID as an 8-digit hex string, e.g. "00000409".
    pub klid: String,
    pub name: String,
    #[serde(default)]
    pub has_right_ctrl: bool,
    pub keys: Vec<KeyFixture>,
    #[serde(default)]
    pub compositions: Vec<CompositionFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFixture {
    pub vk: u8,
    pub sc: u8,
    #[serde(default)]
    pub outputs: Vec<OutputFixture>,
}

/// What one key produces under one (state, caps) slot. Exactly one of
/// `text` and `dead` should be set; `dead` wins when both are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFixture {
    /// Numeric [`ShiftState`] value (0..=9).
    pub state: u8,
    #[serde(default)]
    pub caps: bool,
    #[serde(default)]
    pub text: Option<String>,
    /// Single-character accent this slot is a dead key for.
    #[serde(default)]
    pub dead: Option<String>,
}

/// (accent, base character) -> composed character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionFixture {
    pub accent: String,
    pub base: String,
    pub composed: String,
}

/// Parse a JSON array of layout fixtures.
pub fn parse_fixtures(input: &str) -> Result<Vec<LayoutFixture>, serde_json::Error> {
    serde_json::from_str(input)
}

impl LayoutFixture {
    pub fn desc(&self) -> Result<LayoutDesc, CompileError> {
        let klid = u32::from_str_radix(&self.klid, 16)
            .map_err(|_| CompileError::InvalidFixture(format!("bad klid {:?}", self.klid)))?;

        let mut keys: Vec<KeyId> = self
            .keys
            .iter()
            .map(|k| KeyId::new(Vk(k.vk), k.sc))
            .collect();
        keys.sort_by_key(|k| k.vk);

        let flush_key = keys
            .iter()
            .find(|k| k.vk == Vk::DECIMAL)
            .copied()
            .unwrap_or(KeyId::new(Vk::DECIMAL, 0x53));

        Ok(LayoutDesc {
            klid: Klid(klid),
            name: self.name.clone(),
            has_right_ctrl: self.has_right_ctrl,
            keys,
            flush_key,
        })
    }

    pub fn resolver(&self) -> Result<FixtureResolver, CompileError> {
        FixtureResolver::from_fixture(self)
    }
}

enum Output {
    Text(Vec<u16>),
    Dead(u16),
}

/// Replays fixture data through the resolver protocol, including the
/// single shared composition buffer the protocol is built around.
pub struct FixtureResolver {
    outputs: HashMap<(u8, u8, bool), Output>,
    compositions: HashMap<(u16, u16), u16>,
    pending: Option<u16>,
}

impl FixtureResolver {
    pub fn from_fixture(fixture: &LayoutFixture) -> Result<Self, CompileError> {
        let mut outputs = HashMap::new();
        for key in &fixture.keys {
            for out in &key.outputs {
                if out.state as usize >= 10 {
                    return Err(CompileError::InvalidFixture(format!(
                        "state {} out of range for vk {:#04x}",
                        out.state, key.vk
                    )));
                }
                let output = if let Some(dead) = &out.dead {
                    Output::Dead(single_unit(dead, "dead accent")?)
                } else if let Some(text) = &out.text {
                    Output::Text(text.encode_utf16().collect())
                } else {
                    continue;
                };
                outputs.insert((key.vk, out.state, out.caps), output);
            }
        }

        let mut compositions = HashMap::new();
        for comp in &fixture.compositions {
            let accent = single_unit(&comp.accent, "composition accent")?;
            let base = single_unit(&comp.base, "composition base")?;
            let composed = single_unit(&comp.composed, "composed character")?;
            compositions.insert((accent, base), composed);
        }

        Ok(Self {
            outputs,
            compositions,
            pending: None,
        })
    }
}

impl CharacterResolver for FixtureResolver {
    fn resolve(&mut self, key: KeyId, state: ShiftState, caps: bool) -> Resolved {
        let out = self.outputs.get(&(key.vk.0, state as u8, caps));
        match self.pending.take() {
            Some(accent) => match out {
                // Dead key on a primed buffer: nested dead key.
                Some(Output::Dead(d)) => {
                    self.pending = Some(*d);
                    Resolved::Dead(*d)
                }
                Some(Output::Text(units)) if units.len() == 1 => {
                    match self.compositions.get(&(accent, units[0])) {
                        Some(&composed) => Resolved::Text(vec![composed]),
                        // No composition rule: the accent and the base
                        // character both come out.
                        None => Resolved::Text(vec![accent, units[0]]),
                    }
                }
                Some(Output::Text(units)) => {
                    let mut v = vec![accent];
                    v.extend_from_slice(units);
                    Resolved::Text(v)
                }
                None => Resolved::Text(vec![accent]),
            },
            None => match out {
                Some(Output::Dead(d)) => {
                    self.pending = Some(*d);
                    Resolved::Dead(*d)
                }
                Some(Output::Text(units)) => Resolved::Text(units.clone()),
                None => Resolved::None,
            },
        }
    }
}

fn single_unit(s: &str, what: &str) -> Result<u16, CompileError> {
    let units: Vec<u16> = s.encode_utf16().collect();
    if units.len() != 1 {
        return Err(CompileError::InvalidFixture(format!(
            "{} must be a single code unit, got {:?}",
            what, s
        )));
    }
    Ok(units[0])
}
