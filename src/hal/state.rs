//! Rig state vocabulary: line names, display sides, the input snapshot and
//! the per-resource backend record.

use core::fmt;

use serde::Serialize;

/// Monitored input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    RightLever,
    LeftLever,
    NosePoke,
}

impl Input {
    pub const ALL: [Input; 3] = [Input::RightLever, Input::LeftLever, Input::NosePoke];

    pub const fn name(self) -> &'static str {
        match self {
            Self::RightLever => "right_lever",
            Self::LeftLever => "left_lever",
            Self::NosePoke => "nose_poke",
        }
    }

    /// Status-panel wording for this input's state.
    pub const fn label(self, active: bool) -> &'static str {
        match (self, active) {
            (Self::RightLever | Self::LeftLever, true) => "down",
            (Self::RightLever | Self::LeftLever, false) => "up",
            (Self::NosePoke, true) => "poke!",
            (Self::NosePoke, false) => "empty",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controllable output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    WaterPort,
}

impl Output {
    pub const fn name(self) -> &'static str {
        match self {
            Self::WaterPort => "water_port",
        }
    }

    pub const fn label(self, active: bool) -> &'static str {
        if active { "on" } else { "off" }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any monitored line, input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Line {
    Input(Input),
    Output(Output),
}

impl From<Input> for Line {
    fn from(input: Input) -> Self {
        Self::Input(input)
    }
}

impl From<Output> for Line {
    fn from(output: Output) -> Self {
        Self::Output(output)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(input) => fmt::Display::fmt(input, f),
            Self::Output(output) => fmt::Display::fmt(output, f),
        }
    }
}

/// Which status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// One display, the other, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideSelect {
    Left,
    Right,
    Both,
}

impl SideSelect {
    pub fn sides(self) -> &'static [Side] {
        match self {
            Self::Left => &[Side::Left],
            Self::Right => &[Side::Right],
            Self::Both => &Side::BOTH,
        }
    }
}

/// Point-in-time input snapshot.  `true` = pressed / poked / energised.
///
/// `water_port` is `None` on rigs without a water-port line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputState {
    pub right_lever: bool,
    pub left_lever: bool,
    pub nose_poke: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_port: Option<bool>,
}

impl InputState {
    pub fn get(&self, input: Input) -> bool {
        match input {
            Input::RightLever => self.right_lever,
            Input::LeftLever => self.left_lever,
            Input::NosePoke => self.nose_poke,
        }
    }

    pub fn set(&mut self, input: Input, active: bool) {
        match input {
            Input::RightLever => self.right_lever = active,
            Input::LeftLever => self.left_lever = active,
            Input::NosePoke => self.nose_poke = active,
        }
    }

    pub fn output(&self, output: Output) -> Option<bool> {
        match output {
            Output::WaterPort => self.water_port,
        }
    }

    /// Inputs whose state differs from `prev`.
    pub fn changed_since(&self, prev: &InputState) -> impl Iterator<Item = (Input, bool)> {
        let (now, prev) = (*self, *prev);
        Input::ALL
            .into_iter()
            .filter(move |&i| now.get(i) != prev.get(i))
            .map(move |i| (i, now.get(i)))
    }
}

/// Physical or simulated, per resource.  Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Physical,
    Simulated,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Physical => "physical",
            Self::Simulated => "simulated",
        })
    }
}

/// Backend chosen for each resource at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendReport {
    pub bus: Backend,
    pub left_display: Backend,
    pub right_display: Backend,
    /// Inputs and output degrade together.
    pub lines: Backend,
}

impl BackendReport {
    pub const SIMULATED: BackendReport = BackendReport {
        bus: Backend::Simulated,
        left_display: Backend::Simulated,
        right_display: Backend::Simulated,
        lines: Backend::Simulated,
    };

    pub fn display(&self, side: Side) -> Backend {
        match side {
            Side::Left => self.left_display,
            Side::Right => self.right_display,
        }
    }

    pub fn is_fully_simulated(&self) -> bool {
        *self == Self::SIMULATED
    }
}
