//! Input actions and the ordered per-frame commands they turn into.

/// A discrete request from the windowing/input side.
///
/// `signum` arguments follow the camera convention: negative decreases,
/// positive increases, zero does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Pan { dx: i32, dy: i32 },
    Recenter { x: i32, y: i32 },
    Zoom(i32),
    AdjustIterations(i32),
    AdjustWorkers(i32),
    SwitchFractal(i32),
    Resize { width: u32, height: u32 },
    ToggleFullscreen,
    Screenshot,
    Refresh,
    Quit,
}

/// One orchestration step of a frame. Variants are declared in execution
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    Await,
    Resize { width: u32, height: u32 },
    ToggleFullscreen,
    Repartition,
    InvalidateAll,
    Shift,
    Dispatch,
    Snapshot,
}

impl FrameCommand {
    #[must_use]
    pub const fn stage(self) -> u8 {
        match self {
            Self::Await => 0,
            Self::Resize { .. } => 1,
            Self::ToggleFullscreen => 2,
            Self::Repartition => 3,
            Self::InvalidateAll => 4,
            Self::Shift => 5,
            Self::Dispatch => 6,
            Self::Snapshot => 7,
        }
    }

    /// Commands that must run in the same frame whenever this one does.
    #[must_use]
    pub const fn implies(self) -> &'static [FrameCommand] {
        match self {
            Self::Resize { .. } => &[Self::Repartition, Self::InvalidateAll, Self::Dispatch],
            Self::Repartition | Self::InvalidateAll | Self::Shift => &[Self::Dispatch],
            Self::Await | Self::ToggleFullscreen | Self::Dispatch | Self::Snapshot => &[],
        }
    }

    /// Whether the step touches the buffer or the dispatcher.
    #[must_use]
    pub const fn needs_await(self) -> bool {
        !matches!(self, Self::Await | Self::ToggleFullscreen)
    }
}

/// Commands collected between frames.
///
/// Each command is stored once; a later resize replaces an earlier one.
/// Draining yields the commands in stage order, led by an `Await` whenever
/// any step touches the buffer, and drops `Shift` when `InvalidateAll` makes
/// it pointless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingActions {
    commands: Vec<FrameCommand>,
}

impl PendingActions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn contains(&self, command: FrameCommand) -> bool {
        self.commands.iter().any(|c| c.stage() == command.stage())
    }

    pub fn push(&mut self, command: FrameCommand) {
        match self.commands.iter_mut().find(|c| c.stage() == command.stage()) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }

        for &implied in command.implies() {
            self.push(implied);
        }
    }

    pub fn drain(&mut self) -> Vec<FrameCommand> {
        let mut plan = std::mem::take(&mut self.commands);

        if plan.contains(&FrameCommand::InvalidateAll) {
            plan.retain(|c| *c != FrameCommand::Shift);
        }

        if plan.iter().any(|c| c.needs_await()) && !plan.contains(&FrameCommand::Await) {
            plan.push(FrameCommand::Await);
        }

        plan.sort_by_key(|c| c.stage());
        plan
    }
}
