// Attack state machine

/// How long an attack locks the character, in milliseconds
pub const ATTACK_COOLDOWN_MS: u64 = 300;

/// Current phase of the attack state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Attack in progress since `started_at_ms` (game clock)
    Attacking { started_at_ms: u64 },
}

/// Transition reported by [`AttackState::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackEvent {
    Started,
    Finished,
}

/// Attack lock driven by a fresh key press and a wall-clock cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackState {
    phase: AttackPhase,
    cooldown_ms: u64,
}

impl Default for AttackState {
    fn default() -> Self {
        Self::new(ATTACK_COOLDOWN_MS)
    }
}

impl AttackState {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            phase: AttackPhase::Idle,
            cooldown_ms,
        }
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.phase, AttackPhase::Attacking { .. })
    }

    /// Step the state machine for one tick.
    ///
    /// `pressed` must be true only on the tick the attack input went down. A press while
    /// already attacking is ignored.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<AttackEvent> {
        if pressed && self.phase == AttackPhase::Idle {
            self.phase = AttackPhase::Attacking {
                started_at_ms: now_ms,
            };
            return Some(AttackEvent::Started);
        }

        if let AttackPhase::Attacking { started_at_ms } = self.phase {
            if now_ms.saturating_sub(started_at_ms) >= self.cooldown_ms {
                self.phase = AttackPhase::Idle;
                return Some(AttackEvent::Finished);
            }
        }

        None
    }
}
