//! Per-agent, per-disease progression states.

use std::fmt;

// ── Status ───────────────────────────────────────────────────────────────────

/// Disease status — exactly one value per (agent, disease) at all times.
///
/// Transition graph (advanced once per day by the status updater):
///
/// ```text
/// Never ──infection──▶ Infected ──infectious period ends──▶ Immune
///   ▲                                                          │
///   └────────────── (no path back to Never)                    │ countdown
///                                                              ▼
///                 Infected ◀──infection (reinfect-gated)── Susceptible
///
/// Dead: absorbing, no outgoing transitions.
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Status {
    /// Never infected.
    #[default]
    Never = 0,
    /// Currently infected (infectious once the counter passes incubation).
    Infected = 1,
    /// No longer infected; immune for a drawn duration.
    Immune = 2,
    /// Immunity expired; eligible for reinfection.
    Susceptible = 3,
    /// Terminal.
    Dead = 4,
}

impl Status {
    /// Eligible for an infection draw: `Never` or `Susceptible`.
    ///
    /// `Infected`, `Immune`, and `Dead` agents are never re-infected by the
    /// interaction passes.
    #[inline(always)]
    pub fn is_susceptible(self) -> bool {
        matches!(self, Status::Never | Status::Susceptible)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Never => "never",
            Status::Infected => "infected",
            Status::Immune => "immune",
            Status::Susceptible => "susceptible",
            Status::Dead => "dead",
        };
        f.write_str(s)
    }
}

// ── SymptomState ─────────────────────────────────────────────────────────────

/// Symptomatic development for an infected agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum SymptomState {
    /// Not yet symptomatic, but will develop symptoms.
    #[default]
    Presymptomatic = 0,
    /// Currently symptomatic (may trigger withdrawal, see policy).
    Symptomatic = 1,
    /// Will remain asymptomatic for the whole infection.
    Asymptomatic = 2,
}
