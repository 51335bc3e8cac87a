//! Events emitted to the presentation layer.
//!
//! Every engine operation returns the events it produced, in order. Hosts
//! either match on them directly or feed them to a `Presenter`.

use serde::Serialize;
use smallvec::SmallVec;

use crate::cards::{Card, CardId};
use crate::core::{StatChanges, StatMap};
use crate::effects::ModifierId;
use crate::rules::{EndingReason, StatWarningEvent, TitleTier};

/// User-facing notice for a rejected setup action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Notice {
    /// A reroll was requested with no attempts left.
    RerollsExhausted,
    /// The run was started without a player name.
    NameRequired,
}

impl Notice {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Notice::RerollsExhausted => "No rerolls left",
            Notice::NameRequired => "Enter or pick a name",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Something the presentation layer should show.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum EngineEvent {
    /// Modifiers offered before a run.
    ModifierOffered { offered: Vec<ModifierId>, rerolls_left: u32 },

    /// A new card is in front of the player.
    CardShown { card: Card, turn: u32 },

    /// Requested changes and resulting values after a choice.
    StatsChanged { changes: StatChanges, stats: StatMap<i32> },

    Warning(StatWarningEvent),

    /// Rapid identical choices detected; the special card comes next.
    FlowBreaker { special_card: CardId },

    Promotion { from: TitleTier, to: TitleTier },

    TurnAdvanced { turn: u32, tier: TitleTier },

    Ended { reason: EndingReason, turn: u32 },

    Notice(Notice),
}

/// Events of one operation.
pub type Events = SmallVec<[EngineEvent; 4]>;

/// Receiver of engine events. Every hook defaults to a no-op.
pub trait Presenter {
    fn modifier_offered(&mut self, _offered: &[ModifierId], _rerolls_left: u32) {}

    fn card_shown(&mut self, _card: &Card, _turn: u32) {}

    fn stats_changed(&mut self, _changes: &StatChanges, _stats: &StatMap<i32>) {}

    fn warning(&mut self, _warning: &StatWarningEvent) {}

    fn flow_breaker(&mut self, _special_card: &CardId) {}

    fn promotion(&mut self, _from: TitleTier, _to: TitleTier) {}

    fn turn_advanced(&mut self, _turn: u32, _tier: TitleTier) {}

    fn ended(&mut self, _reason: EndingReason, _turn: u32) {}

    fn notice(&mut self, _notice: Notice) {}

    /// Dispatch events to the per-event hooks in order.
    fn present(&mut self, events: &[EngineEvent]) {
        for event in events {
            match event {
                EngineEvent::ModifierOffered { offered, rerolls_left } => {
                    self.modifier_offered(offered, *rerolls_left);
                }
                EngineEvent::CardShown { card, turn } => self.card_shown(card, *turn),
                EngineEvent::StatsChanged { changes, stats } => self.stats_changed(changes, stats),
                EngineEvent::Warning(warning) => self.warning(warning),
                EngineEvent::FlowBreaker { special_card } => self.flow_breaker(special_card),
                EngineEvent::Promotion { from, to } => self.promotion(*from, *to),
                EngineEvent::TurnAdvanced { turn, tier } => self.turn_advanced(*turn, *tier),
                EngineEvent::Ended { reason, turn } => self.ended(*reason, *turn),
                EngineEvent::Notice(notice) => self.notice(*notice),
            }
        }
    }
}
