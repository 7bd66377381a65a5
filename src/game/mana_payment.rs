//! Mana payment and play legality
//!
//! Every land taps for one generic mana. Costs are paid from floating mana
//! first, then by tapping untapped lands left to right.

use crate::core::{Card, CardKind, Condition, Player, PlayerId};
use crate::game::GameState;

/// Untapped lands the player could tap right now
pub fn tappable_mana(player: &Player) -> u32 {
    player.zones.lands.iter().filter(|land| !land.tapped).count() as u32
}

/// Mana the player could spend: floating plus tappable
pub fn available_mana(player: &Player) -> u32 {
    player.mana + tappable_mana(player)
}

/// Tap lands, first untapped first, until the pool covers `required`
pub fn tap_lands_for_mana(player: &mut Player, required: u32) {
    for land in player.zones.lands.iter_mut() {
        if player.mana >= required {
            break;
        }
        if !land.tapped {
            land.tap();
            player.mana += 1;
        }
    }
}

/// Tap what is needed and deduct `cost` from the pool
///
/// Returns false without deducting when the player cannot cover the cost;
/// lands tapped along the way stay tapped with their mana floating.
pub fn pay_cost(player: &mut Player, cost: u32) -> bool {
    tap_lands_for_mana(player, cost);
    if player.mana < cost {
        return false;
    }
    player.mana -= cost;
    true
}

/// Evaluate a casting condition from the point of view of `caster`
pub fn condition_holds(game: &GameState, caster: PlayerId, condition: Condition) -> bool {
    match condition {
        Condition::Always => true,
        Condition::OpponentHasCreature => game.player(caster.other()).has_creature(),
        Condition::HandNotFull => !game.player(caster).zones.hand.is_full(),
    }
}

/// Can `player` play `card` from hand during their play phase?
pub fn can_play_card(game: &GameState, player: PlayerId, card: &Card) -> bool {
    let state = game.player(player);
    if card.cost > available_mana(state) {
        return false;
    }

    match &card.kind {
        CardKind::Land => state.can_play_land(),
        CardKind::Creature(_) => !state.zones.board.is_full(),
        CardKind::Instant(spell) => condition_holds(game, player, spell.condition),
        // Sorcery speed: nothing else may be waiting on the stack
        CardKind::Sorcery(spell) => {
            game.stack.is_empty() && condition_holds(game, player, spell.condition)
        }
    }
}

/// Does any card in hand have a legal play?
pub fn has_valid_moves(game: &GameState, player: PlayerId) -> bool {
    game.player(player)
        .zones
        .hand
        .iter()
        .any(|card| can_play_card(game, player, card))
}

/// Reasons an instant-speed cast is refused at a priority window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantRejection {
    NoSuchCard,
    NotInstant,
    ConditionNotMet,
    NotEnoughMana,
}

/// Check whether `player` may cast hand card `idx` at a priority window
pub fn check_instant(game: &GameState, player: PlayerId, idx: usize) -> Result<(), InstantRejection> {
    let state = game.player(player);
    let card = state.zones.hand.get(idx).ok_or(InstantRejection::NoSuchCard)?;
    let CardKind::Instant(spell) = &card.kind else {
        return Err(InstantRejection::NotInstant);
    };
    if !condition_holds(game, player, spell.condition) {
        return Err(InstantRejection::ConditionNotMet);
    }
    if card.cost > available_mana(state) {
        return Err(InstantRejection::NotEnoughMana);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EffectKind, SpellEffect};
    use crate::game::{GameConfig, Phase};
    use crate::loader::DeckList;

    fn empty_game() -> GameState {
        let deck = DeckList::starter().cards();
        GameState::new(GameConfig::default(), deck.clone(), deck).unwrap()
    }

    fn give_lands(game: &mut GameState, player: PlayerId, count: usize) {
        for _ in 0..count {
            game.player_mut(player).zones.lands.push(Card::land("Mountain"));
        }
    }

    fn bolt() -> Card {
        Card::instant(
            "Lightning Bolt",
            1,
            SpellEffect::new(EffectKind::DamageCreature(3), Condition::OpponentHasCreature, 0),
        )
    }

    #[test]
    fn test_tap_lands_greedily() {
        let mut game = empty_game();
        give_lands(&mut game, PlayerId::FIRST, 3);
        let player = game.player_mut(PlayerId::FIRST);

        assert!(pay_cost(player, 2));
        assert_eq!(player.mana, 0);
        let tapped: Vec<bool> = player.zones.lands.iter().map(|l| l.tapped).collect();
        assert_eq!(tapped, vec![true, true, false]);
        assert_eq!(tappable_mana(player), 1);
    }

    #[test]
    fn test_floating_mana_used_first() {
        let mut game = empty_game();
        give_lands(&mut game, PlayerId::FIRST, 2);
        let player = game.player_mut(PlayerId::FIRST);
        player.mana = 1;

        assert!(pay_cost(player, 2));
        assert_eq!(player.mana, 0);
        assert_eq!(tappable_mana(player), 1);
    }

    #[test]
    fn test_cannot_afford() {
        let mut game = empty_game();
        give_lands(&mut game, PlayerId::FIRST, 1);
        let creature = Card::creature("Hill Giant", 4, 3, 3);
        assert!(!can_play_card(&game, PlayerId::FIRST, &creature));
        assert!(!pay_cost(game.player_mut(PlayerId::FIRST), 4));
    }

    #[test]
    fn test_one_land_per_turn() {
        let mut game = empty_game();
        let land = Card::land("Mountain");
        assert!(can_play_card(&game, PlayerId::FIRST, &land));
        game.player_mut(PlayerId::FIRST).land_played = true;
        assert!(!can_play_card(&game, PlayerId::FIRST, &land));
    }

    #[test]
    fn test_instant_condition_needs_opposing_creature() {
        let mut game = empty_game();
        give_lands(&mut game, PlayerId::FIRST, 1);
        assert!(!can_play_card(&game, PlayerId::FIRST, &bolt()));

        game.player_mut(PlayerId::SECOND)
            .zones
            .board
            .push(Card::creature("Goblin", 1, 1, 1));
        assert!(can_play_card(&game, PlayerId::FIRST, &bolt()));
    }

    #[test]
    fn test_sorcery_needs_empty_stack() {
        let mut game = empty_game();
        give_lands(&mut game, PlayerId::FIRST, 2);
        let divination = Card::sorcery(
            "Divination",
            2,
            SpellEffect::new(EffectKind::DrawCard, Condition::HandNotFull, 0),
        );
        assert!(can_play_card(&game, PlayerId::FIRST, &divination));

        game.stack.push_phase(Phase::Priority);
        assert!(!can_play_card(&game, PlayerId::FIRST, &divination));
    }

    #[test]
    fn test_has_valid_moves() {
        let mut game = empty_game();
        assert!(!has_valid_moves(&game, PlayerId::FIRST));

        game.player_mut(PlayerId::FIRST).zones.hand.push(Card::land("Mountain"));
        assert!(has_valid_moves(&game, PlayerId::FIRST));
    }

    #[test]
    fn test_check_instant_rejections() {
        let mut game = empty_game();
        game.player_mut(PlayerId::FIRST).zones.hand.push(Card::land("Mountain"));
        game.player_mut(PlayerId::FIRST).zones.hand.push(bolt());

        assert_eq!(check_instant(&game, PlayerId::FIRST, 5), Err(InstantRejection::NoSuchCard));
        assert_eq!(check_instant(&game, PlayerId::FIRST, 0), Err(InstantRejection::NotInstant));
        assert_eq!(
            check_instant(&game, PlayerId::FIRST, 1),
            Err(InstantRejection::ConditionNotMet)
        );

        game.player_mut(PlayerId::SECOND)
            .zones
            .board
            .push(Card::creature("Goblin", 1, 1, 1));
        assert_eq!(
            check_instant(&game, PlayerId::FIRST, 1),
            Err(InstantRejection::NotEnoughMana)
        );

        give_lands(&mut game, PlayerId::FIRST, 1);
        assert_eq!(check_instant(&game, PlayerId::FIRST, 1), Ok(()));
    }
}
