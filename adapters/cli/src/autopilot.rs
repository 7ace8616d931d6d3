//! Scripted stand-in for a human player used when no script is supplied.

use house_defence_core::{Facing, Intent, MenuChoice, Screen, ShopItem};
use house_defence_rendering::Scene;

/// Picks intents from the scene the player would be looking at.
///
/// It buys the most expensive weapon it can afford, heads out to defend and
/// keeps firing at whatever is closest, turning around when needed.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Autopilot;

impl Autopilot {
    pub(crate) fn intents(&self, scene: &Scene) -> Vec<Intent> {
        match scene.screen {
            Screen::Start => vec![Intent::Confirm],
            Screen::House if scene.hud.weapon.is_none() => {
                vec![Intent::Select(MenuChoice::Shop)]
            }
            Screen::House => vec![Intent::Select(MenuChoice::Defend)],
            Screen::Shop => {
                let affordable = scene
                    .shop
                    .iter()
                    .filter(|line| matches!(line.item, ShopItem::Weapon(_)))
                    .filter(|line| line.price <= scene.hud.coins)
                    .max_by_key(|line| line.price);
                match affordable {
                    Some(line) => vec![Intent::Select(MenuChoice::Buy(line.item))],
                    None => vec![Intent::Cancel],
                }
            }
            Screen::Defend => defend(scene),
        }
    }
}

fn defend(scene: &Scene) -> Vec<Intent> {
    let player_x = scene.player.origin.x;
    let boss = scene.boss.as_ref().map(|boss| boss.origin.x);
    let nearest = scene
        .enemies
        .iter()
        .map(|enemy| enemy.origin.x)
        .chain(boss)
        .min_by(|a, b| (a - player_x).abs().total_cmp(&(b - player_x).abs()));

    let mut intents = Vec::with_capacity(2);
    match (nearest, scene.player.facing) {
        (Some(x), Facing::Right) if x < player_x => intents.push(Intent::MoveLeft),
        (Some(x), Facing::Left) if x > player_x => intents.push(Intent::MoveRight),
        _ => {}
    }
    intents.push(Intent::Fire);
    intents
}
